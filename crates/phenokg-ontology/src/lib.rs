//! phenokg Ontology Layer
//!
//! Implements the [`ClassLookup`] trait over the class list of a
//! `core_base.json` ontology metadata file.
//!
//! # File format
//!
//! ```json
//! {
//!   "classes": [
//!     { "id": "disease:Ileum", "label": "Ileum", "subClassOf": ["disease:AnatomicalSite"] }
//!   ],
//!   "semantic_domains": []
//! }
//! ```
//!
//! The index is built once, then shared read-only for the lifetime of a run.
//!
//! # Examples
//!
//! ```
//! use phenokg_domain::ClassLookup;
//! use phenokg_ontology::OntologyIndex;
//!
//! let index = OntologyIndex::from_json_str(
//!     r#"{"classes":[{"id":"disease:Ileum","subClassOf":["disease:AnatomicalSite"]}]}"#,
//! ).unwrap();
//! assert!(index.is_valid_class("disease:Ileum"));
//! assert!(index.is_subclass_of("disease:Ileum", "disease:AnatomicalSite"));
//! ```

#![warn(missing_docs)]

use phenokg_domain::ClassLookup;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Errors that can occur while loading an ontology index
#[derive(Error, Debug)]
pub enum OntologyError {
    /// The file could not be read
    #[error("Failed to read ontology file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid ontology metadata
    #[error("Invalid ontology JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One class entry of the ontology
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OntologyClass {
    /// Prefixed class id, e.g. `disease:Ileum`
    pub id: String,

    /// Optional human-readable label
    #[serde(default)]
    pub label: Option<String>,

    /// Direct parent class ids
    #[serde(default, rename = "subClassOf")]
    pub sub_class_of: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OntologyDocument {
    #[serde(default)]
    classes: Vec<OntologyClass>,
}

/// In-memory class index
#[derive(Debug, Clone, Default)]
pub struct OntologyIndex {
    classes: HashMap<String, OntologyClass>,
}

impl OntologyIndex {
    /// An index with no classes; every class check fails
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an index from a list of classes
    ///
    /// When an id appears more than once the first entry wins.
    pub fn from_classes(classes: impl IntoIterator<Item = OntologyClass>) -> Self {
        let mut index = HashMap::new();
        for class in classes {
            if index.contains_key(&class.id) {
                warn!(class_id = %class.id, "Duplicate ontology class ignored");
                continue;
            }
            index.insert(class.id.clone(), class);
        }
        Self { classes: index }
    }

    /// Parse `core_base.json` content
    pub fn from_json_str(json: &str) -> Result<Self, OntologyError> {
        let document: OntologyDocument = serde_json::from_str(json)?;
        Ok(Self::from_classes(document.classes))
    }

    /// Load `core_base.json` from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OntologyError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let index = Self::from_json_str(&content)?;
        debug!(path = %path.as_ref().display(), classes = index.len(), "Loaded ontology index");
        Ok(index)
    }

    /// Load `core_base.json`, falling back to an empty index
    ///
    /// A missing or malformed file is logged at error level; class checks
    /// against the empty index all fail, so gated clinical matches are
    /// skipped rather than the run aborting.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path.as_ref()) {
            Ok(index) => index,
            Err(e) => {
                error!(
                    path = %path.as_ref().display(),
                    error = %e,
                    "Ontology index unavailable, class checks will fail"
                );
                Self::empty()
            }
        }
    }

    /// Look up a class by id
    pub fn get(&self, class_id: &str) -> Option<&OntologyClass> {
        self.classes.get(class_id)
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the index has no classes
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassLookup for OntologyIndex {
    fn is_valid_class(&self, class_id: &str) -> bool {
        self.classes.contains_key(class_id)
    }

    fn is_subclass_of(&self, class_id: &str, parent_id: &str) -> bool {
        if class_id == parent_id {
            return true;
        }

        // Depth-first over parents; the visited set guards against cycles
        let mut visited = HashSet::new();
        let mut stack = vec![class_id];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(class) = self.classes.get(current) else {
                continue;
            };
            for parent in &class.sub_class_of {
                if parent == parent_id {
                    return true;
                }
                stack.push(parent.as_str());
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(id: &str, parents: &[&str]) -> OntologyClass {
        OntologyClass {
            id: id.to_string(),
            label: None,
            sub_class_of: parents.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn sample() -> OntologyIndex {
        OntologyIndex::from_classes(vec![
            class("disease:AnatomicalSite", &[]),
            class("disease:Intestine", &["disease:AnatomicalSite"]),
            class("disease:Ileum", &["disease:Intestine"]),
            class("disease:Granulomatous", &["disease:InflammationCharacteristic"]),
        ])
    }

    #[test]
    fn test_is_valid_class() {
        let index = sample();
        assert!(index.is_valid_class("disease:Ileum"));
        assert!(!index.is_valid_class("disease:Colon"));
        assert!(!index.is_valid_class("Ileum"));
    }

    #[test]
    fn test_subclass_is_transitive() {
        let index = sample();
        assert!(index.is_subclass_of("disease:Ileum", "disease:Intestine"));
        assert!(index.is_subclass_of("disease:Ileum", "disease:AnatomicalSite"));
        assert!(!index.is_subclass_of("disease:AnatomicalSite", "disease:Ileum"));
    }

    #[test]
    fn test_subclass_is_reflexive() {
        let index = sample();
        assert!(index.is_subclass_of("disease:Ileum", "disease:Ileum"));
    }

    #[test]
    fn test_parent_outside_index() {
        let index = sample();
        assert!(index.is_subclass_of("disease:Granulomatous", "disease:InflammationCharacteristic"));
        assert!(!index.is_subclass_of("disease:Granulomatous", "disease:Phenotype"));
    }

    #[test]
    fn test_cycle_terminates() {
        let index = OntologyIndex::from_classes(vec![
            class("disease:A", &["disease:B"]),
            class("disease:B", &["disease:A"]),
        ]);
        assert!(index.is_subclass_of("disease:A", "disease:B"));
        assert!(!index.is_subclass_of("disease:A", "disease:C"));
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let index = OntologyIndex::from_classes(vec![
            class("disease:A", &["disease:B"]),
            class("disease:A", &["disease:C"]),
        ]);
        assert_eq!(index.len(), 1);
        assert!(index.is_subclass_of("disease:A", "disease:B"));
        assert!(!index.is_subclass_of("disease:A", "disease:C"));
    }

    #[test]
    fn test_from_json_str_defaults() {
        let index = OntologyIndex::from_json_str(
            r#"{"classes":[{"id":"disease:X","label":"X"}],"semantic_domains":["clinical"]}"#,
        )
        .unwrap();
        let class = index.get("disease:X").unwrap();
        assert_eq!(class.label.as_deref(), Some("X"));
        assert!(class.sub_class_of.is_empty());
    }

    #[test]
    fn test_from_json_str_without_classes() {
        let index = OntologyIndex::from_json_str("{}").unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let result = OntologyIndex::from_json_str("{not json");
        assert!(matches!(result, Err(OntologyError::Json(_))));
    }
}
