//! Integration tests for loading ontology indexes from disk

use phenokg_domain::ClassLookup;
use phenokg_ontology::{OntologyError, OntologyIndex};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const CORE_BASE: &str = r#"{
  "classes": [
    {"id": "disease:AnatomicalSite", "label": "Anatomical site", "subClassOf": []},
    {"id": "disease:Ileum", "label": "Ileum", "subClassOf": ["disease:AnatomicalSite"]},
    {"id": "disease:Transmural", "subClassOf": ["disease:InflammationCharacteristic"]}
  ],
  "semantic_domains": []
}"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_temp(CORE_BASE);
    let index = OntologyIndex::from_file(file.path()).unwrap();

    assert_eq!(index.len(), 3);
    assert!(index.is_valid_class("disease:Transmural"));
    assert!(index.is_subclass_of("disease:Ileum", "disease:AnatomicalSite"));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = OntologyIndex::from_file("/nonexistent/core_base.json");
    assert!(matches!(result, Err(OntologyError::Io(_))));
}

#[test]
fn test_load_or_empty_falls_back() {
    let missing = OntologyIndex::load_or_empty("/nonexistent/core_base.json");
    assert!(missing.is_empty());

    let file = write_temp("[1, 2");
    let malformed = OntologyIndex::load_or_empty(file.path());
    assert!(malformed.is_empty());
    assert!(!malformed.is_valid_class("disease:Ileum"));
}

#[test]
fn test_shared_behind_arc() {
    let file = write_temp(CORE_BASE);
    let index = Arc::new(OntologyIndex::from_file(file.path()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            std::thread::spawn(move || index.is_valid_class("disease:Ileum"))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
