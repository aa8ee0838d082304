//! Cohort identity, label and Atlas provenance

use crate::types::{Section, SoftWarning};
use phenokg_domain::terms::{class, DCT_IDENTIFIER, DCT_SOURCE, RDFS_LABEL, RDF_TYPE};
use phenokg_domain::{Agent, CohortId, ProvenanceActivity, Term, Triple, XsdType};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

// Absolute IRI: a scheme, then no characters Turtle forbids inside <...>
static IRI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[A-Za-z][A-Za-z0-9+.\-]*:[^\x00-\x20<>"{}|\\^\x60]+$"#).expect("Invalid regex")
});

/// Findings of the metadata section
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataFindings {
    /// Cohort id
    pub cohort: CohortId,

    /// Cohort name
    pub name: String,

    /// Atlas edit URL, when present and a valid IRI
    pub source: Option<String>,
}

/// Build the metadata findings
///
/// An `edit_url` that is not a valid absolute IRI is dropped with a warning.
pub fn extract(
    cohort: &CohortId,
    name: &str,
    edit_url: Option<&Value>,
    warnings: &mut Vec<SoftWarning>,
) -> MetadataFindings {
    let source = match edit_url {
        None | Some(Value::Null) => None,
        Some(Value::String(url)) if url.trim().is_empty() => None,
        Some(Value::String(url)) if is_valid_iri(url.trim()) => Some(url.trim().to_string()),
        Some(other) => {
            warnings.push(SoftWarning::new(
                Section::Metadata,
                format!("edit_url is not a valid IRI: {}", other),
            ));
            None
        }
    };

    MetadataFindings {
        cohort: cohort.clone(),
        name: name.to_string(),
        source,
    }
}

/// Whether text can be written as `<text>` in Turtle
pub fn is_valid_iri(text: &str) -> bool {
    IRI.is_match(text)
}

impl MetadataFindings {
    /// Atlas activity for this cohort
    pub fn atlas_activity(&self) -> ProvenanceActivity {
        ProvenanceActivity::new("AtlasActivity", self.cohort.as_str(), "Atlas Cohort Definition Activity")
    }

    /// Render as triples
    pub fn triples(&self) -> Vec<Triple> {
        let cohort = self.cohort.term();
        let mut triples = vec![
            Triple::new(cohort.clone(), RDF_TYPE, Term::name(class::COHORT)),
            Triple::new(cohort.clone(), RDFS_LABEL, Term::text(self.name.clone())),
            Triple::new(
                cohort.clone(),
                DCT_IDENTIFIER,
                Term::typed(self.cohort.as_str(), XsdType::Integer),
            ),
        ];

        if let Some(source) = &self.source {
            let activity = self.atlas_activity();
            triples.push(Triple::new(cohort.clone(), DCT_SOURCE, Term::iri(source.clone())));
            triples.extend(Agent::ATLAS.declare());
            triples.extend(activity.declare());
            triples.push(activity.generated(&cohort));
            triples.push(activity.associated_with(&Agent::ATLAS));
        }

        triples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lines(findings: &MetadataFindings) -> Vec<String> {
        findings.triples().iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_basic_metadata() {
        let cohort = CohortId::new("42").unwrap();
        let mut warnings = Vec::new();
        let findings = extract(&cohort, "Crohn's disease", None, &mut warnings);

        assert_eq!(
            lines(&findings),
            vec![
                ":Cohort42 rdf:type :Cohort .",
                ":Cohort42 rdfs:label \"Crohn's disease\" .",
                ":Cohort42 dct:identifier \"42\"^^xsd:integer .",
            ]
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_edit_url_adds_atlas_provenance() {
        let cohort = CohortId::new("42").unwrap();
        let url = json!("https://atlas-demo.ohdsi.org/#/cohortdefinition/42");
        let mut warnings = Vec::new();
        let findings = extract(&cohort, "x", Some(&url), &mut warnings);
        let lines = lines(&findings);

        assert!(lines.contains(
            &":Cohort42 dct:source <https://atlas-demo.ohdsi.org/#/cohortdefinition/42> .".to_string()
        ));
        assert!(lines.contains(&":AtlasAgent rdf:type prov:Agent .".to_string()));
        assert!(lines.contains(&":AtlasActivity_42 rdfs:label \"Atlas Cohort Definition Activity\" .".to_string()));
        assert!(lines.contains(&":Cohort42 prov:wasGeneratedBy :AtlasActivity_42 .".to_string()));
        assert!(lines.contains(&":AtlasActivity_42 prov:wasAssociatedWith :AtlasAgent .".to_string()));
    }

    #[test]
    fn test_invalid_edit_url_is_warning() {
        let cohort = CohortId::new("1").unwrap();
        let mut warnings = Vec::new();

        let findings = extract(&cohort, "x", Some(&json!("not a url")), &mut warnings);
        assert!(findings.source.is_none());
        assert_eq!(warnings.len(), 1);

        let findings = extract(&cohort, "x", Some(&json!(12)), &mut warnings);
        assert!(findings.source.is_none());
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_empty_edit_url_is_ignored() {
        let cohort = CohortId::new("1").unwrap();
        let mut warnings = Vec::new();
        let findings = extract(&cohort, "x", Some(&json!("  ")), &mut warnings);
        assert!(findings.source.is_none());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_is_valid_iri() {
        assert!(is_valid_iri("http://example.org/a#b"));
        assert!(is_valid_iri("urn:ohdsi:42"));
        assert!(!is_valid_iri("example.org/a"));
        assert!(!is_valid_iri("http://example.org/a b"));
        assert!(!is_valid_iri("http://example.org/<a>"));
        assert!(!is_valid_iri("http://example.org/\"q\""));
    }
}
