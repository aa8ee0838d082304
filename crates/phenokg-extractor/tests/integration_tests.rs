//! File-level conversion tests, with emitted Turtle re-parsed by oxigraph

use oxigraph::io::RdfFormat;
use oxigraph::store::Store;
use phenokg_extractor::{output_path, Extractor, ExtractorConfig, ExtractorError};
use phenokg_gatekeeper::ValidationConfig;
use phenokg_ontology::OntologyIndex;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn record(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "clinical_description": "A chronic inflammatory disease characterized by granulomatous inflammation, \
            located in the ileum, with onset typically between 15-30 years.",
        "evaluation_summary": "This incident cohort was developed and validated with PheValuator; \
            specificity and sensitivity were reported.",
        "human_readable_algorithm": "### Cohort Entry Events\ncondition occurrence of 'Crohn \"regional\" ileitis'\n\
            ### Cohort Exit\nend of continuous observation\n### Cohort Eras\nwithin 0 days",
        "concept_sets": [{
            "id": "-1",
            "name": "Set with \"quotes\"\tand\ttabs",
            "expression": {"items": [
                {"concept": {"CONCEPT_ID": 1, "CONCEPT_CODE": "K50.0", "VOCABULARY_ID": "ICD10",
                             "CONCEPT_NAME": "Back\\slash"}, "isExcluded": true},
                {"concept": {"CONCEPT_ID": 2, "CONCEPT_CODE": "-9", "VOCABULARY_ID": "Nebraska Lexicon"}}
            ]},
            "resolvedConcepts": [
                {"conceptId": 3, "conceptCode": "4074815", "vocabularyId": "SNOMED",
                 "validStartDate": 1041379200000u64, "validEndDate": "2099-12-31"}
            ]
        }]
    })
}

fn extractor() -> Extractor<OntologyIndex> {
    Extractor::new(
        ExtractorConfig::default(),
        ValidationConfig::default(),
        Arc::new(OntologyIndex::empty()),
    )
    .unwrap()
}

fn write_record(dir: &Path, file: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(file);
    std::fs::write(&path, content).unwrap();
    path
}

fn reparse(turtle: &str) -> usize {
    let store = Store::new().unwrap();
    store
        .load_from_reader(RdfFormat::Turtle, turtle.as_bytes())
        .unwrap_or_else(|e| panic!("Turtle did not parse: {}\n{}", e, turtle));
    store.len().unwrap()
}

#[test]
fn test_emitted_document_reparses() {
    let output = extractor()
        .extract_value(&record(42, "First occurrence of Crohn's disease"))
        .unwrap();

    let count = reparse(&output.document.turtle);
    assert!(count > 0);
    assert!(count <= output.document.triple_count);
}

#[test]
fn test_hostile_text_reparses() {
    let name = "Latest event of \"quoted\" disease\nwith\\backslash, \u{0007}bell, tab\tand e\u{0301}";
    let output = extractor().extract_value(&record(7, name)).unwrap();

    assert!(reparse(&output.document.turtle) > 0);
    assert!(output.document.turtle.contains(":ConceptSet_-1"));
    assert!(output.document.turtle.contains(":_-9 rdf:type :Concept ."));
}

#[test]
fn test_file_conversion_writes_turtle() {
    let dir = TempDir::new().unwrap();
    let input = write_record(dir.path(), "cohort_42.json", &record(42, "Initial diagnosis of asthma").to_string());
    let output = output_path(&input, &dir.path().join("out"), ".ttl");

    let result = extractor().extract_file_to(&input, &output).unwrap();

    assert_eq!(output.file_name().unwrap(), "cohort_42.ttl");
    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, result.document.turtle);
    assert!(reparse(&written) > 0);
}

#[test]
fn test_byte_order_mark_is_accepted() {
    let dir = TempDir::new().unwrap();
    let content = format!("\u{feff}{}", record(3, "Earliest event of gout"));
    let input = write_record(dir.path(), "bom.json", &content);

    assert!(extractor().extract_file(&input).is_ok());
}

#[test]
fn test_malformed_json_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_record(dir.path(), "broken.json", "{\"id\": 1, \"name\": ");
    let output = dir.path().join("broken.ttl");

    let err = extractor().extract_file_to(&input, &output).unwrap_err();
    assert!(err.is_parse_failure());
    assert!(!output.exists());
}

#[test]
fn test_critical_record_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut record = record(5, "Earliest event of gout");
    record.as_object_mut().unwrap().remove("name");
    let input = write_record(dir.path(), "no_name.json", &record.to_string());
    let output = dir.path().join("no_name.ttl");

    let err = extractor().extract_file_to(&input, &output).unwrap_err();
    assert!(err.is_critical());
    assert!(!output.exists());
}

#[test]
fn test_missing_file() {
    let err = extractor()
        .extract_file(Path::new("/nonexistent/cohort.json"))
        .unwrap_err();
    assert!(matches!(err, ExtractorError::Io(_)));
}

#[test]
fn test_repeat_conversion_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let input = write_record(dir.path(), "c.json", &record(9, "Earliest event of gout").to_string());
    let a = dir.path().join("a.ttl");
    let b = dir.path().join("b.ttl");

    extractor().extract_file_to(&input, &a).unwrap();
    extractor().extract_file_to(&input, &b).unwrap();

    assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
}
