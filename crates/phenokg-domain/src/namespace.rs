//! Namespace declarations for emitted Turtle documents
//!
//! The prefix block is fixed and versioned: every document written by the
//! assembler starts with the same declarations, in the same order, so two
//! runs over identical input produce identical bytes.

/// Version of the prefix block layout
///
/// Bump when a declaration is added, removed or re-pointed.
pub const PREFIX_BLOCK_VERSION: u32 = 1;

/// Default base IRI for the cohort model (the empty prefix `:`)
pub const DEFAULT_BASE: &str = "http://example.org/cohort/";

/// A prefix declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Namespace {
    /// Prefix label without the trailing colon (empty for the default namespace)
    pub prefix: &'static str,

    /// Namespace IRI
    pub iri: &'static str,
}

impl Namespace {
    const fn new(prefix: &'static str, iri: &'static str) -> Self {
        Self { prefix, iri }
    }

    /// Render as a Turtle `@prefix` line
    pub fn declaration(&self) -> String {
        format!("@prefix {}: <{}> .", self.prefix, self.iri)
    }
}

/// W3C and general-purpose vocabularies
pub const CORE: &[Namespace] = &[
    Namespace::new("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    Namespace::new("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    Namespace::new("owl", "http://www.w3.org/2002/07/owl#"),
    Namespace::new("xsd", "http://www.w3.org/2001/XMLSchema#"),
    Namespace::new("dct", "http://purl.org/dc/terms/"),
    Namespace::new("dc", "http://purl.org/dc/elements/1.1/"),
    Namespace::new("foaf", "http://xmlns.com/foaf/0.1/"),
    Namespace::new("time", "http://www.w3.org/2006/time#"),
    Namespace::new("prov", "http://www.w3.org/ns/prov#"),
    Namespace::new("skos", "http://www.w3.org/2004/02/skos/core#"),
    Namespace::new("disease", "http://example.org/ontology/disease#"),
];

/// Biomedical ontologies and code systems
pub const BIOMEDICAL: &[Namespace] = &[
    Namespace::new("doid", "http://purl.obolibrary.org/obo/DOID_"),
    Namespace::new("hp", "http://purl.obolibrary.org/obo/HP_"),
    Namespace::new("mondo", "http://purl.obolibrary.org/obo/MONDO_"),
    Namespace::new("snomed", "http://purl.bioontology.org/ontology/SNOMEDCT/"),
    Namespace::new("loinc", "http://purl.bioontology.org/ontology/LNC/"),
    Namespace::new("rxnorm", "http://purl.bioontology.org/ontology/RXNORM/"),
    Namespace::new("icd10", "http://purl.bioontology.org/ontology/ICD10/"),
    Namespace::new("icd9", "http://purl.bioontology.org/ontology/ICD9CM/"),
    Namespace::new("umls", "http://purl.bioontology.org/ontology/UMLS/"),
    Namespace::new("mesh", "http://purl.bioontology.org/ontology/MESH/"),
    Namespace::new("chebi", "http://purl.obolibrary.org/obo/CHEBI_"),
    Namespace::new("go", "http://purl.obolibrary.org/obo/GO_"),
    Namespace::new("obo", "http://purl.obolibrary.org/obo/"),
    Namespace::new("oboInOwl", "http://www.geneontology.org/formats/oboInOwl#"),
];

/// OMOP / OHDSI
pub const OHDSI: &[Namespace] = &[
    Namespace::new("omop", "http://purl.org/ohdsi/omop/"),
    Namespace::new("ohdsi", "http://purl.org/ohdsi/"),
];

/// Check whether a prefix label is declared in the fixed block
pub fn is_declared(prefix: &str) -> bool {
    prefix.is_empty()
        || CORE
            .iter()
            .chain(BIOMEDICAL)
            .chain(OHDSI)
            .any(|ns| ns.prefix == prefix)
}

/// Render the full prefix block for a document
///
/// `base` is bound to the empty prefix `:`. The block ends with a blank line.
pub fn prefix_block(base: &str) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str(&format!("# phenokg prefix block v{}\n", PREFIX_BLOCK_VERSION));

    for ns in CORE {
        out.push_str(&ns.declaration());
        out.push('\n');
    }

    out.push_str("\n# Biomedical Ontologies\n");
    for ns in BIOMEDICAL {
        out.push_str(&ns.declaration());
        out.push('\n');
    }

    out.push_str("\n# OMOP/OHDSI\n");
    for ns in OHDSI {
        out.push_str(&ns.declaration());
        out.push('\n');
    }

    out.push_str("\n# Default namespace for the cohort model\n");
    out.push_str(&format!("@prefix : <{}> .\n\n", base));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_format() {
        let ns = Namespace::new("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
        assert_eq!(
            ns.declaration(),
            "@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> ."
        );
    }

    #[test]
    fn test_prefix_block_contains_required_prefixes() {
        let block = prefix_block(DEFAULT_BASE);
        for prefix in ["rdf", "rdfs", "owl", "xsd", "dct", "dc", "foaf", "time", "prov", "skos", "disease"] {
            assert!(
                block.contains(&format!("@prefix {}: <", prefix)),
                "missing prefix {}",
                prefix
            );
        }
        assert!(block.contains("@prefix : <http://example.org/cohort/> ."));
    }

    #[test]
    fn test_prefix_block_is_versioned() {
        let block = prefix_block(DEFAULT_BASE);
        assert!(block.starts_with("# phenokg prefix block v1\n"));
        assert!(block.ends_with("\n\n"));
    }

    #[test]
    fn test_prefix_labels_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for ns in CORE.iter().chain(BIOMEDICAL).chain(OHDSI) {
            assert!(seen.insert(ns.prefix), "duplicate prefix {}", ns.prefix);
        }
    }

    #[test]
    fn test_is_declared() {
        assert!(is_declared(""));
        assert!(is_declared("snomed"));
        assert!(!is_declared("nope"));
    }
}
