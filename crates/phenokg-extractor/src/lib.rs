//! PhenoKG Extractor
//!
//! Converts OHDSI-style cohort definition records (JSON) into RDF Turtle.
//!
//! # Overview
//!
//! Each record is validated field by field, then split into independent
//! sections. Every section extractor returns typed findings; the assembler
//! renders them to triples in a fixed section order behind a versioned
//! prefix block. A record either converts completely or produces nothing.
//!
//! # Architecture
//!
//! ```text
//! JSON → FieldValidator → Metadata / Evaluation / Algorithm / ConceptSets / Title(+Clinical)
//!      → Assembler → Turtle
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use phenokg_extractor::{Extractor, ExtractorConfig};
//! use phenokg_gatekeeper::ValidationConfig;
//! use phenokg_ontology::OntologyIndex;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ontology = Arc::new(OntologyIndex::load_or_empty("ontology/core_base.json"));
//! let extractor = Extractor::new(ExtractorConfig::default(), ValidationConfig::default(), ontology)?;
//!
//! let output = extractor.extract_file_to(Path::new("cohort_42.json"), Path::new("out/cohort_42.ttl"))?;
//! println!("{} triples", output.document.triple_count);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod types;

pub mod algorithm;
pub mod assembler;
pub mod clinical;
pub mod concept_sets;
pub mod evaluation;
pub mod metadata;
pub mod parser;
pub mod title;


pub use config::{ExtractionRule, ExtractorConfig};
pub use error::ExtractorError;
pub use extractor::{output_path, Extractor};
pub use types::{CohortOutput, Document, Extraction, Section, SoftWarning};
