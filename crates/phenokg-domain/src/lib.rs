//! phenokg Domain Layer
//!
//! This crate contains the core vocabulary of the cohort-to-RDF conversion:
//! terms, triples, namespaces, provenance nodes and the sanitizing rules
//! every minted URI and literal must pass through. It has a single external
//! dependency (Unicode normalization) and no I/O.
//!
//! ## Key Concepts
//!
//! - **Triple**: a `(subject, predicate, object)` statement rendered as one Turtle line
//! - **Term**: a prefixed name, an absolute IRI, or a typed literal
//! - **Sanitizer**: turns free text into legal Turtle local names and literals
//! - **Vocabulary**: the closed mapping from vocabulary ids to URI prefixes
//! - **Provenance**: `prov:Activity` and `prov:Agent` nodes describing how
//!   each part of the graph was derived
//!
//! ## Architecture
//!
//! - Pure functions and value types only
//! - Trait definitions for collaborators (ontology class lookup)
//! - Extraction, validation and I/O live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod model;
pub mod namespace;
pub mod provenance;
pub mod sanitize;
pub mod terms;
pub mod traits;
pub mod triple;
pub mod vocabulary;

// Re-exports for convenience
pub use model::{CohortId, InclusionFlags, TemporalConstraint};
pub use namespace::{prefix_block, Namespace, DEFAULT_BASE, PREFIX_BLOCK_VERSION};
pub use provenance::{Agent, ProvenanceActivity};
pub use sanitize::{escape_literal, mint_local_name, sanitize_local_name};
pub use traits::ClassLookup;
pub use triple::{Literal, Term, Triple, XsdType};
pub use vocabulary::Vocabulary;
