//! PhenoKG Batch
//!
//! Converts a directory of cohort records concurrently.
//!
//! # Overview
//!
//! Files are discovered with a bounded directory walk, then converted on
//! blocking worker threads, at most `max_concurrency` at a time. Each file
//! either yields an output document or a counted failure; one bad file
//! never stops the run. Output order across files is not defined, but
//! each file's document is the same as a single-file conversion.
//!
//! # Usage
//!
//! ```no_run
//! use phenokg_batch::{BatchConfig, BatchRunner};
//! use phenokg_extractor::{Extractor, ExtractorConfig};
//! use phenokg_gatekeeper::ValidationConfig;
//! use phenokg_ontology::OntologyIndex;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = Extractor::new(
//!     ExtractorConfig::default(),
//!     ValidationConfig::default(),
//!     Arc::new(OntologyIndex::empty()),
//! )?;
//! let runner = BatchRunner::new(extractor, BatchConfig::sequential())?;
//! let report = runner.run(Path::new("cohorts"), Path::new("out")).await?;
//! assert!(report.metrics.total_files >= report.metrics.successful);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod runner;

pub use config::BatchConfig;
pub use error::BatchError;
pub use metrics::BatchMetrics;
pub use runner::{BatchReport, BatchRunner, FileOutcome};
