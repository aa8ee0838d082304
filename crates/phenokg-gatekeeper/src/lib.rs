//! phenokg Gatekeeper
//!
//! Checks the presence and shape of the required fields of a cohort record
//! before any extractor runs.
//!
//! The Gatekeeper provides:
//! - Required-field checks (missing, empty, wrong type)
//! - Concept set structure checks
//! - Optional content ("perspective") checks reported as warnings
//! - A [`ValidationReport`] telling each extractor whether its field is usable
//!
//! Validation never logs and never fails: diagnostics are returned to the
//! caller, which decides what to log and whether to continue.
//!
//! # Examples
//!
//! ```
//! use phenokg_gatekeeper::{FieldValidator, RequiredField, ValidationConfig};
//! use serde_json::json;
//!
//! let validator = FieldValidator::new(ValidationConfig::default());
//! let report = validator.validate(&json!({"id": 42}), "42");
//!
//! assert!(report.is_critically_invalid());
//! assert!(report.blocks(RequiredField::Name));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod validator;

pub use config::ValidationConfig;
pub use error::GatekeeperError;
pub use validator::{FieldIssue, FieldReport, FieldValidator, RequiredField, ValidationReport};
