//! Error types for the Extractor

use crate::types::Section;
use thiserror::Error;

/// Errors that can occur while converting a cohort record
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// `id` or `name` failed validation; nothing is produced for the record
    #[error("Critical validation errors in cohort {cohort_id}: {}", fields.join(", "))]
    FieldValidation {
        /// Cohort id as found in the record (`"Unknown"` when absent)
        cohort_id: String,
        /// Fields with errors
        fields: Vec<String>,
    },

    /// A concept set could not be converted
    #[error("Failed to parse concept sets in cohort {cohort_id}: {message}")]
    ConceptSet {
        /// Cohort id
        cohort_id: String,
        /// What went wrong
        message: String,
    },

    /// A free-text section could not be converted
    #[error("Failed to parse {section} in cohort {cohort_id}: {message}")]
    TextProcessing {
        /// Cohort id
        cohort_id: String,
        /// Failing section
        section: Section,
        /// What went wrong
        message: String,
    },

    /// Vocabulary id without a known prefix
    #[error("Unknown vocabulary ID: {0}")]
    Vocabulary(String),

    /// Date that is not in a supported format
    #[error("Invalid date format: {0}")]
    DateFormat(String),

    /// Input is not a JSON object
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Input is not valid UTF-8
    #[error("File encoding error: {0}")]
    Encoding(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::InvalidJson(e.to_string())
    }
}

impl ExtractorError {
    /// Whether the record was rejected by required-field validation
    pub fn is_critical(&self) -> bool {
        matches!(self, ExtractorError::FieldValidation { .. })
    }

    /// Section the failure is attributed to, if any
    pub fn section(&self) -> Option<Section> {
        match self {
            ExtractorError::ConceptSet { .. } => Some(Section::ConceptSets),
            ExtractorError::TextProcessing { section, .. } => Some(*section),
            _ => None,
        }
    }

    /// Whether the input could not be decoded at all
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            ExtractorError::InvalidJson(_) | ExtractorError::Encoding(_)
        )
    }
}
