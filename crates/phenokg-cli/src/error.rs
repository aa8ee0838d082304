//! Error types for the CLI application.

use phenokg_batch::BatchError;
use phenokg_extractor::ExtractorError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input file or directory does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Record rejected for missing or invalid `id`/`name`
    #[error("{0}")]
    CriticalValidation(String),

    /// Extractor error
    #[error(transparent)]
    Extractor(ExtractorError),

    /// Batch error
    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<ExtractorError> for CliError {
    fn from(e: ExtractorError) -> Self {
        if e.is_critical() {
            CliError::CriticalValidation(e.to_string())
        } else {
            CliError::Extractor(e)
        }
    }
}

impl CliError {
    /// Process exit code for this error
    ///
    /// 2 when an input does not exist, 3 when a record is critically
    /// invalid, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound(_) | CliError::Batch(BatchError::InputNotFound(_)) => 2,
            CliError::CriticalValidation(_) => 3,
            _ => 1,
        }
    }
}
