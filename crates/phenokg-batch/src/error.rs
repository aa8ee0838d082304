//! Error types for batch runs

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a batch run before or while it is scheduled
///
/// Failures of individual files are never returned here; they are counted
/// in [`crate::BatchMetrics`].
#[derive(Error, Debug)]
pub enum BatchError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input path does not exist
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}
