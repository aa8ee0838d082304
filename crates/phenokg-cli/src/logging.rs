//! Tracing setup for the binary.

use crate::error::{CliError, Result};
use tracing_subscriber::EnvFilter;

/// Build the log filter
///
/// `--log-level` wins over `RUST_LOG`, which wins over the configured level.
pub fn filter(cli_level: Option<&str>, rust_log: Option<&str>, configured: &str) -> Result<EnvFilter> {
    let directives = cli_level
        .or(rust_log.filter(|s| !s.trim().is_empty()))
        .unwrap_or(configured);
    EnvFilter::try_new(directives).map_err(|e| CliError::Config(format!("Invalid log filter '{}': {}", directives, e)))
}

/// Initialize tracing (log to stderr)
pub fn init(cli_level: Option<&str>, configured: &str) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = filter(cli_level, rust_log.as_deref(), configured)?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| CliError::Config(format!("Failed to initialize logging: {}", e)))
}
