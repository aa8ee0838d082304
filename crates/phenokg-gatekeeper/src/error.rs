//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur while configuring the gatekeeper
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for GatekeeperError {
    fn from(e: toml::de::Error) -> Self {
        GatekeeperError::Config(e.to_string())
    }
}
