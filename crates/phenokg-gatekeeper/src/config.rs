//! Gatekeeper configuration

use crate::GatekeeperError;
use serde::{Deserialize, Serialize};

/// Configuration for field validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Names shorter than this (in characters) produce a warning
    pub min_name_length: usize,

    /// Names longer than this (in characters) are an error
    pub max_name_length: usize,

    /// Run the content checks on text fields (warnings only)
    pub check_perspectives: bool,

    /// Clinical descriptions shorter than this produce a perspective warning
    pub min_description_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_name_length: 3,
            max_name_length: 512,
            check_perspectives: true,
            min_description_length: 50,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (structural checks only)
    pub fn permissive() -> Self {
        Self {
            min_name_length: 1,
            max_name_length: 4096,
            check_perspectives: false,
            min_description_length: 0,
        }
    }

    /// Create a strict configuration
    pub fn strict() -> Self {
        Self {
            min_name_length: 10,
            max_name_length: 256,
            check_perspectives: true,
            min_description_length: 100,
        }
    }

    /// Parse from TOML
    pub fn from_toml(content: &str) -> Result<Self, GatekeeperError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), GatekeeperError> {
        if self.max_name_length == 0 {
            return Err(GatekeeperError::Config(
                "max_name_length must be greater than 0".to_string(),
            ));
        }
        if self.min_name_length > self.max_name_length {
            return Err(GatekeeperError::Config(format!(
                "min_name_length ({}) exceeds max_name_length ({})",
                self.min_name_length, self.max_name_length
            )));
        }
        Ok(())
    }
}
