//! Configuration for batch runs

use serde::{Deserialize, Serialize};

/// Configuration for the batch runner
///
/// # Examples
///
/// ```
/// use phenokg_batch::BatchConfig;
///
/// let config = BatchConfig::default();
/// assert_eq!(config.extension, "json");
/// assert_eq!(config.output_suffix, ".ttl");
///
/// let config = BatchConfig::sequential();
/// assert_eq!(config.max_concurrency, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum number of files converted at once
    /// Default: available parallelism
    pub max_concurrency: usize,

    /// Extension of input files, without the dot (matched ignoring case)
    pub extension: String,

    /// How deep to descend into the input directory (1 = top level only)
    pub max_depth: usize,

    /// Appended to each input file stem to name its output
    pub output_suffix: String,

    /// Descend into symlinked directories
    pub follow_links: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            extension: "json".to_string(),
            max_depth: 1,
            output_suffix: ".ttl".to_string(),
            follow_links: false,
        }
    }
}

impl BatchConfig {
    /// One file at a time
    pub fn sequential() -> Self {
        Self {
            max_concurrency: 1,
            ..Self::default()
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be greater than 0".to_string());
        }
        if self.max_depth == 0 {
            return Err("max_depth must be greater than 0".to_string());
        }
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err("extension must be non-empty and given without a leading dot".to_string());
        }
        if self.output_suffix.is_empty() {
            return Err("output_suffix must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Save configuration to TOML
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize TOML: {}", e))
    }
}
