//! Configuration for the Extractor

use phenokg_domain::namespace;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// A clinical-description extraction rule
///
/// Patterns are matched case-insensitively. A pattern with a named group
/// `value` yields a `disease:` class object; any other pattern yields its
/// first capture group as a string literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRule {
    /// Prefixed predicate, e.g. `disease:affectsAnatomicalSite`
    pub predicate: String,

    /// Regular expressions
    pub patterns: Vec<String>,

    /// Require the extracted class to exist in the ontology index
    #[serde(default)]
    pub class_check: bool,
}

impl ExtractionRule {
    fn new(predicate: &str, patterns: &[&str], class_check: bool) -> Self {
        Self {
            predicate: predicate.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            class_check,
        }
    }

    /// Compile the rule's patterns
    pub fn compile(&self) -> Result<Vec<Regex>, String> {
        self.patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| format!("Invalid pattern for {}: {}", self.predicate, e))
            })
            .collect()
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// IRI bound to the empty prefix `:`
    pub base_namespace: String,

    /// Emit the evaluation summary and algorithm text as literals
    pub include_full_text: bool,

    /// Maximum length (characters) of a free-text field
    pub max_field_length: usize,

    /// Clinical-description rules
    pub clinical_rules: Vec<ExtractionRule>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            base_namespace: namespace::DEFAULT_BASE.to_string(),
            include_full_text: true,
            max_field_length: 100_000,
            clinical_rules: default_clinical_rules(),
        }
    }
}

impl ExtractorConfig {
    /// Minimal preset: no full-text literals, no clinical rules
    pub fn minimal() -> Self {
        Self {
            include_full_text: false,
            clinical_rules: Vec::new(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_namespace.is_empty() {
            return Err("base_namespace must not be empty".to_string());
        }
        if !(self.base_namespace.ends_with('/') || self.base_namespace.ends_with('#')) {
            return Err("base_namespace must end with '/' or '#'".to_string());
        }
        if self.max_field_length == 0 {
            return Err("max_field_length must be greater than 0".to_string());
        }
        for rule in &self.clinical_rules {
            validate_predicate(&rule.predicate)?;
            if rule.patterns.is_empty() {
                return Err(format!("Rule {} has no patterns", rule.predicate));
            }
            rule.compile()?;
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

fn validate_predicate(predicate: &str) -> Result<(), String> {
    let Some((prefix, local)) = predicate.split_once(':') else {
        return Err(format!("Predicate '{}' is not a prefixed name", predicate));
    };
    if !namespace::is_declared(prefix) {
        return Err(format!("Predicate '{}' uses undeclared prefix '{}'", predicate, prefix));
    }
    let mut chars = local.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(format!("Predicate '{}' has an invalid local name", predicate));
    }
    Ok(())
}

fn default_clinical_rules() -> Vec<ExtractionRule> {
    vec![
        ExtractionRule::new(
            "disease:hasInflammationCharacteristic",
            &[
                r"characterized by (?P<value>\w+) inflammation",
                r"(?P<value>\w+) inflammation of the",
            ],
            true,
        ),
        ExtractionRule::new(
            "disease:affectsAnatomicalSite",
            &[
                r"located (?:in|at) the (?P<value>\w+)",
                r"affects the (?P<value>\w+)",
            ],
            true,
        ),
        ExtractionRule::new(
            "disease:hasPhenotype",
            &[
                r"presents? with (?P<value>\w+)",
                r"symptoms? (?:include|such as) (?P<value>\w+)",
            ],
            true,
        ),
        ExtractionRule::new(
            "disease:hasRiskFactor",
            &[r"risk factors? (?:include|such as|is|are) (?P<value>\w+)"],
            true,
        ),
        ExtractionRule::new(
            "disease:hasOnsetAge",
            &[r"onset (?:typically )?(?:between|at|around) (?:the )?(?:ages? )?([0-9]+(?:\s*(?:-|to)\s*[0-9]+)?)"],
            false,
        ),
        ExtractionRule::new(
            "disease:hasPrevalence",
            &[r"prevalence (?:of|is) (?:about |approximately )?([0-9][0-9.,]*\s*(?:%|per [0-9,]+))"],
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_namespace, "http://example.org/cohort/");
    }

    #[test]
    fn test_minimal_config_is_valid() {
        let config = ExtractorConfig::minimal();
        assert!(config.validate().is_ok());
        assert!(config.clinical_rules.is_empty());
        assert!(!config.include_full_text);
    }

    #[test]
    fn test_invalid_base_namespace() {
        let mut config = ExtractorConfig::default();
        config.base_namespace = "http://example.org/cohort".to_string();
        assert!(config.validate().is_err());

        config.base_namespace = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rule_pattern() {
        let mut config = ExtractorConfig::minimal();
        config.clinical_rules.push(ExtractionRule::new("disease:hasPhenotype", &["(unclosed"], false));
        let err = config.validate().unwrap_err();
        assert!(err.contains("disease:hasPhenotype"));
    }

    #[test]
    fn test_invalid_rule_predicate() {
        let mut config = ExtractorConfig::minimal();
        config.clinical_rules.push(ExtractionRule::new("nope:x", &["a"], false));
        assert!(config.validate().is_err());

        config.clinical_rules[0].predicate = "hasPhenotype".to_string();
        assert!(config.validate().is_err());

        config.clinical_rules[0].predicate = "disease:1bad".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rule_matching_ignores_case() {
        let rule = ExtractionRule::new("disease:affectsAnatomicalSite", &[r"located in the (?P<value>\w+)"], true);
        let patterns = rule.compile().unwrap();
        let caps = patterns[0].captures("LOCATED IN THE Ileum").unwrap();
        assert_eq!(&caps["value"], "Ileum");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.base_namespace, parsed.base_namespace);
        assert_eq!(config.max_field_length, parsed.max_field_length);
        assert_eq!(config.clinical_rules, parsed.clinical_rules);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("include_full_text = false\n").unwrap();
        assert!(!parsed.include_full_text);
        assert_eq!(parsed.clinical_rules.len(), ExtractorConfig::default().clinical_rules.len());
    }
}
