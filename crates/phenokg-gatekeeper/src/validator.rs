//! Required-field validation logic

use crate::ValidationConfig;
use phenokg_domain::CohortId;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::LazyLock;

static TITLE_CONDITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bof\s+\w+").expect("Invalid regex"));

const DESCRIPTION_KEYWORDS: &[&str] = &["characterized", "located", "age", "incidence", "prevalence"];
const SUMMARY_KEYWORDS: &[&str] = &["developed", "validated", "tested"];
const ALGORITHM_SECTIONS: &[&str] = &["Cohort Entry", "Cohort Exit", "Cohort Eras"];

/// Fields every cohort record must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// Numeric cohort id
    Id,
    /// Cohort title
    Name,
    /// Free-text clinical description
    ClinicalDescription,
    /// Free-text evaluation summary
    EvaluationSummary,
    /// Markdown-ish description of the cohort algorithm
    HumanReadableAlgorithm,
    /// List of concept set objects
    ConceptSets,
}

impl RequiredField {
    /// All required fields, in validation order
    pub const ALL: [RequiredField; 6] = [
        RequiredField::Id,
        RequiredField::Name,
        RequiredField::ClinicalDescription,
        RequiredField::EvaluationSummary,
        RequiredField::HumanReadableAlgorithm,
        RequiredField::ConceptSets,
    ];

    /// JSON key of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::Id => "id",
            RequiredField::Name => "name",
            RequiredField::ClinicalDescription => "clinical_description",
            RequiredField::EvaluationSummary => "evaluation_summary",
            RequiredField::HumanReadableAlgorithm => "human_readable_algorithm",
            RequiredField::ConceptSets => "concept_sets",
        }
    }

    /// Whether an error on this field invalidates the whole record
    pub fn is_critical(&self) -> bool {
        matches!(self, RequiredField::Id | RequiredField::Name)
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic about a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    /// Key is absent
    Missing,

    /// Null, blank string, or empty list
    Empty,

    /// Id is neither a non-negative integer nor an all-digit string
    NotNumeric,

    /// Value has the wrong JSON type
    WrongType {
        /// Expected type
        expected: &'static str,
    },

    /// Name shorter than the configured minimum
    TooShort {
        /// Actual length in characters
        len: usize,
        /// Configured minimum
        min: usize,
    },

    /// Name longer than the configured maximum
    TooLong {
        /// Actual length in characters
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Concept set entry is not an object
    ConceptSetNotObject {
        /// Position in the list
        index: usize,
    },

    /// Concept set entry lacks a key
    ConceptSetMissingKey {
        /// Position in the list
        index: usize,
        /// Missing key
        key: &'static str,
    },

    /// Concept set expression is not `{ "items": [...] }`
    ExpressionMalformed {
        /// Position in the list
        index: usize,
        /// What is wrong with it
        reason: &'static str,
    },

    /// `resolvedConcepts` is present but not a list
    ResolvedConceptsNotList {
        /// Position in the list
        index: usize,
    },

    /// Content check (warnings only)
    Perspective(String),
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::Missing => write!(f, "required field is missing"),
            FieldIssue::Empty => write!(f, "field is empty"),
            FieldIssue::NotNumeric => write!(f, "must be numeric"),
            FieldIssue::WrongType { expected } => write!(f, "must be {}", expected),
            FieldIssue::TooShort { len, min } => {
                write!(f, "is very short ({} characters, minimum {})", len, min)
            }
            FieldIssue::TooLong { len, max } => {
                write!(f, "is too long ({} characters, maximum {})", len, max)
            }
            FieldIssue::ConceptSetNotObject { index } => {
                write!(f, "concept set {} is not an object", index)
            }
            FieldIssue::ConceptSetMissingKey { index, key } => {
                write!(f, "concept set {} missing '{}'", index, key)
            }
            FieldIssue::ExpressionMalformed { index, reason } => {
                write!(f, "concept set {} expression {}", index, reason)
            }
            FieldIssue::ResolvedConceptsNotList { index } => {
                write!(f, "concept set {} resolvedConcepts is not a list", index)
            }
            FieldIssue::Perspective(message) => f.write_str(message),
        }
    }
}

/// Diagnostics for one required field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    /// The field
    pub field: RequiredField,

    /// Errors block the field's extractor
    pub errors: Vec<FieldIssue>,

    /// Warnings are reported only
    pub warnings: Vec<FieldIssue>,
}

impl FieldReport {
    fn new(field: RequiredField) -> Self {
        Self {
            field,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Whether the field passed without errors
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the field passed without errors or warnings
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Result of validating one cohort record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Cohort id used for diagnostics (`"Unknown"` when absent)
    pub cohort_id: String,

    /// One report per required field, in [`RequiredField::ALL`] order
    pub fields: Vec<FieldReport>,
}

impl ValidationReport {
    /// Report for a field
    pub fn field(&self, field: RequiredField) -> Option<&FieldReport> {
        self.fields.iter().find(|r| r.field == field)
    }

    /// Whether the field has errors and its extractor must not run
    pub fn blocks(&self, field: RequiredField) -> bool {
        self.field(field).is_some_and(|r| !r.is_valid())
    }

    /// Whether an error on `id` or `name` invalidates the record
    pub fn is_critically_invalid(&self) -> bool {
        !self.critical_fields().is_empty()
    }

    /// Critical fields that have errors
    pub fn critical_fields(&self) -> Vec<RequiredField> {
        self.fields
            .iter()
            .filter(|r| r.field.is_critical() && !r.is_valid())
            .map(|r| r.field)
            .collect()
    }

    /// Total number of errors
    pub fn error_count(&self) -> usize {
        self.fields.iter().map(|r| r.errors.len()).sum()
    }

    /// Total number of warnings
    pub fn warning_count(&self) -> usize {
        self.fields.iter().map(|r| r.warnings.len()).sum()
    }
}

/// Validates required fields of cohort records
pub struct FieldValidator {
    config: ValidationConfig,
}

impl FieldValidator {
    /// Create a new validator with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a validator with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a cohort record
    ///
    /// A record that is not a JSON object reports every field as missing.
    pub fn validate(&self, record: &Value, cohort_id: &str) -> ValidationReport {
        let empty = Map::new();
        let object = record.as_object().unwrap_or(&empty);

        let fields = RequiredField::ALL
            .iter()
            .map(|&field| self.validate_field(field, object.get(field.as_str())))
            .collect();

        ValidationReport {
            cohort_id: cohort_id.to_string(),
            fields,
        }
    }

    fn validate_field(&self, field: RequiredField, value: Option<&Value>) -> FieldReport {
        let mut report = FieldReport::new(field);

        let Some(value) = value else {
            report.errors.push(FieldIssue::Missing);
            return report;
        };

        if is_empty(value) {
            report.errors.push(FieldIssue::Empty);
            return report;
        }

        match field {
            RequiredField::Id => self.check_id(value, &mut report),
            RequiredField::Name => self.check_name(value, &mut report),
            RequiredField::ConceptSets => self.check_concept_sets(value, &mut report),
            RequiredField::ClinicalDescription
            | RequiredField::EvaluationSummary
            | RequiredField::HumanReadableAlgorithm => self.check_text(field, value, &mut report),
        }

        report
    }

    fn check_id(&self, value: &Value, report: &mut FieldReport) {
        match value {
            Value::Number(n) if n.is_u64() => {}
            Value::Number(_) => report.errors.push(FieldIssue::NotNumeric),
            Value::String(s) => {
                if CohortId::new(s.as_str()).is_none() {
                    report.errors.push(FieldIssue::NotNumeric);
                }
            }
            _ => report.errors.push(FieldIssue::WrongType {
                expected: "an integer or string",
            }),
        }
    }

    fn check_name(&self, value: &Value, report: &mut FieldReport) {
        let Some(name) = value.as_str() else {
            report.errors.push(FieldIssue::WrongType { expected: "a string" });
            return;
        };

        let len = name.chars().count();
        if len > self.config.max_name_length {
            report.errors.push(FieldIssue::TooLong {
                len,
                max: self.config.max_name_length,
            });
        } else if len < self.config.min_name_length {
            report.warnings.push(FieldIssue::TooShort {
                len,
                min: self.config.min_name_length,
            });
        }

        if self.config.check_perspectives && !TITLE_CONDITION.is_match(name) {
            report.warnings.push(FieldIssue::Perspective(
                "Title should include 'of' followed by a condition".to_string(),
            ));
        }
    }

    fn check_text(&self, field: RequiredField, value: &Value, report: &mut FieldReport) {
        let Some(text) = value.as_str() else {
            report.errors.push(FieldIssue::WrongType { expected: "a string" });
            return;
        };

        if self.config.check_perspectives {
            for message in self.perspective_issues(field, text) {
                report.warnings.push(FieldIssue::Perspective(message.to_string()));
            }
        }
    }

    fn perspective_issues(&self, field: RequiredField, text: &str) -> Vec<&'static str> {
        let mut issues = Vec::new();
        let lower = text.to_lowercase();

        match field {
            RequiredField::ClinicalDescription => {
                if text.chars().count() < self.config.min_description_length {
                    issues.push("Clinical description is shorter than recommended");
                }
                if !DESCRIPTION_KEYWORDS.iter().any(|k| lower.contains(k)) {
                    issues.push("Clinical description should include key medical characteristics");
                }
            }
            RequiredField::EvaluationSummary => {
                if !SUMMARY_KEYWORDS.iter().any(|k| lower.contains(k)) {
                    issues.push("Evaluation summary should include development and validation details");
                }
            }
            RequiredField::HumanReadableAlgorithm => {
                if !text.starts_with("###") {
                    issues.push("Algorithm should start with section headers");
                }
                if !ALGORITHM_SECTIONS.iter().all(|s| text.contains(s)) {
                    issues.push("Algorithm should include all required sections");
                }
            }
            _ => {}
        }

        issues
    }

    fn check_concept_sets(&self, value: &Value, report: &mut FieldReport) {
        let Some(sets) = value.as_array() else {
            report.errors.push(FieldIssue::WrongType { expected: "a list" });
            return;
        };

        for (index, set) in sets.iter().enumerate() {
            let Some(set) = set.as_object() else {
                report.errors.push(FieldIssue::ConceptSetNotObject { index });
                continue;
            };

            for key in ["id", "name", "expression"] {
                if !set.contains_key(key) {
                    report.errors.push(FieldIssue::ConceptSetMissingKey { index, key });
                }
            }

            if let Some(expression) = set.get("expression") {
                if let Some(reason) = expression_problem(expression) {
                    report.errors.push(FieldIssue::ExpressionMalformed { index, reason });
                }
            }

            if let Some(resolved) = set.get("resolvedConcepts") {
                if !resolved.is_array() {
                    report.errors.push(FieldIssue::ResolvedConceptsNotList { index });
                }
            }
        }
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

fn expression_problem(expression: &Value) -> Option<&'static str> {
    let Some(expression) = expression.as_object() else {
        return Some("is not an object");
    };
    match expression.get("items") {
        None => Some("missing 'items'"),
        Some(items) if !items.is_array() => Some("items is not a list"),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_record() -> Value {
        json!({
            "id": 42,
            "name": "Earliest event of Crohn's disease",
            "clinical_description": "Crohn's disease is characterized by transmural inflammation located in the ileum.",
            "evaluation_summary": "This cohort was developed and validated with PheValuator.",
            "human_readable_algorithm": "### Cohort Entry Events\nx\n### Cohort Exit\ny\n### Cohort Eras\nz",
            "concept_sets": [
                {"id": 0, "name": "Crohn's", "expression": {"items": []}}
            ]
        })
    }

    #[test]
    fn test_valid_record() {
        let validator = FieldValidator::default_config();
        let report = validator.validate(&create_test_record(), "42");

        assert!(!report.is_critically_invalid());
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 0);
        assert_eq!(report.fields.len(), 6);
    }

    #[test]
    fn test_missing_id_is_critical() {
        let validator = FieldValidator::default_config();
        let mut record = create_test_record();
        record.as_object_mut().unwrap().remove("id");

        let report = validator.validate(&record, "Unknown");

        assert!(report.is_critically_invalid());
        assert_eq!(report.critical_fields(), vec![RequiredField::Id]);
        assert_eq!(report.field(RequiredField::Id).unwrap().errors, vec![FieldIssue::Missing]);
    }

    #[test]
    fn test_non_numeric_id() {
        let validator = FieldValidator::default_config();
        for id in [json!("abc"), json!(-3), json!(1.5)] {
            let mut record = create_test_record();
            record["id"] = id;
            let report = validator.validate(&record, "x");
            assert_eq!(report.field(RequiredField::Id).unwrap().errors, vec![FieldIssue::NotNumeric]);
        }
    }

    #[test]
    fn test_string_id_accepted() {
        let validator = FieldValidator::default_config();
        let mut record = create_test_record();
        record["id"] = json!("42");
        assert!(!validator.validate(&record, "42").blocks(RequiredField::Id));
    }

    #[test]
    fn test_id_wrong_type() {
        let validator = FieldValidator::default_config();
        let mut record = create_test_record();
        record["id"] = json!(true);
        let report = validator.validate(&record, "x");
        assert!(matches!(
            report.field(RequiredField::Id).unwrap().errors[0],
            FieldIssue::WrongType { .. }
        ));
    }

    #[test]
    fn test_empty_values() {
        let validator = FieldValidator::default_config();
        let mut record = create_test_record();
        record["name"] = json!("   ");
        record["clinical_description"] = Value::Null;
        record["concept_sets"] = json!([]);

        let report = validator.validate(&record, "42");

        assert!(report.is_critically_invalid());
        for field in [
            RequiredField::Name,
            RequiredField::ClinicalDescription,
            RequiredField::ConceptSets,
        ] {
            assert_eq!(report.field(field).unwrap().errors, vec![FieldIssue::Empty]);
        }
    }

    #[test]
    fn test_short_name_is_warning() {
        let validator = FieldValidator::new(ValidationConfig::permissive());
        let mut record = create_test_record();
        record["name"] = json!("X");

        let report = FieldValidator::default_config().validate(&record, "42");
        let name = report.field(RequiredField::Name).unwrap();
        assert!(name.is_valid());
        assert!(name.warnings.contains(&FieldIssue::TooShort { len: 1, min: 3 }));

        let permissive = validator.validate(&record, "42");
        assert!(permissive.field(RequiredField::Name).unwrap().is_clean());
    }

    #[test]
    fn test_long_name_is_error() {
        let validator = FieldValidator::default_config();
        let mut record = create_test_record();
        record["name"] = json!(format!("Cohort of {}", "a".repeat(600)));

        let report = validator.validate(&record, "42");
        assert!(report.is_critically_invalid());
        assert!(matches!(
            report.field(RequiredField::Name).unwrap().errors[0],
            FieldIssue::TooLong { max: 512, .. }
        ));
    }

    #[test]
    fn test_text_field_must_be_string() {
        let validator = FieldValidator::default_config();
        let mut record = create_test_record();
        record["evaluation_summary"] = json!(17);

        let report = validator.validate(&record, "42");
        assert!(report.blocks(RequiredField::EvaluationSummary));
        assert!(!report.is_critically_invalid());
    }

    #[test]
    fn test_concept_set_structure() {
        let validator = FieldValidator::default_config();
        let mut record = create_test_record();
        record["concept_sets"] = json!([
            "not an object",
            {"id": 1, "expression": []},
            {"id": 2, "name": "b", "expression": {"items": {}}, "resolvedConcepts": {}},
            {"id": 3, "name": "c", "expression": {}}
        ]);

        let report = validator.validate(&record, "42");
        let errors = &report.field(RequiredField::ConceptSets).unwrap().errors;

        assert_eq!(
            errors,
            &vec![
                FieldIssue::ConceptSetNotObject { index: 0 },
                FieldIssue::ConceptSetMissingKey { index: 1, key: "name" },
                FieldIssue::ExpressionMalformed { index: 1, reason: "is not an object" },
                FieldIssue::ExpressionMalformed { index: 2, reason: "items is not a list" },
                FieldIssue::ResolvedConceptsNotList { index: 2 },
                FieldIssue::ExpressionMalformed { index: 3, reason: "missing 'items'" },
            ]
        );
        assert!(!report.is_critically_invalid());
    }

    #[test]
    fn test_perspective_warnings() {
        let validator = FieldValidator::default_config();
        let mut record = create_test_record();
        record["name"] = json!("Crohn's disease");
        record["clinical_description"] = json!("Short.");
        record["evaluation_summary"] = json!("Nothing to see here.");
        record["human_readable_algorithm"] = json!("Entry only");

        let report = validator.validate(&record, "42");

        assert_eq!(report.error_count(), 0);
        assert_eq!(report.field(RequiredField::Name).unwrap().warnings.len(), 1);
        assert_eq!(report.field(RequiredField::ClinicalDescription).unwrap().warnings.len(), 2);
        assert_eq!(report.field(RequiredField::EvaluationSummary).unwrap().warnings.len(), 1);
        assert_eq!(report.field(RequiredField::HumanReadableAlgorithm).unwrap().warnings.len(), 2);
    }

    #[test]
    fn test_perspectives_disabled() {
        let config = ValidationConfig {
            check_perspectives: false,
            ..Default::default()
        };
        let validator = FieldValidator::new(config);
        let mut record = create_test_record();
        record["clinical_description"] = json!("Short.");

        let report = validator.validate(&record, "42");
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_non_object_record() {
        let validator = FieldValidator::default_config();
        let report = validator.validate(&json!([1, 2]), "Unknown");

        assert_eq!(report.error_count(), 6);
        assert!(report.fields.iter().all(|r| r.errors == vec![FieldIssue::Missing]));
    }

    #[test]
    fn test_issue_display() {
        assert_eq!(
            FieldIssue::ConceptSetMissingKey { index: 2, key: "id" }.to_string(),
            "concept set 2 missing 'id'"
        );
        assert_eq!(FieldIssue::Missing.to_string(), "required field is missing");
    }
}
