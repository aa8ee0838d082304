//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use phenokg_extractor::parser::{cohort_hint, parse_record};
use phenokg_gatekeeper::{FieldValidator, ValidationConfig, ValidationReport};
use std::path::Path;
use tracing::warn;

/// Execute the validate command.
///
/// Prints the required-field report. A critically invalid record is
/// returned as an error so the process exits non-zero.
pub async fn execute_validate(args: ValidateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let validation = if args.strict {
        ValidationConfig::strict()
    } else if args.permissive {
        ValidationConfig::permissive()
    } else {
        config.validation.clone()
    };

    let report = validate_file(&args.input, validation)?;
    let rendered = formatter.format_validation(&report)?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }

    if report.is_critically_invalid() {
        let fields: Vec<&str> = report.critical_fields().iter().map(|f| f.as_str()).collect();
        return Err(CliError::CriticalValidation(format!(
            "Critical validation errors in cohort {}: {}",
            report.cohort_id,
            fields.join(", ")
        )));
    }
    Ok(())
}

/// Validate the record in a file
pub fn validate_file(path: &Path, validation: ValidationConfig) -> Result<ValidationReport> {
    if !path.is_file() {
        return Err(CliError::NotFound(path.to_path_buf()));
    }
    validation
        .validate()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let record = parse_record(&std::fs::read(path)?)?;
    let cohort_id = cohort_hint(&record);
    let report = FieldValidator::new(validation).validate(&record, &cohort_id);

    for field in &report.fields {
        for issue in &field.warnings {
            warn!(cohort_id = %cohort_id, field = %field.field, "{}", issue);
        }
    }
    Ok(report)
}
