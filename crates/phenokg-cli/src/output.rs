//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use phenokg_batch::BatchReport;
use phenokg_extractor::CohortOutput;
use phenokg_gatekeeper::{FieldReport, ValidationReport};
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the result of converting one record.
    ///
    /// `written` is the output file, `None` when the document went to stdout.
    pub fn format_conversion(&self, output: &CohortOutput, written: Option<&Path>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "cohort_id": output.cohort_id.as_str(),
                    "output": written.map(|p| p.display().to_string()),
                    "triples": output.document.triple_count,
                    "duplicates_dropped": output.document.duplicates_dropped,
                    "sections": output.sections.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
                    "warnings": output.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
                    "validation_warnings": output.report.warning_count(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(written
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            OutputFormat::Table => {
                let sections: Vec<&str> = output.sections.iter().map(|s| s.as_str()).collect();
                let mut builder = Builder::default();
                builder.push_record(["Cohort", "Triples", "Duplicates", "Sections", "Warnings"]);
                builder.push_record([
                    output.cohort_id.to_string(),
                    output.document.triple_count.to_string(),
                    output.document.duplicates_dropped.to_string(),
                    sections.join(", "),
                    (output.warnings.len() + output.report.warning_count()).to_string(),
                ]);

                let mut lines = vec![self.table(builder)];
                for warning in &output.warnings {
                    lines.push(self.warning(&warning.to_string()));
                }
                if let Some(path) = written {
                    lines.push(self.success(&format!(
                        "Cohort {} written to {}",
                        output.cohort_id,
                        path.display()
                    )));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a required-field report.
    pub fn format_validation(&self, report: &ValidationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let fields: Vec<serde_json::Value> = report
                    .fields
                    .iter()
                    .map(|f| {
                        serde_json::json!({
                            "field": f.field.as_str(),
                            "critical": f.field.is_critical(),
                            "valid": f.is_valid(),
                            "errors": f.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
                            "warnings": f.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                let value = serde_json::json!({
                    "cohort_id": report.cohort_id,
                    "critically_invalid": report.is_critically_invalid(),
                    "errors": report.error_count(),
                    "warnings": report.warning_count(),
                    "fields": fields,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(report
                .critical_fields()
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Status", "Issues"]);
                for field in &report.fields {
                    builder.push_record([field.field.as_str().to_string(), self.status(field), issues(field)]);
                }

                let summary = format!(
                    "Cohort {}: {} error(s), {} warning(s)",
                    report.cohort_id,
                    report.error_count(),
                    report.warning_count()
                );
                let verdict = if report.is_critically_invalid() {
                    self.error(&summary)
                } else if report.error_count() > 0 {
                    self.warning(&summary)
                } else {
                    self.success(&summary)
                };
                Ok(format!("{}\n{}", self.table(builder), verdict))
            }
        }
    }

    /// Format the result of a batch run.
    pub fn format_batch(&self, report: &BatchReport) -> Result<String> {
        let metrics = &report.metrics;
        match self.format {
            OutputFormat::Json => {
                let sections: serde_json::Map<String, serde_json::Value> = metrics
                    .section_failures
                    .iter()
                    .map(|(section, count)| (section.as_str().to_string(), serde_json::json!(count)))
                    .collect();
                let files: Vec<serde_json::Value> = report
                    .files
                    .iter()
                    .map(|f| {
                        serde_json::json!({
                            "input": f.input.display().to_string(),
                            "output": f.output.as_ref().map(|p| p.display().to_string()),
                            "error": f.error,
                        })
                    })
                    .collect();
                let value = serde_json::json!({
                    "total_files": metrics.total_files,
                    "successful": metrics.successful,
                    "failed": metrics.failed,
                    "critical_failures": metrics.critical_failures,
                    "parse_failures": metrics.parse_failures,
                    "section_failures": sections,
                    "io_failures": metrics.io_failures,
                    "other_failures": metrics.other_failures,
                    "panics": metrics.panics,
                    "total_triples": metrics.total_triples,
                    "total_warnings": metrics.total_warnings,
                    "elapsed_ms": metrics.elapsed_ms,
                    "files": files,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(report
                .files
                .iter()
                .filter_map(|f| f.output.as_ref())
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Files", "Converted", "Failed", "Triples", "Warnings", "Runtime"]);
                builder.push_record([
                    metrics.total_files.to_string(),
                    metrics.successful.to_string(),
                    metrics.failed.to_string(),
                    metrics.total_triples.to_string(),
                    metrics.total_warnings.to_string(),
                    format!("{}ms", metrics.elapsed_ms),
                ]);

                let mut lines = vec![self.table(builder)];
                for file in &report.files {
                    if let Some(error) = &file.error {
                        lines.push(self.error(&format!("{}: {}", file.input.display(), error)));
                    }
                }
                if metrics.panics > 0 {
                    lines.push(self.error(&format!("{} worker(s) panicked", metrics.panics)));
                }
                let summary = format!("Converted {} of {} file(s)", metrics.successful, metrics.total_files);
                if metrics.all_succeeded() {
                    lines.push(self.success(&summary));
                } else {
                    lines.push(self.warning(&summary));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn status(&self, field: &FieldReport) -> String {
        if !field.is_valid() && field.field.is_critical() {
            self.colorize("critical", "red")
        } else if !field.is_valid() {
            self.colorize("invalid", "yellow")
        } else if !field.is_clean() {
            self.colorize("warning", "cyan")
        } else {
            self.colorize("ok", "green")
        }
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn issues(field: &FieldReport) -> String {
    field
        .errors
        .iter()
        .chain(&field.warnings)
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
