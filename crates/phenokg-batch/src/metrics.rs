//! Counters for batch runs

use phenokg_extractor::{CohortOutput, ExtractorError, Section};
use std::collections::BTreeMap;

/// Metrics collected during a batch run
///
/// Every file lands in exactly one of `successful` and `failed`; failures
/// are further broken down by class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchMetrics {
    /// Files scheduled
    pub total_files: usize,

    /// Files converted and written
    pub successful: usize,

    /// Files that produced no output
    pub failed: usize,

    /// Records rejected for missing or invalid `id`/`name`
    pub critical_failures: usize,

    /// Files that were not valid JSON or not UTF-8
    pub parse_failures: usize,

    /// Section failures, per section
    pub section_failures: BTreeMap<Section, usize>,

    /// Read or write failures
    pub io_failures: usize,

    /// Failures of any other kind
    pub other_failures: usize,

    /// Workers that panicked
    pub panics: usize,

    /// Triples written across all outputs
    pub total_triples: usize,

    /// Soft warnings raised across all outputs
    pub total_warnings: usize,

    /// Wall-clock runtime in milliseconds
    pub elapsed_ms: u64,
}

impl BatchMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one file
    pub fn record(&mut self, outcome: &Result<CohortOutput, ExtractorError>) {
        match outcome {
            Ok(output) => {
                self.successful += 1;
                self.total_triples += output.document.triple_count;
                self.total_warnings += output.warnings.len();
            }
            Err(e) => self.record_failure(e),
        }
    }

    /// Record a failed file
    pub fn record_failure(&mut self, error: &ExtractorError) {
        self.failed += 1;
        if error.is_critical() {
            self.critical_failures += 1;
        } else if error.is_parse_failure() {
            self.parse_failures += 1;
        } else if let Some(section) = error.section() {
            *self.section_failures.entry(section).or_insert(0) += 1;
        } else if matches!(error, ExtractorError::Io(_)) {
            self.io_failures += 1;
        } else {
            self.other_failures += 1;
        }
    }

    /// Record a worker that panicked
    pub fn record_panic(&mut self) {
        self.failed += 1;
        self.panics += 1;
    }

    /// Total section failures
    pub fn total_section_failures(&self) -> usize {
        self.section_failures.values().sum()
    }

    /// Whether every scheduled file converted
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Batch Summary".to_string(),
            "=============".to_string(),
            format!("Files: {}", self.total_files),
            format!("Converted: {}", self.successful),
            format!("Failed: {}", self.failed),
            format!("Triples written: {}", self.total_triples),
            format!("Warnings: {}", self.total_warnings),
            format!("Runtime: {}ms", self.elapsed_ms),
        ];

        if self.failed > 0 {
            lines.push(String::new());
            lines.push("Failures:".to_string());
            lines.push(format!("  Critical validation: {}", self.critical_failures));
            lines.push(format!("  Malformed input: {}", self.parse_failures));
            for (section, count) in &self.section_failures {
                lines.push(format!("  Section {}: {}", section, count));
            }
            lines.push(format!("  I/O: {}", self.io_failures));
            if self.other_failures > 0 {
                lines.push(format!("  Other: {}", self.other_failures));
            }
            if self.panics > 0 {
                lines.push(format!("  Panicked: {}", self.panics));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = BatchMetrics::new();
        assert_eq!(metrics.successful, 0);
        assert_eq!(metrics.failed, 0);
        assert!(metrics.all_succeeded());
    }

    #[test]
    fn test_failure_classes() {
        let mut metrics = BatchMetrics::new();
        metrics.record_failure(&ExtractorError::FieldValidation {
            cohort_id: "Unknown".to_string(),
            fields: vec!["id".to_string()],
        });
        metrics.record_failure(&ExtractorError::InvalidJson("eof".to_string()));
        metrics.record_failure(&ExtractorError::ConceptSet {
            cohort_id: "1".to_string(),
            message: "bad".to_string(),
        });
        metrics.record_failure(&ExtractorError::TextProcessing {
            cohort_id: "1".to_string(),
            section: Section::Algorithm,
            message: "too long".to_string(),
        });
        metrics.record_failure(&ExtractorError::Io(std::io::Error::other("disk full")));
        metrics.record_panic();

        assert_eq!(metrics.failed, 6);
        assert_eq!(metrics.critical_failures, 1);
        assert_eq!(metrics.parse_failures, 1);
        assert_eq!(metrics.section_failures.get(&Section::ConceptSets), Some(&1));
        assert_eq!(metrics.section_failures.get(&Section::Algorithm), Some(&1));
        assert_eq!(metrics.total_section_failures(), 2);
        assert_eq!(metrics.io_failures, 1);
        assert_eq!(metrics.panics, 1);
        assert!(!metrics.all_succeeded());
    }

    #[test]
    fn test_summary_lists_failures() {
        let mut metrics = BatchMetrics::new();
        metrics.total_files = 2;
        metrics.successful = 1;
        metrics.record_failure(&ExtractorError::Encoding("bad byte".to_string()));

        let summary = metrics.summary();
        assert!(summary.contains("Files: 2"));
        assert!(summary.contains("Malformed input: 1"));
        assert!(!summary.contains("Panicked"));
    }
}
