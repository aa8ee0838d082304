//! Section and result types for extraction

use crate::algorithm::AlgorithmFindings;
use crate::concept_sets::ConceptSetFindings;
use crate::evaluation::EvaluationFindings;
use crate::metadata::MetadataFindings;
use crate::title::TitleFindings;
use phenokg_domain::{CohortId, Triple};
use phenokg_gatekeeper::ValidationReport;
use std::fmt;

/// Parts of a cohort record that are converted independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    /// Cohort identity, label and source
    Metadata,
    /// `evaluation_summary`
    EvaluationSummary,
    /// `human_readable_algorithm`
    Algorithm,
    /// `concept_sets`
    ConceptSets,
    /// Disease and temporal constraint from the title
    Title,
    /// `clinical_description`, attached to the title's disease
    ClinicalDescription,
}

impl Section {
    /// Section name used in logs and errors
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Metadata => "metadata",
            Section::EvaluationSummary => "evaluation_summary",
            Section::Algorithm => "human_readable_algorithm",
            Section::ConceptSets => "concept_sets",
            Section::Title => "title",
            Section::ClinicalDescription => "clinical_description",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed findings of one section
///
/// The assembler renders extractions in [`Extraction::section`] order, so
/// the output layout does not depend on the order sections ran in.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Cohort identity and Atlas provenance
    Metadata(MetadataFindings),
    /// Development and validation facts
    Evaluation(EvaluationFindings),
    /// Entry, exit and era definitions
    Algorithm(AlgorithmFindings),
    /// Concept sets, concepts and inclusion rules
    ConceptSets(ConceptSetFindings),
    /// Disease, clinical characteristics and temporal constraint
    Title(TitleFindings),
}

impl Extraction {
    /// The section these findings came from
    pub fn section(&self) -> Section {
        match self {
            Extraction::Metadata(_) => Section::Metadata,
            Extraction::Evaluation(_) => Section::EvaluationSummary,
            Extraction::Algorithm(_) => Section::Algorithm,
            Extraction::ConceptSets(_) => Section::ConceptSets,
            Extraction::Title(_) => Section::Title,
        }
    }

    /// Render the findings as triples
    pub fn triples(&self) -> Vec<Triple> {
        match self {
            Extraction::Metadata(f) => f.triples(),
            Extraction::Evaluation(f) => f.triples(),
            Extraction::Algorithm(f) => f.triples(),
            Extraction::ConceptSets(f) => f.triples(),
            Extraction::Title(f) => f.triples(),
        }
    }
}

/// A non-fatal problem found while extracting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftWarning {
    /// Section that raised it
    pub section: Section,

    /// Description
    pub message: String,
}

impl SoftWarning {
    pub(crate) fn new(section: Section, message: impl Into<String>) -> Self {
        Self {
            section,
            message: message.into(),
        }
    }
}

impl fmt::Display for SoftWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.section, self.message)
    }
}

/// An assembled Turtle document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Full document text, prefix block included
    pub turtle: String,

    /// Number of distinct triples written
    pub triple_count: usize,

    /// Number of duplicate triples dropped
    pub duplicates_dropped: usize,
}

/// Result of converting one cohort record
#[derive(Debug, Clone)]
pub struct CohortOutput {
    /// Cohort id
    pub cohort_id: CohortId,

    /// Assembled document
    pub document: Document,

    /// Required-field diagnostics
    pub report: ValidationReport,

    /// Soft warnings raised by extractors
    pub warnings: Vec<SoftWarning>,

    /// Sections that produced findings, in output order
    pub sections: Vec<Section>,
}
