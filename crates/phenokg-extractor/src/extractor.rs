//! Core Extractor implementation

use crate::algorithm;
use crate::assembler;
use crate::clinical::ClinicalRules;
use crate::concept_sets;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::evaluation;
use crate::metadata;
use crate::parser::{cohort_hint, field_text, parse_record};
use crate::title;
use crate::types::{CohortOutput, Extraction, Section};
use phenokg_domain::{ClassLookup, CohortId};
use phenokg_gatekeeper::{FieldValidator, RequiredField, ValidationConfig, ValidationReport};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};


/// Converts cohort records into Turtle documents
///
/// Holds only read-only state, so one instance can be shared across
/// threads behind an `Arc`.
pub struct Extractor<O: ClassLookup> {
    config: ExtractorConfig,
    validator: FieldValidator,
    rules: ClinicalRules,
    lookup: Arc<O>,
}

impl<O: ClassLookup> Extractor<O> {
    /// Create a new Extractor
    ///
    /// Fails when the configuration is invalid or a clinical rule does not
    /// compile.
    pub fn new(
        config: ExtractorConfig,
        validation: ValidationConfig,
        lookup: Arc<O>,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        validation
            .validate()
            .map_err(|e| ExtractorError::Config(e.to_string()))?;
        let rules = ClinicalRules::compile(&config.clinical_rules).map_err(ExtractorError::Config)?;

        debug!("Compiled {} clinical rules", rules.len());

        Ok(Self {
            config,
            validator: FieldValidator::new(validation),
            rules,
            lookup,
        })
    }

    /// The extractor configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Validate a record without converting it
    pub fn validate(&self, record: &Value) -> ValidationReport {
        self.validator.validate(record, &cohort_hint(record))
    }

    /// Convert raw JSON bytes
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<CohortOutput, ExtractorError> {
        let record = parse_record(bytes)?;
        self.extract_value(&record)
    }

    /// Convert a JSON string
    pub fn extract_str(&self, json: &str) -> Result<CohortOutput, ExtractorError> {
        self.extract_bytes(json.as_bytes())
    }

    /// Convert the record in a file
    pub fn extract_file(&self, path: &Path) -> Result<CohortOutput, ExtractorError> {
        let bytes = std::fs::read(path)?;
        self.extract_bytes(&bytes).inspect_err(|e| {
            error!(file = %path.display(), "Failed to convert: {}", e);
        })
    }

    /// Convert the record in `input` and write the document to `output`
    ///
    /// Nothing is written when conversion fails.
    pub fn extract_file_to(&self, input: &Path, output: &Path) -> Result<CohortOutput, ExtractorError> {
        let result = self.extract_file(input)?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output, &result.document.turtle)?;

        info!(
            file = %output.display(),
            "Wrote {} triples for cohort {}",
            result.document.triple_count,
            result.cohort_id
        );
        Ok(result)
    }

    /// Convert a decoded record
    ///
    /// Either every section converts and a document is produced, or the
    /// first section failure is returned and nothing is.
    pub fn extract_value(&self, record: &Value) -> Result<CohortOutput, ExtractorError> {
        let object = record
            .as_object()
            .ok_or_else(|| ExtractorError::InvalidJson("Expected a JSON object at the top level".to_string()))?;
        let hint = cohort_hint(record);

        info!(cohort_id = %hint, "Converting cohort");

        let report = self.validator.validate(record, &hint);
        log_report(&report);

        if report.is_critically_invalid() {
            let fields: Vec<String> = report
                .critical_fields()
                .iter()
                .map(|f| f.as_str().to_string())
                .collect();
            error!(cohort_id = %hint, "Critical validation errors in fields: {}", fields.join(", "));
            return Err(ExtractorError::FieldValidation { cohort_id: hint, fields });
        }

        let cohort = CohortId::new(hint.clone()).ok_or_else(|| ExtractorError::FieldValidation {
            cohort_id: hint.clone(),
            fields: vec![RequiredField::Id.as_str().to_string()],
        })?;
        let name = field_text(object, RequiredField::Name.as_str()).trim().to_string();

        let mut warnings = Vec::new();
        let mut outcomes = Outcomes::new(&cohort);

        outcomes.record(
            Section::Metadata,
            Ok(Extraction::Metadata(metadata::extract(
                &cohort,
                &name,
                object.get("edit_url"),
                &mut warnings,
            ))),
        );

        if !report.blocks(RequiredField::EvaluationSummary) {
            let outcome = self.text(&cohort, object, Section::EvaluationSummary).and_then(|text| {
                evaluation::extract(&cohort, &text, self.config.include_full_text)
                    .map_err(|message| text_error(&cohort, Section::EvaluationSummary, message))
            });
            outcomes.record(Section::EvaluationSummary, outcome.map(Extraction::Evaluation));
        }

        if !report.blocks(RequiredField::HumanReadableAlgorithm) {
            let outcome = self.text(&cohort, object, Section::Algorithm).and_then(|text| {
                algorithm::extract(&cohort, &text, self.config.include_full_text)
                    .map_err(|message| text_error(&cohort, Section::Algorithm, message))
            });
            outcomes.record(Section::Algorithm, outcome.map(Extraction::Algorithm));
        }

        if !report.blocks(RequiredField::ConceptSets) {
            let outcome = concept_sets::extract(
                &cohort,
                object.get(Section::ConceptSets.as_str()).unwrap_or(&Value::Null),
                &mut warnings,
            );
            outcomes.record(Section::ConceptSets, outcome.map(Extraction::ConceptSets));
        }

        let mut title = title::extract(&cohort, &name);
        if title.disease.is_some() && !report.blocks(RequiredField::ClinicalDescription) {
            match self.text(&cohort, object, Section::ClinicalDescription) {
                Ok(description) => {
                    title.clinical = self.rules.extract(&description, self.lookup.as_ref(), &mut warnings);
                    outcomes.sections.push(Section::ClinicalDescription);
                }
                Err(e) => outcomes.fail(Section::ClinicalDescription, e),
            }
        }
        outcomes.record(Section::Title, Ok(Extraction::Title(title)));

        for warning in &warnings {
            warn!(cohort_id = %cohort, section = %warning.section, "{}", warning.message);
        }

        let Outcomes {
            extractions,
            mut sections,
            failures,
            ..
        } = outcomes;

        if let Some(first) = failures.into_iter().next() {
            error!(cohort_id = %cohort, "Cohort not converted: {}", first);
            return Err(first);
        }

        let document = assembler::assemble(cohort.as_str(), &self.config.base_namespace, extractions);
        sections.sort();

        info!(
            cohort_id = %cohort,
            "Converted cohort: {} triples, {} warnings",
            document.triple_count,
            warnings.len()
        );

        Ok(CohortOutput {
            cohort_id: cohort,
            document,
            report,
            warnings,
            sections,
        })
    }

    // Text of a free-text section, bounded by max_field_length
    fn text(&self, cohort: &CohortId, object: &Map<String, Value>, section: Section) -> Result<String, ExtractorError> {
        let text = field_text(object, section.as_str());
        let len = text.chars().count();
        if len > self.config.max_field_length {
            return Err(text_error(
                cohort,
                section,
                format!("{} characters exceeds limit of {}", len, self.config.max_field_length),
            ));
        }
        Ok(text)
    }
}

/// Where the document for `input` is written inside `output_dir`
///
/// The file stem is kept and `suffix` (e.g. `.ttl`) appended.
pub fn output_path(input: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cohort".to_string());
    output_dir.join(format!("{}{}", stem, suffix))
}

fn text_error(cohort: &CohortId, section: Section, message: String) -> ExtractorError {
    ExtractorError::TextProcessing {
        cohort_id: cohort.to_string(),
        section,
        message,
    }
}

// Per-section results of one record
struct Outcomes<'a> {
    cohort: &'a CohortId,
    extractions: Vec<Extraction>,
    sections: Vec<Section>,
    failures: Vec<ExtractorError>,
}

impl<'a> Outcomes<'a> {
    fn new(cohort: &'a CohortId) -> Self {
        Self {
            cohort,
            extractions: Vec::new(),
            sections: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn record(&mut self, section: Section, outcome: Result<Extraction, ExtractorError>) {
        match outcome {
            Ok(extraction) => {
                debug!(cohort_id = %self.cohort, section = %section, "Section converted");
                self.extractions.push(extraction);
                self.sections.push(section);
            }
            Err(e) => self.fail(section, e),
        }
    }

    fn fail(&mut self, section: Section, e: ExtractorError) {
        error!(cohort_id = %self.cohort, section = %section, "{}", e);
        self.failures.push(e);
    }
}

fn log_report(report: &ValidationReport) {
    for field in &report.fields {
        for issue in &field.errors {
            error!(cohort_id = %report.cohort_id, field = field.field.as_str(), "{}", issue);
        }
        for issue in &field.warnings {
            warn!(cohort_id = %report.cohort_id, field = field.field.as_str(), "{}", issue);
        }
        if field.is_clean() {
            debug!(cohort_id = %report.cohort_id, field = field.field.as_str(), "Field valid");
        }
    }
}
