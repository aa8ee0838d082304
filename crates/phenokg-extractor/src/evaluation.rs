//! Development and validation facts from the evaluation summary

use phenokg_domain::terms::prop;
use phenokg_domain::{Agent, CohortId, ProvenanceActivity, Term, Triple};
use regex::Regex;
use std::sync::LazyLock;

static DEVELOPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdeveloped\b").expect("Invalid regex"));
static COHORT_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\w+) cohort").expect("Invalid regex"));
static CONCEPT_SET_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)concept set of ([0-9]+) concepts").expect("Invalid regex"));
static DATABASE_COVERAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)from all ([0-9]+) databases").expect("Invalid regex"));
static VALIDATION_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)-([0-9]+) day").expect("Invalid regex"));

/// Findings of the evaluation-summary section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationFindings {
    /// Cohort id
    pub cohort: CohortId,

    /// Full summary text, when full-text literals are enabled
    pub summary: Option<String>,

    /// Word before "cohort" in a summary that says the cohort was developed
    pub cohort_type: Option<String>,

    /// Size of the concept set
    pub concept_set_size: Option<u64>,

    /// Number of databases the cohort was run on
    pub database_coverage: Option<u64>,

    /// Validation window in days, `(start, end)`
    pub validation_period: Option<(u64, u64)>,

    /// Summary mentions both specificity and sensitivity
    pub performance_metrics: bool,

    /// Summary mentions PheValuator (case-sensitive)
    pub phevaluator: bool,
}

/// Extract evaluation facts
///
/// Fails when a captured number does not fit in a `u64`.
pub fn extract(
    cohort: &CohortId,
    summary: &str,
    include_full_text: bool,
) -> Result<EvaluationFindings, String> {
    let cohort_type = if DEVELOPED.is_match(summary) {
        COHORT_TYPE
            .captures(summary)
            .map(|caps| caps[1].to_string())
    } else {
        None
    };

    let concept_set_size = capture_number(&CONCEPT_SET_SIZE, summary, 1)?;
    let database_coverage = capture_number(&DATABASE_COVERAGE, summary, 1)?;

    let validation_period = match VALIDATION_PERIOD.captures(summary) {
        Some(caps) => Some((parse_number(&caps[1])?, parse_number(&caps[2])?)),
        None => None,
    };

    let lower = summary.to_lowercase();

    Ok(EvaluationFindings {
        cohort: cohort.clone(),
        summary: include_full_text.then(|| summary.to_string()),
        cohort_type,
        concept_set_size,
        database_coverage,
        validation_period,
        performance_metrics: lower.contains("specificity") && lower.contains("sensitivity"),
        phevaluator: summary.contains("PheValuator"),
    })
}

fn capture_number(pattern: &Regex, text: &str, group: usize) -> Result<Option<u64>, String> {
    match pattern.captures(text).and_then(|caps| caps.get(group)) {
        Some(m) => parse_number(m.as_str()).map(Some),
        None => Ok(None),
    }
}

fn parse_number(digits: &str) -> Result<u64, String> {
    digits
        .parse::<u64>()
        .map_err(|e| format!("Number '{}' out of range: {}", digits, e))
}

fn activity(kind: &str, cohort: &CohortId, label: &str) -> ProvenanceActivity {
    ProvenanceActivity::new(kind, &cohort.scope(), label)
}

impl EvaluationFindings {
    /// Render as triples
    pub fn triples(&self) -> Vec<Triple> {
        let cohort_id = &self.cohort;
        let cohort = cohort_id.term();
        let mut triples = Vec::new();

        if let Some(summary) = &self.summary {
            triples.push(Triple::new(cohort.clone(), prop::HAS_EVALUATION_SUMMARY, Term::text(summary.clone())));
        }

        let validation = activity("ValidationActivity", cohort_id, "Cohort Validation Activity");
        triples.extend(validation.declare());
        triples.push(validation.generated(&cohort));

        if let Some(cohort_type) = &self.cohort_type {
            triples.push(Triple::new(cohort.clone(), prop::HAS_COHORT_TYPE, Term::text(cohort_type.clone())));
            let development = activity("DevelopmentActivity", cohort_id, "Cohort Development Activity");
            triples.extend(development.declare());
            triples.push(development.generated(&cohort));
        }

        if let Some(size) = self.concept_set_size {
            triples.push(Triple::new(cohort.clone(), prop::HAS_CONCEPT_SET_SIZE, Term::integer(size)));
        }

        if let Some(databases) = self.database_coverage {
            triples.push(Triple::new(cohort.clone(), prop::HAS_DATABASE_COVERAGE, Term::integer(databases)));
            let database = activity("DatabaseActivity", cohort_id, "Database Coverage Activity");
            triples.extend(database.declare());
            triples.push(database.generated(&cohort));
        }

        if let Some((start, end)) = self.validation_period {
            triples.push(Triple::new(cohort.clone(), prop::HAS_VALIDATION_PERIOD_START, Term::integer(start)));
            triples.push(Triple::new(cohort.clone(), prop::HAS_VALIDATION_PERIOD_END, Term::integer(end)));
        }

        if self.performance_metrics {
            triples.push(Triple::new(
                cohort.clone(),
                prop::HAS_PERFORMANCE_METRICS,
                Term::local("SpecificityAndSensitivity"),
            ));
            let performance = activity("PerformanceActivity", cohort_id, "Performance Evaluation Activity");
            triples.extend(performance.declare());
            triples.push(performance.generated(&cohort));
        }

        if self.phevaluator {
            triples.push(Triple::new(cohort, prop::VALIDATED_BY, Term::local("PheValuator")));
            triples.extend(Agent::PHEVALUATOR.declare());
            triples.push(validation.associated_with(&Agent::PHEVALUATOR));
        }

        triples
    }
}
