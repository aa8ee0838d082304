//! Disease and temporal constraint from the cohort title

use crate::clinical::ClinicalFinding;
use phenokg_domain::terms::{class, prop, RDFS_LABEL, RDF_TYPE, TIME_TEMPORAL_ENTITY};
use phenokg_domain::{CohortId, TemporalConstraint, Term, Triple};
use regex::Regex;
use std::sync::LazyLock;

// The first whole-word "of" splits; everything after it names the disease
static DISEASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bof\s+(.+)").expect("Invalid regex"));

static TEMPORAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(earliest\s+event|first\s+occurrence|latest\s+event|initial\s+diagnosis)")
        .expect("Invalid regex")
});

/// A disease named by a cohort title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disease {
    /// Phrase as written in the title, trimmed
    pub phrase: String,
}

impl Disease {
    /// The disease node, `:Disease_{phrase}` with spaces as `_`
    pub fn term(&self) -> Term {
        Term::local(&format!("Disease_{}", self.phrase.replace(' ', "_")))
    }
}

/// Findings of the title section
#[derive(Debug, Clone, PartialEq)]
pub struct TitleFindings {
    /// Cohort id
    pub cohort: CohortId,

    /// Disease, if the title has an "of <condition>" clause
    pub disease: Option<Disease>,

    /// Temporal qualifier, if one of the fixed phrases occurs
    pub temporal: Option<TemporalConstraint>,

    /// Characteristics of the disease from the clinical description
    pub clinical: Vec<ClinicalFinding>,
}

/// Split a title into disease and temporal constraint
///
/// Either, both or neither may be found.
///
/// ```
/// use phenokg_domain::TemporalConstraint;
/// use phenokg_extractor::title::parse_title;
///
/// let (disease, temporal) = parse_title("Earliest event of Crohn's disease");
/// assert_eq!(disease.as_deref(), Some("Crohn's disease"));
/// assert_eq!(temporal, Some(TemporalConstraint::EarliestEvent));
/// ```
pub fn parse_title(title: &str) -> (Option<String>, Option<TemporalConstraint>) {
    let disease = DISEASE
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|phrase| !phrase.is_empty());

    let temporal = TEMPORAL.find(title).and_then(|m| {
        let phrase = m.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
        TemporalConstraint::parse(&phrase)
    });

    (disease, temporal)
}

/// Build the title findings
pub fn extract(cohort: &CohortId, title: &str) -> TitleFindings {
    let (disease, temporal) = parse_title(title);
    TitleFindings {
        cohort: cohort.clone(),
        disease: disease.map(|phrase| Disease { phrase }),
        temporal,
        clinical: Vec::new(),
    }
}

impl TitleFindings {
    /// Render as triples: disease, its clinical characteristics, then the
    /// temporal constraint
    pub fn triples(&self) -> Vec<Triple> {
        let cohort = self.cohort.term();
        let mut triples = Vec::new();

        if let Some(disease) = &self.disease {
            let node = disease.term();
            triples.push(Triple::new(node.clone(), RDF_TYPE, Term::name(class::DISEASE)));
            triples.push(Triple::new(node.clone(), RDFS_LABEL, Term::text(disease.phrase.clone())));
            triples.push(Triple::new(cohort.clone(), prop::HAS_DISEASE, node.clone()));

            for finding in &self.clinical {
                triples.push(finding.triple(&node));
            }
        }

        if let Some(temporal) = &self.temporal {
            let node = temporal.term();
            triples.push(Triple::new(node.clone(), RDF_TYPE, Term::name(TIME_TEMPORAL_ENTITY)));
            triples.push(Triple::new(node.clone(), RDFS_LABEL, Term::text(temporal.label())));
            triples.push(Triple::new(cohort, prop::HAS_TEMPORAL_CONSTRAINT, node));
        }

        triples
    }
}
