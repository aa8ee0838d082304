//! Value types of the cohort model

use crate::triple::Term;
use std::fmt;

/// Identifier of a cohort record
///
/// Always a non-empty string of ASCII digits; JSON integers are converted
/// to their decimal form before construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CohortId(String);

impl CohortId {
    /// Create a cohort id, rejecting anything that is not all digits
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let id = id.trim().to_string();
        if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
            Some(Self(id))
        } else {
            None
        }
    }

    /// The id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Scope token used for per-cohort node names, e.g. `Cohort42`
    pub fn scope(&self) -> String {
        format!("Cohort{}", self.0)
    }

    /// The cohort node, `:Cohort{id}`
    pub fn term(&self) -> Term {
        Term::local(&self.scope())
    }
}

impl fmt::Display for CohortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CohortId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or_else(|| format!("Invalid cohort id: {}", s))
    }
}

/// Temporal qualifier recognized in cohort titles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalConstraint {
    /// "Earliest event"
    EarliestEvent,

    /// "First occurrence"
    FirstOccurrence,

    /// "Latest event"
    LatestEvent,

    /// "Initial diagnosis"
    InitialDiagnosis,
}

impl TemporalConstraint {
    /// All constraints, in matching order
    pub const ALL: [TemporalConstraint; 4] = [
        TemporalConstraint::EarliestEvent,
        TemporalConstraint::FirstOccurrence,
        TemporalConstraint::LatestEvent,
        TemporalConstraint::InitialDiagnosis,
    ];

    /// Canonical phrase, used as the label
    pub fn label(&self) -> &'static str {
        match self {
            TemporalConstraint::EarliestEvent => "Earliest event",
            TemporalConstraint::FirstOccurrence => "First occurrence",
            TemporalConstraint::LatestEvent => "Latest event",
            TemporalConstraint::InitialDiagnosis => "Initial diagnosis",
        }
    }

    /// CamelCase token used in the node name
    pub fn token(&self) -> &'static str {
        match self {
            TemporalConstraint::EarliestEvent => "EarliestEvent",
            TemporalConstraint::FirstOccurrence => "FirstOccurrence",
            TemporalConstraint::LatestEvent => "LatestEvent",
            TemporalConstraint::InitialDiagnosis => "InitialDiagnosis",
        }
    }

    /// The constraint node, e.g. `:Temporal_EarliestEvent`
    pub fn term(&self) -> Term {
        Term::local(&format!("Temporal_{}", self.token()))
    }

    /// Parse a phrase, ignoring case
    pub fn parse(phrase: &str) -> Option<Self> {
        let phrase = phrase.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(phrase))
    }
}

/// Flags carried by a concept set expression item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InclusionFlags {
    /// The concept (and its descendants) is excluded from the cohort
    pub is_excluded: bool,

    /// Descendant concepts in the hierarchy are included
    pub include_descendants: bool,

    /// Mapped concepts from other vocabularies are included
    pub include_mapped: bool,
}

impl InclusionFlags {
    /// Human-readable comments describing the flags
    pub fn comments(&self) -> Vec<&'static str> {
        let mut comments = Vec::with_capacity(3);
        if self.is_excluded {
            comments.push("Excludes concept and its descendants from the cohort");
        } else {
            comments.push("Includes concept in the cohort");
        }
        if self.include_descendants {
            comments.push("Includes all descendant concepts in the hierarchy");
        }
        if self.include_mapped {
            comments.push("Includes mapped concepts from other vocabularies");
        }
        comments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cohort_id_accepts_digits() {
        let id = CohortId::new("42").unwrap();
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.term().to_string(), ":Cohort42");
        assert_eq!(id.scope(), "Cohort42");
    }

    #[test]
    fn test_cohort_id_rejects_non_digits() {
        assert!(CohortId::new("").is_none());
        assert!(CohortId::new("4a").is_none());
        assert!(CohortId::new("-1").is_none());
        assert!("x".parse::<CohortId>().is_err());
    }

    #[test]
    fn test_cohort_id_trims() {
        assert_eq!(CohortId::new(" 7 ").unwrap().as_str(), "7");
    }

    #[test]
    fn test_temporal_parse_ignores_case() {
        assert_eq!(
            TemporalConstraint::parse("EARLIEST EVENT"),
            Some(TemporalConstraint::EarliestEvent)
        );
        assert_eq!(
            TemporalConstraint::parse("initial diagnosis"),
            Some(TemporalConstraint::InitialDiagnosis)
        );
        assert_eq!(TemporalConstraint::parse("last event"), None);
    }

    #[test]
    fn test_temporal_term() {
        assert_eq!(
            TemporalConstraint::FirstOccurrence.term().to_string(),
            ":Temporal_FirstOccurrence"
        );
    }

    #[test]
    fn test_inclusion_comments() {
        let flags = InclusionFlags {
            is_excluded: true,
            include_descendants: true,
            include_mapped: false,
        };
        assert_eq!(
            flags.comments(),
            vec![
                "Excludes concept and its descendants from the cohort",
                "Includes all descendant concepts in the hierarchy",
            ]
        );
        assert_eq!(InclusionFlags::default().comments(), vec!["Includes concept in the cohort"]);
    }
}
