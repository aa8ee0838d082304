//! Concept sets, their concepts and per-set inclusion rules
//!
//! Concepts are identified by their vocabulary-prefixed code, so the same
//! concept appearing in two sets is one node with two independent rules.

use crate::error::ExtractorError;
use crate::parser::{field_flag, field_text, value_text};
use crate::types::{Section, SoftWarning};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use phenokg_domain::terms::{class, prop, RDFS_COMMENT, RDFS_LABEL, RDF_TYPE};
use phenokg_domain::{CohortId, InclusionFlags, ProvenanceActivity, Term, Triple, Vocabulary, XsdType};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A concept drawn from a standard vocabulary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Concept {
    /// OMOP concept id
    pub id: String,
    /// Source code in its vocabulary
    pub code: String,
    /// Concept name
    pub name: String,
    /// OMOP domain
    pub domain: String,
    /// Vocabulary id
    pub vocabulary: String,
    /// Concept class id
    pub class: String,
}

impl Concept {
    fn from_keys(object: &Map<String, Value>, keys: [&str; 6]) -> Self {
        let [id, code, name, domain, vocabulary, class] = keys;
        Self {
            id: field_text(object, id).trim().to_string(),
            code: field_text(object, code).trim().to_string(),
            name: field_text(object, name),
            domain: field_text(object, domain),
            vocabulary: field_text(object, vocabulary).trim().to_string(),
            class: field_text(object, class),
        }
    }

    fn has_identity(&self) -> bool {
        !self.id.is_empty() || !self.code.is_empty()
    }

    /// Local part of the concept node: the code, or the id when there is none
    pub fn local_code(&self) -> &str {
        if self.code.is_empty() {
            &self.id
        } else {
            &self.code
        }
    }

    /// Key used in rule names: the id, or the code when there is none
    pub fn rule_key(&self) -> &str {
        if self.id.is_empty() {
            &self.code
        } else {
            &self.id
        }
    }

    /// The concept node, minted under its vocabulary prefix
    pub fn term(&self) -> Term {
        Term::minted(Vocabulary::resolve(&self.vocabulary), self.local_code())
    }

    /// Type triple plus one triple per non-empty attribute
    pub fn triples(&self) -> Vec<Triple> {
        let node = self.term();
        let mut triples = vec![Triple::new(node.clone(), RDF_TYPE, Term::name(class::CONCEPT))];

        for (predicate, value) in [
            (RDFS_LABEL, &self.name),
            (prop::HAS_CONCEPT_CODE, &self.code),
            (prop::HAS_DOMAIN, &self.domain),
            (prop::HAS_VOCABULARY, &self.vocabulary),
            (prop::HAS_CONCEPT_CLASS, &self.class),
        ] {
            if !value.trim().is_empty() {
                triples.push(Triple::new(node.clone(), predicate, Term::text(value.clone())));
            }
        }
        triples
    }
}

/// One item of a concept set expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionItem {
    /// The concept the rule applies to
    pub concept: Concept,
    /// Inclusion flags
    pub flags: InclusionFlags,
}

/// A concept the expression resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConcept {
    /// The concept
    pub concept: Concept,
    /// Normalized start of validity
    pub valid_from: Option<String>,
    /// Normalized end of validity
    pub valid_to: Option<String>,
}

/// One concept set of a cohort
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptSetRecord {
    /// Set id as given in the record
    pub id: String,
    /// Set name
    pub name: String,
    /// Expression items
    pub items: Vec<ExpressionItem>,
    /// Resolved concepts
    pub resolved: Vec<ResolvedConcept>,
}

impl ConceptSetRecord {
    /// The set node
    pub fn term(&self) -> Term {
        Term::local(&format!("ConceptSet_{}", self.id))
    }

    fn rule_term(&self, concept: &Concept) -> Term {
        Term::local(&format!("ConceptRule_{}_{}", self.id, concept.rule_key()))
    }
}

/// Findings of the concept set section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptSetFindings {
    /// Cohort id
    pub cohort: CohortId,
    /// Concept sets in record order
    pub sets: Vec<ConceptSetRecord>,
}

/// Normalize a date or date-time to `YYYY-MM-DDTHH:MM:SSZ`
///
/// Accepts `YYYYMMDD`, epoch milliseconds, RFC 3339, ISO date-times without
/// an offset (taken as UTC) and ISO dates (taken as midnight UTC).
///
/// # Examples
///
/// ```
/// use phenokg_extractor::concept_sets::normalize_date;
///
/// assert_eq!(normalize_date("20020131").unwrap(), "2002-01-31T00:00:00Z");
/// assert_eq!(normalize_date("2002-01-31").unwrap(), "2002-01-31T00:00:00Z");
/// assert!(normalize_date("31/01/2002").is_err());
/// ```
pub fn normalize_date(raw: &str) -> Result<String, ExtractorError> {
    let raw = raw.trim();
    let invalid = || ExtractorError::DateFormat(raw.to_string());

    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        let datetime = if raw.len() == 8 {
            NaiveDate::parse_from_str(raw, "%Y%m%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
        } else {
            raw.parse::<i64>()
                .ok()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
        };
        return datetime
            .map(|dt| dt.format(DATE_TIME_FORMAT).to_string())
            .ok_or_else(invalid);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc).format(DATE_TIME_FORMAT).to_string());
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Utc.from_utc_datetime(&naive).format(DATE_TIME_FORMAT).to_string());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).format(DATE_TIME_FORMAT).to_string())
        .ok_or_else(invalid)
}

/// Extract concept sets
///
/// Structural problems (a set that is not an object, an empty set id, an
/// item without a concept object, a concept with neither code nor id) fail
/// the section. Unknown vocabularies and unparseable validity dates are
/// soft warnings.
pub fn extract(
    cohort: &CohortId,
    concept_sets: &Value,
    warnings: &mut Vec<SoftWarning>,
) -> Result<ConceptSetFindings, ExtractorError> {
    let fail = |message: String| ExtractorError::ConceptSet {
        cohort_id: cohort.to_string(),
        message,
    };

    let sets = concept_sets
        .as_array()
        .ok_or_else(|| fail("concept_sets is not a list".to_string()))?;

    let mut unknown_vocabularies = BTreeSet::new();
    let mut records = Vec::with_capacity(sets.len());

    for (index, set) in sets.iter().enumerate() {
        let set = set
            .as_object()
            .ok_or_else(|| fail(format!("concept set {} is not an object", index)))?;

        let id = field_text(set, "id").trim().to_string();
        if id.is_empty() {
            return Err(fail(format!("concept set {} has an empty id", index)));
        }

        let mut items = Vec::new();
        let expression_items = set
            .get("expression")
            .and_then(|e| e.get("items"))
            .and_then(Value::as_array);
        for (n, item) in expression_items.into_iter().flatten().enumerate() {
            let item = item
                .as_object()
                .ok_or_else(|| fail(format!("concept set {} item {} is not an object", id, n)))?;
            let concept = item
                .get("concept")
                .and_then(Value::as_object)
                .ok_or_else(|| fail(format!("concept set {} item {} has no concept object", id, n)))?;

            let concept = Concept::from_keys(
                concept,
                ["CONCEPT_ID", "CONCEPT_CODE", "CONCEPT_NAME", "DOMAIN_ID", "VOCABULARY_ID", "CONCEPT_CLASS_ID"],
            );
            if !concept.has_identity() {
                return Err(fail(format!("concept set {} item {} has neither code nor id", id, n)));
            }
            note_vocabulary(&concept, &mut unknown_vocabularies);

            items.push(ExpressionItem {
                concept,
                flags: InclusionFlags {
                    is_excluded: field_flag(item, "isExcluded"),
                    include_descendants: field_flag(item, "includeDescendants"),
                    include_mapped: field_flag(item, "includeMapped"),
                },
            });
        }

        let mut resolved = Vec::new();
        let resolved_concepts = set.get("resolvedConcepts").and_then(Value::as_array);
        for (n, entry) in resolved_concepts.into_iter().flatten().enumerate() {
            let entry = entry
                .as_object()
                .ok_or_else(|| fail(format!("concept set {} resolved concept {} is not an object", id, n)))?;

            let concept = Concept::from_keys(
                entry,
                ["conceptId", "conceptCode", "conceptName", "domainId", "vocabularyId", "conceptClassId"],
            );
            if !concept.has_identity() {
                return Err(fail(format!(
                    "concept set {} resolved concept {} has neither code nor id",
                    id, n
                )));
            }
            note_vocabulary(&concept, &mut unknown_vocabularies);

            resolved.push(ResolvedConcept {
                concept,
                valid_from: validity(entry.get("validStartDate"), warnings),
                valid_to: validity(entry.get("validEndDate"), warnings),
            });
        }

        records.push(ConceptSetRecord {
            id,
            name: field_text(set, "name"),
            items,
            resolved,
        });
    }

    for vocabulary in unknown_vocabularies {
        warnings.push(SoftWarning::new(
            Section::ConceptSets,
            ExtractorError::Vocabulary(vocabulary).to_string(),
        ));
    }

    Ok(ConceptSetFindings {
        cohort: cohort.clone(),
        sets: records,
    })
}

fn note_vocabulary(concept: &Concept, unknown: &mut BTreeSet<String>) {
    if !concept.vocabulary.is_empty() && Vocabulary::parse(&concept.vocabulary).is_none() {
        unknown.insert(concept.vocabulary.clone());
    }
}

fn validity(value: Option<&Value>, warnings: &mut Vec<SoftWarning>) -> Option<String> {
    let raw = value_text(value?);
    if raw.trim().is_empty() {
        return None;
    }
    match normalize_date(&raw) {
        Ok(date) => Some(date),
        Err(e) => {
            warnings.push(SoftWarning::new(Section::ConceptSets, e.to_string()));
            None
        }
    }
}

impl ConceptSetFindings {
    fn activity(&self, kind: &str, label: &str) -> ProvenanceActivity {
        ProvenanceActivity::new(kind, &self.cohort.scope(), label)
    }

    /// Render as triples
    pub fn triples(&self) -> Vec<Triple> {
        let cohort = self.cohort.term();
        let development = self.activity("ConceptSetActivity", "Concept Set Development");

        let mut triples = development.declare();
        triples.push(development.generated(&cohort));

        for (kind, label) in [
            ("LiteratureReviewActivity", "Literature Review"),
            ("PHOEBEAnalysisActivity", "PHOEBE Analysis"),
            ("OrphanConceptActivity", "Orphan Concept Analysis"),
        ] {
            let source = self.activity(kind, label);
            triples.extend(source.declare());
            triples.push(development.derived_from(&source));
        }

        for set in &self.sets {
            let node = set.term();
            triples.push(Triple::new(node.clone(), RDF_TYPE, Term::name(class::CONCEPT_SET)));
            if !set.name.trim().is_empty() {
                triples.push(Triple::new(node.clone(), RDFS_LABEL, Term::text(set.name.clone())));
            }
            triples.push(Triple::new(cohort.clone(), prop::HAS_CONCEPT_SET, node.clone()));

            let set_activity = ProvenanceActivity::new(
                "ConceptSetDevActivity",
                &set.id,
                format!("Concept Set {} Development", set.id),
            );
            triples.extend(set_activity.declare());
            triples.push(set_activity.generated(&node));
            triples.push(development.derived_from(&set_activity));

            for item in &set.items {
                let concept = item.concept.term();
                triples.extend(item.concept.triples());

                let rule = set.rule_term(&item.concept);
                triples.push(Triple::new(rule.clone(), RDF_TYPE, Term::name(class::CONCEPT_INCLUSION_RULE)));
                triples.push(Triple::new(node.clone(), prop::HAS_INCLUSION_RULE, rule.clone()));
                triples.push(Triple::new(rule.clone(), prop::APPLIES_TO_CONCEPT, concept));
                triples.push(Triple::new(rule.clone(), prop::IS_EXCLUDED, Term::boolean(item.flags.is_excluded)));
                triples.push(Triple::new(
                    rule.clone(),
                    prop::INCLUDE_DESCENDANTS,
                    Term::boolean(item.flags.include_descendants),
                ));
                triples.push(Triple::new(rule.clone(), prop::INCLUDE_MAPPED, Term::boolean(item.flags.include_mapped)));
                for comment in item.flags.comments() {
                    triples.push(Triple::new(rule.clone(), RDFS_COMMENT, Term::text(comment)));
                }
            }

            for resolved in &set.resolved {
                let concept = resolved.concept.term();
                triples.extend(resolved.concept.triples());
                if let Some(from) = &resolved.valid_from {
                    triples.push(Triple::new(concept.clone(), prop::VALID_FROM, Term::typed(from.clone(), XsdType::DateTime)));
                }
                if let Some(to) = &resolved.valid_to {
                    triples.push(Triple::new(concept.clone(), prop::VALID_TO, Term::typed(to.clone(), XsdType::DateTime)));
                }
                triples.push(Triple::new(node.clone(), prop::HAS_RESOLVED_CONCEPT, concept));
            }
        }

        triples
    }
}
