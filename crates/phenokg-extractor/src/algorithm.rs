//! Entry, exit and era definitions from the human-readable algorithm
//!
//! The algorithm text is split on its `###` headers. Each recognized
//! header becomes a provenance activity the algorithm activity derives
//! from; phrases inside a section become facts about that activity.

use phenokg_domain::terms::{class, prop, RDFS_LABEL, RDF_TYPE};
use phenokg_domain::{CohortId, ProvenanceActivity, Term, Triple};
use regex::Regex;
use std::sync::LazyLock;

const ENTRY_HEADER: &str = "Cohort Entry Events";
const EXIT_HEADER: &str = "Cohort Exit";
const ERAS_HEADER: &str = "Cohort Eras";
const SECTION_MARKER: &str = "###";

static ENTRY_CONDITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)condition occurrence of '([^']+)'").expect("Invalid regex")
});
static ERA_WINDOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)within ([0-9]+) days").expect("Invalid regex"));

/// Facts from the "Cohort Entry Events" section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFindings {
    /// Quoted condition names, in order of appearance
    pub conditions: Vec<String>,

    /// Entry is the first time in the person's history
    pub first_occurrence: bool,

    /// Entry is limited to the earliest event per person
    pub earliest_event: bool,
}

/// Facts from the "Cohort Exit" section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExitFindings {
    /// Exit at the end of continuous observation
    pub end_of_observation: bool,
}

/// Facts from the "Cohort Eras" section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EraFindings {
    /// Era collapse window in days
    pub window_days: Option<u64>,
}

/// Findings of the algorithm section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmFindings {
    /// Cohort id
    pub cohort: CohortId,

    /// Full algorithm text, when full-text literals are enabled
    pub text: Option<String>,

    /// Present when the entry header is
    pub entry: Option<EntryFindings>,

    /// Present when the exit header is
    pub exit: Option<ExitFindings>,

    /// Present when the eras header is
    pub eras: Option<EraFindings>,
}

/// Slice of `text` from just after `header` up to the next `###` marker
///
/// Headers match exactly, including case.
pub fn section_slice<'a>(text: &'a str, header: &str) -> Option<&'a str> {
    let start = text.find(header)? + header.len();
    let rest = &text[start..];
    let end = rest.find(SECTION_MARKER).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Extract algorithm facts
///
/// All three sections are evaluated; fails when the era window does not fit
/// in a `u64`.
pub fn extract(
    cohort: &CohortId,
    algorithm: &str,
    include_full_text: bool,
) -> Result<AlgorithmFindings, String> {
    let entry = section_slice(algorithm, ENTRY_HEADER).map(parse_entry);
    let exit = section_slice(algorithm, EXIT_HEADER).map(parse_exit);
    let eras = section_slice(algorithm, ERAS_HEADER).map(parse_eras).transpose()?;

    Ok(AlgorithmFindings {
        cohort: cohort.clone(),
        text: include_full_text.then(|| algorithm.to_string()),
        entry,
        exit,
        eras,
    })
}

fn normalized(section: &str) -> String {
    section.to_lowercase().replace('\u{2019}', "'")
}

fn parse_entry(section: &str) -> EntryFindings {
    let lower = normalized(section);
    EntryFindings {
        conditions: ENTRY_CONDITION
            .captures_iter(section)
            .map(|caps| caps[1].to_string())
            .collect(),
        first_occurrence: lower.contains("first time in the person's history"),
        earliest_event: lower.contains("earliest event per person"),
    }
}

fn parse_exit(section: &str) -> ExitFindings {
    ExitFindings {
        end_of_observation: normalized(section).contains("end of continuous observation"),
    }
}

fn parse_eras(section: &str) -> Result<EraFindings, String> {
    let window_days = match ERA_WINDOW.captures(section) {
        Some(caps) => Some(
            caps[1]
                .parse::<u64>()
                .map_err(|e| format!("Era window '{}' out of range: {}", &caps[1], e))?,
        ),
        None => None,
    };
    Ok(EraFindings { window_days })
}

impl AlgorithmFindings {
    fn activity(&self, kind: &str, label: &str) -> ProvenanceActivity {
        ProvenanceActivity::new(kind, &self.cohort.scope(), label)
    }

    /// Render as triples
    pub fn triples(&self) -> Vec<Triple> {
        let cohort = self.cohort.term();
        let algorithm = self.activity("AlgorithmActivity", "Cohort Algorithm Development");

        let mut triples = algorithm.declare();
        triples.push(algorithm.generated(&cohort));
        if let Some(text) = &self.text {
            triples.push(Triple::new(cohort.clone(), prop::HAS_ALGORITHM, Term::text(text.clone())));
        }

        if let Some(entry) = &self.entry {
            let activity = self.activity("EntryEventActivity", "Entry Event Definition");
            triples.extend(activity.declare());
            triples.push(algorithm.derived_from(&activity));

            for (n, condition) in entry.conditions.iter().enumerate() {
                let node = Term::local(&format!("EntryCondition_{}_{}", self.cohort.scope(), n + 1));
                triples.push(Triple::new(node.clone(), RDF_TYPE, Term::name(class::ENTRY_CONDITION)));
                triples.push(Triple::new(node.clone(), RDFS_LABEL, Term::text(condition.clone())));
                triples.push(Triple::new(activity.term(), prop::DEFINES_CONDITION, node));
            }

            if entry.first_occurrence {
                triples.extend(fixed_node(
                    &activity,
                    prop::HAS_TIME_CONSTRAINT,
                    "FirstOccurrence",
                    class::TIME_CONSTRAINT,
                    "First occurrence in history",
                ));
            }

            if entry.earliest_event {
                triples.extend(fixed_node(
                    &activity,
                    prop::HAS_EVENT_LIMIT,
                    "EarliestEvent",
                    class::EVENT_LIMIT,
                    "Earliest event per person",
                ));
            }
        }

        if let Some(exit) = &self.exit {
            let activity = self.activity("ExitCriteriaActivity", "Exit Criteria Definition");
            triples.extend(activity.declare());
            triples.push(algorithm.derived_from(&activity));

            if exit.end_of_observation {
                triples.extend(fixed_node(
                    &activity,
                    prop::HAS_EXIT_CRITERIA,
                    "EndOfObservation",
                    class::EXIT_CRITERIA,
                    "End of continuous observation",
                ));
            }
        }

        if let Some(eras) = &self.eras {
            let activity = self.activity("EraDefinitionActivity", "Cohort Era Definition");
            triples.extend(activity.declare());
            triples.push(algorithm.derived_from(&activity));

            if let Some(days) = eras.window_days {
                triples.push(Triple::new(activity.term(), prop::HAS_ERA_WINDOW, Term::integer(days)));
                triples.push(Triple::new(activity.term(), prop::HAS_ERA_WINDOW_UNIT, Term::text("days")));
            }
        }

        triples
    }
}

// activity <predicate> :Node, plus the node's type and label
fn fixed_node(
    activity: &ProvenanceActivity,
    predicate: &str,
    node: &str,
    class: &str,
    label: &str,
) -> Vec<Triple> {
    let node = Term::local(node);
    vec![
        Triple::new(activity.term(), predicate, node.clone()),
        Triple::new(node.clone(), RDF_TYPE, Term::name(class)),
        Triple::new(node, RDFS_LABEL, Term::text(label)),
    ]
}
