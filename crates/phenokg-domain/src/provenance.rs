//! PROV-O nodes describing how each part of the graph was derived
//!
//! Every extractor records the work it did as a `prov:Activity` scoped to
//! the record (or concept set) it ran over. Tools and systems that took
//! part are `prov:Agent`s.

use crate::terms::{
    PROV_ACTIVITY, PROV_AGENT, PROV_WAS_ASSOCIATED_WITH, PROV_WAS_DERIVED_FROM,
    PROV_WAS_GENERATED_BY, RDFS_LABEL, RDF_TYPE,
};
use crate::triple::{Term, Triple};

/// A `prov:Activity` node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceActivity {
    /// Local name of the activity, e.g. `ValidationActivity_Cohort42`
    pub id: String,

    /// Human-readable label
    pub label: String,
}

impl ProvenanceActivity {
    /// Create an activity named `{kind}_{scope}`
    pub fn new(kind: &str, scope: &str, label: impl Into<String>) -> Self {
        Self {
            id: format!("{}_{}", kind, scope),
            label: label.into(),
        }
    }

    /// The activity node
    pub fn term(&self) -> Term {
        Term::local(&self.id)
    }

    /// Type and label triples
    pub fn declare(&self) -> Vec<Triple> {
        vec![
            Triple::new(self.term(), RDF_TYPE, Term::name(PROV_ACTIVITY)),
            Triple::new(self.term(), RDFS_LABEL, Term::text(self.label.clone())),
        ]
    }

    /// `entity prov:wasGeneratedBy activity`
    pub fn generated(&self, entity: &Term) -> Triple {
        Triple::new(entity.clone(), PROV_WAS_GENERATED_BY, self.term())
    }

    /// `activity prov:wasDerivedFrom other`
    pub fn derived_from(&self, other: &ProvenanceActivity) -> Triple {
        Triple::new(self.term(), PROV_WAS_DERIVED_FROM, other.term())
    }

    /// `activity prov:wasAssociatedWith agent`
    pub fn associated_with(&self, agent: &Agent) -> Triple {
        Triple::new(self.term(), PROV_WAS_ASSOCIATED_WITH, agent.term())
    }
}

/// A `prov:Agent` node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    /// Local name of the agent
    pub id: &'static str,

    /// Human-readable label
    pub label: &'static str,
}

impl Agent {
    /// The PheValuator validation tool
    pub const PHEVALUATOR: Agent = Agent {
        id: "PheValuatorAgent",
        label: "PheValuator Validation Tool",
    };

    /// OHDSI Atlas, where cohort definitions are authored
    pub const ATLAS: Agent = Agent {
        id: "AtlasAgent",
        label: "OHDSI Atlas",
    };

    /// The agent node
    pub fn term(&self) -> Term {
        Term::local(self.id)
    }

    /// Type and label triples
    pub fn declare(&self) -> Vec<Triple> {
        vec![
            Triple::new(self.term(), RDF_TYPE, Term::name(PROV_AGENT)),
            Triple::new(self.term(), RDFS_LABEL, Term::text(self.label)),
        ]
    }
}
