//! Fixed vocabulary terms used by the extractors
//!
//! Predicates and classes are written as prefixed names against the
//! declarations in [`crate::namespace`].

// W3C
/// `rdf:type`
pub const RDF_TYPE: &str = "rdf:type";
/// `rdfs:label`
pub const RDFS_LABEL: &str = "rdfs:label";
/// `rdfs:comment`
pub const RDFS_COMMENT: &str = "rdfs:comment";
/// `dct:identifier`
pub const DCT_IDENTIFIER: &str = "dct:identifier";
/// `dct:source`
pub const DCT_SOURCE: &str = "dct:source";
/// `time:TemporalEntity`
pub const TIME_TEMPORAL_ENTITY: &str = "time:TemporalEntity";

// PROV-O
/// `prov:Activity`
pub const PROV_ACTIVITY: &str = "prov:Activity";
/// `prov:Agent`
pub const PROV_AGENT: &str = "prov:Agent";
/// `prov:wasGeneratedBy`
pub const PROV_WAS_GENERATED_BY: &str = "prov:wasGeneratedBy";
/// `prov:wasDerivedFrom`
pub const PROV_WAS_DERIVED_FROM: &str = "prov:wasDerivedFrom";
/// `prov:wasAssociatedWith`
pub const PROV_WAS_ASSOCIATED_WITH: &str = "prov:wasAssociatedWith";

/// Classes of the cohort model
pub mod class {
    /// `:Cohort`
    pub const COHORT: &str = ":Cohort";
    /// `:Disease`
    pub const DISEASE: &str = ":Disease";
    /// `:ConceptSet`
    pub const CONCEPT_SET: &str = ":ConceptSet";
    /// `:Concept`
    pub const CONCEPT: &str = ":Concept";
    /// `:ConceptInclusionRule`
    pub const CONCEPT_INCLUSION_RULE: &str = ":ConceptInclusionRule";
    /// `:EntryCondition`
    pub const ENTRY_CONDITION: &str = ":EntryCondition";
    /// `:TimeConstraint`
    pub const TIME_CONSTRAINT: &str = ":TimeConstraint";
    /// `:EventLimit`
    pub const EVENT_LIMIT: &str = ":EventLimit";
    /// `:ExitCriteria`
    pub const EXIT_CRITERIA: &str = ":ExitCriteria";
}

/// Properties of the cohort model
pub mod prop {
    /// `:hasDisease`
    pub const HAS_DISEASE: &str = ":hasDisease";
    /// `:hasTemporalConstraint`
    pub const HAS_TEMPORAL_CONSTRAINT: &str = ":hasTemporalConstraint";
    /// `:hasEvaluationSummary`
    pub const HAS_EVALUATION_SUMMARY: &str = ":hasEvaluationSummary";
    /// `:hasCohortType`
    pub const HAS_COHORT_TYPE: &str = ":hasCohortType";
    /// `:hasConceptSetSize`
    pub const HAS_CONCEPT_SET_SIZE: &str = ":hasConceptSetSize";
    /// `:hasDatabaseCoverage`
    pub const HAS_DATABASE_COVERAGE: &str = ":hasDatabaseCoverage";
    /// `:hasValidationTimePeriodStart`
    pub const HAS_VALIDATION_PERIOD_START: &str = ":hasValidationTimePeriodStart";
    /// `:hasValidationTimePeriodEnd`
    pub const HAS_VALIDATION_PERIOD_END: &str = ":hasValidationTimePeriodEnd";
    /// `:hasPerformanceMetrics`
    pub const HAS_PERFORMANCE_METRICS: &str = ":hasPerformanceMetrics";
    /// `:validatedBy`
    pub const VALIDATED_BY: &str = ":validatedBy";
    /// `:hasAlgorithm`
    pub const HAS_ALGORITHM: &str = ":hasAlgorithm";
    /// `:definesCondition`
    pub const DEFINES_CONDITION: &str = ":definesCondition";
    /// `:hasTimeConstraint`
    pub const HAS_TIME_CONSTRAINT: &str = ":hasTimeConstraint";
    /// `:hasEventLimit`
    pub const HAS_EVENT_LIMIT: &str = ":hasEventLimit";
    /// `:hasExitCriteria`
    pub const HAS_EXIT_CRITERIA: &str = ":hasExitCriteria";
    /// `:hasEraWindow`
    pub const HAS_ERA_WINDOW: &str = ":hasEraWindow";
    /// `:hasEraWindowUnit`
    pub const HAS_ERA_WINDOW_UNIT: &str = ":hasEraWindowUnit";
    /// `:hasConceptSet`
    pub const HAS_CONCEPT_SET: &str = ":hasConceptSet";
    /// `:hasConceptCode`
    pub const HAS_CONCEPT_CODE: &str = ":hasConceptCode";
    /// `:hasDomain`
    pub const HAS_DOMAIN: &str = ":hasDomain";
    /// `:hasVocabulary`
    pub const HAS_VOCABULARY: &str = ":hasVocabulary";
    /// `:hasConceptClass`
    pub const HAS_CONCEPT_CLASS: &str = ":hasConceptClass";
    /// `:hasInclusionRule`
    pub const HAS_INCLUSION_RULE: &str = ":hasInclusionRule";
    /// `:appliesToConcept`
    pub const APPLIES_TO_CONCEPT: &str = ":appliesToConcept";
    /// `:isExcluded`
    pub const IS_EXCLUDED: &str = ":isExcluded";
    /// `:includeDescendants`
    pub const INCLUDE_DESCENDANTS: &str = ":includeDescendants";
    /// `:includeMapped`
    pub const INCLUDE_MAPPED: &str = ":includeMapped";
    /// `:hasResolvedConcept`
    pub const HAS_RESOLVED_CONCEPT: &str = ":hasResolvedConcept";
    /// `:validFrom`
    pub const VALID_FROM: &str = ":validFrom";
    /// `:validTo`
    pub const VALID_TO: &str = ":validTo";
}
