//! Vocabulary resolution for concept codes
//!
//! Maps the `VOCABULARY_ID` carried by a concept to the prefix its codes
//! are minted under. The mapping is closed; anything else lands in the
//! default cohort namespace instead of failing.

/// Vocabularies with a dedicated prefix in the emitted document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vocabulary {
    /// SNOMED CT
    Snomed,
    /// LOINC
    Loinc,
    /// RxNorm
    RxNorm,
    /// ICD-10
    Icd10,
    /// ICD-9-CM
    Icd9Cm,
    /// UMLS
    Umls,
    /// MeSH
    Mesh,
    /// Disease Ontology
    Doid,
    /// Human Phenotype Ontology
    Hpo,
    /// MONDO Disease Ontology
    Mondo,
}

/// Prefix used when a vocabulary id is not recognized
pub const DEFAULT_PREFIX: &str = ":";

impl Vocabulary {
    /// All vocabularies, in declaration order
    pub const ALL: [Vocabulary; 10] = [
        Vocabulary::Snomed,
        Vocabulary::Loinc,
        Vocabulary::RxNorm,
        Vocabulary::Icd10,
        Vocabulary::Icd9Cm,
        Vocabulary::Umls,
        Vocabulary::Mesh,
        Vocabulary::Doid,
        Vocabulary::Hpo,
        Vocabulary::Mondo,
    ];

    /// Parse an OMOP-style vocabulary id
    ///
    /// Matching is exact: ids are produced by the source vocabulary tables,
    /// not typed by people.
    pub fn parse(vocabulary_id: &str) -> Option<Self> {
        match vocabulary_id {
            "SNOMED" => Some(Vocabulary::Snomed),
            "LOINC" => Some(Vocabulary::Loinc),
            "RxNorm" => Some(Vocabulary::RxNorm),
            "ICD10" => Some(Vocabulary::Icd10),
            "ICD9CM" => Some(Vocabulary::Icd9Cm),
            "UMLS" => Some(Vocabulary::Umls),
            "MeSH" => Some(Vocabulary::Mesh),
            "DOID" => Some(Vocabulary::Doid),
            "HPO" => Some(Vocabulary::Hpo),
            "MONDO" => Some(Vocabulary::Mondo),
            _ => None,
        }
    }

    /// The vocabulary id as it appears in source data
    pub fn as_str(&self) -> &'static str {
        match self {
            Vocabulary::Snomed => "SNOMED",
            Vocabulary::Loinc => "LOINC",
            Vocabulary::RxNorm => "RxNorm",
            Vocabulary::Icd10 => "ICD10",
            Vocabulary::Icd9Cm => "ICD9CM",
            Vocabulary::Umls => "UMLS",
            Vocabulary::Mesh => "MeSH",
            Vocabulary::Doid => "DOID",
            Vocabulary::Hpo => "HPO",
            Vocabulary::Mondo => "MONDO",
        }
    }

    /// The prefix (with trailing colon) codes are minted under
    pub fn prefix(&self) -> &'static str {
        match self {
            Vocabulary::Snomed => "snomed:",
            Vocabulary::Loinc => "loinc:",
            Vocabulary::RxNorm => "rxnorm:",
            Vocabulary::Icd10 => "icd10:",
            Vocabulary::Icd9Cm => "icd9:",
            Vocabulary::Umls => "umls:",
            Vocabulary::Mesh => "mesh:",
            Vocabulary::Doid => "doid:",
            Vocabulary::Hpo => "hp:",
            Vocabulary::Mondo => "mondo:",
        }
    }

    /// Resolve a vocabulary id to its prefix
    ///
    /// Unknown ids resolve to [`DEFAULT_PREFIX`].
    ///
    /// # Examples
    ///
    /// ```
    /// use phenokg_domain::Vocabulary;
    ///
    /// assert_eq!(Vocabulary::resolve("SNOMED"), "snomed:");
    /// assert_eq!(Vocabulary::resolve("Gemscript"), ":");
    /// ```
    pub fn resolve(vocabulary_id: &str) -> &'static str {
        Self::parse(vocabulary_id)
            .map(|v| v.prefix())
            .unwrap_or(DEFAULT_PREFIX)
    }
}

impl std::str::FromStr for Vocabulary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown vocabulary ID: {}", s))
    }
}
