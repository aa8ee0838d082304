//! Rule-driven characteristics of a disease from its clinical description
//!
//! Class-valued matches are gated on the ontology index: a value whose
//! `disease:` class is unknown is skipped with a warning.

use crate::config::ExtractionRule;
use crate::types::{Section, SoftWarning};
use phenokg_domain::{mint_local_name, ClassLookup, Term, Triple, XsdType};
use regex::Regex;

const VALUE_GROUP: &str = "value";
const CLASS_PREFIX: &str = "disease:";

/// Object of a clinical finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClinicalValue {
    /// Local name of a `disease:` class
    Class(String),
    /// Free-text value
    Text(String),
}

/// One `disease <predicate> <value>` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicalFinding {
    /// Prefixed predicate
    pub predicate: String,

    /// Object
    pub value: ClinicalValue,
}

impl ClinicalFinding {
    /// Render with the given disease as subject
    pub fn triple(&self, disease: &Term) -> Triple {
        let object = match &self.value {
            ClinicalValue::Class(token) => Term::minted(CLASS_PREFIX, token),
            ClinicalValue::Text(text) => Term::typed(text.clone(), XsdType::String),
        };
        Triple::new(disease.clone(), Term::name(self.predicate.clone()), object)
    }
}

struct CompiledRule {
    predicate: String,
    patterns: Vec<Regex>,
    class_check: bool,
}

/// Compiled clinical-description rules
pub struct ClinicalRules {
    rules: Vec<CompiledRule>,
}

impl ClinicalRules {
    /// Compile rules; fails on the first invalid pattern
    pub fn compile(rules: &[ExtractionRule]) -> Result<Self, String> {
        let rules = rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    predicate: rule.predicate.clone(),
                    patterns: rule.compile()?,
                    class_check: rule.class_check,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;
        Ok(Self { rules })
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule to the description
    ///
    /// Findings follow rule order, then pattern order, then match order.
    pub fn extract<L: ClassLookup + ?Sized>(
        &self,
        description: &str,
        lookup: &L,
        warnings: &mut Vec<SoftWarning>,
    ) -> Vec<ClinicalFinding> {
        let mut findings = Vec::new();

        for rule in &self.rules {
            for pattern in &rule.patterns {
                let named = pattern.capture_names().any(|n| n == Some(VALUE_GROUP));

                for caps in pattern.captures_iter(description) {
                    if named {
                        let Some(value) = caps.name(VALUE_GROUP) else {
                            continue;
                        };
                        // Class ids are written without spaces, and checked as rendered
                        let raw: String = value.as_str().split_whitespace().collect();
                        if raw.is_empty() {
                            continue;
                        }
                        let token = mint_local_name(&raw);

                        let class_id = format!("{}{}", CLASS_PREFIX, token);
                        if rule.class_check && !lookup.is_valid_class(&class_id) {
                            warnings.push(SoftWarning::new(
                                Section::ClinicalDescription,
                                format!("Invalid class for {}: {}", rule.predicate, class_id),
                            ));
                            continue;
                        }

                        findings.push(ClinicalFinding {
                            predicate: rule.predicate.clone(),
                            value: ClinicalValue::Class(token),
                        });
                    } else {
                        let Some(value) = caps.get(1).or_else(|| caps.get(0)) else {
                            continue;
                        };
                        let text = value.as_str().trim();
                        if text.is_empty() {
                            continue;
                        }
                        findings.push(ClinicalFinding {
                            predicate: rule.predicate.clone(),
                            value: ClinicalValue::Text(text.to_string()),
                        });
                    }
                }
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorConfig;
    use std::collections::HashSet;

    struct Classes(HashSet<&'static str>);

    impl ClassLookup for Classes {
        fn is_valid_class(&self, class_id: &str) -> bool {
            self.0.contains(class_id)
        }

        fn is_subclass_of(&self, class_id: &str, parent_id: &str) -> bool {
            class_id == parent_id
        }
    }

    fn classes(ids: &[&'static str]) -> Classes {
        Classes(ids.iter().copied().collect())
    }

    fn default_rules() -> ClinicalRules {
        ClinicalRules::compile(&ExtractorConfig::default().clinical_rules).unwrap()
    }

    const DESCRIPTION: &str = "Crohn's disease is characterized by transmural inflammation \
        located in the ileum. Onset typically between ages 15-30.";

    #[test]
    fn test_class_findings_pass_the_gate() {
        let lookup = classes(&["disease:transmural", "disease:ileum"]);
        let mut warnings = Vec::new();
        let findings = default_rules().extract(DESCRIPTION, &lookup, &mut warnings);

        assert!(findings.contains(&ClinicalFinding {
            predicate: "disease:hasInflammationCharacteristic".to_string(),
            value: ClinicalValue::Class("transmural".to_string()),
        }));
        assert!(findings.contains(&ClinicalFinding {
            predicate: "disease:affectsAnatomicalSite".to_string(),
            value: ClinicalValue::Class("ileum".to_string()),
        }));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unknown_class_is_skipped_with_warning() {
        let lookup = classes(&[]);
        let mut warnings = Vec::new();
        let findings = default_rules().extract(DESCRIPTION, &lookup, &mut warnings);

        assert!(findings
            .iter()
            .all(|f| matches!(f.value, ClinicalValue::Text(_))));
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].message.contains("disease:transmural"));
    }

    #[test]
    fn test_literal_findings() {
        let lookup = classes(&[]);
        let mut warnings = Vec::new();
        let findings = default_rules().extract(DESCRIPTION, &lookup, &mut warnings);

        assert!(findings.contains(&ClinicalFinding {
            predicate: "disease:hasOnsetAge".to_string(),
            value: ClinicalValue::Text("15-30".to_string()),
        }));
    }

    #[test]
    fn test_rendering() {
        let disease = Term::local("Disease_Crohn_s_disease");
        let class = ClinicalFinding {
            predicate: "disease:affectsAnatomicalSite".to_string(),
            value: ClinicalValue::Class("ileum".to_string()),
        };
        let text = ClinicalFinding {
            predicate: "disease:hasOnsetAge".to_string(),
            value: ClinicalValue::Text("15-30".to_string()),
        };

        assert_eq!(
            class.triple(&disease).to_string(),
            ":Disease_Crohn_s_disease disease:affectsAnatomicalSite disease:ileum ."
        );
        assert_eq!(
            text.triple(&disease).to_string(),
            ":Disease_Crohn_s_disease disease:hasOnsetAge \"15-30\"^^xsd:string ."
        );
    }

    #[test]
    fn test_class_is_checked_under_its_rendered_name() {
        let rules = ClinicalRules::compile(&[ExtractionRule {
            predicate: "disease:affectsAnatomicalSite".to_string(),
            patterns: vec![r"(?i)located in the (?P<value>\w+)".to_string()],
            class_check: true,
        }])
        .unwrap();
        let description = "Inflammation located in the íleon.";

        let mut warnings = Vec::new();
        let findings = rules.extract(description, &classes(&["disease:íleon"]), &mut warnings);
        assert!(findings.is_empty());
        assert!(warnings[0].message.contains("disease:_leon"));

        let mut warnings = Vec::new();
        let findings = rules.extract(description, &classes(&["disease:_leon"]), &mut warnings);
        assert!(warnings.is_empty());
        let disease = Term::local("Disease_Crohn_s_disease");
        assert_eq!(
            findings[0].triple(&disease).to_string(),
            ":Disease_Crohn_s_disease disease:affectsAnatomicalSite disease:_leon ."
        );
    }

    #[test]
    fn test_no_rules() {
        let rules = ClinicalRules::compile(&[]).unwrap();
        assert!(rules.is_empty());
        let mut warnings = Vec::new();
        assert!(rules.extract(DESCRIPTION, &classes(&[]), &mut warnings).is_empty());
    }
}
