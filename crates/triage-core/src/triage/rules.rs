//! Rule tables for the triage cascade.
//!
//! All phrase checks are substring tests against the space-joined,
//! lowercase symptom tokens.

use serde::{Deserialize, Serialize};

use crate::models::SymptomCategory;

/// Named list of phrases; any phrase found yields one reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordGroup {
    pub name: String,
    pub phrases: Vec<String>,
}

impl KeywordGroup {
    pub fn new(name: &str, phrases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            phrases: to_owned(phrases),
        }
    }

    /// Phrases of this group found in `text`, in table order.
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.phrases
            .iter()
            .map(|p| p.as_str())
            .filter(move |p| !p.is_empty() && text.contains(&p.to_lowercase()))
    }
}

/// Two term sets that are dangerous together: one term of each must appear.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TermCombination {
    pub first: Vec<String>,
    pub second: Vec<String>,
}

impl TermCombination {
    pub fn new(first: &[&str], second: &[&str]) -> Self {
        Self {
            first: to_owned(first),
            second: to_owned(second),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        contains_any(text, &self.first) && contains_any(text, &self.second)
    }

    /// All terms joined with " + ".
    pub fn label(&self) -> String {
        self.first
            .iter()
            .chain(&self.second)
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// Complete rule set, one section per cascade level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageRules {
    // Level 1
    pub critical_groups: Vec<KeywordGroup>,
    pub critical_combinations: Vec<TermCombination>,
    /// Number of severe records that alone makes a case critical
    pub severe_count_threshold: usize,

    // Level 2
    pub emergency_groups: Vec<KeywordGroup>,
    /// Systems where a single severe record is an emergency
    pub emergency_categories: Vec<SymptomCategory>,

    // Level 3
    pub urgency_phrases: Vec<String>,
    pub moderate_count_threshold: usize,

    // Level 4
    pub minor_phrases: Vec<String>,
}

impl Default for TriageRules {
    fn default() -> Self {
        Self {
            critical_groups: vec![
                KeywordGroup::new(
                    "cardiovascular_critical",
                    &[
                        "infarto",
                        "paro",
                        "cardíaco",
                        "chest pain severo",
                        "dolor pecho irradiado",
                        "sudoracion profusa",
                    ],
                ),
                KeywordGroup::new(
                    "respiratory_critical",
                    &[
                        "no puedo respirar",
                        "asfixia",
                        "cianosis",
                        "dificultad respiratoria severa",
                        "ahogo",
                    ],
                ),
                KeywordGroup::new(
                    "neurological_critical",
                    &[
                        "accidente cerebrovascular",
                        "ictus",
                        "convulsiones",
                        "perdida conciencia",
                        "coma",
                        "confusion severa",
                    ],
                ),
                KeywordGroup::new(
                    "trauma_critical",
                    &[
                        "hemorragia masiva",
                        "trauma craneal",
                        "politraumatismo",
                        "fractura expuesta",
                        "quemaduras extensas",
                    ],
                ),
            ],
            critical_combinations: vec![
                TermCombination::new(&["dolor", "pecho"], &["sudor", "sudoracion"]),
                TermCombination::new(&["dificultad", "respirar"], &["dolor", "pecho"]),
                TermCombination::new(&["confusion"], &["debilidad"]),
            ],
            severe_count_threshold: 2,
            emergency_groups: vec![
                KeywordGroup::new(
                    "respiratory",
                    &[
                        "dificultad respirar",
                        "asma severa",
                        "neumonia",
                        "tos con sangre",
                        "dolor pecho",
                    ],
                ),
                KeywordGroup::new(
                    "cardiovascular",
                    &[
                        "palpitaciones severas",
                        "hipertension severa",
                        "dolor precordial",
                        "taquicardia",
                    ],
                ),
                KeywordGroup::new(
                    "neurological",
                    &[
                        "migraña severa",
                        "cefalea intensa",
                        "vision borrosa",
                        "mareo severo",
                        "entumecimiento",
                    ],
                ),
                KeywordGroup::new(
                    "abdominal",
                    &[
                        "dolor abdominal severo",
                        "apendicitis",
                        "obstruccion",
                        "sangrado digestivo",
                    ],
                ),
            ],
            emergency_categories: vec![
                SymptomCategory::Cardiovascular,
                SymptomCategory::Respiratory,
                SymptomCategory::Neurological,
            ],
            urgency_phrases: to_owned(&[
                "fiebre alta",
                "dolor moderado",
                "vomito persistente",
                "diarrea severa",
                "infeccion",
                "fractura simple",
            ]),
            moderate_count_threshold: 2,
            // No bare "tos": a mild cough on its own stays non-urgent
            minor_phrases: to_owned(&[
                "dolor leve",
                "fiebre baja",
                "resfriado",
                "lesion menor",
                "esguince",
                "calambre",
                "hormigueo",
            ]),
        }
    }
}

fn contains_any(text: &str, terms: &[String]) -> bool {
    terms.iter().any(|t| !t.is_empty() && text.contains(t.as_str()))
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_matches_in_table_order() {
        let group = KeywordGroup::new("g", &["ahogo", "asfixia", "cianosis"]);
        let found: Vec<&str> = group.matches("cianosis y ahogo").collect();
        assert_eq!(found, vec!["ahogo", "cianosis"]);
    }

    #[test]
    fn test_combination_needs_both_sides() {
        let combo = TermCombination::new(&["dolor", "pecho"], &["sudor", "sudoracion"]);
        assert!(combo.matches("pecho sudor"));
        assert!(!combo.matches("dolor pecho"));
        assert!(!combo.matches("sudor"));
        assert_eq!(combo.label(), "dolor + pecho + sudor + sudoracion");
    }

    #[test]
    fn test_default_rules_shape() {
        let rules = TriageRules::default();
        assert_eq!(rules.critical_groups.len(), 4);
        assert_eq!(rules.critical_combinations.len(), 3);
        assert_eq!(rules.emergency_groups.len(), 4);
        assert!(!rules.minor_phrases.iter().any(|p| p == "tos"));
    }
}
