//! Rule-cascade triage classification.
//!
//! Levels are checked from 1 (resuscitation) down to 4 (semi-urgent). The
//! first level with at least one matching criterion wins and lower levels
//! are never evaluated. Level 5 is the fallback.

mod rules;

pub use rules::*;

use crate::models::{Severity, SymptomRecord, TriageLevel, TriageResult};

/// Reason used when no symptom records were extracted.
pub const NO_SYMPTOMS_REASON: &str = "No se detectaron síntomas específicos";

/// Reason used when nothing above level 5 matched.
pub const NON_URGENT_REASON: &str = "Síntomas de severidad leve, no requiere atención inmediata";

/// Assigns a triage level to a set of symptom records.
#[derive(Debug, Clone, Default)]
pub struct TriageClassifier {
    rules: TriageRules,
}

impl TriageClassifier {
    /// Create a classifier with the default rule tables.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: TriageRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &TriageRules {
        &self.rules
    }

    /// Classify symptom records. Always returns exactly one level.
    pub fn classify(&self, symptoms: &[SymptomRecord]) -> TriageResult {
        if symptoms.is_empty() {
            return TriageResult::new(TriageLevel::NonUrgent, vec![NO_SYMPTOMS_REASON.to_string()]);
        }

        let text = symptoms
            .iter()
            .map(|s| s.token.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        for level in TriageLevel::CASCADE {
            let reasons = self.reasons_for(level, &text, symptoms);
            if !reasons.is_empty() {
                tracing::debug!(level = level.level(), reasons = reasons.len(), "Triage level matched");
                return TriageResult::new(level, reasons);
            }
        }

        TriageResult::new(TriageLevel::NonUrgent, vec![NON_URGENT_REASON.to_string()])
    }

    fn reasons_for(&self, level: TriageLevel, text: &str, symptoms: &[SymptomRecord]) -> Vec<String> {
        match level {
            TriageLevel::Resuscitation => self.check_resuscitation(text, symptoms),
            TriageLevel::Emergency => self.check_emergency(text, symptoms),
            TriageLevel::Urgency => self.check_urgency(text, symptoms),
            TriageLevel::SemiUrgent => self.check_semi_urgent(text),
            TriageLevel::NonUrgent => Vec::new(),
        }
    }

    /// Level 1: critical phrases, dangerous combinations, multiple severe records.
    pub fn check_resuscitation(&self, text: &str, symptoms: &[SymptomRecord]) -> Vec<String> {
        let mut reasons = Vec::new();

        for group in &self.rules.critical_groups {
            for phrase in group.matches(text) {
                reasons.push(format!("Criterio crítico detectado: {} ({})", phrase, group.name));
            }
        }

        for combination in &self.rules.critical_combinations {
            if combination.matches(text) {
                reasons.push(format!("Combinación crítica: {}", combination.label()));
            }
        }

        if count_severity(symptoms, Severity::Severe) >= self.rules.severe_count_threshold {
            reasons.push("Múltiples síntomas severos detectados".to_string());
        }

        reasons
    }

    /// Level 2: emergency phrases, severe records in vital systems.
    pub fn check_emergency(&self, text: &str, symptoms: &[SymptomRecord]) -> Vec<String> {
        let mut reasons = Vec::new();

        for group in &self.rules.emergency_groups {
            for phrase in group.matches(text) {
                reasons.push(format!("Criterio de emergencia: {} ({})", phrase, group.name));
            }
        }

        for symptom in symptoms {
            if symptom.is_severe() && self.rules.emergency_categories.contains(&symptom.category) {
                reasons.push(format!("Síntoma severo en sistema {}", symptom.category.label()));
            }
        }

        reasons
    }

    /// Level 3: urgency phrases, multiple moderate records.
    pub fn check_urgency(&self, text: &str, symptoms: &[SymptomRecord]) -> Vec<String> {
        let mut reasons: Vec<String> = self
            .rules
            .urgency_phrases
            .iter()
            .filter(|p| contains_phrase(text, p))
            .map(|p| format!("Criterio de urgencia: {}", p))
            .collect();

        if count_severity(symptoms, Severity::Moderate) >= self.rules.moderate_count_threshold {
            reasons.push("Múltiples síntomas moderados".to_string());
        }

        reasons
    }

    /// Level 4: minor-symptom phrases.
    pub fn check_semi_urgent(&self, text: &str) -> Vec<String> {
        self.rules
            .minor_phrases
            .iter()
            .filter(|p| contains_phrase(text, p))
            .map(|p| format!("Síntoma menor: {}", p))
            .collect()
    }
}

/// Phrases are matched case-insensitively against the lowercase token text.
fn contains_phrase(text: &str, phrase: &str) -> bool {
    !phrase.is_empty() && text.contains(&phrase.to_lowercase())
}

fn count_severity(symptoms: &[SymptomRecord], severity: Severity) -> usize {
    symptoms.iter().filter(|s| s.severity == severity).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::SymptomExtractor;
    use crate::models::SymptomCategory;

    fn record(token: &str, category: SymptomCategory, severity: Severity) -> SymptomRecord {
        SymptomRecord::new(token, category, severity, 4)
    }

    fn classify_text(text: &str) -> TriageResult {
        let records = SymptomExtractor::new().extract(text);
        TriageClassifier::new().classify(&records)
    }

    #[test]
    fn test_empty_input_is_level_five() {
        let result = TriageClassifier::new().classify(&[]);
        assert_eq!(result.level, 5);
        assert_eq!(result.reasoning, vec![NO_SYMPTOMS_REASON]);
        assert!(!result.vital_signs_required);
    }

    #[test]
    fn test_chest_pain_with_sweating_is_critical() {
        let result =
            classify_text("dolor de pecho severo, dificultad para respirar, sudoración, nausea");

        assert_eq!(result.level, 1);
        assert_eq!(
            result.reasoning,
            vec![
                "Combinación crítica: dolor + pecho + sudor + sudoracion",
                "Combinación crítica: dificultad + respirar + dolor + pecho",
            ]
        );
        assert!(result.vital_signs_required);
        assert_eq!(result.color_code, "Rojo");
    }

    #[test]
    fn test_mild_cold_is_non_urgent() {
        let result = classify_text("tos leve, secreción nasal, dolor de garganta leve");
        assert_eq!(result.level, 5);
        assert_eq!(result.reasoning, vec![NON_URGENT_REASON]);
    }

    #[test]
    fn test_two_severe_records_are_critical() {
        let result = classify_text("dolor intenso y diarrea constante");
        assert_eq!(result.level, 1);
        assert_eq!(result.reasoning, vec!["Múltiples síntomas severos detectados"]);
    }

    #[test]
    fn test_critical_phrase() {
        let records = [record("ahogo", SymptomCategory::Respiratory, Severity::Severe)];
        let result = TriageClassifier::new().classify(&records);

        assert_eq!(result.level, 1);
        assert_eq!(
            result.reasoning,
            vec!["Criterio crítico detectado: ahogo (respiratory_critical)"]
        );
    }

    #[test]
    fn test_emergency_phrase() {
        let records = [record("taquicardia", SymptomCategory::Cardiovascular, Severity::Moderate)];
        let result = TriageClassifier::new().classify(&records);

        assert_eq!(result.level, 2);
        assert_eq!(
            result.reasoning,
            vec!["Criterio de emergencia: taquicardia (cardiovascular)"]
        );
    }

    #[test]
    fn test_single_severe_vital_system_is_emergency() {
        let records = [record("mareo", SymptomCategory::Neurological, Severity::Severe)];
        let result = TriageClassifier::new().classify(&records);

        assert_eq!(result.level, 2);
        assert_eq!(result.reasoning, vec!["Síntoma severo en sistema neurologico"]);
    }

    #[test]
    fn test_single_severe_pain_is_not_emergency() {
        let records = [record("molestia", SymptomCategory::Pain, Severity::Severe)];
        let result = TriageClassifier::new().classify(&records);
        assert_eq!(result.level, 5);
    }

    #[test]
    fn test_two_moderate_records_are_urgent() {
        let records = [
            record("nausea", SymptomCategory::Digestive, Severity::Moderate),
            record("vomito", SymptomCategory::Digestive, Severity::Moderate),
        ];
        let result = TriageClassifier::new().classify(&records);

        assert_eq!(result.level, 3);
        assert_eq!(result.reasoning, vec!["Múltiples síntomas moderados"]);
        assert_eq!(result.max_wait_time, "30 minutos");
    }

    #[test]
    fn test_minor_phrase_is_semi_urgent() {
        let records = [record("calambre", SymptomCategory::Pain, Severity::Mild)];
        let result = TriageClassifier::new().classify(&records);

        assert_eq!(result.level, 4);
        assert_eq!(result.reasoning, vec!["Síntoma menor: calambre"]);
    }

    #[test]
    fn test_higher_level_short_circuits_lower() {
        // Matches both the level-2 "taquicardia" phrase and two moderate records
        let records = [
            record("taquicardia", SymptomCategory::Cardiovascular, Severity::Moderate),
            record("nausea", SymptomCategory::Digestive, Severity::Moderate),
        ];
        let result = TriageClassifier::new().classify(&records);

        assert_eq!(result.level, 2);
        assert!(result.reasoning.iter().all(|r| r.starts_with("Criterio de emergencia")));
    }

    #[test]
    fn test_custom_rules() {
        let rules = TriageRules {
            minor_phrases: vec!["tos".into()],
            ..TriageRules::default()
        };
        let classifier = TriageClassifier::with_rules(rules);
        let records = [record("tos", SymptomCategory::Respiratory, Severity::Mild)];

        assert_eq!(classifier.classify(&records).level, 4);
    }

    #[test]
    fn test_custom_phrases_ignore_case() {
        let rules = TriageRules {
            urgency_phrases: vec!["Fiebre Alta".into()],
            minor_phrases: vec!["CALAMBRE".into()],
            ..TriageRules::default()
        };
        let classifier = TriageClassifier::with_rules(rules);

        let fever = [
            record("fiebre", SymptomCategory::Pain, Severity::Mild),
            record("alta", SymptomCategory::Pain, Severity::Mild),
        ];
        let result = classifier.classify(&fever);
        assert_eq!(result.level, 3);
        assert_eq!(result.reasoning, vec!["Criterio de urgencia: Fiebre Alta"]);

        let cramp = [record("calambre", SymptomCategory::Pain, Severity::Mild)];
        let result = classifier.classify(&cramp);
        assert_eq!(result.level, 4);
        assert_eq!(result.reasoning, vec!["Síntoma menor: CALAMBRE"]);
    }
}
