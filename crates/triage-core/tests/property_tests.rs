//! Property tests over arbitrary symptom descriptions.

use std::collections::HashSet;

use proptest::prelude::*;
use triage_core::{DiseaseRanker, SymptomExtractor, TriageClassifier};

/// Lexicon, rule and filler words mixed into generated descriptions.
const WORDS: &[&str] = &[
    "dolor", "pecho", "severo", "intenso", "leve", "tos", "fiebre", "alta", "nausea", "vomito",
    "diarrea", "constante", "mareo", "confusion", "debilidad", "respirar", "dificultad",
    "sudoracion", "taquicardia", "calambre", "cabeza", "vision", "perdida", "no", "puedo",
    "tengo", "y", "de", "el", "muy", "frecuente", "ahogo", "infeccion", "hormigueo",
];

fn description() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..14).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn test_level_always_in_range(text in description()) {
        let records = SymptomExtractor::new().extract(&text);
        let result = TriageClassifier::new().classify(&records);

        prop_assert!((1..=5).contains(&result.level));
        prop_assert!(!result.reasoning.is_empty());
        prop_assert_eq!(result.vital_signs_required, result.level <= 2);
    }

    #[test]
    fn test_arbitrary_text_never_panics(text in ".{0,200}") {
        let records = SymptomExtractor::new().extract(&text);
        let result = TriageClassifier::new().classify(&records);
        prop_assert!((1..=5).contains(&result.level));
    }

    #[test]
    fn test_no_duplicate_records(text in description()) {
        let records = SymptomExtractor::new().extract(&text);
        let mut seen = HashSet::new();
        for record in &records {
            prop_assert!(seen.insert(record.key()), "duplicate record {:?}", record.key());
            prop_assert!((1..=4).contains(&record.urgency_level));
        }
    }

    #[test]
    fn test_predictions_bounded_and_sorted(text in description()) {
        let tokens: Vec<String> = SymptomExtractor::new()
            .extract(&text)
            .into_iter()
            .map(|r| r.token)
            .collect();
        let predictions = DiseaseRanker::new().unwrap().rank_with_context(&tokens, &text);

        prop_assert!(predictions.len() <= 5);
        for prediction in &predictions {
            prop_assert!((0.0..=1.0).contains(&prediction.similarity));
            prop_assert!((0.0..=1.0).contains(&prediction.confidence_score));
        }
        for pair in predictions.windows(2) {
            prop_assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn test_classification_is_deterministic(text in description()) {
        let extractor = SymptomExtractor::new();
        let classifier = TriageClassifier::new();

        let first = classifier.classify(&extractor.extract(&text));
        let second = classifier.classify(&extractor.extract(&text));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_critical_criterion_forces_level_one(text in description()) {
        let records = SymptomExtractor::new().extract(&text);
        let classifier = TriageClassifier::new();
        let joined = records
            .iter()
            .map(|r| r.token.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let critical = classifier.check_resuscitation(&joined, &records);
        let result = classifier.classify(&records);

        if !records.is_empty() && !critical.is_empty() {
            prop_assert_eq!(result.level, 1);
            prop_assert_eq!(result.reasoning, critical);
        } else {
            prop_assert!(result.level > 1);
        }
    }
}
