//! Symptom extraction from free text.
//!
//! Pipeline: Lowercase → Keyword scan per category → Severity → Urgency → Dedup

mod lexicon;

pub use lexicon::*;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::models::{SymptomCategory, SymptomRecord};

/// Extractor errors.
#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Invalid urgency pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type ExtractorResult<T> = Result<T, ExtractorError>;

static DEFAULT_URGENCY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    default_urgency_patterns()
        .iter()
        .map(|p| compile_pattern(p).expect("Invalid default urgency pattern"))
        .collect()
});

/// Maps raw text to categorized symptom records.
#[derive(Debug, Clone)]
pub struct SymptomExtractor {
    categories: Vec<CategoryLexicon>,
    urgency_patterns: Vec<Regex>,
}

impl Default for SymptomExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SymptomExtractor {
    /// Create an extractor with the default Spanish lexicon.
    pub fn new() -> Self {
        Self {
            categories: SymptomLexicon::default().categories,
            urgency_patterns: DEFAULT_URGENCY_PATTERNS.clone(),
        }
    }

    /// Create an extractor from a custom lexicon.
    pub fn with_lexicon(lexicon: SymptomLexicon) -> ExtractorResult<Self> {
        let urgency_patterns = lexicon
            .urgency_patterns
            .iter()
            .map(|p| compile_pattern(p))
            .collect::<ExtractorResult<Vec<_>>>()?;

        Ok(Self {
            categories: lexicon.categories,
            urgency_patterns,
        })
    }

    /// Extract symptom records from text.
    ///
    /// Empty or whitespace-only input yields no records.
    pub fn extract(&self, text: &str) -> Vec<SymptomRecord> {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return Vec::new();
        }

        let urgency_level = self.urgency_level(&text);
        let mut seen: HashSet<(String, SymptomCategory)> = HashSet::new();
        let mut records = Vec::new();

        for lexicon in &self.categories {
            let severity = lexicon.severity.assess(&text).unwrap_or_default();

            for keyword in &lexicon.keywords {
                if !text.contains(keyword.as_str()) {
                    continue;
                }
                if !seen.insert((keyword.clone(), lexicon.category)) {
                    continue;
                }
                records.push(SymptomRecord::new(
                    keyword.clone(),
                    lexicon.category,
                    severity,
                    urgency_level,
                ));
            }
        }

        tracing::debug!(
            symptoms = records.len(),
            urgency_level,
            "Extracted symptoms"
        );

        records
    }

    /// Number of urgency patterns matching anywhere in the text.
    pub fn urgency_score(&self, text: &str) -> usize {
        let text = text.to_lowercase();
        self.urgency_patterns
            .iter()
            .filter(|p| p.is_match(&text))
            .count()
    }

    /// Map the urgency score to a level: 1 (critical) to 4 (minor).
    pub fn urgency_level(&self, text: &str) -> u8 {
        match self.urgency_score(text) {
            0 => 4,
            1 => 3,
            2 => 2,
            _ => 1,
        }
    }

    /// Category tables in scan order.
    pub fn categories(&self) -> &[CategoryLexicon] {
        &self.categories
    }
}

fn compile_pattern(pattern: &str) -> ExtractorResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ExtractorError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn tokens(records: &[SymptomRecord]) -> Vec<(&str, SymptomCategory)> {
        records.iter().map(|r| r.key()).collect()
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        let extractor = SymptomExtractor::new();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("   \n\t ").is_empty());
    }

    #[test]
    fn test_chest_pain_case() {
        let extractor = SymptomExtractor::new();
        let records = extractor
            .extract("Dolor de pecho severo, dificultad para respirar, sudoración, nausea");

        assert_eq!(
            tokens(&records),
            vec![
                ("dolor", SymptomCategory::Pain),
                ("respirar", SymptomCategory::Respiratory),
                ("pecho", SymptomCategory::Respiratory),
                ("dificultad", SymptomCategory::Respiratory),
                ("sudor", SymptomCategory::Cardiovascular),
                ("nausea", SymptomCategory::Digestive),
            ]
        );

        // "severo" is a pain indicator only
        assert_eq!(records[0].severity, Severity::Severe);
        assert!(records[1..].iter().all(|r| r.severity == Severity::Moderate));

        // Only the intensity pattern matches
        assert!(records.iter().all(|r| r.urgency_level == 3));
    }

    #[test]
    fn test_mild_indicators() {
        let extractor = SymptomExtractor::new();
        let records = extractor.extract("tos leve, secreción nasal, dolor de garganta leve");

        assert_eq!(
            tokens(&records),
            vec![("dolor", SymptomCategory::Pain), ("tos", SymptomCategory::Respiratory)]
        );
        assert!(records.iter().all(|r| r.severity == Severity::Mild));
        assert!(records.iter().all(|r| r.urgency_level == 4));
    }

    #[test]
    fn test_same_keyword_in_two_categories() {
        let extractor = SymptomExtractor::new();
        let records = extractor.extract("mareo");

        assert_eq!(
            tokens(&records),
            vec![
                ("mareo", SymptomCategory::Cardiovascular),
                ("mareo", SymptomCategory::Neurological),
            ]
        );
    }

    #[test]
    fn test_duplicate_keywords_are_collapsed() {
        let mut lexicon = SymptomLexicon::default();
        lexicon.categories[0].keywords.push("dolor".into());
        let extractor = SymptomExtractor::with_lexicon(lexicon).unwrap();

        let records = extractor.extract("dolor y mas dolor");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_urgency_levels() {
        let extractor = SymptomExtractor::new();
        assert_eq!(extractor.urgency_level("me duele un poco"), 4);
        assert_eq!(extractor.urgency_level("dolor intenso"), 3);
        assert_eq!(extractor.urgency_level("dolor intenso, es urgente"), 2);
        assert_eq!(extractor.urgency_level("dolor insoportable, no puedo moverme, hay sangre"), 1);
    }

    #[test]
    fn test_urgency_uses_word_boundaries() {
        let extractor = SymptomExtractor::new();
        // "fuertemente" is not the word "fuerte"
        assert_eq!(extractor.urgency_score("respira fuertemente"), 0);
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let lexicon = SymptomLexicon {
            urgency_patterns: vec!["(unclosed".into()],
            ..SymptomLexicon::default()
        };
        let err = SymptomExtractor::with_lexicon(lexicon).unwrap_err();
        assert!(matches!(err, ExtractorError::InvalidPattern { .. }));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let extractor = SymptomExtractor::new();
        let text = "mareo, vision borrosa y dolor de cabeza fuerte";
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }
}
