//! Symptom records produced by the extractor.

use serde::{Deserialize, Serialize};

/// Body system a symptom keyword belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SymptomCategory {
    Pain,
    Respiratory,
    Cardiovascular,
    Neurological,
    Digestive,
}

impl SymptomCategory {
    /// All categories in extraction order.
    pub const ALL: [SymptomCategory; 5] = [
        SymptomCategory::Pain,
        SymptomCategory::Respiratory,
        SymptomCategory::Cardiovascular,
        SymptomCategory::Neurological,
        SymptomCategory::Digestive,
    ];

    /// Spanish label used in reasoning text.
    pub fn label(&self) -> &'static str {
        match self {
            SymptomCategory::Pain => "dolor",
            SymptomCategory::Respiratory => "respiratorio",
            SymptomCategory::Cardiovascular => "cardiovascular",
            SymptomCategory::Neurological => "neurologico",
            SymptomCategory::Digestive => "digestivo",
        }
    }
}

impl std::fmt::Display for SymptomCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Symptom-level severity. Moderate when the text gives no indication.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    #[default]
    Moderate,
    Severe,
}

impl Severity {
    /// Spanish label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Mild => "leve",
            Severity::Moderate => "moderado",
            Severity::Severe => "severo",
        }
    }
}

/// A single symptom found in the patient's text.
///
/// Records are only built by the extractor and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomRecord {
    /// Matched keyword (lowercase)
    pub token: String,
    /// Body system of the keyword
    pub category: SymptomCategory,
    /// Severity assessed from the whole text
    pub severity: Severity,
    /// Text-wide urgency score, 1 (critical) to 4 (minor)
    pub urgency_level: u8,
}

impl SymptomRecord {
    pub fn new(
        token: impl Into<String>,
        category: SymptomCategory,
        severity: Severity,
        urgency_level: u8,
    ) -> Self {
        Self {
            token: token.into(),
            category,
            severity,
            urgency_level,
        }
    }

    /// Identity used for deduplication.
    pub fn key(&self) -> (&str, SymptomCategory) {
        (&self.token, self.category)
    }

    pub fn is_severe(&self) -> bool {
        self.severity == Severity::Severe
    }
}

/// Collect the tokens of a record list, in order.
pub fn symptom_tokens(records: &[SymptomRecord]) -> Vec<String> {
    records.iter().map(|r| r.token.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&SymptomCategory::Cardiovascular).unwrap();
        assert_eq!(json, "\"cardiovascular\"");

        let back: SymptomCategory = serde_json::from_str("\"neurological\"").unwrap();
        assert_eq!(back, SymptomCategory::Neurological);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Severe > Severity::Moderate);
        assert!(Severity::Moderate > Severity::Mild);
        assert_eq!(Severity::default(), Severity::Moderate);
    }

    #[test]
    fn test_record_key() {
        let record = SymptomRecord::new("dolor", SymptomCategory::Pain, Severity::Severe, 3);
        assert_eq!(record.key(), ("dolor", SymptomCategory::Pain));
        assert!(record.is_severe());
    }

    #[test]
    fn test_symptom_tokens_keeps_order() {
        let records = vec![
            SymptomRecord::new("dolor", SymptomCategory::Pain, Severity::Mild, 4),
            SymptomRecord::new("tos", SymptomCategory::Respiratory, Severity::Mild, 4),
        ];
        assert_eq!(symptom_tokens(&records), vec!["dolor", "tos"]);
    }
}
