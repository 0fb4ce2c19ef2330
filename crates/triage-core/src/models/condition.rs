//! Condition catalog models.

use serde::{Deserialize, Serialize};

/// Condition-level severity tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum SeverityTier {
    Low,
    LowModerate,
    Moderate,
    ModerateHigh,
    High,
    Critical,
}

impl SeverityTier {
    /// Tiers whose similarity is boosted when the text carries escalation words.
    pub fn is_escalatable(&self) -> bool {
        matches!(self, SeverityTier::Critical | SeverityTier::High)
    }

    /// Spanish label for display.
    pub fn label(&self) -> &'static str {
        match self {
            SeverityTier::Low => "leve",
            SeverityTier::LowModerate => "leve-moderado",
            SeverityTier::Moderate => "moderado",
            SeverityTier::ModerateHigh => "moderado-alto",
            SeverityTier::High => "alto",
            SeverityTier::Critical => "critico",
        }
    }
}

/// A single entry of the condition catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionProfile {
    /// Unique identifier (snake_case, e.g. "infarto_agudo_miocardio")
    pub id: String,
    /// Symptom keywords characteristic of the condition
    pub keywords: Vec<String>,
    /// Condition severity
    pub severity_tier: SeverityTier,
    /// Short human-readable description
    pub description: String,
    /// Ordered recommendations shown with a prediction
    pub recommendations: Vec<String>,
}

impl ConditionProfile {
    /// Create a profile with required fields.
    pub fn new(id: impl Into<String>, severity_tier: SeverityTier, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            keywords: Vec::new(),
            severity_tier,
            description: description.into(),
            recommendations: Vec::new(),
        }
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn with_recommendations(mut self, recommendations: &[&str]) -> Self {
        self.recommendations = recommendations.iter().map(|r| r.to_string()).collect();
        self
    }

    /// Display name derived from the id ("asma_bronquial" → "Asma Bronquial").
    pub fn display_name(&self) -> String {
        self.id
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Text the similarity space is fitted on: keywords followed by the description.
    pub fn document(&self) -> String {
        format!("{} {}", self.keywords.join(" "), self.description)
    }

    /// Keywords that are substrings of, or contain, any of the given tokens.
    pub fn matching_keywords<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        let mut matching: Vec<String> = self
            .keywords
            .iter()
            .filter(|keyword| {
                tokens.iter().any(|token| {
                    let token = token.as_ref();
                    !token.is_empty() && (token.contains(keyword.as_str()) || keyword.contains(token))
                })
            })
            .cloned()
            .collect();
        matching.sort();
        matching.dedup();
        matching
    }
}
