//! Ranked condition predictions.

use serde::{Deserialize, Serialize};

use super::condition::{ConditionProfile, SeverityTier};

/// A candidate condition with its similarity and confidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    /// Catalog id of the condition
    pub condition_id: String,
    /// Display name derived from the id
    pub name: String,
    /// Cosine similarity after escalation (0.0 - 1.0)
    pub similarity: f64,
    /// Blend of similarity and matching keyword count (0.0 - 1.0)
    pub confidence_score: f64,
    /// Condition severity
    pub severity_tier: SeverityTier,
    /// Catalog keywords matched by the input tokens (sorted)
    pub matching_symptoms: Vec<String>,
    /// Condition description
    pub description: String,
    /// Ordered recommendations
    pub recommendations: Vec<String>,
}

impl Prediction {
    /// Build a prediction for a catalog entry. Scores are clamped to [0, 1].
    pub fn from_profile(
        profile: &ConditionProfile,
        similarity: f64,
        confidence_score: f64,
        matching_symptoms: Vec<String>,
    ) -> Self {
        Self {
            condition_id: profile.id.clone(),
            name: profile.display_name(),
            similarity: clamp_unit(similarity),
            confidence_score: clamp_unit(confidence_score),
            severity_tier: profile.severity_tier,
            matching_symptoms,
            description: profile.description.clone(),
            recommendations: profile.recommendations.clone(),
        }
    }

    /// Confidence as a percentage, for display.
    pub fn confidence_percent(&self) -> f64 {
        self.confidence_score * 100.0
    }
}

/// Clamp a score into [0, 1]; NaN maps to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(1.4), 1.0);
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert!((clamp_unit(0.42) - 0.42).abs() < 1e-12);
    }

    #[test]
    fn test_from_profile_clamps_scores() {
        let profile = ConditionProfile::new("neumonia", SeverityTier::ModerateHigh, "Infección pulmonar")
            .with_recommendations(&["Reposo en cama"]);
        let prediction = Prediction::from_profile(&profile, 1.2, 1.05, vec!["tos".into()]);

        assert_eq!(prediction.name, "Neumonia");
        assert_eq!(prediction.similarity, 1.0);
        assert_eq!(prediction.confidence_score, 1.0);
        assert_eq!(prediction.recommendations, vec!["Reposo en cama"]);
        assert!((prediction.confidence_percent() - 100.0).abs() < 1e-9);
    }
}
