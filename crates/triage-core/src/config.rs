//! Engine configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```json
//! { "ranker": { "max_results": 3 }, "preprocess": false }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::clamp_unit;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Ranking thresholds and weights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RankerConfig {
    /// Similarities at or below this are dropped
    pub noise_threshold: f64,
    /// Maximum predictions returned
    pub max_results: usize,
    /// Multiplier for critical/high conditions when escalation words appear
    pub escalation_factor: f64,
    /// Words in the raw text that trigger escalation
    pub escalation_terms: Vec<String>,
    /// Weight of similarity in the confidence score
    pub similarity_weight: f64,
    /// Weight of the matching keyword ratio in the confidence score
    pub symptom_weight: f64,
    /// Matching keyword count at which the ratio saturates
    pub symptom_saturation: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            noise_threshold: 0.10,
            max_results: 5,
            escalation_factor: 1.3,
            escalation_terms: ["severo", "intenso", "agudo", "insoportable", "crítico"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            similarity_weight: 0.7,
            symptom_weight: 0.3,
            symptom_saturation: 3,
        }
    }
}

impl RankerConfig {
    /// Reject values that would break the [0, 1] score range.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..1.0).contains(&self.noise_threshold) {
            return Err(ConfigError::Invalid(format!(
                "noise_threshold must be in [0, 1), got {}",
                self.noise_threshold
            )));
        }
        if self.max_results == 0 {
            return Err(ConfigError::Invalid("max_results must be at least 1".into()));
        }
        if !self.escalation_factor.is_finite() || self.escalation_factor < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "escalation_factor must be >= 1, got {}",
                self.escalation_factor
            )));
        }
        if self.similarity_weight < 0.0
            || self.symptom_weight < 0.0
            || (self.similarity_weight + self.symptom_weight - 1.0).abs() > 1e-9
        {
            return Err(ConfigError::Invalid(format!(
                "confidence weights must be non-negative and sum to 1, got {} + {}",
                self.similarity_weight, self.symptom_weight
            )));
        }
        if self.symptom_saturation == 0 {
            return Err(ConfigError::Invalid(
                "symptom_saturation must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Whether the text contains any escalation word.
    pub fn has_escalation(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.escalation_terms
            .iter()
            .any(|term| !term.is_empty() && text.contains(term.as_str()))
    }

    /// Blend similarity with the saturated matching keyword ratio.
    pub fn confidence(&self, similarity: f64, matching: usize) -> f64 {
        let ratio = (matching as f64 / self.symptom_saturation.max(1) as f64).min(1.0);
        clamp_unit(self.similarity_weight * similarity + self.symptom_weight * ratio)
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub ranker: RankerConfig,
    /// Run the text preprocessor (when one is installed) before extraction
    pub preprocess: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ranker: RankerConfig::default(),
            preprocess: true,
        }
    }
}

impl EngineConfig {
    /// Load and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "Loaded engine configuration");
        Ok(config)
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.ranker.validate()
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ranker.max_results, 5);
        assert!(config.preprocess);
    }

    #[test]
    fn test_has_escalation() {
        let config = RankerConfig::default();
        assert!(config.has_escalation("dolor SEVERO en el pecho"));
        assert!(config.has_escalation("estado crítico"));
        assert!(!config.has_escalation("dolor leve"));
    }

    #[test]
    fn test_confidence_saturates() {
        let config = RankerConfig::default();
        assert!((config.confidence(0.5, 0) - 0.35).abs() < 1e-9);
        assert!((config.confidence(0.5, 3) - 0.65).abs() < 1e-9);
        assert!((config.confidence(0.5, 10) - 0.65).abs() < 1e-9);
        assert!((config.confidence(1.0, 3) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            EngineConfig::from_json_str(r#"{"ranker": {"max_results": 3}, "preprocess": false}"#)
                .unwrap();
        assert_eq!(config.ranker.max_results, 3);
        assert!((config.ranker.noise_threshold - 0.10).abs() < 1e-12);
        assert!(!config.preprocess);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = EngineConfig::from_json_str(r#"{"ranker": {"max_results": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err =
            EngineConfig::from_json_str(r#"{"ranker": {"similarity_weight": 0.9}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err =
            EngineConfig::from_json_str(r#"{"ranker": {"escalation_factor": 0.5}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = EngineConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"ranker": {{"noise_threshold": 0.2}}}}"#).unwrap();

        let config = EngineConfig::from_json_file(file.path()).unwrap();
        assert!((config.ranker.noise_threshold - 0.2).abs() < 1e-12);

        let missing = EngineConfig::from_json_file("/nonexistent/triage.json").unwrap_err();
        assert!(matches!(missing, ConfigError::Io(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EngineConfig::default();
        let parsed = EngineConfig::from_json_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
