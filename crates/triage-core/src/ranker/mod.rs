//! Condition ranking by TF-IDF similarity.
//!
//! Scoring:
//! - Cosine similarity against each catalog profile, noise below the threshold dropped
//! - Critical/high profiles boosted when the text carries escalation words
//! - Confidence blends similarity (70%) with matching keyword count (30%)

mod catalog;
mod space;

pub use catalog::*;
pub use space::*;

use thiserror::Error;

use crate::config::{ConfigError, RankerConfig};
use crate::models::{ConditionProfile, Prediction};

/// Ranker construction errors.
#[derive(Error, Debug)]
pub enum RankerError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type RankerResult<T> = Result<T, RankerError>;

/// Ranks catalog conditions against extracted symptom tokens.
#[derive(Debug, Clone)]
pub struct DiseaseRanker {
    catalog: Vec<ConditionProfile>,
    space: SimilaritySpace,
    config: RankerConfig,
}

impl DiseaseRanker {
    /// Create a ranker over the default catalog.
    pub fn new() -> RankerResult<Self> {
        Self::with_catalog(default_catalog(), RankerConfig::default())
    }

    /// Create a ranker over a custom catalog.
    ///
    /// The similarity space is fitted once here and never changes.
    pub fn with_catalog(catalog: Vec<ConditionProfile>, config: RankerConfig) -> RankerResult<Self> {
        validate_catalog(&catalog)?;
        config.validate()?;

        let documents: Vec<String> = catalog.iter().map(|p| p.document()).collect();
        let space = SimilaritySpace::fit(&documents);

        tracing::debug!(
            conditions = catalog.len(),
            vocabulary = space.vocabulary_len(),
            "Similarity space fitted"
        );

        Ok(Self {
            catalog,
            space,
            config,
        })
    }

    /// Rank conditions for the given symptom tokens.
    ///
    /// The joined tokens double as the text checked for escalation words.
    pub fn rank<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<Prediction> {
        let joined = join_tokens(tokens);
        self.rank_with_context(tokens, &joined)
    }

    /// Rank conditions, checking `raw_text` (the text before extraction)
    /// for escalation words.
    pub fn rank_with_context<S: AsRef<str>>(&self, tokens: &[S], raw_text: &str) -> Vec<Prediction> {
        if tokens.is_empty() {
            return Vec::new();
        }

        let query = self.space.transform(&join_tokens(tokens));
        let escalate = self.config.has_escalation(raw_text);

        let mut predictions: Vec<Prediction> = self
            .catalog
            .iter()
            .zip(self.space.similarities(&query))
            .filter(|(_, similarity)| *similarity > self.config.noise_threshold)
            .map(|(profile, similarity)| {
                let similarity = if escalate && profile.severity_tier.is_escalatable() {
                    (similarity * self.config.escalation_factor).min(1.0)
                } else {
                    similarity
                };
                let matching = profile.matching_keywords(tokens);
                let confidence = self.config.confidence(similarity, matching.len());
                Prediction::from_profile(profile, similarity, confidence, matching)
            })
            .collect();

        // Sort by similarity descending
        predictions.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        predictions.truncate(self.config.max_results);

        tracing::debug!(
            tokens = tokens.len(),
            predictions = predictions.len(),
            escalate,
            "Ranked conditions"
        );

        predictions
    }

    /// The catalog this ranker was built with.
    pub fn catalog(&self) -> &[ConditionProfile] {
        &self.catalog
    }

    /// Look up a catalog profile by id.
    pub fn profile(&self, id: &str) -> Option<&ConditionProfile> {
        self.catalog.iter().find(|p| p.id == id)
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    pub fn space(&self) -> &SimilaritySpace {
        &self.space
    }
}

fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}
