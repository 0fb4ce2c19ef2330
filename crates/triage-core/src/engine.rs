//! Assessment pipeline coordinating extraction, ranking and triage.
//!
//! Ranking and triage both consume the extracted symptoms but never each
//! other's output.

use thiserror::Error;

use crate::config::{ConfigError, EngineConfig};
use crate::extractor::{ExtractorError, SymptomExtractor};
use crate::models::{
    symptom_tokens, AssessmentRequest, Prediction, SymptomRecord, TriageAssessment, TriageResult,
};
use crate::ranker::{default_catalog, DiseaseRanker, RankerError};
use crate::triage::TriageClassifier;

/// Errors from a text preprocessor.
#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("Preprocessing produced empty text")]
    EmptyOutput,

    #[error("Preprocessing failed: {0}")]
    Failed(String),
}

/// Text normalisation applied before extraction.
///
/// Implementations must be shareable across threads; the engine holds one
/// instance for its whole lifetime.
pub trait TextPreprocessor: Send + Sync {
    fn preprocess(&self, text: &str) -> Result<String, PreprocessError>;
}

/// Engine construction errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Ranker error: {0}")]
    Ranker(#[from] RankerError),

    #[error("Extractor error: {0}")]
    Extractor(#[from] ExtractorError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Owns one extractor, ranker and classifier, plus an optional preprocessor.
pub struct TriageEngine {
    extractor: SymptomExtractor,
    ranker: DiseaseRanker,
    classifier: TriageClassifier,
    preprocessor: Option<Box<dyn TextPreprocessor>>,
    config: EngineConfig,
}

impl TriageEngine {
    /// Create an engine with default tables and configuration.
    pub fn new() -> EngineResult<Self> {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with default tables and a custom configuration.
    pub fn with_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let ranker = DiseaseRanker::with_catalog(default_catalog(), config.ranker.clone())?;
        Ok(Self::from_parts(
            SymptomExtractor::new(),
            ranker,
            TriageClassifier::new(),
            config,
        ))
    }

    /// Assemble an engine from pre-built components.
    pub fn from_parts(
        extractor: SymptomExtractor,
        ranker: DiseaseRanker,
        classifier: TriageClassifier,
        config: EngineConfig,
    ) -> Self {
        Self {
            extractor,
            ranker,
            classifier,
            preprocessor: None,
            config,
        }
    }

    /// Install a text preprocessor, run before extraction.
    pub fn with_preprocessor(mut self, preprocessor: impl TextPreprocessor + 'static) -> Self {
        self.preprocessor = Some(Box::new(preprocessor));
        self
    }

    /// Extract symptom records from free text.
    pub fn extract_symptoms(&self, text: &str) -> Vec<SymptomRecord> {
        let prepared = self.prepare(text);
        self.extractor.extract(&prepared)
    }

    /// Rank candidate conditions for free text.
    pub fn predict_conditions(&self, text: &str) -> Vec<Prediction> {
        let symptoms = self.extract_symptoms(text);
        self.rank(&symptoms, text)
    }

    /// Triage free text.
    pub fn classify(&self, text: &str) -> TriageResult {
        let symptoms = self.extract_symptoms(text);
        self.triage(&symptoms, text)
    }

    /// Run the whole pipeline once and bundle the outputs.
    pub fn assess(&self, request: &AssessmentRequest) -> TriageAssessment {
        let symptoms = self.extract_symptoms(&request.text);
        let predictions = self.rank(&symptoms, &request.text);
        let triage = self.triage(&symptoms, &request.text);

        let assessment =
            TriageAssessment::new(request.patient.clone(), symptoms, predictions, triage);

        tracing::info!(
            assessment_id = %assessment.assessment_id,
            level = assessment.triage.level,
            symptoms = assessment.symptoms.len(),
            predictions = assessment.predictions.len(),
            "Assessment complete"
        );

        assessment
    }

    pub fn extractor(&self) -> &SymptomExtractor {
        &self.extractor
    }

    pub fn ranker(&self) -> &DiseaseRanker {
        &self.ranker
    }

    pub fn classifier(&self) -> &TriageClassifier {
        &self.classifier
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn has_preprocessor(&self) -> bool {
        self.preprocessor.is_some()
    }

    fn rank(&self, symptoms: &[SymptomRecord], raw_text: &str) -> Vec<Prediction> {
        let tokens = symptom_tokens(symptoms);
        self.ranker.rank_with_context(&tokens, raw_text)
    }

    /// Classify the prepared symptoms. When preprocessing is active the
    /// result is never less urgent than the triage of the raw text.
    fn triage(&self, symptoms: &[SymptomRecord], raw_text: &str) -> TriageResult {
        let prepared = self.classifier.classify(symptoms);
        if !self.preprocessing_active() {
            return prepared;
        }

        let raw = self.classifier.classify(&self.extractor.extract(raw_text));
        if raw.level < prepared.level {
            tracing::debug!(
                raw_level = raw.level,
                prepared_level = prepared.level,
                "Raw text is more urgent than preprocessed text"
            );
            return raw;
        }
        prepared
    }

    fn preprocessing_active(&self) -> bool {
        self.preprocessor.is_some() && self.config.preprocess
    }

    /// Preprocessed text, or the raw text when preprocessing is off or fails.
    fn prepare(&self, text: &str) -> String {
        let preprocessor = match &self.preprocessor {
            Some(p) if self.config.preprocess => p,
            _ => return text.to_string(),
        };

        match preprocessor.preprocess(text) {
            Ok(prepared) => prepared,
            Err(e) => {
                tracing::warn!(error = %e, "Preprocessing failed, using raw text");
                text.to_string()
            }
        }
    }
}

impl std::fmt::Debug for TriageEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriageEngine")
            .field("extractor", &self.extractor)
            .field("ranker", &self.ranker)
            .field("classifier", &self.classifier)
            .field("preprocessor", &self.preprocessor.is_some())
            .field("config", &self.config)
            .finish()
    }
}
