//! Triage Core Library
//!
//! Symptom triage decision support: free-text symptom descriptions in,
//! categorized symptoms, ranked candidate conditions and a hospital triage
//! level out.
//!
//! # Architecture
//!
//! ```text
//! Free text → [Preprocessor] → SymptomExtractor
//!                                     │
//!                              symptom records
//!                                     │
//!                     ┌───────────────┴───────────────┐
//!                     │                               │
//!                     ▼                               ▼
//!              DiseaseRanker                  TriageClassifier
//!        TF-IDF cosine vs. catalog          rule cascade, level 1→5
//!                     │                               │
//!                     ▼                               ▼
//!           predictions (≤ 5)                  TriageResult
//!                     │                               │
//!                     └───────────────┬───────────────┘
//!                                     ▼
//!                             TriageAssessment
//! ```
//!
//! # Core Principle
//!
//! **Decision support only.** The catalog and rule tables are fixed,
//! hand-authored references; the output never replaces a clinician.
//!
//! # Modules
//!
//! - [`models`]: Domain types (SymptomRecord, Prediction, TriageResult, etc.)
//! - [`extractor`]: Keyword/severity/urgency symptom extraction
//! - [`ranker`]: Condition catalog and TF-IDF similarity ranking
//! - [`triage`]: Rule-cascade triage classifier
//! - [`engine`]: Pipeline coordinator and preprocessor seam
//! - [`config`]: JSON-loadable engine configuration
//! - [`report`]: JSON and text rendering

pub mod config;
pub mod engine;
pub mod extractor;
pub mod models;
pub mod ranker;
pub mod report;
pub mod triage;

// Re-export commonly used types
pub use config::{ConfigError, EngineConfig, RankerConfig};
pub use engine::{EngineError, PreprocessError, TextPreprocessor, TriageEngine};
pub use extractor::SymptomExtractor;
pub use models::{
    AssessmentRequest, ConditionProfile, PatientInfo, Prediction, Severity, SeverityTier,
    SymptomCategory, SymptomRecord, TriageAssessment, TriageLevel, TriageResult,
};
pub use ranker::DiseaseRanker;
pub use triage::TriageClassifier;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum TriageError {
    #[error("Initialization error: {0}")]
    InitializationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<engine::EngineError> for TriageError {
    fn from(e: engine::EngineError) -> Self {
        TriageError::InitializationError(e.to_string())
    }
}

impl From<config::ConfigError> for TriageError {
    fn from(e: config::ConfigError) -> Self {
        TriageError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for TriageError {
    fn from(e: serde_json::Error) -> Self {
        TriageError::SerializationError(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create an engine with the default tables.
#[uniffi::export]
pub fn open_triage_engine() -> Result<Arc<TriageCore>, TriageError> {
    let engine = TriageEngine::new()?;
    Ok(Arc::new(TriageCore { engine }))
}

/// Create an engine from a JSON configuration string.
#[uniffi::export]
pub fn open_triage_engine_with_config(config_json: String) -> Result<Arc<TriageCore>, TriageError> {
    let config = EngineConfig::from_json_str(&config_json)?;
    let engine = TriageEngine::with_config(config)?;
    Ok(Arc::new(TriageCore { engine }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe engine wrapper for FFI. The engine is immutable, so no lock.
#[derive(uniffi::Object)]
pub struct TriageCore {
    engine: TriageEngine,
}

impl std::fmt::Debug for TriageCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriageCore").finish_non_exhaustive()
    }
}

#[uniffi::export]
impl TriageCore {
    /// Extract categorized symptoms from free text.
    pub fn extract_symptoms(&self, text: String) -> Vec<FfiSymptom> {
        self.engine
            .extract_symptoms(&text)
            .into_iter()
            .map(|s| s.into())
            .collect()
    }

    /// Rank candidate conditions (at most five).
    pub fn predict_conditions(&self, text: String) -> Vec<FfiPrediction> {
        self.engine
            .predict_conditions(&text)
            .into_iter()
            .map(|p| p.into())
            .collect()
    }

    /// Classify the triage level of free text.
    pub fn classify_triage(&self, text: String) -> FfiTriageResult {
        self.engine.classify(&text).into()
    }

    /// Run the full pipeline.
    pub fn assess(
        &self,
        text: String,
        patient_name: Option<String>,
        patient_age: Option<u32>,
    ) -> FfiAssessment {
        let request = build_request(text, patient_name, patient_age);
        self.engine.assess(&request).into()
    }

    /// Run the full pipeline and export the assessment as JSON.
    pub fn assess_json(
        &self,
        text: String,
        patient_name: Option<String>,
        patient_age: Option<u32>,
    ) -> Result<String, TriageError> {
        let request = build_request(text, patient_name, patient_age);
        Ok(self.engine.assess(&request).to_json()?)
    }

    /// Advice text for the top prediction of free text.
    pub fn medical_advice(&self, text: String) -> String {
        report::medical_advice(&self.engine.predict_conditions(&text))
    }
}

fn build_request(
    text: String,
    patient_name: Option<String>,
    patient_age: Option<u32>,
) -> AssessmentRequest {
    AssessmentRequest::new(text).with_patient(PatientInfo::new(patient_name, patient_age))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe symptom record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSymptom {
    pub token: String,
    pub category: String,
    pub severity: String,
    pub urgency_level: u8,
}

impl From<SymptomRecord> for FfiSymptom {
    fn from(record: SymptomRecord) -> Self {
        Self {
            token: record.token,
            category: record.category.label().to_string(),
            severity: record.severity.label().to_string(),
            urgency_level: record.urgency_level,
        }
    }
}

/// FFI-safe prediction.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPrediction {
    pub condition_id: String,
    pub name: String,
    pub similarity: f64,
    pub confidence_score: f64,
    pub severity_tier: String,
    pub matching_symptoms: Vec<String>,
    pub description: String,
    pub recommendations: Vec<String>,
}

impl From<Prediction> for FfiPrediction {
    fn from(prediction: Prediction) -> Self {
        Self {
            condition_id: prediction.condition_id,
            name: prediction.name,
            similarity: prediction.similarity,
            confidence_score: prediction.confidence_score,
            severity_tier: prediction.severity_tier.label().to_string(),
            matching_symptoms: prediction.matching_symptoms,
            description: prediction.description,
            recommendations: prediction.recommendations,
        }
    }
}

/// FFI-safe triage result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTriageResult {
    pub level: u8,
    pub name: String,
    pub color_code: String,
    pub max_wait_time: String,
    pub description: String,
    pub recommendation: String,
    pub reasoning: Vec<String>,
    pub immediate_interventions: Vec<String>,
    pub vital_signs_required: bool,
}

impl From<TriageResult> for FfiTriageResult {
    fn from(result: TriageResult) -> Self {
        Self {
            level: result.level,
            name: result.name,
            color_code: result.color_code,
            max_wait_time: result.max_wait_time,
            description: result.description,
            recommendation: result.recommendation,
            reasoning: result.reasoning,
            immediate_interventions: result.immediate_interventions,
            vital_signs_required: result.vital_signs_required,
        }
    }
}

/// FFI-safe assessment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAssessment {
    pub assessment_id: String,
    pub assessed_at: String,
    pub patient_name: Option<String>,
    pub patient_age: Option<u32>,
    pub symptoms: Vec<FfiSymptom>,
    pub predictions: Vec<FfiPrediction>,
    pub triage: FfiTriageResult,
}

impl From<TriageAssessment> for FfiAssessment {
    fn from(assessment: TriageAssessment) -> Self {
        let (patient_name, patient_age) = match assessment.patient {
            Some(patient) => (patient.name, patient.age),
            None => (None, None),
        };

        Self {
            assessment_id: assessment.assessment_id,
            assessed_at: assessment.assessed_at,
            patient_name,
            patient_age,
            symptoms: assessment.symptoms.into_iter().map(|s| s.into()).collect(),
            predictions: assessment.predictions.into_iter().map(|p| p.into()).collect(),
            triage: assessment.triage.into(),
        }
    }
}
