//! Assessment request and combined result.

use serde::{Deserialize, Serialize};

use super::prediction::Prediction;
use super::symptom::SymptomRecord;
use super::triage::TriageResult;

/// Optional patient metadata passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientInfo {
    /// Patient name
    pub name: Option<String>,
    /// Age in years
    pub age: Option<u32>,
}

impl PatientInfo {
    pub fn new(name: Option<String>, age: Option<u32>) -> Self {
        Self { name, age }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }
}

/// Input for a full assessment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssessmentRequest {
    /// Free-text symptom description
    pub text: String,
    /// Pass-through patient metadata
    pub patient: Option<PatientInfo>,
}

impl AssessmentRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            patient: None,
        }
    }

    pub fn with_patient(mut self, patient: PatientInfo) -> Self {
        self.patient = if patient.is_empty() { None } else { Some(patient) };
        self
    }
}

/// Symptoms, predictions and triage for one request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageAssessment {
    /// Unique assessment ID
    pub assessment_id: String,
    /// Assessment timestamp (RFC 3339)
    pub assessed_at: String,
    /// Pass-through patient metadata
    pub patient: Option<PatientInfo>,
    /// Extracted symptoms
    pub symptoms: Vec<SymptomRecord>,
    /// Ranked candidate conditions (at most 5)
    pub predictions: Vec<Prediction>,
    /// Triage classification
    pub triage: TriageResult,
}

impl TriageAssessment {
    /// Create an assessment with a fresh ID and timestamp.
    pub fn new(
        patient: Option<PatientInfo>,
        symptoms: Vec<SymptomRecord>,
        predictions: Vec<Prediction>,
        triage: TriageResult,
    ) -> Self {
        Self {
            assessment_id: uuid::Uuid::new_v4().to_string(),
            assessed_at: chrono::Utc::now().to_rfc3339(),
            patient,
            symptoms,
            predictions,
            triage,
        }
    }

    /// Highest-ranked prediction, if any.
    pub fn top_prediction(&self) -> Option<&Prediction> {
        self.predictions.first()
    }
}
