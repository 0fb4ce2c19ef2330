//! Assessment rendering: JSON and plain-text summaries.

use crate::models::{Prediction, TriageAssessment};

/// Advice shown when no condition could be ranked.
pub const NO_ADVICE: &str =
    "No se pueden generar recomendaciones específicas. Consulte con un profesional médico.";

const DISCLAIMER: &str = "IMPORTANTE: Estas son recomendaciones generales. Siempre consulte con un profesional médico para un diagnóstico y tratamiento adecuados.";

impl TriageAssessment {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse an exported assessment.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Advice text for the top-ranked prediction.
pub fn medical_advice(predictions: &[Prediction]) -> String {
    let Some(top) = predictions.first() else {
        return NO_ADVICE.to_string();
    };

    let mut advice = format!(
        "Basado en los síntomas, la condición más probable es: {}\n\n",
        top.name
    );
    advice.push_str(&format!("Descripción: {}\n\n", top.description));
    advice.push_str("Recomendaciones inmediatas:\n");
    for (i, recommendation) in top.recommendations.iter().enumerate() {
        advice.push_str(&format!("{}. {}\n", i + 1, recommendation));
    }
    advice.push('\n');
    advice.push_str(DISCLAIMER);

    advice
}

/// Multi-line human-readable summary of an assessment.
pub fn render_text(assessment: &TriageAssessment) -> String {
    let mut out = String::new();

    out.push_str(&format!("Evaluación {}\n", assessment.assessment_id));
    out.push_str(&format!("Fecha: {}\n", assessment.assessed_at));
    if let Some(patient) = &assessment.patient {
        if let Some(name) = &patient.name {
            out.push_str(&format!("Paciente: {}\n", name));
        }
        if let Some(age) = patient.age {
            out.push_str(&format!("Edad: {} años\n", age));
        }
    }

    // Symptoms
    out.push_str("\nSíntomas detectados:\n");
    if assessment.symptoms.is_empty() {
        out.push_str("  (ninguno)\n");
    }
    for symptom in &assessment.symptoms {
        out.push_str(&format!(
            "  - {} [{}, {}]\n",
            symptom.token,
            symptom.category.label(),
            symptom.severity.label()
        ));
    }

    // Predictions
    out.push_str("\nCondiciones posibles:\n");
    if assessment.predictions.is_empty() {
        out.push_str("  (ninguna)\n");
    }
    for (i, prediction) in assessment.predictions.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {} - confianza {:.1}% ({})\n",
            i + 1,
            prediction.name,
            prediction.confidence_percent(),
            prediction.severity_tier.label()
        ));
    }

    // Triage
    let triage = &assessment.triage;
    out.push_str(&format!(
        "\nTriaje: Nivel {} - {} ({})\n",
        triage.level, triage.name, triage.color_code
    ));
    out.push_str(&format!("Tiempo máximo de espera: {}\n", triage.max_wait_time));
    out.push_str(&format!("{}\n", triage.recommendation));
    out.push_str("Motivos:\n");
    for reason in &triage.reasoning {
        out.push_str(&format!("  - {}\n", reason));
    }
    out.push_str("Intervenciones inmediatas:\n");
    for intervention in &triage.immediate_interventions {
        out.push_str(&format!("  - {}\n", intervention));
    }

    out.push('\n');
    out.push_str(&medical_advice(&assessment.predictions));
    out.push('\n');

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ConditionProfile, PatientInfo, Severity, SeverityTier, SymptomCategory, SymptomRecord,
        TriageLevel, TriageResult,
    };

    fn prediction() -> Prediction {
        let profile = ConditionProfile::new(
            "resfriado_comun",
            SeverityTier::Low,
            "Infección viral de vías respiratorias superiores",
        )
        .with_keywords(&["tos"])
        .with_recommendations(&["Reposo", "Hidratación abundante"]);
        Prediction::from_profile(&profile, 0.4, 0.38, vec!["tos".into()])
    }

    fn assessment() -> TriageAssessment {
        TriageAssessment::new(
            Some(PatientInfo::new(Some("Ana".into()), Some(34))),
            vec![SymptomRecord::new("tos", SymptomCategory::Respiratory, Severity::Mild, 4)],
            vec![prediction()],
            TriageResult::new(TriageLevel::NonUrgent, vec!["Sin hallazgos".into()]),
        )
    }

    #[test]
    fn test_advice_without_predictions() {
        assert_eq!(medical_advice(&[]), NO_ADVICE);
    }

    #[test]
    fn test_advice_numbers_recommendations() {
        let advice = medical_advice(&[prediction()]);
        assert!(advice.starts_with("Basado en los síntomas, la condición más probable es: Resfriado Comun"));
        assert!(advice.contains("1. Reposo\n2. Hidratación abundante\n"));
        assert!(advice.ends_with(DISCLAIMER));
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&assessment());
        assert!(text.contains("Paciente: Ana"));
        assert!(text.contains("Edad: 34 años"));
        assert!(text.contains("  - tos [respiratorio, leve]"));
        assert!(text.contains("  1. Resfriado Comun - confianza 38.0%"));
        assert!(text.contains("Triaje: Nivel 5 - No urgente (Azul)"));
        assert!(text.contains("  - Sin hallazgos"));
    }

    #[test]
    fn test_json_export() {
        let assessment = assessment();
        let json = assessment.to_json().unwrap();
        assert!(json.contains("\"category\": \"respiratory\""));

        let parsed = TriageAssessment::from_json(&json).unwrap();
        assert_eq!(parsed, assessment);
    }
}
