//! Keyword and severity tables for symptom extraction.
//!
//! Defaults are Spanish and unaccented, matching how patients type on
//! mobile keyboards. Indicators are plain substrings of the lowercased text.

use serde::{Deserialize, Serialize};

use crate::models::{Severity, SymptomCategory};

/// Three-tier severity indicator table for one category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SeverityIndicators {
    pub severe: Vec<String>,
    pub moderate: Vec<String>,
    pub mild: Vec<String>,
}

impl SeverityIndicators {
    pub fn new(severe: &[&str], moderate: &[&str], mild: &[&str]) -> Self {
        Self {
            severe: to_owned(severe),
            moderate: to_owned(moderate),
            mild: to_owned(mild),
        }
    }

    /// First tier (severe, then moderate, then mild) with an indicator in `text`.
    pub fn assess(&self, text: &str) -> Option<Severity> {
        [
            (Severity::Severe, &self.severe),
            (Severity::Moderate, &self.moderate),
            (Severity::Mild, &self.mild),
        ]
        .into_iter()
        .find(|(_, indicators)| indicators.iter().any(|i| text.contains(i.as_str())))
        .map(|(severity, _)| severity)
    }
}

/// Keywords and severity indicators of a single category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryLexicon {
    pub category: SymptomCategory,
    pub keywords: Vec<String>,
    pub severity: SeverityIndicators,
}

impl CategoryLexicon {
    pub fn new(category: SymptomCategory, keywords: &[&str], severity: SeverityIndicators) -> Self {
        Self {
            category,
            keywords: to_owned(keywords),
            severity,
        }
    }
}

/// Full extraction configuration: category tables plus urgency patterns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomLexicon {
    /// Category tables, scanned in order
    pub categories: Vec<CategoryLexicon>,
    /// Urgency trigger patterns (regular expressions)
    pub urgency_patterns: Vec<String>,
}

impl Default for SymptomLexicon {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            urgency_patterns: default_urgency_patterns(),
        }
    }
}

/// Intensity, incapacity, emergency and haemorrhage phrases.
pub fn default_urgency_patterns() -> Vec<String> {
    to_owned(&[
        r"\b(severo|intenso|fuerte|insoportable|terrible)\b",
        r"\b(no puedo|imposible|muy dificil)\b",
        r"\b(emergencia|urgente|inmediato)\b",
        r"\b(sangre|hemorragia|sangrando)\b",
    ])
}

fn default_categories() -> Vec<CategoryLexicon> {
    vec![
        CategoryLexicon::new(
            SymptomCategory::Pain,
            &[
                "dolor", "duele", "doloroso", "molestia", "punzada", "pinchazo", "quemazon",
                "ardor", "calambre", "opresion", "presion",
            ],
            SeverityIndicators::new(
                &["severo", "intenso", "fuerte", "insoportable", "terrible", "agudo"],
                &["moderado", "medio", "regular", "constante"],
                &["leve", "ligero", "poco", "suave"],
            ),
        ),
        CategoryLexicon::new(
            SymptomCategory::Respiratory,
            &[
                "respirar", "respiro", "aire", "pecho", "pulmon", "tos", "toser", "ahogar",
                "ahogo", "falta", "dificultad", "jadeo", "silbido",
            ],
            SeverityIndicators::new(
                &["no puedo", "imposible", "muy dificil", "ahogo", "asfixia"],
                &["dificil", "cuesta", "trabajo"],
                &["poco", "ligero", "leve"],
            ),
        ),
        CategoryLexicon::new(
            SymptomCategory::Cardiovascular,
            &[
                "corazon", "palpitacion", "latido", "taquicardia", "presion", "sudor",
                "sudoracion", "mareo", "mareado", "desmayo",
            ],
            SeverityIndicators::new(
                &["muy rapido", "descontrolado", "irregular", "fuerte"],
                &["rapido", "acelerado", "notable"],
                &["ligero", "poco", "leve"],
            ),
        ),
        CategoryLexicon::new(
            SymptomCategory::Neurological,
            &[
                "cabeza", "mareo", "confusion", "vision", "hablar", "brazo", "pierna",
                "entumecimiento", "hormigueo", "debilidad",
            ],
            SeverityIndicators::new(
                &["muy confuso", "no puedo", "perdida", "total"],
                &["dificil", "cuesta", "parcial"],
                &["ligero", "poco", "leve"],
            ),
        ),
        CategoryLexicon::new(
            SymptomCategory::Digestive,
            &["nausea", "vomito", "diarrea", "estomago", "abdominal", "barriga"],
            SeverityIndicators::new(
                &["constante", "no para", "muy frecuente"],
                &["frecuente", "varias veces"],
                &["ocasional", "poco", "leve"],
            ),
        ),
    ]
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
