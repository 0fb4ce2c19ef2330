//! Lookup tables for medical text preprocessing.
//!
//! Defaults are Spanish. Synonyms and corrections are ordered pairs because
//! replacement is applied sequentially and earlier rewrites feed later ones.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{TextError, TextResult};

/// All tables the preprocessor needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MedicalTables {
    /// Whole-word abbreviation → expansion
    pub abbreviations: HashMap<String, String>,
    /// Substring synonym → standard term, applied in order
    pub synonyms: Vec<(String, String)>,
    /// Substring misspelling → correction, applied in order
    pub corrections: Vec<(String, String)>,
    /// Multi-word phrases kept as single tokens
    pub protected_phrases: Vec<String>,
    pub symptom_words: Vec<String>,
    pub body_parts: Vec<String>,
    pub severity_words: Vec<String>,
    pub temporal_words: Vec<String>,
}

impl Default for MedicalTables {
    fn default() -> Self {
        Self {
            abbreviations: default_abbreviations(),
            synonyms: pairs(&[
                ("doler", "dolor"),
                ("duele", "dolor"),
                ("doloroso", "dolor"),
                ("malestar", "molestia"),
                ("respiracion", "respirar"),
                ("palpitaciones", "palpitacion"),
                ("nauseas", "nausea"),
                ("vomitos", "vomito"),
                ("cefalea", "dolor cabeza"),
                ("migrana", "dolor cabeza"),
            ]),
            corrections: pairs(&[
                ("doler", "dolor"),
                ("respiracion", "respirar"),
                ("coracon", "corazon"),
                ("pulomes", "pulmones"),
                ("caveza", "cabeza"),
                ("mareos", "mareo"),
            ]),
            protected_phrases: to_owned(&[
                "dolor de pecho",
                "dificultad para respirar",
                "perdida de conciencia",
                "dolor de cabeza",
                "falta de aire",
                "palpitaciones cardiacas",
            ]),
            symptom_words: to_owned(&[
                "dolor", "nausea", "vomito", "fiebre", "tos", "mareo", "palpitacion", "dificultad",
                "sangrado", "inflamacion",
            ]),
            body_parts: to_owned(&[
                "cabeza", "pecho", "abdomen", "brazo", "pierna", "espalda", "corazon", "pulmon",
                "estomago", "garganta",
            ]),
            severity_words: to_owned(&["severo", "intenso", "leve", "moderado", "agudo", "cronico"]),
            temporal_words: to_owned(&[
                "repentino",
                "gradual",
                "constante",
                "intermitente",
                "hace",
                "desde",
                "durante",
            ]),
        }
    }
}

impl MedicalTables {
    /// Parse tables from JSON; missing sections keep their defaults.
    pub fn from_json_str(json: &str) -> TextResult<Self> {
        let tables: Self = serde_json::from_str(json)?;
        if tables.protected_phrases.iter().any(|p| p.split_whitespace().count() == 0) {
            return Err(TextError::InvalidTable("empty protected phrase".into()));
        }
        Ok(tables)
    }

    /// Words the fuzzy spelling fallback may correct towards.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.symptom_words
            .iter()
            .chain(&self.body_parts)
            .chain(&self.severity_words)
            .chain(&self.temporal_words)
            .map(|w| w.as_str())
    }

    pub fn is_vocabulary_word(&self, word: &str) -> bool {
        self.vocabulary().any(|w| w == word)
    }

    /// Add a custom abbreviation.
    pub fn add_abbreviation(&mut self, abbreviation: &str, expansion: &str) {
        self.abbreviations
            .insert(abbreviation.to_lowercase(), expansion.to_lowercase());
    }

    /// Append a custom synonym (applied after the existing ones).
    pub fn add_synonym(&mut self, synonym: &str, standard: &str) {
        self.synonyms
            .push((synonym.to_lowercase(), standard.to_lowercase()));
    }
}

fn default_abbreviations() -> HashMap<String, String> {
    let mut map = HashMap::new();

    // Cardiovascular
    map.insert("iam".into(), "infarto agudo miocardio".into());
    map.insert("hta".into(), "hipertension arterial".into());
    map.insert("icc".into(), "insuficiencia cardiaca congestiva".into());
    map.insert("pcr".into(), "paro cardiorespiratorio".into());

    // Neurological
    map.insert("avc".into(), "accidente cerebrovascular".into());
    map.insert("tce".into(), "traumatismo craneoencefalico".into());

    // Other
    map.insert("dm".into(), "diabetes mellitus".into());
    map.insert("epoc".into(), "enfermedad pulmonar obstructiva cronica".into());
    map.insert("itu".into(), "infeccion tracto urinario".into());
    map.insert("ira".into(), "insuficiencia renal aguda".into());

    map
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
