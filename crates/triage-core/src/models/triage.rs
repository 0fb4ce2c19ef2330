//! Triage levels and classification results.

use serde::{Deserialize, Serialize};

/// Hospital triage level, 1 (most urgent) to 5 (least urgent).
///
/// Every level carries fixed metadata; nothing here is computed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TriageLevel {
    Resuscitation,
    Emergency,
    Urgency,
    SemiUrgent,
    NonUrgent,
}

impl TriageLevel {
    /// All levels in cascade order.
    pub const CASCADE: [TriageLevel; 5] = [
        TriageLevel::Resuscitation,
        TriageLevel::Emergency,
        TriageLevel::Urgency,
        TriageLevel::SemiUrgent,
        TriageLevel::NonUrgent,
    ];

    pub const fn level(&self) -> u8 {
        match self {
            TriageLevel::Resuscitation => 1,
            TriageLevel::Emergency => 2,
            TriageLevel::Urgency => 3,
            TriageLevel::SemiUrgent => 4,
            TriageLevel::NonUrgent => 5,
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        Self::CASCADE.iter().copied().find(|l| l.level() == level)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            TriageLevel::Resuscitation => "Resucitación",
            TriageLevel::Emergency => "Emergencia",
            TriageLevel::Urgency => "Urgencia",
            TriageLevel::SemiUrgent => "Semi-urgente",
            TriageLevel::NonUrgent => "No urgente",
        }
    }

    pub const fn color_code(&self) -> &'static str {
        match self {
            TriageLevel::Resuscitation => "Rojo",
            TriageLevel::Emergency => "Naranja",
            TriageLevel::Urgency => "Amarillo",
            TriageLevel::SemiUrgent => "Verde",
            TriageLevel::NonUrgent => "Azul",
        }
    }

    pub const fn max_wait_time(&self) -> &'static str {
        match self {
            TriageLevel::Resuscitation => "Inmediata",
            TriageLevel::Emergency => "10 minutos",
            TriageLevel::Urgency => "30 minutos",
            TriageLevel::SemiUrgent => "60 minutos",
            TriageLevel::NonUrgent => "120 minutos",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            TriageLevel::Resuscitation => "Emergencia crítica, riesgo vital inmediato",
            TriageLevel::Emergency => "Urgencia alta, requiere atención prioritaria",
            TriageLevel::Urgency => "Urgencia moderada",
            TriageLevel::SemiUrgent => "Urgencia menor, puede esperar",
            TriageLevel::NonUrgent => "Atención diferida, no urgente",
        }
    }

    pub const fn recommendation(&self) -> &'static str {
        match self {
            TriageLevel::Resuscitation => {
                "ATENCIÓN INMEDIATA REQUERIDA. Traslado inmediato a sala de resucitación. Activar equipo de emergencias."
            }
            TriageLevel::Emergency => {
                "Requiere atención médica urgente. Evaluar en los próximos 10 minutos. Monitorizar signos vitales."
            }
            TriageLevel::Urgency => {
                "Atención médica necesaria. Evaluar dentro de 30 minutos. Realizar triage secundario."
            }
            TriageLevel::SemiUrgent => {
                "Atención médica recomendada. Puede esperar hasta 60 minutos. Monitoreo periódico."
            }
            TriageLevel::NonUrgent => {
                "Consulta médica no urgente. Tiempo de espera hasta 120 minutos. Cuidados de soporte."
            }
        }
    }

    pub const fn immediate_interventions(&self) -> &'static [&'static str] {
        match self {
            TriageLevel::Resuscitation => &[
                "Asegurar vía aérea",
                "Monitoreo cardíaco continuo",
                "Acceso venoso inmediato",
                "Oxígeno suplementario",
                "Preparar para RCP si es necesario",
            ],
            TriageLevel::Emergency => &[
                "Monitoreo de signos vitales",
                "Acceso venoso",
                "Oxígeno si es necesario",
                "Evaluación médica rápida",
            ],
            TriageLevel::Urgency => &[
                "Toma de signos vitales",
                "Historia clínica completa",
                "Exámenes complementarios si es necesario",
            ],
            TriageLevel::SemiUrgent => &["Evaluación inicial", "Signos vitales básicos"],
            TriageLevel::NonUrgent => &["Registro de información", "Educación al paciente"],
        }
    }

    pub const fn requires_vital_signs(&self) -> bool {
        self.level() <= 2
    }
}

impl std::fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Nivel {} - {}", self.level(), self.name())
    }
}

/// Outcome of one classification call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageResult {
    /// Triage level (1-5)
    pub level: u8,
    /// Level name
    pub name: String,
    /// Colour code of the level
    pub color_code: String,
    /// Maximum acceptable wait
    pub max_wait_time: String,
    /// Level description
    pub description: String,
    /// Canned recommendation for the level
    pub recommendation: String,
    /// Every criterion matched at the winning level, in evaluation order
    pub reasoning: Vec<String>,
    /// Canned interventions for the level
    pub immediate_interventions: Vec<String>,
    /// True for levels 1 and 2
    pub vital_signs_required: bool,
}

impl TriageResult {
    /// Assemble a result from a level and the reasons that selected it.
    pub fn new(level: TriageLevel, reasoning: Vec<String>) -> Self {
        Self {
            level: level.level(),
            name: level.name().to_string(),
            color_code: level.color_code().to_string(),
            max_wait_time: level.max_wait_time().to_string(),
            description: level.description().to_string(),
            recommendation: level.recommendation().to_string(),
            reasoning,
            immediate_interventions: level
                .immediate_interventions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vital_signs_required: level.requires_vital_signs(),
        }
    }

    /// The typed level of this result.
    pub fn triage_level(&self) -> TriageLevel {
        TriageLevel::from_level(self.level).unwrap_or(TriageLevel::NonUrgent)
    }

    /// Levels 1 and 2 need immediate attention.
    pub fn is_immediate(&self) -> bool {
        self.level <= 2
    }
}
