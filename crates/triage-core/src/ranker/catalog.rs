//! Default condition catalog and catalog validation.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{ConditionProfile, SeverityTier};

/// Catalog configuration faults, detected at construction.
#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("Condition catalog is empty")]
    Empty,

    #[error("Duplicate condition id: {0}")]
    DuplicateId(String),

    #[error("Condition has no keywords: {0}")]
    EmptyKeywords(String),
}

/// Check ids are unique and every profile has at least one keyword.
pub fn validate_catalog(catalog: &[ConditionProfile]) -> Result<(), CatalogError> {
    if catalog.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut ids = HashSet::new();
    for profile in catalog {
        if !ids.insert(profile.id.as_str()) {
            return Err(CatalogError::DuplicateId(profile.id.clone()));
        }
        if profile.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(CatalogError::EmptyKeywords(profile.id.clone()));
        }
    }

    Ok(())
}

/// Hand-authored reference catalog.
pub fn default_catalog() -> Vec<ConditionProfile> {
    vec![
        ConditionProfile::new(
            "infarto_agudo_miocardio",
            SeverityTier::Critical,
            "Ataque cardíaco - bloqueo del flujo sanguíneo al corazón",
        )
        .with_keywords(&["dolor", "pecho", "respirar", "sudor", "nausea", "brazo"])
        .with_recommendations(&[
            "Llamar inmediatamente al 911",
            "Administrar aspirina si no hay alergias",
            "Mantener al paciente en reposo",
            "Monitorizar signos vitales",
        ]),
        ConditionProfile::new(
            "asma_bronquial",
            SeverityTier::Moderate,
            "Inflamación y estrechamiento de las vías respiratorias",
        )
        .with_keywords(&["respirar", "tos", "pecho", "silbido", "aire"])
        .with_recommendations(&[
            "Usar inhalador de rescate",
            "Mantener posición sentado",
            "Evitar desencadenantes conocidos",
        ]),
        ConditionProfile::new(
            "neumonia",
            SeverityTier::ModerateHigh,
            "Infección pulmonar que inflama los sacos de aire",
        )
        .with_keywords(&["tos", "respirar", "pecho", "fiebre", "escalofrios"])
        .with_recommendations(&[
            "Antibióticos según prescripción",
            "Reposo en cama",
            "Hidratación abundante",
        ]),
        ConditionProfile::new(
            "migrana",
            SeverityTier::Moderate,
            "Dolor de cabeza intenso con síntomas neurológicos",
        )
        .with_keywords(&["cabeza", "vision", "nausea", "luz", "ruido"])
        .with_recommendations(&[
            "Medicamentos para migraña",
            "Reposo en lugar oscuro",
            "Aplicar compresas frías",
        ]),
        ConditionProfile::new(
            "accidente_cerebrovascular",
            SeverityTier::Critical,
            "Interrupción del flujo sanguíneo al cerebro",
        )
        .with_keywords(&["confusion", "hablar", "brazo", "pierna", "vision", "mareo"])
        .with_recommendations(&[
            "Activar código ictus inmediatamente",
            "No dar medicamentos orales",
            "Evaluar escala NIHSS",
        ]),
        ConditionProfile::new(
            "gastroenteritis",
            SeverityTier::LowModerate,
            "Inflamación del tracto gastrointestinal",
        )
        .with_keywords(&["nausea", "vomito", "diarrea", "estomago", "deshidratacion"])
        .with_recommendations(&[
            "Hidratación oral gradual",
            "Dieta blanda",
            "Evitar lácteos temporalmente",
        ]),
        ConditionProfile::new("apendicitis", SeverityTier::High, "Inflamación del apéndice")
            .with_keywords(&["dolor", "abdominal", "nausea", "vomito", "fiebre"])
            .with_recommendations(&[
                "Evaluación quirúrgica urgente",
                "No administrar analgésicos hasta diagnóstico",
                "Mantener en ayunas",
            ]),
        ConditionProfile::new(
            "hipertension_arterial",
            SeverityTier::Moderate,
            "Presión arterial elevada",
        )
        .with_keywords(&["cabeza", "mareo", "vision", "palpitacion"])
        .with_recommendations(&[
            "Monitorizar presión arterial",
            "Medicación antihipertensiva",
            "Reposo relativo",
        ]),
        ConditionProfile::new(
            "diabetes_descompensada",
            SeverityTier::High,
            "Descontrol de los niveles de glucosa",
        )
        .with_keywords(&["sed", "orina", "debilidad", "confusion", "nausea"])
        .with_recommendations(&[
            "Medir glucemia inmediatamente",
            "Insulina según protocolo",
            "Hidratación controlada",
        ]),
        ConditionProfile::new(
            "ansiedad_crisis",
            SeverityTier::LowModerate,
            "Episodio agudo de ansiedad",
        )
        .with_keywords(&["palpitacion", "respirar", "sudor", "mareo", "miedo"])
        .with_recommendations(&[
            "Técnicas de respiración",
            "Ambiente tranquilo",
            "Apoyo emocional",
        ]),
        ConditionProfile::new(
            "resfriado_comun",
            SeverityTier::Low,
            "Infección viral de vías respiratorias superiores",
        )
        .with_keywords(&["tos", "secrecion", "estornudos", "garganta"])
        .with_recommendations(&[
            "Reposo",
            "Hidratación abundante",
            "Analgésicos si es necesario",
        ]),
        ConditionProfile::new(
            "intoxicacion_alimentaria",
            SeverityTier::Moderate,
            "Enfermedad causada por alimentos contaminados",
        )
        .with_keywords(&["nausea", "vomito", "diarrea", "estomago", "fiebre"])
        .with_recommendations(&[
            "Hidratación oral",
            "Dieta líquida inicial",
            "Evitar antidiarreicos",
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = default_catalog();
        assert!(catalog.len() >= 12);
        assert_eq!(validate_catalog(&catalog), Ok(()));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert_eq!(validate_catalog(&[]), Err(CatalogError::Empty));
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let mut catalog = default_catalog();
        catalog.push(catalog[0].clone());
        assert_eq!(
            validate_catalog(&catalog),
            Err(CatalogError::DuplicateId("infarto_agudo_miocardio".into()))
        );
    }

    #[test]
    fn test_rejects_empty_keywords() {
        let catalog = vec![ConditionProfile::new("vacio", SeverityTier::Low, "Sin palabras clave")];
        assert_eq!(
            validate_catalog(&catalog),
            Err(CatalogError::EmptyKeywords("vacio".into()))
        );
    }
}
