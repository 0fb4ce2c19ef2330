//! Command-line symptom triage.
//!
//! ```text
//! triage "dolor de pecho severo y sudoración"
//! echo "tos leve" | triage --format json
//! ```

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use triage_core::{report, AssessmentRequest, EngineConfig, PatientInfo, TriageEngine};
use triage_text::MedicalTextPreprocessor;

#[derive(Parser, Debug)]
#[command(name = "triage", version, about = "Symptom triage from free text")]
struct Cli {
    /// Symptom description; read from stdin when omitted
    text: Option<String>,

    /// JSON engine configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Skip text preprocessing
    #[arg(long)]
    raw: bool,

    /// Patient name (passed through to the report)
    #[arg(long)]
    name: Option<String>,

    /// Patient age in years (passed through to the report)
    #[arg(long)]
    age: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("triage_core=info,triage_text=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let mut engine = TriageEngine::with_config(config).context("Failed to build triage engine")?;
    if !cli.raw {
        engine = engine.with_preprocessor(MedicalTextPreprocessor::new());
    }

    let text = match cli.text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read symptoms from stdin")?;
            buffer
        }
    };

    let request = AssessmentRequest::new(text).with_patient(PatientInfo::new(cli.name, cli.age));
    let assessment = engine.assess(&request);

    match cli.format {
        OutputFormat::Json => println!(
            "{}",
            assessment.to_json().context("Failed to serialize assessment")?
        ),
        OutputFormat::Text => print!("{}", report::render_text(&assessment)),
    }

    Ok(())
}
