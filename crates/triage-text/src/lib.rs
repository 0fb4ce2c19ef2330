//! Medical text preprocessing for Spanish symptom descriptions.
//!
//! This crate normalises patient free text before it reaches the triage
//! engine: abbreviation expansion, synonym folding, punctuation removal and
//! spelling correction. It plugs into `triage_core::TriageEngine` through the
//! `TextPreprocessor` trait.

pub mod preprocessor;
pub mod tables;

pub use preprocessor::*;
pub use tables::*;

use thiserror::Error;

/// Table loading errors.
#[derive(Error, Debug)]
pub enum TextError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid table: {0}")]
    InvalidTable(String),
}

pub type TextResult<T> = Result<T, TextError>;
