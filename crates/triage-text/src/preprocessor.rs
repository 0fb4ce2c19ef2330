//! Medical text preprocessor.
//!
//! Handles:
//! - Abbreviation expansion (iam → infarto agudo miocardio)
//! - Synonym normalisation (duele → dolor, nauseas → nausea)
//! - Punctuation and digit removal
//! - Spelling correction (fixed table, then fuzzy match against the vocabulary)

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};

use triage_core::{PreprocessError, TextPreprocessor};

use crate::tables::MedicalTables;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Invalid non-word pattern"));
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("Invalid digit pattern"));
static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("Invalid sentence pattern"));

/// Shortest word the fuzzy fallback will touch.
const MIN_FUZZY_LEN: usize = 5;

/// Minimum combined similarity for a fuzzy correction.
const FUZZY_THRESHOLD: f64 = 0.88;

/// Words bucketed by kind. Each list is deduplicated and sorted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MedicalEntities {
    pub symptoms: Vec<String>,
    pub body_parts: Vec<String>,
    pub severity: Vec<String>,
    pub temporal: Vec<String>,
}

impl MedicalEntities {
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
            && self.body_parts.is_empty()
            && self.severity.is_empty()
            && self.temporal.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityClass {
    Low,
    Medium,
    High,
}

/// Size and density metrics of a text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextComplexity {
    pub complexity: ComplexityClass,
    pub word_count: usize,
    pub sentence_count: usize,
    /// Rounded to two decimals
    pub avg_words_per_sentence: f64,
    pub medical_terms_count: usize,
}

/// Preprocessor for Spanish medical free text.
#[derive(Debug, Clone, Default)]
pub struct MedicalTextPreprocessor {
    tables: MedicalTables,
}

impl MedicalTextPreprocessor {
    /// Create a preprocessor with the default tables.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(tables: MedicalTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &MedicalTables {
        &self.tables
    }

    /// Lowercase, expand abbreviations, fold synonyms, strip punctuation and
    /// digits, collapse whitespace.
    pub fn clean_text(&self, text: &str) -> String {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return String::new();
        }

        let text = self.expand_abbreviations(&text);
        let text = self.normalize_synonyms(&text);
        let text = NON_WORD.replace_all(&text, " ");
        let text = DIGITS.replace_all(&text, " ");

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Replace whole-word abbreviations with their expansion.
    pub fn expand_abbreviations(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| {
                self.tables
                    .abbreviations
                    .get(word)
                    .map(|s| s.as_str())
                    .unwrap_or(word)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Apply the synonym table as sequential substring replacements.
    pub fn normalize_synonyms(&self, text: &str) -> String {
        replace_all_pairs(text, &self.tables.synonyms)
    }

    /// Clean, then split into tokens, keeping protected phrases whole.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = self.clean_text(text);
        let words: Vec<&str> = cleaned.split_whitespace().collect();
        let phrases: Vec<Vec<&str>> = self
            .tables
            .protected_phrases
            .iter()
            .map(|p| p.split_whitespace().collect::<Vec<_>>())
            .filter(|p| !p.is_empty())
            .collect();

        let mut tokens = Vec::with_capacity(words.len());
        let mut i = 0;
        while i < words.len() {
            match phrases.iter().find(|p| words[i..].starts_with(p.as_slice())) {
                Some(phrase) => {
                    tokens.push(phrase.join(" "));
                    i += phrase.len();
                }
                None => {
                    tokens.push(words[i].to_string());
                    i += 1;
                }
            }
        }
        tokens
    }

    /// Fix common misspellings.
    ///
    /// The correction table is applied as substring replacements; then every
    /// alphabetic word of at least five letters outside the vocabulary is
    /// replaced by its closest vocabulary word, if one is close enough.
    pub fn correct_spelling(&self, text: &str) -> String {
        let corrected = replace_all_pairs(&text.to_lowercase(), &self.tables.corrections);

        corrected
            .split_whitespace()
            .map(|word| match self.closest_vocabulary_word(word) {
                Some(replacement) => {
                    tracing::trace!(word, replacement, "Fuzzy spelling correction");
                    replacement.to_string()
                }
                None => word.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Bucket words into symptoms, body parts, severity and temporal terms.
    ///
    /// A word lands in the first bucket with an entry it contains.
    pub fn extract_entities(&self, text: &str) -> MedicalEntities {
        let mut symptoms = BTreeSet::new();
        let mut body_parts = BTreeSet::new();
        let mut severity = BTreeSet::new();
        let mut temporal = BTreeSet::new();

        let lower = text.to_lowercase();
        for word in lower.split_whitespace() {
            let contains_any = |entries: &[String]| entries.iter().any(|e| word.contains(e.as_str()));

            if contains_any(self.tables.symptom_words.as_slice()) {
                symptoms.insert(word.to_string());
            } else if contains_any(self.tables.body_parts.as_slice()) {
                body_parts.insert(word.to_string());
            } else if contains_any(self.tables.severity_words.as_slice()) {
                severity.insert(word.to_string());
            } else if contains_any(self.tables.temporal_words.as_slice()) {
                temporal.insert(word.to_string());
            }
        }

        MedicalEntities {
            symptoms: symptoms.into_iter().collect(),
            body_parts: body_parts.into_iter().collect(),
            severity: severity.into_iter().collect(),
            temporal: temporal.into_iter().collect(),
        }
    }

    /// Word/sentence counts and a coarse complexity class.
    pub fn analyze_complexity(&self, text: &str) -> TextComplexity {
        let word_count = count_words(text);
        if word_count == 0 {
            return TextComplexity {
                complexity: ComplexityClass::Low,
                word_count: 0,
                sentence_count: 0,
                avg_words_per_sentence: 0.0,
                medical_terms_count: 0,
            };
        }

        let sentence_count = SENTENCE_END
            .split(text)
            .filter(|s| count_words(s) > 0)
            .count()
            .max(1);
        let avg = word_count as f64 / sentence_count as f64;

        let complexity = if avg > 15.0 || word_count > 50 {
            ComplexityClass::High
        } else if avg > 8.0 || word_count > 20 {
            ComplexityClass::Medium
        } else {
            ComplexityClass::Low
        };

        TextComplexity {
            complexity,
            word_count,
            sentence_count,
            avg_words_per_sentence: (avg * 100.0).round() / 100.0,
            medical_terms_count: self.count_medical_terms(text),
        }
    }

    /// Abbreviations present as whole words plus synonyms present as substrings.
    fn count_medical_terms(&self, text: &str) -> usize {
        let lower = text.to_lowercase();
        let words: BTreeSet<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let abbreviations = self
            .tables
            .abbreviations
            .keys()
            .filter(|a| words.contains(a.as_str()))
            .count();
        let synonyms = self
            .tables
            .synonyms
            .iter()
            .filter(|(s, _)| lower.contains(s.as_str()))
            .count();

        abbreviations + synonyms
    }

    fn closest_vocabulary_word(&self, word: &str) -> Option<&str> {
        if word.chars().count() < MIN_FUZZY_LEN
            || !word.chars().all(char::is_alphabetic)
            || self.tables.is_vocabulary_word(word)
        {
            return None;
        }

        let mut best: Option<(&str, f64)> = None;
        for candidate in self.tables.vocabulary() {
            let score = fuzzy_match(word, candidate);
            if score >= FUZZY_THRESHOLD && best.map_or(true, |(_, s)| score > s) {
                best = Some((candidate, score));
            }
        }
        best.map(|(candidate, _)| candidate)
    }
}

impl TextPreprocessor for MedicalTextPreprocessor {
    fn preprocess(&self, text: &str) -> Result<String, PreprocessError> {
        let cleaned = self.clean_text(text);
        let corrected = self.correct_spelling(&cleaned);
        if corrected.is_empty() {
            return Err(PreprocessError::EmptyOutput);
        }
        Ok(corrected)
    }
}

fn replace_all_pairs(text: &str, pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .filter(|(from, _)| !from.is_empty())
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from.as_str(), to))
}

fn count_words(text: &str) -> usize {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .count()
}

/// Compute fuzzy string similarity using combined metrics.
fn fuzzy_match(a: &str, b: &str) -> f64 {
    let jw = jaro_winkler(a, b);
    let lev = normalized_levenshtein(a, b);

    // Jaro-Winkler favours shared prefixes, which typos usually keep
    jw * 0.6 + lev * 0.4
}
