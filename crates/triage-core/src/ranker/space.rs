//! TF-IDF similarity space over a fixed document corpus.
//!
//! Weighting:
//! - tf = raw term count in the document
//! - idf = ln((1 + n) / (1 + df)) + 1 (smoothed)
//! - vectors are L2-normalised
//!
//! Terms are lowercase Unicode word runs of at least two characters.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid token pattern"));

/// Split text into lowercase terms.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Immutable term-weighted vectors, one per fitted document.
#[derive(Debug, Clone)]
pub struct SimilaritySpace {
    /// Term → column index, sorted alphabetically
    vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency per column
    idf: Vec<f64>,
    /// Normalised document vectors (dense)
    vectors: Vec<Vec<f64>>,
}

impl SimilaritySpace {
    /// Fit vocabulary and weights on a corpus.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for terms in &tokenized {
            let mut unique: Vec<&String> = terms.iter().collect();
            unique.sort();
            unique.dedup();
            for term in unique {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let vocabulary: BTreeMap<String, usize> = document_frequency
            .keys()
            .enumerate()
            .map(|(index, term)| (term.clone(), index))
            .collect();
        let idf: Vec<f64> = document_frequency
            .values()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let mut space = Self {
            vocabulary,
            idf,
            vectors: Vec::with_capacity(tokenized.len()),
        };
        let vectors = tokenized.iter().map(|terms| space.weigh(terms)).collect();
        space.vectors = vectors;
        space
    }

    /// Vectorise a query with the fitted vocabulary. Unknown terms are ignored.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        self.weigh(&tokenize(text))
    }

    /// Cosine similarity of a query vector against every fitted document.
    pub fn similarities(&self, query: &[f64]) -> Vec<f64> {
        self.vectors
            .iter()
            .map(|doc| cosine_similarity(query, doc))
            .collect()
    }

    pub fn document_count(&self) -> usize {
        self.vectors.len()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Whether a term belongs to the fitted vocabulary.
    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    fn weigh(&self, terms: &[String]) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        for term in terms {
            if let Some(&index) = self.vocabulary.get(term) {
                vector[index] += 1.0;
            }
        }
        for (weight, idf) in vector.iter_mut().zip(&self.idf) {
            *weight *= idf;
        }

        let norm = vector.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in vector.iter_mut() {
                *weight /= norm;
            }
        }
        vector
    }
}

fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
