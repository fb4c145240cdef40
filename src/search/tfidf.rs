//! TF-IDF vectorization and sparse cosine similarity.
//!
//! Mirrors the usual scikit-learn defaults so scores are comparable with
//! the Python benchmarks this crate replaced:
//!
//! - tokens are lowercase Unicode words of two or more characters
//! - English stop words are removed
//! - term frequency is the raw count
//! - `idf(t) = ln((1 + n) / (1 + df(t))) + 1`
//! - every row is L2-normalized

use crate::error::{Error, Result};
use crate::io::word_tokens;
use crate::search::stopwords::is_stop_word;
use std::collections::{BTreeMap, HashMap};

const BACKEND: &str = "tfidf";

/// Minimum token length in characters.
const MIN_TOKEN_LEN: usize = 2;

/// Sparse vector as `(term_id, weight)` pairs sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Returns the non-zero entries sorted by term id.
    #[must_use]
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Returns the weight of `term_id`, or 0.0 if absent.
    #[cfg(test)]
    pub(crate) fn get(&self, term_id: usize) -> f64 {
        self.entries
            .binary_search_by_key(&term_id, |&(id, _)| id)
            .map_or(0.0, |pos| self.entries[pos].1)
    }

    /// Returns true if the vector has no non-zero entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Computes the dot product with another sparse vector.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_id, a_w) = self.entries[i];
            let (b_id, b_w) = other.entries[j];
            match a_id.cmp(&b_id) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Returns the L2 norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }
}

/// Cosine similarity of two sparse vectors; 0.0 when either is zero.
#[must_use]
pub fn sparse_cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 { 0.0 } else { a.dot(b) / denom }
}

/// A fitted TF-IDF space: vocabulary, idf weights and one row per document.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
}

impl TfidfMatrix {
    /// Returns the number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no documents were vectorized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row for document `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    /// Returns all rows in document order.
    #[must_use]
    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    /// Returns the term id of `term`, if it is in the vocabulary.
    #[cfg(test)]
    pub(crate) fn term_id(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Returns the idf weight of `term`, if it is in the vocabulary.
    #[cfg(test)]
    pub(crate) fn idf(&self, term: &str) -> Option<f64> {
        self.term_id(term).map(|id| self.idf[id])
    }

    /// Returns the vocabulary size.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Tokenizes a document the way the vectorizer sees it.
#[must_use]
pub fn analyze(document: &str) -> Vec<String> {
    word_tokens(document, MIN_TOKEN_LEN)
        .into_iter()
        .filter(|w| !is_stop_word(w))
        .collect()
}

/// Fits a TF-IDF space over `documents` and transforms them.
///
/// # Errors
///
/// Returns [`Error::Backend`] when the vocabulary is empty, e.g. every
/// document contains only stop words or punctuation.
#[allow(clippy::cast_precision_loss)]
pub fn fit_transform(documents: &[&str]) -> Result<TfidfMatrix> {
    let analyzed: Vec<Vec<String>> = documents.iter().map(|d| analyze(d)).collect();

    // Vocabulary in sorted term order.
    let mut vocabulary: BTreeMap<String, usize> = analyzed
        .iter()
        .flatten()
        .map(|term| (term.clone(), 0))
        .collect();
    if vocabulary.is_empty() {
        return Err(Error::backend(
            BACKEND,
            "empty vocabulary; documents may only contain stop words",
        ));
    }
    for (id, slot) in vocabulary.values_mut().enumerate() {
        *slot = id;
    }

    let counts: Vec<HashMap<usize, usize>> = analyzed
        .iter()
        .map(|terms| {
            let mut tf = HashMap::new();
            for term in terms {
                if let Some(&id) = vocabulary.get(term) {
                    *tf.entry(id).or_insert(0) += 1;
                }
            }
            tf
        })
        .collect();

    let mut df = vec![0usize; vocabulary.len()];
    for tf in &counts {
        for &id in tf.keys() {
            df[id] += 1;
        }
    }

    let n = documents.len() as f64;
    let idf: Vec<f64> = df
        .iter()
        .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
        .collect();

    let rows = counts
        .into_iter()
        .map(|tf| {
            let mut entries: Vec<(usize, f64)> = tf
                .into_iter()
                .map(|(id, count)| (id, count as f64 * idf[id]))
                .collect();
            entries.sort_unstable_by_key(|&(id, _)| id);
            let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, w) in &mut entries {
                    *w /= norm;
                }
            }
            SparseVector { entries }
        })
        .collect();

    Ok(TfidfMatrix {
        vocabulary,
        idf,
        rows,
    })
}
