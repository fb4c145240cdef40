//! Relevance scoring of text units against a query.
//!
//! Two backends rank the same kind of input (a list of text units and a
//! query string):
//!
//! - **Dense**: cosine similarity of [`Embedder`] vectors
//! - **Sparse**: cosine similarity of TF-IDF vectors fitted over the units
//!   plus the query
//!
//! Scores are never cached; each call vectorizes from scratch.

mod stopwords;
pub mod tfidf;

pub use stopwords::is_stop_word;
pub use tfidf::{SparseVector, TfidfMatrix, fit_transform, sparse_cosine};

use crate::embedding::{Embedder, cosine_similarity};
use crate::error::{Error, Result};
use serde::Serialize;
use tracing::debug;

/// A text unit with its relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredUnit<'a> {
    /// Position of the unit in the original sequence.
    pub index: usize,
    /// Unit text.
    pub text: &'a str,
    /// Similarity to the query (higher is better).
    pub score: f64,
}

/// Scores each unit by embedding cosine similarity to `query`.
///
/// Units and query are embedded in a single batch. Results keep input order.
///
/// # Errors
///
/// Propagates embedder failures; returns [`Error::Backend`] if the embedder
/// returns the wrong number of vectors.
pub fn rank_by_embedding<'a, S: AsRef<str>>(
    embedder: &dyn Embedder,
    units: &'a [S],
    query: &str,
) -> Result<Vec<ScoredUnit<'a>>> {
    let mut texts: Vec<&str> = units.iter().map(AsRef::as_ref).collect();
    texts.push(query);

    let mut embeddings = embedder.embed_batch(&texts)?;
    if embeddings.len() != texts.len() {
        return Err(Error::backend(
            embedder.name(),
            format!(
                "expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            ),
        ));
    }

    let query_embedding = embeddings.pop().unwrap_or_default();
    Ok(units
        .iter()
        .zip(&embeddings)
        .enumerate()
        .map(|(index, (unit, embedding))| ScoredUnit {
            index,
            text: unit.as_ref(),
            score: f64::from(cosine_similarity(&query_embedding, embedding)),
        })
        .collect())
}

/// Scores each unit by TF-IDF cosine similarity to `query`.
///
/// The vectorizer is fitted over the units followed by the query, so the
/// query contributes to document frequencies. Results keep input order.
///
/// # Errors
///
/// Returns [`Error::Backend`] when the fitted vocabulary is empty.
pub fn rank_by_tfidf<'a, S: AsRef<str>>(
    units: &'a [S],
    query: &str,
) -> Result<Vec<ScoredUnit<'a>>> {
    let mut documents: Vec<&str> = units.iter().map(AsRef::as_ref).collect();
    documents.push(query);

    let matrix = fit_transform(&documents)?;
    debug!(
        documents = matrix.len(),
        vocabulary = matrix.vocabulary_size(),
        "fitted tf-idf"
    );
    let rows = matrix.rows();
    let Some((query_row, unit_rows)) = rows.split_last() else {
        return Ok(Vec::new());
    };

    Ok(units
        .iter()
        .zip(unit_rows)
        .enumerate()
        .map(|(index, (unit, row))| ScoredUnit {
            index,
            text: unit.as_ref(),
            score: sparse_cosine(query_row, row),
        })
        .collect())
}

/// Sorts units by descending score.
///
/// The sort is stable so ties keep their original order. NaN scores are
/// treated as 0.0.
pub fn sort_by_relevance(units: &mut [ScoredUnit<'_>]) {
    let key = |unit: &ScoredUnit<'_>| {
        if unit.score.is_nan() { 0.0 } else { unit.score }
    };
    units.sort_by(|a, b| key(b).total_cmp(&key(a)));
}
