//! Context reduction strategies.
//!
//! Each strategy turns (text, query, budget) into a shorter text or fails
//! with [`crate::Error::Backend`]. The reducer tries them in order.

use crate::chunking::{Chunker, FixedChunker, split_sentences};
use crate::compress::Budget;
use crate::compress::select::greedy_pack;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::io::truncate_chars;
use crate::search::{rank_by_embedding, rank_by_tfidf};
use tracing::debug;

/// Separator between selected embedding chunks.
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Separator between selected sentences.
pub const SENTENCE_SEPARATOR: &str = ". ";

/// A way of reducing text to a budget.
pub trait Strategy: Send + Sync {
    /// Returns the strategy name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Returns the budget this strategy requests under an overall
    /// character limit of `max_chars`.
    fn budget_for(&self, max_chars: usize) -> Budget;

    /// Reduces `text` to `budget`, favoring content relevant to `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scoring backend cannot produce scores.
    fn attempt(&self, text: &str, query: &str, budget: Budget) -> Result<String>;
}

/// Output for inputs too small to select from.
fn passthrough(text: &str, budget: Budget) -> String {
    match budget {
        Budget::Chars(max_chars) => truncate_chars(text, max_chars).to_string(),
        Budget::Units(_) => text.to_string(),
    }
}

/// Selects the fixed-size chunks most similar to the query by embedding.
pub struct EmbeddingStrategy {
    embedder: Box<dyn Embedder>,
    chunker: FixedChunker,
    max_chars: usize,
}

impl EmbeddingStrategy {
    /// Creates an embedding strategy targeting at most `max_chars` characters.
    #[must_use]
    pub fn new(embedder: Box<dyn Embedder>, chunker: FixedChunker, max_chars: usize) -> Self {
        Self {
            embedder,
            chunker,
            max_chars,
        }
    }

    /// Returns the name of the underlying embedder.
    #[must_use]
    pub fn embedder_name(&self) -> &'static str {
        self.embedder.name()
    }
}

impl Strategy for EmbeddingStrategy {
    fn name(&self) -> &'static str {
        "embedding"
    }

    fn budget_for(&self, max_chars: usize) -> Budget {
        Budget::Chars(self.max_chars.min(max_chars))
    }

    fn attempt(&self, text: &str, query: &str, budget: Budget) -> Result<String> {
        let chunks = self.chunker.chunk(text)?;
        debug!(chunks = chunks.len(), embedder = self.embedder.name(), "split context");
        if chunks.len() <= 1 {
            return Ok(passthrough(text, budget));
        }

        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let ranked = rank_by_embedding(self.embedder.as_ref(), &contents, query)?;
        Ok(greedy_pack(ranked, budget, CHUNK_SEPARATOR, "")
            .trim()
            .to_string())
    }
}

/// Selects the sentences most similar to the query by TF-IDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfidfStrategy {
    max_sentences: usize,
    min_sentences: Option<usize>,
}

impl TfidfStrategy {
    /// Creates a TF-IDF strategy keeping at most `max_sentences` sentences.
    #[must_use]
    pub const fn new(max_sentences: usize) -> Self {
        Self {
            max_sentences,
            min_sentences: None,
        }
    }

    /// Sets the sentence count at or below which text is returned unchanged.
    ///
    /// Defaults to the requested unit budget.
    #[must_use]
    pub const fn with_min_sentences(mut self, min_sentences: Option<usize>) -> Self {
        self.min_sentences = min_sentences;
        self
    }

    fn threshold(&self, budget: Budget) -> usize {
        self.min_sentences.unwrap_or(match budget {
            Budget::Units(n) => n,
            Budget::Chars(_) => 1,
        })
    }
}

impl Strategy for TfidfStrategy {
    fn name(&self) -> &'static str {
        "tfidf"
    }

    fn budget_for(&self, _max_chars: usize) -> Budget {
        Budget::Units(self.max_sentences)
    }

    fn attempt(&self, text: &str, query: &str, budget: Budget) -> Result<String> {
        let sentences = split_sentences(text);
        let threshold = self.threshold(budget);
        if sentences.len() <= 1 || sentences.len() <= threshold {
            debug!(
                sentences = sentences.len(),
                threshold, "too few sentences to select from"
            );
            return Ok(passthrough(text, budget));
        }

        let ranked = rank_by_tfidf(&sentences, query)?;
        Ok(greedy_pack(ranked, budget, SENTENCE_SEPARATOR, "."))
    }
}

/// Keeps the head of the text. Never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationStrategy {
    max_chars: usize,
}

impl TruncationStrategy {
    /// Creates a truncation strategy keeping at most `max_chars` characters.
    #[must_use]
    pub const fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Strategy for TruncationStrategy {
    fn name(&self) -> &'static str {
        "truncate"
    }

    fn budget_for(&self, max_chars: usize) -> Budget {
        Budget::Chars(self.max_chars.min(max_chars))
    }

    fn attempt(&self, text: &str, _query: &str, budget: Budget) -> Result<String> {
        Ok(match budget {
            Budget::Chars(max_chars) => truncate_chars(text, max_chars).to_string(),
            Budget::Units(n) => {
                let head: Vec<&str> = split_sentences(text).into_iter().take(n).collect();
                if head.is_empty() {
                    String::new()
                } else {
                    format!("{}.", head.join(SENTENCE_SEPARATOR))
                }
            }
        })
    }
}
