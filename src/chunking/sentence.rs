//! Period-delimited sentence splitting.
//!
//! The sparse scoring backend ranks whole sentences. Sentences are the
//! trimmed, non-empty fragments between `.` characters; no abbreviation or
//! decimal handling is attempted.

use crate::chunking::traits::Chunker;
use crate::core::Chunk;
use crate::error::Result;

/// Splits text into trimmed, non-empty fragments on `.`.
///
/// # Examples
///
/// ```
/// use ti_compress::chunking::split_sentences;
///
/// let sentences = split_sentences("APT29 uses WMI. . Lazarus steals crypto.");
/// assert_eq!(sentences, vec!["APT29 uses WMI", "Lazarus steals crypto"]);
/// ```
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Chunker producing one chunk per sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceChunker;

impl SentenceChunker {
    /// Creates a new sentence chunker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Chunker for SentenceChunker {
    fn chunk(&self, text: &str) -> Result<Vec<Chunk>> {
        let mut chunks = Vec::new();
        let mut char_pos = 0;

        for piece in text.split('.') {
            let trimmed = piece.trim();
            if !trimmed.is_empty() {
                let leading_bytes = piece.len() - piece.trim_start().len();
                let start = char_pos + piece[..leading_bytes].chars().count();
                let end = start + trimmed.chars().count();
                chunks.push(Chunk::new(trimmed.to_string(), start..end, chunks.len()));
            }
            // +1 for the consumed '.'
            char_pos += piece.chars().count() + 1;
        }

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "sentence"
    }

    fn description(&self) -> &'static str {
        "Sentences split on periods, trimmed, empty fragments dropped"
    }
}
