//! Fixed-size sliding-window chunking.
//!
//! Windows of `chunk_size` characters advance by `chunk_size - overlap`, so
//! consecutive chunks share exactly `overlap` characters. The walk stops as
//! soon as a window reaches the end of the text, which means no trailing
//! fragment is ever emitted that the previous window already covered.

use crate::chunking::traits::Chunker;
use crate::chunking::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP};
use crate::core::Chunk;
use crate::error::{ChunkingError, Result};
use std::iter;

/// Sliding-window chunker measured in characters.
///
/// # Examples
///
/// ```
/// use ti_compress::chunking::{Chunker, FixedChunker};
///
/// let chunker = FixedChunker::with_size_and_overlap(10, 3);
/// let chunks = chunker.chunk("0123456789ABCDEFGHIJ").unwrap();
/// assert_eq!(chunks[0].content, "0123456789");
/// assert_eq!(chunks[1].content, "789ABCDEFG");
/// ```
#[derive(Debug, Clone)]
pub struct FixedChunker {
    /// Maximum chunk size in characters.
    chunk_size: usize,
    /// Characters shared between consecutive chunks.
    overlap: usize,
}

impl Default for FixedChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedChunker {
    /// Creates a chunker with the default 150 / 25 window.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }

    /// Creates a chunker with custom chunk size and no overlap.
    #[cfg(test)]
    pub(crate) const fn with_size(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            overlap: 0,
        }
    }

    /// Creates a chunker with custom size and overlap.
    #[must_use]
    pub const fn with_size_and_overlap(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Returns the configured chunk size.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the configured overlap.
    #[must_use]
    pub const fn overlap(&self) -> usize {
        self.overlap
    }

    fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ChunkingError::InvalidConfig {
                reason: "chunk_size must be > 0".to_string(),
            }
            .into());
        }
        if self.overlap >= self.chunk_size {
            return Err(ChunkingError::OverlapTooLarge {
                overlap: self.overlap,
                size: self.chunk_size,
            }
            .into());
        }
        Ok(())
    }
}

impl Chunker for FixedChunker {
    fn chunk(&self, text: &str) -> Result<Vec<Chunk>> {
        self.validate()?;

        if text.is_empty() {
            return Ok(vec![]);
        }

        // Byte offset of every character boundary, including the end.
        let offsets: Vec<usize> = text
            .char_indices()
            .map(|(pos, _)| pos)
            .chain(iter::once(text.len()))
            .collect();
        let total = offsets.len() - 1;
        let step = self.chunk_size - self.overlap;

        let mut chunks = Vec::with_capacity(total / step + 1);
        let mut start = 0;

        loop {
            let end = (start + self.chunk_size).min(total);
            let content = text[offsets[start]..offsets[end]].to_string();
            let mut chunk = Chunk::new(content, start..end, chunks.len());
            if start > 0 && self.overlap > 0 {
                chunk.set_has_overlap(true);
            }
            chunks.push(chunk);

            if end >= total {
                break;
            }
            start += step;
        }

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }

    fn description(&self) -> &'static str {
        "Fixed-size sliding window with character overlap"
    }
}
