//! Chunk representation for ti-compress.
//!
//! Chunks are contiguous segments of the raw text produced by a chunker.
//! Each chunk keeps its character position within the original text so
//! overlapping windows can be stitched back together.

use crate::core::tokens::estimate_tokens;
use crate::io::truncate_chars;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Represents a chunk of text cut from a larger input.
///
/// Positions are measured in characters (Unicode scalar values), not bytes.
///
/// # Examples
///
/// ```
/// use ti_compress::core::Chunk;
///
/// let chunk = Chunk::new("Hello, world!".to_string(), 0..13, 0);
/// assert_eq!(chunk.len_chars(), 13);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk content.
    pub content: String,

    /// Character range in the original text.
    pub char_range: Range<usize>,

    /// Sequential index within the text (0-based).
    pub index: usize,

    /// Whether this chunk overlaps with the previous chunk.
    pub has_overlap: bool,
}

impl Chunk {
    /// Creates a new chunk.
    ///
    /// # Arguments
    ///
    /// * `content` - Chunk content.
    /// * `char_range` - Character range in the original text.
    /// * `index` - Sequential index within the text.
    #[must_use]
    pub const fn new(content: String, char_range: Range<usize>, index: usize) -> Self {
        Self {
            content,
            char_range,
            index,
            has_overlap: false,
        }
    }

    /// Returns the length of the chunk in characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.content.chars().count()
    }

    /// Checks if the chunk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the start character offset in the original text.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.char_range.start
    }

    /// Returns the end character offset in the original text.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.char_range.end
    }

    /// Marks this chunk as having overlap with the previous chunk.
    pub const fn set_has_overlap(&mut self, has_overlap: bool) {
        self.has_overlap = has_overlap;
    }

    /// Estimates token count using the crate-wide 4 characters per token heuristic.
    #[must_use]
    pub fn estimate_tokens(&self) -> usize {
        estimate_tokens(&self.content)
    }

    /// Returns a preview of the chunk content (first N characters).
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> &str {
        truncate_chars(&self.content, max_chars)
    }
}
