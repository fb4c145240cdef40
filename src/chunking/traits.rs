//! Chunker trait definition.
//!
//! Defines the interface for all splitting strategies, so scoring backends
//! can rank units without caring how the text was cut.

use crate::core::Chunk;
use crate::error::Result;

/// Trait for splitting text into independently scorable units.
///
/// Implementations must be `Send + Sync` and produce deterministic output
/// for the same input.
///
/// # Examples
///
/// ```
/// use ti_compress::chunking::{Chunker, FixedChunker};
///
/// let chunker = FixedChunker::with_size_and_overlap(100, 10);
/// let text = "Lateral movement via SMB. ".repeat(20);
/// let chunks = chunker.chunk(&text).unwrap();
/// assert!(chunks.iter().all(|c| c.len_chars() <= 100));
/// ```
pub trait Chunker: Send + Sync {
    /// Splits the input text into chunks.
    ///
    /// # Errors
    ///
    /// Returns an error if the chunker configuration is invalid.
    fn chunk(&self, text: &str) -> Result<Vec<Chunk>>;

    /// Returns the name of the splitting strategy.
    fn name(&self) -> &'static str;

    /// Returns a description of the splitting strategy.
    fn description(&self) -> &'static str {
        "No description available"
    }
}
