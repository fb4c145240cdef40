//! Chunking strategies for ti-compress.
//!
//! Splitting is the first step of relevance-ranked selection. Two
//! strategies are available:
//!
//! - **Fixed**: sliding character window with overlap (dense embedding backend)
//! - **Sentence**: period-delimited sentences (sparse TF-IDF backend)

pub mod fixed;
pub mod sentence;
pub mod traits;

pub use fixed::FixedChunker;
pub use sentence::{SentenceChunker, split_sentences};
pub use traits::Chunker;

/// Default chunk size in characters for embedding-based selection.
pub const DEFAULT_CHUNK_SIZE: usize = 150;

/// Default overlap in characters between consecutive chunks.
pub const DEFAULT_OVERLAP: usize = 25;

/// Creates a chunker by name.
///
/// `chunk_size` and `overlap` only apply to the fixed strategy.
///
/// # Errors
///
/// Returns [`crate::error::ChunkingError::InvalidConfig`] if the strategy name is not recognized.
pub fn create_chunker(
    name: &str,
    chunk_size: usize,
    overlap: usize,
) -> crate::error::Result<Box<dyn Chunker>> {
    match name.to_lowercase().as_str() {
        "fixed" => Ok(Box::new(FixedChunker::with_size_and_overlap(
            chunk_size, overlap,
        ))),
        "sentence" => Ok(Box::new(SentenceChunker::new())),
        _ => Err(crate::error::ChunkingError::InvalidConfig {
            reason: format!("unknown chunking strategy: {name}"),
        }
        .into()),
    }
}

/// Lists available chunking strategy names.
#[must_use]
pub fn available_strategies() -> Vec<&'static str> {
    vec!["fixed", "sentence"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_chunker_fixed() {
        let chunker = create_chunker("fixed", 150, 25).unwrap();
        assert_eq!(chunker.name(), "fixed");
    }

    #[test]
    fn test_create_chunker_sentence() {
        let chunker = create_chunker("sentence", 0, 0).unwrap();
        assert_eq!(chunker.name(), "sentence");
    }

    #[test]
    fn test_create_chunker_unknown() {
        assert!(create_chunker("semantic", 150, 25).is_err());
    }

    #[test]
    fn test_create_chunker_case_insensitive() {
        let chunker = create_chunker("FIXED", 150, 25).unwrap();
        assert_eq!(chunker.name(), "fixed");
    }

    #[test]
    fn test_available_strategies() {
        let strategies = available_strategies();
        assert_eq!(strategies, vec!["fixed", "sentence"]);
    }
}
