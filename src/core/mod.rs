//! Core domain models for ti-compress.
//!
//! Chunks and the token estimator. These are pure values with no I/O
//! dependencies, created and dropped within a single compression call.

pub mod chunk;
pub mod tokens;

pub use chunk::Chunk;
pub use tokens::{CHARS_PER_TOKEN, estimate_tokens, log_token_usage};
