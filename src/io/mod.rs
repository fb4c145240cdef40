//! I/O utilities for ti-compress.
//!
//! Provides input reading (inline, file, stdin) along with the Unicode
//! helpers used for character-budget arithmetic.

pub mod reader;
pub mod unicode;

pub use reader::{read_file, read_input, read_stdin};
pub use unicode::{char_count, char_to_byte, truncate_chars, word_tokens};
