//! Unicode utilities for text processing.
//!
//! Budgets are expressed in characters, so every length and cut in the
//! crate goes through these helpers rather than byte offsets.

use unicode_segmentation::UnicodeSegmentation;

/// Counts the characters (Unicode scalar values) in a string.
#[must_use]
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Returns the byte offset of the `n`th character, or `s.len()` if out of bounds.
///
/// # Examples
///
/// ```
/// use ti_compress::io::char_to_byte;
///
/// let s = "Hello 世界";
/// assert_eq!(char_to_byte(s, 6), 6);
/// assert_eq!(char_to_byte(s, 7), 9);
/// assert_eq!(char_to_byte(s, 100), s.len());
/// ```
#[must_use]
pub fn char_to_byte(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(pos, _)| pos)
}

/// Truncates a string to at most `max_chars` characters.
///
/// Never splits a multi-byte character. Total over any input.
///
/// # Examples
///
/// ```
/// use ti_compress::io::truncate_chars;
///
/// assert_eq!(truncate_chars("Hello, world!", 5), "Hello");
/// assert_eq!(truncate_chars("世界", 1), "世");
/// assert_eq!(truncate_chars("short", 100), "short");
/// ```
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    &s[..char_to_byte(s, max_chars)]
}

/// Splits text into lowercase word tokens of at least `min_len` characters.
///
/// Uses Unicode word segmentation; punctuation-only segments are dropped.
#[must_use]
pub fn word_tokens(s: &str, min_len: usize) -> Vec<String> {
    s.unicode_words()
        .filter(|w| w.chars().count() >= min_len)
        .map(str::to_lowercase)
        .collect()
}
