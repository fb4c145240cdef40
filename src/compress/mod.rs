//! Prompt and context compression.
//!
//! Two independent tools live here:
//!
//! - [`rules`]: a deterministic regex rewriter that shortens prompts by
//!   stripping politeness, filler and redundant phrasing and abbreviating
//!   ATT&CK vocabulary
//! - [`reducer`]: a budget-constrained context reducer that keeps the
//!   chunks most relevant to a query, trying an ordered list of
//!   [`Strategy`] implementations until one succeeds
//!
//! # Examples
//!
//! ```
//! use ti_compress::compress::{compress_prompt, reduce_context};
//!
//! let prompt = compress_prompt("Please analyze the threat actor's lateral movement");
//! assert_eq!(prompt, "analyze the TA's LM");
//!
//! let context = "APT29 uses WMI for execution. The office moved. Lunch was late.";
//! let reduced = reduce_context(context, "APT29 WMI execution", 40);
//! assert!(reduced.chars().count() <= 40);
//! ```

pub mod reducer;
pub mod rules;
pub mod select;
pub mod strategy;

pub use reducer::{ContextReducer, reduce_context};
pub use rules::{RuleCompressor, compress_prompt, compress_with_limit};
pub use select::greedy_pack;
pub use strategy::{EmbeddingStrategy, Strategy, TfidfStrategy, TruncationStrategy};

use serde::Serialize;
use std::fmt;

/// Size limit for a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Budget {
    /// Maximum number of characters in the output.
    Chars(usize),
    /// Maximum number of selected units (chunks or sentences).
    Units(usize),
}

impl Budget {
    /// Returns the character limit, if this is a character budget.
    #[must_use]
    pub const fn max_chars(self) -> Option<usize> {
        match self {
            Self::Chars(n) => Some(n),
            Self::Units(_) => None,
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chars(n) => write!(f, "{n} chars"),
            Self::Units(n) => write!(f, "{n} units"),
        }
    }
}

/// A strategy that failed during reduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyFailure {
    /// Strategy name.
    pub strategy: &'static str,
    /// Error message.
    pub reason: String,
}

/// Result of [`ContextReducer::reduce`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reduction {
    /// Reduced text, at most `max_chars` characters.
    pub text: String,
    /// Name of the strategy that produced the text.
    pub strategy: &'static str,
    /// Character count of the input.
    pub original_chars: usize,
    /// Character count of the output.
    pub final_chars: usize,
    /// Strategies that failed before `strategy` succeeded, in order.
    pub failures: Vec<StrategyFailure>,
}

impl Reduction {
    /// Output size as a percentage of the input size.
    ///
    /// Returns 100.0 for empty input.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio_percent(&self) -> f64 {
        if self.original_chars == 0 {
            100.0
        } else {
            self.final_chars as f64 / self.original_chars as f64 * 100.0
        }
    }
}
