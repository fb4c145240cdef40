//! Token estimation.
//!
//! Approximates LLM token counts without depending on any tokenizer:
//! roughly four characters of English text per token.

use tracing::{debug, info, warn};

/// Characters per token used by the estimate.
pub const CHARS_PER_TOKEN: usize = 4;

/// Token count above which usage is reported as high.
pub const HIGH_USAGE_TOKENS: usize = 10_000;

/// Token count above which usage is reported as moderate.
pub const MODERATE_USAGE_TOKENS: usize = 5_000;

/// Estimates the token count of `text`.
///
/// Integer division of the character count by [`CHARS_PER_TOKEN`]; total,
/// deterministic and monotone in the input length.
///
/// # Examples
///
/// ```
/// use ti_compress::core::estimate_tokens;
///
/// assert_eq!(estimate_tokens(""), 0);
/// assert_eq!(estimate_tokens("abcdefgh"), 2);
/// ```
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / CHARS_PER_TOKEN
}

/// Logs the estimated token usage of `text` and returns the estimate.
///
/// The log level scales with usage: `warn` above [`HIGH_USAGE_TOKENS`],
/// `info` above [`MODERATE_USAGE_TOKENS`], `debug` otherwise.
pub fn log_token_usage(text: &str, context: &str) -> usize {
    let tokens = estimate_tokens(text);
    if tokens > HIGH_USAGE_TOKENS {
        warn!(context, tokens, "high token usage");
    } else if tokens > MODERATE_USAGE_TOKENS {
        info!(context, tokens, "moderate token usage");
    } else {
        debug!(context, tokens, "low token usage");
    }
    tokens
}
