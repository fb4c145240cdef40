//! Context-window overflow simulation.
//!
//! A prompt never travels alone: system prompts, tool output and history
//! fill most of the window. The simulation adds a fixed amount of such
//! context to the prompt estimate and checks it against a model's limit.

use crate::config::BenchmarkConfig;
use crate::core::estimate_tokens;
use serde::Serialize;

/// Outcome of fitting a prompt into a context window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverflowStatus {
    /// The prompt and additional context fit.
    Success,
    /// The context window is exceeded.
    Failed,
}

/// Result of a single overflow simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverflowCheck {
    /// Model whose window was simulated.
    pub model: String,
    /// Fit or overflow.
    pub status: OverflowStatus,
    /// Estimated prompt tokens.
    pub prompt_tokens: usize,
    /// Simulated additional context tokens.
    pub additional_context: usize,
    /// Prompt plus additional context.
    pub total_tokens: usize,
    /// Context window of the model.
    pub context_limit: usize,
    /// Tokens over the limit, when failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow: Option<usize>,
    /// Tokens left in the window, when successful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_tokens: Option<usize>,
}

impl OverflowCheck {
    /// Returns true if the prompt fits.
    #[must_use]
    pub fn fits(&self) -> bool {
        self.status == OverflowStatus::Success
    }
}

/// Simulates sending `prompt` to `model` alongside the configured
/// additional context.
#[must_use]
pub fn simulate_overflow(prompt: &str, model: &str, config: &BenchmarkConfig) -> OverflowCheck {
    let prompt_tokens = estimate_tokens(prompt);
    let additional_context = config.additional_context_tokens;
    let total_tokens = prompt_tokens.saturating_add(additional_context);
    let context_limit = config.context_limit(model);

    let (status, overflow, remaining_tokens) = if total_tokens > context_limit {
        (OverflowStatus::Failed, Some(total_tokens - context_limit), None)
    } else {
        (OverflowStatus::Success, None, Some(context_limit - total_tokens))
    };

    OverflowCheck {
        model: model.to_string(),
        status,
        prompt_tokens,
        additional_context,
        total_tokens,
        context_limit,
        overflow,
        remaining_tokens,
    }
}
