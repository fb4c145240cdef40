//! Runtime configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields the stock pipeline. Files are JSON:
//!
//! ```json
//! {
//!   "reducer": { "embedding_max_chars": 300, "tfidf_max_sentences": 2 },
//!   "rules": { "max_tokens": 4000 },
//!   "benchmark": { "model": "gpt-3.5-turbo" }
//! }
//! ```

use crate::chunking::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP};
use crate::compress::rules::DEFAULT_MAX_TOKENS;
use crate::error::{Error, Result};
use crate::io::read_file;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "TI_COMPRESS_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Context reducer settings.
    pub reducer: ReducerConfig,
    /// Rule-based compressor settings.
    pub rules: RuleConfig,
    /// Benchmark harness settings.
    pub benchmark: BenchmarkConfig,
}

/// Context reducer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReducerConfig {
    /// Character target of the embedding strategy.
    pub embedding_max_chars: usize,
    /// Chunk size in characters for the embedding strategy.
    pub chunk_size: usize,
    /// Overlap in characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Sentences kept by the TF-IDF strategy.
    pub tfidf_max_sentences: usize,
    /// Sentence count at or below which TF-IDF returns text unchanged.
    ///
    /// `None` uses `tfidf_max_sentences`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tfidf_min_sentences: Option<usize>,
    /// Character target of the truncation fallback.
    pub fallback_chars: usize,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            embedding_max_chars: 200,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_OVERLAP,
            tfidf_max_sentences: 1,
            tfidf_min_sentences: None,
            fallback_chars: 150,
        }
    }
}

/// Rule-based compressor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    /// Advisory token limit; exceeding it only logs a warning.
    pub max_tokens: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Benchmark harness settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchmarkConfig {
    /// Model used for the context-overflow simulation.
    pub model: String,
    /// Simulated tokens of retrieved context added to every prompt.
    pub additional_context_tokens: usize,
    /// Context window size per model, in tokens.
    pub context_limits: BTreeMap<String, usize>,
    /// Context window assumed for models missing from `context_limits`.
    pub default_context_limit: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        let context_limits = [
            ("gpt-4o-mini", 128_000),
            ("gpt-4o", 128_000),
            ("gpt-3.5-turbo", 16_385),
            ("claude-3-haiku", 200_000),
            ("claude-3-sonnet", 200_000),
        ]
        .into_iter()
        .map(|(model, limit)| (model.to_string(), limit))
        .collect();

        Self {
            model: "gpt-4o-mini".to_string(),
            additional_context_tokens: 100_000,
            context_limits,
            default_context_limit: 128_000,
        }
    }
}

impl BenchmarkConfig {
    /// Returns the context window of `model`, falling back to the default.
    #[must_use]
    pub fn context_limit(&self, model: &str) -> usize {
        self.context_limits
            .get(model)
            .copied()
            .unwrap_or(self.default_context_limit)
    }
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed JSON, unknown fields or
    /// invalid values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or
    /// [`Error::Config`] if it is invalid.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = read_file(path)?;
        Self::from_json(&content).map_err(|e| match e {
            Error::Config { message } => {
                Error::config(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    /// Loads configuration from `path` if given, defaults otherwise.
    ///
    /// A missing explicit path is an error; it is never silently ignored.
    ///
    /// # Errors
    ///
    /// See [`Config::from_file`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        let reducer = &self.reducer;
        if reducer.chunk_size == 0 {
            return Err(Error::config("reducer.chunk_size must be > 0"));
        }
        if reducer.chunk_overlap >= reducer.chunk_size {
            return Err(Error::config(format!(
                "reducer.chunk_overlap ({}) must be less than reducer.chunk_size ({})",
                reducer.chunk_overlap, reducer.chunk_size
            )));
        }
        if reducer.tfidf_max_sentences == 0 {
            return Err(Error::config("reducer.tfidf_max_sentences must be > 0"));
        }
        if self.benchmark.model.trim().is_empty() {
            return Err(Error::config("benchmark.model must not be empty"));
        }
        if self.benchmark.default_context_limit == 0
            || self.benchmark.context_limits.values().any(|&l| l == 0)
        {
            return Err(Error::config("context limits must be > 0"));
        }
        Ok(())
    }
}
