//! `FastEmbed`-based semantic embedder.
//!
//! Provides real semantic embeddings using the all-MiniLM-L6-v2 model via fastembed-rs.
//! Only available when the `fastembed-embeddings` feature is enabled.

use crate::embedding::{DEFAULT_DIMENSIONS, Embedder};
use crate::error::{Error, Result};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Mutex, OnceLock};

const BACKEND: &str = "fastembed";

/// Thread-safe singleton for the embedding model.
/// Uses `OnceLock` for lazy initialization on first use.
static EMBEDDING_MODEL: OnceLock<Mutex<fastembed::TextEmbedding>> = OnceLock::new();

/// `FastEmbed` embedder using all-MiniLM-L6-v2.
///
/// The model is lazily loaded on first embed call, so constructing the
/// embedder is cheap and never touches the network.
pub struct FastEmbedEmbedder {
    model_name: &'static str,
}

impl FastEmbedEmbedder {
    /// Creates a new `FastEmbed` embedder.
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible for model selection.
    #[allow(clippy::missing_const_for_fn, clippy::unnecessary_wraps)]
    pub fn new() -> Result<Self> {
        Ok(Self {
            model_name: "all-MiniLM-L6-v2",
        })
    }

    fn get_model() -> Result<&'static Mutex<fastembed::TextEmbedding>> {
        if let Some(model) = EMBEDDING_MODEL.get() {
            return Ok(model);
        }

        let options = fastembed::InitOptions::new(fastembed::EmbeddingModel::AllMiniLML6V2)
            .with_show_download_progress(false);

        let model = fastembed::TextEmbedding::try_new(options)
            .map_err(|e| Error::backend(BACKEND, format!("failed to load model: {e}")))?;

        // Another thread may have won the race; either instance is fine.
        let _ = EMBEDDING_MODEL.set(Mutex::new(model));

        EMBEDDING_MODEL
            .get()
            .ok_or_else(|| Error::backend(BACKEND, "model initialization race"))
    }

    /// Returns the model name.
    #[must_use]
    pub const fn model_name(&self) -> &'static str {
        self.model_name
    }

    fn run(texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let model = Self::get_model()?;
        let mut model = model
            .lock()
            .map_err(|e| Error::backend(BACKEND, format!("failed to lock model: {e}")))?;

        // ONNX runtime can panic on malformed inputs or internal errors.
        let result = catch_unwind(AssertUnwindSafe(|| model.embed(texts, None)));

        result
            .map_err(|panic_info| {
                let panic_msg = panic_info
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic_info.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Error::backend(BACKEND, format!("ONNX runtime panic: {panic_msg}"))
            })?
            .map_err(|e| Error::backend(BACKEND, format!("embedding failed: {e}")))
    }
}

impl Embedder for FastEmbedEmbedder {
    fn dimensions(&self) -> usize {
        DEFAULT_DIMENSIONS
    }

    fn name(&self) -> &'static str {
        BACKEND
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.is_empty() {
            return Err(Error::backend(BACKEND, "cannot embed empty text"));
        }

        Self::run(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| Error::backend(BACKEND, "no embedding returned from model"))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        if texts.iter().any(|t| t.is_empty()) {
            return Err(Error::backend(BACKEND, "cannot embed empty text"));
        }

        Self::run(texts)
    }
}
