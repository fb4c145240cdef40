//! # ti-compress
//!
//! Budget-constrained prompt and context compression for MITRE ATT&CK
//! threat-intelligence LLM workflows.
//!
//! ti-compress shrinks analysis prompts before they are sent to a model
//! and cuts long retrieved context down to a hard character budget while
//! keeping the parts most relevant to the question being asked.
//!
//! ## Features
//!
//! - **Rule-based compression**: ordered regex rewrites that drop politeness
//!   and filler and abbreviate ATT&CK vocabulary (`TA`, `LM`, `C2`, ...)
//! - **Relevance selection**: dense embeddings or TF-IDF rank chunks against
//!   a query, packed greedily into the budget
//! - **Graceful fallback**: embedding, then TF-IDF, then plain truncation
//! - **Scenario prompts**: a built-in catalog of ATT&CK analysis tasks with
//!   detailed, compact and reduced prompt builders
//! - **Benchmark**: token savings, quality heuristics and context-window
//!   overflow simulation
//!
//! ```
//! use ti_compress::{compress_prompt, estimate_tokens};
//!
//! let prompt = "Please provide a comprehensive analysis of command and control";
//! let compressed = compress_prompt(prompt);
//! assert!(estimate_tokens(&compressed) < estimate_tokens(prompt));
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod benchmark;
pub mod chunking;
pub mod cli;
pub mod compress;
pub mod config;
pub mod core;
pub mod embedding;
pub mod error;
pub mod io;
pub mod scenario;
pub mod search;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{Chunk, estimate_tokens};

// Re-export compression types
pub use compress::{
    Budget, ContextReducer, Reduction, RuleCompressor, Strategy, compress_prompt, reduce_context,
};

// Re-export configuration
pub use config::{Config, ReducerConfig};

// Re-export chunking types
pub use chunking::{Chunker, FixedChunker, SentenceChunker, available_strategies, create_chunker};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};

// Re-export embedding types
#[cfg(feature = "fastembed-embeddings")]
pub use embedding::FastEmbedEmbedder;
pub use embedding::{
    DEFAULT_DIMENSIONS, Embedder, FallbackEmbedder, cosine_similarity, create_embedder,
};

// Re-export scenario and benchmark entry points
pub use benchmark::{BenchmarkReport, run_benchmark};
pub use scenario::ScenarioType;
