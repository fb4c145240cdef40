//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::config::CONFIG_ENV;
use crate::scenario::{DEFAULT_REDUCED_CHARS, ScenarioType};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ti-compress: prompt and context compression for threat-intelligence LLM workflows.
///
/// Shrinks MITRE ATT&CK analysis prompts with rule-based rewriting and
/// reduces long context to a character budget by keeping the chunks most
/// relevant to a query.
#[derive(Parser, Debug)]
#[command(name = "ti-compress")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a JSON configuration file.
    #[arg(short, long, env = CONFIG_ENV, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// How a scenario prompt is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PromptMode {
    /// Verbose hand-written prompt.
    Detailed,
    /// Terse template, rule-compressed, with guidance.
    #[default]
    Compact,
    /// Detailed prompt reduced by the context reducer.
    Reduced,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compress a prompt with the rule-based compressor.
    ///
    /// Reads TEXT, or --file, or stdin.
    Compress {
        /// Prompt text.
        text: Option<String>,

        /// Read the prompt from a file.
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Advisory token limit (warns when exceeded).
        #[arg(long)]
        max_tokens: Option<usize>,
    },

    /// Reduce context to a character budget, keeping query-relevant parts.
    Reduce {
        /// Context text.
        text: Option<String>,

        /// Read the context from a file.
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Relevance query.
        #[arg(short, long)]
        query: String,

        /// Maximum output length in characters.
        #[arg(short, long, default_value_t = DEFAULT_REDUCED_CHARS)]
        max_chars: usize,
    },

    /// Estimate the token count of a text.
    Tokens {
        /// Text to measure.
        text: Option<String>,

        /// Read the text from a file.
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// List the built-in scenario catalog.
    Scenarios {
        /// Only list scenarios of this type.
        #[arg(short = 't', long)]
        scenario_type: Option<ScenarioType>,
    },

    /// Build an analysis prompt for a scenario.
    Prompt {
        /// Scenario type.
        #[arg(short = 't', long)]
        scenario_type: ScenarioType,

        /// Index into the built-in catalog for the type.
        #[arg(short, long, conflicts_with = "custom")]
        index: Option<usize>,

        /// Custom scenario text.
        #[arg(long)]
        custom: Option<String>,

        /// Prompt rendering mode.
        #[arg(short, long, value_enum, default_value_t = PromptMode::Compact)]
        mode: PromptMode,

        /// Append token-limit instructions.
        #[arg(short, long)]
        guidance: bool,

        /// Character budget for reduced mode.
        #[arg(long, default_value_t = DEFAULT_REDUCED_CHARS)]
        max_chars: usize,
    },

    /// Run the compression benchmark.
    Benchmark {
        /// Model for the context-overflow simulation.
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Show the chunk windows used for embedding selection.
    Chunks {
        /// Text to chunk.
        text: Option<String>,

        /// Read the text from a file.
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Chunk size in characters (defaults to the configured size).
        #[arg(long)]
        size: Option<usize>,

        /// Overlap in characters (defaults to the configured overlap).
        #[arg(long)]
        overlap: Option<usize>,

        /// Chunking strategy (fixed, sentence).
        #[arg(long, default_value = "fixed")]
        strategy: String,
    },
}
