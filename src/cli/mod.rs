//! CLI layer for ti-compress.
//!
//! Provides the command-line interface using clap, with commands for
//! compressing prompts, reducing context, building scenario prompts and
//! running the compression benchmark.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands, PromptMode};
