//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::benchmark::{default_cases, run_benchmark};
use crate::chunking::create_chunker;
use crate::cli::output::{
    CompressOutput, OutputFormat, PromptOutput, TokenEstimate, format_benchmark, format_chunks,
    format_compress, format_prompt, format_reduction, format_scenarios, format_tokens,
};
use crate::cli::parser::{Cli, Commands, PromptMode};
use crate::compress::{ContextReducer, RuleCompressor};
use crate::config::Config;
use crate::core::{estimate_tokens, log_token_usage};
use crate::error::{CommandError, Result};
use crate::io::{char_count, read_input};
use crate::scenario::{
    ScenarioType, TOKEN_LIMIT_INSTRUCTIONS, compact_prompt, detailed_prompt, expected_output,
    reduced_prompt, task_summary,
};
use std::path::Path;
use tracing::debug;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the configuration can't be loaded, the input can't
/// be read, or an argument is invalid.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let config = Config::load(cli.config.as_deref())?;
    debug!(config = ?cli.config, "configuration loaded");

    match &cli.command {
        Commands::Compress {
            text,
            file,
            max_tokens,
        } => cmd_compress(
            text.as_deref(),
            file.as_deref(),
            max_tokens.unwrap_or(config.rules.max_tokens),
            format,
        ),
        Commands::Reduce {
            text,
            file,
            query,
            max_chars,
        } => cmd_reduce(
            &config,
            text.as_deref(),
            file.as_deref(),
            query,
            *max_chars,
            format,
        ),
        Commands::Tokens { text, file } => cmd_tokens(text.as_deref(), file.as_deref(), format),
        Commands::Scenarios { scenario_type } => Ok(cmd_scenarios(*scenario_type, format)),
        Commands::Prompt {
            scenario_type,
            index,
            custom,
            mode,
            guidance,
            max_chars,
        } => cmd_prompt(
            &config,
            *scenario_type,
            *index,
            custom.as_deref(),
            *mode,
            *guidance,
            *max_chars,
            format,
        ),
        Commands::Benchmark { model } => Ok(format_benchmark(
            &run_benchmark(&default_cases(), model.as_deref(), &config.benchmark),
            format,
        )),
        Commands::Chunks {
            text,
            file,
            size,
            overlap,
            strategy,
        } => cmd_chunks(
            text.as_deref(),
            file.as_deref(),
            size.unwrap_or(config.reducer.chunk_size),
            overlap.unwrap_or(config.reducer.chunk_overlap),
            strategy,
            format,
        ),
    }
}

fn cmd_compress(
    text: Option<&str>,
    file: Option<&Path>,
    max_tokens: usize,
    format: OutputFormat,
) -> Result<String> {
    let input = read_input(text, file)?;
    let original_tokens = log_token_usage(&input, "compress input");
    let compressed = RuleCompressor::new(max_tokens).compress(&input);

    Ok(format_compress(
        &CompressOutput {
            original_tokens,
            compressed_tokens: estimate_tokens(&compressed),
            compressed,
            max_tokens,
        },
        format,
    ))
}

fn cmd_reduce(
    config: &Config,
    text: Option<&str>,
    file: Option<&Path>,
    query: &str,
    max_chars: usize,
    format: OutputFormat,
) -> Result<String> {
    let input = read_input(text, file)?;
    let reducer = ContextReducer::new(&config.reducer);
    let reduction = reducer.reduce(&input, query, max_chars);
    Ok(format_reduction(&reduction, format))
}

fn cmd_tokens(text: Option<&str>, file: Option<&Path>, format: OutputFormat) -> Result<String> {
    let input = read_input(text, file)?;
    Ok(format_tokens(
        &TokenEstimate {
            chars: char_count(&input),
            tokens: estimate_tokens(&input),
        },
        format,
    ))
}

fn cmd_scenarios(scenario_type: Option<ScenarioType>, format: OutputFormat) -> String {
    match scenario_type {
        Some(t) => format_scenarios(&[t], format),
        None => format_scenarios(&ScenarioType::ALL, format),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_prompt(
    config: &Config,
    scenario_type: ScenarioType,
    index: Option<usize>,
    custom: Option<&str>,
    mode: PromptMode,
    guidance: bool,
    max_chars: usize,
    format: OutputFormat,
) -> Result<String> {
    let scenario = match (custom, index) {
        (Some(custom), _) => custom.to_string(),
        (None, Some(index)) => scenario_type
            .scenario(index)
            .ok_or_else(|| {
                CommandError::InvalidArgument(format!(
                    "scenario index {index} out of range for {scenario_type} (0-{})",
                    scenario_type.scenarios().len().saturating_sub(1)
                ))
            })?
            .to_string(),
        (None, None) => {
            return Err(CommandError::MissingArgument("--index or --custom".to_string()).into());
        }
    };

    let (mode_name, mut prompt) = match mode {
        PromptMode::Detailed => ("detailed", detailed_prompt(scenario_type, &scenario)),
        PromptMode::Compact => ("compact", compact_prompt(scenario_type, &scenario)),
        PromptMode::Reduced => {
            let reducer = ContextReducer::new(&config.reducer);
            let reduction = reduced_prompt(scenario_type, &scenario, &reducer, max_chars);
            ("reduced", reduction.text)
        }
    };
    if guidance {
        prompt.push_str(TOKEN_LIMIT_INSTRUCTIONS);
    }
    let tokens = log_token_usage(&prompt, mode_name);

    let mut task = task_summary(scenario_type, &scenario);
    if scenario_type.needs_token_limit() {
        task.push_str(TOKEN_LIMIT_INSTRUCTIONS);
    }

    Ok(format_prompt(
        &PromptOutput {
            scenario_type,
            mode: mode_name,
            tokens,
            prompt,
            task,
            expected_output: expected_output(scenario_type),
            scenario,
        },
        format,
    ))
}

fn cmd_chunks(
    text: Option<&str>,
    file: Option<&Path>,
    size: usize,
    overlap: usize,
    strategy: &str,
    format: OutputFormat,
) -> Result<String> {
    let input = read_input(text, file)?;
    let chunker = create_chunker(strategy, size, overlap)?;
    let chunks = chunker.chunk(&input)?;
    debug!(strategy = chunker.name(), count = chunks.len(), "chunked input");
    Ok(format_chunks(&chunks, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn run(args: &[&str]) -> Result<String> {
        let mut argv = vec!["ti-compress"];
        argv.extend_from_slice(args);
        execute(&Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_compress_inline() {
        let output = run(&["compress", "Please analyze the threat actor's lateral movement"]).unwrap();
        assert_eq!(output, "analyze the TA's LM\n");
    }

    #[test]
    fn test_compress_json() {
        let output = run(&["--format", "json", "compress", "command and control"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["compressed"], "C2");
        assert_eq!(value["max_tokens"], 8000);
    }

    #[test]
    fn test_reduce_respects_budget() {
        let context = "APT29 uses spear phishing. Lazarus targets exchanges. FIN7 hits retail.";
        let output = run(&["reduce", context, "--query", "phishing", "--max-chars", "30"]).unwrap();
        assert!(output.trim_end_matches('\n').chars().count() <= 30);
    }

    #[test]
    fn test_tokens_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", "x".repeat(40)).unwrap();
        let path = file.path().to_string_lossy().to_string();
        assert_eq!(run(&["tokens", "--file", &path]).unwrap(), "10\n");
    }

    #[test]
    fn test_prompt_modes() {
        let detailed = run(&["prompt", "-t", "malware_analysis", "-i", "0", "-m", "detailed"]).unwrap();
        let compact = run(&["prompt", "-t", "malware_analysis", "-i", "0", "-m", "compact"]).unwrap();
        assert!(compact.len() < detailed.len());
        assert!(compact.contains("INTELLIGENT APPROACH"));

        let reduced = run(&[
            "prompt", "-t", "malware_analysis", "-i", "0", "-m", "reduced", "--max-chars", "120",
        ])
        .unwrap();
        assert!(reduced.trim_end_matches('\n').chars().count() <= 120);
    }

    #[test]
    fn test_prompt_guidance_and_custom() {
        let output = run(&[
            "prompt",
            "-t",
            "comparative_analysis",
            "--custom",
            "APT28 vs APT29",
            "--guidance",
        ])
        .unwrap();
        assert!(output.contains("APT28 vs APT29"));
        assert!(output.contains("CRITICAL TOKEN LIMIT"));
    }

    #[test]
    fn test_prompt_json_carries_task() {
        let output = run(&["--format", "json", "prompt", "-t", "malware_analysis", "-i", "0"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["mode"], "compact");
        assert!(value["task"].as_str().unwrap().starts_with("Analyze malware: "));
        assert!(value["task"].as_str().unwrap().contains("CRITICAL TOKEN LIMIT"));
        assert!(value["expected_output"].as_str().unwrap().contains("detection"));
    }

    #[test]
    fn test_prompt_index_out_of_range() {
        let err = run(&["prompt", "-t", "malware_analysis", "-i", "99"]).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_prompt_requires_scenario() {
        let err = run(&["prompt", "-t", "malware_analysis"]).unwrap_err();
        assert!(err.to_string().contains("--index or --custom"));
    }

    #[test]
    fn test_chunks_invalid_overlap() {
        let result = run(&["chunks", "some text", "--size", "10", "--overlap", "10"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_chunks_json() {
        let text = "a".repeat(300);
        let output = run(&["--format", "json", "chunks", &text]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"rules": {{"max_tokens": 42}}}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();
        let output = run(&["--config", &path, "--format", "json", "compress", "text"]).unwrap();
        assert!(output.contains("\"max_tokens\": 42"));
    }

    #[test]
    fn test_missing_config_file_is_error() {
        assert!(run(&["--config", "/nonexistent/ti.json", "scenarios"]).is_err());
    }
}
