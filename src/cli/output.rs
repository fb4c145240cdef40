//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::benchmark::BenchmarkReport;
use crate::compress::Reduction;
use crate::core::Chunk;
use crate::error::Error;
use crate::scenario::ScenarioType;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Result of the `compress` command.
#[derive(Debug, Clone, Serialize)]
pub struct CompressOutput {
    /// Compressed prompt.
    pub compressed: String,
    /// Estimated tokens before compression.
    pub original_tokens: usize,
    /// Estimated tokens after compression.
    pub compressed_tokens: usize,
    /// Advisory token limit.
    pub max_tokens: usize,
}

/// Result of the `tokens` command.
#[derive(Debug, Clone, Serialize)]
pub struct TokenEstimate {
    /// Length in characters.
    pub chars: usize,
    /// Estimated tokens.
    pub tokens: usize,
}

/// A rendered scenario prompt.
#[derive(Debug, Clone, Serialize)]
pub struct PromptOutput {
    /// Scenario type.
    pub scenario_type: ScenarioType,
    /// Scenario text.
    pub scenario: String,
    /// Rendering mode name.
    pub mode: &'static str,
    /// The prompt.
    pub prompt: String,
    /// Estimated tokens of the prompt.
    pub tokens: usize,
    /// One-line task description for agent hand-off.
    pub task: String,
    /// Compressed description of the expected report.
    pub expected_output: &'static str,
}

/// Formats a rule-compression result.
#[must_use]
pub fn format_compress(output: &CompressOutput, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{}\n", output.compressed),
        OutputFormat::Json => format_json(output),
    }
}

/// Formats a context reduction.
#[must_use]
pub fn format_reduction(reduction: &Reduction, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{}\n", reduction.text),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ReductionJson<'a> {
                #[serde(flatten)]
                reduction: &'a Reduction,
                ratio_percent: f64,
            }
            format_json(&ReductionJson {
                reduction,
                ratio_percent: reduction.ratio_percent(),
            })
        }
    }
}

/// Formats a token estimate.
#[must_use]
pub fn format_tokens(estimate: &TokenEstimate, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{}\n", estimate.tokens),
        OutputFormat::Json => format_json(estimate),
    }
}

/// Formats the scenario catalog.
#[must_use]
pub fn format_scenarios(types: &[ScenarioType], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for scenario_type in types {
                let _ = writeln!(output, "{} ({scenario_type})", scenario_type.title());
                for (index, scenario) in scenario_type.scenarios().iter().enumerate() {
                    let _ = writeln!(output, "  {index:>2}  {scenario}");
                }
                output.push('\n');
            }
            output
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct CatalogEntry {
                scenario_type: ScenarioType,
                title: &'static str,
                scenarios: &'static [&'static str],
            }
            let entries: Vec<CatalogEntry> = types
                .iter()
                .map(|&t| CatalogEntry {
                    scenario_type: t,
                    title: t.title(),
                    scenarios: t.scenarios(),
                })
                .collect();
            format_json(&entries)
        }
    }
}

/// Formats a scenario prompt.
#[must_use]
pub fn format_prompt(output: &PromptOutput, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{}\n", output.prompt),
        OutputFormat::Json => format_json(output),
    }
}

/// Formats chunk windows.
#[must_use]
pub fn format_chunks(chunks: &[Chunk], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if chunks.is_empty() {
                return "No chunks.\n".to_string();
            }
            let mut output = String::new();
            let _ = writeln!(output, "{:<6} {:<14} {:<8} Preview", "Index", "Chars", "Overlap");
            output.push_str(&"-".repeat(70));
            output.push('\n');
            for chunk in chunks {
                let range = format!("{}..{}", chunk.char_range.start, chunk.char_range.end);
                let _ = writeln!(
                    output,
                    "{:<6} {:<14} {:<8} {}",
                    chunk.index,
                    range,
                    if chunk.has_overlap { "yes" } else { "no" },
                    chunk.preview(40).replace('\n', " ")
                );
            }
            output
        }
        OutputFormat::Json => format_json(&chunks),
    }
}

/// Formats a benchmark report.
#[must_use]
pub fn format_benchmark(report: &BenchmarkReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_benchmark_text(report),
        OutputFormat::Json => format_json(report),
    }
}

fn format_benchmark_text(report: &BenchmarkReport) -> String {
    let mut output = String::new();
    output.push_str("Compression Benchmark\n");
    output.push_str("=====================\n\n");
    let _ = writeln!(
        output,
        "{:<28} {:>8} {:>8} {:>9} {:>8} {:>10}",
        "Scenario", "Original", "Compact", "Reduction", "Quality", "Efficiency"
    );
    output.push_str(&"-".repeat(76));
    output.push('\n');

    for result in &report.scenarios {
        let _ = writeln!(
            output,
            "{:<28} {:>8} {:>8} {:>8.1}% {:>8} {:>+10.1}",
            result.scenario_type.as_str(),
            result.original_tokens,
            result.compressed_tokens,
            result.reduction_percent,
            result.quality.score,
            result.efficiency_improvement
        );
    }

    let summary = &report.summary;
    let total = report.scenarios.len();
    output.push('\n');
    let _ = writeln!(
        output,
        "  Tokens:            {} -> {} ({} saved, {:.1}%)",
        summary.total_original_tokens,
        summary.total_compressed_tokens,
        summary.tokens_saved,
        summary.overall_reduction_percent
    );
    let _ = writeln!(output, "  Avg quality:       {:.1}/100", summary.average_quality_score);
    let _ = writeln!(
        output,
        "  Avg efficiency:    {:+.1} points",
        summary.average_efficiency_improvement
    );
    let _ = writeln!(
        output,
        "  Context fit ({}): compact {}/{total}, detailed {}/{total}",
        report.model, summary.compressed_fit_count, summary.original_fit_count
    );
    let _ = writeln!(
        output,
        "  Overflow prevented: {}/{total}",
        summary.overflow_prevented_count
    );
    output
}

/// Formats an error for the given output format.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorJson {
                error: String,
            }
            format_json(&ErrorJson {
                error: error.to_string(),
            })
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).map_or_else(|_| "{}\n".to_string(), |s| s + "\n")
}
