//! Compression benchmark harness.
//!
//! Compares the detailed prompt of one scenario per type with its compact
//! counterpart and reports:
//!
//! - token reduction
//! - quality preservation heuristics
//! - simulated LLM efficiency
//! - context-window overflow for the configured model

pub mod overflow;
pub mod quality;

pub use overflow::{OverflowCheck, OverflowStatus, simulate_overflow};
pub use quality::{Efficiency, QualityScore, assess_quality, simulate_efficiency};

use crate::config::BenchmarkConfig;
use crate::core::estimate_tokens;
use crate::io::truncate_chars;
use crate::scenario::{ScenarioType, compact_prompt, detailed_prompt};
use serde::Serialize;
use tracing::{debug, info};

/// Maximum characters of a scenario name shown in reports.
const NAME_PREVIEW_CHARS: usize = 50;

/// A prompt pair under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchmarkCase {
    /// Scenario type.
    pub scenario_type: ScenarioType,
    /// Scenario text.
    pub scenario: String,
    /// Verbose prompt.
    pub original: String,
    /// Compact prompt.
    pub compressed: String,
}

impl BenchmarkCase {
    /// Builds the detailed/compact pair for a scenario.
    #[must_use]
    pub fn new(scenario_type: ScenarioType, scenario: &str) -> Self {
        Self {
            scenario_type,
            scenario: scenario.to_string(),
            original: detailed_prompt(scenario_type, scenario),
            compressed: compact_prompt(scenario_type, scenario),
        }
    }
}

/// The standard benchmark set: the first catalog scenario of each type.
#[must_use]
pub fn default_cases() -> Vec<BenchmarkCase> {
    ScenarioType::ALL
        .iter()
        .filter_map(|&t| t.scenario(0).map(|s| BenchmarkCase::new(t, s)))
        .collect()
}

/// Per-scenario benchmark outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    /// Scenario type.
    pub scenario_type: ScenarioType,
    /// Scenario name, shortened for display.
    pub scenario_name: String,
    /// Estimated tokens of the detailed prompt.
    pub original_tokens: usize,
    /// Estimated tokens of the compact prompt.
    pub compressed_tokens: usize,
    /// Token reduction in percent, one decimal.
    pub reduction_percent: f64,
    /// Tokens saved; negative if the compact prompt is longer.
    pub tokens_saved: i64,
    /// Quality of the compact prompt.
    pub quality: QualityScore,
    /// Simulated efficiency of the detailed prompt.
    pub original_efficiency: Efficiency,
    /// Simulated efficiency of the compact prompt.
    pub compressed_efficiency: Efficiency,
    /// Efficiency gain in points.
    pub efficiency_improvement: f64,
    /// Overflow check of the detailed prompt.
    pub original_overflow: OverflowCheck,
    /// Overflow check of the compact prompt.
    pub compressed_overflow: OverflowCheck,
}

/// Aggregated benchmark figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkSummary {
    /// Sum of detailed prompt tokens.
    pub total_original_tokens: usize,
    /// Sum of compact prompt tokens.
    pub total_compressed_tokens: usize,
    /// Total tokens saved.
    pub tokens_saved: i64,
    /// Overall reduction in percent, one decimal.
    pub overall_reduction_percent: f64,
    /// Mean quality score, one decimal.
    pub average_quality_score: f64,
    /// Mean efficiency gain, one decimal.
    pub average_efficiency_improvement: f64,
    /// Compact prompts that fit the context window.
    pub compressed_fit_count: usize,
    /// Detailed prompts that fit the context window.
    pub original_fit_count: usize,
    /// Scenarios whose detailed prompt overflows while the compact one fits.
    pub overflow_prevented_count: usize,
}

/// Full benchmark report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    /// Model used for the overflow simulation.
    pub model: String,
    /// Per-scenario results in case order.
    pub scenarios: Vec<ScenarioResult>,
    /// Aggregates.
    pub summary: BenchmarkSummary,
}

#[allow(clippy::cast_precision_loss)]
fn percent_reduction(original: usize, compressed: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    round1((original as f64 - compressed as f64) / original as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[allow(clippy::cast_possible_wrap)]
const fn signed(value: usize) -> i64 {
    value as i64
}

fn scenario_name(scenario: &str) -> String {
    let preview = truncate_chars(scenario, NAME_PREVIEW_CHARS);
    if preview.len() < scenario.len() {
        format!("{preview}...")
    } else {
        preview.to_string()
    }
}

/// Benchmarks a single prompt pair.
#[must_use]
pub fn evaluate_case(case: &BenchmarkCase, model: &str, config: &BenchmarkConfig) -> ScenarioResult {
    let original_tokens = estimate_tokens(&case.original);
    let compressed_tokens = estimate_tokens(&case.compressed);
    let original_efficiency = simulate_efficiency(&case.original, false);
    let compressed_efficiency = simulate_efficiency(&case.compressed, true);
    let efficiency_improvement = compressed_efficiency.score - original_efficiency.score;

    debug!(
        scenario_type = %case.scenario_type,
        original_tokens,
        compressed_tokens,
        "benchmarked prompt pair"
    );

    ScenarioResult {
        scenario_type: case.scenario_type,
        scenario_name: scenario_name(&case.scenario),
        original_tokens,
        compressed_tokens,
        reduction_percent: percent_reduction(original_tokens, compressed_tokens),
        tokens_saved: signed(original_tokens) - signed(compressed_tokens),
        quality: assess_quality(&case.original, &case.compressed, case.scenario_type),
        original_efficiency,
        compressed_efficiency,
        efficiency_improvement,
        original_overflow: simulate_overflow(&case.original, model, config),
        compressed_overflow: simulate_overflow(&case.compressed, model, config),
    }
}

/// Runs the benchmark over `cases`.
///
/// `model` overrides the configured model for the overflow simulation.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn run_benchmark(
    cases: &[BenchmarkCase],
    model: Option<&str>,
    config: &BenchmarkConfig,
) -> BenchmarkReport {
    let model = model.unwrap_or(&config.model);
    info!(cases = cases.len(), model, "running compression benchmark");

    let scenarios: Vec<ScenarioResult> = cases
        .iter()
        .map(|case| evaluate_case(case, model, config))
        .collect();

    let total_original_tokens: usize = scenarios.iter().map(|s| s.original_tokens).sum();
    let total_compressed_tokens: usize = scenarios.iter().map(|s| s.compressed_tokens).sum();
    let count = scenarios.len().max(1) as f64;

    let summary = BenchmarkSummary {
        total_original_tokens,
        total_compressed_tokens,
        tokens_saved: signed(total_original_tokens) - signed(total_compressed_tokens),
        overall_reduction_percent: percent_reduction(total_original_tokens, total_compressed_tokens),
        average_quality_score: round1(
            scenarios.iter().map(|s| f64::from(s.quality.score)).sum::<f64>() / count,
        ),
        average_efficiency_improvement: round1(
            scenarios.iter().map(|s| s.efficiency_improvement).sum::<f64>() / count,
        ),
        compressed_fit_count: scenarios.iter().filter(|s| s.compressed_overflow.fits()).count(),
        original_fit_count: scenarios.iter().filter(|s| s.original_overflow.fits()).count(),
        overflow_prevented_count: scenarios
            .iter()
            .filter(|s| !s.original_overflow.fits() && s.compressed_overflow.fits())
            .count(),
    };

    info!(
        tokens_saved = summary.tokens_saved,
        reduction = summary.overall_reduction_percent,
        quality = summary.average_quality_score,
        "benchmark complete"
    );

    BenchmarkReport {
        model: model.to_string(),
        scenarios,
        summary,
    }
}
