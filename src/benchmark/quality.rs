//! Heuristic quality and efficiency scoring of compressed prompts.
//!
//! None of these scores involve a model. They are cheap proxies: does the
//! compressed prompt still mention what the analysis must cover, is it
//! structured, does it share vocabulary with the original.

use crate::core::estimate_tokens;
use crate::scenario::ScenarioType;
use serde::Serialize;
use std::collections::HashSet;

/// Points for covering the key elements of a scenario type.
pub const KEY_ELEMENT_POINTS: f64 = 40.0;

/// Points for a clear, guided prompt.
pub const CLARITY_POINTS: f64 = 30.0;

/// Points for sufficient vocabulary overlap with the original.
pub const COMPLETENESS_POINTS: f64 = 30.0;

/// Minimum share of original words the compressed prompt must keep.
pub const COMPLETENESS_THRESHOLD: f64 = 0.3;

/// Share of key elements that counts as "preserved".
pub const KEY_ELEMENT_THRESHOLD: f64 = 0.8;

const STRUCTURE_MARKERS: [&str; 4] = ["•", ":", "-", "\n"];

/// Terms a prompt of the given type must mention, lowercase.
#[must_use]
pub const fn key_elements(scenario_type: ScenarioType) -> &'static [&'static str] {
    match scenario_type {
        ScenarioType::ThreatActorProfiling => {
            &["aliases", "ttp", "malware", "campaigns", "targets", "defenses"]
        }
        ScenarioType::MalwareAnalysis => &[
            "family",
            "capabilities",
            "techniques",
            "platforms",
            "detection",
            "defenses",
        ],
        ScenarioType::CampaignInvestigation => {
            &["details", "timeline", "targets", "techniques", "impact", "defenses"]
        }
        ScenarioType::NavigatorLayerGeneration => {
            &["techniques", "scoring", "colors", "comments", "json", "metadata"]
        }
        ScenarioType::ComparativeAnalysis => &[
            "comparison",
            "overlapping",
            "unique",
            "risk",
            "layer",
            "recommendations",
        ],
    }
}

/// Quality assessment of one compressed prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityScore {
    /// Combined score, 0-100.
    pub score: u32,
    /// Number of key elements found.
    pub key_elements_found: usize,
    /// Number of key elements checked.
    pub key_elements_total: usize,
    /// At least 80% of key elements found.
    pub key_elements_preserved: bool,
    /// Structured, guided and not too short.
    pub clarity: bool,
    /// Enough vocabulary overlap with the original.
    pub completeness: bool,
}

/// Counts the key elements of `scenario_type` that appear in `prompt`.
#[must_use]
pub fn count_key_elements(prompt: &str, scenario_type: ScenarioType) -> usize {
    let lower = prompt.to_lowercase();
    key_elements(scenario_type)
        .iter()
        .filter(|element| lower.contains(*element))
        .count()
}

/// Checks that a prompt is structured, carries guidance and has more than
/// ten words.
#[must_use]
pub fn check_clarity(prompt: &str) -> bool {
    let has_structure = STRUCTURE_MARKERS.iter().any(|m| prompt.contains(m));
    let has_guidance = prompt.contains("INTELLIGENT") || prompt.to_lowercase().contains("approach");
    let readable = prompt.split_whitespace().count() > 10;
    has_structure && has_guidance && readable
}

/// Share of distinct original words (lowercase, whitespace-split) that
/// survive in the compressed prompt. 0.0 for an empty original.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn word_overlap(original: &str, compressed: &str) -> f64 {
    let original_words: HashSet<String> =
        original.split_whitespace().map(str::to_lowercase).collect();
    if original_words.is_empty() {
        return 0.0;
    }
    let compressed_words: HashSet<String> =
        compressed.split_whitespace().map(str::to_lowercase).collect();
    let shared = original_words.intersection(&compressed_words).count();
    shared as f64 / original_words.len() as f64
}

/// Scores how well `compressed` preserves `original`.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn assess_quality(original: &str, compressed: &str, scenario_type: ScenarioType) -> QualityScore {
    let total = key_elements(scenario_type).len();
    let found = count_key_elements(compressed, scenario_type);
    let clarity = check_clarity(compressed);
    let completeness = word_overlap(original, compressed) >= COMPLETENESS_THRESHOLD;

    let mut score = found as f64 / total as f64 * KEY_ELEMENT_POINTS;
    if clarity {
        score += CLARITY_POINTS;
    }
    if completeness {
        score += COMPLETENESS_POINTS;
    }

    QualityScore {
        score: score.min(100.0) as u32,
        key_elements_found: found,
        key_elements_total: total,
        key_elements_preserved: found as f64 >= total as f64 * KEY_ELEMENT_THRESHOLD,
        clarity,
        completeness,
    }
}

/// Simulated processing cost and efficiency of sending a prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Efficiency {
    /// Estimated prompt tokens.
    pub tokens: usize,
    /// Simulated processing time in milliseconds (1 µs per token).
    pub processing_time_ms: f64,
    /// Efficiency score, 0-100.
    pub score: f64,
}

/// Simulates the efficiency of `prompt`.
///
/// Starts from a length penalty of `100 - tokens / 100` (floored at 0),
/// then adds 20 for guidance, 15 for structure markers and 25 for
/// compressed prompts. Clamped to 0-100.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn simulate_efficiency(prompt: &str, compressed: bool) -> Efficiency {
    let tokens = estimate_tokens(prompt);
    let length_penalty = (100.0 - tokens as f64 / 100.0).max(0.0);
    let clarity_bonus = if prompt.contains("INTELLIGENT") { 20.0 } else { 0.0 };
    let structure_bonus = if ["•", ":", "-"].iter().any(|m| prompt.contains(m)) {
        15.0
    } else {
        0.0
    };
    let compression_bonus = if compressed { 25.0 } else { 0.0 };

    let score = (length_penalty + clarity_bonus + structure_bonus + compression_bonus).clamp(0.0, 100.0);

    Efficiency {
        tokens,
        processing_time_ms: round2(tokens as f64 * 0.001),
        score,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
