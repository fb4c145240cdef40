//! Rule-based prompt compression.
//!
//! A fixed pipeline of case-insensitive regex rewrites:
//!
//! 1. Collapse whitespace runs to a single space
//! 2. Strip politeness, intensifiers and doubled near-synonyms
//! 3. Abbreviate ATT&CK and threat-intelligence vocabulary
//! 4. Strip connective filler
//! 5. Turn hyphen bullets into `•` and collapse blank lines
//! 6. Collapse repeated `.` and `!`
//!
//! Each table is applied in order and every rewrite sees the output of the
//! previous one. The pipeline is total: it never fails and never enforces a
//! token budget.

use crate::core::estimate_tokens;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Default token ceiling used when logging oversized prompts.
pub const DEFAULT_MAX_TOKENS: usize = 8000;

const REDUNDANT_PHRASES: &[&str] = &[
    r"\b(please|kindly|would you|could you)\s+",
    r"\b(comprehensive|detailed|thorough|extensive),?\s+",
    r"\b(analysis|report|intelligence)\s+(analysis|report|intelligence)",
    r"\b(provide|give|deliver)\s+(provide|give|deliver)",
    r"\b(including|containing|featuring)\s+(including|containing|featuring)",
];

/// Abbreviation table in application order.
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("threat actor", "TA"),
    ("techniques tactics and procedures", "TTPs"),
    ("MITRE ATT&CK", "ATT&CK"),
    ("comprehensive analysis", "analysis"),
    ("detailed intelligence", "intel"),
    ("associated with", "linked to"),
    ("recommendations and", "recs &"),
    ("defensive measures", "defenses"),
    ("risk assessment", "risk eval"),
    ("threat landscape", "threat env"),
    ("operating systems", "OS"),
    ("point of sale", "POS"),
    ("initial access", "IA"),
    ("lateral movement", "LM"),
    ("persistence", "persist"),
    ("privilege escalation", "priv esc"),
    ("defense evasion", "def evade"),
    ("credential access", "cred access"),
    ("discovery", "disc"),
    ("collection", "collect"),
    ("command and control", "C2"),
    ("exfiltration", "exfil"),
    ("impact", "impact"),
];

const FILLER_PHRASES: &[&str] = &[
    r"\b(in order to|so as to|for the purpose of)\s+",
    r"\b(it is important to note that|it should be noted that|it is worth noting that)\s+",
    r"\b(additionally|furthermore|moreover|in addition)\s+",
    r"\b(specifically|particularly|especially|notably)\s+",
    r"\b(however|nevertheless|nonetheless|on the other hand)\s+",
    r"\b(therefore|thus|hence|consequently)\s+",
];

#[allow(clippy::expect_used)]
fn build(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("valid regex")
}

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| build(r"\s+"));

static REMOVALS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| REDUNDANT_PHRASES.iter().copied().map(build).collect());

static SUBSTITUTIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    ABBREVIATIONS
        .iter()
        .map(|&(full, abbrev)| (build(&format!(r"\b{}\b", regex::escape(full))), abbrev))
        .collect()
});

static FILLERS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| FILLER_PHRASES.iter().copied().map(build).collect());

static BULLET: LazyLock<Regex> = LazyLock::new(|| build(r"(^|\s)-\s*"));
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| build(r"\n\s*\n"));
static DOTS: LazyLock<Regex> = LazyLock::new(|| build(r"\.{2,}"));
static BANGS: LazyLock<Regex> = LazyLock::new(|| build(r"!{2,}"));

/// Compresses a prompt with the full rule pipeline.
///
/// # Examples
///
/// ```
/// use ti_compress::compress::compress_prompt;
///
/// let out = compress_prompt("Kindly map the  command and control and exfiltration!!!");
/// assert_eq!(out, "map the C2 and exfil!");
/// ```
#[must_use]
pub fn compress_prompt(text: &str) -> String {
    let mut out = WHITESPACE.replace_all(text.trim(), " ").into_owned();

    for re in REMOVALS.iter() {
        out = re.replace_all(&out, "").into_owned();
    }
    for (re, abbrev) in SUBSTITUTIONS.iter() {
        out = re.replace_all(&out, regex::NoExpand(*abbrev)).into_owned();
    }
    for re in FILLERS.iter() {
        out = re.replace_all(&out, "").into_owned();
    }

    out = BULLET.replace_all(&out, "${1}• ").into_owned();
    out = BLANK_LINES.replace_all(&out, "\n").into_owned();
    out = DOTS.replace_all(&out, ".").into_owned();
    out = BANGS.replace_all(&out, "!").into_owned();

    out.trim().to_string()
}

/// Compresses a prompt and warns when the result still exceeds `max_tokens`.
///
/// The limit is advisory; the output is never cut.
#[must_use]
pub fn compress_with_limit(text: &str, max_tokens: usize) -> String {
    let compressed = compress_prompt(text);
    let before = estimate_tokens(text);
    let after = estimate_tokens(&compressed);
    if after > max_tokens {
        warn!(
            tokens = after,
            max_tokens, "compressed prompt still exceeds token limit"
        );
    } else {
        debug!(before, after, "prompt compressed");
    }
    compressed
}

/// Rule-based compressor carrying an advisory token limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleCompressor {
    max_tokens: usize,
}

impl Default for RuleCompressor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS)
    }
}

impl RuleCompressor {
    /// Creates a compressor with the given advisory token limit.
    #[must_use]
    pub const fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    /// Returns the advisory token limit.
    #[must_use]
    pub const fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Compresses `text`. See [`compress_with_limit`].
    #[must_use]
    pub fn compress(&self, text: &str) -> String {
        compress_with_limit(text, self.max_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("threat actor", "TA")]
    #[test_case("techniques tactics and procedures", "TTPs")]
    #[test_case("MITRE ATT&CK", "ATT&CK")]
    #[test_case("comprehensive analysis", "analysis")]
    #[test_case("detailed intelligence", "intel")]
    #[test_case("associated with", "linked to")]
    #[test_case("recommendations and", "recs &")]
    #[test_case("defensive measures", "defenses")]
    #[test_case("risk assessment", "risk eval")]
    #[test_case("threat landscape", "threat env")]
    #[test_case("operating systems", "OS")]
    #[test_case("point of sale", "POS")]
    #[test_case("initial access", "IA")]
    #[test_case("lateral movement", "LM")]
    #[test_case("persistence", "persist")]
    #[test_case("privilege escalation", "priv esc")]
    #[test_case("defense evasion", "def evade")]
    #[test_case("credential access", "cred access")]
    #[test_case("discovery", "disc")]
    #[test_case("collection", "collect")]
    #[test_case("command and control", "C2")]
    #[test_case("exfiltration", "exfil")]
    #[test_case("impact", "impact")]
    fn test_abbreviation(full: &str, abbrev: &str) {
        let out = compress_prompt(&format!("Summarize {full} now"));
        assert!(out.contains(abbrev), "{out:?} should contain {abbrev:?}");
        if !abbrev.to_lowercase().contains(&full.to_lowercase()) {
            assert!(
                !out.to_lowercase().contains(&full.to_lowercase()),
                "{out:?} should not contain {full:?}"
            );
        }
    }

    #[test]
    fn test_abbreviation_table_size() {
        assert_eq!(ABBREVIATIONS.len(), 23);
    }

    #[test]
    fn test_abbreviation_case_insensitive() {
        assert_eq!(compress_prompt("Threat Actor profile"), "TA profile");
        assert_eq!(compress_prompt("LATERAL MOVEMENT"), "LM");
    }

    #[test]
    fn test_abbreviation_respects_word_boundaries() {
        assert_eq!(compress_prompt("impactful rediscovery"), "impactful rediscovery");
    }

    #[test]
    fn test_scenario_sentence() {
        let out = compress_prompt(
            "Please provide a comprehensive, detailed analysis of the threat actor's \
             lateral movement and command and control infrastructure.",
        );
        for kept in ["TA", "LM", "C2"] {
            assert!(out.contains(kept), "{out:?} missing {kept}");
        }
        let lower = out.to_lowercase();
        for gone in ["please", "comprehensive", "detailed", "command and control"] {
            assert!(!lower.contains(gone), "{out:?} still contains {gone}");
        }
        assert_eq!(out, "provide a analysis of the TA's LM and C2 infrastructure.");
    }

    #[test]
    fn test_plain_words_are_fixed_point() {
        let text = "Summarize recent ransomware activity against hospitals";
        let once = compress_prompt(text);
        assert_eq!(once, text);
        assert_eq!(compress_prompt(&once), once);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert_eq!(compress_prompt(""), "");
        assert_eq!(compress_prompt(" \n\t "), "");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(compress_prompt("  map\n\n  the   TTPs \t "), "map the TTPs");
    }

    #[test]
    fn test_filler_removed() {
        let out = compress_prompt(
            "It is important to note that the group pivots. Furthermore they exfiltrate data \
             in order to extort victims",
        );
        assert_eq!(out, "the group pivots. they exfiltrate data extort victims");
    }

    #[test]
    fn test_doubled_synonyms_removed() {
        assert_eq!(compress_prompt("Send the report analysis"), "Send the");
        assert_eq!(compress_prompt("provide give a summary"), "a summary");
    }

    #[test]
    fn test_triple_synonym_run_only_strips_pair() {
        // Pairs are matched left to right; the third word of the run survives.
        assert_eq!(
            compress_prompt("Share analysis report intelligence today"),
            "Share  intelligence today"
        );
        assert_eq!(compress_prompt("analysis report intelligence"), "intelligence");
    }

    #[test]
    fn test_hyphen_bullets() {
        assert_eq!(
            compress_prompt("Provide:\n- aliases\n- campaigns"),
            "Provide: • aliases • campaigns"
        );
        assert_eq!(compress_prompt("-aliases"), "• aliases");
    }

    #[test]
    fn test_hyphenated_words_untouched() {
        assert_eq!(
            compress_prompt("state-sponsored spear-phishing"),
            "state-sponsored spear-phishing"
        );
    }

    #[test]
    fn test_repeated_punctuation() {
        assert_eq!(compress_prompt("Wait... now!!!"), "Wait. now!");
    }

    #[test]
    fn test_rule_compressor_matches_free_function() {
        let compressor = RuleCompressor::default();
        assert_eq!(compressor.max_tokens(), DEFAULT_MAX_TOKENS);
        let text = "Could you assess the threat landscape";
        assert_eq!(compressor.compress(text), compress_prompt(text));
        assert_eq!(RuleCompressor::new(1).compress(text), "assess the threat env");
    }
}
