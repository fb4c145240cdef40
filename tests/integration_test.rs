//! Integration tests for ti-compress.

#![allow(clippy::expect_used)]

use ti_compress::compress::{
    Budget, ContextReducer, EmbeddingStrategy, Strategy, TfidfStrategy, compress_prompt,
    reduce_context,
};
use ti_compress::embedding::{DEFAULT_DIMENSIONS, FallbackEmbedder};
use ti_compress::error::{Error, Result};
use ti_compress::{Chunker, FixedChunker, ReducerConfig, estimate_tokens};

const THREAT_CONTEXT: &str = "The cafeteria menu changes every Monday. \
    APT29 uses spear phishing emails to gain initial access. \
    Parking permits are renewed in January. \
    The quarterly budget review was postponed.";

/// A strategy that always fails, standing in for an unavailable backend.
struct Unavailable(&'static str);

impl Strategy for Unavailable {
    fn name(&self) -> &'static str {
        self.0
    }

    fn budget_for(&self, max_chars: usize) -> Budget {
        Budget::Chars(max_chars)
    }

    fn attempt(&self, _text: &str, _query: &str, _budget: Budget) -> Result<String> {
        Err(Error::backend(self.0, "model not loaded"))
    }
}

#[test]
fn test_end_to_end_prompt_compression() {
    let prompt = "Please provide a comprehensive, detailed analysis of the threat actor's \
                  lateral movement and command and control infrastructure.";
    let compressed = compress_prompt(prompt);

    assert_eq!(
        compressed,
        "provide a analysis of the TA's LM and C2 infrastructure."
    );
    assert!(estimate_tokens(&compressed) < estimate_tokens(prompt));
}

#[test]
fn test_compression_is_idempotent_on_plain_words() {
    let plain = "APT29 persists via scheduled tasks on Windows hosts.";
    assert_eq!(compress_prompt(plain), plain);
    assert_eq!(compress_prompt(&compress_prompt(plain)), plain);
}

#[test]
fn test_fallback_when_every_backend_fails() {
    let reducer = ContextReducer::with_strategies(
        vec![Box::new(Unavailable("embedding")), Box::new(Unavailable("tfidf"))],
        150,
    );
    let text = "x".repeat(400);

    let reduction = reducer.reduce(&text, "anything", 200);
    assert_eq!(reduction.text, "x".repeat(150));
    assert_eq!(reduction.strategy, "truncate");
    assert_eq!(reduction.failures.len(), 2);
    assert_eq!(reduction.failures[0].strategy, "embedding");
    assert_eq!(reduction.failures[1].strategy, "tfidf");

    let tight = reducer.reduce(&text, "anything", 20);
    assert_eq!(tight.text.chars().count(), 20);
}

#[test]
fn test_fallback_past_tfidf_with_empty_vocabulary() {
    let reducer = ContextReducer::with_strategies(
        vec![Box::new(Unavailable("embedding")), Box::new(TfidfStrategy::new(1))],
        10,
    );

    let reduction = reducer.reduce("the and. of it. is was.", "the", 100);
    assert_eq!(reduction.strategy, "truncate");
    assert_eq!(reduction.text, "the and. o");
    assert!(reduction.failures[1].reason.contains("tfidf"));
}

#[test]
fn test_relevance_ordering_tfidf() {
    let reducer = ContextReducer::with_strategies(vec![Box::new(TfidfStrategy::new(1))], 150);
    let reduction = reducer.reduce(THREAT_CONTEXT, "APT29 spear phishing", 200);

    assert_eq!(reduction.strategy, "tfidf");
    assert_eq!(
        reduction.text,
        "APT29 uses spear phishing emails to gain initial access."
    );
}

#[test]
fn test_relevance_ordering_hash_embedding() {
    let blocks = [
        "The cafeteria menu changes every Monday",
        "APT29 uses spear phishing emails for access",
        "Parking permits are renewed in January",
        "The quarterly budget review was postponed",
    ];
    let text: String = blocks.iter().map(|b| format!("{b:<60}")).collect();

    let strategy = EmbeddingStrategy::new(
        Box::new(FallbackEmbedder::new(DEFAULT_DIMENSIONS)),
        FixedChunker::with_size_and_overlap(60, 0),
        60,
    );
    let reducer = ContextReducer::with_strategies(vec![Box::new(strategy)], 150);
    let reduction = reducer.reduce(&text, "spear phishing emails", 60);

    assert_eq!(reduction.strategy, "embedding");
    assert_eq!(reduction.text, blocks[1]);
}

#[test]
fn test_default_reducer_chain() {
    let reducer = ContextReducer::new(&ReducerConfig::default());
    let names = reducer.strategy_names();
    assert_eq!(names.last(), Some(&"truncate"));
    assert!(names.contains(&"tfidf"));
}

#[test]
fn test_empty_context() {
    assert_eq!(reduce_context("", "APT29", 100), "");
    assert_eq!(reduce_context(THREAT_CONTEXT, "APT29", 0), "");
}

#[test]
fn test_chunk_coverage_default_windows() {
    let text: String = ('a'..='z').cycle().take(1000).collect();
    let chunks = FixedChunker::with_size_and_overlap(150, 25)
        .chunk(&text)
        .expect("chunking should succeed");

    assert_eq!(chunks.len(), 8);
    assert_eq!(chunks[0].char_range, 0..150);
    assert_eq!(chunks[7].char_range, 875..1000);
    for pair in chunks.windows(2) {
        assert_eq!(pair[1].char_range.start, pair[0].char_range.end - 25);
    }

    let mut covered = vec![false; 1000];
    for chunk in &chunks {
        for i in chunk.char_range.clone() {
            covered[i] = true;
        }
    }
    assert!(covered.iter().all(|&c| c));
}

/// Joins chunk contents, dropping the part each chunk shares with the previous one.
fn rebuild_from_chunks(chunks: &[ti_compress::core::Chunk]) -> String {
    let mut rebuilt = String::new();
    let mut covered_to: usize = 0;
    for chunk in chunks {
        let shared = covered_to.saturating_sub(chunk.char_range.start);
        rebuilt.extend(chunk.content.chars().skip(shared));
        covered_to = chunk.char_range.end;
    }
    rebuilt
}

#[test]
fn test_chunks_rebuild_multibyte_text() {
    let text: String = "αβγ😀 ".chars().cycle().take(1000).collect();
    let chunks = FixedChunker::with_size_and_overlap(150, 25)
        .chunk(&text)
        .expect("chunking should succeed");

    assert_eq!(chunks.len(), 8);
    for pair in chunks.windows(2) {
        let tail: String = pair[0].content.chars().skip(125).collect();
        let head: String = pair[1].content.chars().take(25).collect();
        assert_eq!(tail, head);
    }
    for chunk in &chunks {
        assert_eq!(chunk.content.chars().count(), chunk.char_range.len());
    }
    assert_eq!(rebuild_from_chunks(&chunks), text);
}

mod token_estimates {
    use test_case::test_case;
    use ti_compress::estimate_tokens;

    #[test_case("", 0 ; "empty")]
    #[test_case("abc", 0 ; "below one token")]
    #[test_case("abcd", 1 ; "one token")]
    #[test_case("Lateral movement", 4 ; "ascii words")]
    #[test_case("ÄÖÜäöüß!", 2 ; "multibyte counts chars")]
    fn test_estimate(text: &str, expected: usize) {
        assert_eq!(estimate_tokens(text), expected);
    }
}

mod property_tests {
    use proptest::prelude::*;
    use ti_compress::compress::{ContextReducer, compress_prompt};
    use ti_compress::{Chunker, FixedChunker, estimate_tokens};

    proptest! {
        #[test]
        fn reduction_never_exceeds_budget(
            text in "\\PC{0,500}",
            query in "[a-zA-Z ]{0,30}",
            max_chars in 0usize..300,
        ) {
            let reducer = ContextReducer::default();
            let reduction = reducer.reduce(&text, &query, max_chars);
            prop_assert!(reduction.text.chars().count() <= max_chars);
            prop_assert_eq!(reduction.final_chars, reduction.text.chars().count());
        }

        #[test]
        fn sentence_heavy_reduction_never_exceeds_budget(
            sentences in prop::collection::vec("[a-zA-Z ]{1,80}", 0..12),
            max_chars in 0usize..200,
        ) {
            let text = sentences.join(". ");
            let reducer = ContextReducer::default();
            prop_assert!(reducer.reduce(&text, "threat actor", max_chars).text.chars().count() <= max_chars);
        }

        #[test]
        fn token_estimate_is_monotone(a in "\\PC{0,200}", b in "\\PC{0,200}") {
            let joined = format!("{a}{b}");
            prop_assert!(estimate_tokens(&a) <= estimate_tokens(&joined));
        }

        #[test]
        fn compression_is_deterministic(text in "[a-zA-Z ,.!'-]{0,200}") {
            prop_assert_eq!(compress_prompt(&text), compress_prompt(&text));
        }

        #[test]
        fn fixed_chunks_cover_text(len in 1usize..2000, size in 2usize..300, overlap_seed in 0usize..300) {
            let overlap = overlap_seed % size;
            let text = "x".repeat(len);
            let chunks = FixedChunker::with_size_and_overlap(size, overlap)
                .chunk(&text)
                .expect("valid configuration");

            prop_assert_eq!(chunks.first().map(|c| c.char_range.start), Some(0));
            prop_assert_eq!(chunks.last().map(|c| c.char_range.end), Some(len));
            for pair in chunks.windows(2) {
                prop_assert!(pair[1].char_range.start <= pair[0].char_range.end);
            }
            prop_assert!(chunks.iter().all(|c| c.len_chars() <= size));
        }

        #[test]
        fn fixed_chunks_rebuild_text(text in "\\PC{1,600}", size in 2usize..200, overlap_seed in 0usize..200) {
            let overlap = overlap_seed % size;
            let chunks = FixedChunker::with_size_and_overlap(size, overlap)
                .chunk(&text)
                .expect("valid configuration");
            prop_assert_eq!(super::rebuild_from_chunks(&chunks), text);
        }
    }
}

/// CLI command integration tests.
mod cli_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use ti_compress::cli::commands::execute;
    use ti_compress::cli::parser::{Cli, Commands};

    fn bin() -> Command {
        let mut cmd = Command::cargo_bin("ti-compress").expect("binary should build");
        cmd.env_remove("TI_COMPRESS_CONFIG").env_remove("RUST_LOG");
        cmd
    }

    fn make_cli(format: &str, command: Commands) -> Cli {
        Cli {
            config: None,
            verbose: false,
            format: format.to_string(),
            command,
        }
    }

    #[test]
    fn test_execute_tokens() {
        let cli = make_cli(
            "text",
            Commands::Tokens {
                text: Some("abcdefgh".to_string()),
                file: None,
            },
        );
        assert_eq!(execute(&cli).expect("tokens"), "2\n");
    }

    #[test]
    fn test_execute_reduce_json() {
        let cli = make_cli(
            "json",
            Commands::Reduce {
                text: Some(super::THREAT_CONTEXT.to_string()),
                file: None,
                query: "APT29 spear phishing".to_string(),
                max_chars: 80,
            },
        );
        let output = execute(&cli).expect("reduce");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert!(value["final_chars"].as_u64().expect("final_chars") <= 80);
        assert!(value["strategy"].is_string());
    }

    #[test]
    fn test_compress_from_stdin() {
        bin()
            .arg("compress")
            .write_stdin("Please analyze the threat actor's lateral movement")
            .assert()
            .success()
            .stdout("analyze the TA's LM\n");
    }

    #[test]
    fn test_reduce_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "{}", super::THREAT_CONTEXT).expect("write context");

        bin()
            .args(["reduce", "--query", "phishing", "--max-chars", "60", "--file"])
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::function(|out: &str| {
                let body = out.trim_end_matches('\n');
                !body.is_empty() && body.chars().count() <= 60
            }));
    }

    #[test]
    fn test_scenarios_listing() {
        bin()
            .args(["scenarios", "-t", "threat_actor_profiling"])
            .assert()
            .success()
            .stdout(predicate::str::contains("APT29 (Cozy Bear)"));
    }

    #[test]
    fn test_benchmark_table() {
        bin()
            .arg("benchmark")
            .assert()
            .success()
            .stdout(predicate::str::contains("Compression Benchmark"))
            .stdout(predicate::str::contains("comparative_analysis"));
    }

    #[test]
    fn test_text_error_goes_to_stderr() {
        bin()
            .args(["prompt", "-t", "malware_analysis", "-i", "99"])
            .assert()
            .failure()
            .stderr(predicate::str::starts_with("Error:"));
    }

    #[test]
    fn test_json_error_goes_to_stdout() {
        bin()
            .args(["--format", "json", "--config", "/nonexistent/ti-compress.json", "scenarios"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("\"error\""));
    }

    #[test]
    fn test_config_from_environment() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"reducer": {{"chunk_size": 50, "chunk_overlap": 0}}}}"#)
            .expect("write config");
        let text = "y".repeat(120);

        bin()
            .env("TI_COMPRESS_CONFIG", file.path())
            .args(["--format", "json", "chunks", &text])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"index\": 2"));
    }
}
