//! Budget-constrained context reduction with strategy fallback.

use crate::chunking::FixedChunker;
use crate::compress::strategy::{EmbeddingStrategy, Strategy, TfidfStrategy, TruncationStrategy};
use crate::compress::{Reduction, StrategyFailure};
use crate::config::ReducerConfig;
use crate::embedding::create_embedder;
use crate::io::{char_count, truncate_chars};
use tracing::{info, warn};

/// Name reported when every configured strategy failed.
const EXHAUSTED: &str = "truncate";

/// Reduces context to a character budget.
///
/// Strategies are tried in order; the first success wins and its output is
/// clamped to the caller's budget. When all of them fail the text is
/// truncated, so [`ContextReducer::reduce`] never fails.
///
/// # Examples
///
/// ```
/// use ti_compress::compress::ContextReducer;
/// use ti_compress::config::ReducerConfig;
///
/// let reducer = ContextReducer::new(&ReducerConfig::default());
/// let reduction = reducer.reduce("Lazarus targets crypto exchanges.", "Lazarus", 10);
/// assert_eq!(reduction.text, "Lazarus ta");
/// ```
pub struct ContextReducer {
    strategies: Vec<Box<dyn Strategy>>,
    fallback_chars: usize,
}

impl Default for ContextReducer {
    fn default() -> Self {
        Self::new(&ReducerConfig::default())
    }
}

impl ContextReducer {
    /// Builds the standard chain: embedding, TF-IDF, truncation.
    ///
    /// If no embedder can be created the embedding step is left out.
    ///
    /// Without the `fastembed-embeddings` feature the embedding step runs
    /// on the hash [`FallbackEmbedder`](crate::embedding::FallbackEmbedder),
    /// so chunks are scored by shared words rather than meaning. Enable the
    /// feature for semantic selection.
    #[must_use]
    pub fn new(config: &ReducerConfig) -> Self {
        let mut strategies: Vec<Box<dyn Strategy>> = Vec::with_capacity(3);

        match create_embedder() {
            Ok(embedder) => strategies.push(Box::new(EmbeddingStrategy::new(
                embedder,
                FixedChunker::with_size_and_overlap(config.chunk_size, config.chunk_overlap),
                config.embedding_max_chars,
            ))),
            Err(e) => warn!(error = %e, "embedder unavailable; skipping embedding strategy"),
        }

        strategies.push(Box::new(
            TfidfStrategy::new(config.tfidf_max_sentences)
                .with_min_sentences(config.tfidf_min_sentences),
        ));
        strategies.push(Box::new(TruncationStrategy::new(config.fallback_chars)));

        Self {
            strategies,
            fallback_chars: config.fallback_chars,
        }
    }

    /// Builds a reducer from an explicit strategy list.
    ///
    /// `fallback_chars` caps the output when every strategy fails.
    #[must_use]
    pub fn with_strategies(strategies: Vec<Box<dyn Strategy>>, fallback_chars: usize) -> Self {
        Self {
            strategies,
            fallback_chars,
        }
    }

    /// Returns the strategy names in the order they are tried.
    #[must_use]
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Reduces `text` to at most `max_chars` characters, favoring content
    /// relevant to `query`.
    pub fn reduce(&self, text: &str, query: &str, max_chars: usize) -> Reduction {
        let original_chars = char_count(text);
        let mut failures = Vec::new();

        for strategy in &self.strategies {
            let budget = strategy.budget_for(max_chars);
            match strategy.attempt(text, query, budget) {
                Ok(output) => {
                    let reduction = finish(
                        truncate_chars(&output, max_chars),
                        strategy.name(),
                        original_chars,
                        failures,
                    );
                    info!(
                        strategy = reduction.strategy,
                        original_chars,
                        final_chars = reduction.final_chars,
                        ratio = %format!("{:.1}%", reduction.ratio_percent()),
                        "context reduced"
                    );
                    return reduction;
                }
                Err(e) => {
                    warn!(
                        strategy = strategy.name(),
                        error = %e,
                        original_chars,
                        target = %budget,
                        "compression strategy failed, falling back"
                    );
                    failures.push(StrategyFailure {
                        strategy: strategy.name(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let limit = self.fallback_chars.min(max_chars);
        warn!(limit, "all compression strategies failed, truncating");
        finish(
            truncate_chars(text, limit),
            EXHAUSTED,
            original_chars,
            failures,
        )
    }
}

fn finish(
    text: &str,
    strategy: &'static str,
    original_chars: usize,
    failures: Vec<StrategyFailure>,
) -> Reduction {
    Reduction {
        text: text.to_string(),
        strategy,
        original_chars,
        final_chars: char_count(text),
        failures,
    }
}

/// Reduces `text` with the default strategy chain.
///
/// The result never exceeds `max_chars` characters.
#[must_use]
pub fn reduce_context(text: &str, query: &str, max_chars: usize) -> String {
    ContextReducer::default().reduce(text, query, max_chars).text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::Budget;
    use crate::error::{Error, Result};

    struct Failing(&'static str);

    impl Strategy for Failing {
        fn name(&self) -> &'static str {
            self.0
        }

        fn budget_for(&self, max_chars: usize) -> Budget {
            Budget::Chars(max_chars)
        }

        fn attempt(&self, _text: &str, _query: &str, _budget: Budget) -> Result<String> {
            Err(Error::backend(self.0, "forced failure"))
        }
    }

    struct Echo;

    impl Strategy for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn budget_for(&self, max_chars: usize) -> Budget {
            Budget::Chars(max_chars)
        }

        fn attempt(&self, text: &str, _query: &str, _budget: Budget) -> Result<String> {
            Ok(text.repeat(2))
        }
    }

    const CONTEXT: &str = "The cafeteria menu changes every Monday. \
        FIN7 deploys Carbanak against point of sale terminals. \
        Parking permits are renewed in January.";

    #[test]
    fn test_default_chain() {
        let reducer = ContextReducer::default();
        assert_eq!(reducer.strategy_names(), vec!["embedding", "tfidf", "truncate"]);
    }

    #[test]
    fn test_first_success_wins() {
        let reducer = ContextReducer::with_strategies(
            vec![Box::new(Failing("embedding")), Box::new(TfidfStrategy::new(1))],
            150,
        );
        let reduction = reducer.reduce(CONTEXT, "FIN7 Carbanak point of sale", 200);
        assert_eq!(reduction.strategy, "tfidf");
        assert_eq!(reduction.text, "FIN7 deploys Carbanak against point of sale terminals.");
        assert_eq!(reduction.failures.len(), 1);
        assert_eq!(reduction.failures[0].strategy, "embedding");
        assert!(reduction.failures[0].reason.contains("forced failure"));
    }

    #[test]
    fn test_output_clamped_to_budget() {
        let reducer = ContextReducer::with_strategies(vec![Box::new(Echo)], 150);
        let reduction = reducer.reduce("abcdef", "", 8);
        assert_eq!(reduction.text, "abcdefab");
        assert_eq!(reduction.final_chars, 8);
    }

    #[test]
    fn test_all_failures_truncate() {
        let reducer = ContextReducer::with_strategies(
            vec![Box::new(Failing("embedding")), Box::new(Failing("tfidf"))],
            10,
        );
        let reduction = reducer.reduce(CONTEXT, "query", 200);
        assert_eq!(reduction.strategy, "truncate");
        assert_eq!(reduction.text, "The cafete");
        assert_eq!(reduction.failures.len(), 2);
    }

    #[test]
    fn test_empty_strategy_list() {
        let reducer = ContextReducer::with_strategies(Vec::new(), 150);
        let reduction = reducer.reduce(CONTEXT, "query", 5);
        assert_eq!(reduction.text, "The c");
        assert!(reduction.failures.is_empty());
    }

    #[test]
    fn test_default_chain_respects_budget() {
        for max_chars in [0, 1, 40, 150, 500] {
            let out = reduce_context(CONTEXT, "FIN7 Carbanak", max_chars);
            assert!(out.chars().count() <= max_chars, "{max_chars}: {out:?}");
        }
    }

    #[test]
    fn test_empty_text() {
        let reduction = ContextReducer::default().reduce("", "query", 100);
        assert_eq!(reduction.text, "");
        assert_eq!(reduction.original_chars, 0);
    }
}
