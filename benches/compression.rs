//! Benchmarks for prompt compression and context reduction.

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use ti_compress::compress::{ContextReducer, TfidfStrategy, compress_prompt};
use ti_compress::scenario::{ScenarioType, detailed_prompt};

fn context(sentences: usize) -> String {
    let topics = [
        "APT29 uses spear phishing emails to gain initial access",
        "The cafeteria menu changes every Monday",
        "Lazarus Group deploys custom loaders against exchanges",
        "Parking permits are renewed in January",
        "Cobalt Strike beacons beacon over HTTPS to the C2 server",
    ];
    topics
        .iter()
        .cycle()
        .take(sentences)
        .copied()
        .collect::<Vec<_>>()
        .join(". ")
}

fn bench_rules(c: &mut Criterion) {
    let prompt = detailed_prompt(
        ScenarioType::ThreatActorProfiling,
        "APT29 (Cozy Bear) - Russian state-sponsored group",
    );
    c.bench_function("compress_prompt/detailed", |b| {
        b.iter(|| compress_prompt(black_box(&prompt)));
    });
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");
    let default_chain = ContextReducer::default();
    let tfidf_only = ContextReducer::with_strategies(vec![Box::new(TfidfStrategy::new(3))], 150);

    for sentences in [10, 100, 500] {
        let text = context(sentences);
        group.bench_with_input(BenchmarkId::new("default_chain", sentences), &text, |b, text| {
            b.iter(|| default_chain.reduce(black_box(text), "APT29 phishing", 200));
        });
        group.bench_with_input(BenchmarkId::new("tfidf", sentences), &text, |b, text| {
            b.iter(|| tfidf_only.reduce(black_box(text), "APT29 phishing", 200));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rules, bench_reduce);
criterion_main!(benches);
