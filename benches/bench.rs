//! Criterion benchmarks for synsearch.
//!
//! Covers the hot paths of an interactive session:
//! - Synonym expansion over analyzed text
//! - Query sanitizing

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use synsearch::analysis::{Analyzer, SynonymAnalyzer, SynonymDictionary};
use synsearch::query::QuerySanitizer;

const WORDS: &[&str] = &[
    "search", "engine", "full", "text", "index", "query", "document", "field", "term",
    "phrase", "array", "vector", "list", "map", "hash", "string", "slice", "iterator",
    "buffer", "reader", "writer", "error", "result", "option",
];

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let doc_length = 50 + (i % 100);
            (0..doc_length)
                .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn create_test_dictionary() -> Arc<SynonymDictionary> {
    let groups = [
        vec!["array", "vector", "list"],
        vec!["map", "dictionary", "table"],
        vec!["error", "failure", "fault"],
        vec!["reader", "source"],
    ];
    Arc::new(SynonymDictionary::from_synonym_groups(
        groups
            .iter()
            .map(|group| group.iter().map(|s| s.to_string()).collect())
            .collect(),
    ))
}

/// Benchmark analysis with and without synonym expansion.
fn bench_synonym_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synonym_analysis");

    let analyzer = SynonymAnalyzer::new(create_test_dictionary());
    let plain = analyzer.without_expansion();
    let texts = generate_test_documents(100);

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("expanding", |b| {
        b.iter(|| {
            for text in &texts {
                let tokens = analyzer.analyze(black_box(text)).map(Iterator::count);
                let _ = black_box(tokens);
            }
        })
    });
    group.bench_function("query_side", |b| {
        b.iter(|| {
            for text in &texts {
                let tokens = plain.analyze(black_box(text)).map(Iterator::count);
                let _ = black_box(tokens);
            }
        })
    });

    group.finish();
}

/// Benchmark the query sanitizer.
fn bench_sanitizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitizer");

    let sanitizer = QuerySanitizer::new();
    let queries = [
        "vector push",
        "std::collections::HashMap",
        "-draft (notes) title:x && y || z",
        r"already\:escaped\:\:text",
    ];

    group.bench_function("sanitize", |b| {
        b.iter(|| {
            for query in &queries {
                let _ = black_box(sanitizer.sanitize(black_box(query)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_synonym_analysis, bench_sanitizer);
criterion_main!(benches);
