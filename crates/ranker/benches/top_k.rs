//! Benchmarks for top-K ranking
//!
//! Run with: cargo bench --package ranker
//!
//! Uses a synthetic 2000-movie model.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{Catalog, ModelContext, Movie, SimilarityMatrix};
use ranker::{search_titles, SimilarityRanker, DEFAULT_K};
use std::sync::Arc;

const MOVIES: usize = 2000;

fn synthetic_model() -> Arc<ModelContext> {
    let movies = (0..MOVIES)
        .map(|i| Movie::new(i as u32, format!("Movie {}", i)))
        .collect();
    let rows = (0..MOVIES)
        .map(|i| {
            (0..MOVIES)
                .map(|j| if i == j { 1.0 } else { ((i * 31 + j * 17) % 997) as f32 / 997.0 })
                .collect()
        })
        .collect();
    let matrix = SimilarityMatrix::from_rows(rows).expect("valid synthetic matrix");
    Arc::new(ModelContext::new(Catalog::new(movies), matrix).expect("matching dimensions"))
}

fn bench_recommend(c: &mut Criterion) {
    let ranker = SimilarityRanker::new(synthetic_model());
    let query = format!("Movie {}", MOVIES / 2);
    assert!(ranker.recommend(&query, DEFAULT_K).is_ok());

    c.bench_function("recommend_top_6", |b| {
        b.iter(|| {
            let neighbors = ranker.recommend(black_box(&query), black_box(DEFAULT_K));
            black_box(neighbors)
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let model = synthetic_model();

    c.bench_function("search_titles", |b| {
        b.iter(|| {
            let hits = search_titles(model.catalog(), black_box("movie 42"), black_box(20));
            black_box(hits)
        })
    });
}

criterion_group!(benches, bench_recommend, bench_search);
criterion_main!(benches);
