//! Benchmarks for the weaklabel ranking engine.
//!
//! Run with: cargo bench -p weaklabel-core

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use weaklabel_core::config::WeightsConfig;
use weaklabel_core::tagging::{Label, RankingEngine, Strategy, TokenScorer, TopicVocabulary};
use weaklabel_core::text::{edit_distance, MorphyLemmatizer};
use weaklabel_core::{Post, TermFrequencyTable, WordVectors};

const ITEMS: &[&str] = &[
    "jeans", "dress", "skirt", "blouse", "shirt", "sweater", "cardigan", "jacket", "coat",
    "blazer", "handbag", "tote", "backpack", "sneakers", "boots", "sandals", "heels", "scarf",
    "hat", "belt", "sunglasses", "necklace", "earrings", "bracelet", "watch", "shorts",
    "leggings", "jumpsuit", "romper", "hoodie",
];

fn post() -> Post {
    let words = |s: &str| s.split_whitespace().map(String::from).collect::<Vec<_>>();
    Post {
        id: "bench".into(),
        caption: words("loving my new denim jeans and white sneakers for the weekend"),
        comments: words("where is the handbag from so cute love the boots"),
        tags: words("@zara @hm"),
        hashtags: words("ootd denimjeans streetstyle fashion"),
        segmented_hashtags: words("denim jeans street style"),
        emojis: vec![],
    }
}

fn vectors() -> WordVectors {
    let rows = ITEMS.iter().enumerate().map(|(i, w)| {
        let v: Vec<f32> = (0..50).map(|d| ((i * 31 + d * 7) % 13) as f32 - 6.0).collect();
        (w.trim_end_matches('s').to_string(), v)
    });
    WordVectors::from_rows(50, rows).unwrap()
}

fn benchmark_edit_distance(c: &mut Criterion) {
    c.bench_function("edit_distance", |b| {
        b.iter(|| edit_distance(black_box("sunglasses"), black_box("sweater")))
    });
}

fn benchmark_rank(c: &mut Criterion) {
    let lemmatizer = Arc::new(MorphyLemmatizer::new());
    let vocab = TopicVocabulary::simple(ITEMS, lemmatizer.as_ref());
    let tf = TermFrequencyTable::from_pairs([("jeans", 0.5), ("denim", 0.3), ("sneakers", 0.4)]);
    let post = post();

    let syntactic = RankingEngine::new(
        TokenScorer::new(lemmatizer.clone(), None),
        WeightsConfig::default(),
        Strategy::Syntactic,
    );
    c.bench_function("rank_syntactic", |b| {
        b.iter(|| syntactic.rank(black_box(&post), &vocab, 10, &tf))
    });

    let hybrid = RankingEngine::new(
        TokenScorer::new(lemmatizer, Some(Arc::new(vectors()))),
        WeightsConfig::default(),
        Strategy::Hybrid,
    );
    c.bench_function("rank_hybrid", |b| {
        b.iter(|| hybrid.rank(black_box(&post), &vocab, 10, &tf))
    });
}

fn benchmark_rank_hierarchical(c: &mut Criterion) {
    let lemmatizer = Arc::new(MorphyLemmatizer::new());
    let labels: Vec<Label> = ITEMS
        .chunks(3)
        .map(|chunk| Label::Hierarchical {
            name: chunk[0].to_string(),
            words: chunk.iter().map(|w| w.to_string()).collect(),
        })
        .collect();
    let vocab = TopicVocabulary::compile(&labels, lemmatizer.as_ref());
    let engine = RankingEngine::new(
        TokenScorer::new(lemmatizer, None),
        WeightsConfig::default(),
        Strategy::Syntactic,
    );
    let post = post();
    let tf = TermFrequencyTable::empty();

    c.bench_function("rank_hierarchical", |b| {
        b.iter(|| engine.rank_hierarchical(black_box(&post), &vocab, 10, &tf))
    });
}

criterion_group!(
    benches,
    benchmark_edit_distance,
    benchmark_rank,
    benchmark_rank_hierarchical,
);
criterion_main!(benches);
