//! Multi-signal label ranking.
//!
//! Scores post tokens against topic vocabularies by combining edit distance,
//! word-vector similarity and per-post term-frequency weights, then
//! aggregates per-token contributions into one ranking per topic.

pub mod aggregate;
pub mod candidates;
pub mod emoji;
pub mod ranker;
pub mod similarity;
pub mod vocabulary;

use serde::{Deserialize, Serialize};

pub use aggregate::ScoreAccumulator;
pub use candidates::{CandidateProvider, JsonCandidateProvider};
pub use emoji::EmojiTable;
pub use ranker::RankingEngine;
pub use similarity::TokenScorer;
pub use vocabulary::{Label, Topic, TopicVocabulary, Vocabulary, VocabularyFiles};

/// Similarity strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Word-vector similarity where both lemmas are known, edit distance
    /// otherwise.
    #[default]
    Hybrid,
    /// Edit distance only.
    Syntactic,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Hybrid => write!(f, "hybrid"),
            Strategy::Syntactic => write!(f, "syntactic"),
        }
    }
}
