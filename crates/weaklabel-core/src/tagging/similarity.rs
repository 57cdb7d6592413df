//! Token-vs-label-word similarity.
//!
//! Two strategies share one entry point:
//!
//! - **Hybrid**: when both lemmas have a word vector, `factor * cos^2`, with
//!   the factor boosted x10 on an identical lemma. Otherwise an edit-distance
//!   decay `1 / (1 + (factor * dist)^2)`.
//! - **Syntactic**: `factor / (1 + dist)`, with the same x10 boost when the
//!   lemmas are identical.
//!
//! Either result is multiplied by the token's term-frequency weight.

use std::sync::Arc;

use crate::embedding::WordVectors;
use crate::math::EXACT_MATCH_BOOST;
use crate::text::{edit_distance, Lemmatizer};
use crate::tfidf::TermFrequencyTable;

use super::vocabulary::LabelWord;
use super::Strategy;

/// A token lemmatized and weighted once, then scored against many label
/// words.
#[derive(Debug, Clone)]
pub struct PreparedToken {
    pub lemma: String,
    pub weight: f32,
}

/// Scores tokens against label words.
///
/// Holds the lemmatizer and the optional embedding space; both are shared
/// read-only across threads.
#[derive(Clone)]
pub struct TokenScorer {
    lemmatizer: Arc<dyn Lemmatizer>,
    vectors: Option<Arc<WordVectors>>,
}

impl TokenScorer {
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>, vectors: Option<Arc<WordVectors>>) -> Self {
        Self {
            lemmatizer,
            vectors,
        }
    }

    /// Whether an embedding space is attached.
    pub fn has_vectors(&self) -> bool {
        self.vectors.is_some()
    }

    /// Build a comparison word, lemmatized with this scorer's lemmatizer.
    pub fn label_word(&self, surface: &str) -> LabelWord {
        LabelWord::new(surface.to_lowercase(), self.lemmatizer.as_ref())
    }

    /// Lemmatize `token` and look up its weight in `tf`.
    pub fn prepare(&self, token: &str, tf: &TermFrequencyTable) -> PreparedToken {
        self.prepare_weighted(token, tf.weight(token))
    }

    /// Lemmatize `token` with an explicit weight.
    pub fn prepare_weighted(&self, token: &str, weight: f32) -> PreparedToken {
        PreparedToken {
            lemma: self.lemmatizer.lemmatize(token),
            weight,
        }
    }

    /// Full similarity of one token against one label word.
    pub fn similarity(
        &self,
        strategy: Strategy,
        token: &str,
        word: &LabelWord,
        factor: f32,
        tf: &TermFrequencyTable,
    ) -> f32 {
        self.score(strategy, &self.prepare(token, tf), word, factor)
    }

    /// Similarity of an already prepared token.
    pub fn score(
        &self,
        strategy: Strategy,
        token: &PreparedToken,
        word: &LabelWord,
        factor: f32,
    ) -> f32 {
        if token.lemma.is_empty() || word.lemma.is_empty() {
            return 0.0;
        }
        let raw = match (strategy, &self.vectors) {
            (Strategy::Hybrid, Some(vectors)) => {
                hybrid_similarity(vectors, &token.lemma, &word.lemma, factor)
            }
            _ => syntactic_similarity(&token.lemma, &word.lemma, factor),
        };
        raw * token.weight
    }
}

impl std::fmt::Debug for TokenScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenScorer")
            .field("vectors", &self.vectors.as_ref().map(|v| v.len()))
            .finish_non_exhaustive()
    }
}

/// Unweighted hybrid similarity between two lemmas.
pub fn hybrid_similarity(vectors: &WordVectors, a: &str, b: &str, factor: f32) -> f32 {
    let distance = edit_distance(a, b);
    match vectors.similarity(a, b) {
        Some(cosine) => {
            let factor = if distance == 0 {
                factor * EXACT_MATCH_BOOST
            } else {
                factor
            };
            factor * cosine * cosine
        }
        None => {
            let scaled = factor * distance as f32;
            1.0 / (1.0 + scaled * scaled)
        }
    }
}

/// Unweighted syntactic similarity between two lemmas.
pub fn syntactic_similarity(a: &str, b: &str, factor: f32) -> f32 {
    let distance = edit_distance(a, b);
    let factor = if distance == 0 {
        factor * EXACT_MATCH_BOOST
    } else {
        factor
    };
    factor / (1.0 + distance as f32)
}
