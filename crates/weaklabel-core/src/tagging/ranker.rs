//! Multi-source ranking.
//!
//! [`RankingEngine`] runs the per-source aggregators over every text source
//! of a post, each with its own weighting factor, and accumulates into one
//! score per label. Sources add: a label found in both the caption and the
//! hashtags outranks one found in only one of them.

use std::sync::Arc;

use crate::config::WeightsConfig;
use crate::tfidf::TermFrequencyTable;
use crate::types::{Candidate, Post, ScoredLabel, Source};

use super::aggregate::{aggregate, aggregate_max_pooled, ScoreAccumulator};
use super::similarity::TokenScorer;
use super::vocabulary::TopicVocabulary;
use super::Strategy;

/// Ranks post tokens against topic vocabularies.
///
/// Cheap to clone; the scorer and its resources are shared. Holds no
/// per-call state, so one engine may rank many posts concurrently.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    scorer: Arc<TokenScorer>,
    weights: WeightsConfig,
    strategy: Strategy,
}

impl RankingEngine {
    /// Create an engine.
    ///
    /// A hybrid strategy without an embedding space degrades to syntactic.
    pub fn new(scorer: TokenScorer, weights: WeightsConfig, strategy: Strategy) -> Self {
        let scorer = Arc::new(scorer);
        let strategy = effective_strategy(&scorer, strategy);
        Self {
            scorer,
            weights,
            strategy,
        }
    }

    /// The same engine with a different strategy.
    pub fn with_strategy(&self, strategy: Strategy) -> Self {
        Self {
            scorer: Arc::clone(&self.scorer),
            weights: self.weights.clone(),
            strategy: effective_strategy(&self.scorer, strategy),
        }
    }

    /// Strategy actually in use.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn scorer(&self) -> &TokenScorer {
        &self.scorer
    }

    /// Accumulate every source of `post` against simple labels, keeping
    /// each token's `top_k` best labels.
    pub fn accumulate<'v>(
        &self,
        post: &Post,
        vocabulary: &'v TopicVocabulary,
        top_k: usize,
        tf: &TermFrequencyTable,
    ) -> ScoreAccumulator<'v> {
        let mut accumulator = ScoreAccumulator::new(vocabulary);
        for source in Source::ALL {
            aggregate(
                &self.scorer,
                self.strategy,
                post.tokens(source),
                top_k,
                tf,
                self.weights.factor(source),
                &mut accumulator,
            );
        }
        accumulator
    }

    /// Rank simple labels for a post: at most `top_k` entries, fewer only if
    /// the vocabulary is smaller.
    pub fn rank(
        &self,
        post: &Post,
        vocabulary: &TopicVocabulary,
        top_k: usize,
        tf: &TermFrequencyTable,
    ) -> Vec<ScoredLabel> {
        self.accumulate(post, vocabulary, top_k, tf).top_k(top_k)
    }

    /// Accumulate hierarchical labels: each label scores the best of its
    /// constituent words for every token.
    pub fn accumulate_hierarchical<'v>(
        &self,
        post: &Post,
        vocabulary: &'v TopicVocabulary,
        tf: &TermFrequencyTable,
    ) -> ScoreAccumulator<'v> {
        let mut accumulator = ScoreAccumulator::new(vocabulary);
        for source in Source::HIERARCHICAL {
            aggregate_max_pooled(
                &self.scorer,
                self.strategy,
                post.tokens(source),
                tf,
                self.weights.factor(source),
                &mut accumulator,
            );
        }
        accumulator
    }

    /// Rank hierarchical labels for a post.
    pub fn rank_hierarchical(
        &self,
        post: &Post,
        vocabulary: &TopicVocabulary,
        top_k: usize,
        tf: &TermFrequencyTable,
    ) -> Vec<ScoredLabel> {
        self.accumulate_hierarchical(post, vocabulary, tf)
            .top_k(top_k)
    }

    /// Map external candidates onto hierarchical labels.
    ///
    /// Each candidate adds, per label, its best word similarity scaled by
    /// the squared confidence. Candidates have no term-frequency table, so
    /// every candidate is weighted `1.0`.
    pub fn map_candidates<'v>(
        &self,
        candidates: &[Candidate],
        vocabulary: &'v TopicVocabulary,
    ) -> ScoreAccumulator<'v> {
        let mut accumulator = ScoreAccumulator::new(vocabulary);
        let factor = self.weights.factor(Source::Caption);
        for candidate in candidates {
            let prepared = self.scorer.prepare_weighted(&candidate.label.to_lowercase(), 1.0);
            let confidence = candidate.confidence * candidate.confidence;
            for (index, label) in vocabulary.labels().iter().enumerate() {
                let best = label
                    .words()
                    .iter()
                    .map(|word| self.scorer.score(self.strategy, &prepared, word, factor))
                    .reduce(f32::max);
                if let Some(best) = best {
                    accumulator.add(index, best * confidence);
                }
            }
        }
        accumulator
    }
}

fn effective_strategy(scorer: &TokenScorer, strategy: Strategy) -> Strategy {
    if strategy == Strategy::Hybrid && !scorer.has_vectors() {
        tracing::warn!("No word vectors loaded, falling back to syntactic similarity");
        Strategy::Syntactic
    } else {
        strategy
    }
}
