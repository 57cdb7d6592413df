//! Per-source score aggregation.

use crate::math::rank_order;
use crate::tfidf::TermFrequencyTable;
use crate::types::ScoredLabel;

use super::similarity::TokenScorer;
use super::vocabulary::TopicVocabulary;
use super::Strategy;

/// Running score per label of one vocabulary.
///
/// Every label starts at `0.0` and only ever receives additions. One
/// accumulator is created per ranking call and consumed by it.
#[derive(Debug, Clone)]
pub struct ScoreAccumulator<'v> {
    vocabulary: &'v TopicVocabulary,
    scores: Vec<f32>,
}

impl<'v> ScoreAccumulator<'v> {
    pub fn new(vocabulary: &'v TopicVocabulary) -> Self {
        Self {
            vocabulary,
            scores: vec![0.0; vocabulary.len()],
        }
    }

    pub(crate) fn add(&mut self, index: usize, score: f32) {
        self.scores[index] += score;
    }

    /// Score of a label by name.
    pub fn get(&self, label: &str) -> Option<f32> {
        self.vocabulary
            .labels()
            .iter()
            .position(|l| l.name() == label)
            .map(|i| self.scores[i])
    }

    /// `(label, score)` for every label, in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (&'v str, f32)> + '_ {
        self.vocabulary
            .labels()
            .iter()
            .map(|l| l.name())
            .zip(self.scores.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Every label, best first.
    pub fn into_ranked(self) -> Vec<ScoredLabel> {
        let mut ranked: Vec<(&str, f32)> = self.iter().collect();
        ranked.sort_by(|a, b| rank_order(*a, *b));
        ranked
            .into_iter()
            .map(|(label, score)| ScoredLabel::new(label, score))
            .collect()
    }

    /// The `top_k` best labels.
    pub fn top_k(self, top_k: usize) -> Vec<ScoredLabel> {
        let mut ranked = self.into_ranked();
        ranked.truncate(top_k);
        ranked
    }
}

/// Score every token against every label name and add each token's `top_k`
/// best labels into `accumulator`.
pub fn aggregate<S: AsRef<str>>(
    scorer: &TokenScorer,
    strategy: Strategy,
    tokens: &[S],
    top_k: usize,
    tf: &TermFrequencyTable,
    factor: f32,
    accumulator: &mut ScoreAccumulator<'_>,
) {
    let vocabulary = accumulator.vocabulary;
    let labels = vocabulary.labels();
    let mut scored: Vec<(usize, f32)> = Vec::with_capacity(labels.len());

    for token in tokens {
        let prepared = scorer.prepare(token.as_ref(), tf);
        scored.clear();
        scored.extend(
            labels
                .iter()
                .enumerate()
                .map(|(i, label)| (i, scorer.score(strategy, &prepared, label.name_word(), factor))),
        );
        scored.sort_by(|a, b| rank_order((labels[a.0].name(), a.1), (labels[b.0].name(), b.1)));

        for &(index, score) in scored.iter().take(top_k) {
            accumulator.add(index, score);
        }
    }
}

/// Add, for every token and every label, the best similarity among the
/// label's constituent words. Labels without words receive nothing.
pub fn aggregate_max_pooled<S: AsRef<str>>(
    scorer: &TokenScorer,
    strategy: Strategy,
    tokens: &[S],
    tf: &TermFrequencyTable,
    factor: f32,
    accumulator: &mut ScoreAccumulator<'_>,
) {
    let vocabulary = accumulator.vocabulary;
    let labels = vocabulary.labels();
    for token in tokens {
        let prepared = scorer.prepare(token.as_ref(), tf);
        for (index, label) in labels.iter().enumerate() {
            let best = label
                .words()
                .iter()
                .map(|word| scorer.score(strategy, &prepared, word, factor))
                .reduce(f32::max);
            if let Some(best) = best {
                accumulator.add(index, best);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagging::vocabulary::Label;
    use crate::text::MorphyLemmatizer;
    use std::sync::Arc;

    fn scorer() -> TokenScorer {
        TokenScorer::new(Arc::new(MorphyLemmatizer::new()), None)
    }

    #[test]
    fn test_accumulator_starts_at_zero_for_every_label() {
        let vocab = TopicVocabulary::simple(&["jeans", "dress", "tote"], &MorphyLemmatizer::new());
        let acc = ScoreAccumulator::new(&vocab);
        assert_eq!(acc.len(), 3);
        assert!(acc.iter().all(|(_, s)| s == 0.0));
        assert_eq!(acc.get("dress"), Some(0.0));
        assert_eq!(acc.get("skirt"), None);
    }

    #[test]
    fn test_top_k_per_token() {
        let lemmatizer = MorphyLemmatizer::new();
        let vocab = TopicVocabulary::simple(&["jean", "bean", "dress"], &lemmatizer);
        let mut acc = ScoreAccumulator::new(&vocab);
        let tf = TermFrequencyTable::from_pairs([("jeans", 1.0)]);

        aggregate(&scorer(), Strategy::Syntactic, &["jeans"], 1, &tf, 1.0, &mut acc);

        assert!((acc.get("jean").unwrap() - 10.0).abs() < 1e-6);
        // outside the token's top 1, despite a non-zero similarity
        assert_eq!(acc.get("bean"), Some(0.0));
        assert_eq!(acc.get("dress"), Some(0.0));
    }

    #[test]
    fn test_ties_cut_by_label_name() {
        let lemmatizer = MorphyLemmatizer::new();
        // "coat" is one edit from both
        let vocab = TopicVocabulary::simple(&["cost", "boat"], &lemmatizer);
        let mut acc = ScoreAccumulator::new(&vocab);

        aggregate(
            &scorer(),
            Strategy::Syntactic,
            &["coat"],
            1,
            &TermFrequencyTable::empty(),
            1.0,
            &mut acc,
        );

        assert!(acc.get("boat").unwrap() > 0.0);
        assert_eq!(acc.get("cost"), Some(0.0));
    }

    #[test]
    fn test_max_pooling_takes_best_word() {
        let lemmatizer = MorphyLemmatizer::new();
        let labels = vec![Label::Hierarchical {
            name: "bag".into(),
            words: vec!["purse".into(), "handbag".into(), "tote".into()],
        }];
        let vocab = TopicVocabulary::compile(&labels, &lemmatizer);
        let scorer = scorer();
        let tf = TermFrequencyTable::from_pairs([("handbag", 1.0)]);

        let mut acc = ScoreAccumulator::new(&vocab);
        aggregate_max_pooled(&scorer, Strategy::Syntactic, &["handbag"], &tf, 1.0, &mut acc);

        let handbag = scorer.similarity(
            Strategy::Syntactic,
            "handbag",
            &scorer.label_word("handbag"),
            1.0,
            &tf,
        );
        let total: f32 = ["purse", "handbag", "tote"]
            .iter()
            .map(|w| scorer.similarity(Strategy::Syntactic, "handbag", &scorer.label_word(w), 1.0, &tf))
            .sum();
        assert_eq!(acc.get("bag"), Some(handbag));
        assert!(acc.get("bag").unwrap() < total);
    }

    #[test]
    fn test_max_pooling_empty_words_contribute_nothing() {
        let lemmatizer = MorphyLemmatizer::new();
        let labels = vec![
            Label::Hierarchical {
                name: "misc".into(),
                words: vec![],
            },
            Label::Hierarchical {
                name: "shoe".into(),
                words: vec!["sneaker".into()],
            },
        ];
        let vocab = TopicVocabulary::compile(&labels, &lemmatizer);
        let mut acc = ScoreAccumulator::new(&vocab);

        aggregate_max_pooled(
            &scorer(),
            Strategy::Syntactic,
            &["sneakers", ""],
            &TermFrequencyTable::empty(),
            1.0,
            &mut acc,
        );

        assert_eq!(acc.get("misc"), Some(0.0));
        assert!(acc.get("shoe").unwrap() > 0.0);
    }

    #[test]
    fn test_into_ranked_orders_and_truncates() {
        let vocab = TopicVocabulary::simple(&["b", "a", "c"], &MorphyLemmatizer::new());
        let mut acc = ScoreAccumulator::new(&vocab);
        acc.add(2, 1.0);
        let ranked = acc.top_k(2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].label, "c");
        assert_eq!(ranked[1].label, "a");
    }
}
