//! Per-post labeling: every topic, emoji votes, candidates and links.

use std::sync::Arc;

use crate::config::{Config, LemmatizerKind};
use crate::embedding::WordVectors;
use crate::error::Result;
use crate::tagging::{
    EmojiTable, RankingEngine, Strategy, TokenScorer, Topic, Vocabulary, VocabularyFiles,
};
use crate::text::{liketoknowit_links, most_common, Lemmatizer, MorphyLemmatizer, SnowballLemmatizer};
use crate::tfidf::TermFrequencyIndex;
use crate::types::{Candidate, Granularity, LabeledPost, Post, TopicRanking};

/// Labels single posts against every loaded vocabulary.
///
/// All resources are loaded once and read-only afterwards, so one labeler
/// can be shared across worker threads behind an `Arc`.
pub struct PostLabeler {
    engine: RankingEngine,
    vocabulary: Vocabulary,
    emoji: EmojiTable,
    term_frequency: TermFrequencyIndex,
    top_k: usize,
    emoji_top_k: usize,
}

impl PostLabeler {
    pub fn new(
        engine: RankingEngine,
        vocabulary: Vocabulary,
        emoji: EmojiTable,
        term_frequency: TermFrequencyIndex,
    ) -> Self {
        Self {
            engine,
            vocabulary,
            emoji,
            term_frequency,
            top_k: 10,
            emoji_top_k: 3,
        }
    }

    /// Load vocabularies, word vectors and term frequencies as configured.
    ///
    /// Missing optional resources (word vectors, term-frequency file) are
    /// logged and skipped; malformed ones are errors.
    pub fn from_config(config: &Config) -> Result<Self> {
        let vocab_dir = config.vocabulary_dir();
        let files = VocabularyFiles::load(&vocab_dir)?;
        let emoji = EmojiTable::load(&vocab_dir.join("emoji.tsv"))?;

        let vectors = load_vectors(config)?;
        let lemmatizer = build_lemmatizer(config.lemmatizer.kind, vectors.as_deref(), &files);
        let vocabulary = files.compile(lemmatizer.as_ref());

        let tf_path = config.term_frequency_path();
        let term_frequency = if tf_path.exists() {
            TermFrequencyIndex::load(&tf_path)?
        } else {
            tracing::warn!(
                "Term-frequency file not found at {:?}, every token gets the floor weight",
                tf_path
            );
            TermFrequencyIndex::default()
        };

        let engine = RankingEngine::new(
            TokenScorer::new(lemmatizer, vectors),
            config.weights.clone(),
            config.ranking.strategy,
        );
        tracing::info!("Ranking strategy: {}", engine.strategy());

        Ok(Self::new(engine, vocabulary, emoji, term_frequency)
            .with_top_k(config.ranking.top_k)
            .with_emoji_top_k(config.ranking.emoji_top_k))
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_emoji_top_k(mut self, emoji_top_k: usize) -> Self {
        self.emoji_top_k = emoji_top_k;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.engine = self.engine.with_strategy(strategy);
        self
    }

    pub fn engine(&self) -> &RankingEngine {
        &self.engine
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn term_frequency(&self) -> &TermFrequencyIndex {
        &self.term_frequency
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Label one post.
    ///
    /// `candidates` are mapped onto the item hierarchy when present.
    pub fn label(&self, post: &Post, candidates: Option<&[Candidate]>) -> LabeledPost {
        let tf = self.term_frequency.table(&post.id);

        let mut rankings = Vec::new();
        for topic in Topic::ALL {
            if let Some(vocabulary) = self.vocabulary.simple(topic) {
                rankings.push(TopicRanking {
                    topic,
                    granularity: Granularity::Simple,
                    labels: self.engine.rank(post, vocabulary, self.top_k, tf),
                });
            }
            if let Some(vocabulary) = self.vocabulary.hierarchical(topic) {
                rankings.push(TopicRanking {
                    topic,
                    granularity: Granularity::Hierarchical,
                    labels: self.engine.rank_hierarchical(post, vocabulary, self.top_k, tf),
                });
            }
        }

        let emoji_items = match self.vocabulary.simple(Topic::Items) {
            Some(items) if !post.emojis.is_empty() && !self.emoji.is_empty() => {
                self.emoji.classify(&post.emojis, items, self.emoji_top_k)
            }
            _ => Vec::new(),
        };

        let candidate_items = candidates.and_then(|candidates| {
            self.vocabulary
                .hierarchical(Topic::Items)
                .map(|items| self.engine.map_candidates(candidates, items).into_ranked())
        });

        let mut links = liketoknowit_links(&post.caption);
        links.extend(liketoknowit_links(&post.comments));
        let tokens: Vec<&String> = post.all_tokens().collect();
        let top_tokens = most_common(&tokens, self.top_k);

        tracing::trace!("Labeled post {} ({} rankings)", post.id, rankings.len());
        LabeledPost {
            id: post.id.clone(),
            rankings,
            emoji_items,
            candidate_items,
            links,
            top_tokens,
        }
    }
}

fn load_vectors(config: &Config) -> Result<Option<Arc<WordVectors>>> {
    if !config.embedding.enabled {
        tracing::debug!("Word vectors disabled in config");
        return Ok(None);
    }
    let path = config.embedding_path();
    if !path.exists() {
        tracing::warn!("Word vectors not found at {:?}, using syntactic similarity", path);
        return Ok(None);
    }
    Ok(Some(Arc::new(WordVectors::load(&path)?)))
}

fn build_lemmatizer(
    kind: LemmatizerKind,
    vectors: Option<&WordVectors>,
    files: &VocabularyFiles,
) -> Arc<dyn Lemmatizer> {
    match (kind, vectors) {
        (LemmatizerKind::Snowball, _) => Arc::new(SnowballLemmatizer::new()),
        (LemmatizerKind::Morphy, Some(vectors)) => Arc::new(MorphyLemmatizer::with_dictionary(
            vectors.words().iter().cloned().chain(files.words()),
        )),
        (LemmatizerKind::Morphy, None) => Arc::new(MorphyLemmatizer::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(dir: &std::path::Path) {
        let vocab = dir.join("vocabulary");
        std::fs::create_dir_all(&vocab).unwrap();
        std::fs::write(vocab.join("items.txt"), "jeans\ndress\nhandbag\nsneakers\n").unwrap();
        std::fs::write(
            vocab.join("items_hierarchy.txt"),
            "bag,purse handbag tote\nfootwear,sneaker boot\n",
        )
        .unwrap();
        std::fs::write(vocab.join("materials.txt"), "denim\nsilk\n").unwrap();
        std::fs::write(vocab.join("emoji.tsv"), "👖\tjean\n👗\tdress\n").unwrap();

        let mut f = std::fs::File::create(dir.join("vectors.txt")).unwrap();
        writeln!(f, "3 2").unwrap();
        writeln!(f, "jean 1.0 0.1").unwrap();
        writeln!(f, "denim 0.9 0.2").unwrap();
        writeln!(f, "dress 0.0 1.0").unwrap();

        std::fs::write(
            dir.join("tfidf.json"),
            r#"{"p1": {"jeans": 0.5, "denim": 0.3}}"#,
        )
        .unwrap();
    }

    fn config_for(dir: &std::path::Path, embeddings: bool) -> Config {
        let mut config = Config::default();
        config.vocabulary.dir = dir.join("vocabulary").to_string_lossy().into_owned();
        config.embedding.enabled = embeddings;
        config.embedding.path = dir.join("vectors.txt").to_string_lossy().into_owned();
        config.term_frequency.path = dir.join("tfidf.json").to_string_lossy().into_owned();
        config.ranking.top_k = 3;
        config
    }

    fn post() -> Post {
        Post {
            id: "p1".into(),
            caption: vec!["my".into(), "jeans".into(), "http://liketk.it/2uZ4x".into()],
            hashtags: vec!["denim".into()],
            emojis: vec!["👖".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_from_config_with_vectors() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let labeler = PostLabeler::from_config(&config_for(dir.path(), true)).unwrap();
        assert_eq!(labeler.engine().strategy(), Strategy::Hybrid);
        assert_eq!(labeler.term_frequency().len(), 1);

        let labeled = labeler.label(&post(), None);
        assert_eq!(labeled.id, "p1");
        let items = labeled.ranking(Topic::Items, Granularity::Simple).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].label, "jeans");
        assert!(labeled.ranking(Topic::Items, Granularity::Hierarchical).is_some());
        assert!(labeled.ranking(Topic::Materials, Granularity::Simple).is_some());
        assert!(labeled.ranking(Topic::Brands, Granularity::Simple).is_none());
        assert_eq!(labeled.emoji_items[0].label, "jeans");
        assert_eq!(labeled.links, vec!["http://liketk.it/2uZ4x"]);
        assert!(labeled.candidate_items.is_none());
        assert_eq!(labeled.top_tokens.len(), 3);
        assert_eq!(labeled.top_tokens[0], "my");
    }

    #[test]
    fn test_top_tokens_count_every_source() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let labeler = PostLabeler::from_config(&config_for(dir.path(), false)).unwrap();

        let mut post = post();
        post.comments = vec!["denim".into(), "love".into()];
        post.segmented_hashtags = vec!["denim".into()];
        let labeled = labeler.label(&post, None);
        assert_eq!(labeled.top_tokens[0], "denim");
        assert_eq!(labeled.top_tokens.len(), 3);
    }

    #[test]
    fn test_from_config_without_vectors_degrades() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let labeler = PostLabeler::from_config(&config_for(dir.path(), false)).unwrap();
        assert_eq!(labeler.engine().strategy(), Strategy::Syntactic);

        let labeled = labeler.label(&post(), None);
        let materials = labeled.ranking(Topic::Materials, Granularity::Simple).unwrap();
        assert_eq!(materials[0].label, "denim");
    }

    #[test]
    fn test_missing_optional_resources() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.vocabulary.dir = dir.path().to_string_lossy().into_owned();
        config.embedding.path = dir.path().join("none.txt").to_string_lossy().into_owned();
        config.term_frequency.path = dir.path().join("none.json").to_string_lossy().into_owned();

        let labeler = PostLabeler::from_config(&config).unwrap();
        let labeled = labeler.label(&post(), None);
        assert!(labeled.rankings.is_empty());
        assert!(labeled.emoji_items.is_empty());
    }

    #[test]
    fn test_malformed_vocabulary_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("brands_hierarchy.txt"), "no comma\n").unwrap();
        let mut config = Config::default();
        config.vocabulary.dir = dir.path().to_string_lossy().into_owned();
        config.embedding.enabled = false;

        assert!(PostLabeler::from_config(&config).is_err());
    }

    #[test]
    fn test_label_with_candidates() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let labeler = PostLabeler::from_config(&config_for(dir.path(), false)).unwrap();

        let candidates = vec![Candidate::new("Boots", 0.9)];
        let labeled = labeler.label(&post(), Some(&candidates));
        let mapped = labeled.candidate_items.unwrap();
        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped[0].label, "footwear");
    }
}
