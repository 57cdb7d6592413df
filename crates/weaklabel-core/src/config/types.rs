//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

use crate::tagging::Strategy;
use crate::types::Source;

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of posts labeled concurrently
    pub parallel_workers: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel_workers: 4,
        }
    }
}

/// Per-source weighting factors.
///
/// Segmented hashtags have no factor of their own; they share `hashtag`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
    /// Factor applied to caption tokens
    pub caption: f32,

    /// Factor applied to comment tokens
    pub comments: f32,

    /// Factor applied to user-tag tokens
    pub user_tag: f32,

    /// Factor applied to hashtag and segmented-hashtag tokens
    pub hashtag: f32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            caption: 1.0,
            comments: 0.5,
            user_tag: 1.0,
            hashtag: 1.0,
        }
    }
}

impl WeightsConfig {
    /// Factor for tokens coming from `source`.
    pub fn factor(&self, source: Source) -> f32 {
        match source {
            Source::Caption => self.caption,
            Source::Comments => self.comments,
            Source::UserTags => self.user_tag,
            Source::Hashtags | Source::SegmentedHashtags => self.hashtag,
        }
    }
}

/// Ranking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Labels kept per token and per ranking pass
    pub top_k: usize,

    /// Similarity strategy: "hybrid" (embeddings + edit distance) or "syntactic"
    pub strategy: Strategy,

    /// Number of item votes kept from emoji classification
    pub emoji_top_k: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            strategy: Strategy::Hybrid,
            emoji_top_k: 3,
        }
    }
}

/// Lemmatizer selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LemmatizerKind {
    /// WordNet-style noun morphology (exceptions + detachment rules)
    #[default]
    Morphy,
    /// Porter2 stemming
    Snowball,
}

/// Lemmatizer settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LemmatizerConfig {
    /// Which lemmatizer to use
    pub kind: LemmatizerKind,
}

/// Vocabulary file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Directory containing `<topic>.txt`, `<topic>_hierarchy.txt` and `emoji.tsv`
    pub dir: String,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            dir: "~/.weaklabel/vocabulary".to_string(),
        }
    }
}

/// Word vector settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Whether to load word vectors at all
    pub enabled: bool,

    /// Path to a word2vec text-format file
    pub path: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.weaklabel/vectors.txt".to_string(),
        }
    }
}

/// Term-frequency table settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TermFrequencyConfig {
    /// Path to the `{ post_id: { token: weight } }` JSON file
    pub path: String,
}

impl Default for TermFrequencyConfig {
    fn default() -> Self {
        Self {
            path: "~/.weaklabel/tfidf.json".to_string(),
        }
    }
}

/// External candidate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidatesConfig {
    /// Whether to map external candidates onto the item hierarchy
    pub enabled: bool,

    /// Path to the `{ post_id: [[label, confidence], ...] }` JSON file
    pub path: String,
}

impl Default for CandidatesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "~/.weaklabel/candidates.json".to_string(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "jsonl".to_string(),
            pretty: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
