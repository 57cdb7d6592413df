//! Core data types: input posts and labeled output.

use serde::{Deserialize, Serialize};

use crate::tagging::vocabulary::Topic;

/// One input post, already tokenized and cleaned upstream.
///
/// Read from JSON Lines; every token list defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    /// Post identifier, used to select the term-frequency table
    pub id: String,

    /// Caption tokens
    pub caption: Vec<String>,

    /// Tokens from the post's comments
    pub comments: Vec<String>,

    /// Tagged user names
    pub tags: Vec<String>,

    /// Hashtags as written (without `#`)
    pub hashtags: Vec<String>,

    /// Words obtained by segmenting hashtags ("#summerdress" -> "summer", "dress")
    pub segmented_hashtags: Vec<String>,

    /// Emojis found anywhere in the post
    pub emojis: Vec<String>,
}

impl Post {
    /// Create an empty post with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Tokens carried by one source.
    pub fn tokens(&self, source: Source) -> &[String] {
        match source {
            Source::Caption => &self.caption,
            Source::Comments => &self.comments,
            Source::UserTags => &self.tags,
            Source::Hashtags => &self.hashtags,
            Source::SegmentedHashtags => &self.segmented_hashtags,
        }
    }

    /// Every token of every source, in source order.
    pub fn all_tokens(&self) -> impl Iterator<Item = &String> {
        Source::ALL.iter().flat_map(move |&s| self.tokens(s).iter())
    }
}

/// A text channel of a post, each with its own weighting factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Caption,
    Comments,
    UserTags,
    Hashtags,
    SegmentedHashtags,
}

impl Source {
    /// Sources used for simple-label ranking, in accumulation order.
    pub const ALL: [Source; 5] = [
        Source::Caption,
        Source::Comments,
        Source::Hashtags,
        Source::SegmentedHashtags,
        Source::UserTags,
    ];

    /// Sources used for hierarchical ranking. Segmented hashtags are left out:
    /// their words already appear in the hashtag they came from.
    pub const HIERARCHICAL: [Source; 4] = [
        Source::Caption,
        Source::Comments,
        Source::Hashtags,
        Source::UserTags,
    ];
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Caption => write!(f, "caption"),
            Source::Comments => write!(f, "comments"),
            Source::UserTags => write!(f, "user_tags"),
            Source::Hashtags => write!(f, "hashtags"),
            Source::SegmentedHashtags => write!(f, "segmented_hashtags"),
        }
    }
}

/// A ranked label with its accumulated score.
///
/// Scores are unnormalized and live in `[0, +inf)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    /// The label name as written in the vocabulary
    pub label: String,

    /// Accumulated score
    pub score: f32,
}

impl ScoredLabel {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// A label suggested by an external collaborator (vision API, classifier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Free-text label as returned by the collaborator
    pub label: String,

    /// Collaborator confidence, usually in `[0, 1]`
    pub confidence: f32,
}

impl Candidate {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Label granularity of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One comparison word per label, per-token top-k
    Simple,
    /// Several constituent words per label, max-pooled
    Hierarchical,
}

/// The ranked labels of one topic vocabulary for one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRanking {
    pub topic: Topic,
    pub granularity: Granularity,
    pub labels: Vec<ScoredLabel>,
}

/// Everything the engine produces for one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPost {
    /// Post identifier
    pub id: String,

    /// One ranking per non-empty topic vocabulary
    pub rankings: Vec<TopicRanking>,

    /// Item votes from emojis
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub emoji_items: Vec<ScoredLabel>,

    /// External candidates mapped onto the item hierarchy
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub candidate_items: Option<Vec<ScoredLabel>>,

    /// liketoknow.it links found in the caption and comments
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub links: Vec<String>,

    /// Most frequent tokens across every source
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub top_tokens: Vec<String>,
}

impl LabeledPost {
    /// Ranking for a topic at a granularity, if it was produced.
    pub fn ranking(&self, topic: Topic, granularity: Granularity) -> Option<&[ScoredLabel]> {
        self.rankings
            .iter()
            .find(|r| r.topic == topic && r.granularity == granularity)
            .map(|r| r.labels.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_deserialize_defaults() {
        let post: Post = serde_json::from_str(r#"{"id": "p1", "caption": ["jeans"]}"#).unwrap();
        assert_eq!(post.id, "p1");
        assert_eq!(post.caption, vec!["jeans"]);
        assert!(post.comments.is_empty());
        assert!(post.segmented_hashtags.is_empty());
    }

    #[test]
    fn test_post_tokens_by_source() {
        let mut post = Post::new("p1");
        post.tags = vec!["@zara".into()];
        post.segmented_hashtags = vec!["summer".into(), "dress".into()];
        assert_eq!(post.tokens(Source::UserTags), &["@zara".to_string()]);
        assert_eq!(post.tokens(Source::SegmentedHashtags).len(), 2);
        assert!(post.tokens(Source::Caption).is_empty());
        assert_eq!(post.all_tokens().count(), 3);
    }

    #[test]
    fn test_hierarchical_sources_skip_segmented() {
        assert!(!Source::HIERARCHICAL.contains(&Source::SegmentedHashtags));
        assert_eq!(Source::ALL.len(), 5);
    }

    #[test]
    fn test_labeled_post_serialization_skips_empty() {
        let labeled = LabeledPost {
            id: "p1".into(),
            rankings: vec![],
            emoji_items: vec![],
            candidate_items: None,
            links: vec![],
            top_tokens: vec![],
        };
        let json = serde_json::to_string(&labeled).unwrap();
        assert!(!json.contains("emoji_items"));
        assert!(!json.contains("candidate_items"));
        assert!(!json.contains("links"));
        assert!(!json.contains("top_tokens"));
    }
}
