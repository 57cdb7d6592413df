//! weaklabel core - weak labeling of social-media posts.
//!
//! Ranks the tokens of a post (caption, comments, user tags, hashtags,
//! segmented hashtags) against closed topic vocabularies (items, styles,
//! materials, brands) by combining edit distance, word-vector similarity and
//! per-post term-frequency weights.
//!
//! # Architecture
//!
//! The engine is a pure scoring function over resources loaded once:
//!
//! ```text
//! tokens → Lemmatize → Token Similarity → Per-Source Top-k → Multi-Source Sum → Ranking
//!                                       ↘ Max-Pool Words  ↗ (hierarchical labels)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use weaklabel_core::{Config, Post, PostLabeler};
//!
//! fn main() -> weaklabel_core::Result<()> {
//!     let config = Config::load()?;
//!     let labeler = PostLabeler::from_config(&config)?;
//!
//!     let mut post = Post::new("p1");
//!     post.caption = vec!["new".into(), "jeans".into()];
//!     let labeled = labeler.label(&post, None);
//!     println!("{}", serde_json::to_string(&labeled)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod embedding;
pub mod error;
pub mod math;
pub mod output;
pub mod pipeline;
pub mod tagging;
pub mod text;
pub mod tfidf;
pub mod types;

pub use config::Config;
pub use embedding::WordVectors;
pub use error::{
    ConfigError, EmbeddingError, ResourceError, Result, VocabularyError, WeakLabelError,
};
pub use output::{OutputFormat, OutputWriter};
pub use pipeline::{LabelResult, LabelingPipeline, PostLabeler};
pub use tagging::{RankingEngine, Strategy, TokenScorer, Topic, TopicVocabulary, Vocabulary};
pub use tfidf::{TermFrequencyIndex, TermFrequencyTable};
pub use types::{Candidate, Granularity, LabeledPost, Post, ScoredLabel, Source, TopicRanking};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
