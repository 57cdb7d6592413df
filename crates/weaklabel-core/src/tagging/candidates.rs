//! External label candidates.
//!
//! Vision APIs and classifiers produce free-text `(label, confidence)`
//! suggestions for a post. The engine never calls them itself; a
//! [`CandidateProvider`] hands over whatever was collected, and the ranking
//! engine maps it onto the item hierarchy.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use crate::error::ResourceError;
use crate::types::Candidate;

/// Source of external candidates for a post.
///
/// Uses `async_trait` so providers can be held as `Arc<dyn CandidateProvider>`.
/// A post the provider knows nothing about yields `None`.
#[async_trait]
pub trait CandidateProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Candidates for one post.
    async fn candidates(&self, post_id: &str) -> Option<Vec<Candidate>>;
}

/// Candidates read up front from a `{ post_id: [[label, confidence], ...] }`
/// JSON file.
#[derive(Debug, Clone, Default)]
pub struct JsonCandidateProvider {
    by_post: HashMap<String, Vec<Candidate>>,
}

impl JsonCandidateProvider {
    pub fn load(path: &Path) -> Result<Self, ResourceError> {
        let content = std::fs::read_to_string(path).map_err(|source| ResourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: HashMap<String, Vec<(String, f64)>> =
            serde_json::from_str(&content).map_err(|source| ResourceError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut by_post = HashMap::with_capacity(raw.len());
        for (post_id, entries) in raw {
            let mut candidates = Vec::with_capacity(entries.len());
            for (label, confidence) in entries {
                if !confidence.is_finite() || confidence < 0.0 {
                    return Err(ResourceError::InvalidValue {
                        path: path.to_path_buf(),
                        key: format!("{post_id}/{label}"),
                        value: confidence,
                    });
                }
                candidates.push(Candidate::new(label, confidence as f32));
            }
            by_post.insert(post_id, candidates);
        }

        tracing::info!("Loaded candidates for {} posts from {:?}", by_post.len(), path);
        Ok(Self { by_post })
    }

    pub fn from_map(by_post: HashMap<String, Vec<Candidate>>) -> Self {
        Self { by_post }
    }

    pub fn len(&self) -> usize {
        self.by_post.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_post.is_empty()
    }
}

#[async_trait]
impl CandidateProvider for JsonCandidateProvider {
    fn name(&self) -> &str {
        "json"
    }

    async fn candidates(&self, post_id: &str) -> Option<Vec<Candidate>> {
        self.by_post.get(post_id).cloned()
    }
}
