//! Concurrent batch labeling.
//!
//! Ranking is CPU-bound, so each post runs on the blocking pool. A semaphore
//! bounds how many posts are in flight, and results are delivered through a
//! callback as they complete so the CLI can stream JSONL output.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::tagging::CandidateProvider;
use crate::types::{LabeledPost, Post};

use super::labeler::PostLabeler;

/// Result of labeling a single post.
#[derive(Debug)]
pub enum LabelResult {
    Success(LabeledPost),
    Failure(String, String),
}

/// Labels many posts concurrently with a shared [`PostLabeler`].
pub struct LabelingPipeline {
    labeler: Arc<PostLabeler>,
    candidates: Option<Arc<dyn CandidateProvider>>,
    parallel: usize,
}

impl LabelingPipeline {
    pub fn new(labeler: Arc<PostLabeler>, parallel: usize) -> Self {
        Self {
            labeler,
            candidates: None,
            parallel: parallel.max(1),
        }
    }

    /// Attach a candidate provider consulted once per post.
    pub fn with_candidates(mut self, provider: Arc<dyn CandidateProvider>) -> Self {
        self.candidates = Some(provider);
        self
    }

    /// Label every post, calling `on_result` as each one completes.
    ///
    /// Completion order is not input order. Returns `(succeeded, failed)`.
    pub async fn run<F>(&self, posts: Vec<Post>, on_result: F) -> (usize, usize)
    where
        F: Fn(LabelResult) + Send + Sync + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(self.parallel));
        let on_result = Arc::new(on_result);
        let mut handles = Vec::with_capacity(posts.len());

        for post in posts {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    tracing::warn!("Labeling semaphore closed unexpectedly, stopping batch");
                    break;
                }
            };

            let labeler = Arc::clone(&self.labeler);
            let provider = self.candidates.clone();
            let on_result = Arc::clone(&on_result);

            let handle = tokio::spawn(async move {
                let candidates = match &provider {
                    Some(provider) => provider.candidates(&post.id).await,
                    None => None,
                };

                let id = post.id.clone();
                let result = tokio::task::spawn_blocking(move || {
                    labeler.label(&post, candidates.as_deref())
                })
                .await;
                drop(permit);

                let result = match result {
                    Ok(labeled) => LabelResult::Success(labeled),
                    Err(e) => {
                        tracing::error!("Labeling task for post {id} failed: {e}");
                        LabelResult::Failure(id, e.to_string())
                    }
                };
                let success = matches!(result, LabelResult::Success(_));
                on_result(result);
                success
            });
            handles.push(handle);
        }

        let mut succeeded = 0usize;
        let mut failed = 0usize;
        for handle in handles {
            match handle.await {
                Ok(true) => succeeded += 1,
                Ok(false) => failed += 1,
                Err(e) => {
                    tracing::error!("Labeling task panicked: {e}");
                    failed += 1;
                }
            }
        }
        (succeeded, failed)
    }
}
