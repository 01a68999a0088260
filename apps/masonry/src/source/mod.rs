//! Post source: where batches of image posts come from.
//!
//! The grid only ever calls [`fetch_or_empty`]: a failed fetch is logged and
//! turned into an empty batch, which the controller treats as a no-op.

pub mod unsplash;

use async_trait::async_trait;
use thiserror::Error;
use tracing::error;

use crate::models::Post;

pub use unsplash::UnsplashClient;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetches up to `limit` posts matching `query` (empty query = any photo).
    async fn fetch_batch(&self, limit: u32, query: &str) -> Result<Vec<Post>, FetchError>;
}

/// Fetches a batch, logging and swallowing any failure as an empty batch.
pub async fn fetch_or_empty(source: &dyn PostSource, limit: u32, query: &str) -> Vec<Post> {
    match source.fetch_batch(limit, query).await {
        Ok(posts) => posts,
        Err(e) => {
            error!("Error fetching images: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Source that hands out pre-baked batches in order, then empty ones.
    /// A `None` entry simulates a network failure.
    pub(crate) struct ScriptedSource {
        batches: Mutex<VecDeque<Option<Vec<Post>>>>,
    }

    impl ScriptedSource {
        pub(crate) fn new(batches: Vec<Option<Vec<Post>>>) -> Self {
            Self {
                batches: Mutex::new(batches.into()),
            }
        }
    }

    #[async_trait]
    impl PostSource for ScriptedSource {
        async fn fetch_batch(&self, limit: u32, _query: &str) -> Result<Vec<Post>, FetchError> {
            let next = self.batches.lock().unwrap().pop_front();
            match next {
                Some(Some(mut posts)) => {
                    posts.truncate(limit as usize);
                    Ok(posts)
                }
                Some(None) => Err(FetchError::Api {
                    status: 503,
                    message: "Service Unavailable".to_string(),
                }),
                None => Ok(Vec::new()),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_or_empty_passes_posts_through() {
        let source = ScriptedSource::new(vec![Some(vec![Post::new(0, "a", "https://img/a.jpg")])]);
        let posts = fetch_or_empty(&source, 20, "").await;
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_or_empty_swallows_errors() {
        let source = ScriptedSource::new(vec![None]);
        assert!(fetch_or_empty(&source, 20, "").await.is_empty());
    }
}
