//! Image Height Resolver: resolves and caches the pixel height of image URLs.
//!
//! A failed load is never surfaced: it is cached as height 0 and the layout
//! carries on. `resolve_batch` deduplicates URLs before fanning out, so each
//! distinct URL in a batch is probed at most once, and every probe in the
//! batch finishes before the caller sees the height map.

pub mod cache;
pub mod probe;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::models::Post;

pub use cache::HeightCache;
pub use probe::{HttpImageProbe, ImageProbe};

#[derive(Clone)]
pub struct HeightResolver {
    cache: HeightCache,
    probe: Arc<dyn ImageProbe>,
}

impl HeightResolver {
    pub fn new(cache: HeightCache, probe: Arc<dyn ImageProbe>) -> Self {
        Self { cache, probe }
    }

    /// Returns the height of the image at `url`, probing only on a cache miss.
    pub async fn resolve(&self, url: &str) -> u32 {
        if let Some(height) = self.cache.get(url) {
            return height;
        }

        let height = match self.probe.natural_height(url).await {
            Ok(height) => height,
            Err(e) => {
                warn!("Image {url} failed to load, using height 0: {e}");
                0
            }
        };

        self.cache.insert(url, height)
    }

    /// Resolves the heights of every distinct image URL in `posts`.
    pub async fn resolve_batch(&self, posts: &[Post]) -> HashMap<String, u32> {
        let mut seen = HashSet::new();
        let unique: Vec<&str> = posts
            .iter()
            .map(|p| p.image.as_str())
            .filter(|url| seen.insert(*url))
            .collect();

        let heights = join_all(unique.iter().map(|url| self.resolve(url))).await;
        debug!(
            "Resolved {} unique image heights for {} posts",
            unique.len(),
            posts.len()
        );

        unique
            .into_iter()
            .map(str::to_string)
            .zip(heights)
            .collect()
    }
}
