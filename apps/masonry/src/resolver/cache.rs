use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// URL → resolved image height in pixels (0 for images that failed to load).
///
/// Constructed once at startup and handed to the resolver. Clones share the
/// same underlying map. Entries are never evicted or overwritten. Lookups are
/// synchronous, so a cache hit never suspends the caller.
#[derive(Debug, Clone, Default)]
pub struct HeightCache {
    inner: Arc<RwLock<HashMap<String, u32>>>,
}

impl HeightCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<u32> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .copied()
    }

    /// Records `height` for `url` unless a value is already present, and
    /// returns the value that is cached afterwards.
    pub fn insert(&self, url: &str, height: u32) -> u32 {
        *self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(url.to_string())
            .or_insert(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_value() {
        let cache = HeightCache::new();
        assert_eq!(cache.insert("https://img/a.jpg", 120), 120);
        assert_eq!(cache.insert("https://img/a.jpg", 999), 120);
        assert_eq!(cache.get("https://img/a.jpg"), Some(120));
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = HeightCache::new();
        let other = cache.clone();
        other.insert("https://img/b.jpg", 0);
        assert_eq!(cache.get("https://img/b.jpg"), Some(0));
        assert_eq!(cache.get("https://img/c.jpg"), None);
    }
}
