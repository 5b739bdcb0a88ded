//! In-process lookup cache for emoji pack metadata
//!
//! Records whether an emoji pack is animated so repeated renders of the same
//! pack do not hit the store. The cache is created once at startup and handed
//! to whoever needs it; there is no global instance.

use crate::config::CacheConfig;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct AnimatedPackCache {
    entries: Arc<DashMap<String, bool>>,
    config: CacheConfig,
}

impl AnimatedPackCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            config,
        }
    }

    pub fn get(&self, pack_id: &str) -> Option<bool> {
        self.entries.get(pack_id).map(|entry| *entry.value())
    }

    /// Insert or overwrite. When the cache is full and `pack_id` is new,
    /// the whole map is dropped first.
    pub fn set(&self, pack_id: impl Into<String>, animated: bool) {
        let pack_id = pack_id.into();

        if self.config.max_entries == 0 {
            return;
        }

        if !self.entries.contains_key(&pack_id) && self.entries.len() >= self.config.max_entries {
            debug!(
                "Animated pack cache full ({} entries), clearing",
                self.entries.len()
            );
            self.entries.clear();
        }

        self.entries.insert(pack_id, animated);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl Default for AnimatedPackCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let cache = AnimatedPackCache::default();
        assert_eq!(cache.get("cats"), None);

        cache.set("cats", true);
        cache.set("dogs", false);

        assert_eq!(cache.get("cats"), Some(true));
        assert_eq!(cache.get("dogs"), Some(false));
        assert_eq!(cache.len(), 2);

        cache.set("cats", false);
        assert_eq!(cache.get("cats"), Some(false));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_full_cache_is_cleared_before_new_key() {
        let cache = AnimatedPackCache::new(CacheConfig { max_entries: 2 });
        cache.set("a", true);
        cache.set("b", true);

        // Overwriting an existing key never evicts
        cache.set("b", false);
        assert_eq!(cache.len(), 2);

        cache.set("c", true);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("c"), Some(true));
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = AnimatedPackCache::default();
        let handle = cache.clone();
        handle.set("shared", true);
        assert_eq!(cache.get("shared"), Some(true));

        cache.clear();
        assert!(handle.is_empty());
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let cache = AnimatedPackCache::new(CacheConfig { max_entries: 0 });
        cache.set("a", true);
        assert_eq!(cache.get("a"), None);
    }
}
