use crate::cache::AnimatedPackCache;
use crate::services::recall::StoreResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Read access to emoji pack metadata.
#[async_trait]
pub trait EmojiPackStore: Send + Sync {
    /// `None` when the pack does not exist.
    async fn pack_animated(&self, pack_id: &str) -> StoreResult<Option<bool>>;
}

/// Answers "is this emoji pack animated", reading through the injected cache.
pub struct EmojiPackService {
    store: Arc<dyn EmojiPackStore>,
    cache: AnimatedPackCache,
}

impl EmojiPackService {
    pub fn new(store: Arc<dyn EmojiPackStore>, cache: AnimatedPackCache) -> Self {
        Self { store, cache }
    }

    pub fn cache(&self) -> &AnimatedPackCache {
        &self.cache
    }

    pub async fn is_animated(&self, pack_id: &str) -> StoreResult<Option<bool>> {
        if let Some(animated) = self.cache.get(pack_id) {
            debug!("Emoji pack cache hit: {}", pack_id);
            return Ok(Some(animated));
        }

        let animated = self.store.pack_animated(pack_id).await?;
        if let Some(value) = animated {
            self.cache.set(pack_id, value);
        }
        Ok(animated)
    }
}
