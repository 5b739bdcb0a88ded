use super::{PostStore, StoreResult};
use crate::error::StoreError;
use crate::models::StoredPost;
use crate::services::emoji::EmojiPackStore;
use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

/// Seed document for [`InMemoryPostStore`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub posts: Vec<StoredPost>,
    /// viewer id -> followed author ids
    #[serde(default)]
    pub follows: HashMap<String, Vec<String>>,
    /// pack id -> animated
    #[serde(default)]
    pub emoji_packs: HashMap<String, bool>,
}

/// Post, follow and emoji pack collections held in memory.
#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    posts: DashMap<String, StoredPost>,
    follows: DashMap<String, HashSet<String>>,
    emoji_packs: DashMap<String, bool>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: SeedData) -> Self {
        let store = Self::new();
        for post in seed.posts {
            store.insert_post(post);
        }
        for (viewer_id, authors) in seed.follows {
            for author_id in authors {
                store.follow(&viewer_id, author_id);
            }
        }
        for (pack_id, animated) in seed.emoji_packs {
            store.set_emoji_pack(pack_id, animated);
        }
        store
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        let seed: SeedData =
            serde_json::from_str(json).map_err(|e| StoreError::Malformed(e.to_string()))?;
        Ok(Self::from_seed(seed))
    }

    pub fn load_seed_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Unavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let store = Self::from_json(&json)?;
        info!(
            "Seeded store from {}: posts={}, viewers={}, emoji_packs={}",
            path.display(),
            store.posts.len(),
            store.follows.len(),
            store.emoji_packs.len()
        );
        Ok(store)
    }

    pub fn insert_post(&self, post: StoredPost) {
        self.posts.insert(post.id.clone(), post);
    }

    pub fn follow(&self, viewer_id: &str, author_id: impl Into<String>) {
        self.follows
            .entry(viewer_id.to_string())
            .or_default()
            .insert(author_id.into());
    }

    pub fn set_emoji_pack(&self, pack_id: impl Into<String>, animated: bool) {
        self.emoji_packs.insert(pack_id.into(), animated);
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    fn snapshot<F>(&self, keep: F) -> Vec<StoredPost>
    where
        F: Fn(&StoredPost) -> bool,
    {
        self.posts
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn followed_authors(&self, viewer_id: &str) -> StoreResult<HashSet<String>> {
        Ok(self
            .follows
            .get(viewer_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn posts_by_authors(
        &self,
        author_ids: &HashSet<String>,
        limit: usize,
    ) -> StoreResult<Vec<StoredPost>> {
        let mut posts = self.snapshot(|post| {
            post.authorship
                .author_ids()
                .into_iter()
                .any(|author| author_ids.contains(author))
        });
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        posts.truncate(limit);
        Ok(posts)
    }

    async fn popular_posts(&self, limit: usize) -> StoreResult<Vec<StoredPost>> {
        let mut posts = self.snapshot(|_| true);
        posts.sort_by_key(|post| {
            (
                Reverse(post.likes_count),
                Reverse(post.created_at),
                post.id.clone(),
            )
        });
        posts.truncate(limit);
        Ok(posts)
    }
}

#[async_trait]
impl EmojiPackStore for InMemoryPostStore {
    async fn pack_animated(&self, pack_id: &str) -> StoreResult<Option<bool>> {
        Ok(self.emoji_packs.get(pack_id).map(|entry| *entry.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"{
        "posts": [
            { "id": "old", "authorId": "alice", "createdAt": 1000, "likesCount": 90 },
            { "id": "new", "authorIds": ["bob", "alice"], "createdAt": 3000, "likesCount": 5 },
            { "id": "mid", "authorId": "carol", "createdAt": 2000, "likesCount": 90 },
            { "id": "mine", "authorId": "me", "createdAt": 2500, "trackId": "t1" }
        ],
        "follows": { "me": ["alice"] },
        "emojiPacks": { "party": true, "plain": false }
    }"#;

    #[tokio::test]
    async fn test_posts_by_authors_matches_any_author_newest_first() {
        let store = InMemoryPostStore::from_json(SEED).unwrap();
        let authors = HashSet::from(["alice".to_string(), "me".to_string()]);

        let posts = store.posts_by_authors(&authors, 10).await.unwrap();
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mine", "old"]);

        let capped = store.posts_by_authors(&authors, 1).await.unwrap();
        assert_eq!(capped.len(), 1);

        let mine = posts.iter().find(|p| p.id == "mine").unwrap();
        assert_eq!(mine.extra["trackId"], "t1");
    }

    #[tokio::test]
    async fn test_popular_posts_order_by_likes_then_recency() {
        let store = InMemoryPostStore::from_json(SEED).unwrap();
        let posts = store.popular_posts(3).await.unwrap();
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["mid", "old", "new"]);
    }

    #[tokio::test]
    async fn test_follows_and_emoji_packs() {
        let store = InMemoryPostStore::from_json(SEED).unwrap();

        let follows = store.followed_authors("me").await.unwrap();
        assert_eq!(follows, HashSet::from(["alice".to_string()]));
        assert!(store.followed_authors("stranger").await.unwrap().is_empty());

        assert_eq!(store.pack_animated("party").await.unwrap(), Some(true));
        assert_eq!(store.pack_animated("plain").await.unwrap(), Some(false));
        assert_eq!(store.pack_animated("missing").await.unwrap(), None);
    }

    #[test]
    fn test_malformed_seed_is_rejected() {
        let err = InMemoryPostStore::from_json(r#"{ "posts": [ { "id": "x" } ] }"#).unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }

    #[test]
    fn test_missing_seed_file_is_unavailable() {
        let err = InMemoryPostStore::load_seed_file("/nonexistent/seed.json").unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
