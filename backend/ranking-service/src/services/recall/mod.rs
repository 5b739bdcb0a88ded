mod memory_store;

use crate::error::StoreError;
use crate::models::{PostCandidate, StoredPost, Viewer};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

pub use memory_store::{InMemoryPostStore, SeedData};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Read access to the post/follow collections of the document store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Authors `viewer_id` follows. Unknown viewers follow nobody.
    async fn followed_authors(&self, viewer_id: &str) -> StoreResult<HashSet<String>>;

    /// Posts with at least one author in `author_ids`, newest first.
    async fn posts_by_authors(
        &self,
        author_ids: &HashSet<String>,
        limit: usize,
    ) -> StoreResult<Vec<StoredPost>>;

    /// All posts by like count descending, then newest first.
    async fn popular_posts(&self, limit: usize) -> StoreResult<Vec<StoredPost>>;
}

/// Recall layer: the two candidate queries of a feed request.
pub struct CandidateRecall {
    store: Arc<dyn PostStore>,
    following_limit: usize,
    popular_limit: usize,
}

impl CandidateRecall {
    pub fn new(store: Arc<dyn PostStore>, following_limit: usize, popular_limit: usize) -> Self {
        Self {
            store,
            following_limit,
            popular_limit,
        }
    }

    pub async fn load_viewer(&self, viewer_id: &str) -> StoreResult<Viewer> {
        let followed = self.store.followed_authors(viewer_id).await.map_err(|e| {
            warn!("Failed to load follows for viewer {}: {}", viewer_id, e);
            e
        })?;
        Ok(Viewer::new(viewer_id, followed))
    }

    /// Fetch the following and popular pools concurrently.
    pub async fn recall(
        &self,
        viewer: &Viewer,
    ) -> StoreResult<(Vec<PostCandidate>, Vec<PostCandidate>)> {
        let eligible = viewer.eligible_authors();

        let (following, popular) = futures::try_join!(
            self.store.posts_by_authors(&eligible, self.following_limit),
            self.store.popular_posts(self.popular_limit),
        )
        .map_err(|e| {
            warn!("Candidate recall failed for viewer {}: {}", viewer.id, e);
            e
        })?;

        let following = normalize(following, self.following_limit);
        let popular = normalize(popular, self.popular_limit);

        info!(
            "Recall completed: viewer_id={}, following={}, popular={}",
            viewer.id,
            following.len(),
            popular.len()
        );

        Ok((following, popular))
    }
}

fn normalize(posts: Vec<StoredPost>, limit: usize) -> Vec<PostCandidate> {
    posts
        .into_iter()
        .take(limit)
        .map(PostCandidate::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Authorship;
    use chrono::DateTime;
    use serde_json::Map;

    fn stored(id: &str, author: &str, created_ms: i64) -> StoredPost {
        StoredPost {
            id: id.to_string(),
            authorship: Authorship::Legacy {
                author_id: author.to_string(),
            },
            created_at: DateTime::from_timestamp_millis(created_ms).unwrap(),
            likes_count: 0,
            comments_count: 0,
            text: None,
            media_urls: vec![],
            emoji_pack_ids: vec![],
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_recall_queries_viewer_and_followed_authors() {
        let mut store = MockPostStore::new();
        store
            .expect_posts_by_authors()
            .withf(|authors, limit| {
                authors.contains("me") && authors.contains("alice") && *limit == 100
            })
            .times(1)
            .returning(|_, _| Ok(vec![stored("p1", "alice", 2_000)]));
        store
            .expect_popular_posts()
            .withf(|limit| *limit == 50)
            .times(1)
            .returning(|_| Ok(vec![stored("p2", "bob", 1_000)]));

        let recall = CandidateRecall::new(Arc::new(store), 100, 50);
        let viewer = Viewer::new("me", HashSet::from(["alice".to_string()]));

        let (following, popular) = recall.recall(&viewer).await.unwrap();
        assert_eq!(following.len(), 1);
        assert_eq!(following[0].author_ids, vec!["alice"]);
        assert_eq!(popular[0].id, "p2");
    }

    #[tokio::test]
    async fn test_recall_enforces_pool_caps() {
        let mut store = MockPostStore::new();
        store
            .expect_posts_by_authors()
            .returning(|_, _| Ok((0..5).map(|i| stored(&format!("f{i}"), "a", i)).collect()));
        store
            .expect_popular_posts()
            .returning(|_| Ok((0..5).map(|i| stored(&format!("p{i}"), "b", i)).collect()));

        let recall = CandidateRecall::new(Arc::new(store), 2, 3);
        let viewer = Viewer::new("me", HashSet::new());

        let (following, popular) = recall.recall(&viewer).await.unwrap();
        assert_eq!(following.len(), 2);
        assert_eq!(popular.len(), 3);
    }

    #[tokio::test]
    async fn test_store_error_propagates_unchanged() {
        let mut store = MockPostStore::new();
        store
            .expect_posts_by_authors()
            .returning(|_, _| Ok(vec![]));
        store
            .expect_popular_posts()
            .returning(|_| Err(StoreError::Unavailable("quota exceeded".into())));

        let recall = CandidateRecall::new(Arc::new(store), 100, 50);
        let viewer = Viewer::new("me", HashSet::new());

        let err = recall.recall(&viewer).await.unwrap_err();
        assert_eq!(err, StoreError::Unavailable("quota exceeded".into()));
    }

    #[tokio::test]
    async fn test_load_viewer() {
        let mut store = MockPostStore::new();
        store
            .expect_followed_authors()
            .withf(|viewer_id| viewer_id == "me")
            .returning(|_| Ok(HashSet::from(["alice".to_string()])));

        let recall = CandidateRecall::new(Arc::new(store), 100, 50);
        let viewer = recall.load_viewer("me").await.unwrap();
        assert_eq!(viewer.id, "me");
        assert!(viewer.followed_author_ids.contains("alice"));
    }
}
