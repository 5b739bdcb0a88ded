use crate::config::FeedConfig;
use crate::error::{FeedError, Result};
use crate::models::{FeedSource, PostCandidate, RankStats, RankedPost, Viewer};
use std::collections::HashSet;
use tracing::debug;

/// Feed ranker: pure merge/score/sort over two candidate pools.
#[derive(Debug, Clone, Default)]
pub struct FeedRanker {
    config: FeedConfig,
}

impl FeedRanker {
    pub fn new(config: FeedConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Rank the merged candidate pools for `viewer`.
    ///
    /// `following` is expected to contain posts by the viewer's followed
    /// authors (or the viewer), newest first; `popular` the globally most
    /// liked posts. Neither is re-filtered here.
    pub fn rank(
        &self,
        viewer: Option<&Viewer>,
        following: Vec<PostCandidate>,
        popular: Vec<PostCandidate>,
    ) -> Result<Vec<RankedPost>> {
        self.rank_with_stats(viewer, following, popular)
            .map(|(posts, _)| posts)
    }

    pub fn rank_with_stats(
        &self,
        viewer: Option<&Viewer>,
        following: Vec<PostCandidate>,
        popular: Vec<PostCandidate>,
    ) -> Result<(Vec<RankedPost>, RankStats)> {
        let viewer = viewer
            .filter(|v| !v.id.trim().is_empty())
            .ok_or(FeedError::Unauthenticated)?;

        let mut stats = RankStats::default();
        let mut seen: HashSet<String> = HashSet::new();
        let mut merged: Vec<RankedPost> = Vec::with_capacity(following.len() + popular.len());

        for post in following {
            if !seen.insert(post.id.clone()) {
                stats.skipped_duplicates += 1;
                continue;
            }
            stats.following_count += 1;
            merged.push(self.score_post(post, FeedSource::Following));
        }

        for post in popular {
            if seen.contains(&post.id) {
                stats.skipped_duplicates += 1;
                continue;
            }
            if self.config.exclude_followed_from_recommended && viewer.follows_any(&post.author_ids)
            {
                stats.skipped_followed += 1;
                continue;
            }
            seen.insert(post.id.clone());
            stats.recommended_count += 1;
            merged.push(self.score_post(post, FeedSource::Recommended));
        }

        stats.total_candidates = merged.len();

        // Stable: equal scores keep merge order
        merged.sort_by(|a, b| b.score.total_cmp(&a.score));
        merged.truncate(self.config.size);

        stats.returned = merged.len();

        debug!(
            viewer_id = %viewer.id,
            following = stats.following_count,
            recommended = stats.recommended_count,
            skipped_duplicates = stats.skipped_duplicates,
            skipped_followed = stats.skipped_followed,
            returned = stats.returned,
            "Feed ranked"
        );

        Ok((merged, stats))
    }

    /// Composite recency + engagement score.
    pub fn compute_score(&self, post: &PostCandidate, source: FeedSource) -> f64 {
        let base = post.created_at_millis() as f64
            + post.likes_count as f64 * self.config.like_weight
            + post.comments_count as f64 * self.config.comment_weight;

        match source {
            FeedSource::Following => base * self.config.following_boost,
            FeedSource::Recommended => base,
        }
    }

    fn score_post(&self, post: PostCandidate, source: FeedSource) -> RankedPost {
        let score = self.compute_score(&post, source);
        RankedPost {
            post,
            score,
            source,
        }
    }
}
