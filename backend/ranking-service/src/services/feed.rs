use crate::config::FeedConfig;
use crate::error::{FeedError, Result};
use crate::models::{FeedRequest, FeedResponse};
use crate::services::ranking::FeedRanker;
use crate::services::recall::{CandidateRecall, PostStore};
use crate::utils::PerfTimer;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Feed generation: resolve the viewer, recall both pools, rank.
pub struct FeedService {
    recall: CandidateRecall,
    ranker: FeedRanker,
}

impl FeedService {
    pub fn new(store: Arc<dyn PostStore>, config: FeedConfig) -> Self {
        let recall = CandidateRecall::new(store, config.following_limit, config.popular_limit);
        Self {
            recall,
            ranker: FeedRanker::new(config),
        }
    }

    pub fn ranker(&self) -> &FeedRanker {
        &self.ranker
    }

    pub async fn generate_feed(&self, request: &FeedRequest) -> Result<FeedResponse> {
        let viewer_id = request.viewer_id().ok_or(FeedError::Unauthenticated)?;
        let request_id = Uuid::new_v4();
        let mut timer = PerfTimer::start(format!("feed:{request_id}"));

        let viewer = self.recall.load_viewer(viewer_id).await?;
        timer.mark("load_viewer");

        let (following, popular) = self.recall.recall(&viewer).await?;
        timer.mark("recall");

        let (posts, stats) = self
            .ranker
            .rank_with_stats(Some(&viewer), following, popular)?;
        timer.mark("rank");

        info!(
            "Feed generated: request_id={}, viewer_id={}, following={}, recommended={}, returned={}, elapsed_ms={}",
            request_id,
            viewer.id,
            stats.following_count,
            stats.recommended_count,
            stats.returned,
            timer.elapsed().as_millis()
        );
        timer.finish();

        Ok(FeedResponse { posts, stats })
    }
}
