/// Ranking Module
///
/// Merges the two candidate pools of a feed request and orders them by a
/// recency + engagement score.
///
/// # Workflow
/// 1. Following pool first, tagged `following`
/// 2. Popular pool, skipping ids already present and posts by followed authors
/// 3. `score = created_ms + likes * like_weight + comments * comment_weight`,
///    multiplied by `following_boost` for following posts
/// 4. Stable sort by score descending, truncate to the feed size
pub mod feed_ranker;

pub use feed_ranker::FeedRanker;
