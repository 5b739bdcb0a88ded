use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// The authenticated identity a feed is built for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewer {
    pub id: String,
    pub followed_author_ids: HashSet<String>,
}

impl Viewer {
    pub fn new(id: impl Into<String>, followed_author_ids: HashSet<String>) -> Self {
        Self {
            id: id.into(),
            followed_author_ids,
        }
    }

    /// Authors whose posts belong in the following pool (followed + self).
    pub fn eligible_authors(&self) -> HashSet<String> {
        let mut authors = self.followed_author_ids.clone();
        authors.insert(self.id.clone());
        authors
    }

    /// The viewer counts as following themselves.
    pub fn follows_any(&self, author_ids: &[String]) -> bool {
        author_ids
            .iter()
            .any(|author| *author == self.id || self.followed_author_ids.contains(author))
    }
}

/// Authorship as stored: older documents carry a single `authorId`,
/// newer ones an `authorIds` array.
#[derive(Debug, Clone, PartialEq)]
pub enum Authorship {
    MultiAuthor { author_ids: Vec<String> },
    Legacy { author_id: String },
}

impl Authorship {
    pub fn author_ids(&self) -> Vec<&str> {
        match self {
            Authorship::MultiAuthor { author_ids } => {
                author_ids.iter().map(String::as_str).collect()
            }
            Authorship::Legacy { author_id } => vec![author_id.as_str()],
        }
    }
}

/// Post document as it appears on the wire. Both author fields are optional
/// here; [`StoredPost`] resolves them into one [`Authorship`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_ids: Option<Vec<String>>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub emoji_pack_ids: Vec<String>,
    /// Every other document field, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw post document as returned by the data store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "PostDocument", into = "PostDocument")]
pub struct StoredPost {
    pub id: String,
    pub authorship: Authorship,
    pub created_at: DateTime<Utc>,
    pub likes_count: u64,
    pub comments_count: u64,
    pub text: Option<String>,
    pub media_urls: Vec<String>,
    pub emoji_pack_ids: Vec<String>,
    pub extra: Map<String, Value>,
}

impl TryFrom<PostDocument> for StoredPost {
    type Error = String;

    fn try_from(doc: PostDocument) -> Result<Self, Self::Error> {
        let authorship = match (doc.author_ids, doc.author_id) {
            (Some(author_ids), _) => Authorship::MultiAuthor { author_ids },
            (None, Some(author_id)) => Authorship::Legacy { author_id },
            (None, None) => {
                return Err(format!(
                    "post {} has neither authorId nor authorIds",
                    doc.id
                ))
            }
        };

        Ok(Self {
            id: doc.id,
            authorship,
            created_at: doc.created_at,
            likes_count: doc.likes_count,
            comments_count: doc.comments_count,
            text: doc.text,
            media_urls: doc.media_urls,
            emoji_pack_ids: doc.emoji_pack_ids,
            extra: doc.extra,
        })
    }
}

impl From<StoredPost> for PostDocument {
    fn from(post: StoredPost) -> Self {
        let (author_id, author_ids) = match post.authorship {
            Authorship::MultiAuthor { author_ids } => (None, Some(author_ids)),
            Authorship::Legacy { author_id } => (Some(author_id), None),
        };

        Self {
            id: post.id,
            author_id,
            author_ids,
            created_at: post.created_at,
            likes_count: post.likes_count,
            comments_count: post.comments_count,
            text: post.text,
            media_urls: post.media_urls,
            emoji_pack_ids: post.emoji_pack_ids,
            extra: post.extra,
        }
    }
}

/// A post eligible for ranking, in its single normalized shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostCandidate {
    pub id: String,
    pub author_ids: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub likes_count: u64,
    pub comments_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub media_urls: Vec<String>,
    pub emoji_pack_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PostCandidate {
    pub fn created_at_millis(&self) -> i64 {
        self.created_at.timestamp_millis()
    }
}

impl From<StoredPost> for PostCandidate {
    fn from(post: StoredPost) -> Self {
        let author_ids = post
            .authorship
            .author_ids()
            .into_iter()
            .map(String::from)
            .collect();

        Self {
            id: post.id,
            author_ids,
            created_at: post.created_at,
            likes_count: post.likes_count,
            comments_count: post.comments_count,
            text: post.text,
            media_urls: post.media_urls,
            emoji_pack_ids: post.emoji_pack_ids,
            extra: post.extra,
        }
    }
}

/// Which retrieval path produced a ranked post.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    Following,
    Recommended,
}

impl FeedSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedSource::Following => "following",
            FeedSource::Recommended => "recommended",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedPost {
    #[serde(flatten)]
    pub post: PostCandidate,
    pub score: f64,
    pub source: FeedSource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRequest {
    #[serde(default)]
    pub viewer_id: Option<String>,
}

impl FeedRequest {
    pub fn for_viewer(viewer_id: impl Into<String>) -> Self {
        Self {
            viewer_id: Some(viewer_id.into()),
        }
    }

    /// The viewer id, if present and not blank.
    pub fn viewer_id(&self) -> Option<&str> {
        self.viewer_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RankStats {
    pub following_count: usize,
    pub recommended_count: usize,
    pub skipped_duplicates: usize,
    pub skipped_followed: usize,
    pub total_candidates: usize,
    pub returned: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub posts: Vec<RankedPost>,
    pub stats: RankStats,
}
