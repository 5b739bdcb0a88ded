/// Configuration management for the ranking service
///
/// Loads configuration from environment variables (and `.env` when present).
use anyhow::{bail, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub feed: FeedConfig,
    pub cache: CacheConfig,
}

/// `APP_*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// JSON document used to seed the in-memory store
    #[serde(default)]
    pub seed_file: Option<String>,
}

/// `FEED_*` variables. Defaults reproduce the production feed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FeedConfig {
    /// Number of posts returned per feed
    #[serde(default = "default_feed_size")]
    pub size: usize,
    #[serde(default = "default_following_limit")]
    pub following_limit: usize,
    #[serde(default = "default_popular_limit")]
    pub popular_limit: usize,
    #[serde(default = "default_like_weight")]
    pub like_weight: f64,
    #[serde(default = "default_comment_weight")]
    pub comment_weight: f64,
    /// Multiplier applied to the whole score of following posts
    #[serde(default = "default_following_boost")]
    pub following_boost: f64,
    /// Drop popular posts whose author the viewer already follows
    #[serde(default = "default_true")]
    pub exclude_followed_from_recommended: bool,
}

/// `CACHE_*` variables.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CacheConfig {
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8011
}

fn default_service_name() -> String {
    "ranking-service".to_string()
}

fn default_feed_size() -> usize {
    20
}

fn default_following_limit() -> usize {
    100
}

fn default_popular_limit() -> usize {
    50
}

fn default_like_weight() -> f64 {
    10_000.0
}

fn default_comment_weight() -> f64 {
    50_000.0
}

fn default_following_boost() -> f64 {
    1.5
}

fn default_true() -> bool {
    true
}

fn default_cache_max_entries() -> usize {
    1024
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            size: default_feed_size(),
            following_limit: default_following_limit(),
            popular_limit: default_popular_limit(),
            like_weight: default_like_weight(),
            comment_weight: default_comment_weight(),
            following_boost: default_following_boost(),
            exclude_followed_from_recommended: true,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_cache_max_entries(),
        }
    }
}

impl FeedConfig {
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            bail!("FEED_SIZE must be greater than 0");
        }
        let weights = [self.like_weight, self.comment_weight, self.following_boost];
        if weights.iter().any(|w| !w.is_finite()) {
            bail!("FEED_LIKE_WEIGHT, FEED_COMMENT_WEIGHT and FEED_FOLLOWING_BOOST must be finite");
        }
        if self.like_weight < 0.0 || self.comment_weight < 0.0 {
            bail!("FEED_LIKE_WEIGHT and FEED_COMMENT_WEIGHT must not be negative");
        }
        if self.following_boost < 1.0 {
            bail!("FEED_FOLLOWING_BOOST must be at least 1.0");
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let service = envy::prefixed("APP_")
            .from_env::<ServiceConfig>()
            .context("Failed to read APP_* configuration")?;
        let feed = envy::prefixed("FEED_")
            .from_env::<FeedConfig>()
            .context("Failed to read FEED_* configuration")?;
        let cache = envy::prefixed("CACHE_")
            .from_env::<CacheConfig>()
            .context("Failed to read CACHE_* configuration")?;

        feed.validate()?;

        Ok(Config {
            service,
            feed,
            cache,
        })
    }
}
