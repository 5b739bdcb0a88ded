pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use cache::AnimatedPackCache;
pub use config::Config;
pub use error::{AppError, FeedError, StoreError};
pub use services::{EmojiPackService, FeedRanker, FeedService, InMemoryPostStore, PostStore};
