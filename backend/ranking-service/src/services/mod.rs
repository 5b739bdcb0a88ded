pub mod emoji;
pub mod feed;
pub mod ranking;
pub mod recall;

pub use emoji::{EmojiPackService, EmojiPackStore};
pub use feed::FeedService;
pub use ranking::FeedRanker;
pub use recall::{CandidateRecall, InMemoryPostStore, PostStore, SeedData};
