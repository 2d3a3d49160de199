//! Trending candidate sources.

pub mod cached;
pub mod hacker_news;

pub use cached::{CachedTrendingSource, MIN_FALLBACK_ITEMS};
pub use hacker_news::{HackerNewsConfig, HackerNewsSource};
