pub mod pipeline;

pub use pipeline::{build_profile_provider, build_trending_fetcher, Pipeline, RunRequest};
