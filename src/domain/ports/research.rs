//! Research ports.

use async_trait::async_trait;

use crate::domain::errors::WorkflowResult;
use crate::domain::models::{ResearchRequest, ResearchResult, TrendingItem};

/// Discovers (when no topic is given) and researches a topic.
#[async_trait]
pub trait TopicResearchProvider: Send + Sync {
    /// Produce a research brief for the requested or discovered topic.
    ///
    /// A provider may return an empty brief; the engine treats that as
    /// missing input.
    async fn discover(&self, request: &ResearchRequest) -> WorkflowResult<ResearchResult>;
}

/// A feed of trending topic candidates.
#[async_trait]
pub trait TrendingCandidateSource: Send + Sync {
    /// Source name for logs (e.g., "hacker-news", "cached").
    fn name(&self) -> &'static str;

    /// Fetch up to `limit` candidates, best first.
    async fn fetch(&self, limit: usize) -> WorkflowResult<Vec<TrendingItem>>;
}
