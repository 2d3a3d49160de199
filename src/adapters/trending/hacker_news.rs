//! Hacker News trending source.
//!
//! Uses the official Firebase API: one request for the top story ids, then
//! one request per item. Items are fetched concurrently and kept in rank
//! order; deleted, dead or untitled items are skipped.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::errors::{WorkflowError, WorkflowResult};
use crate::domain::models::TrendingItem;
use crate::domain::ports::TrendingCandidateSource;

const CONCURRENT_ITEM_REQUESTS: usize = 8;

#[derive(Debug, Clone)]
pub struct HackerNewsConfig {
    /// Default: `https://hacker-news.firebaseio.com/v0`.
    pub base_url: String,
    /// Per-request timeout in seconds. Default: 5.
    pub timeout_secs: u64,
}

impl Default for HackerNewsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://hacker-news.firebaseio.com/v0".to_string(),
            timeout_secs: 5,
        }
    }
}

pub struct HackerNewsSource {
    base_url: String,
    client: reqwest::Client,
}

impl HackerNewsSource {
    pub fn new(config: HackerNewsConfig) -> WorkflowResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WorkflowError::Provider(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn top_story_ids(&self) -> WorkflowResult<Vec<u64>> {
        let url = format!("{}/topstories.json", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WorkflowError::Provider(format!("Hacker News request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(WorkflowError::Provider(format!(
                "Hacker News returned {} for top stories",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WorkflowError::Provider(format!("invalid top stories payload: {e}")))
    }

    async fn item(&self, id: u64) -> Option<TrendingItem> {
        let url = format!("{}/item/{id}.json", self.base_url);
        let result = async {
            self.client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<Option<HnItem>>()
                .await
        }
        .await;

        match result {
            Ok(Some(item)) => item.into_trending(),
            Ok(None) => None,
            Err(e) => {
                warn!(id, error = %e, "Failed to fetch Hacker News item");
                None
            }
        }
    }
}

#[async_trait]
impl TrendingCandidateSource for HackerNewsSource {
    fn name(&self) -> &'static str {
        "hacker-news"
    }

    async fn fetch(&self, limit: usize) -> WorkflowResult<Vec<TrendingItem>> {
        let ids = self.top_story_ids().await?;
        let wanted: Vec<u64> = ids.into_iter().take(limit).collect();

        let items: Vec<TrendingItem> = stream::iter(wanted)
            .map(|id| self.item(id))
            .buffered(CONCURRENT_ITEM_REQUESTS)
            .filter_map(|item| async move { item })
            .collect()
            .await;

        debug!(count = items.len(), "Fetched Hacker News stories");
        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
struct HnItem {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    by: Option<String>,
    #[serde(default)]
    time: Option<i64>,
    #[serde(default)]
    deleted: bool,
    #[serde(default)]
    dead: bool,
}

impl HnItem {
    fn into_trending(self) -> Option<TrendingItem> {
        if self.deleted || self.dead {
            return None;
        }
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        Some(TrendingItem {
            id: Some(self.id),
            title,
            score: self.score,
            url: self.url.unwrap_or_default(),
            by: Some(self.by.unwrap_or_else(|| "unknown".to_string())),
            time: self.time,
        })
    }
}
