//! Trending candidate fetch with a hard deadline and a cached fallback.
//!
//! The live source runs on its own task. If it misses the deadline, fails,
//! panics or comes back empty, the fallback list is used instead and the
//! batch is tagged `cached`. None of those paths is an error for the run.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::domain::models::{ExecutionMode, TrendingBatch, TrendingItem};
use crate::domain::ports::TrendingCandidateSource;

/// Default deadline for the live fetch.
pub const DEFAULT_FETCH_DEADLINE: Duration = Duration::from_secs(5);

pub struct TrendingFetcher {
    live: Arc<dyn TrendingCandidateSource>,
    fallback: Arc<dyn TrendingCandidateSource>,
    deadline: Duration,
}

impl TrendingFetcher {
    pub fn new(
        live: Arc<dyn TrendingCandidateSource>,
        fallback: Arc<dyn TrendingCandidateSource>,
    ) -> Self {
        Self {
            live,
            fallback,
            deadline: DEFAULT_FETCH_DEADLINE,
        }
    }

    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub const fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Fetch up to `limit` candidates. Never fails.
    pub async fn fetch(&self, limit: usize, cached_mode: bool) -> TrendingBatch {
        if cached_mode {
            info!(source = self.fallback.name(), "Cached mode: skipping live trending feed");
            return self.from_fallback(limit).await;
        }

        let live = Arc::clone(&self.live);
        let handle = tokio::spawn(async move { live.fetch(limit).await });

        // On deadline the handle is dropped, which detaches the task.
        match timeout(self.deadline, handle).await {
            Ok(Ok(Ok(items))) if !items.is_empty() => {
                debug!(source = self.live.name(), count = items.len(), "Using live trending data");
                TrendingBatch {
                    items,
                    mode: ExecutionMode::Live,
                }
            }
            Ok(Ok(Ok(_))) => {
                warn!(source = self.live.name(), "Live trending feed returned nothing, using cached data");
                self.from_fallback(limit).await
            }
            Ok(Ok(Err(e))) => {
                warn!(source = self.live.name(), error = %e, "Live trending feed failed, using cached data");
                self.from_fallback(limit).await
            }
            Ok(Err(join_err)) => {
                warn!(source = self.live.name(), error = %join_err, "Live trending task aborted, using cached data");
                self.from_fallback(limit).await
            }
            Err(_) => {
                warn!(
                    source = self.live.name(),
                    deadline_ms = u64::try_from(self.deadline.as_millis()).unwrap_or(u64::MAX),
                    "Live trending feed timed out, using cached data"
                );
                self.from_fallback(limit).await
            }
        }
    }

    async fn from_fallback(&self, limit: usize) -> TrendingBatch {
        let items: Vec<TrendingItem> = match self.fallback.fetch(limit).await {
            Ok(items) => items,
            Err(e) => {
                warn!(source = self.fallback.name(), error = %e, "Fallback trending source failed");
                Vec::new()
            }
        };
        info!(count = items.len(), "Loaded cached trending candidates");

        TrendingBatch {
            items,
            mode: ExecutionMode::Cached,
        }
    }
}
