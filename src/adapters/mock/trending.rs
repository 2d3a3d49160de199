use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::errors::{WorkflowError, WorkflowResult};
use crate::domain::models::TrendingItem;
use crate::domain::ports::TrendingCandidateSource;

#[derive(Debug, Clone)]
enum Behavior {
    Items(Vec<TrendingItem>),
    Fail(String),
    Hang,
    Panic,
}

/// Trending source with a fixed behaviour.
#[derive(Debug)]
pub struct MockTrendingSource {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockTrendingSource {
    const fn from_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub const fn with_items(items: Vec<TrendingItem>) -> Self {
        Self::from_behavior(Behavior::Items(items))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_behavior(Behavior::Fail(message.into()))
    }

    /// Never answers.
    pub const fn hanging() -> Self {
        Self::from_behavior(Behavior::Hang)
    }

    /// Panics inside `fetch`.
    pub const fn panicking() -> Self {
        Self::from_behavior(Behavior::Panic)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrendingCandidateSource for MockTrendingSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch(&self, limit: usize) -> WorkflowResult<Vec<TrendingItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Items(items) => Ok(items.iter().take(limit).cloned().collect()),
            Behavior::Fail(message) => Err(WorkflowError::Provider(message.clone())),
            Behavior::Hang => std::future::pending().await,
            Behavior::Panic => panic!("mock trending source panicked"),
        }
    }
}
