use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use super::{MockReply, ScriptedReplies};
use crate::domain::errors::{WorkflowError, WorkflowResult};
use crate::domain::models::{ExecutionMode, ResearchRequest, ResearchResult};
use crate::domain::ports::TopicResearchProvider;

/// Research provider with scripted results.
///
/// A scripted result whose topic is empty echoes the requested topic, so one
/// reply serves both given-topic and discovery runs.
#[derive(Debug)]
pub struct MockResearchProvider {
    replies: ScriptedReplies<ResearchResult>,
    calls: AtomicUsize,
    requests: RwLock<Vec<Option<String>>>,
}

impl MockResearchProvider {
    pub fn new(reply: MockReply<ResearchResult>) -> Self {
        Self {
            replies: ScriptedReplies::new(Vec::new(), Some(reply)),
            calls: AtomicUsize::new(0),
            requests: RwLock::new(Vec::new()),
        }
    }

    /// Always answers with `brief` on the given or discovered `topic`.
    pub fn success(topic: impl Into<String>, brief: impl Into<String>) -> Self {
        Self::new(MockReply::Ok(ResearchResult {
            topic: topic.into(),
            brief: brief.into(),
            sources: Vec::new(),
            mode: ExecutionMode::Live,
        }))
    }

    pub fn failing(error: WorkflowError) -> Self {
        Self::new(MockReply::Err(error))
    }

    pub fn hanging() -> Self {
        Self::new(MockReply::Hang)
    }

    pub async fn push(&self, reply: MockReply<ResearchResult>) {
        self.replies.push(reply).await;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Topics requested so far (`None` for discovery).
    pub async fn requested_topics(&self) -> Vec<Option<String>> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl TopicResearchProvider for MockResearchProvider {
    async fn discover(&self, request: &ResearchRequest) -> WorkflowResult<ResearchResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.write().await.push(request.topic.clone());

        let mut result = self.replies.next("research").await?;
        if let Some(topic) = &request.topic {
            if result.topic.is_empty() {
                result.topic.clone_from(topic);
            }
        }
        Ok(result)
    }
}
