use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{MockReply, ScriptedReplies};
use crate::domain::errors::{WorkflowError, WorkflowResult};
use crate::domain::models::GenerationRequest;
use crate::domain::ports::TextGenerator;

/// Text generator answering from a scripted queue; records every request.
#[derive(Debug)]
pub struct MockTextGenerator {
    replies: ScriptedReplies<String>,
    requests: RwLock<Vec<GenerationRequest>>,
}

impl MockTextGenerator {
    /// Replies in order, then repeats the last one.
    pub fn with_drafts<I, S>(drafts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let replies: Vec<MockReply<String>> =
            drafts.into_iter().map(|d| MockReply::Ok(d.into())).collect();
        let default = replies.last().cloned();
        Self::with_replies(replies, default)
    }

    pub fn with_replies(replies: Vec<MockReply<String>>, default: Option<MockReply<String>>) -> Self {
        Self {
            replies: ScriptedReplies::new(replies, default),
            requests: RwLock::new(Vec::new()),
        }
    }

    pub fn failing(error: WorkflowError) -> Self {
        Self::with_replies(Vec::new(), Some(MockReply::Err(error)))
    }

    pub fn hanging() -> Self {
        Self::with_replies(Vec::new(), Some(MockReply::Hang))
    }

    pub async fn push(&self, reply: MockReply<String>) {
        self.replies.push(reply).await;
    }

    pub async fn set_default(&self, reply: MockReply<String>) {
        self.replies.set_default(reply).await;
    }

    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> WorkflowResult<String> {
        self.requests.write().await.push(request.clone());
        self.replies.next("generation").await
    }
}
