//! Scripted chat completion client for tests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::ports::{AgentRole, CompletionRequest, LlmClient, LlmError};

/// Answers completions from per-role queues and records every request.
///
/// When a role's queue is empty the role's default response is used; with
/// no default the call fails with `LlmError::InvalidResponse`.
pub struct MockLlmClient {
    queued: Arc<RwLock<HashMap<AgentRole, VecDeque<Result<String, LlmError>>>>>,
    defaults: Arc<RwLock<HashMap<AgentRole, String>>>,
    calls: Arc<RwLock<Vec<CompletionRequest>>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            queued: Arc::new(RwLock::new(HashMap::new())),
            defaults: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Queue a successful answer for the next call from `role`.
    pub async fn push_response(&self, role: AgentRole, text: impl Into<String>) {
        let mut queued = self.queued.write().await;
        queued.entry(role).or_default().push_back(Ok(text.into()));
    }

    /// Queue a failure for the next call from `role`.
    pub async fn push_error(&self, role: AgentRole, error: LlmError) {
        let mut queued = self.queued.write().await;
        queued.entry(role).or_default().push_back(Err(error));
    }

    /// Answer used once the queue for `role` is drained.
    pub async fn set_default(&self, role: AgentRole, text: impl Into<String>) {
        let mut defaults = self.defaults.write().await;
        defaults.insert(role, text.into());
    }

    /// Requests received so far, in order.
    pub async fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.read().await.clone()
    }

    pub async fn calls_for(&self, role: AgentRole) -> usize {
        self.calls.read().await.iter().filter(|c| c.role == role).count()
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let role = request.role;
        self.calls.write().await.push(request);

        let next = {
            let mut queued = self.queued.write().await;
            queued.get_mut(&role).and_then(VecDeque::pop_front)
        };
        if let Some(result) = next {
            return result;
        }

        let defaults = self.defaults.read().await;
        defaults.get(&role).cloned().ok_or_else(|| {
            LlmError::InvalidResponse(format!("no scripted response for role '{role}'"))
        })
    }
}
