//! In-memory collaborators for tests and offline runs.
//!
//! Every mock answers from a scripted queue of [`MockReply`] values, falling
//! back to a default reply once the queue is drained. A reply can succeed,
//! fail with any `WorkflowError`, or hang until the caller's deadline fires.

mod evaluator;
mod generator;
mod profiles;
mod research;
mod trending;

pub use evaluator::MockSemanticEvaluator;
pub use generator::MockTextGenerator;
pub use profiles::InMemoryProfileProvider;
pub use research::MockResearchProvider;
pub use trending::MockTrendingSource;

use std::collections::VecDeque;
use tokio::sync::RwLock;

use crate::domain::errors::{WorkflowError, WorkflowResult};

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum MockReply<T> {
    Ok(T),
    Err(WorkflowError),
    /// Never completes.
    Hang,
}

/// Queue of replies with an optional default.
#[derive(Debug)]
struct ScriptedReplies<T> {
    queue: RwLock<VecDeque<MockReply<T>>>,
    default: RwLock<Option<MockReply<T>>>,
}

impl<T: Clone + Send + Sync> ScriptedReplies<T> {
    fn new(queue: Vec<MockReply<T>>, default: Option<MockReply<T>>) -> Self {
        Self {
            queue: RwLock::new(queue.into()),
            default: RwLock::new(default),
        }
    }

    async fn push(&self, reply: MockReply<T>) {
        self.queue.write().await.push_back(reply);
    }

    async fn set_default(&self, reply: MockReply<T>) {
        *self.default.write().await = Some(reply);
    }

    async fn next(&self, what: &str) -> WorkflowResult<T> {
        let queued = self.queue.write().await.pop_front();
        let reply = match queued {
            Some(reply) => Some(reply),
            None => self.default.read().await.clone(),
        };

        match reply {
            Some(MockReply::Ok(value)) => Ok(value),
            Some(MockReply::Err(err)) => Err(err),
            Some(MockReply::Hang) => std::future::pending().await,
            None => Err(WorkflowError::Provider(format!("no scripted {what} reply"))),
        }
    }
}
