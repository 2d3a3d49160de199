use async_trait::async_trait;

use crate::domain::errors::WorkflowResult;
use crate::domain::models::GenerationRequest;

/// Writes a script from a research brief or rewrites one from feedback.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> WorkflowResult<String>;
}
