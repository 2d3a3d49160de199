use async_trait::async_trait;

use crate::domain::errors::WorkflowResult;
use crate::domain::models::{BrandProfile, SemanticEvaluation};

/// Model-backed judgement of how well a text matches a brand profile.
///
/// # Errors
/// - `WorkflowError::Scoring` - the evaluator answered but the answer does not
///   fit the schema
/// - `WorkflowError::Provider` - the evaluator could not be reached
#[async_trait]
pub trait SemanticEvaluator: Send + Sync {
    async fn evaluate(
        &self,
        text: &str,
        profile: &BrandProfile,
        channel: &str,
    ) -> WorkflowResult<SemanticEvaluation>;
}
