//! Semantic brand voice evaluation with structured model output.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::errors::{WorkflowError, WorkflowResult};
use crate::domain::models::{BrandProfile, SemanticEvaluation};
use crate::domain::ports::{AgentRole, CompletionRequest, LlmClient, SemanticEvaluator};
use crate::services::{extract_json_from_response, prompts};

const SCHEMA_NAME: &str = "brand_score";

/// Asks the validator model to grade a script against the full profile.
pub struct BrandVoiceEvaluator {
    llm: Arc<dyn LlmClient>,
}

impl BrandVoiceEvaluator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SemanticEvaluator for BrandVoiceEvaluator {
    #[instrument(skip(self, text, profile), fields(chars = text.len()))]
    async fn evaluate(
        &self,
        text: &str,
        profile: &BrandProfile,
        channel: &str,
    ) -> WorkflowResult<SemanticEvaluation> {
        let request = CompletionRequest::new(
            AgentRole::Validator,
            prompts::validator_system_prompt(channel, profile),
            prompts::validator_user_message(channel, profile, text),
        )
        .with_json_schema(SCHEMA_NAME, SemanticEvaluation::json_schema());

        let raw = self.llm.complete(request).await?;
        let json = extract_json_from_response(&raw);

        let evaluation: SemanticEvaluation = serde_json::from_str(&json).map_err(|e| {
            WorkflowError::Scoring(format!("evaluator response does not match schema: {e}"))
        })?;

        debug!(score = evaluation.score, "Semantic evaluation parsed");
        Ok(evaluation)
    }
}
