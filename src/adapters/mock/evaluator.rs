use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{MockReply, ScriptedReplies};
use crate::domain::errors::{WorkflowError, WorkflowResult};
use crate::domain::models::{BrandProfile, SemanticEvaluation};
use crate::domain::ports::SemanticEvaluator;

/// Semantic evaluator answering from a scripted queue; records evaluated texts.
#[derive(Debug)]
pub struct MockSemanticEvaluator {
    replies: ScriptedReplies<SemanticEvaluation>,
    texts: RwLock<Vec<String>>,
}

impl MockSemanticEvaluator {
    /// Evaluation with the given score and one weakness and suggestion.
    pub fn evaluation(score: i64) -> SemanticEvaluation {
        SemanticEvaluation {
            score,
            reasoning: format!("scored {score}"),
            strengths: vec!["clear hook".to_string()],
            weaknesses: vec!["too long".to_string()],
            suggestions: vec!["tighten the middle".to_string()],
        }
    }

    /// Scores in order, then repeats the last one.
    pub fn with_scores(scores: &[i64]) -> Self {
        let replies: Vec<MockReply<SemanticEvaluation>> = scores
            .iter()
            .map(|s| MockReply::Ok(Self::evaluation(*s)))
            .collect();
        let default = replies.last().cloned();
        Self::with_replies(replies, default)
    }

    pub fn with_replies(
        replies: Vec<MockReply<SemanticEvaluation>>,
        default: Option<MockReply<SemanticEvaluation>>,
    ) -> Self {
        Self {
            replies: ScriptedReplies::new(replies, default),
            texts: RwLock::new(Vec::new()),
        }
    }

    pub fn failing(error: WorkflowError) -> Self {
        Self::with_replies(Vec::new(), Some(MockReply::Err(error)))
    }

    pub fn hanging() -> Self {
        Self::with_replies(Vec::new(), Some(MockReply::Hang))
    }

    pub async fn push(&self, reply: MockReply<SemanticEvaluation>) {
        self.replies.push(reply).await;
    }

    pub async fn evaluated_texts(&self) -> Vec<String> {
        self.texts.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.texts.read().await.len()
    }
}

#[async_trait]
impl SemanticEvaluator for MockSemanticEvaluator {
    async fn evaluate(
        &self,
        text: &str,
        _profile: &BrandProfile,
        _channel: &str,
    ) -> WorkflowResult<SemanticEvaluation> {
        self.texts.write().await.push(text.to_string());
        self.replies.next("evaluation").await
    }
}
