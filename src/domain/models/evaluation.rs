//! Semantic evaluation types.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{WorkflowError, WorkflowResult};

/// Qualitative feedback attached to the most recent validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub reasoning: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Feedback {
    /// True when there is something a refinement pass can act on.
    pub fn is_actionable(&self) -> bool {
        self.weaknesses.iter().any(|w| !w.trim().is_empty())
            || self.suggestions.iter().any(|s| !s.trim().is_empty())
    }
}

/// Structured result returned by a semantic evaluator.
///
/// The score is read as a signed integer so that out-of-range values from a
/// model are reported as a scoring error instead of failing deserialization
/// with an opaque message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticEvaluation {
    pub score: i64,
    pub reasoning: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

impl SemanticEvaluation {
    /// Check the schema contract and split into score and feedback.
    pub fn into_checked(self) -> WorkflowResult<(u8, Feedback)> {
        let score = u8::try_from(self.score)
            .ok()
            .filter(|s| *s <= 100)
            .ok_or_else(|| {
                WorkflowError::Scoring(format!(
                    "semantic score {} is outside 0-100",
                    self.score
                ))
            })?;

        Ok((
            score,
            Feedback {
                reasoning: self.reasoning,
                strengths: self.strengths,
                weaknesses: self.weaknesses,
                suggestions: self.suggestions,
            },
        ))
    }

    /// JSON schema handed to structured-output capable models.
    pub fn json_schema() -> serde_json::Value {
        let string_list = serde_json::json!({"type": "array", "items": {"type": "string"}});
        serde_json::json!({
            "type": "object",
            "properties": {
                "score": {"type": "integer", "minimum": 0, "maximum": 100},
                "reasoning": {"type": "string"},
                "strengths": string_list,
                "weaknesses": string_list,
                "suggestions": string_list,
            },
            "required": ["score", "reasoning", "strengths", "weaknesses", "suggestions"],
            "additionalProperties": false,
        })
    }
}
