//! Research and generation request/response types.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::models::brand_profile::BrandProfile;
use crate::domain::models::evaluation::Feedback;
use crate::domain::models::run_state::{ExecutionMode, ScriptFormat};

/// One trending-topic candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingItem {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub by: Option<String>,
    /// Unix timestamp of submission.
    #[serde(default)]
    pub time: Option<i64>,
}

impl TrendingItem {
    pub fn new(title: impl Into<String>, score: i64, url: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            score,
            url: url.into(),
            by: None,
            time: None,
        }
    }
}

/// Candidates together with the provenance of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingBatch {
    pub items: Vec<TrendingItem>,
    pub mode: ExecutionMode,
}

/// Input to a research provider.
#[derive(Debug, Clone)]
pub struct ResearchRequest {
    /// Topic to research; `None` means auto-discover from trending candidates.
    pub topic: Option<String>,
    pub channel: String,
    pub profile: Arc<BrandProfile>,
    /// Skip the live candidate feed.
    pub cached_mode: bool,
}

/// Output of a research provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchResult {
    pub topic: String,
    pub brief: String,
    pub sources: Vec<String>,
    pub mode: ExecutionMode,
}

/// What the generator should write from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationContext {
    /// First draft, written from the research brief.
    Research { brief: String },
    /// Rewrite of the previous draft guided by validator feedback.
    Refinement {
        draft: String,
        weaknesses: Vec<String>,
        suggestions: Vec<String>,
    },
}

impl GenerationContext {
    pub fn refinement(draft: &str, feedback: &Feedback) -> Self {
        Self::Refinement {
            draft: draft.to_string(),
            weaknesses: feedback.weaknesses.clone(),
            suggestions: feedback.suggestions.clone(),
        }
    }

    pub const fn is_refinement(&self) -> bool {
        matches!(self, Self::Refinement { .. })
    }
}

/// Input to a text generator.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub context: GenerationContext,
    pub format: ScriptFormat,
    pub channel: String,
    pub profile: Arc<BrandProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trending_item_defaults() {
        let item: TrendingItem = serde_json::from_str(r#"{"title": "Rust 2.0"}"#).unwrap();
        assert_eq!(item.title, "Rust 2.0");
        assert_eq!(item.score, 0);
        assert!(item.url.is_empty());
        assert!(item.id.is_none());
    }

    #[test]
    fn test_refinement_context_copies_feedback() {
        let feedback = Feedback {
            reasoning: "meh".to_string(),
            strengths: vec![],
            weaknesses: vec!["slow intro".to_string()],
            suggestions: vec!["cut the intro".to_string()],
        };
        let context = GenerationContext::refinement("draft text", &feedback);

        assert!(context.is_refinement());
        assert_eq!(
            context,
            GenerationContext::Refinement {
                draft: "draft text".to_string(),
                weaknesses: vec!["slow intro".to_string()],
                suggestions: vec!["cut the intro".to_string()],
            }
        );
    }
}
