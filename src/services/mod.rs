//! Workflow services: scoring, the refinement gate, the agents that back the
//! collaborator ports, and the engine that sequences them.

pub mod brand_voice;
pub mod heuristic_scorer;
pub mod prompts;
pub mod refinement_policy;
pub mod score_blender;
pub mod script_writer;
pub mod tech_scout;
pub mod trending;
pub mod workflow_engine;

pub use brand_voice::BrandVoiceEvaluator;
pub use heuristic_scorer::{HeuristicBreakdown, HeuristicScorer};
pub use refinement_policy::{RefinementPolicy, MAX_REFINEMENTS, SCORE_THRESHOLD};
pub use score_blender::ScoreBlender;
pub use script_writer::ScriptWriter;
pub use tech_scout::TechScout;
pub use trending::TrendingFetcher;
pub use workflow_engine::{next_step, WorkflowEngine};

/// Extract a JSON object from a model response that may wrap it in prose or
/// a markdown fence.
pub fn extract_json_from_response(response: &str) -> String {
    let trimmed = response.trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return trimmed.to_string();
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return trimmed[start..=end].to_string();
        }
    }

    trimmed.to_string()
}
