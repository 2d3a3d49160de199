//! Port trait definitions (Hexagonal Architecture)
//!
//! The workflow engine talks to the outside world only through these traits:
//! - BrandProfileProvider: channel profile lookup
//! - TopicResearchProvider / TrendingCandidateSource: topic discovery and research
//! - TextGenerator: draft and refinement generation
//! - SemanticEvaluator: model-backed brand voice scoring
//! - LlmClient: chat completion transport shared by the production adapters

pub mod brand_profile_provider;
pub mod llm_client;
pub mod research;
pub mod semantic_evaluator;
pub mod text_generator;

pub use brand_profile_provider::BrandProfileProvider;
pub use llm_client::{AgentRole, CompletionRequest, LlmClient, LlmError, ResponseFormat};
pub use research::{TopicResearchProvider, TrendingCandidateSource};
pub use semantic_evaluator::SemanticEvaluator;
pub use text_generator::TextGenerator;
