pub mod brand_profile;
pub mod config;
pub mod evaluation;
pub mod research;
pub mod run_state;

pub use brand_profile::{BrandProfile, Formality, REQUIRED_PROFILE_FIELDS};
pub use config::{
    Config, LoggingConfig, OpenAiConfig, ProfilesConfig, RoleModels, TrendingConfig,
    WorkflowConfig,
};
pub use evaluation::{Feedback, SemanticEvaluation};
pub use research::{
    GenerationContext, GenerationRequest, ResearchRequest, ResearchResult, TrendingBatch,
    TrendingItem,
};
pub use run_state::{
    ExecutionMode, RunOutcome, RunState, ScriptFormat, ValidationRecord, WorkflowStep,
};
