//! Scriptforge - brand-voice video script generator
//!
//! Scriptforge researches a topic, drafts a script in a channel's voice,
//! scores it against the channel's brand profile and refines it a bounded
//! number of times.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and collaborator ports
//! - **Service Layer** (`services`): scoring, refinement policy, agents and the workflow engine
//! - **Adapter Layer** (`adapters`): OpenAI, Hacker News, profile files and in-memory mocks
//! - **Application Layer** (`application`): the run-level pipeline
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use scriptforge::application::{Pipeline, RunRequest};
//! use scriptforge::infrastructure::config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let pipeline = Pipeline::from_config(&config)?;
//!     let state = pipeline.execute(RunRequest::new("fireship").with_topic("Bun")).await?;
//!     println!("{:?}", state.final_script);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{Pipeline, RunRequest};
pub use domain::models::{
    BrandProfile, Config, ExecutionMode, RunOutcome, RunState, ScriptFormat, WorkflowStep,
};
pub use domain::{WorkflowError, WorkflowResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    HeuristicScorer, RefinementPolicy, ScoreBlender, WorkflowEngine, MAX_REFINEMENTS,
    SCORE_THRESHOLD,
};
