//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use scriptforge::adapters::mock::{
    MockResearchProvider, MockSemanticEvaluator, MockTextGenerator,
};
use scriptforge::domain::models::{BrandProfile, Formality, RunState, ScriptFormat};
use scriptforge::services::WorkflowEngine;

/// Signature phrases: "let's go", "in 100 seconds". Avoided: "synergy", "leverage".
pub fn test_profile() -> BrandProfile {
    BrandProfile {
        tone: vec!["sarcastic".to_string(), "fast".to_string()],
        formality_level: Formality::Scale(3),
        pacing: "rapid".to_string(),
        signature_phrases: vec!["Let's go".to_string(), "in 100 seconds".to_string()],
        avoid: vec!["synergy".to_string(), "leverage".to_string()],
        extra: BTreeMap::new(),
    }
}

/// Three ten-word sentences with both signature phrases: heuristic 90.
pub const DRAFT_90: &str = "Let's go and build a tiny app with Rust today. \
    Rust explained in 100 seconds is faster than reading docs. \
    The compiler yells at you but it is usually right.";

/// `DRAFT_90` plus one avoided term: heuristic 85.
pub const DRAFT_85: &str = "Let's go and build a tiny app with Rust today. \
    Rust explained in 100 seconds is faster than reading docs. \
    The compiler yells about synergy but it is right.";

pub fn new_state(topic: Option<&str>) -> RunState {
    RunState::new(
        "fireship",
        topic.map(str::to_string),
        ScriptFormat::HundredSeconds,
        false,
    )
}

/// Collaborators shared with the engine so tests can inspect them afterwards.
pub struct Harness {
    pub research: Arc<MockResearchProvider>,
    pub generator: Arc<MockTextGenerator>,
    pub evaluator: Arc<MockSemanticEvaluator>,
}

impl Harness {
    pub fn new(
        research: MockResearchProvider,
        generator: MockTextGenerator,
        evaluator: MockSemanticEvaluator,
    ) -> Self {
        Self {
            research: Arc::new(research),
            generator: Arc::new(generator),
            evaluator: Arc::new(evaluator),
        }
    }

    /// Research succeeds, every draft is `DRAFT_90`, semantic scores follow `scores`.
    pub fn with_scores(scores: &[i64]) -> Self {
        Self::new(
            MockResearchProvider::success("Rust", "Rust is a systems language."),
            MockTextGenerator::with_drafts([DRAFT_90]),
            MockSemanticEvaluator::with_scores(scores),
        )
    }

    pub fn engine(&self) -> WorkflowEngine {
        WorkflowEngine::new(
            Arc::clone(&self.research) as _,
            Arc::clone(&self.generator) as _,
            Arc::clone(&self.evaluator) as _,
        )
    }

    pub fn engine_with_timeout(&self, limit: Duration) -> WorkflowEngine {
        self.engine().with_call_timeout(Some(limit))
    }

    pub async fn run(&self) -> RunState {
        self.engine()
            .run(new_state(Some("Rust")), Arc::new(test_profile()))
            .await
    }

    /// Generation calls after the first draft.
    pub async fn refine_calls(&self) -> usize {
        self.generator.call_count().await.saturating_sub(1)
    }
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
