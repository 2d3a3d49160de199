//! Run state for one script generation.
//!
//! One `RunState` is created per invocation, mutated in place by the
//! workflow engine, and handed back to the caller once the engine reaches
//! `Done`.
//!
//! ```text
//! Scout → Draft → Validate ─┬─→ Done
//!                    ↑      │
//!                    └─ Refine
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::models::evaluation::Feedback;

/// Script layout selected for the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptFormat {
    /// 100-second short.
    #[default]
    #[serde(rename = "100_seconds")]
    HundredSeconds,
    /// Four to five minute news-style report.
    #[serde(rename = "code_report")]
    CodeReport,
    /// Step-by-step tutorial.
    #[serde(rename = "tutorial")]
    Tutorial,
}

impl ScriptFormat {
    pub const ALL: [Self; 3] = [Self::HundredSeconds, Self::CodeReport, Self::Tutorial];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HundredSeconds => "100_seconds",
            Self::CodeReport => "code_report",
            Self::Tutorial => "tutorial",
        }
    }
}

impl fmt::Display for ScriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "100_seconds" | "100s" => Ok(Self::HundredSeconds),
            "code_report" => Ok(Self::CodeReport),
            "tutorial" => Ok(Self::Tutorial),
            other => Err(format!(
                "Unknown script format '{other}'. Expected one of: 100_seconds, code_report, tutorial"
            )),
        }
    }
}

/// Where the researched topic came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Live,
    Cached,
}

impl ExecutionMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Cached => "cached",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State machine position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    Scout,
    Draft,
    Validate,
    Refine,
    Done,
}

impl WorkflowStep {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Label used when a step error is recorded in `RunState::errors`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scout => "Scout",
            Self::Draft => "Writer",
            Self::Validate => "Validator",
            Self::Refine => "Refine",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scout => "scout",
            Self::Draft => "draft",
            Self::Validate => "validate",
            Self::Refine => "refine",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// How a finished run should be read by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Final script present and at or above the threshold.
    Passed,
    /// Final script present but the refinement cap ran out first.
    BelowThreshold,
    /// No final script; `errors` explains why.
    Failed,
}

/// Scores written by one Validate pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRecord {
    pub heuristic_score: u8,
    pub semantic_score: u8,
    pub score: u8,
    pub feedback: Feedback,
}

/// Mutable record owned by the workflow engine for a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub run_id: Uuid,
    pub channel: String,
    pub topic: Option<String>,
    pub format: ScriptFormat,
    /// Caller asked for cached trending data instead of the live feed.
    pub cached_mode: bool,

    pub research_brief: Option<String>,
    pub research_sources: Vec<String>,

    pub draft: Option<String>,

    pub score: Option<u8>,
    pub heuristic_score: Option<u8>,
    pub semantic_score: Option<u8>,
    pub feedback: Option<Feedback>,

    pub iteration: u32,
    pub should_refine: bool,

    pub errors: Vec<String>,
    pub execution_mode: ExecutionMode,

    #[serde(rename = "final")]
    pub final_script: Option<String>,

    pub step: WorkflowStep,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunState {
    /// Fresh state positioned at `Scout`.
    pub fn new(
        channel: impl Into<String>,
        topic: Option<String>,
        format: ScriptFormat,
        cached_mode: bool,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            channel: channel.into(),
            topic: topic.filter(|t| !t.trim().is_empty()),
            format,
            cached_mode,
            research_brief: None,
            research_sources: Vec::new(),
            draft: None,
            score: None,
            heuristic_score: None,
            semantic_score: None,
            feedback: None,
            iteration: 0,
            should_refine: false,
            errors: Vec::new(),
            execution_mode: ExecutionMode::Live,
            final_script: None,
            step: WorkflowStep::Scout,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Overwrite all validation outputs at once so they never disagree.
    pub fn record_validation(&mut self, record: ValidationRecord) {
        self.heuristic_score = Some(record.heuristic_score);
        self.semantic_score = Some(record.semantic_score);
        self.score = Some(record.score);
        self.feedback = Some(record.feedback);
    }

    /// Non-empty draft text, if any.
    pub fn current_draft(&self) -> Option<&str> {
        self.draft.as_deref().filter(|d| !d.trim().is_empty())
    }

    pub fn is_finished(&self) -> bool {
        self.step.is_terminal()
    }

    pub fn outcome(&self, threshold: u8) -> RunOutcome {
        match (&self.final_script, self.score) {
            (Some(_), Some(score)) if score >= threshold => RunOutcome::Passed,
            (Some(_), _) => RunOutcome::BelowThreshold,
            (None, _) => RunOutcome::Failed,
        }
    }
}
