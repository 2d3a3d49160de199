//! Research → draft → validate → refine state machine.
//!
//! The engine owns the `RunState` for the whole run. Steps run strictly in
//! sequence; the only branch is after `Validate`, decided by [`next_step`]
//! from the stored score and iteration count.
//!
//! A failing step records `"<Step> error: <message>"`, jumps to `Done` and
//! leaves the final script unset.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::timeout;
use tracing::{error, info, instrument, warn};

use crate::domain::errors::{WorkflowError, WorkflowResult};
use crate::domain::models::{
    BrandProfile, GenerationContext, GenerationRequest, ResearchRequest, RunState,
    ValidationRecord, WorkflowStep,
};
use crate::domain::ports::{SemanticEvaluator, TextGenerator, TopicResearchProvider};
use crate::services::heuristic_scorer::HeuristicScorer;
use crate::services::refinement_policy::RefinementPolicy;
use crate::services::score_blender::ScoreBlender;

/// Transition function. Pure: reads only `score` and `iteration`.
pub fn next_step(step: WorkflowStep, state: &RunState, policy: &RefinementPolicy) -> WorkflowStep {
    match step {
        WorkflowStep::Scout => WorkflowStep::Draft,
        WorkflowStep::Draft => WorkflowStep::Validate,
        WorkflowStep::Validate => match state.score {
            Some(score) if policy.should_refine(score, state.iteration) => WorkflowStep::Refine,
            _ => WorkflowStep::Done,
        },
        WorkflowStep::Refine => WorkflowStep::Validate,
        WorkflowStep::Done => WorkflowStep::Done,
    }
}

/// Rejects generator output that has no text, whichever generator produced it.
fn non_blank_draft(draft: String) -> WorkflowResult<String> {
    if draft.trim().is_empty() {
        return Err(WorkflowError::MissingInput(
            "generator returned an empty draft".to_string(),
        ));
    }
    Ok(draft)
}

pub struct WorkflowEngine {
    research: Arc<dyn TopicResearchProvider>,
    generator: Arc<dyn TextGenerator>,
    evaluator: Arc<dyn SemanticEvaluator>,
    heuristic: HeuristicScorer,
    blender: ScoreBlender,
    policy: RefinementPolicy,
    call_timeout: Option<Duration>,
}

impl WorkflowEngine {
    pub fn new(
        research: Arc<dyn TopicResearchProvider>,
        generator: Arc<dyn TextGenerator>,
        evaluator: Arc<dyn SemanticEvaluator>,
    ) -> Self {
        Self {
            research,
            generator,
            evaluator,
            heuristic: HeuristicScorer::new(),
            blender: ScoreBlender::new(),
            policy: RefinementPolicy::default(),
            call_timeout: None,
        }
    }

    /// Deadline applied to every research, generation and evaluation call.
    #[must_use]
    pub const fn with_call_timeout(mut self, limit: Option<Duration>) -> Self {
        self.call_timeout = limit;
        self
    }

    pub const fn policy(&self) -> &RefinementPolicy {
        &self.policy
    }

    /// Drive `state` from its current step to `Done` and return it.
    #[instrument(skip_all, fields(run_id = %state.run_id, channel = %state.channel, format = %state.format))]
    pub async fn run(&self, mut state: RunState, profile: Arc<BrandProfile>) -> RunState {
        let mut failed = false;

        while !state.step.is_terminal() {
            let step = state.step;
            match self.execute_step(step, &mut state, &profile).await {
                Ok(()) => {
                    state.step = next_step(step, &state, &self.policy);
                }
                Err(e) => {
                    let message = format!("{} error: {e}", step.label());
                    error!(step = %step, error = %e, "Step failed, ending run");
                    state.errors.push(message);
                    failed = true;
                    state.step = WorkflowStep::Done;
                }
            }
        }

        if !failed {
            state.final_script = state.current_draft().map(str::to_string);
        }
        state.finished_at = Some(Utc::now());

        info!(
            iteration = state.iteration,
            score = ?state.score,
            errors = state.errors.len(),
            has_final = state.final_script.is_some(),
            "Run finished"
        );
        state
    }

    async fn execute_step(
        &self,
        step: WorkflowStep,
        state: &mut RunState,
        profile: &Arc<BrandProfile>,
    ) -> WorkflowResult<()> {
        match step {
            WorkflowStep::Scout => self.scout(state, profile).await,
            WorkflowStep::Draft => self.draft(state, profile).await,
            WorkflowStep::Validate => self.validate(state, profile).await,
            WorkflowStep::Refine => self.refine(state, profile).await,
            WorkflowStep::Done => Ok(()),
        }
    }

    async fn scout(&self, state: &mut RunState, profile: &Arc<BrandProfile>) -> WorkflowResult<()> {
        let request = ResearchRequest {
            topic: state.topic.clone(),
            channel: state.channel.clone(),
            profile: Arc::clone(profile),
            cached_mode: state.cached_mode,
        };
        let result = self
            .with_deadline("research", self.research.discover(&request))
            .await?;

        if result.brief.trim().is_empty() {
            return Err(WorkflowError::MissingInput(
                "research returned an empty brief".to_string(),
            ));
        }

        if state.topic.is_none() && !result.topic.trim().is_empty() {
            state.topic = Some(result.topic);
        }
        state.research_brief = Some(result.brief);
        state.research_sources = result.sources;
        state.execution_mode = result.mode;

        info!(topic = ?state.topic, mode = %state.execution_mode, "Research complete");
        Ok(())
    }

    async fn draft(&self, state: &mut RunState, profile: &Arc<BrandProfile>) -> WorkflowResult<()> {
        let brief = state
            .research_brief
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .ok_or_else(|| WorkflowError::MissingInput("no research brief to draft from".to_string()))?;

        let request = GenerationRequest {
            context: GenerationContext::Research {
                brief: brief.to_string(),
            },
            format: state.format,
            channel: state.channel.clone(),
            profile: Arc::clone(profile),
        };
        let draft = self
            .with_deadline("generation", self.generator.generate(&request))
            .await
            .and_then(non_blank_draft)?;

        info!(chars = draft.len(), "Draft written");
        state.draft = Some(draft);
        Ok(())
    }

    async fn validate(&self, state: &mut RunState, profile: &Arc<BrandProfile>) -> WorkflowResult<()> {
        let draft = state
            .current_draft()
            .ok_or_else(|| WorkflowError::MissingInput("no draft to validate".to_string()))?
            .to_string();

        let heuristic_score = self.heuristic.score(&draft, profile);
        let evaluation = self
            .with_deadline(
                "evaluation",
                self.evaluator.evaluate(&draft, profile, &state.channel),
            )
            .await?;
        let (semantic_score, feedback) = evaluation.into_checked()?;
        let score = self.blender.blend(heuristic_score, semantic_score);

        state.record_validation(ValidationRecord {
            heuristic_score,
            semantic_score,
            score,
            feedback,
        });
        state.should_refine = self.policy.should_refine(score, state.iteration);

        info!(
            heuristic_score,
            semantic_score,
            score,
            iteration = state.iteration,
            should_refine = state.should_refine,
            "Draft validated"
        );
        Ok(())
    }

    async fn refine(&self, state: &mut RunState, profile: &Arc<BrandProfile>) -> WorkflowResult<()> {
        // Counted on entry, before the preconditions: a Refine that fails
        // with MissingInput still uses up one refinement.
        state.iteration += 1;
        info!(iteration = state.iteration, cap = self.policy.max_refinements(), "Refining draft");

        let draft = state
            .current_draft()
            .ok_or_else(|| WorkflowError::MissingInput("no draft to refine".to_string()))?;
        let feedback = state
            .feedback
            .as_ref()
            .filter(|f| f.is_actionable())
            .ok_or_else(|| {
                WorkflowError::MissingInput("no weaknesses or suggestions to refine with".to_string())
            })?;

        let request = GenerationRequest {
            context: GenerationContext::refinement(draft, feedback),
            format: state.format,
            channel: state.channel.clone(),
            profile: Arc::clone(profile),
        };
        let refined = self
            .with_deadline("generation", self.generator.generate(&request))
            .await
            .and_then(non_blank_draft)?;

        state.draft = Some(refined);
        Ok(())
    }

    async fn with_deadline<T, F>(&self, what: &'static str, call: F) -> WorkflowResult<T>
    where
        F: Future<Output = WorkflowResult<T>>,
    {
        let Some(limit) = self.call_timeout else {
            return call.await;
        };

        timeout(limit, call).await.unwrap_or_else(|_| {
            warn!(call = what, limit_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX), "Collaborator call timed out");
            Err(WorkflowError::Provider(format!(
                "{what} timed out after {limit:?}"
            )))
        })
    }
}
