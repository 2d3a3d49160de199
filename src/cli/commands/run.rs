//! `scriptforge run`: one research, draft, validate, refine run.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;
use thiserror::Error;

use crate::application::{Pipeline, RunRequest};
use crate::cli::output::progress::{create_spinner_with_message, ProgressBarExt};
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Config, RunOutcome, RunState, ScriptFormat};
use crate::services::script_writer::estimate_reading_seconds;
use crate::services::SCORE_THRESHOLD;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Topic to write about; discovered from trending stories when omitted
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Script format (100_seconds, code_report, tutorial)
    #[arg(short, long)]
    pub format: Option<ScriptFormat>,

    /// Channel whose brand profile to use
    #[arg(short, long)]
    pub channel: Option<String>,

    /// Skip the live trending feed and use the cached candidate list
    #[arg(long)]
    pub cached: bool,
}

/// A run that finished without a final script.
///
/// The run has already been printed; only the exit status is left to set.
#[derive(Debug, Error)]
#[error("Run failed: {0}")]
pub struct RunFailed(pub String);

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct RunOutput {
    pub state: RunState,
    #[serde(skip)]
    pub outcome: RunOutcome,
}

impl RunOutput {
    pub fn new(state: RunState) -> Self {
        let outcome = state.outcome(SCORE_THRESHOLD);
        Self { state, outcome }
    }
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let state = &self.state;
        let mut lines = vec![
            format!("Topic: {}", state.topic.as_deref().unwrap_or("-")),
            format!(
                "Channel: {}  Format: {}  Source: {}",
                state.channel, state.format, state.execution_mode
            ),
            format!("Refinements: {}", state.iteration),
        ];

        if !state.research_sources.is_empty() {
            lines.push(format!("Sources: {}", state.research_sources.join(", ")));
        }

        if state.score.is_some() {
            lines.push(TableFormatter::new().format_scores(state));
        }

        let status = match self.outcome {
            RunOutcome::Passed => style("PASSED").green().bold().to_string(),
            RunOutcome::BelowThreshold => style(format!(
                "BELOW THRESHOLD (needs {SCORE_THRESHOLD})"
            ))
            .yellow()
            .bold()
            .to_string(),
            RunOutcome::Failed => style("FAILED").red().bold().to_string(),
        };
        lines.push(format!("Status: {status}"));

        if self.outcome == RunOutcome::BelowThreshold {
            if let Some(feedback) = state.feedback.as_ref().filter(|f| !f.suggestions.is_empty()) {
                lines.push("\nSuggestions:".to_string());
                for suggestion in &feedback.suggestions {
                    lines.push(format!("  - {suggestion}"));
                }
            }
        }

        if !state.errors.is_empty() {
            lines.push("\nErrors:".to_string());
            for error in &state.errors {
                lines.push(format!("  {} {error}", style("✗").red()));
            }
        }

        if let Some(script) = &state.final_script {
            lines.push(format!(
                "\n{} (~{:.0}s read)\n",
                style("Final script").bold().underlined(),
                estimate_reading_seconds(script)
            ));
            lines.push(script.clone());
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.state).unwrap_or_default()
    }
}

/// Resolve CLI flags against configured defaults.
pub fn build_request(args: RunArgs, config: &Config) -> Result<RunRequest> {
    let format = match args.format {
        Some(format) => format,
        None => config
            .workflow
            .default_format
            .parse()
            .map_err(anyhow::Error::msg)
            .context("Invalid workflow.default_format")?,
    };

    Ok(RunRequest {
        topic: args.topic.filter(|t| !t.trim().is_empty()),
        format,
        channel: args
            .channel
            .unwrap_or_else(|| config.workflow.default_channel.clone()),
        cached_mode: args.cached || config.workflow.cached_mode,
    })
}

pub async fn execute(args: RunArgs, config: &Config, json_mode: bool) -> Result<()> {
    let request = build_request(args, config)?;
    let pipeline = Pipeline::from_config(config)?;

    let spinner = create_spinner_with_message(
        format!(
            "Generating {} script for {}...",
            request.format, request.channel
        ),
        json_mode,
    );

    let state = match pipeline.execute(request).await {
        Ok(state) => state,
        Err(e) => {
            spinner.finish_error("Run not started");
            return Err(e).context("Failed to load brand profile");
        }
    };

    let result = RunOutput::new(state);
    match result.outcome {
        RunOutcome::Passed => spinner.finish_success("Script ready"),
        RunOutcome::BelowThreshold => spinner.finish_warning("Script ready, below threshold"),
        RunOutcome::Failed => spinner.finish_error("Run failed"),
    }

    output(&result, json_mode);

    if result.outcome == RunOutcome::Failed {
        return Err(RunFailed(result.state.errors.join("; ")).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Feedback;

    fn args() -> RunArgs {
        RunArgs {
            topic: None,
            format: None,
            channel: None,
            cached: false,
        }
    }

    #[test]
    fn test_build_request_uses_config_defaults() {
        let mut config = Config::default();
        config.workflow.default_format = "tutorial".to_string();
        config.workflow.cached_mode = true;

        let request = build_request(args(), &config).unwrap();

        assert_eq!(request.channel, "fireship");
        assert_eq!(request.format, ScriptFormat::Tutorial);
        assert!(request.cached_mode);
        assert!(request.topic.is_none());
    }

    #[test]
    fn test_build_request_flags_win() {
        let config = Config::default();
        let request = build_request(
            RunArgs {
                topic: Some("  ".to_string()),
                format: Some(ScriptFormat::CodeReport),
                channel: Some("veritasium".to_string()),
                cached: true,
            },
            &config,
        )
        .unwrap();

        assert_eq!(request.channel, "veritasium");
        assert_eq!(request.format, ScriptFormat::CodeReport);
        assert!(request.cached_mode);
        assert!(request.topic.is_none(), "Blank topic means discover one");
    }

    #[test]
    fn test_below_threshold_output_lists_suggestions() {
        let mut state = RunState::new("fireship", Some("Bun".to_string()), ScriptFormat::default(), false);
        state.score = Some(70);
        state.heuristic_score = Some(80);
        state.semantic_score = Some(63);
        state.iteration = 2;
        state.feedback = Some(Feedback {
            reasoning: "flat".to_string(),
            strengths: vec![],
            weaknesses: vec!["no hook".to_string()],
            suggestions: vec!["open with a joke".to_string()],
        });
        state.final_script = Some("[0:00-0:05] HOOK".to_string());

        let result = RunOutput::new(state);
        assert_eq!(result.outcome, RunOutcome::BelowThreshold);

        let human = result.to_human();
        assert!(human.contains("open with a joke"));
        assert!(human.contains("Refinements: 2"));
        assert!(human.contains("[0:00-0:05] HOOK"));
    }

    #[test]
    fn test_json_output_is_run_state() {
        let mut state = RunState::new("fireship", None, ScriptFormat::default(), true);
        state.errors.push("Scout error: provider error".to_string());

        let result = RunOutput::new(state);
        assert_eq!(result.outcome, RunOutcome::Failed);

        let json = result.to_json();
        assert_eq!(json["channel"], "fireship");
        assert_eq!(json["errors"][0], "Scout error: provider error");
        assert!(json["final"].is_null());
    }
}
