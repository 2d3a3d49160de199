//! Script generation with the writer model.

use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{info, instrument};

use crate::domain::errors::{WorkflowError, WorkflowResult};
use crate::domain::models::GenerationRequest;
use crate::domain::ports::{AgentRole, CompletionRequest, LlmClient, TextGenerator};
use crate::services::prompts;

/// Room for the longer code report format.
const WRITER_MAX_TOKENS: u32 = 8000;

static TIMESTAMP_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[\d:XYZ]+-[\d:XYZ]+\]").expect("valid timestamp regex"));
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(\w+)?[ \t]*\n").expect("valid code fence regex"));
static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{4,}").expect("valid newline regex"));

/// Writes and rewrites scripts in the channel's voice.
pub struct ScriptWriter {
    llm: Arc<dyn LlmClient>,
}

impl ScriptWriter {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl TextGenerator for ScriptWriter {
    #[instrument(skip(self, request), fields(channel = %request.channel, format = %request.format, refinement = request.context.is_refinement()))]
    async fn generate(&self, request: &GenerationRequest) -> WorkflowResult<String> {
        let completion = CompletionRequest::new(
            AgentRole::Writer,
            prompts::writer_system_prompt(&request.channel, &request.profile),
            prompts::writer_user_message(
                &request.channel,
                &request.profile,
                &request.context,
                request.format,
            ),
        )
        .with_max_tokens(WRITER_MAX_TOKENS);

        let raw = self.llm.complete(completion).await?;
        let script = clean_script_formatting(&raw);
        if script.trim().is_empty() {
            return Err(WorkflowError::MissingInput(
                "writer returned an empty script".to_string(),
            ));
        }

        info!(chars = script.len(), "Script generated");
        Ok(script)
    }
}

/// Normalise model output into the layout the templates ask for.
///
/// - exactly two blank lines after each timestamp header
/// - no stray whitespace between a code fence's language tag and the newline
/// - at most three consecutive newlines
/// - no trailing whitespace on any line
pub fn clean_script_formatting(script: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut iter = script.lines().peekable();

    while let Some(line) = iter.next() {
        lines.push(line);
        if TIMESTAMP_HEADER.is_match(line.trim()) {
            while iter.peek().is_some_and(|next| next.trim().is_empty()) {
                iter.next();
            }
            lines.push("");
            lines.push("");
        }
    }

    let joined = lines.join("\n");
    let fenced = CODE_FENCE.replace_all(&joined, "```$1\n");
    let collapsed = EXCESS_NEWLINES.replace_all(&fenced, "\n\n\n");

    collapsed
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rough speaking time at 150 words per minute.
pub fn estimate_reading_seconds(script: &str) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let words = script.split_whitespace().count() as f64;
    words / 2.5
}
