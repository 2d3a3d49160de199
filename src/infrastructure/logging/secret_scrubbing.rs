use regex::{Captures, Regex};
use std::sync::LazyLock;

static API_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // OpenAI keys: sk-..., sk-proj-...
    Regex::new(r"sk-[a-zA-Z0-9_-]{20,}").expect("valid api key regex")
});
static BEARER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Bearer\s+[a-zA-Z0-9_\.-]+").expect("valid bearer regex")
});
static TOKEN_FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(["']?(?:api_key|apikey|token|secret)["']?\s*[:=]\s*)["']?[a-zA-Z0-9_\.-]{20,}["']?"#,
    )
    .expect("valid token field regex")
});

/// Remove credentials from text before it reaches logs or run errors.
///
/// Provider error bodies are echoed into `RunState::errors`, and some
/// providers quote the rejected key back.
pub fn scrub_secrets(message: &str) -> String {
    let scrubbed = API_KEY_PATTERN.replace_all(message, "[API_KEY_REDACTED]");
    let scrubbed = BEARER_PATTERN.replace_all(&scrubbed, "Bearer [TOKEN_REDACTED]");
    TOKEN_FIELD_PATTERN
        .replace_all(&scrubbed, |caps: &Captures| format!("{}[REDACTED]", &caps[1]))
        .into_owned()
}
