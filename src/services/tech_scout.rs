//! Topic discovery and research brief generation.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::domain::errors::WorkflowResult;
use crate::domain::models::{
    BrandProfile, ExecutionMode, ResearchRequest, ResearchResult, TrendingItem,
};
use crate::domain::ports::{AgentRole, CompletionRequest, LlmClient, TopicResearchProvider};
use crate::services::prompts;
use crate::services::trending::TrendingFetcher;

const BRIEF_MAX_TOKENS: u32 = 2048;
const SELECTION_MAX_TOKENS: u32 = 100;
const SELECTION_TEMPERATURE: f32 = 0.3;

/// Researches a topic with the scout model, discovering one from the
/// trending feed when the caller did not supply it.
pub struct TechScout {
    llm: Arc<dyn LlmClient>,
    trending: TrendingFetcher,
    candidate_limit: usize,
}

impl TechScout {
    pub fn new(llm: Arc<dyn LlmClient>, trending: TrendingFetcher) -> Self {
        Self {
            llm,
            trending,
            candidate_limit: prompts::TOPIC_CANDIDATES,
        }
    }

    #[must_use]
    pub const fn with_candidate_limit(mut self, limit: usize) -> Self {
        self.candidate_limit = limit;
        self
    }

    /// Ask the model to pick one candidate. Returns the topic and its source URL.
    async fn select_topic(
        &self,
        channel: &str,
        profile: &BrandProfile,
        items: &[TrendingItem],
    ) -> WorkflowResult<(String, Option<String>)> {
        if items.is_empty() {
            info!(topic = prompts::DEFAULT_TOPIC, "No trending candidates, using default topic");
            return Ok((prompts::DEFAULT_TOPIC.to_string(), None));
        }

        let request = CompletionRequest::new(
            AgentRole::Scout,
            prompts::topic_selector_system_prompt(channel, profile),
            prompts::topic_selection_message(channel, profile, items),
        )
        .with_temperature(SELECTION_TEMPERATURE)
        .with_max_tokens(SELECTION_MAX_TOKENS);

        let answer = self.llm.complete(request).await?;
        let answer = clean_selection(&answer);
        debug!(answer = %answer, "Topic selector answered");

        let candidates = &items[..items.len().min(prompts::TOPIC_CANDIDATES)];
        if let Some(item) = candidates
            .iter()
            .find(|i| i.title.trim().eq_ignore_ascii_case(&answer))
        {
            return Ok((item.title.clone(), source_url(item)));
        }

        if answer.is_empty() {
            let first = &candidates[0];
            return Ok((first.title.clone(), source_url(first)));
        }

        Ok((answer, None))
    }
}

/// Strip list numbering and quotes a model tends to add around a title.
fn clean_selection(answer: &str) -> String {
    let trimmed = answer.trim();
    let without_number = trimmed
        .split_once(". ")
        .filter(|(n, _)| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
        .map_or(trimmed, |(_, rest)| rest);
    without_number
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim()
        .to_string()
}

fn source_url(item: &TrendingItem) -> Option<String> {
    if !item.url.trim().is_empty() {
        return Some(item.url.clone());
    }
    item.id
        .map(|id| format!("https://news.ycombinator.com/item?id={id}"))
}

#[async_trait]
impl TopicResearchProvider for TechScout {
    #[instrument(skip(self, request), fields(channel = %request.channel, cached_mode = request.cached_mode))]
    async fn discover(&self, request: &ResearchRequest) -> WorkflowResult<ResearchResult> {
        let given = request
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let (topic, sources, mode) = if let Some(topic) = given {
            (topic.to_string(), Vec::new(), ExecutionMode::Live)
        } else {
            let batch = self
                .trending
                .fetch(self.candidate_limit, request.cached_mode)
                .await;
            let (topic, source) = self
                .select_topic(&request.channel, &request.profile, &batch.items)
                .await?;
            info!(topic = %topic, mode = %batch.mode, "Selected topic");
            (topic, source.into_iter().collect(), batch.mode)
        };

        let brief_request = CompletionRequest::new(
            AgentRole::Scout,
            prompts::scout_system_prompt(&request.channel, &request.profile),
            prompts::research_user_message(&request.channel, &request.profile, &topic),
        )
        .with_max_tokens(BRIEF_MAX_TOKENS);

        let brief = self.llm.complete(brief_request).await?;
        info!(topic = %topic, brief_chars = brief.len(), "Research complete");

        Ok(ResearchResult {
            topic,
            brief: brief.trim().to_string(),
            sources,
            mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::llm::mock::MockLlmClient;
    use crate::adapters::mock::MockTrendingSource;
    use crate::domain::errors::WorkflowError;
    use crate::domain::models::Formality;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn profile() -> Arc<BrandProfile> {
        Arc::new(BrandProfile {
            tone: vec!["sarcastic".to_string()],
            formality_level: Formality::Scale(2),
            pacing: "fast".to_string(),
            signature_phrases: vec![],
            avoid: vec![],
            extra: BTreeMap::new(),
        })
    }

    fn request(topic: Option<&str>, cached_mode: bool) -> ResearchRequest {
        ResearchRequest {
            topic: topic.map(str::to_string),
            channel: "fireship".to_string(),
            profile: profile(),
            cached_mode,
        }
    }

    fn scout(llm: Arc<MockLlmClient>, live: MockTrendingSource, cached: MockTrendingSource) -> TechScout {
        let fetcher = TrendingFetcher::new(Arc::new(live), Arc::new(cached))
            .with_deadline(Duration::from_millis(100));
        TechScout::new(llm, fetcher)
    }

    #[test]
    fn test_clean_selection() {
        assert_eq!(clean_selection("  \"Bun 2.0\" \n"), "Bun 2.0");
        assert_eq!(clean_selection("3. Deno ships"), "Deno ships");
        assert_eq!(clean_selection("Node v. Deno"), "Node v. Deno");
    }

    #[tokio::test]
    async fn test_given_topic_skips_discovery() {
        let llm = Arc::new(MockLlmClient::new());
        llm.push_response(AgentRole::Scout, "A brief about WebAssembly.").await;

        let scout = scout(
            Arc::clone(&llm),
            MockTrendingSource::with_items(vec![TrendingItem::new("x", 1, "")]),
            MockTrendingSource::with_items(vec![]),
        );
        let result = scout.discover(&request(Some("WebAssembly"), false)).await.unwrap();

        assert_eq!(result.topic, "WebAssembly");
        assert_eq!(result.mode, ExecutionMode::Live);
        assert!(result.sources.is_empty());
        assert_eq!(llm.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn test_discovers_topic_from_live_feed() {
        let llm = Arc::new(MockLlmClient::new());
        llm.push_response(AgentRole::Scout, "2. \"Rust in the kernel\"").await;
        llm.push_response(AgentRole::Scout, "Brief.").await;

        let live = MockTrendingSource::with_items(vec![
            TrendingItem::new("Bun 2.0", 300, "https://bun.sh"),
            TrendingItem::new("Rust in the Kernel", 250, "https://lwn.net/rust"),
        ]);
        let scout = scout(Arc::clone(&llm), live, MockTrendingSource::with_items(vec![]));
        let result = scout.discover(&request(None, false)).await.unwrap();

        assert_eq!(result.topic, "Rust in the Kernel");
        assert_eq!(result.sources, vec!["https://lwn.net/rust"]);
        assert_eq!(result.mode, ExecutionMode::Live);
    }

    #[tokio::test]
    async fn test_hanging_feed_marks_cached() {
        let llm = Arc::new(MockLlmClient::new());
        llm.push_response(AgentRole::Scout, "Cached story").await;
        llm.push_response(AgentRole::Scout, "Brief.").await;

        let scout = scout(
            Arc::clone(&llm),
            MockTrendingSource::hanging(),
            MockTrendingSource::with_items(vec![TrendingItem::new("Cached story", 1, "")]),
        );
        let result = scout.discover(&request(None, false)).await.unwrap();

        assert_eq!(result.topic, "Cached story");
        assert_eq!(result.mode, ExecutionMode::Cached);
    }

    #[tokio::test]
    async fn test_no_candidates_uses_default_topic() {
        let llm = Arc::new(MockLlmClient::new());
        llm.push_response(AgentRole::Scout, "Brief.").await;

        let scout = scout(
            Arc::clone(&llm),
            MockTrendingSource::failing("down"),
            MockTrendingSource::with_items(vec![]),
        );
        let result = scout.discover(&request(None, false)).await.unwrap();

        assert_eq!(result.topic, prompts::DEFAULT_TOPIC);
        assert_eq!(llm.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn test_llm_failure_is_provider_error() {
        let llm = Arc::new(MockLlmClient::new());
        llm.push_error(AgentRole::Scout, crate::domain::ports::LlmError::RateLimited)
            .await;

        let scout = scout(
            Arc::clone(&llm),
            MockTrendingSource::with_items(vec![]),
            MockTrendingSource::with_items(vec![]),
        );
        let err = scout.discover(&request(Some("Zig"), false)).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Provider(_)));
    }
}
