//! Run-level entry point.
//!
//! Loads the channel's brand profile, then hands a fresh [`RunState`] to the
//! [`WorkflowEngine`]. Profile errors are returned to the caller before any
//! collaborator is invoked; every later failure lives in `RunState::errors`.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::adapters::llm::{OpenAiClient, OpenAiClientConfig};
use crate::adapters::profiles::FileBrandProfileProvider;
use crate::adapters::trending::{CachedTrendingSource, HackerNewsConfig, HackerNewsSource};
use crate::domain::errors::WorkflowResult;
use crate::domain::models::{Config, RunState, ScriptFormat};
use crate::domain::ports::{
    BrandProfileProvider, LlmClient, SemanticEvaluator, TextGenerator, TopicResearchProvider,
};
use crate::services::{BrandVoiceEvaluator, ScriptWriter, TechScout, TrendingFetcher, WorkflowEngine};

/// Caller-supplied parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Discovered from the trending feed when `None`.
    pub topic: Option<String>,
    pub format: ScriptFormat,
    pub channel: String,
    pub cached_mode: bool,
}

impl RunRequest {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            topic: None,
            format: ScriptFormat::default(),
            channel: channel.into(),
            cached_mode: false,
        }
    }

    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    #[must_use]
    pub const fn with_format(mut self, format: ScriptFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub const fn cached(mut self, cached_mode: bool) -> Self {
        self.cached_mode = cached_mode;
        self
    }
}

pub struct Pipeline {
    profiles: Arc<dyn BrandProfileProvider>,
    engine: WorkflowEngine,
}

impl Pipeline {
    pub fn new(profiles: Arc<dyn BrandProfileProvider>, engine: WorkflowEngine) -> Self {
        Self { profiles, engine }
    }

    /// Wire the production collaborators from configuration.
    ///
    /// The OpenAI key is resolved per call, so building a pipeline succeeds
    /// without one.
    pub fn from_config(config: &Config) -> Result<Self> {
        let llm: Arc<dyn LlmClient> = Arc::new(
            OpenAiClient::new(OpenAiClientConfig::from(&config.openai))
                .context("Failed to build OpenAI client")?,
        );

        let research: Arc<dyn TopicResearchProvider> = Arc::new(
            TechScout::new(Arc::clone(&llm), build_trending_fetcher(config)?)
                .with_candidate_limit(config.trending.limit),
        );
        let generator: Arc<dyn TextGenerator> = Arc::new(ScriptWriter::new(Arc::clone(&llm)));
        let evaluator: Arc<dyn SemanticEvaluator> = Arc::new(BrandVoiceEvaluator::new(llm));

        let engine = WorkflowEngine::new(research, generator, evaluator)
            .with_call_timeout(collaborator_timeout(config));

        Ok(Self::new(Arc::new(build_profile_provider(config)), engine))
    }

    pub const fn engine(&self) -> &WorkflowEngine {
        &self.engine
    }

    /// Execute one run to completion.
    ///
    /// Returns `Err` only for `ProfileNotFound` and `ProfileInvalid`.
    #[instrument(skip(self, request), fields(channel = %request.channel, format = %request.format))]
    pub async fn execute(&self, request: RunRequest) -> WorkflowResult<RunState> {
        let profile = match self.profiles.load(&request.channel).await {
            Ok(profile) => Arc::new(profile),
            Err(e) => {
                warn!(error = %e, "Brand profile unavailable, run not started");
                return Err(e);
            }
        };

        let state = RunState::new(
            request.channel,
            request.topic,
            request.format,
            request.cached_mode,
        );
        info!(run_id = %state.run_id, topic = ?state.topic, cached_mode = state.cached_mode, "Starting run");

        Ok(self.engine.run(state, profile).await)
    }
}

/// Live Hacker News feed with the cached list as fallback.
pub fn build_trending_fetcher(config: &Config) -> Result<TrendingFetcher> {
    let live = HackerNewsSource::new(HackerNewsConfig {
        base_url: config.trending.base_url.clone(),
        timeout_secs: config.trending.fetch_timeout_secs,
    })
    .context("Failed to build Hacker News client")?;
    let cached = CachedTrendingSource::new(config.trending.cache_file.clone());

    Ok(TrendingFetcher::new(Arc::new(live), Arc::new(cached))
        .with_deadline(Duration::from_secs(config.trending.fetch_timeout_secs)))
}

pub fn build_profile_provider(config: &Config) -> FileBrandProfileProvider {
    FileBrandProfileProvider::new(config.profiles.dir.clone())
}

/// `0` disables the deadline.
const fn collaborator_timeout(config: &Config) -> Option<Duration> {
    match config.workflow.collaborator_timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    }
}
