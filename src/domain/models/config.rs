use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for scriptforge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// OpenAI-compatible chat completion settings
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Trending candidate feed settings
    #[serde(default)]
    pub trending: TrendingConfig,

    /// Brand profile lookup
    #[serde(default)]
    pub profiles: ProfilesConfig,

    /// Run defaults and collaborator deadlines
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chat completion client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OpenAiConfig {
    /// API key; `OPENAI_API_KEY` is used when unset
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for transient failures (429, 5xx, network)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Model per agent role
    #[serde(default)]
    pub models: RoleModels,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    120
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    1_000
}

const fn default_max_backoff_ms() -> u64 {
    30_000
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            models: RoleModels::default(),
        }
    }
}

impl OpenAiConfig {
    /// Get API key from config or environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }
}

/// Model names used for each agent role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RoleModels {
    #[serde(default = "default_scout_model")]
    pub scout: String,

    #[serde(default = "default_writer_model")]
    pub writer: String,

    #[serde(default = "default_validator_model")]
    pub validator: String,
}

fn default_scout_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_writer_model() -> String {
    "gpt-4.1".to_string()
}

fn default_validator_model() -> String {
    "gpt-4.1-mini".to_string()
}

impl Default for RoleModels {
    fn default() -> Self {
        Self {
            scout: default_scout_model(),
            writer: default_writer_model(),
            validator: default_validator_model(),
        }
    }
}

/// Trending candidate feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrendingConfig {
    /// Hacker News Firebase API root
    #[serde(default = "default_trending_base_url")]
    pub base_url: String,

    /// Wall-clock deadline for the live fetch before falling back
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Number of candidates to fetch (1-50)
    #[serde(default = "default_trending_limit")]
    pub limit: usize,

    /// JSON file holding a cached candidate list
    #[serde(default)]
    pub cache_file: Option<PathBuf>,
}

fn default_trending_base_url() -> String {
    "https://hacker-news.firebaseio.com/v0".to_string()
}

const fn default_fetch_timeout_secs() -> u64 {
    5
}

const fn default_trending_limit() -> usize {
    10
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            base_url: default_trending_base_url(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            limit: default_trending_limit(),
            cache_file: None,
        }
    }
}

/// Brand profile lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProfilesConfig {
    /// Directory holding `<channel>_brand_voice.json` files
    #[serde(default = "default_profiles_dir")]
    pub dir: PathBuf,
}

fn default_profiles_dir() -> PathBuf {
    PathBuf::from("config")
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            dir: default_profiles_dir(),
        }
    }
}

/// Run defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkflowConfig {
    #[serde(default = "default_channel")]
    pub default_channel: String,

    /// One of 100_seconds, code_report, tutorial
    #[serde(default = "default_format")]
    pub default_format: String,

    /// Use cached trending candidates instead of the live feed
    #[serde(default)]
    pub cached_mode: bool,

    /// Deadline for each research, generation and evaluation call (0 disables)
    #[serde(default = "default_collaborator_timeout_secs")]
    pub collaborator_timeout_secs: u64,
}

fn default_channel() -> String {
    "fireship".to_string()
}

fn default_format() -> String {
    "100_seconds".to_string()
}

const fn default_collaborator_timeout_secs() -> u64 {
    180
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            default_channel: default_channel(),
            default_format: default_format(),
            cached_mode: false,
            collaborator_timeout_secs: default_collaborator_timeout_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling JSON log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// File rotation: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
