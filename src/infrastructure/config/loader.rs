use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::domain::models::ScriptFormat;

/// Directory holding project configuration, relative to the working directory.
pub const CONFIG_DIR: &str = ".scriptforge";

/// Prefix for environment overrides, e.g. `SCRIPTFORGE_TRENDING__LIMIT=5`.
pub const ENV_PREFIX: &str = "SCRIPTFORGE_";

/// Legacy switch for cached mode.
pub const DEMO_MODE_VAR: &str = "DEMO_MODE";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Profiles directory cannot be empty")]
    EmptyProfilesDir,

    #[error("{0} base URL cannot be empty")]
    EmptyBaseUrl(&'static str),

    #[error("Invalid trending limit: {0}. Must be between 1 and 50")]
    InvalidTrendingLimit(usize),

    #[error("Trending fetch timeout must be at least 1 second")]
    InvalidFetchTimeout,

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Default channel cannot be empty")]
    EmptyDefaultChannel,

    #[error("Invalid default format: {0}")]
    InvalidDefaultFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .scriptforge/config.yaml (project config)
    /// 3. .scriptforge/local.yaml (local overrides, optional)
    /// 4. Environment variables (SCRIPTFORGE_* prefix, `__` nests)
    /// 5. DEMO_MODE=true|false, mapped to workflow.cached_mode
    pub fn load() -> Result<Config> {
        Self::load_from_dir(Path::new("."))
    }

    /// Same hierarchy as [`ConfigLoader::load`], rooted at `root` instead of
    /// the working directory.
    pub fn load_from_dir(root: &Path) -> Result<Config> {
        let config_dir = root.join(CONFIG_DIR);
        let mut config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(config_dir.join("config.yaml")))
            .merge(Yaml::file(config_dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        apply_demo_mode(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        if config.profiles.dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyProfilesDir);
        }

        if config.openai.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl("OpenAI"));
        }

        if config.trending.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl("Trending"));
        }

        if !(1..=50).contains(&config.trending.limit) {
            return Err(ConfigError::InvalidTrendingLimit(config.trending.limit));
        }

        if config.trending.fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidFetchTimeout);
        }

        if config.openai.max_retries > 0
            && config.openai.initial_backoff_ms >= config.openai.max_backoff_ms
        {
            return Err(ConfigError::InvalidBackoff(
                config.openai.initial_backoff_ms,
                config.openai.max_backoff_ms,
            ));
        }

        if config.workflow.default_channel.trim().is_empty() {
            return Err(ConfigError::EmptyDefaultChannel);
        }

        if config.workflow.default_format.parse::<ScriptFormat>().is_err() {
            return Err(ConfigError::InvalidDefaultFormat(
                config.workflow.default_format.clone(),
            ));
        }

        Ok(())
    }
}

/// `DEMO_MODE` wins over every other source when it holds a boolean.
fn apply_demo_mode(config: &mut Config) {
    let Ok(raw) = std::env::var(DEMO_MODE_VAR) else {
        return;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => config.workflow.cached_mode = true,
        "false" | "0" | "no" => config.workflow.cached_mode = false,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn project_with(config_yaml: Option<&str>, local_yaml: Option<&str>) -> TempDir {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();
        if let Some(yaml) = config_yaml {
            std::fs::write(config_dir.join("config.yaml"), yaml).unwrap();
        }
        if let Some(yaml) = local_yaml {
            std::fs::write(config_dir.join("local.yaml"), yaml).unwrap();
        }
        dir
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.workflow.default_channel, "fireship");
        assert_eq!(config.workflow.default_format, "100_seconds");
        assert_eq!(config.workflow.collaborator_timeout_secs, 180);
        assert!(!config.workflow.cached_mode);
        assert_eq!(config.trending.fetch_timeout_secs, 5);
        assert_eq!(config.trending.limit, 10);
        assert_eq!(config.profiles.dir, std::path::PathBuf::from("config"));
        assert_eq!(config.openai.models.writer, "gpt-4.1");
        assert_eq!(config.logging.level, "info");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
openai:
  base_url: http://localhost:8080/v1
  models:
    writer: gpt-4o
trending:
  limit: 25
workflow:
  default_channel: veritasium
  default_format: tutorial
  cached_mode: true
logging:
  level: debug
  format: json
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.openai.base_url, "http://localhost:8080/v1");
        assert_eq!(config.openai.models.writer, "gpt-4o");
        assert_eq!(config.openai.models.scout, "gpt-4.1-mini");
        assert_eq!(config.trending.limit, 25);
        assert_eq!(config.trending.fetch_timeout_secs, 5);
        assert_eq!(config.workflow.default_channel, "veritasium");
        assert!(config.workflow.cached_mode);
        assert_eq!(config.logging.format, "json");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidLogFormat(_)
        ));
    }

    #[test]
    fn test_validate_invalid_rotation() {
        let mut config = Config::default();
        config.logging.rotation = "weekly".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidRotation(_)
        ));
    }

    #[test]
    fn test_validate_trending_limit_bounds() {
        let mut config = Config::default();
        config.trending.limit = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidTrendingLimit(0)
        ));

        config.trending.limit = 51;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidTrendingLimit(51)
        ));

        config.trending.limit = 50;
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_fetch_timeout() {
        let mut config = Config::default();
        config.trending.fetch_timeout_secs = 0;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidFetchTimeout
        ));
    }

    #[test]
    fn test_validate_invalid_backoff() {
        let mut config = Config::default();
        config.openai.initial_backoff_ms = 30_000;
        config.openai.max_backoff_ms = 10_000;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidBackoff(30_000, 10_000)
        ));

        config.openai.max_retries = 0;
        assert!(ConfigLoader::validate(&config).is_ok(), "Backoff is unused without retries");
    }

    #[test]
    fn test_validate_empty_values() {
        let mut config = Config::default();
        config.profiles.dir = std::path::PathBuf::new();
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyProfilesDir
        ));

        let mut config = Config::default();
        config.openai.base_url = " ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyBaseUrl("OpenAI")
        ));

        let mut config = Config::default();
        config.workflow.default_channel = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyDefaultChannel
        ));
    }

    #[test]
    fn test_validate_invalid_default_format() {
        let mut config = Config::default();
        config.workflow.default_format = "podcast".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidDefaultFormat(_)
        ));
    }

    #[test]
    fn test_hierarchical_merging() {
        let dir = project_with(
            Some("trending:\n  limit: 5\nlogging:\n  level: info\n  format: json"),
            Some("trending:\n  limit: 15\nlogging:\n  level: debug"),
        );

        let config = temp_env::with_vars_unset(["DEMO_MODE", "SCRIPTFORGE_TRENDING__LIMIT"], || {
            ConfigLoader::load_from_dir(dir.path()).unwrap()
        });

        assert_eq!(config.trending.limit, 15, "Local override should win");
        assert_eq!(config.logging.level, "debug", "Override should win for nested fields");
        assert_eq!(config.logging.format, "json", "Base value should persist when not overridden");
    }

    #[test]
    fn test_env_override() {
        let dir = project_with(Some("trending:\n  limit: 5"), None);

        let config = temp_env::with_vars(
            [
                ("SCRIPTFORGE_TRENDING__LIMIT", Some("20")),
                ("SCRIPTFORGE_WORKFLOW__DEFAULT_CHANNEL", Some("astrum")),
                ("DEMO_MODE", None),
            ],
            || ConfigLoader::load_from_dir(dir.path()).unwrap(),
        );

        assert_eq!(config.trending.limit, 20);
        assert_eq!(config.workflow.default_channel, "astrum");
    }

    #[test]
    fn test_demo_mode_maps_to_cached_mode() {
        let dir = project_with(Some("workflow:\n  cached_mode: false"), None);

        let config = temp_env::with_var("DEMO_MODE", Some("TRUE"), || {
            ConfigLoader::load_from_dir(dir.path()).unwrap()
        });
        assert!(config.workflow.cached_mode);

        let dir = project_with(Some("workflow:\n  cached_mode: true"), None);
        let config = temp_env::with_var("DEMO_MODE", Some("false"), || {
            ConfigLoader::load_from_dir(dir.path()).unwrap()
        });
        assert!(!config.workflow.cached_mode);

        let config = temp_env::with_var("DEMO_MODE", Some("maybe"), || {
            ConfigLoader::load_from_dir(dir.path()).unwrap()
        });
        assert!(config.workflow.cached_mode, "Unrecognised values are ignored");
    }

    #[test]
    fn test_load_from_file_rejects_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "logging:\n  level: loud").unwrap();
        file.flush().unwrap();

        let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_missing_files_use_defaults() {
        let dir = TempDir::new().unwrap();
        let config = temp_env::with_vars_unset(["DEMO_MODE"], || {
            ConfigLoader::load_from_dir(dir.path()).unwrap()
        });
        assert_eq!(config.trending.limit, 10);
    }
}
