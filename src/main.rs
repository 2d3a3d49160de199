//! Scriptforge CLI entry point.

use anyhow::Context;
use clap::Parser;

use scriptforge::cli::{handle_error, Cli, Commands};
use scriptforge::infrastructure::config::ConfigLoader;
use scriptforge::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(err) => handle_error(err.context("Failed to load configuration"), cli.json),
    };

    // Held until exit so buffered file logs are flushed
    let _logger = match LogConfig::try_from(&config.logging)
        .map_err(anyhow::Error::from)
        .and_then(|log_config| LoggerImpl::init(&log_config))
        .context("Failed to initialize logging")
    {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Run(args) => scriptforge::cli::commands::run::execute(args, &config, cli.json).await,
        Commands::Profile(args) => {
            scriptforge::cli::commands::profile::execute(args, &config, cli.json).await
        }
        Commands::Trending(args) => {
            scriptforge::cli::commands::trending::execute(args, &config, cli.json).await
        }
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
