//! `scriptforge trending`: the candidates Scout would choose from.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::application::build_trending_fetcher;
use crate::cli::output::progress::{create_spinner_with_message, ProgressBarExt};
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Config, ExecutionMode, TrendingItem};

#[derive(Args, Debug)]
pub struct TrendingArgs {
    /// Number of candidates to fetch (defaults to trending.limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Skip the live feed and show the cached list
    #[arg(long)]
    pub cached: bool,
}

#[derive(Debug, Serialize)]
pub struct TrendingOutput {
    pub mode: ExecutionMode,
    pub total: usize,
    pub items: Vec<TrendingItem>,
}

impl CommandOutput for TrendingOutput {
    fn to_human(&self) -> String {
        if self.items.is_empty() {
            return format!("No trending candidates found ({}).", self.mode);
        }
        TableFormatter::new().format_trending(&self.items, self.mode)
    }
}

pub async fn execute(args: TrendingArgs, config: &Config, json_mode: bool) -> Result<()> {
    let limit = args.limit.unwrap_or(config.trending.limit).clamp(1, 50);
    let cached_mode = args.cached || config.workflow.cached_mode;
    let fetcher = build_trending_fetcher(config)?;

    let spinner = create_spinner_with_message("Fetching trending stories...", json_mode);
    let batch = fetcher.fetch(limit, cached_mode).await;
    match batch.mode {
        ExecutionMode::Live => spinner.finish_success(format!("{} live candidates", batch.items.len())),
        ExecutionMode::Cached => spinner.finish_warning("Using cached candidates"),
    }

    let out = TrendingOutput {
        mode: batch.mode,
        total: batch.items.len(),
        items: batch.items,
    };
    output(&out, json_mode);
    Ok(())
}
