//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};

use crate::cli::commands::profile::ProfileArgs;
use crate::cli::commands::run::RunArgs;
use crate::cli::commands::trending::TrendingArgs;

#[derive(Parser, Debug)]
#[command(name = "scriptforge")]
#[command(about = "Scriptforge - brand-voice video script generator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Research, write and validate a script
    Run(RunArgs),

    /// Brand profile commands
    Profile(ProfileArgs),

    /// Show trending topic candidates
    Trending(TrendingArgs),
}
