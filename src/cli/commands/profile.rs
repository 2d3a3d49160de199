//! Brand profile CLI commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::application::build_profile_provider;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{BrandProfile, Config};
use crate::domain::ports::BrandProfileProvider;

#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Load, validate and print a channel's brand profile
    Show {
        /// Channel name, e.g. fireship
        channel: String,
    },
}

#[derive(Debug, Serialize)]
pub struct ProfileOutput {
    pub channel: String,
    pub path: String,
    pub profile: BrandProfile,
}

impl CommandOutput for ProfileOutput {
    fn to_human(&self) -> String {
        let profile = &self.profile;
        let mut lines = vec![
            format!(
                "Profile: {}",
                console::style(profile.display_name(&self.channel)).bold()
            ),
            format!("Path: {}", self.path),
            format!("Tone: {}", profile.tone.join(", ")),
            format!("Formality: {}", profile.formality_level),
            format!("Pacing: {}", profile.pacing),
        ];

        if let Some(words) = profile.target_sentence_length() {
            lines.push(format!("Target sentence length: {words} words"));
        }

        lines.push(list_section("Signature phrases", &profile.signature_phrases));
        lines.push(list_section("Avoid", &profile.avoid));

        if !profile.extra.is_empty() {
            let keys: Vec<&str> = profile.extra.keys().map(String::as_str).collect();
            lines.push(format!("\nAdditional fields: {}", keys.join(", ")));
        }

        lines.join("\n")
    }
}

fn list_section(title: &str, items: &[String]) -> String {
    if items.is_empty() {
        return format!("\n{title}: (none)");
    }
    let mut section = format!("\n{title}:");
    for item in items {
        section.push_str(&format!("\n  - {item}"));
    }
    section
}

pub async fn execute(args: ProfileArgs, config: &Config, json_mode: bool) -> Result<()> {
    let provider = build_profile_provider(config);

    match args.command {
        ProfileCommands::Show { channel } => {
            let profile = provider
                .load(&channel)
                .await
                .with_context(|| format!("Failed to load brand profile for '{channel}'"))?;

            let out = ProfileOutput {
                path: provider.profile_path(&channel).display().to_string(),
                channel,
                profile,
            };
            output(&out, json_mode);
        }
    }

    Ok(())
}
