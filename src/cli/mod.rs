//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

/// Print a command error and exit with status 1.
///
/// A [`commands::run::RunFailed`] has already printed its run, so it only
/// sets the exit status in JSON mode.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode && err.downcast_ref::<commands::run::RunFailed>().is_some() {
        std::process::exit(1);
    }
    if json_mode {
        let chain: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let body = serde_json::json!({
            "success": false,
            "error": err.to_string(),
            "causes": chain,
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{} {err:#}", console::style("Error:").red().bold());
    }
    std::process::exit(1);
}
