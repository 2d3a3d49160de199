//! Table output formatting for CLI commands
//!
//! Trending candidates and score breakdowns rendered with comfy-table.

use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::{ExecutionMode, RunState, TrendingItem};
use crate::services::SCORE_THRESHOLD;

use super::truncate;

const TITLE_WIDTH: usize = 60;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Ranked list of trending candidates.
    pub fn format_trending(&self, items: &[TrendingItem], mode: ExecutionMode) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            header("#"),
            header("Title"),
            header("Score"),
            header("By"),
            header("URL"),
        ]);

        for (rank, item) in items.iter().enumerate() {
            table.add_row(vec![
                Cell::new(rank + 1).set_alignment(CellAlignment::Right),
                Cell::new(truncate(&item.title, TITLE_WIDTH)),
                Cell::new(item.score).set_alignment(CellAlignment::Right),
                Cell::new(item.by.as_deref().unwrap_or("-")),
                Cell::new(if item.url.is_empty() { "-" } else { &item.url }),
            ]);
        }

        let mode_cell = match mode {
            ExecutionMode::Live => "live",
            ExecutionMode::Cached => "cached (fallback list)",
        };
        format!("{table}\nSource: {mode_cell}")
    }

    /// Heuristic, semantic and blended scores of the last validation.
    pub fn format_scores(&self, state: &RunState) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![header("Heuristic"), header("Semantic"), header("Blended")]);

        let blended = state.score.map_or_else(|| Cell::new("-"), |score| {
            let cell = Cell::new(score).add_attribute(Attribute::Bold);
            if !self.use_colors {
                cell
            } else if score >= SCORE_THRESHOLD {
                cell.fg(Color::Green)
            } else {
                cell.fg(Color::Yellow)
            }
        });

        table.add_row(vec![
            optional_cell(state.heuristic_score),
            optional_cell(state.semantic_score),
            blended,
        ]);
        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }
        if !self.use_colors {
            table.force_no_tty();
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn optional_cell(score: Option<u8>) -> Cell {
    score.map_or_else(|| Cell::new("-"), Cell::new)
}

/// Check if color output is supported
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}
