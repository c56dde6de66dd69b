//! CLI command definitions and argument parsing.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use colored::Colorize;

use codelens::models::HistoryEntry;

/// Format one history entry as a single listing line.
pub fn history_line(entry: &HistoryEntry) -> String {
    let language = entry.language.as_deref().unwrap_or("-");
    format!(
        "  {}  {}  {:<6}  {:<10}  {}",
        entry.id.to_string().dimmed(),
        entry.created_at.format("%Y-%m-%d %H:%M"),
        entry.persona.to_string().cyan(),
        language,
        entry.title.bold(),
    )
}
