//! Terminal-aware table utilities.
//!
//! Provides a pre-configured comfy_table that respects terminal width, plus
//! helpers for rendering task cards as table cells.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

/// Widest a task title gets inside a lane cell before being cut
pub const CARD_TITLE_WIDTH: usize = 40;

/// Create a table pre-configured for terminal-width-aware output.
///
/// Uses crossterm to detect the actual terminal width, falling back to
/// 120 columns when not connected to a TTY.
pub fn new_table() -> Table {
    let width = crossterm::terminal::size()
        .map(|(w, _)| w)
        .unwrap_or(120);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(width);
    table
}

/// Truncate a string to `max` characters, appending "..." if truncated.
///
/// Safe for multi-byte (UTF-8) strings.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Render one task as a lane cell: the id in brackets, then the title
pub fn card_cell(id: &str, title: &str) -> String {
    format!("[{}] {}", id, truncate_str(title, CARD_TITLE_WIDTH))
}
