//! Color constants and style helpers for consistent TUI theming.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

/// Style for section headers and titles.
pub const HEADER: Style = Style::new()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

/// Style for the row under the cursor.
pub const SELECTED: Style = Style::new()
    .bg(Color::DarkGray)
    .add_modifier(Modifier::BOLD);

/// Style for marked rows.
pub const MARKED: Style = Style::new()
    .fg(Color::LightBlue)
    .add_modifier(Modifier::BOLD);

/// Style for success indicators.
pub const SUCCESS: Style = Style::new().fg(Color::Green);

/// Style for error indicators.
pub const ERROR: Style = Style::new().fg(Color::Red);

/// Style for warning indicators (paused workloads, dangerous keys).
pub const WARNING: Style = Style::new().fg(Color::Yellow);

/// Style for borders and dividers.
pub const BORDER: Style = Style::new().fg(Color::White);

/// Parse a configured colour name, falling back to the terminal default.
pub fn color(name: &str) -> Color {
    Color::from_str(name).unwrap_or(Color::Reset)
}
