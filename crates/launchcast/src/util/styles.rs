//! Common styling for TUI components

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

pub const SELECTED_COLOR: Color = Color::Yellow;
pub const HELP_COLOR: Color = Color::DarkGray;
pub const HEADER_COLOR: Color = Color::Cyan;
pub const POSITIVE_COLOR: Color = Color::Green;
pub const NEGATIVE_COLOR: Color = Color::Red;
pub const WARNING_COLOR: Color = Color::Yellow;

/// Bordered block with a padded title
pub fn titled_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
}

pub fn selected_style() -> Style {
    Style::default()
        .fg(SELECTED_COLOR)
        .add_modifier(Modifier::BOLD)
}

/// Green for non-negative amounts, red otherwise
pub fn signed_style(value: f64) -> Style {
    if value < 0.0 {
        Style::default().fg(NEGATIVE_COLOR)
    } else {
        Style::default().fg(POSITIVE_COLOR)
    }
}
