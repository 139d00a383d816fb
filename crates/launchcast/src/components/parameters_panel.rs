//! Assumption sidebar: one line per editable field.

use crossterm::event::{KeyCode, KeyEvent};
use launchcast_core::ParameterField;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{Component, EventResult};
use crate::state::AppState;
use crate::util::styles::{HELP_COLOR, selected_style, titled_block};

/// Steps applied by the coarse adjustment keys (`<`/`>`)
const COARSE_STEPS: i32 = 10;

pub struct ParametersPanel;

impl ParametersPanel {
    pub fn new() -> Self {
        Self
    }

    fn range_hint(field: ParameterField) -> String {
        match field.range() {
            Some(range) => format!(
                "  range {:.p$} to {:.p$}, step {:.p$}",
                range.min,
                range.max,
                range.step,
                p = range.precision
            ),
            None => "  linear / fast / slow".to_string(),
        }
    }
}

impl Default for ParametersPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ParametersPanel {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => state.select_prev(),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('+') => state.adjust_selected(1),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('-') => state.adjust_selected(-1),
            KeyCode::Char('>') => state.adjust_selected(COARSE_STEPS),
            KeyCode::Char('<') => state.adjust_selected(-COARSE_STEPS),
            KeyCode::Char('r') => state.reset_selected(),
            _ => return EventResult::NotHandled,
        }
        EventResult::Handled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = titled_block("ASSUMPTIONS");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let label_width = inner.width.saturating_sub(12) as usize;
        let selected = state.selected_field();

        let mut lines = Vec::with_capacity(ParameterField::ALL.len() + 2);
        for field in ParameterField::ALL {
            let is_selected = field == selected;
            let prefix = if is_selected { "> " } else { "  " };
            let content = format!(
                "{}{:<width$} {:>8}",
                prefix,
                field.label(),
                field.display(&state.assumptions),
                width = label_width.saturating_sub(2).max(1)
            );
            let style = if is_selected {
                selected_style()
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(content, style)));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            Self::range_hint(selected),
            Style::default().fg(HELP_COLOR),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
