use super::{Component, EventResult};
use crate::state::{AppState, StatusKind};
use crate::util::styles::{HELP_COLOR, NEGATIVE_COLOR, POSITIVE_COLOR, WARNING_COLOR};
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const HELP_TEXT: &str = concat!(
    "j/k: field | h/l: adjust | </>: x10 | r/R: reset | ",
    "e: export CSV | s: save | L: log run | q: quit"
);

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    fn content(state: &AppState) -> Line<'_> {
        let Some(status) = &state.status else {
            let help = if state.log_pending {
                format!("Logging run... | {HELP_TEXT}")
            } else {
                HELP_TEXT.to_string()
            };
            return Line::from(Span::styled(help, Style::default().fg(HELP_COLOR)));
        };

        let (label, color) = match status.kind {
            StatusKind::Info => ("", POSITIVE_COLOR),
            StatusKind::Warning => ("Warning: ", WARNING_COLOR),
            StatusKind::Error => ("Error: ", NEGATIVE_COLOR),
        };
        Line::from(vec![
            Span::styled(label, Style::default().fg(color)),
            Span::styled(status.text.as_str(), Style::default().fg(color)),
        ])
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let paragraph =
            Paragraph::new(Self::content(state)).block(Block::default().borders(Borders::TOP));

        frame.render_widget(paragraph, area);
    }
}
