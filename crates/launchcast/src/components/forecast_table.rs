use crossterm::event::{KeyCode, KeyEvent};
use launchcast_core::export::COLUMNS;
use launchcast_core::{RunRecord, YearlyResult};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::{Component, EventResult};
use crate::state::AppState;
use crate::util::format::{format_billions, format_billions_label};
use crate::util::styles::{
    HEADER_COLOR, NEGATIVE_COLOR, POSITIVE_COLOR, signed_style, titled_block,
};

/// Yearly forecast rows followed by the break-even label
pub struct ForecastTable;

impl ForecastTable {
    pub fn new() -> Self {
        Self
    }

    fn header() -> String {
        format!(
            "{:>6} {:>9} {:>9} {:>9} {:>10} {:>10}",
            COLUMNS[0], "Revenue", "Gross", "Operating", "Investment", "Cumulative"
        )
    }

    fn row_text(row: &YearlyResult) -> String {
        format!(
            "{:>6} {:>9} {:>9} {:>9} {:>10} {:>10}",
            row.year,
            format_billions(row.revenue_billion),
            format_billions(row.gross_profit_billion),
            format_billions(row.operating_profit_billion),
            format_billions(row.investment_billion),
            format_billions(row.cumulative_profit_billion),
        )
    }

    fn render_rows(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = titled_block("FORECAST (B$)");
        let items: Vec<ListItem> = if let Some(record) = &state.record {
            let visible_count = (area.height as usize).saturating_sub(3);

            let mut items = vec![ListItem::new(Line::from(Span::styled(
                Self::header(),
                Style::default()
                    .fg(HEADER_COLOR)
                    .add_modifier(Modifier::BOLD),
            )))];

            for row in record
                .yearly_results
                .iter()
                .skip(state.table_scroll)
                .take(visible_count)
            {
                let style = if record.break_even_year == Some(row.year) {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                items.push(ListItem::new(Line::from(Span::styled(
                    Self::row_text(row),
                    style,
                ))));
            }
            items
        } else {
            vec![ListItem::new(Line::from("No forecast: fix the assumptions"))]
        };

        frame.render_widget(List::new(items).block(block), area);
    }

    fn summary_lines(record: &RunRecord) -> Vec<Line<'static>> {
        let break_even_style = if record.break_even_year.is_some() {
            Style::default()
                .fg(POSITIVE_COLOR)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(NEGATIVE_COLOR)
                .add_modifier(Modifier::BOLD)
        };
        let final_profit = record.final_cumulative_profit();

        vec![
            Line::from(vec![
                Span::raw(" Approx. Break-even Year: "),
                Span::styled(record.break_even_label(), break_even_style),
            ]),
            Line::from(vec![
                Span::raw(" Cumulative profit at horizon: "),
                Span::styled(format_billions_label(final_profit), signed_style(final_profit)),
            ]),
        ]
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let lines = match &state.record {
            Some(record) => Self::summary_lines(record),
            None => vec![Line::from("")],
        };
        let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }
}

impl Default for ForecastTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ForecastTable {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::PageDown => {
                state.scroll_down();
                EventResult::Handled
            }
            KeyCode::PageUp => {
                state.scroll_up();
                EventResult::Handled
            }
            _ => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(4)])
            .split(area);

        self.render_rows(frame, chunks[0], state);
        self.render_summary(frame, chunks[1], state);
    }
}
