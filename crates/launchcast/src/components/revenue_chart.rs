use crossterm::event::KeyEvent;
use launchcast_core::RunRecord;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
};

use super::{Component, EventResult};
use crate::state::AppState;
use crate::util::format::format_billions;
use crate::util::styles::titled_block;

const REVENUE_COLOR: Color = Color::Cyan;
const PROFIT_COLOR: Color = Color::Green;

/// Revenue and cumulative profit over the forecast years
pub struct RevenueChart;

impl RevenueChart {
    pub fn new() -> Self {
        Self
    }

    /// (revenue, cumulative profit) points keyed by year
    fn series(record: &RunRecord) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
        record
            .yearly_results
            .iter()
            .map(|r| {
                let x = r.year as f64;
                ((x, r.revenue_billion), (x, r.cumulative_profit_billion))
            })
            .unzip()
    }

    /// Y bounds padded by 10% and always including zero
    fn y_bounds(record: &RunRecord) -> [f64; 2] {
        let (lo, hi) = record.chart_bounds();
        let lo = lo.min(0.0);
        let hi = hi.max(0.0);
        let padding = ((hi - lo).abs() * 0.1).max(0.01);
        [lo - padding, hi + padding]
    }
}

impl Default for RevenueChart {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for RevenueChart {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = titled_block("REVENUE VS CUMULATIVE PROFIT");

        let Some(record) = state.record.as_ref().filter(|r| !r.yearly_results.is_empty()) else {
            let paragraph = Paragraph::new(vec![Line::from("  No data to display.")]).block(block);
            frame.render_widget(paragraph, area);
            return;
        };

        let (revenue, cumulative) = Self::series(record);
        let x_min = revenue.first().map_or(0.0, |p| p.0);
        let x_max = revenue.last().map_or(1.0, |p| p.0);
        let [y_min, y_max] = Self::y_bounds(record);

        let datasets = vec![
            Dataset::default()
                .name("Revenue")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(REVENUE_COLOR))
                .data(&revenue),
            Dataset::default()
                .name("Cumulative Profit")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(PROFIT_COLOR))
                .data(&cumulative),
        ];

        let x_labels = vec![
            Span::raw(format!("{:.0}", x_min)),
            Span::raw(format!("{:.0}", (x_min + x_max) / 2.0)),
            Span::raw(format!("{:.0}", x_max)),
        ];
        let y_labels = vec![
            Span::raw(format_billions(y_min)),
            Span::raw(format_billions((y_min + y_max) / 2.0)),
            Span::raw(format_billions(y_max)),
        ];

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title("Year".dark_gray())
                    .bounds([x_min, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title("B$".dark_gray())
                    .bounds([y_min, y_max])
                    .labels(y_labels),
            );

        frame.render_widget(chart, area);
    }
}
