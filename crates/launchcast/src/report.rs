//! Plain-text and JSON rendering of a run for headless output

use launchcast_core::RunRecord;
use launchcast_core::export::COLUMNS;
use serde::Serialize;

use crate::util::format::{format_billions, format_millions, format_percentage};

const YEAR_WIDTH: usize = 6;

fn column_width(header: &str) -> usize {
    header.len().max(12)
}

/// Header and one line per year, right-aligned to the column titles
pub fn render_table(record: &RunRecord) -> String {
    let mut lines = Vec::with_capacity(record.yearly_results.len() + 1);

    let mut header = format!("{:>YEAR_WIDTH$}", COLUMNS[0]);
    for title in &COLUMNS[1..] {
        header.push_str(&format!("  {:>w$}", title, w = column_width(title)));
    }
    lines.push(header);

    for row in &record.yearly_results {
        let values = [
            row.revenue_billion,
            row.gross_profit_billion,
            row.operating_profit_billion,
            row.investment_billion,
            row.cumulative_profit_billion,
        ];
        let mut line = format!("{:>YEAR_WIDTH$}", row.year);
        for (title, value) in COLUMNS[1..].iter().zip(values) {
            line.push_str(&format!(
                "  {:>w$}",
                format_billions(value),
                w = column_width(title)
            ));
        }
        lines.push(line);
    }

    lines.join("\n")
}

pub fn break_even_line(record: &RunRecord) -> String {
    format!("Approx. Break-even Year: {}", record.break_even_label())
}

/// One-line description of the assumptions behind a run
pub fn assumptions_line(record: &RunRecord) -> String {
    let a = &record.assumptions;
    format!(
        "Launch {} | {}-year {} ramp | peak ${}B | PoS {} | investment {} ({} pre, {} post)",
        a.launch_year,
        a.ramp_years,
        a.ramp_shape,
        a.peak_sales_billion,
        format_percentage(a.probability_of_success),
        format_millions(a.total_investment_millions),
        a.prelaunch_investment_years,
        a.postlaunch_investment_years,
    )
}

/// Full text report: assumptions, table and break-even label
pub fn render_report(record: &RunRecord) -> String {
    format!(
        "{}\n\n{}\n\n{}\n",
        assumptions_line(record),
        render_table(record),
        break_even_line(record)
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    record: &'a RunRecord,
    break_even_label: String,
}

/// Pretty JSON with the record plus the break-even label
pub fn render_json(record: &RunRecord) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        record,
        break_even_label: record.break_even_label(),
    })
}
