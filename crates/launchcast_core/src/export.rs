//! CSV export of a run record

use std::fmt::Write;

use crate::model::{RunRecord, YearlyResult};

/// File name used for downloaded forecast tables
pub const EXPORT_FILE_NAME: &str = "ianalumab_model.csv";

/// Column headers shared by the table view and the CSV export
pub const COLUMNS: [&str; 6] = [
    "Year",
    "Revenue (B$)",
    "Gross Profit (B$)",
    "Operating Profit (B$)",
    "Investment (B$)",
    "Cumulative Profit (B$)",
];

/// Format a float so it always carries a decimal point (`0.0`, `-0.172`)
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn write_row(out: &mut String, row: &YearlyResult) {
    let _ = writeln!(
        out,
        "{},{},{},{},{},{}",
        row.year,
        format_value(row.revenue_billion),
        format_value(row.gross_profit_billion),
        format_value(row.operating_profit_billion),
        format_value(row.investment_billion),
        format_value(row.cumulative_profit_billion),
    );
}

/// Serialize the yearly results as comma-separated text with a header row
pub fn to_csv(record: &RunRecord) -> String {
    let mut out = String::new();
    out.push_str(&COLUMNS.join(","));
    out.push('\n');
    for row in &record.yearly_results {
        write_row(&mut out, row);
    }
    out
}
