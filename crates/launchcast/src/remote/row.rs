//! One spreadsheet row per completed run

use jiff::Timestamp;
use launchcast_core::RunRecord;

use super::context::RunContext;
use super::sheets::ExternalServiceError;

/// Column headers, in row order
pub const HEADER: [&str; 18] = [
    "timestamp",
    "app_id",
    "name",
    "profile_url",
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "launch_year",
    "ramp_years",
    "peak_sales_billion",
    "probability_of_success",
    "ramp_shape",
    "cogs_fraction",
    "sga_fraction",
    "prelaunch_investment_years",
    "postlaunch_investment_years",
    "total_investment_millions",
    "break_even_year",
];

/// Format `now` in the given IANA time zone as `YYYY-MM-DD HH:MM:SS`
pub fn log_timestamp(now: Timestamp, timezone: &str) -> Result<String, ExternalServiceError> {
    let zoned = now
        .in_tz(timezone)
        .map_err(|e| ExternalServiceError::Timezone(format!("{timezone}: {e}")))?;
    Ok(zoned.strftime("%Y-%m-%d %H:%M:%S").to_string())
}

/// Cells of a logged run, ready to append
#[derive(Debug, Clone, PartialEq)]
pub struct RunLogRow {
    cells: Vec<String>,
}

impl RunLogRow {
    pub fn new(
        record: &RunRecord,
        context: &RunContext,
        app_id: &str,
        timestamp: String,
    ) -> Self {
        let a = &record.assumptions;
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        let cells = vec![
            timestamp,
            app_id.to_string(),
            text(&context.submitter),
            text(&context.profile_url),
            text(&context.attribution.source),
            text(&context.attribution.medium),
            text(&context.attribution.campaign),
            a.launch_year.to_string(),
            a.ramp_years.to_string(),
            a.peak_sales_billion.to_string(),
            a.probability_of_success.to_string(),
            a.ramp_shape.to_string(),
            a.cogs_fraction.to_string(),
            a.sga_fraction.to_string(),
            a.prelaunch_investment_years.to_string(),
            a.postlaunch_investment_years.to_string(),
            a.total_investment_millions.to_string(),
            record
                .break_even_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
        ];
        Self { cells }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}
