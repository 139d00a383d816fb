//! Remote run logging
//!
//! Completed runs can be appended to a spreadsheet together with the
//! submitter and attribution tags of the invocation. Logging is best effort:
//! callers report failures but never lose the computed forecast.

pub mod context;
pub mod row;
pub mod sheets;
pub mod worker;

pub use context::{Attribution, RunContext};
pub use row::{HEADER, RunLogRow, log_timestamp};
pub use sheets::{ExternalServiceError, RunSink, SheetsClient, SheetsTarget};
pub use worker::{LogResponse, RemoteLogWorker};

use jiff::Timestamp;
use launchcast_core::RunRecord;

use crate::data::config::RemoteLogConfig;

/// Assemble the row for `record`, stamped with `now` in the configured zone
pub fn build_row(
    record: &RunRecord,
    context: &RunContext,
    config: &RemoteLogConfig,
    now: Timestamp,
) -> Result<RunLogRow, ExternalServiceError> {
    let timestamp = log_timestamp(now, &config.timezone)?;
    Ok(RunLogRow::new(record, context, &config.app_id, timestamp))
}

/// Append one run synchronously
pub fn log_run(
    sink: &dyn RunSink,
    record: &RunRecord,
    context: &RunContext,
    config: &RemoteLogConfig,
    now: Timestamp,
) -> Result<(), ExternalServiceError> {
    let row = build_row(record, context, config, now)?;
    sink.append(&row)
}
