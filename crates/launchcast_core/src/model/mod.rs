//! Scenario data model
//!
//! - `assumptions` - input value object and ramp shape
//! - `results` - per-year rows and the run record

mod assumptions;
mod results;

pub use assumptions::{MAX_RAMP_YEARS, MIN_RAMP_YEARS, RampShape, ScenarioAssumptions};
pub use results::{NOT_REACHED, RunRecord, YearlyResult};
