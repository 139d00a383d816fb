//! Product launch forecasting library
//!
//! This crate evaluates a single deterministic launch scenario:
//! - Adoption ramp curves (linear, fast, slow) resampled to any ramp length
//! - Risk-adjusted revenue, gross profit and operating profit per year
//! - Investment spread over a window around launch
//! - Cumulative profit and the break-even year
//! - CSV export of the resulting table
//!
//! # Example
//!
//! ```
//! use launchcast_core::{ScenarioBuilder, compute};
//!
//! let assumptions = ScenarioBuilder::new().build().unwrap();
//! let record = compute(&assumptions).unwrap();
//!
//! assert_eq!(record.yearly_results.len(), 5);
//! assert_eq!(record.break_even_year, Some(2029));
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod export;
pub mod ramp;
pub mod scenario;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{InputBounds, ParameterField, ScenarioBuilder};
pub use error::ScenarioError;
pub use model::{RampShape, RunRecord, ScenarioAssumptions, YearlyResult};
pub use ramp::{RampCurve, ramp_factors};
pub use scenario::compute;
