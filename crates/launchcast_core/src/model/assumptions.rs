//! Scenario input assumptions
//!
//! `ScenarioAssumptions` is the single input value object of the calculator.
//! Structural validation lives here; the narrower input ranges used by the
//! front end live in [`crate::config::bounds`].

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScenarioError};

/// Shape of the adoption ramp from launch to peak sales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RampShape {
    #[default]
    Linear,
    Fast,
    Slow,
}

impl RampShape {
    pub const ALL: [RampShape; 3] = [RampShape::Linear, RampShape::Fast, RampShape::Slow];

    pub fn as_str(&self) -> &'static str {
        match self {
            RampShape::Linear => "linear",
            RampShape::Fast => "fast",
            RampShape::Slow => "slow",
        }
    }

    /// Next shape in display order, wrapping around
    pub fn next(self) -> Self {
        match self {
            RampShape::Linear => RampShape::Fast,
            RampShape::Fast => RampShape::Slow,
            RampShape::Slow => RampShape::Linear,
        }
    }

    /// Previous shape in display order, wrapping around
    pub fn prev(self) -> Self {
        match self {
            RampShape::Linear => RampShape::Slow,
            RampShape::Fast => RampShape::Linear,
            RampShape::Slow => RampShape::Fast,
        }
    }
}

impl fmt::Display for RampShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RampShape {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(RampShape::Linear),
            "fast" => Ok(RampShape::Fast),
            "slow" => Ok(RampShape::Slow),
            other => Err(ScenarioError::invalid(
                "ramp_shape",
                format!("unknown ramp shape '{other}' (expected linear, fast or slow)"),
            )),
        }
    }
}

impl TryFrom<String> for RampShape {
    type Error = ScenarioError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RampShape> for String {
    fn from(shape: RampShape) -> Self {
        shape.as_str().to_string()
    }
}

/// Business assumptions for one product launch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioAssumptions {
    pub launch_year: i32,
    /// Years from launch until peak sales are reached
    pub ramp_years: u32,
    pub peak_sales_billion: f64,
    pub probability_of_success: f64,
    pub ramp_shape: RampShape,
    /// Cost of goods sold as a fraction of revenue
    pub cogs_fraction: f64,
    /// SG&A as a fraction of gross profit
    pub sga_fraction: f64,
    pub prelaunch_investment_years: u32,
    pub postlaunch_investment_years: u32,
    pub total_investment_millions: f64,
}

impl Default for ScenarioAssumptions {
    fn default() -> Self {
        Self {
            launch_year: 2027,
            ramp_years: 5,
            peak_sales_billion: 0.638,
            probability_of_success: 0.80,
            ramp_shape: RampShape::Linear,
            cogs_fraction: 0.15,
            sga_fraction: 0.25,
            prelaunch_investment_years: 2,
            postlaunch_investment_years: 1,
            total_investment_millions: 670.0,
        }
    }
}

/// Smallest ramp the interpolation is defined for
pub const MIN_RAMP_YEARS: u32 = 3;
/// Longest ramp the calculator accepts; one forecast row per ramp year
pub const MAX_RAMP_YEARS: u32 = 100;

impl ScenarioAssumptions {
    /// Check the structural invariants the calculator relies on.
    ///
    /// This is deliberately looser than the input ranges offered to users:
    /// it only rejects values for which the arithmetic is meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_RAMP_YEARS..=MAX_RAMP_YEARS).contains(&self.ramp_years) {
            return Err(ScenarioError::invalid(
                "ramp_years",
                format!(
                    "must be between {MIN_RAMP_YEARS} and {MAX_RAMP_YEARS}, got {}",
                    self.ramp_years
                ),
            ));
        }
        check_positive("peak_sales_billion", self.peak_sales_billion)?;
        check_positive("total_investment_millions", self.total_investment_millions)?;

        let pos = self.probability_of_success;
        if !pos.is_finite() || pos <= 0.0 || pos > 1.0 {
            return Err(ScenarioError::invalid(
                "probability_of_success",
                format!("must be in (0, 1], got {pos}"),
            ));
        }
        check_fraction("cogs_fraction", self.cogs_fraction)?;
        check_fraction("sga_fraction", self.sga_fraction)?;

        let launch = i64::from(self.launch_year);
        let span = i64::from(self.ramp_years.max(self.postlaunch_investment_years));
        let earliest = launch - i64::from(self.prelaunch_investment_years);
        if i32::try_from(launch + span).is_err() || i32::try_from(earliest).is_err() {
            return Err(ScenarioError::invalid(
                "launch_year",
                format!("year range around {} overflows", self.launch_year),
            ));
        }

        Ok(())
    }

    /// Last forecast year (inclusive)
    pub fn final_year(&self) -> i32 {
        self.launch_year + self.ramp_years as i32 - 1
    }

    /// Forecast years, ascending
    pub fn forecast_years(&self) -> RangeInclusive<i32> {
        self.launch_year..=self.final_year()
    }

    /// First investment year (inclusive)
    pub fn first_investment_year(&self) -> i32 {
        self.launch_year - self.prelaunch_investment_years as i32
    }

    /// Number of years the investment is spread over
    pub fn investment_year_count(&self) -> u32 {
        self.prelaunch_investment_years + self.postlaunch_investment_years
    }

    /// Whether `year` falls inside the investment window
    pub fn is_investment_year(&self, year: i32) -> bool {
        let start = self.first_investment_year();
        let end = self.launch_year + self.postlaunch_investment_years as i32;
        year >= start && year < end
    }

    /// Investment charged in each investment year, in billions
    pub fn per_year_investment_billion(&self) -> f64 {
        let divisor = self.investment_year_count().max(1) as f64;
        (self.total_investment_millions / 1000.0) / divisor
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ScenarioError::invalid(
            field,
            format!("must be a positive number, got {value}"),
        ));
    }
    Ok(())
}

fn check_fraction(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..1.0).contains(&value) {
        return Err(ScenarioError::invalid(
            field,
            format!("must be in [0, 1), got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_shape_parse() {
        assert_eq!("linear".parse::<RampShape>(), Ok(RampShape::Linear));
        assert_eq!(" Fast ".parse::<RampShape>(), Ok(RampShape::Fast));
        assert_eq!("SLOW".parse::<RampShape>(), Ok(RampShape::Slow));

        let err = "exponential".parse::<RampShape>().unwrap_err();
        assert_eq!(err.field(), "ramp_shape");
    }

    #[test]
    fn test_ramp_shape_cycle() {
        for shape in RampShape::ALL {
            assert_eq!(shape.next().prev(), shape);
        }
    }

    #[test]
    fn test_investment_window() {
        let a = ScenarioAssumptions::default();
        assert_eq!(a.first_investment_year(), 2025);
        assert!(a.is_investment_year(2025));
        assert!(a.is_investment_year(2027));
        assert!(!a.is_investment_year(2028));
        assert!(!a.is_investment_year(2024));
        assert!((a.per_year_investment_billion() - 0.670 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_investment_window_uses_single_divisor() {
        let a = ScenarioAssumptions {
            prelaunch_investment_years: 0,
            postlaunch_investment_years: 0,
            ..Default::default()
        };
        assert_eq!(a.investment_year_count(), 0);
        assert!(!a.is_investment_year(a.launch_year));
        assert!((a.per_year_investment_billion() - 0.670).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_structural_violations() {
        let base = ScenarioAssumptions::default();
        assert!(base.validate().is_ok());

        let cases = [
            ScenarioAssumptions { ramp_years: 2, ..base },
            ScenarioAssumptions { ramp_years: MAX_RAMP_YEARS + 1, ..base },
            ScenarioAssumptions { peak_sales_billion: 0.0, ..base },
            ScenarioAssumptions { probability_of_success: 0.0, ..base },
            ScenarioAssumptions { probability_of_success: 1.2, ..base },
            ScenarioAssumptions { cogs_fraction: 1.0, ..base },
            ScenarioAssumptions { sga_fraction: -0.1, ..base },
            ScenarioAssumptions { total_investment_millions: f64::NAN, ..base },
        ];
        for case in cases {
            assert!(case.validate().is_err(), "expected rejection: {case:?}");
        }
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let a: ScenarioAssumptions =
            serde_json::from_str(r#"{"ramp_years": 7, "ramp_shape": "Slow"}"#).unwrap();
        assert_eq!(a.ramp_years, 7);
        assert_eq!(a.ramp_shape, RampShape::Slow);
        assert_eq!(a.launch_year, 2027);

        let err = serde_json::from_str::<ScenarioAssumptions>(r#"{"ramp_shape": "bogus"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("ramp_shape"), "{err}");
    }
}
