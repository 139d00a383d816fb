//! Input-boundary parameter descriptors
//!
//! Each [`ParameterField`] describes one editable assumption: its label,
//! the range offered to users and the edit step. Front ends use
//! these to render inputs, clamp edits and reject out-of-range values before
//! they reach the calculator.

use crate::error::{Result, ScenarioError};
use crate::model::ScenarioAssumptions;

/// An editable scenario assumption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterField {
    LaunchYear,
    RampYears,
    PeakSales,
    ProbabilityOfSuccess,
    RampShape,
    Cogs,
    Sga,
    PrelaunchYears,
    PostlaunchYears,
    TotalInvestment,
}

/// Numeric range and edit step for a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Decimal places used when displaying the value
    pub precision: usize,
}

impl FieldRange {
    const fn new(min: f64, max: f64, step: f64, precision: usize) -> Self {
        Self {
            min,
            max,
            step,
            precision,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl ParameterField {
    /// All fields in input order
    pub const ALL: [ParameterField; 10] = [
        ParameterField::LaunchYear,
        ParameterField::RampYears,
        ParameterField::PeakSales,
        ParameterField::ProbabilityOfSuccess,
        ParameterField::RampShape,
        ParameterField::Cogs,
        ParameterField::Sga,
        ParameterField::PrelaunchYears,
        ParameterField::PostlaunchYears,
        ParameterField::TotalInvestment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ParameterField::LaunchYear => "Launch Year",
            ParameterField::RampYears => "Ramp Years to Peak",
            ParameterField::PeakSales => "Peak Sales (B$)",
            ParameterField::ProbabilityOfSuccess => "Probability of Success (PoS)",
            ParameterField::RampShape => "Ramp Shape",
            ParameterField::Cogs => "COGS % of Revenue",
            ParameterField::Sga => "SG&A % of Gross Profit",
            ParameterField::PrelaunchYears => "Pre-launch Investment Years",
            ParameterField::PostlaunchYears => "Post-launch Investment Years",
            ParameterField::TotalInvestment => "Total Investment (USD $M)",
        }
    }

    /// Field name as used in scenario files and error messages
    pub fn key(&self) -> &'static str {
        match self {
            ParameterField::LaunchYear => "launch_year",
            ParameterField::RampYears => "ramp_years",
            ParameterField::PeakSales => "peak_sales_billion",
            ParameterField::ProbabilityOfSuccess => "probability_of_success",
            ParameterField::RampShape => "ramp_shape",
            ParameterField::Cogs => "cogs_fraction",
            ParameterField::Sga => "sga_fraction",
            ParameterField::PrelaunchYears => "prelaunch_investment_years",
            ParameterField::PostlaunchYears => "postlaunch_investment_years",
            ParameterField::TotalInvestment => "total_investment_millions",
        }
    }

    /// Numeric range, or `None` for the enumerated ramp shape
    pub fn range(&self) -> Option<FieldRange> {
        let range = match self {
            ParameterField::LaunchYear => FieldRange::new(2025.0, 2035.0, 1.0, 0),
            ParameterField::RampYears => FieldRange::new(3.0, 8.0, 1.0, 0),
            ParameterField::PeakSales => FieldRange::new(0.1, 5.0, 0.01, 3),
            ParameterField::ProbabilityOfSuccess => FieldRange::new(0.3, 1.0, 0.05, 2),
            ParameterField::RampShape => return None,
            ParameterField::Cogs => FieldRange::new(0.05, 0.40, 0.01, 2),
            ParameterField::Sga => FieldRange::new(0.10, 0.50, 0.01, 2),
            ParameterField::PrelaunchYears => FieldRange::new(0.0, 3.0, 1.0, 0),
            ParameterField::PostlaunchYears => FieldRange::new(0.0, 3.0, 1.0, 0),
            ParameterField::TotalInvestment => FieldRange::new(100.0, 2000.0, 10.0, 0),
        };
        Some(range)
    }

    /// Current numeric value of this field, `None` for the ramp shape
    pub fn value(&self, a: &ScenarioAssumptions) -> Option<f64> {
        let value = match self {
            ParameterField::LaunchYear => a.launch_year as f64,
            ParameterField::RampYears => a.ramp_years as f64,
            ParameterField::PeakSales => a.peak_sales_billion,
            ParameterField::ProbabilityOfSuccess => a.probability_of_success,
            ParameterField::RampShape => return None,
            ParameterField::Cogs => a.cogs_fraction,
            ParameterField::Sga => a.sga_fraction,
            ParameterField::PrelaunchYears => a.prelaunch_investment_years as f64,
            ParameterField::PostlaunchYears => a.postlaunch_investment_years as f64,
            ParameterField::TotalInvestment => a.total_investment_millions,
        };
        Some(value)
    }

    /// Display text for the current value
    pub fn display(&self, a: &ScenarioAssumptions) -> String {
        match (self.value(a), self.range()) {
            (Some(value), Some(range)) => format!("{value:.prec$}", prec = range.precision),
            _ => a.ramp_shape.to_string(),
        }
    }

    /// Move the field by `steps` edit steps, clamped to its range.
    ///
    /// The ramp shape cycles through its variants instead.
    pub fn adjust(&self, a: &ScenarioAssumptions, steps: i32) -> ScenarioAssumptions {
        let mut next = *a;
        if let ParameterField::RampShape = self {
            for _ in 0..steps.unsigned_abs() {
                next.ramp_shape = if steps > 0 {
                    next.ramp_shape.next()
                } else {
                    next.ramp_shape.prev()
                };
            }
            return next;
        }

        let (Some(range), Some(current)) = (self.range(), self.value(a)) else {
            return next;
        };
        let raw = current + range.step * steps as f64;
        // Snap to the display precision so repeated steps do not drift
        let scale = 10f64.powi(range.precision as i32);
        let value = range.clamp((raw * scale).round() / scale);
        self.assign(&mut next, value);
        next
    }

    fn assign(&self, a: &mut ScenarioAssumptions, value: f64) {
        match self {
            ParameterField::LaunchYear => a.launch_year = value as i32,
            ParameterField::RampYears => a.ramp_years = value as u32,
            ParameterField::PeakSales => a.peak_sales_billion = value,
            ParameterField::ProbabilityOfSuccess => a.probability_of_success = value,
            ParameterField::RampShape => {}
            ParameterField::Cogs => a.cogs_fraction = value,
            ParameterField::Sga => a.sga_fraction = value,
            ParameterField::PrelaunchYears => a.prelaunch_investment_years = value as u32,
            ParameterField::PostlaunchYears => a.postlaunch_investment_years = value as u32,
            ParameterField::TotalInvestment => a.total_investment_millions = value,
        }
    }
}

/// Input ranges enforced before assumptions reach the calculator
pub struct InputBounds;

impl InputBounds {
    /// Reject assumptions outside the offered input ranges
    pub fn check(a: &ScenarioAssumptions) -> Result<()> {
        for field in ParameterField::ALL {
            let (Some(range), Some(value)) = (field.range(), field.value(a)) else {
                continue;
            };
            if !range.contains(value) {
                return Err(ScenarioError::invalid(
                    field.key(),
                    format!(
                        "{value} is outside the allowed range [{}, {}]",
                        range.min, range.max
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Clamp every numeric field into its range
    pub fn clamp(a: &ScenarioAssumptions) -> ScenarioAssumptions {
        let mut next = *a;
        for field in ParameterField::ALL {
            if let (Some(range), Some(value)) = (field.range(), field.value(a)) {
                field.assign(&mut next, range.clamp(value));
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RampShape;

    #[test]
    fn test_defaults_within_bounds() {
        assert!(InputBounds::check(&ScenarioAssumptions::default()).is_ok());
    }

    #[test]
    fn test_check_names_offending_field() {
        let a = ScenarioAssumptions {
            ramp_years: 9,
            ..Default::default()
        };
        let err = InputBounds::check(&a).unwrap_err();
        assert_eq!(err.field(), "ramp_years");
    }

    #[test]
    fn test_adjust_clamps_and_snaps() {
        let a = ScenarioAssumptions::default();

        let up = ParameterField::ProbabilityOfSuccess.adjust(&a, 1);
        assert!((up.probability_of_success - 0.85).abs() < 1e-12);

        let capped = ParameterField::ProbabilityOfSuccess.adjust(&a, 100);
        assert_eq!(capped.probability_of_success, 1.0);

        let floor = ParameterField::RampYears.adjust(&a, -10);
        assert_eq!(floor.ramp_years, 3);

        let invest = ParameterField::TotalInvestment.adjust(&a, 3);
        assert_eq!(invest.total_investment_millions, 700.0);
    }

    #[test]
    fn test_adjust_cycles_ramp_shape() {
        let a = ScenarioAssumptions::default();
        assert_eq!(ParameterField::RampShape.adjust(&a, 1).ramp_shape, RampShape::Fast);
        assert_eq!(ParameterField::RampShape.adjust(&a, -1).ramp_shape, RampShape::Slow);
        assert_eq!(ParameterField::RampShape.adjust(&a, 3).ramp_shape, RampShape::Linear);
    }

    #[test]
    fn test_clamp_pulls_values_into_range() {
        let a = ScenarioAssumptions {
            launch_year: 2050,
            cogs_fraction: 0.9,
            ..Default::default()
        };
        let clamped = InputBounds::clamp(&a);
        assert_eq!(clamped.launch_year, 2035);
        assert_eq!(clamped.cogs_fraction, 0.40);
        assert!(InputBounds::check(&clamped).is_ok());
    }

    #[test]
    fn test_display_uses_field_precision() {
        let a = ScenarioAssumptions::default();
        assert_eq!(ParameterField::PeakSales.display(&a), "0.638");
        assert_eq!(ParameterField::LaunchYear.display(&a), "2027");
        assert_eq!(ParameterField::RampShape.display(&a), "linear");
    }
}
