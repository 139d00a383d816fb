//! Scenario Builder
//!
//! The ScenarioBuilder provides a fluent API for assembling assumptions,
//! starting from the reference defaults and validating on `build`.
//!
//! # Example
//!
//! ```
//! use launchcast_core::config::ScenarioBuilder;
//! use launchcast_core::model::RampShape;
//!
//! let assumptions = ScenarioBuilder::new()
//!     .launch_year(2028)
//!     .ramp_years(6)
//!     .peak_sales(1.2)
//!     .probability_of_success(0.65)
//!     .ramp_shape(RampShape::Fast)
//!     .investment(900.0, 2, 1)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(assumptions.final_year(), 2033);
//! ```

use crate::error::{Result, ScenarioError};
use crate::model::{RampShape, ScenarioAssumptions};

use super::bounds::InputBounds;

/// Builder for [`ScenarioAssumptions`]
#[derive(Debug, Clone, Default)]
pub struct ScenarioBuilder {
    assumptions: ScenarioAssumptions,
    // Deferred until build so chained calls stay infallible
    shape_error: Option<ScenarioError>,
    enforce_bounds: bool,
}

impl ScenarioBuilder {
    /// Create a builder seeded with the default assumptions
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of assumptions
    #[must_use]
    pub fn from_assumptions(assumptions: ScenarioAssumptions) -> Self {
        Self {
            assumptions,
            ..Self::default()
        }
    }

    // =========================================================================
    // Launch and ramp
    // =========================================================================

    #[must_use]
    pub fn launch_year(mut self, year: i32) -> Self {
        self.assumptions.launch_year = year;
        self
    }

    #[must_use]
    pub fn ramp_years(mut self, years: u32) -> Self {
        self.assumptions.ramp_years = years;
        self
    }

    #[must_use]
    pub fn ramp_shape(mut self, shape: RampShape) -> Self {
        self.assumptions.ramp_shape = shape;
        self
    }

    /// Set the ramp shape from its text name; unknown names fail at `build`
    #[must_use]
    pub fn ramp_shape_str(mut self, shape: &str) -> Self {
        match shape.parse() {
            Ok(shape) => self.assumptions.ramp_shape = shape,
            Err(e) => self.shape_error = Some(e),
        }
        self
    }

    // =========================================================================
    // Revenue and costs
    // =========================================================================

    /// Peak annual sales in billions USD
    #[must_use]
    pub fn peak_sales(mut self, billions: f64) -> Self {
        self.assumptions.peak_sales_billion = billions;
        self
    }

    #[must_use]
    pub fn probability_of_success(mut self, pos: f64) -> Self {
        self.assumptions.probability_of_success = pos;
        self
    }

    #[must_use]
    pub fn cogs(mut self, fraction: f64) -> Self {
        self.assumptions.cogs_fraction = fraction;
        self
    }

    #[must_use]
    pub fn sga(mut self, fraction: f64) -> Self {
        self.assumptions.sga_fraction = fraction;
        self
    }

    // =========================================================================
    // Investment
    // =========================================================================

    /// Total investment in millions USD spread over the given years around launch
    #[must_use]
    pub fn investment(
        mut self,
        total_millions: f64,
        prelaunch_years: u32,
        postlaunch_years: u32,
    ) -> Self {
        self.assumptions.total_investment_millions = total_millions;
        self.assumptions.prelaunch_investment_years = prelaunch_years;
        self.assumptions.postlaunch_investment_years = postlaunch_years;
        self
    }

    #[must_use]
    pub fn total_investment(mut self, total_millions: f64) -> Self {
        self.assumptions.total_investment_millions = total_millions;
        self
    }

    #[must_use]
    pub fn prelaunch_years(mut self, years: u32) -> Self {
        self.assumptions.prelaunch_investment_years = years;
        self
    }

    #[must_use]
    pub fn postlaunch_years(mut self, years: u32) -> Self {
        self.assumptions.postlaunch_investment_years = years;
        self
    }

    /// Also require every field to sit inside the user-facing input ranges
    #[must_use]
    pub fn within_input_bounds(mut self) -> Self {
        self.enforce_bounds = true;
        self
    }

    /// Validate and return the assumptions
    pub fn build(self) -> Result<ScenarioAssumptions> {
        if let Some(err) = self.shape_error {
            return Err(err);
        }
        self.assumptions.validate()?;
        if self.enforce_bounds {
            InputBounds::check(&self.assumptions)?;
        }
        Ok(self.assumptions)
    }
}
