//! Scenario results
//!
//! Contains the output types of a scenario calculation: one row per
//! forecast year and the finished run record handed to presentation,
//! export and logging.

use serde::{Deserialize, Serialize};

use super::assumptions::ScenarioAssumptions;

/// Label shown when cumulative profit never turns non-negative
pub const NOT_REACHED: &str = "Not reached";

/// Financial rollup for a single forecast year, in billions USD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyResult {
    pub year: i32,
    pub revenue_billion: f64,
    pub gross_profit_billion: f64,
    pub operating_profit_billion: f64,
    pub investment_billion: f64,
    /// Running total of operating profit minus investment
    pub cumulative_profit_billion: f64,
}

/// Complete result of evaluating one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub assumptions: ScenarioAssumptions,
    pub yearly_results: Vec<YearlyResult>,
    pub break_even_year: Option<i32>,
}

impl RunRecord {
    /// Get the row for a specific forecast year
    pub fn row(&self, year: i32) -> Option<&YearlyResult> {
        self.yearly_results.iter().find(|r| r.year == year)
    }

    pub fn first_year(&self) -> Option<i32> {
        self.yearly_results.first().map(|r| r.year)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.yearly_results.last().map(|r| r.year)
    }

    /// Cumulative profit at the end of the forecast window
    pub fn final_cumulative_profit(&self) -> f64 {
        self.yearly_results
            .last()
            .map(|r| r.cumulative_profit_billion)
            .unwrap_or(0.0)
    }

    /// Highest yearly revenue in the forecast window
    pub fn peak_revenue(&self) -> f64 {
        self.yearly_results
            .iter()
            .map(|r| r.revenue_billion)
            .fold(0.0, f64::max)
    }

    /// Sum of investment charged against forecast years
    pub fn total_investment_in_window(&self) -> f64 {
        self.yearly_results.iter().map(|r| r.investment_billion).sum()
    }

    /// Break-even year as display text
    pub fn break_even_label(&self) -> String {
        match self.break_even_year {
            Some(year) => year.to_string(),
            None => NOT_REACHED.to_string(),
        }
    }

    /// Smallest and largest value across the revenue and cumulative profit series
    pub fn chart_bounds(&self) -> (f64, f64) {
        self.yearly_results
            .iter()
            .flat_map(|r| [r.revenue_billion, r.cumulative_profit_billion])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    }
}
