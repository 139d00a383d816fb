//! Year-by-year scenario rollup
//!
//! Turns a set of assumptions into a [`RunRecord`]: risk-adjusted revenue
//! follows the ramp curve, gross and operating profit apply the cost ratios,
//! and the investment is spread evenly over the investment window and
//! charged against the forecast years that fall inside it.

use crate::error::Result;
use crate::model::{RunRecord, ScenarioAssumptions, YearlyResult};
use crate::ramp::RampCurve;

/// Decimal places kept in stored monetary values
pub const MONEY_DECIMALS: i32 = 3;

/// Round to a fixed number of decimal places.
///
/// Rounds the exact binary value rather than `value * 10^decimals`, so a
/// number stored just below a decimal tie (0.0255 is 0.025499...) rounds
/// down. Scaling first can land on the tie and round the wrong way.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let places = decimals.max(0) as usize;
    format!("{value:.places$}").parse().unwrap_or(value)
}

fn round_money(value: f64) -> f64 {
    round_to(value, MONEY_DECIMALS)
}

/// Evaluate one scenario.
///
/// Stored values are rounded to [`MONEY_DECIMALS`] places. The running
/// cumulative total and the break-even test use full precision.
pub fn compute(assumptions: &ScenarioAssumptions) -> Result<RunRecord> {
    assumptions.validate()?;

    let curve = RampCurve::generate(assumptions.ramp_years, assumptions.ramp_shape)?;
    let invest_per_year = assumptions.per_year_investment_billion();

    let mut yearly_results = Vec::with_capacity(curve.len());
    let mut cumulative = 0.0;
    let mut break_even_year = None;

    for (offset, year) in assumptions.forecast_years().enumerate() {
        let factor = curve.factor(offset).unwrap_or(1.0);

        let revenue =
            assumptions.peak_sales_billion * factor * assumptions.probability_of_success;
        let gross_profit = revenue * (1.0 - assumptions.cogs_fraction);
        let operating_profit = gross_profit * (1.0 - assumptions.sga_fraction);
        let investment = if assumptions.is_investment_year(year) {
            invest_per_year
        } else {
            0.0
        };

        cumulative += operating_profit - investment;
        if break_even_year.is_none() && cumulative >= 0.0 {
            break_even_year = Some(year);
        }

        yearly_results.push(YearlyResult {
            year,
            revenue_billion: round_money(revenue),
            gross_profit_billion: round_money(gross_profit),
            operating_profit_billion: round_money(operating_profit),
            investment_billion: round_money(investment),
            cumulative_profit_billion: round_money(cumulative),
        });
    }

    Ok(RunRecord {
        assumptions: *assumptions,
        yearly_results,
        break_even_year,
    })
}
