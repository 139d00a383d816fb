//! Adoption ramp curves
//!
//! Every shape is defined by five anchor points sampled at positions
//! 1..=5. Ramps of other lengths are obtained by resampling those anchors
//! at evenly spaced positions with piecewise-linear interpolation, so a
//! three-year ramp compresses the curve and an eight-year ramp stretches it.

use crate::error::{Result, ScenarioError};
use crate::model::{MAX_RAMP_YEARS, MIN_RAMP_YEARS, RampShape};

/// Number of anchor points in every base curve
pub const BASE_POINTS: usize = 5;

const FAST_BASE: [f64; BASE_POINTS] = [0.20, 0.50, 0.80, 0.95, 1.00];
const SLOW_BASE: [f64; BASE_POINTS] = [0.05, 0.20, 0.40, 0.70, 1.00];
const LINEAR_START: f64 = 0.10;
const LINEAR_END: f64 = 1.00;

/// `count` evenly spaced values from `start` to `end` inclusive.
///
/// The last value is pinned to `end` so it is exact regardless of rounding in
/// the step.
fn evenly_spaced(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count == 1 {
        return vec![start];
    }
    let step = (end - start) / (count - 1) as f64;
    let mut values: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
    if let Some(last) = values.last_mut() {
        *last = end;
    }
    values
}

/// The fixed five-point curve for a ramp shape
pub fn base_curve(shape: RampShape) -> [f64; BASE_POINTS] {
    match shape {
        RampShape::Fast => FAST_BASE,
        RampShape::Slow => SLOW_BASE,
        RampShape::Linear => {
            let mut base = [0.0; BASE_POINTS];
            base.copy_from_slice(&evenly_spaced(LINEAR_START, LINEAR_END, BASE_POINTS));
            base
        }
    }
}

/// Piecewise-linear interpolation of `ys` sampled at positions 1, 2, ..., len.
///
/// Positions outside the sampled range clamp to the nearest endpoint.
fn interpolate(ys: &[f64], position: f64) -> f64 {
    let first = 1.0;
    let last = ys.len() as f64;
    if position <= first {
        return ys[0];
    }
    if position >= last {
        return ys[ys.len() - 1];
    }

    let j = (position - first).floor() as usize;
    let x_j = first + j as f64;
    let slope = ys[j + 1] - ys[j];
    slope * (position - x_j) + ys[j]
}

/// Per-year adoption multipliers for a ramp of `years` years.
///
/// Returns exactly `years` values, non-decreasing, ending at 1.0.
pub fn ramp_factors(years: u32, shape: RampShape) -> Result<Vec<f64>> {
    if !(MIN_RAMP_YEARS..=MAX_RAMP_YEARS).contains(&years) {
        return Err(ScenarioError::invalid(
            "ramp_years",
            format!("ramp must be {MIN_RAMP_YEARS} to {MAX_RAMP_YEARS} years, got {years}"),
        ));
    }

    let base = base_curve(shape);
    let n = years as usize;
    if n == BASE_POINTS {
        return Ok(base.to_vec());
    }

    let positions = evenly_spaced(1.0, BASE_POINTS as f64, n);
    Ok(positions.iter().map(|&x| interpolate(&base, x)).collect())
}

/// Immutable ramp curve for one scenario
#[derive(Debug, Clone, PartialEq)]
pub struct RampCurve {
    shape: RampShape,
    factors: Vec<f64>,
}

impl RampCurve {
    pub fn generate(years: u32, shape: RampShape) -> Result<Self> {
        Ok(Self {
            shape,
            factors: ramp_factors(years, shape)?,
        })
    }

    pub fn shape(&self) -> RampShape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Multiplier for the year `offset` years after launch
    pub fn factor(&self, offset: usize) -> Option<f64> {
        self.factors.get(offset).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.factors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_base_curve() {
        let base = base_curve(RampShape::Linear);
        let expected = [0.10, 0.325, 0.55, 0.775, 1.00];
        for (got, want) in base.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
        assert_eq!(base[4], 1.0);
    }

    #[test]
    fn test_interpolate_clamps_outside_range() {
        let ys = [0.2, 0.5, 0.8, 0.95, 1.0];
        assert_eq!(interpolate(&ys, 0.0), 0.2);
        assert_eq!(interpolate(&ys, 7.5), 1.0);
        assert!((interpolate(&ys, 1.5) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_short_ramp_rejected() {
        assert!(ramp_factors(2, RampShape::Fast).is_err());
        assert!(RampCurve::generate(0, RampShape::Slow).is_err());
    }

    #[test]
    fn test_oversized_ramp_rejected() {
        assert_eq!(
            ramp_factors(MAX_RAMP_YEARS, RampShape::Linear).unwrap().len(),
            MAX_RAMP_YEARS as usize
        );
        let err = ramp_factors(2_000_000_000, RampShape::Fast).unwrap_err();
        assert_eq!(err.field(), "ramp_years");
    }
}
