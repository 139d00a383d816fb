//! Tests for ramp curve generation
//!
//! These tests verify:
//! - Every valid ramp length yields the right number of factors
//! - Curves are non-decreasing, start above zero and end at exactly 1.0
//! - Five-year ramps return the base curves untouched

use crate::model::RampShape;
use crate::ramp::{RampCurve, base_curve, ramp_factors};

const EPS: f64 = 1e-12;

/// Every ramp length in the input range, for every shape, is well formed
#[test]
fn test_ramp_properties_for_all_lengths() {
    for years in 3..=8 {
        for shape in RampShape::ALL {
            let factors = ramp_factors(years, shape).unwrap();

            assert_eq!(factors.len(), years as usize, "{shape} x {years}");
            assert_eq!(*factors.last().unwrap(), 1.0, "{shape} x {years}");
            assert!(factors[0] > 0.0, "{shape} x {years}");
            assert!(
                factors.iter().all(|f| (0.0..=1.0).contains(f)),
                "{shape} x {years}: {factors:?}"
            );
            assert!(
                factors.windows(2).all(|w| w[1] + EPS >= w[0]),
                "{shape} x {years} not monotonic: {factors:?}"
            );
        }
    }
}

/// Five-year ramps are the hardcoded base curves
#[test]
fn test_five_year_ramp_is_base_curve() {
    assert_eq!(
        ramp_factors(5, RampShape::Fast).unwrap(),
        vec![0.20, 0.50, 0.80, 0.95, 1.00]
    );
    assert_eq!(
        ramp_factors(5, RampShape::Slow).unwrap(),
        vec![0.05, 0.20, 0.40, 0.70, 1.00]
    );
    assert_eq!(
        ramp_factors(5, RampShape::Linear).unwrap(),
        base_curve(RampShape::Linear).to_vec()
    );
}

/// A three-year ramp samples the first, middle and last anchors
#[test]
fn test_compressed_ramp_hits_anchor_points() {
    let fast = ramp_factors(3, RampShape::Fast).unwrap();
    assert!((fast[0] - 0.2).abs() < EPS);
    assert!((fast[1] - 0.8).abs() < EPS);
    assert_eq!(fast[2], 1.0);

    let slow = ramp_factors(3, RampShape::Slow).unwrap();
    assert!((slow[1] - 0.4).abs() < EPS);
}

/// Stretched ramps interpolate between anchors
#[test]
fn test_stretched_ramp_interpolates() {
    // Positions 1.0, 1.8, 2.6, 3.4, 4.2, 5.0
    let fast = ramp_factors(6, RampShape::Fast).unwrap();
    let expected = [0.2, 0.44, 0.68, 0.86, 0.96, 1.0];
    for (got, want) in fast.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }

    let linear = ramp_factors(4, RampShape::Linear).unwrap();
    let expected = [0.1, 0.4, 0.7, 1.0];
    for (got, want) in linear.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }
}

/// RampCurve exposes the same factors as the free function
#[test]
fn test_ramp_curve_wrapper() {
    let curve = RampCurve::generate(7, RampShape::Slow).unwrap();
    assert_eq!(curve.shape(), RampShape::Slow);
    assert_eq!(curve.len(), 7);
    assert_eq!(curve.as_slice(), ramp_factors(7, RampShape::Slow).unwrap());
    assert_eq!(curve.factor(6), Some(1.0));
    assert_eq!(curve.factor(7), None);
}
