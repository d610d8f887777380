//! Weighting curves used by the filter.

use std::f64::consts::PI;

/// Contribution floor at the very edge of the range is `EDGE_FLOOR_BASE²`.
const EDGE_FLOOR_BASE: f64 = 0.05;

/// Width of the falloff margin at each end, as a fraction of the range.
const EDGE_MARGIN: f64 = 0.1;

/// Gaussian bell around `mean`.
///
/// With `normalize` the peak is 1; without it the curve is scaled by
/// `deviation * sqrt(2 * PI)`. A zero deviation degenerates to 0 or NaN.
#[inline]
pub fn bell_weight(x: f64, mean: f64, deviation: f64, normalize: bool) -> f64 {
    let scale = deviation * (2.0 * PI).sqrt();
    let offset = x - mean;
    let v = scale * (-((offset * offset) / (2.0 * deviation * deviation))).exp();
    if normalize {
        v / scale
    } else {
        v
    }
}

/// 1 inside the central 80% of `[min, max]`, easing down towards each limit
/// but never below 0.0025 in range. 0 outside the range.
#[inline]
pub fn edge_soft_step(x: f64, min: f64, max: f64) -> f64 {
    if x < min || x > max {
        return 0.0;
    }

    let margin = (max - min) * EDGE_MARGIN;
    let lower = min + margin;
    let upper = max - margin;
    let t = if x < lower {
        (x - min) / (lower - min)
    } else if x > upper {
        1.0 - (x - upper) / (max - upper)
    } else {
        return 1.0;
    };

    let t = EDGE_FLOOR_BASE + t * (1.0 - EDGE_FLOOR_BASE);
    t * t
}

#[cfg(test)]
mod tests {
    use common::float_ext::FloatExt;

    use super::*;

    #[test]
    fn test_bell_peak() {
        assert_eq!(bell_weight(0.3, 0.3, 0.5, true), 1.0);
        assert!(bell_weight(0.0, 0.0, 0.7, false).approximately_eq(0.7 * (2.0 * PI).sqrt()));
    }

    #[test]
    fn test_bell_symmetric_and_decreasing() {
        let left = bell_weight(-1.0, 0.0, 1.0, true);
        let right = bell_weight(1.0, 0.0, 1.0, true);
        assert_eq!(left, right);
        assert!(left.approximately_eq((-0.5f64).exp()));
        assert!(bell_weight(2.0, 0.0, 1.0, true) < right);
    }

    #[test]
    fn test_bell_zero_deviation() {
        assert!(bell_weight(1.0, 0.0, 0.0, true).is_nan());
        assert_eq!(bell_weight(1.0, 0.0, 0.0, false), 0.0);
        assert!(bell_weight(0.0, 0.0, 0.0, true).is_nan());
    }

    #[test]
    fn test_soft_step_outside_range() {
        assert_eq!(edge_soft_step(-0.1, 0.0, 1.0), 0.0);
        assert_eq!(edge_soft_step(1.1, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_soft_step_interior_is_one() {
        assert_eq!(edge_soft_step(0.1, 0.0, 1.0), 1.0);
        assert_eq!(edge_soft_step(0.5, 0.0, 1.0), 1.0);
        assert_eq!(edge_soft_step(0.85, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_soft_step_floor_at_limits() {
        assert!(edge_soft_step(0.0, 0.0, 1.0).approximately_eq(0.0025));
        assert!(edge_soft_step(1.0, 0.0, 1.0).approximately_eq(0.0025));
        assert!(edge_soft_step(2.0, 2.0, 4.0) > 0.0);
    }

    #[test]
    fn test_soft_step_ramp_is_monotonic() {
        let mut previous = 0.0;
        for i in 0..=10 {
            let v = edge_soft_step(i as f64 * 0.01, 0.0, 1.0);
            assert!(v >= previous);
            previous = v;
        }
        assert!(edge_soft_step(0.05, 0.0, 1.0).approximately_eq((0.05f64 + 0.5 * 0.95).powi(2)));
    }

    #[test]
    fn test_soft_step_degenerate_range() {
        assert_eq!(edge_soft_step(3.0, 3.0, 3.0), 1.0);
    }
}
