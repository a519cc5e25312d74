//! Uncertainty band around a required sample size
//!
//! The baseline rate fed into the formula is itself an estimate. Its
//! sampling variance `p1(1 − p1)/m` is propagated through the sample-size
//! formula with the delta method, holding the relative effect fixed:
//!
//! ```text
//! w = z · |dn/dp1| · √(p1(1 − p1)/m)
//! ```
//!
//! `m` is the number of observations behind the baseline when known, and
//! otherwise the required size itself (the baseline as the control arm of
//! the planned test would measure it).

use crate::estimation::estimator::PreparedDesign;
use serde::Serialize;

/// Symmetric interval, clamped below at zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    /// Lower bound, never negative
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Interval `center ± half_width` with the lower bound clamped to zero
    pub fn around(center: u64, half_width: f64) -> Self {
        let center = center as f64;
        let half_width = half_width.abs();
        Self {
            lower: (center - half_width).max(0.0),
            upper: center + half_width,
        }
    }

    /// Whether `value` lies within the bounds
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Distance between the bounds
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Half-width of the delta-method interval for a prepared design
pub(crate) fn delta_method_half_width(
    prepared: &PreparedDesign,
    required_n: u64,
    baseline_observations: Option<u64>,
) -> f64 {
    let observations = baseline_observations.unwrap_or(required_n).max(1) as f64;
    let p1 = prepared.baseline_rate;
    let standard_error = (p1 * (1.0 - p1) / observations).sqrt();

    let half_width = prepared.z_confidence * size_derivative(prepared).abs() * standard_error;
    if half_width.is_finite() { half_width } else { 0.0 }
}

/// dn/dp1 with the relative effect held fixed
///
/// With `p2 = s·p1`, `p̄ = c·p1`, `D = r·p1` and `A` the critical numerator,
/// `n = f·A²/D²` so `dn/dp1 = 2f·A·(A′·D − A·r)/D³`.
fn size_derivative(prepared: &PreparedDesign) -> f64 {
    let p1 = prepared.baseline_rate;
    let p2 = prepared.treatment_rate;
    let r = prepared.relative_mde;
    let s = 1.0 + r;
    let c = (2.0 + r) / 2.0;
    let p_bar = c * p1;

    let null_variance = prepared.null_variance();
    let alt_variance = prepared.alt_variance();
    let d_null = 2.0 * c * 2.0f64.mul_add(-p_bar, 1.0);
    let d_alt = s.mul_add(2.0f64.mul_add(-p2, 1.0), 2.0f64.mul_add(-p1, 1.0));

    let numerator = prepared.critical_numerator();
    let d_numerator = (prepared.z_alpha * d_null / (2.0 * null_variance.sqrt()))
        + (prepared.z_power * d_alt / (2.0 * alt_variance.sqrt()));

    let difference = prepared.difference();
    2.0 * prepared.split_factor() * numerator * d_numerator.mul_add(difference, -numerator * r)
        / difference.powi(3)
}
