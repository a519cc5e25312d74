//! Minimum detectable effect in either of its two conventions

use crate::io::error::{Result, invalid_parameter};

/// Effect the test should be able to detect
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectSpecification {
    /// Fractional change from baseline: p2 = p1 × (1 + mde)
    Relative(f64),
    /// Additive change in rate: p2 = p1 + mde
    Absolute(f64),
}

impl EffectSpecification {
    /// Magnitude in the caller's own convention
    pub const fn value(&self) -> f64 {
        match self {
            Self::Relative(value) | Self::Absolute(value) => *value,
        }
    }

    /// Normalise to a relative effect against `baseline_rate`
    ///
    /// The baseline must already be known to lie in (0, 1).
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if the effect is zero, not finite,
    /// or outside (-1, 1) once expressed relative to the baseline
    pub fn to_relative(&self, baseline_rate: f64) -> Result<f64> {
        let (field, relative, constraint) = match *self {
            Self::Relative(mde) => (
                "relative_mde",
                mde,
                "must lie strictly between -1 and 1".to_string(),
            ),
            Self::Absolute(mde) => (
                "absolute_mde",
                mde / baseline_rate,
                format!("must lie strictly between -{baseline_rate} and {baseline_rate}"),
            ),
        };

        if !(relative > -1.0 && relative < 1.0) {
            return Err(invalid_parameter(field, &self.value(), &constraint));
        }
        if relative == 0.0 {
            return Err(invalid_parameter(field, &self.value(), &"must be non-zero"));
        }

        Ok(relative)
    }
}
