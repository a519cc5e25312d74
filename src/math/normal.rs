//! Standard normal distribution primitives
//!
//! Thin wrapper around [`statrs`] so the estimation code depends on a
//! quantile/CDF pair rather than on a particular distribution library.

use crate::io::error::{Result, computation_error};
use statrs::distribution::{ContinuousCDF, Normal};

/// Standard normal distribution, N(0, 1)
#[derive(Debug, Clone)]
pub struct StandardNormal {
    distribution: Normal,
}

impl StandardNormal {
    /// Build the standard normal distribution
    ///
    /// # Errors
    ///
    /// Returns a computation error if the underlying distribution rejects
    /// the unit parameters
    pub fn new() -> Result<Self> {
        let distribution = Normal::new(0.0, 1.0)
            .map_err(|e| computation_error("standard normal construction", &e))?;
        Ok(Self { distribution })
    }

    /// Inverse cumulative distribution function, Φ⁻¹(p)
    ///
    /// Defined for `0 < p < 1`; callers validate the probability first.
    pub fn quantile(&self, p: f64) -> f64 {
        self.distribution.inverse_cdf(p)
    }

    /// Cumulative distribution function, Φ(x)
    pub fn cdf(&self, x: f64) -> f64 {
        self.distribution.cdf(x)
    }
}
