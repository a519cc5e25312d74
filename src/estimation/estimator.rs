//! Closed-form per-group sample size for the two-proportion z-test
//!
//! Every estimate validates the whole design before touching the quantile
//! function, then evaluates
//!
//! ```text
//! n = (z_α·√(2·p̄(1−p̄)) + z_β·√(p1(1−p1) + p2(1−p2)))² / (p2 − p1)²
//! ```
//!
//! rescaled for unequal allocation and rounded up.

use crate::design::{EffectSpecification, Tails, TestDesignParameters};
use crate::estimation::interval::{self, ConfidenceInterval};
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::math::normal::StandardNormal;
use serde::Serialize;

/// Computes required sample sizes for two-proportion tests
///
/// Holds no state beyond the normal distribution it evaluates, so one
/// estimator can serve any number of designs and threads.
#[derive(Debug, Clone)]
pub struct SampleSizeEstimator {
    pub(crate) normal: StandardNormal,
}

/// Outcome of a single estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleSizeResult {
    /// Control group's expected success rate
    pub baseline_rate: f64,
    /// Treatment rate implied by the effect
    pub treatment_rate: f64,
    /// Effect expressed relative to the baseline
    pub relative_mde: f64,
    /// Smallest per-group size meeting the power target
    pub required_n: u64,
    /// Uncertainty band around `required_n`
    pub confidence_interval: ConfidenceInterval,
    /// Control arm size at the design's traffic split
    pub control_n: u64,
    /// Treatment arm size at the design's traffic split
    pub treatment_n: u64,
}

impl SampleSizeResult {
    /// Observations needed across both arms
    pub const fn total_n(&self) -> u64 {
        self.control_n + self.treatment_n
    }
}

/// One point of an MDE curve, as handed to charts and reports
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Effect magnitude in the caller's convention
    pub mde: f64,
    /// Required per-group sample size
    pub required_n: u64,
    /// Lower confidence bound
    pub ci_lower: f64,
    /// Upper confidence bound
    pub ci_upper: f64,
}

impl SeriesPoint {
    /// Build a point from an effect and its estimate
    pub const fn new(effect: &EffectSpecification, result: &SampleSizeResult) -> Self {
        Self {
            mde: effect.value(),
            required_n: result.required_n,
            ci_lower: result.confidence_interval.lower,
            ci_upper: result.confidence_interval.upper,
        }
    }

    /// `(mde, required_n, ci_lower, ci_upper)`
    pub const fn as_tuple(&self) -> (f64, u64, f64, f64) {
        (self.mde, self.required_n, self.ci_lower, self.ci_upper)
    }
}

/// Validated inputs with their critical values resolved
#[derive(Debug, Clone, Copy)]
pub(crate) struct PreparedDesign {
    pub(crate) baseline_rate: f64,
    pub(crate) treatment_rate: f64,
    pub(crate) relative_mde: f64,
    pub(crate) z_alpha: f64,
    pub(crate) z_power: f64,
    /// Two-sided critical value at the uncorrected level, for the interval
    pub(crate) z_confidence: f64,
    pub(crate) traffic_split: f64,
    pub(crate) tails: Tails,
}

impl PreparedDesign {
    pub(crate) fn difference(&self) -> f64 {
        self.treatment_rate - self.baseline_rate
    }

    fn pooled_rate(&self) -> f64 {
        (self.baseline_rate + self.treatment_rate) / 2.0
    }

    pub(crate) fn null_variance(&self) -> f64 {
        let p_bar = self.pooled_rate();
        2.0 * p_bar * (1.0 - p_bar)
    }

    pub(crate) fn alt_variance(&self) -> f64 {
        let p1 = self.baseline_rate;
        let p2 = self.treatment_rate;
        p1.mul_add(1.0 - p1, p2 * (1.0 - p2))
    }

    /// Inflation of the per-group size for unequal allocation
    ///
    /// `(1 + k)² / 4k` with `k = (1 − t) / t`, which simplifies to
    /// `1 / 4t(1 − t)`: one at an even split, symmetric in `t ↔ 1 − t`.
    pub(crate) fn split_factor(&self) -> f64 {
        let t = self.traffic_split;
        1.0 / (4.0 * t * (1.0 - t))
    }

    /// `z_α·√null + z_β·√alt`
    pub(crate) fn critical_numerator(&self) -> f64 {
        self.z_alpha
            .mul_add(self.null_variance().sqrt(), self.z_power * self.alt_variance().sqrt())
    }

    pub(crate) fn unrounded_size(&self) -> f64 {
        let numerator = self.critical_numerator();
        numerator * numerator / self.difference().powi(2) * self.split_factor()
    }
}

impl SampleSizeEstimator {
    /// Create an estimator
    ///
    /// # Errors
    ///
    /// Returns a computation error if the normal distribution cannot be built
    pub fn new() -> Result<Self> {
        Ok(Self {
            normal: StandardNormal::new()?,
        })
    }

    /// Required per-group sample size for detecting `effect` under `design`
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error naming the first violated
    /// constraint, or a computation error if the per-group size or either
    /// arm size exceeds `u64`. Under an unequal split the larger arm holds
    /// more than `required_n`, so it can overflow when `required_n` fits.
    pub fn estimate(
        &self,
        design: &TestDesignParameters,
        effect: &EffectSpecification,
    ) -> Result<SampleSizeResult> {
        let prepared = self.prepare(design, effect)?;
        let required_n = round_up(prepared.unrounded_size())?;

        let half_width =
            interval::delta_method_half_width(&prepared, required_n, design.baseline_observations());
        let confidence_interval = ConfidenceInterval::around(required_n, half_width);

        let (control_n, treatment_n) = arm_sizes(required_n, prepared.traffic_split)?;

        Ok(SampleSizeResult {
            baseline_rate: prepared.baseline_rate,
            treatment_rate: prepared.treatment_rate,
            relative_mde: prepared.relative_mde,
            required_n,
            confidence_interval,
            control_n,
            treatment_n,
        })
    }

    /// Estimate each effect in order
    ///
    /// # Errors
    ///
    /// Fails on the first effect that cannot be estimated; no partial
    /// series is returned
    pub fn estimate_series(
        &self,
        design: &TestDesignParameters,
        effects: &[EffectSpecification],
    ) -> Result<Vec<SampleSizeResult>> {
        effects
            .iter()
            .map(|effect| self.estimate(design, effect))
            .collect()
    }

    /// Estimate each effect and project onto chartable points
    ///
    /// # Errors
    ///
    /// Same as [`Self::estimate_series`]
    pub fn series_points(
        &self,
        design: &TestDesignParameters,
        effects: &[EffectSpecification],
    ) -> Result<Vec<SeriesPoint>> {
        let results = self.estimate_series(design, effects)?;
        Ok(effects
            .iter()
            .zip(&results)
            .map(|(effect, result)| SeriesPoint::new(effect, result))
            .collect())
    }

    pub(crate) fn prepare(
        &self,
        design: &TestDesignParameters,
        effect: &EffectSpecification,
    ) -> Result<PreparedDesign> {
        design.validate_baseline()?;
        let relative_mde = effect.to_relative(design.baseline_rate())?;
        design.validate_remaining()?;

        let baseline_rate = design.baseline_rate();
        let treatment_rate = baseline_rate * (1.0 + relative_mde);
        if !(treatment_rate > 0.0 && treatment_rate < 1.0) {
            return Err(invalid_parameter(
                "treatment_rate",
                &treatment_rate,
                &"must lie strictly between 0 and 1",
            ));
        }

        let adjusted_alpha = design.adjusted_significance_level();
        let z_alpha = match design.tails() {
            Tails::TwoSided => self.normal.quantile(1.0 - adjusted_alpha / 2.0),
            Tails::OneSided => self.normal.quantile(1.0 - adjusted_alpha),
        };

        Ok(PreparedDesign {
            baseline_rate,
            treatment_rate,
            relative_mde,
            z_alpha,
            z_power: self.normal.quantile(design.power()),
            z_confidence: self
                .normal
                .quantile(1.0 - design.significance_level() / 2.0),
            traffic_split: design.traffic_split(),
            tails: design.tails(),
        })
    }
}

// Under-powering is the unsafe direction, so never truncate
fn round_up(size: f64) -> Result<u64> {
    let rounded = size.ceil();
    if !rounded.is_finite() || rounded < 0.0 || rounded >= u64::MAX as f64 {
        return Err(computation_error(
            "sample size rounding",
            &format!("{size} does not fit in an observation count"),
        ));
    }
    Ok(rounded as u64)
}

fn arm_sizes(required_n: u64, traffic_split: f64) -> Result<(u64, u64)> {
    let total = 2.0 * required_n as f64;
    let control = round_up(total * (1.0 - traffic_split))?;
    let treatment = round_up(total * traffic_split)?;
    Ok((control, treatment))
}
