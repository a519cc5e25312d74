//! Test design parameters and the optional-field configuration they resolve from

use crate::io::configuration::{
    DEFAULT_COMPARISON_COUNT, DEFAULT_POWER, DEFAULT_SIGNIFICANCE_LEVEL, DEFAULT_TRAFFIC_SPLIT,
};
use crate::io::error::{Result, invalid_parameter};
use serde::Deserialize;

/// Sidedness of the hypothesis test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tails {
    /// Reject only for effects in the hypothesised direction
    OneSided,
    /// Reject for effects in either direction
    #[default]
    TwoSided,
}

/// Immutable description of a two-proportion test
///
/// Construct with [`TestDesignParameters::new`] and adjust with the `with_*`
/// methods, each of which returns a new value. Nothing is validated until the
/// design is used, so every constraint is checked on every estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestDesignParameters {
    baseline_rate: f64,
    power: f64,
    significance_level: f64,
    tails: Tails,
    comparison_count: u32,
    traffic_split: f64,
    baseline_observations: Option<u64>,
}

impl TestDesignParameters {
    /// Design with the given baseline rate and documented defaults elsewhere
    pub const fn new(baseline_rate: f64) -> Self {
        Self {
            baseline_rate,
            power: DEFAULT_POWER,
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
            tails: Tails::TwoSided,
            comparison_count: DEFAULT_COMPARISON_COUNT,
            traffic_split: DEFAULT_TRAFFIC_SPLIT,
            baseline_observations: None,
        }
    }

    /// Replace the target power
    pub const fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    /// Replace the significance level
    pub const fn with_significance_level(mut self, significance_level: f64) -> Self {
        self.significance_level = significance_level;
        self
    }

    /// Replace the test sidedness
    pub const fn with_tails(mut self, tails: Tails) -> Self {
        self.tails = tails;
        self
    }

    /// Replace the number of simultaneous comparisons
    pub const fn with_comparison_count(mut self, comparison_count: u32) -> Self {
        self.comparison_count = comparison_count;
        self
    }

    /// Replace the treatment share of traffic
    pub const fn with_traffic_split(mut self, traffic_split: f64) -> Self {
        self.traffic_split = traffic_split;
        self
    }

    /// Record how many observations the baseline rate was measured on
    pub const fn with_baseline_observations(mut self, observations: Option<u64>) -> Self {
        self.baseline_observations = observations;
        self
    }

    /// Control group's expected success rate
    pub const fn baseline_rate(&self) -> f64 {
        self.baseline_rate
    }

    /// Target statistical power
    pub const fn power(&self) -> f64 {
        self.power
    }

    /// Significance level before multiple-comparison correction
    pub const fn significance_level(&self) -> f64 {
        self.significance_level
    }

    /// Test sidedness
    pub const fn tails(&self) -> Tails {
        self.tails
    }

    /// Number of simultaneous comparisons
    pub const fn comparison_count(&self) -> u32 {
        self.comparison_count
    }

    /// Treatment share of traffic
    pub const fn traffic_split(&self) -> f64 {
        self.traffic_split
    }

    /// Size of the sample the baseline rate was measured on, if known
    pub const fn baseline_observations(&self) -> Option<u64> {
        self.baseline_observations
    }

    /// Bonferroni-corrected significance level
    pub fn adjusted_significance_level(&self) -> f64 {
        self.significance_level / f64::from(self.comparison_count)
    }

    /// Check the baseline rate alone
    ///
    /// Effect normalisation needs a valid baseline before the remaining
    /// checks run, so this is exposed separately from [`Self::validate`].
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error unless `0 < baseline_rate < 1`
    pub fn validate_baseline(&self) -> Result<()> {
        check_open_unit("baseline_rate", self.baseline_rate)
    }

    /// Check every design constraint
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error naming the first field that
    /// violates its constraint
    pub fn validate(&self) -> Result<()> {
        self.validate_baseline()?;
        self.validate_remaining()
    }

    /// Check everything except the baseline rate
    pub(crate) fn validate_remaining(&self) -> Result<()> {
        check_open_unit("significance_level", self.significance_level)?;
        check_open_unit("power", self.power)?;
        if self.comparison_count < 1 {
            return Err(invalid_parameter(
                "comparison_count",
                &self.comparison_count,
                &"must be at least 1",
            ));
        }
        check_open_unit("traffic_split", self.traffic_split)?;
        if self.baseline_observations == Some(0) {
            return Err(invalid_parameter(
                "baseline_observations",
                &0,
                &"must be at least 1 when provided",
            ));
        }
        Ok(())
    }
}

// Written as a negated conjunction so NaN fails too
fn check_open_unit(field: &'static str, value: f64) -> Result<()> {
    if !(value > 0.0 && value < 1.0) {
        return Err(invalid_parameter(
            field,
            &value,
            &"must lie strictly between 0 and 1",
        ));
    }
    Ok(())
}

/// Design parameters with every field optional
///
/// Loaded from design files or assembled from command-line flags, then
/// merged and resolved explicitly. Unset fields take the documented defaults
/// at resolution time; there is no global default state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignOverrides {
    /// Control group's expected success rate
    pub baseline_rate: Option<f64>,
    /// Target statistical power
    pub power: Option<f64>,
    /// Significance level before correction
    pub significance_level: Option<f64>,
    /// Test sidedness
    pub tails: Option<Tails>,
    /// Number of simultaneous comparisons
    pub comparison_count: Option<u32>,
    /// Treatment share of traffic
    pub traffic_split: Option<f64>,
    /// Size of the sample the baseline was measured on
    pub baseline_observations: Option<u64>,
}

impl DesignOverrides {
    /// Combine two override sets, preferring fields present in `other`
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            baseline_rate: other.baseline_rate.or(self.baseline_rate),
            power: other.power.or(self.power),
            significance_level: other.significance_level.or(self.significance_level),
            tails: other.tails.or(self.tails),
            comparison_count: other.comparison_count.or(self.comparison_count),
            traffic_split: other.traffic_split.or(self.traffic_split),
            baseline_observations: other.baseline_observations.or(self.baseline_observations),
        }
    }

    /// Fill unset fields with defaults
    ///
    /// Only presence is checked here; value constraints are enforced when
    /// the design is used.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if no baseline rate was supplied
    pub fn resolve(self) -> Result<TestDesignParameters> {
        let baseline_rate = self.baseline_rate.ok_or_else(|| {
            invalid_parameter("baseline_rate", &"<missing>", &"must be provided")
        })?;

        Ok(TestDesignParameters::new(baseline_rate)
            .with_power(self.power.unwrap_or(DEFAULT_POWER))
            .with_significance_level(
                self.significance_level
                    .unwrap_or(DEFAULT_SIGNIFICANCE_LEVEL),
            )
            .with_tails(self.tails.unwrap_or_default())
            .with_comparison_count(self.comparison_count.unwrap_or(DEFAULT_COMPARISON_COUNT))
            .with_traffic_split(self.traffic_split.unwrap_or(DEFAULT_TRAFFIC_SPLIT))
            .with_baseline_observations(self.baseline_observations))
    }
}
