//! Minimum per-group sample size for two-proportion A/B tests
//!
//! Given a baseline conversion rate and a minimum detectable effect, the
//! estimator returns the smallest per-group sample that reaches the target
//! power under a two-proportion z-test, with Bonferroni correction, unequal
//! traffic splits and a delta-method confidence interval. Series of
//! estimates over a range of effects feed the chart and report writers.

#![forbid(unsafe_code)]

/// Test design parameters and effect specifications
pub mod design;
/// Sample-size formula, confidence intervals and power checks
pub mod estimation;
/// Charts, reports, design files, CLI and error handling
pub mod io;
/// Standard normal primitives
pub mod math;

pub use design::{DesignOverrides, EffectSpecification, Tails, TestDesignParameters};
pub use estimation::{
    ConfidenceInterval, SampleSizeEstimator, SampleSizeResult, SeriesPoint, SimulationConfig,
};
pub use io::error::{Result, SizingError};
