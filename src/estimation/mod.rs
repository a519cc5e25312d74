//! Sample-size estimation and power checks

/// Sample-size formula, results and series
pub mod estimator;
/// Confidence interval around an estimate
pub mod interval;
/// Achieved and simulated power
pub mod power;

pub use estimator::{SampleSizeEstimator, SampleSizeResult, SeriesPoint};
pub use interval::ConfidenceInterval;
pub use power::SimulationConfig;
