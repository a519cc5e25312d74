//! Mathematical utilities for the estimator

/// Standard normal quantile and distribution functions
pub mod normal;
