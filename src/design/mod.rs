//! Test design inputs

/// Effect size specification and normalisation
pub mod effect;
/// Design parameters, defaults and overrides
pub mod parameters;

pub use effect::EffectSpecification;
pub use parameters::{DesignOverrides, Tails, TestDesignParameters};
