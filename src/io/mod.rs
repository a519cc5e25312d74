//! Input/output surfaces around the estimator

/// PNG chart rendering
pub mod chart;
/// Command-line parsing and run orchestration
pub mod cli;
/// Defaults and rendering constants
pub mod configuration;
/// TOML design files
pub mod design_file;
/// Error types
pub mod error;
/// Table, CSV and JSON reports
pub mod report;
