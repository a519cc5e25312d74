//! Error types for sample-size estimation and its input/output surfaces

use std::fmt;
use std::path::PathBuf;

/// Main error type for all sizing operations
#[derive(Debug)]
pub enum SizingError {
    /// A design parameter or effect violated its documented constraint
    ///
    /// This is the only error produced by validation in the estimation core.
    InvalidParameter {
        /// Name of the offending field
        field: &'static str,
        /// Provided value that failed validation
        value: String,
        /// The constraint that was violated
        constraint: String,
    },

    /// Numerical computation produced an unusable result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Failed to save a rendered chart to disk
    ChartExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A design file could not be parsed
    DesignFile {
        /// Path of the design file
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// Report serialization failed
    Serialization {
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

impl fmt::Display for SizingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                field,
                value,
                constraint,
            } => {
                write!(f, "Invalid parameter '{field}' = '{value}': {constraint}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
            Self::ChartExport { path, source } => {
                write!(
                    f,
                    "Failed to export chart to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::DesignFile { path, source } => {
                write!(
                    f,
                    "Failed to parse design file '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { source } => {
                write!(f, "Failed to serialize report: {source}")
            }
        }
    }
}

impl std::error::Error for SizingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ChartExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::DesignFile { source, .. } => Some(source),
            Self::Serialization { source } => Some(source),
            Self::InvalidParameter { .. } | Self::Computation { .. } => None,
        }
    }
}

/// Convenience type alias for sizing results
pub type Result<T> = std::result::Result<T, SizingError>;

impl SizingError {
    /// Name of the offending field when this is a parameter error
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<image::ImageError> for SizingError {
    fn from(err: image::ImageError) -> Self {
        Self::ChartExport {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SizingError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<toml::de::Error> for SizingError {
    fn from(err: toml::de::Error) -> Self {
        Self::DesignFile {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SizingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization { source: err }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    field: &'static str,
    value: &impl ToString,
    constraint: &impl ToString,
) -> SizingError {
    SizingError::InvalidParameter {
        field,
        value: value.to_string(),
        constraint: constraint.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> SizingError {
    SizingError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
