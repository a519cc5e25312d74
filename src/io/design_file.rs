//! TOML design files
//!
//! A design file lists any subset of the design parameters:
//!
//! ```toml
//! baseline_rate = 0.05
//! power = 0.9
//! tails = "one-sided"
//! comparison_count = 3
//! ```

use crate::design::DesignOverrides;
use crate::io::error::{Result, SizingError};
use std::path::Path;

/// Parse overrides from TOML text
///
/// # Errors
///
/// Returns a design file error if the text is not valid TOML or names an
/// unknown parameter
pub fn parse_overrides(text: &str) -> Result<DesignOverrides> {
    Ok(toml::from_str(text)?)
}

/// Read overrides from a design file
///
/// # Errors
///
/// Returns a file system error if the file cannot be read, or a design file
/// error if it cannot be parsed
pub fn load_overrides(path: &Path) -> Result<DesignOverrides> {
    let text = std::fs::read_to_string(path).map_err(|e| SizingError::FileSystem {
        path: path.to_path_buf(),
        operation: "read design file",
        source: e,
    })?;

    toml::from_str(&text).map_err(|e| SizingError::DesignFile {
        path: path.to_path_buf(),
        source: e,
    })
}
