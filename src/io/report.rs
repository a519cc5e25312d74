//! Text renderings of an MDE series

use crate::estimation::SeriesPoint;
use crate::io::error::Result;
use serde::Serialize;
use std::fmt::Write;

/// Output format for a rendered series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Aligned columns for terminals
    #[default]
    Table,
    /// Comma-separated values with a header row
    Csv,
    /// Pretty-printed JSON array
    Json,
}

/// A series point with its optional simulated power
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportRow {
    /// The estimated point
    #[serde(flatten)]
    pub point: SeriesPoint,
    /// Simulated power at `required_n`, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulated_power: Option<f64>,
}

impl From<SeriesPoint> for ReportRow {
    fn from(point: SeriesPoint) -> Self {
        Self {
            point,
            simulated_power: None,
        }
    }
}

/// Render rows in the requested format
///
/// # Errors
///
/// Returns a serialization error if JSON encoding fails
pub fn render(rows: &[ReportRow], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Table => Ok(render_table(rows)),
        ReportFormat::Csv => Ok(render_csv(rows)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
    }
}

fn has_simulation(rows: &[ReportRow]) -> bool {
    rows.iter().any(|row| row.simulated_power.is_some())
}

// Writing to a String cannot fail, so the fmt results are discarded
fn render_table(rows: &[ReportRow]) -> String {
    let simulated = has_simulation(rows);
    let mut out = String::new();

    let _ = write!(
        out,
        "{:>10}  {:>12}  {:>12}  {:>12}",
        "mde", "required_n", "ci_lower", "ci_upper"
    );
    if simulated {
        let _ = write!(out, "  {:>9}", "sim_power");
    }
    out.push('\n');

    for row in rows {
        let point = &row.point;
        let _ = write!(
            out,
            "{:>10.4}  {:>12}  {:>12.1}  {:>12.1}",
            point.mde, point.required_n, point.ci_lower, point.ci_upper
        );
        if simulated {
            match row.simulated_power {
                Some(power) => {
                    let _ = write!(out, "  {power:>9.3}");
                }
                None => {
                    let _ = write!(out, "  {:>9}", "-");
                }
            }
        }
        out.push('\n');
    }

    out
}

fn render_csv(rows: &[ReportRow]) -> String {
    let simulated = has_simulation(rows);
    let mut out = String::from("mde,required_n,ci_lower,ci_upper");
    if simulated {
        out.push_str(",simulated_power");
    }
    out.push('\n');

    for row in rows {
        let point = &row.point;
        let _ = write!(
            out,
            "{},{},{},{}",
            point.mde, point.required_n, point.ci_lower, point.ci_upper
        );
        if simulated {
            out.push(',');
            if let Some(power) = row.simulated_power {
                let _ = write!(out, "{power}");
            }
        }
        out.push('\n');
    }

    out
}
