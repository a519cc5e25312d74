//! Command-line interface for computing and charting MDE curves

use crate::design::{DesignOverrides, EffectSpecification, Tails, TestDesignParameters};
use crate::estimation::{SampleSizeEstimator, SimulationConfig};
use crate::io::chart::export_chart;
use crate::io::configuration::{DEFAULT_SEED, MAX_SWEEP_POINTS};
use crate::io::design_file::load_overrides;
use crate::io::error::{Result, invalid_parameter};
use crate::io::report::{ReportFormat, ReportRow, render};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "samplesize")]
#[command(
    author,
    version,
    about = "Minimum per-group sample size for two-proportion A/B tests"
)]
/// Command-line arguments for the sample-size calculator
// Sidedness, effect convention and verbosity are independent switches
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Baseline conversion rate of the control group, e.g. 0.05
    #[arg(short, long)]
    pub baseline: Option<f64>,

    /// Target statistical power [default: 0.8]
    #[arg(short, long)]
    pub power: Option<f64>,

    /// Significance level before correction [default: 0.05]
    #[arg(short, long)]
    pub alpha: Option<f64>,

    /// Use a one-sided test instead of a two-sided one
    #[arg(long)]
    pub one_sided: bool,

    /// Use a two-sided test even when the design file asks for one-sided
    #[arg(long, conflicts_with = "one_sided")]
    pub two_sided: bool,

    /// Number of simultaneous comparisons for Bonferroni correction [default: 1]
    #[arg(short = 'k', long)]
    pub comparisons: Option<u32>,

    /// Share of traffic assigned to the treatment group [default: 0.5]
    #[arg(short, long)]
    pub split: Option<f64>,

    /// Number of observations the baseline rate was measured on
    #[arg(long)]
    pub baseline_observations: Option<u64>,

    /// TOML design file; flags given on the command line take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Effects to size, in percent of baseline (percentage points with --absolute)
    #[arg(
        short,
        long,
        value_delimiter = ',',
        num_args = 1..,
        allow_negative_numbers = true
    )]
    pub mde: Vec<f64>,

    /// Evenly spaced effects from START to END inclusive
    #[arg(
        long,
        num_args = 3,
        value_names = ["START", "END", "STEP"],
        allow_negative_numbers = true
    )]
    pub sweep: Option<Vec<f64>>,

    /// Interpret effects as absolute percentage points
    #[arg(long)]
    pub absolute: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Table)]
    pub format: ReportFormat,

    /// Write a PNG chart of the series to this path
    #[arg(long, value_name = "PNG")]
    pub chart: Option<PathBuf>,

    /// Check each size with this many simulated experiments
    #[arg(long, value_name = "TRIALS")]
    pub simulate: Option<usize>,

    /// Random seed for reproducible simulation
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Log resolved designs and per-point results to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Design parameters given as flags
    pub const fn overrides(&self) -> DesignOverrides {
        DesignOverrides {
            baseline_rate: self.baseline,
            power: self.power,
            significance_level: self.alpha,
            tails: match (self.one_sided, self.two_sided) {
                (true, _) => Some(Tails::OneSided),
                (false, true) => Some(Tails::TwoSided),
                (false, false) => None,
            },
            comparison_count: self.comparisons,
            traffic_split: self.split,
            baseline_observations: self.baseline_observations,
        }
    }

    /// Effects requested through `--mde` and `--sweep`, in that order
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if no effect was requested or the
    /// sweep is malformed
    pub fn effects(&self) -> Result<Vec<EffectSpecification>> {
        let mut percents = self.mde.clone();
        if let Some(sweep) = &self.sweep {
            percents.extend(sweep_values(sweep)?);
        }

        if percents.is_empty() {
            return Err(invalid_parameter(
                "mde",
                &"<missing>",
                &"provide at least one effect with --mde or --sweep",
            ));
        }

        Ok(percents
            .into_iter()
            .map(|percent| {
                let fraction = percent / 100.0;
                if self.absolute {
                    EffectSpecification::Absolute(fraction)
                } else {
                    EffectSpecification::Relative(fraction)
                }
            })
            .collect())
    }

    /// Simulation settings when `--simulate` was given
    pub const fn simulation(&self) -> Option<SimulationConfig> {
        match self.simulate {
            Some(trials) => Some(SimulationConfig {
                trials,
                seed: self.seed,
            }),
            None => None,
        }
    }
}

fn sweep_values(sweep: &[f64]) -> Result<Vec<f64>> {
    let &[start, end, step] = sweep else {
        return Err(invalid_parameter(
            "sweep",
            &format!("{sweep:?}"),
            &"expects START END STEP",
        ));
    };
    if !(start.is_finite() && end.is_finite() && step.is_finite() && step > 0.0) {
        return Err(invalid_parameter(
            "sweep",
            &format!("{start} {end} {step}"),
            &"bounds must be finite and the step positive",
        ));
    }
    if end < start {
        return Err(invalid_parameter(
            "sweep",
            &format!("{start} {end} {step}"),
            &"END must not be below START",
        ));
    }

    // Tolerance keeps END itself when the step divides the range
    let intervals = ((end - start) / step + 1e-9).floor();
    if intervals >= MAX_SWEEP_POINTS as f64 {
        return Err(invalid_parameter(
            "sweep",
            &format!("{start} {end} {step}"),
            &format!("produces more than {MAX_SWEEP_POINTS} points"),
        ));
    }

    let count = intervals as usize + 1;
    Ok((0..count)
        .map(|i| step.mul_add(i as f64, start))
        .collect())
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects debug output.
/// Repeated calls keep the first subscriber.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

/// Resolves a design from flags and files, then sizes, charts and reports it
pub struct SizingRun {
    cli: Cli,
    estimator: SampleSizeEstimator,
}

impl SizingRun {
    /// Create a run for the given arguments
    ///
    /// # Errors
    ///
    /// Returns a computation error if the estimator cannot be built
    pub fn new(cli: Cli) -> Result<Self> {
        Ok(Self {
            cli,
            estimator: SampleSizeEstimator::new()?,
        })
    }

    /// Merge the design file (if any) under the command-line flags
    ///
    /// # Errors
    ///
    /// Returns an error if the design file cannot be read or parsed, or if
    /// no baseline rate was given anywhere
    pub fn design(&self) -> Result<TestDesignParameters> {
        let file_overrides = match &self.cli.config {
            Some(path) => {
                debug!(path = %path.display(), "loading design file");
                load_overrides(path)?
            }
            None => DesignOverrides::default(),
        };

        file_overrides.merge(self.cli.overrides()).resolve()
    }

    /// Compute the series and return the rendered report
    ///
    /// Writes the chart first when one was requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the design or any effect is invalid, the chart
    /// cannot be written, or the report cannot be rendered
    pub fn run(&self) -> Result<String> {
        let design = self.design()?;
        debug!(?design, "resolved test design");

        let effects = self.cli.effects()?;
        let points = self.estimator.series_points(&design, &effects)?;
        let mut rows: Vec<ReportRow> = points.iter().copied().map(ReportRow::from).collect();

        if let Some(config) = self.cli.simulation() {
            for (row, effect) in rows.iter_mut().zip(&effects) {
                let n = row.point.required_n.max(1);
                row.simulated_power =
                    Some(self.estimator.simulate_power(&design, effect, n, &config)?);
            }
        }

        for row in &rows {
            debug!(
                mde = row.point.mde,
                required_n = row.point.required_n,
                ci_lower = row.point.ci_lower,
                ci_upper = row.point.ci_upper,
                simulated_power = row.simulated_power,
                "estimated point"
            );
        }

        if let Some(path) = &self.cli.chart {
            export_chart(&points, path)?;
            info!(path = %path.display(), points = points.len(), "wrote chart");
        }

        render(&rows, self.cli.format)
    }
}
