//! Design defaults and runtime configuration constants

// Defaults applied when a design leaves a parameter unset
/// Target statistical power
pub const DEFAULT_POWER: f64 = 0.8;
/// Accepted false-positive rate before correction
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;
/// Number of simultaneous comparisons for Bonferroni correction
pub const DEFAULT_COMPARISON_COUNT: u32 = 1;
/// Share of traffic assigned to the treatment group
pub const DEFAULT_TRAFFIC_SPLIT: f64 = 0.5;

// Simulation settings
/// Fixed seed for reproducible power simulation
pub const DEFAULT_SEED: u64 = 42;
/// Number of simulated experiments per power check
pub const DEFAULT_SIMULATION_TRIALS: usize = 1000;

// Chart layout
/// Chart width in pixels
pub const CHART_WIDTH: u32 = 800;
/// Chart height in pixels
pub const CHART_HEIGHT: u32 = 500;
/// Blank border around the plotting area in pixels
pub const CHART_MARGIN: u32 = 40;
/// Length of axis tick marks in pixels
pub const CHART_TICK_LENGTH: u32 = 5;
/// Number of ticks along each axis
pub const CHART_TICK_COUNT: u32 = 5;
/// Half-width of the square marker drawn at each sample size
pub const CHART_MARKER_RADIUS: i64 = 3;
/// Dotted lines draw this many pixels out of every `CHART_DOT_PERIOD`
pub const CHART_DOT_LENGTH: u32 = 3;
/// Period of the dotted-line pattern in pixels
pub const CHART_DOT_PERIOD: u32 = 7;
/// Headroom above the highest upper bound, as a fraction of the y range
pub const CHART_HEADROOM: f64 = 0.05;

// Chart colours
/// Background colour
pub const CHART_BACKGROUND: [u8; 3] = [255, 255, 255];
/// Axis and tick colour
pub const CHART_AXIS_COLOR: [u8; 3] = [60, 60, 60];
/// Required sample size line colour
pub const CHART_SIZE_COLOR: [u8; 3] = [31, 119, 180];
/// Lower confidence bound colour
pub const CHART_LOWER_COLOR: [u8; 3] = [255, 127, 14];
/// Upper confidence bound colour
pub const CHART_UPPER_COLOR: [u8; 3] = [44, 160, 44];

// Safety limit to keep sweeps from allocating unbounded series
/// Maximum number of effects a single sweep may produce
pub const MAX_SWEEP_POINTS: usize = 10_000;
