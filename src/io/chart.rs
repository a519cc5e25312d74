//! PNG line chart of required sample size against MDE
//!
//! Draws the required size as a solid line with markers and the confidence
//! bounds as dotted lines, over a zero-based y axis. The estimator never
//! calls into this module; callers hand it a finished series.

use crate::estimation::SeriesPoint;
use crate::io::configuration::{
    CHART_AXIS_COLOR, CHART_BACKGROUND, CHART_DOT_LENGTH, CHART_DOT_PERIOD, CHART_HEADROOM,
    CHART_HEIGHT, CHART_LOWER_COLOR, CHART_MARGIN, CHART_MARKER_RADIUS, CHART_SIZE_COLOR,
    CHART_TICK_COUNT, CHART_TICK_LENGTH, CHART_UPPER_COLOR, CHART_WIDTH,
};
use crate::io::error::{Result, SizingError, invalid_parameter};
use image::{Rgb, RgbImage};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stroke {
    Solid,
    Dotted,
}

/// Maps data coordinates onto the plotting area
#[derive(Debug, Clone, Copy)]
struct Frame {
    x_min: f64,
    x_max: f64,
    y_max: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Frame {
    fn fit(points: &[SeriesPoint]) -> Self {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_max = 0.0_f64;
        for point in points {
            x_min = x_min.min(point.mde);
            x_max = x_max.max(point.mde);
            y_max = y_max.max(point.ci_upper).max(point.required_n as f64);
        }

        // A single effect still needs a non-degenerate x range
        if x_max - x_min <= f64::EPSILON {
            let pad = (x_min.abs() * 0.1).max(0.5);
            x_min -= pad;
            x_max += pad;
        }
        let y_max = if y_max > 0.0 {
            y_max * (1.0 + CHART_HEADROOM)
        } else {
            1.0
        };

        Self {
            x_min,
            x_max,
            y_max,
            left: f64::from(CHART_MARGIN),
            right: f64::from(CHART_WIDTH - CHART_MARGIN),
            top: f64::from(CHART_MARGIN),
            bottom: f64::from(CHART_HEIGHT - CHART_MARGIN),
        }
    }

    fn project(&self, x: f64, y: f64) -> (i64, i64) {
        let px = (x - self.x_min) / (self.x_max - self.x_min)
            * (self.right - self.left)
            + self.left;
        let py = self.bottom - y / self.y_max * (self.bottom - self.top);
        (px.round() as i64, py.round() as i64)
    }
}

/// Render the series as an in-memory RGB image
///
/// # Errors
///
/// Returns an invalid parameter error if the series is empty or contains
/// non-finite values
pub fn render_chart(points: &[SeriesPoint]) -> Result<RgbImage> {
    if points.is_empty() {
        return Err(invalid_parameter(
            "series",
            &0,
            &"must contain at least one point",
        ));
    }
    if let Some(point) = points
        .iter()
        .find(|p| !(p.mde.is_finite() && p.ci_lower.is_finite() && p.ci_upper.is_finite()))
    {
        return Err(invalid_parameter(
            "series",
            &format!("{:?}", point.as_tuple()),
            &"all coordinates must be finite",
        ));
    }

    let frame = Frame::fit(points);
    let mut img = RgbImage::from_pixel(CHART_WIDTH, CHART_HEIGHT, Rgb(CHART_BACKGROUND));

    draw_axes(&mut img, &frame);

    let lower: Vec<_> = points
        .iter()
        .map(|p| frame.project(p.mde, p.ci_lower))
        .collect();
    let upper: Vec<_> = points
        .iter()
        .map(|p| frame.project(p.mde, p.ci_upper))
        .collect();
    let sizes: Vec<_> = points
        .iter()
        .map(|p| frame.project(p.mde, p.required_n as f64))
        .collect();

    draw_polyline(&mut img, &lower, CHART_LOWER_COLOR, Stroke::Dotted);
    draw_polyline(&mut img, &upper, CHART_UPPER_COLOR, Stroke::Dotted);
    draw_polyline(&mut img, &sizes, CHART_SIZE_COLOR, Stroke::Solid);
    for &center in &sizes {
        draw_marker(&mut img, center, CHART_SIZE_COLOR);
    }

    Ok(img)
}

/// Render the series and save it as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - The series is empty or contains non-finite values
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_chart(points: &[SeriesPoint], output_path: &Path) -> Result<()> {
    let img = render_chart(points)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SizingError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| SizingError::ChartExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

fn draw_axes(img: &mut RgbImage, frame: &Frame) {
    let origin = (frame.left as i64, frame.bottom as i64);
    let x_end = (frame.right as i64, frame.bottom as i64);
    let y_end = (frame.left as i64, frame.top as i64);
    let mut step = 0;
    draw_segment(img, origin, x_end, CHART_AXIS_COLOR, Stroke::Solid, &mut step);
    draw_segment(img, origin, y_end, CHART_AXIS_COLOR, Stroke::Solid, &mut step);

    let tick = i64::from(CHART_TICK_LENGTH);
    for i in 0..=CHART_TICK_COUNT {
        let fraction = f64::from(i) / f64::from(CHART_TICK_COUNT);
        let x = (frame.right - frame.left).mul_add(fraction, frame.left) as i64;
        let y = (frame.bottom - frame.top).mul_add(-fraction, frame.bottom) as i64;
        draw_segment(
            img,
            (x, origin.1),
            (x, origin.1 + tick),
            CHART_AXIS_COLOR,
            Stroke::Solid,
            &mut step,
        );
        draw_segment(
            img,
            (origin.0 - tick, y),
            (origin.0, y),
            CHART_AXIS_COLOR,
            Stroke::Solid,
            &mut step,
        );
    }
}

// The dot pattern carries across segments so joints stay evenly spaced
fn draw_polyline(img: &mut RgbImage, vertices: &[(i64, i64)], color: [u8; 3], stroke: Stroke) {
    let mut step = 0;
    match vertices {
        [] => {}
        [only] => draw_segment(img, *only, *only, color, stroke, &mut step),
        _ => {
            for pair in vertices.windows(2) {
                if let [from, to] = pair {
                    draw_segment(img, *from, *to, color, stroke, &mut step);
                }
            }
        }
    }
}

/// Bresenham line between two pixel positions
fn draw_segment(
    img: &mut RgbImage,
    from: (i64, i64),
    to: (i64, i64),
    color: [u8; 3],
    stroke: Stroke,
    step: &mut u32,
) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        match stroke {
            Stroke::Solid => {
                plot(img, x, y, color);
                plot(img, x, y + 1, color);
            }
            Stroke::Dotted => {
                if *step % CHART_DOT_PERIOD < CHART_DOT_LENGTH {
                    plot(img, x, y, color);
                }
            }
        }
        *step = step.wrapping_add(1);

        if x == to.0 && y == to.1 {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            x += sx;
        }
        if doubled <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn draw_marker(img: &mut RgbImage, center: (i64, i64), color: [u8; 3]) {
    for dy in -CHART_MARKER_RADIUS..=CHART_MARKER_RADIUS {
        for dx in -CHART_MARKER_RADIUS..=CHART_MARKER_RADIUS {
            plot(img, center.0 + dx, center.1 + dy, color);
        }
    }
}

// Pixels outside the canvas are dropped
fn plot(img: &mut RgbImage, x: i64, y: i64, color: [u8; 3]) {
    if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
        if let Some(pixel) = img.get_pixel_mut_checked(x, y) {
            *pixel = Rgb(color);
        }
    }
}
