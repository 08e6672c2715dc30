//! Polar-coordinate geometry: pie and donut slices, radar polygons.
//!
//! Angles are measured in degrees, clockwise, with 0° at twelve o'clock —
//! the first pie slice and the first radar axis both start pointing up.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Pie / donut
// ---------------------------------------------------------------------------

/// One renderable pie or donut slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// This slice's share of the total, in [0, 1].
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Closed SVG path for the slice.
    pub path: String,
}

/// Convert `(label, value)` pairs into pie slices on a circle of `radius`
/// centered at `(cx, cy)`.
///
/// Slices appear in input order; the first starts at angle 0. Zero and
/// negative values contribute nothing; an all-zero input yields no slices.
pub fn pie_slices(data: &[(String, f64)], cx: f64, cy: f64, radius: f64) -> Vec<PieSlice> {
    slices(data, cx, cy, radius, None)
}

/// Donut variant: same slices, but each path is an annulus between `radius`
/// and `radius * inner_ratio` (outer arc forward, inner arc backward).
pub fn donut_slices(
    data: &[(String, f64)],
    cx: f64,
    cy: f64,
    radius: f64,
    inner_ratio: f64,
) -> Vec<PieSlice> {
    slices(data, cx, cy, radius, Some(radius * inner_ratio))
}

fn slices(
    data: &[(String, f64)],
    cx: f64,
    cy: f64,
    radius: f64,
    inner_radius: Option<f64>,
) -> Vec<PieSlice> {
    let total: f64 = data.iter().map(|(_, v)| v.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = 0.0;
    data.iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(label, value)| {
            let fraction = value / total;
            let start_angle = angle;
            let end_angle = angle + fraction * 360.0;
            angle = end_angle;

            // A full-circle arc with coincident endpoints renders as
            // nothing; pull the sweep fractionally short.
            let sweep_end = if end_angle - start_angle >= 360.0 {
                start_angle + 359.999
            } else {
                end_angle
            };

            let path = match inner_radius {
                None => wedge_path(cx, cy, radius, start_angle, sweep_end),
                Some(inner) => annulus_path(cx, cy, radius, inner, start_angle, sweep_end),
            };

            PieSlice {
                label: label.clone(),
                value: *value,
                fraction,
                start_angle,
                end_angle,
                path,
            }
        })
        .collect()
}

/// Point on a circle at the given clockwise-from-top angle.
fn polar_point(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    let rad = (angle_deg - 90.0).to_radians();
    (cx + radius * rad.cos(), cy + radius * rad.sin())
}

fn wedge_path(cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> String {
    let (x0, y0) = polar_point(cx, cy, radius, start);
    let (x1, y1) = polar_point(cx, cy, radius, end);
    let large_arc = i32::from(end - start > 180.0);
    format!(
        "M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z"
    )
}

fn annulus_path(cx: f64, cy: f64, outer: f64, inner: f64, start: f64, end: f64) -> String {
    let (ox0, oy0) = polar_point(cx, cy, outer, start);
    let (ox1, oy1) = polar_point(cx, cy, outer, end);
    let (ix0, iy0) = polar_point(cx, cy, inner, start);
    let (ix1, iy1) = polar_point(cx, cy, inner, end);
    let large_arc = i32::from(end - start > 180.0);
    format!(
        "M {ox0:.2} {oy0:.2} \
         A {outer:.2} {outer:.2} 0 {large_arc} 1 {ox1:.2} {oy1:.2} \
         L {ix1:.2} {iy1:.2} \
         A {inner:.2} {inner:.2} 0 {large_arc} 0 {ix0:.2} {iy0:.2} Z"
    )
}

// ---------------------------------------------------------------------------
// Radar
// ---------------------------------------------------------------------------

/// One radar axis point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarPoint {
    pub label: String,
    /// Metric value in [0, 100].
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

/// Radar polygon: per-axis points plus the closed polygon `points` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarChart {
    pub points: Vec<RadarPoint>,
    /// Space-separated `x,y` pairs, usable as an SVG `<polygon points>`.
    pub polygon: String,
}

/// Map a fixed ordered list of 0–100 metrics onto evenly spaced axes.
///
/// Axis `i` sits at `i/count × 2π` offset by −90° so the first axis points
/// up; each metric's point is at `radius × value/100` along its axis.
pub fn radar_polygon(metrics: &[(String, f64)], cx: f64, cy: f64, radius: f64) -> RadarChart {
    let count = metrics.len();
    let points: Vec<RadarPoint> = metrics
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let angle = i as f64 / count as f64 * std::f64::consts::TAU
                - std::f64::consts::FRAC_PI_2;
            let clamped = value.clamp(0.0, 100.0);
            let r = radius * clamped / 100.0;
            RadarPoint {
                label: label.clone(),
                value: clamped,
                x: cx + r * angle.cos(),
                y: cy + r * angle.sin(),
            }
        })
        .collect();

    let polygon = points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ");

    RadarChart { points, polygon }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
