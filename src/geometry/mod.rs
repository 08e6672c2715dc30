//! Presentation geometry — maps aggregated series into drawable primitives
//! for the embedded dashboard's SVG charts.
//!
//! Pure math, no rendering: the web frontend (and any other consumer)
//! receives finished coordinates and path strings.

pub mod polar;
pub mod stacked;
pub mod treemap;

pub use polar::{PieSlice, RadarChart, RadarPoint, donut_slices, pie_slices, radar_polygon};
pub use stacked::{StackedPoint, StackedSeries, stack_series};
pub use treemap::{TreemapRect, layout};
