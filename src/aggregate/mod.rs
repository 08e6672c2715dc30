//! Aggregation engine — derived views over an in-memory record sequence.
//!
//! Every function here is pure: records plus parameters in, derived series
//! out. Nothing mutates its input and nothing caches — callers re-invoke on
//! every data change and memoize if they care to. Empty input always
//! produces a defined empty/zero result, never a panic or NaN.

pub mod drift;
pub mod frequency;
pub mod grid;
pub mod rates;
pub mod timeseries;

pub use drift::{DriftRecord, DriftSeverity};
pub use frequency::{count_by_field, field_distribution, top_n};
pub use grid::HourOfWeekGrid;
pub use rates::{ErrorRateSummary, GaugeColor, GaugeMetric, Trend};
pub use timeseries::{BucketWidth, TimeBucket};
