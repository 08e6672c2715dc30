//! Error/warning rates, hourly trend direction, and gauge metrics.

use serde::{Deserialize, Serialize};

use crate::aggregate::timeseries::{self, BucketWidth};
use crate::model::{self, LogRecord};

// ---------------------------------------------------------------------------
// Error rate and trend
// ---------------------------------------------------------------------------

/// Direction of the recent error volume relative to the hours before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Error share of a record set with a short-horizon trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRateSummary {
    pub total: usize,
    pub error_count: usize,
    /// Errors as a percentage of all records; 0 when the set is empty.
    pub rate_pct: f64,
    pub trend: Trend,
}

/// Compute the error rate and trend for a record sequence.
///
/// Errors are the ERROR/FATAL/CRITICAL tiers, case-insensitive. The trend
/// compares the sum of the most recent 3 hourly buckets against the 3
/// preceding them: more than 20% higher reads Up, more than 20% lower reads
/// Down. Fewer than 24 zero-filled hourly buckets (or an empty set) reads
/// Stable.
pub fn error_rate(records: &[LogRecord]) -> ErrorRateSummary {
    let total = records.len();
    let error_count = records
        .iter()
        .filter(|r| model::is_error_level(&r.level()))
        .count();

    let rate_pct = if total == 0 {
        0.0
    } else {
        error_count as f64 / total as f64 * 100.0
    };

    let errors: Vec<LogRecord> = records
        .iter()
        .filter(|r| model::is_error_level(&r.level()))
        .cloned()
        .collect();

    ErrorRateSummary {
        total,
        error_count,
        rate_pct,
        trend: hourly_trend(&errors),
    }
}

/// Trend direction over zero-filled hourly buckets.
fn hourly_trend(records: &[LogRecord]) -> Trend {
    let buckets = timeseries::bucket_counts(records, BucketWidth::Hour);
    if buckets.len() < 24 {
        return Trend::Stable;
    }

    let recent: usize = buckets[buckets.len() - 3..].iter().map(|b| b.count).sum();
    let previous: usize = buckets[buckets.len() - 6..buckets.len() - 3]
        .iter()
        .map(|b| b.count)
        .sum();

    let recent = recent as f64;
    let previous = previous as f64;
    if recent > previous * 1.2 {
        Trend::Up
    } else if recent < previous * 0.8 {
        Trend::Down
    } else {
        Trend::Stable
    }
}

// ---------------------------------------------------------------------------
// Gauges
// ---------------------------------------------------------------------------

/// Three-step color classification for a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeColor {
    Green,
    Yellow,
    Red,
}

/// One named gauge value with its color band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaugeMetric {
    pub name: String,
    pub value: f64,
    pub color: GaugeColor,
}

/// Reference ingest rate the activity gauge is scaled against.
const ACTIVITY_REFERENCE_PER_MIN: f64 = 10.0;

/// Compute the three dashboard gauges: error rate, warning rate, and
/// activity level. Each maps its value to a color band with metric-specific
/// thresholds. Empty input yields three zero-valued green gauges.
pub fn gauge_metrics(records: &[LogRecord]) -> Vec<GaugeMetric> {
    let total = records.len();

    let pct = |count: usize| {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        }
    };

    let error_pct = pct(records
        .iter()
        .filter(|r| model::is_error_level(&r.level()))
        .count());
    let warn_pct = pct(records
        .iter()
        .filter(|r| model::is_warn_level(&r.level()))
        .count());

    vec![
        GaugeMetric {
            name: "error_rate".to_string(),
            value: error_pct,
            color: band(error_pct, 1.0, 5.0),
        },
        GaugeMetric {
            name: "warning_rate".to_string(),
            value: warn_pct,
            color: band(warn_pct, 10.0, 25.0),
        },
        activity_gauge(records),
    ]
}

fn band(value: f64, yellow_at: f64, red_at: f64) -> GaugeColor {
    if value >= red_at {
        GaugeColor::Red
    } else if value >= yellow_at {
        GaugeColor::Yellow
    } else {
        GaugeColor::Green
    }
}

/// Records per minute over the observed span, scaled against the 10/min
/// reference rate and clamped to 100.
fn activity_gauge(records: &[LogRecord]) -> GaugeMetric {
    let stamps: Vec<i64> = records.iter().filter_map(LogRecord::epoch_seconds).collect();

    let value = match (stamps.iter().min(), stamps.iter().max()) {
        (Some(&min), Some(&max)) => {
            let minutes = ((max - min) as f64 / 60.0).max(1.0);
            let per_min = stamps.len() as f64 / minutes;
            (per_min / ACTIVITY_REFERENCE_PER_MIN * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    };

    GaugeMetric {
        name: "activity_level".to_string(),
        value,
        color: band(value, 30.0, 70.0),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(time: &str, level: &str) -> LogRecord {
        serde_json::from_value(json!({
            "_time": time,
            "_msg": "m",
            "level": level,
        }))
        .unwrap()
    }

    fn batch(count: usize, level: &str) -> Vec<LogRecord> {
        (0..count)
            .map(|i| record(&format!("2025-06-01T12:{:02}:00Z", i % 60), level))
            .collect()
    }

    #[test]
    fn rate_arithmetic() {
        // 100 records: 7 ERROR, 2 FATAL, 0 CRITICAL -> 9.0%
        let mut records = batch(91, "INFO");
        records.extend(batch(7, "ERROR"));
        records.extend(batch(2, "FATAL"));

        let summary = error_rate(&records);
        assert_eq!(summary.total, 100);
        assert_eq!(summary.error_count, 9);
        assert!((summary.rate_pct - 9.0).abs() < 0.05);
    }

    #[test]
    fn case_insensitive_tiers() {
        let records = vec![
            record("2025-06-01T12:00:00Z", "error"),
            record("2025-06-01T12:00:01Z", "Critical"),
            record("2025-06-01T12:00:02Z", "info"),
        ];
        let summary = error_rate(&records);
        assert_eq!(summary.error_count, 2);
    }

    #[test]
    fn empty_input_is_zero_and_stable() {
        let summary = error_rate(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.rate_pct, 0.0);
        assert_eq!(summary.trend, Trend::Stable);
    }

    #[test]
    fn short_history_reads_stable() {
        // A couple of hours of errors is under the 24-bucket requirement.
        let records = vec![
            record("2025-06-01T10:00:00Z", "ERROR"),
            record("2025-06-01T12:00:00Z", "ERROR"),
        ];
        assert_eq!(error_rate(&records).trend, Trend::Stable);
    }

    fn hourly_errors(counts: &[usize]) -> Vec<LogRecord> {
        let mut records = Vec::new();
        for (hour, &count) in counts.iter().enumerate() {
            for i in 0..count {
                let day = 1 + hour / 24;
                records.push(record(
                    &format!("2025-06-{:02}T{:02}:{:02}:00Z", day, hour % 24, i % 60),
                    "ERROR",
                ));
            }
        }
        records
    }

    #[test]
    fn trend_up_when_recent_exceeds_by_20pct() {
        // 24 hourly buckets: flat at 5, last three at 10.
        let mut counts = vec![5usize; 21];
        counts.extend([10, 10, 10]);
        let records = hourly_errors(&counts);
        assert_eq!(error_rate(&records).trend, Trend::Up);
    }

    #[test]
    fn trend_down_when_recent_drops_by_20pct() {
        let mut counts = vec![10usize; 21];
        counts.extend([2, 2, 2]);
        let records = hourly_errors(&counts);
        assert_eq!(error_rate(&records).trend, Trend::Down);
    }

    #[test]
    fn trend_stable_within_band() {
        let mut counts = vec![10usize; 21];
        counts.extend([11, 10, 11]);
        let records = hourly_errors(&counts);
        assert_eq!(error_rate(&records).trend, Trend::Stable);
    }

    #[test]
    fn gauges_on_empty_input() {
        let gauges = gauge_metrics(&[]);
        assert_eq!(gauges.len(), 3);
        for gauge in &gauges {
            assert_eq!(gauge.value, 0.0);
            assert_eq!(gauge.color, GaugeColor::Green);
        }
    }

    #[test]
    fn gauge_bands() {
        assert_eq!(band(0.5, 1.0, 5.0), GaugeColor::Green);
        assert_eq!(band(1.0, 1.0, 5.0), GaugeColor::Yellow);
        assert_eq!(band(5.0, 1.0, 5.0), GaugeColor::Red);
    }

    #[test]
    fn activity_scales_against_reference() {
        // 50 records over 10 minutes = 5/min = 50% of the 10/min reference.
        let records: Vec<LogRecord> = (0..50)
            .map(|i| {
                record(
                    &format!("2025-06-01T12:{:02}:{:02}Z", i / 5, (i % 5) * 12),
                    "INFO",
                )
            })
            .collect();
        let gauges = gauge_metrics(&records);
        let activity = gauges
            .iter()
            .find(|g| g.name == "activity_level")
            .unwrap();
        assert!((activity.value - 50.0).abs() < 10.0);
    }
}
