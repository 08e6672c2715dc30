//! Period-over-baseline drift: per (service, severity) count comparison
//! with threshold classification.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::schema::DriftConfig;
use crate::model::LogRecord;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Classification tier for one drift row, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftSeverity {
    Normal,
    Warning,
    Critical,
}

impl std::fmt::Display for DriftSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// One (service, severity-level) pair compared across two periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftRecord {
    pub service: String,
    pub level: String,
    pub baseline: usize,
    pub current: usize,
    /// `current - baseline`.
    pub delta: i64,
    /// Percentage change relative to baseline. `None` when the baseline is
    /// zero and the pair newly appeared — there is no meaningful ratio.
    pub pct_change: Option<f64>,
    pub severity: DriftSeverity,
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Compare a baseline period against a current period.
///
/// Counts records per (service, level) in both periods, then emits one row
/// per pair observed in either. Rows are ordered by severity descending,
/// then by service and level for a stable layout.
///
/// Classification uses `|pct_change|` against the configured thresholds.
/// With a zero baseline there is no ratio: a pair at zero in both periods
/// is normal, and a newly-appearing pair is classified by `|delta|` against
/// the same threshold values read as absolute counts.
pub fn compare(
    baseline: &[LogRecord],
    current: &[LogRecord],
    thresholds: &DriftConfig,
) -> Vec<DriftRecord> {
    let baseline_counts = pair_counts(baseline);
    let current_counts = pair_counts(current);

    let keys: BTreeSet<&(String, String)> =
        baseline_counts.keys().chain(current_counts.keys()).collect();

    let mut rows: Vec<DriftRecord> = keys
        .into_iter()
        .map(|key| {
            let base = baseline_counts.get(key).copied().unwrap_or(0);
            let cur = current_counts.get(key).copied().unwrap_or(0);
            classify_pair(key.0.clone(), key.1.clone(), base, cur, thresholds)
        })
        .collect();

    rows.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.service.cmp(&b.service))
            .then_with(|| a.level.cmp(&b.level))
    });
    rows
}

fn pair_counts(records: &[LogRecord]) -> BTreeMap<(String, String), usize> {
    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();
    for record in records {
        *counts
            .entry((record.service(), record.level()))
            .or_default() += 1;
    }
    counts
}

fn classify_pair(
    service: String,
    level: String,
    baseline: usize,
    current: usize,
    thresholds: &DriftConfig,
) -> DriftRecord {
    let delta = current as i64 - baseline as i64;

    let (pct_change, severity) = if baseline == 0 {
        if current == 0 {
            (Some(0.0), DriftSeverity::Normal)
        } else {
            // Newly appearing pair: no ratio exists, fall back to the
            // absolute delta against the threshold values.
            (None, classify_magnitude(delta.unsigned_abs() as f64, thresholds))
        }
    } else {
        let pct = delta as f64 / baseline as f64 * 100.0;
        (Some(pct), classify_magnitude(pct.abs(), thresholds))
    };

    DriftRecord {
        service,
        level,
        baseline,
        current,
        delta,
        pct_change,
        severity,
    }
}

fn classify_magnitude(magnitude: f64, thresholds: &DriftConfig) -> DriftSeverity {
    if magnitude >= thresholds.critical_pct {
        DriftSeverity::Critical
    } else if magnitude >= thresholds.warning_pct {
        DriftSeverity::Warning
    } else {
        DriftSeverity::Normal
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(service: &str, level: &str, count: usize) -> Vec<LogRecord> {
        (0..count)
            .map(|i| {
                serde_json::from_value(json!({
                    "_time": format!("2025-06-01T12:00:{:02}Z", i % 60),
                    "_msg": "m",
                    "service": service,
                    "level": level,
                }))
                .unwrap()
            })
            .collect()
    }

    fn thresholds() -> DriftConfig {
        DriftConfig {
            warning_pct: 20.0,
            critical_pct: 50.0,
        }
    }

    #[test]
    fn classification_boundaries() {
        // 49% -> warning, 51% -> critical, 10% -> normal
        let rows = compare(
            &records("api", "ERROR", 100),
            &records("api", "ERROR", 149),
            &thresholds(),
        );
        assert_eq!(rows[0].severity, DriftSeverity::Warning);
        assert_eq!(rows[0].pct_change, Some(49.0));

        let rows = compare(
            &records("api", "ERROR", 100),
            &records("api", "ERROR", 151),
            &thresholds(),
        );
        assert_eq!(rows[0].severity, DriftSeverity::Critical);

        let rows = compare(
            &records("api", "ERROR", 100),
            &records("api", "ERROR", 110),
            &thresholds(),
        );
        assert_eq!(rows[0].severity, DriftSeverity::Normal);
        assert_eq!(rows[0].delta, 10);
    }

    #[test]
    fn negative_drift_uses_absolute_change() {
        let rows = compare(
            &records("api", "ERROR", 100),
            &records("api", "ERROR", 40),
            &thresholds(),
        );
        assert_eq!(rows[0].pct_change, Some(-60.0));
        assert_eq!(rows[0].severity, DriftSeverity::Critical);
    }

    #[test]
    fn zero_baseline_does_not_divide() {
        let rows = compare(&[], &records("api", "ERROR", 60), &thresholds());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].baseline, 0);
        assert_eq!(rows[0].pct_change, None);
        // Delta of 60 against the 50 threshold read as a count
        assert_eq!(rows[0].severity, DriftSeverity::Critical);

        let rows = compare(&[], &records("api", "ERROR", 5), &thresholds());
        assert_eq!(rows[0].severity, DriftSeverity::Normal);
    }

    #[test]
    fn vanished_pair_is_full_drop() {
        let rows = compare(&records("api", "ERROR", 10), &[], &thresholds());
        assert_eq!(rows[0].current, 0);
        assert_eq!(rows[0].pct_change, Some(-100.0));
        assert_eq!(rows[0].severity, DriftSeverity::Critical);
    }

    #[test]
    fn rows_sorted_by_severity_then_name() {
        let mut baseline = records("api", "ERROR", 100);
        baseline.extend(records("db", "WARN", 100));
        let mut current = records("api", "ERROR", 100); // normal
        current.extend(records("db", "WARN", 200)); // critical

        let rows = compare(&baseline, &current, &thresholds());
        assert_eq!(rows[0].service, "db");
        assert_eq!(rows[0].severity, DriftSeverity::Critical);
        assert_eq!(rows[1].service, "api");
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(compare(&[], &[], &thresholds()).is_empty());
    }
}
