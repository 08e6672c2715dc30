//! Export serializations of the drift comparison: CSV rows, a JSON
//! snapshot with a metadata wrapper, and an alerting-rule text block.

use anyhow::Result;
use chrono::Utc;

use crate::aggregate::drift::DriftRecord;
use crate::config::schema::DriftConfig;

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Render the drift table as CSV. A `None` percentage (zero baseline)
/// serializes as an empty cell.
pub fn drift_csv(rows: &[DriftRecord]) -> String {
    let mut out = String::from("service,level,baseline,current,delta,pct_change,severity\n");
    for row in rows {
        let pct = row
            .pct_change
            .map(|p| format!("{p:.1}"))
            .unwrap_or_default();
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            csv_escape(&row.service),
            csv_escape(&row.level),
            row.baseline,
            row.current,
            row.delta,
            pct,
            row.severity,
        ));
    }
    out
}

/// Quote a CSV field when it contains a comma, quote, or newline.
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

// ---------------------------------------------------------------------------
// JSON snapshot
// ---------------------------------------------------------------------------

/// Pretty-printed JSON snapshot of the drift table with a metadata wrapper.
pub fn drift_snapshot_json(
    rows: &[DriftRecord],
    query: &str,
    thresholds: &DriftConfig,
) -> Result<String> {
    let snapshot = serde_json::json!({
        "generated_at": Utc::now().to_rfc3339(),
        "query": query,
        "thresholds": {
            "warning_pct": thresholds.warning_pct,
            "critical_pct": thresholds.critical_pct,
        },
        "rows": rows,
    });
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

// ---------------------------------------------------------------------------
// Alerting rules
// ---------------------------------------------------------------------------

/// Generate an alerting-rule text block parameterized by the configured
/// thresholds, ready to paste into an alerting pipeline.
pub fn alert_rules(thresholds: &DriftConfig) -> String {
    format!(
        r#"groups:
  - name: loglens-drift
    rules:
      - alert: LogVolumeDriftWarning
        expr: abs(log_drift_pct_change) >= {warning} and abs(log_drift_pct_change) < {critical}
        for: 5m
        labels:
          severity: warning
        annotations:
          summary: "Log volume drifted by {{{{ $value }}}}% against baseline"
      - alert: LogVolumeDriftCritical
        expr: abs(log_drift_pct_change) >= {critical}
        for: 5m
        labels:
          severity: critical
        annotations:
          summary: "Log volume drifted by {{{{ $value }}}}% against baseline"
"#,
        warning = thresholds.warning_pct,
        critical = thresholds.critical_pct,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
