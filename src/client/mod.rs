//! HTTP client for a VictoriaLogs-compatible log store.
//!
//! Wraps the store's query API with the synchronous `ureq` HTTP client.
//! Provides:
//!
//! - **Query execution**: run a filter query, normalize the response into a
//!   flat record sequence plus scan statistics.
//! - **Pre-aggregated hits**: the store's own counts for a query.
//! - **Field discovery**: known field names and observed values, feeding
//!   autocomplete — best-effort, degrades to empty on failure.
//! - **Liveness probe**: a boolean connectivity check.
//! - **Ingest**: NDJSON insert, used by the sample-log seeder.
//!
//! The query endpoint may answer with newline-delimited JSON, a JSON array,
//! or a single JSON object. All three shapes normalize to `Vec<LogRecord>`
//! here; no shape ambiguity escapes this module.

use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;

use crate::config::schema::ServerConfig;
use crate::model::{LogRecord, QueryRequest, ScanStats};

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Synchronous log store HTTP client.
///
/// Constructed explicitly from config and passed to whoever needs it — there
/// is no shared global client.
#[derive(Debug, Clone)]
pub struct LogStoreClient {
    base_url: String,
    timeout: Duration,
}

/// Records plus scan statistics from one query execution.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub records: Vec<LogRecord>,
    pub stats: ScanStats,
}

impl LogStoreClient {
    /// Build a client from the resolved `[server]` config section.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(&config.base_url, config.timeout_ms)
    }

    pub fn new(base_url: &str, timeout_ms: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a query and return the normalized record sequence with scan
    /// statistics. Transport and HTTP-status failures propagate; individual
    /// malformed result lines are skipped with a warning.
    pub fn execute(&self, request: &QueryRequest) -> Result<QueryOutcome> {
        let url = format!("{}/select/logsql/query", self.base_url);

        let limit = request.limit.to_string();
        let mut form: Vec<(&str, &str)> = vec![("query", &request.query), ("limit", &limit)];
        if let Some(start) = &request.start {
            form.push(("start", start));
        }
        if let Some(end) = &request.end {
            form.push(("end", end));
        }
        let offset = request.offset.map(|o| o.to_string());
        if let Some(offset) = &offset {
            form.push(("offset", offset));
        }

        let body = ureq::post(&url)
            .timeout(self.timeout)
            .send_form(&form)
            .with_context(|| format!("query request to {url} failed"))?
            .into_string()
            .context("failed to read query response body")?;

        let bytes = body.len();
        let records = normalize_body(&body);
        let stats = ScanStats {
            rows: records.len(),
            bytes,
            // The store does not report execution time.
            execution_ms: 0,
        };

        Ok(QueryOutcome { records, stats })
    }

    /// Fetch the store's pre-aggregated hit counts for a query.
    pub fn hits(
        &self,
        query: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Value> {
        let url = format!("{}/select/logsql/hits", self.base_url);

        let mut form: Vec<(&str, &str)> = vec![("query", query)];
        if let Some(start) = start {
            form.push(("start", start));
        }
        if let Some(end) = end {
            form.push(("end", end));
        }

        ureq::post(&url)
            .timeout(self.timeout)
            .send_form(&form)
            .with_context(|| format!("hits request to {url} failed"))?
            .into_json()
            .context("failed to parse hits response")
    }

    /// Enumerate known field names. Best-effort: failures degrade to an
    /// empty list since this only feeds autocomplete.
    pub fn field_names(&self) -> Vec<String> {
        let url = format!("{}/select/logsql/field_names", self.base_url);
        let result = ureq::post(&url)
            .timeout(self.timeout)
            .send_form(&[("query", crate::query::MATCH_ALL)]);

        match result {
            Ok(resp) => match resp.into_json::<Value>() {
                Ok(value) => extract_value_list(&value),
                Err(_) => Vec::new(),
            },
            Err(_) => Vec::new(),
        }
    }

    /// Enumerate observed values for one field, capped at `limit`.
    /// Best-effort like [`field_names`](Self::field_names).
    pub fn field_values(&self, field: &str, limit: usize) -> Vec<String> {
        let url = format!("{}/select/logsql/field_values", self.base_url);
        let limit = limit.to_string();
        let result = ureq::post(&url).timeout(self.timeout).send_form(&[
            ("query", crate::query::MATCH_ALL),
            ("field", field),
            ("limit", &limit),
        ]);

        match result {
            Ok(resp) => match resp.into_json::<Value>() {
                Ok(value) => extract_value_list(&value),
                Err(_) => Vec::new(),
            },
            Err(_) => Vec::new(),
        }
    }

    /// Check whether the store is reachable.
    pub fn is_healthy(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        ureq::get(&url)
            .timeout(Duration::from_secs(5))
            .call()
            .is_ok()
    }

    /// Insert a batch of NDJSON-encoded records.
    pub fn insert_jsonline(&self, ndjson: &str) -> Result<()> {
        let url = format!("{}/insert/jsonline", self.base_url);
        ureq::post(&url)
            .timeout(self.timeout)
            .set("Content-Type", "application/x-ndjson")
            .send_string(ndjson)
            .with_context(|| format!("insert request to {url} failed"))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Response normalization
// ---------------------------------------------------------------------------

/// Normalize a query response body into a flat record sequence.
///
/// Handles the three shapes the store produces:
/// (a) newline-delimited JSON — one record per non-blank line, lines that
///     fail to parse are skipped with a warning;
/// (b) a JSON array of records;
/// (c) a single JSON object — wrapped in a one-element sequence, unless it
///     carries a nested `values` array, which is unwrapped instead.
pub fn normalize_body(body: &str) -> Vec<LogRecord> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return normalize_value(value);
    }

    // Whole-body parse failed: treat as newline-delimited JSON.
    trimmed
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str::<Value>(line) {
            Ok(value) => record_from_value(value),
            Err(err) => {
                warn_skipped_line(line, &err.to_string());
                None
            }
        })
        .collect()
}

/// Normalize an already-parsed JSON value per the rules above.
pub fn normalize_value(value: Value) -> Vec<LogRecord> {
    match value {
        Value::Array(items) => items.into_iter().filter_map(record_from_value).collect(),
        Value::Object(mut obj) => {
            if obj.get("values").is_some_and(Value::is_array) {
                match obj.remove("values") {
                    Some(Value::Array(items)) => {
                        items.into_iter().filter_map(record_from_value).collect()
                    }
                    _ => Vec::new(),
                }
            } else {
                record_from_value(Value::Object(obj)).into_iter().collect()
            }
        }
        _ => Vec::new(),
    }
}

fn record_from_value(value: Value) -> Option<LogRecord> {
    match serde_json::from_value::<LogRecord>(value) {
        Ok(record) => Some(record),
        Err(err) => {
            warn_skipped_line("<record>", &err.to_string());
            None
        }
    }
}

fn warn_skipped_line(line: &str, reason: &str) {
    let preview: String = line.chars().take(80).collect();
    eprintln!(
        "{} skipped unparseable result line ({reason}): {preview}",
        "warning:".yellow().bold()
    );
}

// ---------------------------------------------------------------------------
// Discovery response parsing
// ---------------------------------------------------------------------------

/// Pull a list of names out of a discovery response.
///
/// The store answers either with a bare array of strings or with
/// `{"values": [{"value": "...", "hits": N}, ...]}` — both are accepted.
fn extract_value_list(value: &Value) -> Vec<String> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("values") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => obj
                .get("value")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const LINE_A: &str = r#"{"_time":"2025-06-01T12:00:00Z","_msg":"a","level":"INFO"}"#;
    const LINE_B: &str = r#"{"_time":"2025-06-01T12:00:01Z","_msg":"b","level":"ERROR"}"#;

    #[test]
    fn normalizes_ndjson() {
        let body = format!("{LINE_A}\n{LINE_B}\n");
        let records = normalize_body(&body);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "a");
        assert_eq!(records[1].message, "b");
    }

    #[test]
    fn normalizes_json_array() {
        let body = format!("[{LINE_A},{LINE_B}]");
        let records = normalize_body(&body);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "a");
    }

    #[test]
    fn normalizes_single_object() {
        let records = normalize_body(LINE_A);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "a");
    }

    #[test]
    fn unwraps_nested_values() {
        let body = format!(r#"{{"values":[{LINE_A},{LINE_B}]}}"#);
        let records = normalize_body(&body);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].level(), "ERROR");
    }

    #[test]
    fn all_shapes_agree() {
        let ndjson = normalize_body(&format!("{LINE_A}\n{LINE_B}"));
        let array = normalize_body(&format!("[{LINE_A},{LINE_B}]"));
        assert_eq!(ndjson.len(), array.len());
        for (a, b) in ndjson.iter().zip(&array) {
            assert_eq!(a.timestamp, b.timestamp);
            assert_eq!(a.message, b.message);
        }
    }

    #[test]
    fn bad_lines_are_skipped_not_fatal() {
        let body = format!("{LINE_A}\nnot json at all\n{LINE_B}");
        let records = normalize_body(&body);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let body = format!("{LINE_A}\n\n\n{LINE_B}\n");
        assert_eq!(normalize_body(&body).len(), 2);
    }

    #[test]
    fn empty_body_is_empty() {
        assert!(normalize_body("").is_empty());
        assert!(normalize_body("   \n  ").is_empty());
    }

    #[test]
    fn extracts_bare_string_list() {
        let value: Value = serde_json::from_str(r#"["level","service","host"]"#).unwrap();
        assert_eq!(extract_value_list(&value), vec!["level", "service", "host"]);
    }

    #[test]
    fn extracts_hits_shaped_list() {
        let value: Value = serde_json::from_str(
            r#"{"values":[{"value":"ERROR","hits":10},{"value":"INFO","hits":90}]}"#,
        )
        .unwrap();
        assert_eq!(extract_value_list(&value), vec!["ERROR", "INFO"]);
    }

    #[test]
    fn extract_tolerates_junk() {
        let value: Value = serde_json::from_str(r#"{"unexpected":true}"#).unwrap();
        assert!(extract_value_list(&value).is_empty());
    }
}
