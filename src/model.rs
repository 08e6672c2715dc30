//! Core data model: log records as returned by the store, query requests,
//! and scan statistics.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Log record
// ---------------------------------------------------------------------------

/// Placeholder used when a record lacks a requested field.
pub const UNKNOWN_FIELD: &str = "unknown";

/// One log entry fetched from the store.
///
/// The store guarantees an event timestamp (`_time`, RFC 3339) and a message
/// (`_msg`); every other field is open-ended and lands in the flattened
/// side-map. Records are built fresh from each query response and never
/// mutated — the next query replaces them wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "_time")]
    pub timestamp: String,
    #[serde(rename = "_msg", default)]
    pub message: String,
    /// All remaining fields (`level`, `service`, `host`, ...). Values may be
    /// strings, numbers, or booleans depending on what was ingested.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl LogRecord {
    /// Look up a named field, rendering non-string values through their JSON
    /// display form. Returns [`UNKNOWN_FIELD`] when absent or null.
    pub fn field(&self, name: &str) -> String {
        match self.fields.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => UNKNOWN_FIELD.to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// The record's `level` field, or [`UNKNOWN_FIELD`].
    pub fn level(&self) -> String {
        self.field("level")
    }

    /// The record's `service` field, or [`UNKNOWN_FIELD`].
    pub fn service(&self) -> String {
        self.field("service")
    }

    /// Parse the event timestamp. `None` if the string is not valid RFC 3339.
    pub fn parsed_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.timestamp).ok()
    }

    /// Event time as epoch seconds, if the timestamp parses.
    pub fn epoch_seconds(&self) -> Option<i64> {
        self.parsed_timestamp().map(|t| t.timestamp())
    }
}

// ---------------------------------------------------------------------------
// Level tiers
// ---------------------------------------------------------------------------

/// Levels counted as errors by the rate and drift computations.
pub fn is_error_level(level: &str) -> bool {
    matches!(
        level.to_ascii_uppercase().as_str(),
        "ERROR" | "FATAL" | "CRITICAL"
    )
}

/// Levels counted as warnings.
pub fn is_warn_level(level: &str) -> bool {
    level.eq_ignore_ascii_case("WARN") || level.eq_ignore_ascii_case("WARNING")
}

// ---------------------------------------------------------------------------
// Query request / scan stats
// ---------------------------------------------------------------------------

/// Parameters for one query execution against the store.
///
/// When no time range is supplied the store is queried unbounded; callers
/// that want time filtering embed a `_time:` clause in the query text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_QUERY_LIMIT,
            start: None,
            end: None,
            offset: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_range(mut self, start: Option<String>, end: Option<String>) -> Self {
        self.start = start;
        self.end = end;
        self
    }
}

/// Default result cap for query execution.
pub const DEFAULT_QUERY_LIMIT: usize = 1000;

/// Default result cap for field-value discovery.
pub const DEFAULT_VALUES_LIMIT: usize = 100;

/// Summary of what one query touched.
///
/// The store does not report execution time, so it is always zero here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// Number of successfully parsed records.
    pub rows: usize,
    /// Size of the raw response body in bytes.
    pub bytes: usize,
    /// Always 0 — not obtainable from the store.
    pub execution_ms: u64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
