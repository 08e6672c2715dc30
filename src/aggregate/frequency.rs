//! Frequency counts and top-N ranking over a named record field.

use std::collections::HashMap;

use crate::model::LogRecord;

/// Count occurrences of each distinct value of `field`.
///
/// Records lacking the field count under the `"unknown"` placeholder.
pub fn count_by_field(records: &[LogRecord], field: &str) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.field(field)).or_default() += 1;
    }
    counts
}

/// Rank grouped counts descending and truncate to the first `n`.
///
/// Groups beyond the cap are dropped — no "other" bucket is synthesized.
/// Ties keep whatever order the grouping produced them in; equal counts
/// have no secondary sort key.
pub fn top_n(counts: HashMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
}

/// Convenience: count by field, then take the top `n`.
pub fn field_distribution(records: &[LogRecord], field: &str, n: usize) -> Vec<(String, usize)> {
    top_n(count_by_field(records, field), n)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(service: Option<&str>) -> LogRecord {
        let mut value = json!({
            "_time": "2025-06-01T12:00:00Z",
            "_msg": "m",
        });
        if let Some(service) = service {
            value["service"] = json!(service);
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn counts_with_unknown_fallback() {
        let records = vec![
            record(Some("api")),
            record(Some("api")),
            record(Some("db")),
            record(None),
        ];
        let counts = count_by_field(&records, "service");
        assert_eq!(counts["api"], 2);
        assert_eq!(counts["db"], 1);
        assert_eq!(counts["unknown"], 1);
    }

    #[test]
    fn top_n_truncates_descending() {
        let mut counts = HashMap::new();
        counts.insert("a".to_string(), 5);
        counts.insert("b".to_string(), 9);
        counts.insert("c".to_string(), 1);
        counts.insert("d".to_string(), 7);

        let top = top_n(counts, 2);
        assert_eq!(top, vec![("b".to_string(), 9), ("d".to_string(), 7)]);
    }

    #[test]
    fn empty_records_yield_empty_counts() {
        let counts = count_by_field(&[], "service");
        assert!(counts.is_empty());
        assert!(top_n(counts, 10).is_empty());
    }
}
