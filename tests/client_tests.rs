//! Transport adapter tests: the three response shapes must normalize to
//! the same record sequence, and malformed content degrades rather than
//! failing.

use loglens::client::normalize_body;

const REC_A: &str = r#"{"_time":"2025-06-01T12:00:00Z","_msg":"first","level":"INFO","service":"api"}"#;
const REC_B: &str = r#"{"_time":"2025-06-01T12:00:05Z","_msg":"second","level":"ERROR","service":"db"}"#;

// ---------------------------------------------------------------------------
// Response-shape normalization
// ---------------------------------------------------------------------------

#[test]
fn ndjson_array_and_object_shapes_agree() {
    let ndjson = normalize_body(&format!("{REC_A}\n{REC_B}\n"));
    let array = normalize_body(&format!("[{REC_A},{REC_B}]"));
    let singleton = normalize_body(REC_A);

    assert_eq!(ndjson.len(), 2);
    assert_eq!(array.len(), 2);
    assert_eq!(singleton.len(), 1);

    for (a, b) in ndjson.iter().zip(&array) {
        assert_eq!(a.timestamp, b.timestamp);
        assert_eq!(a.message, b.message);
        assert_eq!(a.level(), b.level());
    }
    assert_eq!(singleton[0].timestamp, ndjson[0].timestamp);
    assert_eq!(singleton[0].message, "first");
}

#[test]
fn object_with_nested_values_is_unwrapped() {
    let wrapped = normalize_body(&format!(r#"{{"values":[{REC_A},{REC_B}]}}"#));
    let array = normalize_body(&format!("[{REC_A},{REC_B}]"));
    assert_eq!(wrapped.len(), array.len());
    assert_eq!(wrapped[1].service(), "db");
}

#[test]
fn record_order_is_preserved() {
    let records = normalize_body(&format!("{REC_B}\n{REC_A}"));
    assert_eq!(records[0].message, "second");
    assert_eq!(records[1].message, "first");
}

// ---------------------------------------------------------------------------
// Degraded content
// ---------------------------------------------------------------------------

#[test]
fn malformed_lines_are_skipped_without_failing() {
    let body = format!("{REC_A}\n{{broken json\nnot even json\n{REC_B}");
    let records = normalize_body(&body);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].message, "first");
    assert_eq!(records[1].message, "second");
}

#[test]
fn record_missing_required_time_is_skipped() {
    let body = format!("{REC_A}\n{{\"_msg\":\"no timestamp\"}}");
    let records = normalize_body(&body);
    assert_eq!(records.len(), 1);
}

#[test]
fn blank_and_empty_bodies_are_empty_sequences() {
    assert!(normalize_body("").is_empty());
    assert!(normalize_body("\n\n").is_empty());
    assert!(normalize_body("   ").is_empty());
}

#[test]
fn extra_fields_survive_normalization() {
    let body = r#"{"_time":"2025-06-01T12:00:00Z","_msg":"m","level":"WARN","request_id":"req_123","status_code":429}"#;
    let records = normalize_body(body);
    assert_eq!(records[0].field("request_id"), "req_123");
    assert_eq!(records[0].field("status_code"), "429");
    assert_eq!(records[0].field("absent"), "unknown");
}
