//! Query model tests: builder round-trip, clause exclusion, parsing, and
//! validation symmetry.

use loglens::query::{
    FilterClause, FilterOperator, MATCH_ALL, build_query, parse_query, validate,
};

// ---------------------------------------------------------------------------
// Builder round-trip
// ---------------------------------------------------------------------------

#[test]
fn build_joins_valid_clauses_in_order() {
    let clauses = vec![
        FilterClause::new("level", FilterOperator::Equals, "ERROR"),
        FilterClause::new("service", FilterOperator::Contains, "payment"),
        FilterClause::new("host", FilterOperator::NotEquals, "host-3"),
    ];
    assert_eq!(
        build_query(&clauses),
        "level=ERROR AND service:payment AND host!=host-3"
    );
}

#[test]
fn every_operator_renders_its_token() {
    let cases = [
        (FilterOperator::Equals, "f=v"),
        (FilterOperator::NotEquals, "f!=v"),
        (FilterOperator::Contains, "f:v"),
        (FilterOperator::NotContains, "f!:v"),
        (FilterOperator::RegexMatch, "f=~v"),
        (FilterOperator::RegexNotMatch, "f!~v"),
    ];
    for (op, expected) in cases {
        let clause = FilterClause::new("f", op, "v");
        assert_eq!(build_query(&[clause]), expected);
    }
}

#[test]
fn values_with_spaces_or_colons_are_quoted() {
    let clauses = vec![FilterClause::new(
        "_msg",
        FilterOperator::Contains,
        "connection refused",
    )];
    assert_eq!(build_query(&clauses), "_msg:\"connection refused\"");

    let clauses = vec![FilterClause::new(
        "path",
        FilterOperator::Equals,
        "api:v2",
    )];
    assert_eq!(build_query(&clauses), "path=\"api:v2\"");
}

#[test]
fn plain_values_are_not_quoted() {
    let clauses = vec![FilterClause::new("level", FilterOperator::Equals, "WARN")];
    assert_eq!(build_query(&clauses), "level=WARN");
}

// ---------------------------------------------------------------------------
// Empty-clause exclusion
// ---------------------------------------------------------------------------

#[test]
fn clauses_missing_field_or_value_never_appear() {
    let clauses = vec![
        FilterClause::new("", FilterOperator::Equals, "ERROR"),
        FilterClause::new("level", FilterOperator::Equals, ""),
        FilterClause::new("service", FilterOperator::Equals, "api"),
    ];
    let built = build_query(&clauses);
    assert_eq!(built, "service=api");
    assert!(!built.contains("level="));
}

#[test]
fn all_empty_clauses_yield_match_all() {
    assert_eq!(build_query(&[]), MATCH_ALL);
    let clauses = vec![
        FilterClause::new("", FilterOperator::Equals, ""),
        FilterClause::new("f", FilterOperator::Contains, ""),
    ];
    assert_eq!(build_query(&clauses), MATCH_ALL);
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[test]
fn parse_classifies_time_range_segment() {
    let parsed = parse_query("service=api AND _time:15m AND level=ERROR");
    assert_eq!(parsed.clauses, vec!["service=api", "level=ERROR"]);
    assert_eq!(parsed.time_range.as_deref(), Some("_time:15m"));
}

#[test]
fn parse_keeps_segments_opaque() {
    // Free-text segments are not decomposed into field/operator/value.
    let parsed = parse_query("(level=ERROR or level=FATAL) AND service:api");
    assert_eq!(
        parsed.clauses,
        vec!["(level=ERROR or level=FATAL)", "service:api"]
    );
}

#[test]
fn parse_of_built_query_recovers_segments() {
    let clauses = vec![
        FilterClause::new("level", FilterOperator::Equals, "ERROR"),
        FilterClause::new("service", FilterOperator::Contains, "api"),
    ];
    let built = build_query(&clauses);
    let parsed = parse_query(&built);
    assert_eq!(parsed.clauses, vec!["level=ERROR", "service:api"]);
    assert!(parsed.time_range.is_none());
}

// ---------------------------------------------------------------------------
// Validation symmetry
// ---------------------------------------------------------------------------

#[test]
fn balanced_query_is_valid() {
    let v = validate("(a=1)");
    assert!(v.valid);
    assert!(v.error.is_none());
}

#[test]
fn unbalanced_parenthesis_fails() {
    let v = validate("(a=1");
    assert!(!v.valid);
    assert_eq!(v.error.as_deref(), Some("mismatched parentheses"));
}

#[test]
fn unbalanced_quote_fails() {
    let v = validate("a=\"b");
    assert!(!v.valid);
    assert_eq!(v.error.as_deref(), Some("mismatched quotes"));
}

#[test]
fn empty_query_fails() {
    let v = validate("");
    assert!(!v.valid);
    assert_eq!(v.error.as_deref(), Some("empty query"));
}

#[test]
fn validation_does_not_enforce_grammar() {
    // Syntactically balanced nonsense still passes — the store is the
    // final arbiter.
    assert!(validate("((((complete gibberish))))").valid);
}
