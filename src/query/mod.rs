//! Visual query builder model: filter clauses, query assembly, best-effort
//! parsing, and syntactic validation.
//!
//! The store's filter language itself is opaque to us — we only assemble
//! strings it accepts and run a shallow sanity check before sending them.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::LogRecord;

/// Token matching every record, emitted when no usable clause remains.
pub const MATCH_ALL: &str = "*";

/// Marker identifying a time-range segment inside a query string.
pub const TIME_RANGE_MARKER: &str = "_time:";

/// Separator between clauses in the assembled query.
const CLAUSE_SEPARATOR: &str = " AND ";

// ---------------------------------------------------------------------------
// Filter clauses
// ---------------------------------------------------------------------------

/// Comparison operator for one filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    RegexMatch,
    RegexNotMatch,
}

impl FilterOperator {
    /// The token emitted between field and value.
    pub fn token(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "!=",
            Self::Contains => ":",
            Self::NotContains => "!:",
            Self::RegexMatch => "=~",
            Self::RegexNotMatch => "!~",
        }
    }

    /// All operators in display order, for UI dropdowns.
    pub fn all() -> [FilterOperator; 6] {
        [
            Self::Equals,
            Self::NotEquals,
            Self::Contains,
            Self::NotContains,
            Self::RegexMatch,
            Self::RegexNotMatch,
        ]
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// One user-authored condition: field, operator, literal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterClause {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterClause {
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// A clause with an empty field or empty value is never emitted.
    pub fn is_usable(&self) -> bool {
        !self.field.is_empty() && !self.value.is_empty()
    }

    /// Render this clause as `field<op>value`, quoting the value when it
    /// contains whitespace or a colon.
    fn render(&self) -> String {
        let value = if self.value.contains(char::is_whitespace) || self.value.contains(':') {
            format!("\"{}\"", self.value)
        } else {
            self.value.clone()
        };
        format!("{}{}{}", self.field, self.operator.token(), value)
    }

    /// Apply this clause to an already-fetched record.
    ///
    /// The store evaluates clauses server-side; this local variant powers
    /// the dashboard's quick-filter over the current result set. A regex
    /// that fails to compile matches nothing (and its negation everything).
    pub fn matches(&self, record: &LogRecord) -> bool {
        let actual = record.field(&self.field);
        match self.operator {
            FilterOperator::Equals => actual == self.value,
            FilterOperator::NotEquals => actual != self.value,
            FilterOperator::Contains => actual.contains(&self.value),
            FilterOperator::NotContains => !actual.contains(&self.value),
            FilterOperator::RegexMatch => match Regex::new(&self.value) {
                Ok(re) => re.is_match(&actual),
                Err(_) => false,
            },
            FilterOperator::RegexNotMatch => match Regex::new(&self.value) {
                Ok(re) => !re.is_match(&actual),
                Err(_) => true,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Query assembly
// ---------------------------------------------------------------------------

/// Assemble a query string from builder clauses.
///
/// Clauses missing a field or value are skipped. Returns [`MATCH_ALL`] when
/// nothing usable remains.
pub fn build_query(clauses: &[FilterClause]) -> String {
    let rendered: Vec<String> = clauses
        .iter()
        .filter(|c| c.is_usable())
        .map(FilterClause::render)
        .collect();

    if rendered.is_empty() {
        MATCH_ALL.to_string()
    } else {
        rendered.join(CLAUSE_SEPARATOR)
    }
}

// ---------------------------------------------------------------------------
// Query parsing
// ---------------------------------------------------------------------------

/// Best-effort decomposition of a free-text query.
///
/// Segments stay opaque strings — a query hand-edited in free-text mode is
/// not guaranteed to round-trip back into builder clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub clauses: Vec<String>,
    pub time_range: Option<String>,
}

/// Split a query on the literal `" AND "` separator. A segment containing
/// the `_time:` marker becomes the time range; everything else is an opaque
/// filter segment.
pub fn parse_query(text: &str) -> ParsedQuery {
    let mut parsed = ParsedQuery::default();
    for segment in text.split(CLAUSE_SEPARATOR) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if segment.contains(TIME_RANGE_MARKER) && parsed.time_range.is_none() {
            parsed.time_range = Some(segment.to_string());
        } else {
            parsed.clauses.push(segment.to_string());
        }
    }
    parsed
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Result of the pre-flight syntax check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Validation {
    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    fn fail(reason: &str) -> Self {
        Self {
            valid: false,
            error: Some(reason.to_string()),
        }
    }
}

/// Shallow syntactic sanity check run before any network call.
///
/// Catches blank input, unbalanced parentheses, and an odd number of double
/// quotes. A query that passes may still be rejected by the store — this is
/// not a grammar.
pub fn validate(text: &str) -> Validation {
    if text.trim().is_empty() {
        return Validation::fail("empty query");
    }

    let opens = text.chars().filter(|&c| c == '(').count();
    let closes = text.chars().filter(|&c| c == ')').count();
    if opens != closes {
        return Validation::fail("mismatched parentheses");
    }

    let quotes = text.chars().filter(|&c| c == '"').count();
    if quotes % 2 != 0 {
        return Validation::fail("mismatched quotes");
    }

    Validation::ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
