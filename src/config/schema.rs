/// Configuration schema and defaults for loglens.
///
/// Defines the TOML-serializable structure with sections `[server]`,
/// `[query]`, `[drift]`, `[charts]`, and `[web]`. Every field has a
/// built-in default; users only set the values they want to override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level loglens configuration.
///
/// Maps directly to the `~/.loglens/config.toml` and `.loglens.toml` file
/// schemas. All sections and fields are optional — missing values fall back
/// to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoglensConfig {
    pub server: ServerConfig,
    pub query: QueryConfig,
    pub drift: DriftConfig,
    pub charts: ChartsConfig,
    pub web: WebConfig,
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

/// Connection settings for the log store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the store's HTTP API.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9428".to_string(),
            timeout_ms: 10_000,
        }
    }
}

// ---------------------------------------------------------------------------
// [query]
// ---------------------------------------------------------------------------

/// Query execution defaults and refresh cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Result cap when the caller does not pass `--limit`.
    pub default_limit: usize,
    /// Result cap for field-value discovery.
    pub values_limit: usize,
    /// Auto-refresh interval for `query --watch` (seconds).
    pub explore_refresh_secs: u64,
    /// Auto-refresh interval for the web dashboard (seconds).
    pub dashboard_refresh_secs: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: 1000,
            values_limit: 100,
            explore_refresh_secs: 10,
            dashboard_refresh_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// [drift]
// ---------------------------------------------------------------------------

/// Thresholds for period-over-baseline drift classification.
///
/// A pair whose absolute percentage change is at least `warning_pct` but
/// below `critical_pct` classifies as warning; at or above `critical_pct`
/// as critical.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    pub warning_pct: f64,
    pub critical_pct: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            warning_pct: 20.0,
            critical_pct: 50.0,
        }
    }
}

// ---------------------------------------------------------------------------
// [charts]
// ---------------------------------------------------------------------------

/// Presentation caps and ratios for the chart geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Donut hole radius as a fraction of the outer radius.
    pub donut_inner_ratio: f64,
    /// Top-N cap for the summary table.
    pub table_top: usize,
    /// Top-N cap for the pie chart.
    pub pie_top: usize,
    /// Top-N cap for the donut chart.
    pub donut_top: usize,
    /// Top-N cap for the treemap.
    pub treemap_top: usize,
    /// Top-N cap for bar charts.
    pub bar_top: usize,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            donut_inner_ratio: 0.6,
            table_top: 5,
            pie_top: 6,
            donut_top: 8,
            treemap_top: 10,
            bar_top: 12,
        }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Embedded dashboard server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address for `loglens web`.
    pub listen: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:9747".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl LoglensConfig {
    /// Generate the annotated default TOML config file content.
    ///
    /// Used by `loglens config init` to create a starting config file with
    /// all settings documented.
    pub fn default_toml() -> String {
        r#"# loglens Configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (LOGLENS_*)
#   2. Project config (.loglens.toml in current directory)
#   3. User global config (~/.loglens/config.toml)
#   4. Built-in defaults

[server]
base_url = "http://localhost:9428"
timeout_ms = 10000

[query]
default_limit = 1000
values_limit = 100
explore_refresh_secs = 10          # `loglens query --watch` cadence
dashboard_refresh_secs = 30        # web dashboard polling cadence

[drift]
warning_pct = 20.0                 # |pct change| >= this -> warning
critical_pct = 50.0                # |pct change| >= this -> critical

[charts]
donut_inner_ratio = 0.6
table_top = 5
pie_top = 6
donut_top = 8
treemap_top = 10
bar_top = 12

[web]
listen = "127.0.0.1:9747"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = LoglensConfig::default();
        assert_eq!(config.server.base_url, "http://localhost:9428");
        assert_eq!(config.server.timeout_ms, 10_000);
        assert_eq!(config.query.default_limit, 1000);
        assert_eq!(config.query.values_limit, 100);
        assert_eq!(config.query.explore_refresh_secs, 10);
        assert_eq!(config.query.dashboard_refresh_secs, 30);
        assert_eq!(config.drift.warning_pct, 20.0);
        assert_eq!(config.drift.critical_pct, 50.0);
        assert_eq!(config.charts.donut_inner_ratio, 0.6);
        assert_eq!(config.charts.treemap_top, 10);
    }

    #[test]
    fn deserialize_minimal_toml() {
        let toml_str = r#"
[server]
base_url = "http://logs.internal:9428"
"#;
        let config: LoglensConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.base_url, "http://logs.internal:9428");
        // All other sections fall back to defaults
        assert_eq!(config.server.timeout_ms, 10_000);
        assert_eq!(config.query.default_limit, 1000);
    }

    #[test]
    fn deserialize_full_toml() {
        let toml_str = r#"
[server]
base_url = "http://logs.internal:9428"
timeout_ms = 5000

[query]
default_limit = 500
values_limit = 50
explore_refresh_secs = 5
dashboard_refresh_secs = 60

[drift]
warning_pct = 10.0
critical_pct = 30.0

[charts]
donut_inner_ratio = 0.5
table_top = 3
pie_top = 4
donut_top = 5
treemap_top = 6
bar_top = 7

[web]
listen = "0.0.0.0:8080"
"#;
        let config: LoglensConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.timeout_ms, 5000);
        assert_eq!(config.query.default_limit, 500);
        assert_eq!(config.drift.warning_pct, 10.0);
        assert_eq!(config.drift.critical_pct, 30.0);
        assert_eq!(config.charts.donut_inner_ratio, 0.5);
        assert_eq!(config.charts.bar_top, 7);
        assert_eq!(config.web.listen, "0.0.0.0:8080");
    }

    #[test]
    fn empty_toml_produces_defaults() {
        let config: LoglensConfig = toml::from_str("").unwrap();
        assert_eq!(config.query.default_limit, 1000);
        assert_eq!(config.drift.warning_pct, 20.0);
    }

    #[test]
    fn default_toml_parses_back() {
        let toml_str = LoglensConfig::default_toml();
        let config: LoglensConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.charts.pie_top, 6);
        assert_eq!(config.web.listen, "127.0.0.1:9747");
    }
}
