//! CLI command implementations for loglens.
//!
//! Provides subcommand handlers for:
//! - `loglens query` — execute a query, print records (optionally on a watch loop)
//! - `loglens fields` / `loglens values` — field discovery for autocomplete
//! - `loglens summary` — level/service/host distributions, error rate, gauges
//! - `loglens drift` — period-over-baseline comparison with exports
//! - `loglens alert-rules` — alerting-rule text from the configured thresholds
//! - `loglens health` — store connectivity check
//! - `loglens seed` — insert generated sample logs
//! - `loglens config show|init` — configuration management

use std::thread;
use std::time::Duration;

use anyhow::{Result, bail};
use colored::Colorize;

use crate::aggregate::{drift, frequency, rates};
use crate::client::{LogStoreClient, QueryOutcome};
use crate::config::{self, LoglensConfig};
use crate::export;
use crate::model::{LogRecord, QueryRequest};
use crate::query;
use crate::seed;

/// Output format for commands that support more than a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// loglens query
// ---------------------------------------------------------------------------

/// Execute a query and print the result. With `watch`, re-issue it at the
/// configured explore cadence until interrupted; each newer result replaces
/// the previous wholesale.
#[allow(clippy::too_many_arguments)]
pub fn run_query(
    cfg: &LoglensConfig,
    query_text: &str,
    limit: Option<usize>,
    start: Option<String>,
    end: Option<String>,
    offset: Option<usize>,
    format: OutputFormat,
    watch: bool,
) -> Result<()> {
    let validation = query::validate(query_text);
    if !validation.valid {
        bail!(
            "invalid query: {}",
            validation.error.unwrap_or_else(|| "unknown".to_string())
        );
    }

    let client = LogStoreClient::from_config(&cfg.server);
    let mut request = QueryRequest::new(query_text)
        .with_limit(limit.unwrap_or(cfg.query.default_limit))
        .with_range(start, end);
    request.offset = offset;

    loop {
        let outcome = client.execute(&request)?;
        print_outcome(&outcome, format)?;

        if !watch {
            return Ok(());
        }
        thread::sleep(Duration::from_secs(cfg.query.explore_refresh_secs));
        println!(
            "\n{} {}",
            "refreshed".dimmed(),
            chrono::Local::now().format("%H:%M:%S").to_string().dimmed()
        );
    }
}

fn print_outcome(outcome: &QueryOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome.records)?);
        }
        OutputFormat::Csv => {
            println!("time,level,service,host,message");
            for record in &outcome.records {
                println!(
                    "{},{},{},{},{}",
                    record.timestamp,
                    record.level(),
                    record.service(),
                    record.field("host"),
                    record.message.replace(',', ";"),
                );
            }
        }
        OutputFormat::Table => print_record_table(&outcome.records),
    }

    if format == OutputFormat::Table {
        println!(
            "{}",
            format!(
                "{} rows, {} bytes scanned",
                outcome.stats.rows, outcome.stats.bytes
            )
            .dimmed()
        );
    }
    Ok(())
}

fn print_record_table(records: &[LogRecord]) {
    if records.is_empty() {
        println!("{}", "No matching records.".yellow());
        return;
    }

    println!(
        "  {:<25} {:<8} {:<20} Message",
        "Time".bold(),
        "Level".bold(),
        "Service".bold()
    );
    println!("  {}", "-".repeat(90));
    for record in records {
        let level = record.level();
        let colored_level = match level.to_ascii_uppercase().as_str() {
            "ERROR" | "FATAL" | "CRITICAL" => level.red().to_string(),
            "WARN" | "WARNING" => level.yellow().to_string(),
            "DEBUG" => level.dimmed().to_string(),
            _ => level.clone(),
        };
        println!(
            "  {:<25} {:<8} {:<20} {}",
            truncate(&record.timestamp, 25),
            colored_level,
            truncate(&record.service(), 20),
            truncate(&record.message, 60),
        );
    }
}

// ---------------------------------------------------------------------------
// loglens fields / values
// ---------------------------------------------------------------------------

/// List known field names. Discovery is best-effort; an unreachable store
/// prints an empty-list notice rather than failing.
pub fn run_fields(cfg: &LoglensConfig) -> Result<()> {
    let client = LogStoreClient::from_config(&cfg.server);
    let names = client.field_names();
    if names.is_empty() {
        println!("{}", "No fields discovered.".yellow());
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}

/// List observed values for one field.
pub fn run_values(cfg: &LoglensConfig, field: &str, limit: Option<usize>) -> Result<()> {
    let client = LogStoreClient::from_config(&cfg.server);
    let values = client.field_values(field, limit.unwrap_or(cfg.query.values_limit));
    if values.is_empty() {
        println!("{}", format!("No values discovered for {field}.").yellow());
    } else {
        for value in values {
            println!("{value}");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// loglens summary
// ---------------------------------------------------------------------------

/// Fetch records for a query and print the aggregated dashboard summary.
pub fn run_summary(cfg: &LoglensConfig, query_text: &str, format: OutputFormat) -> Result<()> {
    let client = LogStoreClient::from_config(&cfg.server);
    let outcome = client.execute(&QueryRequest::new(query_text).with_limit(cfg.query.default_limit))?;
    let records = &outcome.records;

    let levels = frequency::field_distribution(records, "level", cfg.charts.bar_top);
    let services = frequency::field_distribution(records, "service", cfg.charts.bar_top);
    let hosts = frequency::field_distribution(records, "host", cfg.charts.table_top);
    let errors = rates::error_rate(records);
    let gauges = rates::gauge_metrics(records);

    if format == OutputFormat::Json {
        let value = serde_json::json!({
            "total": records.len(),
            "levels": levels,
            "services": services,
            "hosts": hosts,
            "error_rate": errors,
            "gauges": gauges,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Log Summary".bold().cyan());
    println!("{}", "=".repeat(50));
    println!("  {} {}", "Total records:".bold(), records.len());
    println!(
        "  {} {:.1}% ({} errors, trend {:?})",
        "Error rate:   ".bold(),
        errors.rate_pct,
        errors.error_count,
        errors.trend,
    );
    println!();

    print_distribution("By level", &levels);
    print_distribution("By service", &services);
    print_distribution("By host", &hosts);

    println!("{}", "Gauges".bold().cyan());
    for gauge in &gauges {
        let value = format!("{:.1}", gauge.value);
        let colored_value = match gauge.color {
            rates::GaugeColor::Green => value.green(),
            rates::GaugeColor::Yellow => value.yellow(),
            rates::GaugeColor::Red => value.red(),
        };
        println!("  {:<16} {colored_value}", gauge.name);
    }
    Ok(())
}

fn print_distribution(title: &str, entries: &[(String, usize)]) {
    println!("{}", title.bold().cyan());
    if entries.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (label, count) in entries {
        println!("  {:<24} {count:>8}", truncate(label, 24));
    }
    println!();
}

// ---------------------------------------------------------------------------
// loglens drift
// ---------------------------------------------------------------------------

/// Compare the current period against a baseline period for one query.
///
/// Defaults: current = the trailing hour, baseline = the hour before it.
#[allow(clippy::too_many_arguments)]
pub fn run_drift(
    cfg: &LoglensConfig,
    query_text: &str,
    baseline_start: Option<String>,
    baseline_end: Option<String>,
    current_start: Option<String>,
    current_end: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let client = LogStoreClient::from_config(&cfg.server);

    let now = chrono::Utc::now();
    let hour_ago = (now - chrono::Duration::hours(1)).to_rfc3339();
    let two_hours_ago = (now - chrono::Duration::hours(2)).to_rfc3339();
    let now = now.to_rfc3339();

    let baseline = client.execute(
        &QueryRequest::new(query_text)
            .with_limit(cfg.query.default_limit)
            .with_range(
                Some(baseline_start.unwrap_or(two_hours_ago)),
                Some(baseline_end.unwrap_or_else(|| hour_ago.clone())),
            ),
    )?;
    let current = client.execute(
        &QueryRequest::new(query_text)
            .with_limit(cfg.query.default_limit)
            .with_range(
                Some(current_start.unwrap_or(hour_ago)),
                Some(current_end.unwrap_or(now)),
            ),
    )?;

    let rows = drift::compare(&baseline.records, &current.records, &cfg.drift);

    match format {
        OutputFormat::Csv => print!("{}", export::drift_csv(&rows)),
        OutputFormat::Json => println!(
            "{}",
            export::drift_snapshot_json(&rows, query_text, &cfg.drift)?
        ),
        OutputFormat::Table => print_drift_table(&rows),
    }
    Ok(())
}

fn print_drift_table(rows: &[drift::DriftRecord]) {
    if rows.is_empty() {
        println!("{}", "No records in either period.".yellow());
        return;
    }

    println!("{}", "Drift: current period vs baseline".bold().cyan());
    println!(
        "  {:<20} {:<10} {:>9} {:>9} {:>7} {:>9}  Severity",
        "Service", "Level", "Baseline", "Current", "Delta", "Change"
    );
    println!("  {}", "-".repeat(78));
    for row in rows {
        let pct = row
            .pct_change
            .map(|p| format!("{p:+.1}%"))
            .unwrap_or_else(|| "new".to_string());
        let severity = match row.severity {
            drift::DriftSeverity::Normal => "normal".green().to_string(),
            drift::DriftSeverity::Warning => "warning".yellow().to_string(),
            drift::DriftSeverity::Critical => "critical".red().to_string(),
        };
        println!(
            "  {:<20} {:<10} {:>9} {:>9} {:>+7} {:>9}  {severity}",
            truncate(&row.service, 20),
            truncate(&row.level, 10),
            row.baseline,
            row.current,
            row.delta,
            pct,
        );
    }
}

// ---------------------------------------------------------------------------
// loglens alert-rules
// ---------------------------------------------------------------------------

/// Print the alerting-rule block for the configured thresholds.
pub fn run_alert_rules(cfg: &LoglensConfig) -> Result<()> {
    print!("{}", export::alert_rules(&cfg.drift));
    Ok(())
}

// ---------------------------------------------------------------------------
// loglens health
// ---------------------------------------------------------------------------

/// Check connectivity to the configured store.
pub fn run_health(cfg: &LoglensConfig) -> Result<()> {
    let client = LogStoreClient::from_config(&cfg.server);
    if client.is_healthy() {
        println!("{} {}", "ok".green().bold(), client.base_url());
        Ok(())
    } else {
        bail!("log store at {} is unreachable", client.base_url())
    }
}

// ---------------------------------------------------------------------------
// loglens seed
// ---------------------------------------------------------------------------

/// Generate and insert sample logs.
pub fn run_seed(cfg: &LoglensConfig, count: usize) -> Result<()> {
    let client = LogStoreClient::from_config(&cfg.server);
    let sent = seed::seed(&client, count)?;
    println!("{} inserted {sent} sample records", "ok".green().bold());
    Ok(())
}

// ---------------------------------------------------------------------------
// loglens config
// ---------------------------------------------------------------------------

/// Print the resolved configuration as TOML.
pub fn run_config_show(cfg: &LoglensConfig) -> Result<()> {
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}

/// Write the annotated default config to the global path, unless present.
pub fn run_config_init() -> Result<()> {
    let Some(path) = config::global_config_file() else {
        bail!("could not determine the home directory");
    };
    if path.exists() {
        bail!("config already exists at {}", path.display());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, LoglensConfig::default_toml())?;
    println!("{} wrote {}", "ok".green().bold(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::from_str_opt(Some("table")),
            OutputFormat::Table
        );
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
    }

    #[test]
    fn truncate_preserves_short_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn truncate_cuts_long_text() {
        let cut = truncate("a-very-long-service-name", 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }
}
