use anyhow::Result;
use clap::{Parser, Subcommand};

use loglens::cli::{self, OutputFormat};
use loglens::config;
use loglens::web;

#[derive(Debug, Parser)]
#[command(name = "loglens")]
#[command(about = "Explore and visualize logs from a VictoriaLogs-compatible store")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Execute a query and print the matching records
    Query {
        /// The query text (builder syntax or free text); `*` matches all
        #[arg(default_value = "*")]
        query: String,
        /// Maximum number of records to return
        #[arg(long)]
        limit: Option<usize>,
        /// Inclusive range start (RFC 3339)
        #[arg(long)]
        start: Option<String>,
        /// Inclusive range end (RFC 3339)
        #[arg(long)]
        end: Option<String>,
        /// Result offset for paging
        #[arg(long)]
        offset: Option<usize>,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Re-run the query at the configured refresh interval
        #[arg(long)]
        watch: bool,
    },
    /// List known field names
    Fields,
    /// List observed values for one field
    Values {
        /// The field to enumerate
        field: String,
        /// Maximum number of values to return
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Aggregated summary: distributions, error rate, gauges
    Summary {
        #[arg(default_value = "*")]
        query: String,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Compare the current period against a baseline period
    Drift {
        #[arg(default_value = "*")]
        query: String,
        /// Baseline period start (RFC 3339; default: two hours ago)
        #[arg(long)]
        baseline_start: Option<String>,
        /// Baseline period end (RFC 3339; default: one hour ago)
        #[arg(long)]
        baseline_end: Option<String>,
        /// Current period start (RFC 3339; default: one hour ago)
        #[arg(long)]
        current_start: Option<String>,
        /// Current period end (RFC 3339; default: now)
        #[arg(long)]
        current_end: Option<String>,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Print alerting rules for the configured drift thresholds
    AlertRules,
    /// Check connectivity to the log store
    Health,
    /// Insert generated sample logs into the store
    Seed {
        /// Number of records to generate
        #[arg(long, default_value = "1000")]
        count: usize,
    },
    /// Serve the embedded web dashboard
    Web {
        /// Listen address (overrides the configured one)
        #[arg(long)]
        listen: Option<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the resolved configuration
    Show,
    /// Write the annotated default config to ~/.loglens/config.toml
    Init,
}

fn main() -> Result<()> {
    let cfg = config::load();
    let app = App::parse();

    match app.command {
        Commands::Query {
            query,
            limit,
            start,
            end,
            offset,
            format,
            watch,
        } => cli::run_query(
            &cfg,
            &query,
            limit,
            start,
            end,
            offset,
            OutputFormat::from_str_opt(Some(&format)),
            watch,
        ),
        Commands::Fields => cli::run_fields(&cfg),
        Commands::Values { field, limit } => cli::run_values(&cfg, &field, limit),
        Commands::Summary { query, format } => {
            cli::run_summary(&cfg, &query, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Drift {
            query,
            baseline_start,
            baseline_end,
            current_start,
            current_end,
            format,
        } => cli::run_drift(
            &cfg,
            &query,
            baseline_start,
            baseline_end,
            current_start,
            current_end,
            OutputFormat::from_str_opt(Some(&format)),
        ),
        Commands::AlertRules => cli::run_alert_rules(&cfg),
        Commands::Health => cli::run_health(&cfg),
        Commands::Seed { count } => cli::run_seed(&cfg, count),
        Commands::Web { listen } => {
            let mut cfg = cfg;
            if let Some(listen) = listen {
                cfg.web.listen = listen;
            }
            web::serve(&cfg)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(&cfg),
            ConfigAction::Init => cli::run_config_init(),
        },
    }
}
