//! Sample-log generator for demos and local testing.
//!
//! Produces realistic weighted log records (mostly DEBUG/INFO, a thin tail
//! of ERROR/FATAL) across a fleet of service names, spread over the
//! trailing hour, and inserts them into the store as NDJSON batches.

use anyhow::Result;
use chrono::{Duration, Utc};
use rand::prelude::*;
use serde_json::{Value, json};

use crate::client::LogStoreClient;

/// Records per insert request.
const BATCH_SIZE: usize = 100;

const SERVICES: &[&str] = &[
    "web-server",
    "api-gateway",
    "user-service",
    "payment-service",
    "notification-service",
    "database",
    "cache-service",
    "auth-service",
    "order-service",
    "inventory-service",
    "analytics-service",
    "email-service",
    "search-service",
    "fraud-detection",
    "scheduler-service",
    "webhook-handler",
];

const ENVIRONMENTS: &[&str] = &["production", "staging", "development"];

/// Cumulative level weights: DEBUG 30%, INFO 40%, WARN 20%, ERROR 8%,
/// FATAL 2%.
const LEVEL_WEIGHTS: &[(&str, u32)] = &[
    ("DEBUG", 30),
    ("INFO", 70),
    ("WARN", 90),
    ("ERROR", 98),
    ("FATAL", 100),
];

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate `count` sample records with timestamps in the trailing hour.
pub fn generate_records(count: usize) -> Vec<Value> {
    let mut rng = rand::rng();
    let now = Utc::now();

    (0..count)
        .map(|_| {
            let level = pick_level(&mut rng);
            let service = SERVICES.choose(&mut rng).copied().unwrap_or("web-server");
            let age = rng.random_range(0..3600);
            let timestamp = now - Duration::seconds(age);

            json!({
                "_time": timestamp.to_rfc3339(),
                "_msg": message_for(level, &mut rng),
                "level": level,
                "service": service,
                "host": format!("host-{}", rng.random_range(1..=10)),
                "environment": ENVIRONMENTS.choose(&mut rng).copied().unwrap_or("production"),
                "version": format!(
                    "v{}.{}.{}",
                    rng.random_range(1..=3),
                    rng.random_range(0..=9),
                    rng.random_range(0..=9)
                ),
                "request_id": format!("req_{}", rng.random_range(100_000..=999_999)),
            })
        })
        .collect()
}

fn pick_level(rng: &mut impl Rng) -> &'static str {
    let roll = rng.random_range(0..100);
    for (level, ceiling) in LEVEL_WEIGHTS {
        if roll < *ceiling {
            return level;
        }
    }
    "INFO"
}

fn message_for(level: &str, rng: &mut impl Rng) -> String {
    match level {
        "DEBUG" => match rng.random_range(0..4) {
            0 => format!(
                "Processing request for user user_{}",
                rng.random_range(1000..=9999)
            ),
            1 => format!(
                "Database query executed in {}ms",
                rng.random_range(10..=5000)
            ),
            2 => format!(
                "Cache hit for key cache_user_{}",
                rng.random_range(1..=1000)
            ),
            _ => "Validating input parameters".to_string(),
        },
        "INFO" => match rng.random_range(0..4) {
            0 => format!(
                "User user_{} logged in successfully",
                rng.random_range(1000..=9999)
            ),
            1 => format!(
                "Order ord_{} created successfully",
                rng.random_range(100_000..=999_999)
            ),
            2 => format!("Request completed in {}ms", rng.random_range(10..=5000)),
            _ => "Health check passed".to_string(),
        },
        "WARN" => match rng.random_range(0..4) {
            0 => format!(
                "High memory usage detected: {}%",
                rng.random_range(70..=95)
            ),
            1 => format!("Slow query detected: {}ms", rng.random_range(1000..=5000)),
            2 => format!(
                "Retry attempt {} for operation payment",
                rng.random_range(1..=5)
            ),
            _ => format!(
                "Disk space running low: {}% used",
                rng.random_range(80..=99)
            ),
        },
        "ERROR" => match rng.random_range(0..4) {
            0 => "Failed to connect to database: Connection timeout".to_string(),
            1 => format!(
                "Payment failed for order ord_{}: Service unavailable",
                rng.random_range(100_000..=999_999)
            ),
            2 => format!(
                "Timeout occurred while processing request req_{}",
                rng.random_range(100_000..=999_999)
            ),
            _ => format!(
                "External API call failed: upstream returned {}",
                [500, 502, 503, 504].choose(rng).copied().unwrap_or(500)
            ),
        },
        _ => match rng.random_range(0..3) {
            0 => "Database connection pool exhausted".to_string(),
            1 => "Out of memory error".to_string(),
            _ => format!(
                "Service crashed with exit code {}",
                [1, 2, 127, 137].choose(rng).copied().unwrap_or(1)
            ),
        },
    }
}

// ---------------------------------------------------------------------------
// Ingest
// ---------------------------------------------------------------------------

/// Generate `count` records and insert them in NDJSON batches.
/// Returns the number of records sent.
pub fn seed(client: &LogStoreClient, count: usize) -> Result<usize> {
    let records = generate_records(count);
    for batch in records.chunks(BATCH_SIZE) {
        let ndjson: String = batch
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        client.insert_jsonline(&ndjson)?;
    }
    Ok(records.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
