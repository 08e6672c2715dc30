//! JSON API handlers for the web dashboard.
//!
//! Each handler corresponds to an API endpoint and returns a
//! `Response<Cursor<Vec<u8>>>` with JSON (or text) content. All of them are
//! thin: fetch records through the transport adapter, run the aggregation
//! and geometry layers, serialize the result.

use std::collections::HashMap;
use std::io::Cursor;

use anyhow::Result;
use serde_json::json;
use tiny_http::{Header, Response, StatusCode};

use crate::aggregate::{HourOfWeekGrid, drift, frequency, rates, timeseries};
use crate::client::LogStoreClient;
use crate::config::LoglensConfig;
use crate::export;
use crate::geometry::{polar, stacked, treemap};
use crate::model::QueryRequest;
use crate::query;

use super::content_type_json;

type ApiResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Plumbing
// ---------------------------------------------------------------------------

fn json_response(value: &serde_json::Value) -> ApiResponse {
    Response::from_data(value.to_string().into_bytes()).with_header(content_type_json())
}

fn bad_request(message: &str) -> ApiResponse {
    Response::from_data(json!({ "error": message }).to_string().into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(400))
}

fn text_response(body: String, content_type: &str) -> ApiResponse {
    let header = Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes())
        .unwrap_or_else(|_| unreachable!("static header"));
    Response::from_data(body.into_bytes()).with_header(header)
}

/// Validate the query text and fetch matching records.
fn fetch(
    cfg: &LoglensConfig,
    params: &HashMap<String, String>,
) -> Result<std::result::Result<crate::client::QueryOutcome, ApiResponse>> {
    let query_text = params
        .get("query")
        .map(String::as_str)
        .unwrap_or(query::MATCH_ALL);

    let validation = query::validate(query_text);
    if !validation.valid {
        let reason = validation.error.unwrap_or_else(|| "invalid query".to_string());
        return Ok(Err(bad_request(&reason)));
    }

    let limit = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(cfg.query.default_limit);

    let client = LogStoreClient::from_config(&cfg.server);
    let mut request = QueryRequest::new(query_text).with_limit(limit).with_range(
        params.get("start").cloned(),
        params.get("end").cloned(),
    );
    request.offset = params.get("offset").and_then(|o| o.parse().ok());

    Ok(Ok(client.execute(&request)?))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub fn handle_health(cfg: &LoglensConfig) -> Result<ApiResponse> {
    let client = LogStoreClient::from_config(&cfg.server);
    Ok(json_response(&json!({
        "healthy": client.is_healthy(),
        "base_url": client.base_url(),
    })))
}

pub fn handle_config(cfg: &LoglensConfig) -> Result<ApiResponse> {
    Ok(json_response(&json!({
        "refresh_secs": cfg.query.dashboard_refresh_secs,
        "base_url": cfg.server.base_url,
        "default_limit": cfg.query.default_limit,
    })))
}

pub fn handle_query(cfg: &LoglensConfig, params: &HashMap<String, String>) -> Result<ApiResponse> {
    let outcome = match fetch(cfg, params)? {
        Ok(outcome) => outcome,
        Err(resp) => return Ok(resp),
    };
    Ok(json_response(&json!({
        "records": outcome.records,
        "stats": outcome.stats,
    })))
}

/// Pass through the store's own pre-aggregated hit counts.
pub fn handle_hits(cfg: &LoglensConfig, params: &HashMap<String, String>) -> Result<ApiResponse> {
    let query_text = params
        .get("query")
        .map(String::as_str)
        .unwrap_or(query::MATCH_ALL);
    let validation = query::validate(query_text);
    if !validation.valid {
        let reason = validation.error.unwrap_or_else(|| "invalid query".to_string());
        return Ok(bad_request(&reason));
    }

    let client = LogStoreClient::from_config(&cfg.server);
    let hits = client.hits(
        query_text,
        params.get("start").map(String::as_str),
        params.get("end").map(String::as_str),
    )?;
    Ok(json_response(&hits))
}

pub fn handle_summary(cfg: &LoglensConfig, params: &HashMap<String, String>) -> Result<ApiResponse> {
    let outcome = match fetch(cfg, params)? {
        Ok(outcome) => outcome,
        Err(resp) => return Ok(resp),
    };
    let records = &outcome.records;

    Ok(json_response(&json!({
        "total": records.len(),
        "levels": frequency::field_distribution(records, "level", cfg.charts.bar_top),
        "services": frequency::field_distribution(records, "service", cfg.charts.bar_top),
        "hosts": frequency::field_distribution(records, "host", cfg.charts.table_top),
        "error_rate": rates::error_rate(records),
        "gauges": rates::gauge_metrics(records),
        "stats": outcome.stats,
    })))
}

pub fn handle_timeline(
    cfg: &LoglensConfig,
    params: &HashMap<String, String>,
) -> Result<ApiResponse> {
    let outcome = match fetch(cfg, params)? {
        Ok(outcome) => outcome,
        Err(resp) => return Ok(resp),
    };

    let width = params
        .get("bucket_secs")
        .and_then(|b| b.parse().ok())
        .map(timeseries::BucketWidth::from_seconds)
        .unwrap_or(timeseries::BucketWidth::FiveMinutes);

    let buckets = timeseries::bucket_counts(&outcome.records, width);
    let groups = timeseries::grouped_bucket_counts(&outcome.records, "level", width);
    let stacked = stacked::stack_series(&groups);

    Ok(json_response(&json!({
        "bucket_secs": width.seconds(),
        "buckets": buckets,
        "stacked": stacked,
    })))
}

pub fn handle_grid(cfg: &LoglensConfig, params: &HashMap<String, String>) -> Result<ApiResponse> {
    let outcome = match fetch(cfg, params)? {
        Ok(outcome) => outcome,
        Err(resp) => return Ok(resp),
    };

    let grid = HourOfWeekGrid::from_records(&outcome.records);
    let intensity: Vec<Vec<u8>> = grid
        .cells
        .iter()
        .map(|row| row.iter().map(|&c| grid.intensity(c)).collect())
        .collect();

    Ok(json_response(&json!({
        "cells": grid.cells,
        "intensity": intensity,
        "peak": grid.peak,
        "total": grid.total(),
    })))
}

pub fn handle_drift(cfg: &LoglensConfig, params: &HashMap<String, String>) -> Result<ApiResponse> {
    let query_text = params
        .get("query")
        .map(String::as_str)
        .unwrap_or(query::MATCH_ALL);
    let validation = query::validate(query_text);
    if !validation.valid {
        let reason = validation.error.unwrap_or_else(|| "invalid query".to_string());
        return Ok(bad_request(&reason));
    }

    let client = LogStoreClient::from_config(&cfg.server);
    let now = chrono::Utc::now();
    let hour_ago = (now - chrono::Duration::hours(1)).to_rfc3339();
    let two_hours_ago = (now - chrono::Duration::hours(2)).to_rfc3339();

    let baseline = client.execute(
        &QueryRequest::new(query_text)
            .with_limit(cfg.query.default_limit)
            .with_range(Some(two_hours_ago), Some(hour_ago.clone())),
    )?;
    let current = client.execute(
        &QueryRequest::new(query_text)
            .with_limit(cfg.query.default_limit)
            .with_range(Some(hour_ago), Some(now.to_rfc3339())),
    )?;

    let rows = drift::compare(&baseline.records, &current.records, &cfg.drift);

    match params.get("format").map(String::as_str) {
        Some("csv") => Ok(text_response(export::drift_csv(&rows), "text/csv")),
        Some("snapshot") => Ok(text_response(
            export::drift_snapshot_json(&rows, query_text, &cfg.drift)?,
            "application/json",
        )),
        _ => Ok(json_response(&json!({
            "rows": rows,
            "thresholds": {
                "warning_pct": cfg.drift.warning_pct,
                "critical_pct": cfg.drift.critical_pct,
            },
        }))),
    }
}

pub fn handle_charts(cfg: &LoglensConfig, params: &HashMap<String, String>) -> Result<ApiResponse> {
    let outcome = match fetch(cfg, params)? {
        Ok(outcome) => outcome,
        Err(resp) => return Ok(resp),
    };
    let records = &outcome.records;

    let as_f64 = |entries: Vec<(String, usize)>| -> Vec<(String, f64)> {
        entries
            .into_iter()
            .map(|(label, count)| (label, count as f64))
            .collect()
    };

    let services = as_f64(frequency::field_distribution(
        records,
        "service",
        cfg.charts.pie_top,
    ));
    let levels = as_f64(frequency::field_distribution(
        records,
        "level",
        cfg.charts.donut_top,
    ));
    let treemap_items = as_f64(frequency::field_distribution(
        records,
        "service",
        cfg.charts.treemap_top,
    ));

    let gauges = rates::gauge_metrics(records);
    let radar_metrics: Vec<(String, f64)> =
        gauges.iter().map(|g| (g.name.clone(), g.value)).collect();

    Ok(json_response(&json!({
        "pie": polar::pie_slices(&services, 120.0, 120.0, 100.0),
        "donut": polar::donut_slices(&levels, 120.0, 120.0, 100.0, cfg.charts.donut_inner_ratio),
        "radar": polar::radar_polygon(&radar_metrics, 120.0, 120.0, 100.0),
        "treemap": treemap::layout(&treemap_items, 480.0, 300.0),
        "gauges": gauges,
    })))
}

pub fn handle_alert_rules(cfg: &LoglensConfig) -> Result<ApiResponse> {
    Ok(text_response(
        export::alert_rules(&cfg.drift),
        "text/plain; charset=utf-8",
    ))
}
