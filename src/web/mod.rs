//! Embedded web dashboard for loglens.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - A single-page log dashboard rendered from precomputed chart geometry
//! - JSON API endpoints for query execution, summaries, timelines, drift,
//!   the hour-of-week grid, and chart geometry
//!
//! Launched via `loglens web` (default: `http://127.0.0.1:9747`).

mod api;
mod frontend;

use std::collections::HashMap;

use anyhow::Result;
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::config::LoglensConfig;

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the dashboard server on the configured address.
///
/// Blocks the current thread. Handles requests sequentially (sufficient for
/// a local single-user dashboard). Errors are answered per-request without
/// crashing the server — a bad query or an unreachable store must never
/// take the page down.
pub fn serve(cfg: &LoglensConfig) -> Result<()> {
    let addr = cfg.web.listen.clone();
    let server = Server::http(&addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("loglens dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    for request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let result = dispatch(cfg, &method, &url);

        match result {
            Ok(resp) => {
                let _ = request.respond(resp);
            }
            Err(e) => {
                let body = serde_json::json!({ "error": e.to_string() }).to_string();
                let resp = Response::from_data(body.into_bytes())
                    .with_header(content_type_json())
                    .with_status_code(StatusCode(500));
                let _ = request.respond(resp);
            }
        }

        println!(
            "{} {} {}",
            method,
            url,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

type ApiResponse = Response<std::io::Cursor<Vec<u8>>>;

fn dispatch(cfg: &LoglensConfig, method: &Method, url: &str) -> Result<ApiResponse> {
    let (path, params) = split_url(url);

    match (method, path) {
        (Method::Get, "/") | (Method::Get, "/index.html") => Ok(html_response(frontend::INDEX_HTML)),
        (Method::Get, "/api/health") => api::handle_health(cfg),
        (Method::Get, "/api/config") => api::handle_config(cfg),
        (Method::Get, "/api/query") => api::handle_query(cfg, &params),
        (Method::Get, "/api/hits") => api::handle_hits(cfg, &params),
        (Method::Get, "/api/summary") => api::handle_summary(cfg, &params),
        (Method::Get, "/api/timeline") => api::handle_timeline(cfg, &params),
        (Method::Get, "/api/grid") => api::handle_grid(cfg, &params),
        (Method::Get, "/api/drift") => api::handle_drift(cfg, &params),
        (Method::Get, "/api/charts") => api::handle_charts(cfg, &params),
        (Method::Get, "/api/alert-rules") => api::handle_alert_rules(cfg),
        _ => Ok(not_found()),
    }
}

// ---------------------------------------------------------------------------
// Query-string parsing
// ---------------------------------------------------------------------------

/// Split a request URL into its path and decoded query parameters.
fn split_url(url: &str) -> (&str, HashMap<String, String>) {
    match url.split_once('?') {
        Some((path, query)) => (path, parse_query_string(query)),
        None => (url, HashMap::new()),
    }
}

fn parse_query_string(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            Some((percent_decode(key), percent_decode(value)))
        })
        .collect()
}

/// Minimal percent-decoding: `+` becomes a space, `%XX` becomes the byte.
/// Malformed escapes pass through literally.
fn percent_decode(text: &str) -> String {
    let mut out = Vec::with_capacity(text.len());
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                if let (Some(hi), Some(lo)) = (
                    bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16)),
                    bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16)),
                ) {
                    out.push((hi * 16 + lo) as u8);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub(crate) fn content_type_json() -> Header {
    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .unwrap_or_else(|_| unreachable!("static header"))
}

fn html_response(body: &str) -> ApiResponse {
    let header = Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..])
        .unwrap_or_else(|_| unreachable!("static header"));
    Response::from_data(body.as_bytes().to_vec()).with_header(header)
}

fn not_found() -> ApiResponse {
    Response::from_data(b"not found".to_vec()).with_status_code(StatusCode(404))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
