//! loglens — explore and visualize logs from a VictoriaLogs-compatible store.
//!
//! The crate is organized as four core layers plus surrounding surfaces:
//!
//! - [`query`] — filter clause model, query assembly/parsing/validation
//! - [`client`] — HTTP transport adapter with response-shape normalization
//! - [`aggregate`] — frequency counts, time buckets, grids, rates, drift
//! - [`geometry`] — pie/donut/radar, stacked series, treemap layout
//!
//! The [`cli`] and [`web`] modules drive these layers from the terminal and
//! the embedded dashboard respectively; [`config`] supplies the layered
//! TOML configuration, [`export`] the drift serializations, and [`seed`]
//! the sample-log generator.

pub mod aggregate;
pub mod cli;
pub mod client;
pub mod config;
pub mod export;
pub mod geometry;
pub mod model;
pub mod query;
pub mod seed;
pub mod web;
