//! HTTP server for the mixed doubles scheduler.
//!
//! Wraps the `mixed_doubles` library in a JSON API with per-organizer
//! sessions, structured logging and optional Prometheus metrics.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
