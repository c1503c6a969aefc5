//! Prometheus metrics for the tournament server.
//!
//! Metrics are exposed in Prometheus text format by a scrape listener that
//! is only started when `METRICS_BIND` (or `--metrics-bind`) is set. Without
//! an installed recorder every call here is a no-op.
//!
//! # Metrics Categories
//!
//! - **HTTP Metrics**: Request counts and duration
//! - **Tournament Metrics**: Tournaments generated, rounds advanced, scores entered
//! - **Session Metrics**: Sessions held in memory
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use md_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::tournaments_generated_total();
//! metrics::active_sessions(3);
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// HTTP Metrics
// ============================================================================

/// Record HTTP request.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

// ============================================================================
// Tournament Metrics
// ============================================================================

/// Increment tournaments generated counter.
pub fn tournaments_generated_total() {
    metrics::counter!("tournaments_generated_total").increment(1);
}

/// Increment round advance counter.
pub fn rounds_advanced_total(completed: bool) {
    metrics::counter!("rounds_advanced_total",
        "completed" => completed.to_string()
    )
    .increment(1);
}

/// Increment scores recorded counter.
pub fn scores_recorded_total() {
    metrics::counter!("scores_recorded_total").increment(1);
}

/// Increment failed pairing counter.
pub fn pairing_failures_total(kind: &str) {
    metrics::counter!("pairing_failures_total",
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// Record courts in use per generated tournament.
pub fn courts_per_tournament(courts: usize) {
    metrics::histogram!("courts_per_tournament").record(courts as f64);
}

// ============================================================================
// Session Metrics
// ============================================================================

/// Set current in-memory sessions count.
pub fn active_sessions(count: usize) {
    metrics::gauge!("active_sessions").set(count as f64);
}

/// Increment evicted sessions counter.
pub fn sessions_evicted_total() {
    metrics::counter!("sessions_evicted_total").increment(1);
}
