//! Mixed doubles tournament server.
//!
//! Serves the scheduler API over HTTP with tournaments kept in memory per
//! session.

use std::net::SocketAddr;

use anyhow::Error;
use ctrlc::set_handler;
use md_server::{api, config::ServerConfig, logging, metrics};
use pico_args::Arguments;
use tracing::info;

const HELP: &str = "\
Run the mixed doubles tournament scheduler

USAGE:
  md_server [OPTIONS]

OPTIONS:
  --bind          IP:PORT  Server socket bind address  [default: env SERVER_BIND, PORT or 127.0.0.1:5001]
  --metrics-bind  IP:PORT  Prometheus scrape address   [default: env METRICS_BIND, disabled if unset]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  PORT                     Port on all interfaces when SERVER_BIND is unset
  METRICS_BIND             Prometheus exporter address
  MAX_SESSIONS             Tournaments kept in memory [default: 1000]
  MAX_ROUNDS               Most rounds a tournament may request [default: 100]
  DEFAULT_COURTS           Courts when a request leaves them out [default: 2]
  DEFAULT_ROUNDS           Rounds when a request leaves them out [default: 6]
  DEFAULT_TOTAL_PLAYERS    Players when a request leaves them out [default: 8]
  DEFAULT_ROUND_DURATION   Round length in minutes [default: 13]
  DEFAULT_RATING_FACTOR    Rating preference weight [default: 3]
  RUST_LOG                 Log filter [default: info]
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let metrics_bind: Option<SocketAddr> = pargs.opt_value_from_str("--metrics-bind")?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();

    let config = ServerConfig::from_env(bind, metrics_bind)?;
    config.validate()?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        info!("Prometheus metrics available at http://{}/metrics", addr);
    }

    info!(
        "Tournament defaults: {} courts, {} rounds, {} players; keeping up to {} sessions",
        config.tournament_defaults.courts,
        config.tournament_defaults.rounds,
        config.tournament_defaults.total_players,
        config.max_sessions
    );

    let bind = config.bind;
    let app = api::create_router(api::AppState::new(config));

    info!("Starting HTTP server on {}", bind);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", bind, e))?;

    info!("Server is running at http://{}. Press Ctrl+C to stop.", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for CTRL+C: {}", e);
    }
}
