//! HTTP API for the tournament server.
//!
//! Each organizer's tournament lives in an in-memory [`SessionStore`] keyed by
//! the `x-session-id` header. The pairing engine itself is stateless between
//! requests; every handler that needs randomness builds a fresh OS-seeded
//! engine.
//!
//! # Modules
//!
//! - [`tournament`]: Tournament endpoints (generate, score, advance, results, state)
//! - [`session`]: Session id extraction and response stamping
//! - [`json`]: Request body extractor answering bad JSON with a 400
//! - [`request_id`]: Request id propagation, access log and request metrics
//!
//! # Endpoints Overview
//!
//! ```text
//! POST /api/generate_tournament   - Build a new schedule for this session
//! POST /api/update_score          - Enter one team's score
//! POST /api/advance_round         - Regenerate the next round with sit-out requests
//! GET  /api/calculate_results     - Ranked standings
//! GET  /api/get_tournament_state  - Whole session as JSON
//! GET  /api/test                  - Liveness message
//! GET  /health                    - Health check
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use md_server::api::{create_router, AppState};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let config: md_server::config::ServerConfig = unimplemented!();
//! let state = AppState::new(config);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5001").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is permissive; the scheduler is meant to be called from a browser
//! front end served elsewhere.

pub mod json;
pub mod request_id;
pub mod session;
pub mod tournament;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use mixed_doubles::{PairingError, SessionId, SessionStore, TournamentError};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::{config::ServerConfig, metrics};
use session::WithSession;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; both fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<SessionStore>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(SessionStore::new(config.max_sessions))),
            config: Arc::new(config),
        }
    }
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/generate_tournament", post(tournament::generate_tournament))
        .route("/update_score", post(tournament::update_score))
        .route("/advance_round", post(tournament::advance_round))
        .route("/calculate_results", get(tournament::calculate_results))
        .route("/get_tournament_state", get(tournament::get_tournament_state))
        .route("/test", get(api_test));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler error: status, client-safe message and the session to echo
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub session_id: Option<SessionId>,
}

impl ApiError {
    /// Map a tournament error to a response.
    ///
    /// User-correctable errors are 400 with the error's own message. Pairing
    /// defects are logged in full and answered with a generic 500.
    pub fn from_tournament(err: TournamentError, session_id: Option<SessionId>) -> Self {
        if let TournamentError::Pairing(pairing) = &err {
            let kind = match pairing {
                PairingError::InsufficientPlayers { .. } => "insufficient_players",
                PairingError::MatchGenerationFailed { .. } => "match_generation_failed",
            };
            metrics::pairing_failures_total(kind);
        }

        let status = if err.is_client_error() {
            tracing::warn!(session_id = ?session_id, "Request rejected: {}", err);
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(session_id = ?session_id, "Internal pairing failure: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        Self {
            status,
            error: err.client_message(),
            session_id,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        WithSession(
            self.session_id,
            (self.status, Json(ErrorResponse { error: self.error })),
        )
        .into_response()
    }
}

/// Liveness message for front ends checking the API is reachable
async fn api_test() -> impl IntoResponse {
    Json(json!({
        "message": "Mixed doubles scheduler API is running",
        "status": "ok",
    }))
}

/// Health check endpoint for monitoring and load balancers.
///
/// # Example
///
/// ```bash
/// curl http://localhost:5001/health
/// # {"status":"healthy","version":"0.1.0","sessions":3,"timestamp":"2026-05-02T19:30:00Z"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let sessions = state.sessions.read().await.len();

    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": sessions,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
