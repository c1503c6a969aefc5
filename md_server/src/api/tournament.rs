//! Tournament API handlers.
//!
//! These endpoints drive one organizer's tournament:
//! - Generating a schedule from the default club roster or a custom list
//! - Entering scores match by match
//! - Advancing to the next round, optionally resting players
//! - Reading standings and the whole session state
//!
//! # Examples
//!
//! Generate a tournament from nine default players:
//! ```bash
//! curl -X POST http://localhost:5001/api/generate_tournament \
//!   -H "Content-Type: application/json" \
//!   -d '{"courts": 2, "rounds": 4, "useDefaults": true, "totalPlayers": 9}'
//! ```
//!
//! Rest a player for the next round:
//! ```bash
//! curl -X POST http://localhost:5001/api/advance_round \
//!   -H "x-session-id: SESSION" \
//!   -H "Content-Type: application/json" \
//!   -d '{"skipPlayers": ["Maria"]}'
//! ```

use axum::{Json, extract::State, http::StatusCode};
use mixed_doubles::{
    AdvanceOutcome, NewTournament, PairingEngine, Player, PlayerStats, RosterSource, Schedule,
    ScoreEntry, TournamentConfig, TournamentError, TournamentSession,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{
    ApiError, AppState,
    json::ApiJson,
    request_id::RequestId,
    session::{SessionKey, WithSession},
};
use crate::{logging, metrics};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTournamentRequest {
    pub courts: Option<usize>,
    pub players: Option<Vec<Player>>,
    pub rounds: Option<usize>,
    pub use_defaults: Option<bool>,
    pub total_players: Option<usize>,
    #[serde(rename = "avoidMMvsFF")]
    pub avoid_mm_vs_ff: Option<bool>,
    pub use_rating_balance: Option<bool>,
    pub rating_factor: Option<f64>,
    pub round_duration: Option<u32>,
}

impl GenerateTournamentRequest {
    /// Fill unset fields from the server's defaults
    fn into_new_tournament(self, state: &AppState) -> NewTournament {
        let defaults = &state.config.tournament_defaults;
        let base = TournamentConfig::default();

        let config = TournamentConfig {
            courts: self.courts.unwrap_or(defaults.courts),
            rounds: self.rounds.unwrap_or(defaults.rounds),
            round_duration: self.round_duration.unwrap_or(defaults.round_duration),
            avoid_mm_vs_ff: self.avoid_mm_vs_ff.unwrap_or(base.avoid_mm_vs_ff),
            use_rating_balance: self.use_rating_balance.unwrap_or(base.use_rating_balance),
            rating_factor: self.rating_factor.unwrap_or(defaults.rating_factor),
        };

        let roster = if self.use_defaults.unwrap_or(true) {
            RosterSource::Defaults
        } else {
            RosterSource::Custom(self.players.unwrap_or_default())
        };

        NewTournament {
            config,
            roster,
            total_players: self.total_players.unwrap_or(defaults.total_players),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateTournamentResponse {
    pub success: bool,
    pub schedule: Schedule,
    pub players: Vec<Player>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceRoundRequest {
    #[serde(default)]
    pub skip_players: Vec<String>,
}

/// Build a new tournament for the caller's session.
///
/// Replaces any tournament the session already had. Requests without an
/// `x-session-id` header get a fresh id, returned in the response header.
///
/// # Response
///
/// Returns `200 OK` with `{"success": true, "schedule": {...}, "players": [...]}`.
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body, invalid settings, more rounds than
///   `MAX_ROUNDS`, or not enough players for the courts
/// - `500 Internal Server Error`: The engine produced an invalid round
pub async fn generate_tournament(
    State(state): State<AppState>,
    request_id: RequestId,
    key: SessionKey,
    ApiJson(request): ApiJson<GenerateTournamentRequest>,
) -> Result<WithSession<Json<GenerateTournamentResponse>>, ApiError> {
    let session_id = key.or_new();
    let new_tournament = request.into_new_tournament(&state);
    let courts = new_tournament.config.courts;

    let max_rounds = state.config.max_rounds;
    if new_tournament.config.rounds > max_rounds {
        return Err(ApiError::from_tournament(
            TournamentError::InvalidInput(format!("rounds must be at most {}", max_rounds)),
            Some(session_id),
        ));
    }

    let mut engine = PairingEngine::new();
    let session = TournamentSession::create(&mut engine, new_tournament)
        .map_err(|e| ApiError::from_tournament(e, Some(session_id)))?;

    let response = GenerateTournamentResponse {
        success: true,
        schedule: session.schedule().clone(),
        players: session.schedule().players.clone(),
    };

    let (evicted, active) = {
        let mut sessions = state.sessions.write().await;
        let evicted = sessions.insert(session_id, session);
        (evicted, sessions.len())
    };

    if evicted.is_some() {
        metrics::sessions_evicted_total();
    }
    metrics::tournaments_generated_total();
    metrics::courts_per_tournament(courts);
    metrics::active_sessions(active);

    logging::log_tournament_event(
        "generated",
        &session_id.to_string(),
        &format!(
            "{} players, {} courts, {} rounds (request {})",
            response.players.len(),
            courts,
            response.schedule.len(),
            request_id.as_str()
        ),
    );

    Ok(WithSession(Some(session_id), Json(response)))
}

/// Enter one team's score for a scheduled match.
///
/// # Request Body
///
/// ```json
/// {"roundIndex": 0, "matchIndex": 1, "team": "teamA", "score": 11}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body, no tournament for this session, or no
///   such round/match
pub async fn update_score(
    State(state): State<AppState>,
    key: SessionKey,
    ApiJson(entry): ApiJson<ScoreEntry>,
) -> Result<WithSession<Json<Value>>, ApiError> {
    let session_id = key.id();
    let id = session_id.ok_or_else(|| {
        ApiError::from_tournament(TournamentError::NoTournamentData, None)
    })?;

    {
        let mut sessions = state.sessions.write().await;
        sessions
            .get_mut(&id)
            .and_then(|session| session.record_score(entry))
            .map_err(|e| ApiError::from_tournament(e, session_id))?;
    }

    metrics::scores_recorded_total();
    tracing::debug!(
        session_id = %id,
        "Score {} for {} in round {} match {}",
        entry.score,
        entry.team,
        entry.round_index,
        entry.match_index
    );

    Ok(WithSession(session_id, Json(json!({ "success": true }))))
}

/// Regenerate the next round, resting the named players.
///
/// # Response
///
/// - `{"success": true, "round": N}` when round `N` is now current
/// - `{"completed": true}` when the last round was already current
///
/// # Errors
///
/// - `400 Bad Request`: No tournament, unknown skip names, or too few players left
/// - `500 Internal Server Error`: The engine produced an invalid round
pub async fn advance_round(
    State(state): State<AppState>,
    key: SessionKey,
    ApiJson(request): ApiJson<AdvanceRoundRequest>,
) -> Result<WithSession<Json<Value>>, ApiError> {
    let session_id = key.id();
    let id = session_id.ok_or_else(|| {
        ApiError::from_tournament(TournamentError::NoTournamentData, None)
    })?;

    let outcome = {
        let mut sessions = state.sessions.write().await;
        let mut engine = PairingEngine::new();
        sessions
            .get_mut(&id)
            .and_then(|session| session.advance_round(&mut engine, &request.skip_players))
            .map_err(|e| ApiError::from_tournament(e, session_id))?
    };

    let body = match outcome {
        AdvanceOutcome::Advanced { round } => {
            metrics::rounds_advanced_total(false);
            logging::log_tournament_event(
                "advanced",
                &id.to_string(),
                &format!(
                    "round {} with {} resting",
                    round + 1,
                    request.skip_players.len()
                ),
            );
            json!({ "success": true, "round": round })
        }
        AdvanceOutcome::Completed => {
            metrics::rounds_advanced_total(true);
            logging::log_tournament_event("completed", &id.to_string(), "no rounds left");
            json!({ "completed": true })
        }
    };

    Ok(WithSession(session_id, Json(body)))
}

/// Ranked standings over every fully scored match.
///
/// # Errors
///
/// - `400 Bad Request`: No tournament for this session
pub async fn calculate_results(
    State(state): State<AppState>,
    key: SessionKey,
) -> Result<WithSession<Json<Vec<PlayerStats>>>, ApiError> {
    let session_id = key.id();
    let id = session_id.ok_or_else(|| {
        ApiError::from_tournament(TournamentError::NoTournamentData, None)
    })?;

    let sessions = state.sessions.read().await;
    let standings = sessions
        .get(&id)
        .map(|session| session.results())
        .map_err(|e| ApiError::from_tournament(e, session_id))?;

    Ok(WithSession(session_id, Json(standings)))
}

/// The whole session: schedule, settings, scores and round cursor.
///
/// A session without a tournament answers `200 OK` with null fields so a
/// front end can poll it before generating.
pub async fn get_tournament_state(
    State(state): State<AppState>,
    key: SessionKey,
) -> (StatusCode, WithSession<Json<Value>>) {
    let session_id = key.id();
    let sessions = state.sessions.read().await;

    let snapshot = session_id
        .and_then(|id| sessions.get(&id).ok())
        .map(|session| session.snapshot());

    let body = match snapshot.map(serde_json::to_value) {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            tracing::error!("Failed to serialize tournament state: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                WithSession(
                    session_id,
                    Json(json!({ "error": "Failed to read tournament state" })),
                ),
            );
        }
        None => json!({
            "tournament": null,
            "config": null,
            "scores": {},
            "currentRound": 0,
        }),
    };

    (StatusCode::OK, WithSession(session_id, Json(body)))
}
