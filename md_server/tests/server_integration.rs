//! Integration tests for the HTTP API.
//!
//! Drives the full router (middleware included) with `oneshot` requests
//! against a shared in-memory session store.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use md_server::api::{AppState, create_router, session::SESSION_ID_HEADER};
use md_server::config::ServerConfig;
use serde_json::{Value, json};
use tower::ServiceExt; // For `oneshot` method

/// Helper to create a router with default configuration
fn create_test_server() -> axum::Router {
    let config = ServerConfig::from_lookup(|_| None, None, None).expect("default config");
    create_router(AppState::new(config))
}

/// Send a request and return status, session header and JSON body
async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    session: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = session {
        builder = builder.header(SESSION_ID_HEADER, id);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let session = response
        .headers()
        .get(SESSION_ID_HEADER)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, session, body)
}

/// Generate a default-roster tournament and return its session id and body
async fn generate(app: &axum::Router, body: Value) -> (String, Value) {
    let (status, session, body) =
        send(app, "POST", "/api/generate_tournament", None, Some(body)).await;
    assert_eq!(status, StatusCode::OK, "generate failed: {}", body);
    (session.expect("session header"), body)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_test_server();

    let (status, _, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["sessions"], 0);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_api_test_endpoint() {
    let app = create_test_server();

    let (status, _, body) = send(&app, "GET", "/api/test", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = create_test_server();

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "club-night-1")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers().get("x-request-id").unwrap(), "club-night-1");
}

// ============================================================================
// Tournament Flow Tests
// ============================================================================

#[tokio::test]
async fn test_generate_mints_session_and_returns_schedule() {
    let app = create_test_server();

    let (session, body) = generate(&app, json!({ "courts": 2, "rounds": 3 })).await;
    assert!(uuid::Uuid::parse_str(&session).is_ok());
    assert_eq!(body["success"], true);
    assert_eq!(body["players"].as_array().unwrap().len(), 8);

    let rounds = body["schedule"]["rounds"].as_array().unwrap();
    assert_eq!(rounds.len(), 3);
    for round in rounds {
        assert_eq!(round["matches"].as_array().unwrap().len(), 2);
        assert!(round["sittingOut"].as_array().unwrap().is_empty());
    }

    let (_, _, health) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(health["sessions"], 1);
}

#[tokio::test]
async fn test_generate_keeps_caller_session_id() {
    let app = create_test_server();
    let id = uuid::Uuid::new_v4().to_string();

    let (status, session, _) = send(
        &app,
        "POST",
        "/api/generate_tournament",
        Some(&id),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session.as_deref(), Some(id.as_str()));
}

#[tokio::test]
async fn test_generate_score_advance_results() {
    let app = create_test_server();
    let (session, _) = generate(
        &app,
        json!({ "courts": 2, "rounds": 3, "useDefaults": true, "totalPlayers": 9 }),
    )
    .await;
    let session = Some(session.as_str());

    for (match_index, (a, b)) in [(11, 7), (9, 11)].into_iter().enumerate() {
        for (team, score) in [("teamA", a), ("teamB", b)] {
            let (status, _, body) = send(
                &app,
                "POST",
                "/api/update_score",
                session,
                Some(json!({
                    "roundIndex": 0,
                    "matchIndex": match_index,
                    "team": team,
                    "score": score
                })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["success"], true);
        }
    }

    let (_, _, state) = send(&app, "GET", "/api/get_tournament_state", session, None).await;
    let resting = state["tournament"]["rounds"][0]["matches"][0]["teamA"][0]["name"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/advance_round",
        session,
        Some(json!({ "skipPlayers": [resting] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["round"], 1);

    let (_, _, state) = send(&app, "GET", "/api/get_tournament_state", session, None).await;
    assert_eq!(state["currentRound"], 1);
    assert_eq!(state["tournament"]["rounds"][1]["sittingOut"], json!([resting]));
    assert_eq!(state["scores"]["0"]["0"]["teamA"], 11);
    assert_eq!(state["config"]["avoidMMvsFF"], true);

    let (status, _, standings) =
        send(&app, "GET", "/api/calculate_results", session, None).await;
    assert_eq!(status, StatusCode::OK);
    let standings = standings.as_array().unwrap();
    assert_eq!(standings.len(), 9);
    assert_eq!(standings[0]["totalScore"], 11);
    assert_eq!(standings[0]["averageScore"], 11.0);

    let played: u64 = standings
        .iter()
        .map(|s| s["matchesPlayed"].as_u64().unwrap())
        .sum();
    let wins: u64 = standings.iter().map(|s| s["wins"].as_u64().unwrap()).sum();
    assert_eq!(played, 8);
    assert_eq!(wins, 4);
}

#[tokio::test]
async fn test_advance_past_last_round_completes() {
    let app = create_test_server();
    let (session, _) = generate(&app, json!({ "courts": 1, "rounds": 2, "totalPlayers": 4 })).await;
    let session = Some(session.as_str());

    let (_, _, body) = send(&app, "POST", "/api/advance_round", session, Some(json!({}))).await;
    assert_eq!(body["round"], 1);

    let (status, _, body) =
        send(&app, "POST", "/api/advance_round", session, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "completed": true }));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn test_insufficient_players_is_bad_request() {
    let app = create_test_server();

    let (status, session, body) = send(
        &app,
        "POST",
        "/api/generate_tournament",
        None,
        Some(json!({ "courts": 2, "totalPlayers": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(session.is_some());
    assert_eq!(body["error"], "Not enough players available. Need 8, have 5");
}

#[tokio::test]
async fn test_custom_roster_too_short_is_bad_request() {
    let app = create_test_server();

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/generate_tournament",
        None,
        Some(json!({
            "courts": 1,
            "useDefaults": false,
            "totalPlayers": 4,
            "players": [
                {"name": "Ana", "gender": "F", "rating": 3.5},
                {"name": "Ben", "gender": "M", "rating": 3.0}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Need 4 players, got 2"));
}

#[tokio::test]
async fn test_requests_without_tournament() {
    let app = create_test_server();
    let unknown = uuid::Uuid::new_v4().to_string();

    let (status, _, body) =
        send(&app, "POST", "/api/advance_round", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No tournament data");

    let (status, session, body) =
        send(&app, "GET", "/api/calculate_results", Some(&unknown), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(session.as_deref(), Some(unknown.as_str()));
    assert_eq!(body["error"], "No tournament data");

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/update_score",
        Some(&unknown),
        Some(json!({ "roundIndex": 0, "matchIndex": 0, "team": "teamA", "score": 11 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No tournament data");
}

#[tokio::test]
async fn test_state_without_tournament_is_empty() {
    let app = create_test_server();

    let (status, _, body) = send(&app, "GET", "/api/get_tournament_state", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["tournament"].is_null());
    assert!(body["config"].is_null());
    assert_eq!(body["scores"], json!({}));
    assert_eq!(body["currentRound"], 0);
}

#[tokio::test]
async fn test_score_for_missing_match_is_bad_request() {
    let app = create_test_server();
    let (session, _) = generate(&app, json!({ "courts": 2, "rounds": 2 })).await;

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/update_score",
        Some(&session),
        Some(json!({ "roundIndex": 0, "matchIndex": 5, "team": "teamB", "score": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
}

#[tokio::test]
async fn test_unknown_skip_player_is_bad_request() {
    let app = create_test_server();
    let (session, _) = generate(&app, json!({ "courts": 2, "rounds": 2 })).await;

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/advance_round",
        Some(&session),
        Some(json!({ "skipPlayers": ["Nobody Atall"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Nobody Atall"));
}

#[tokio::test]
async fn test_invalid_session_header_is_bad_request() {
    let app = create_test_server();

    let (status, _, body) =
        send(&app, "GET", "/api/calculate_results", Some("court-3"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains(SESSION_ID_HEADER));
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = create_test_server();
    let id = uuid::Uuid::new_v4().to_string();

    let request = Request::builder()
        .method("POST")
        .uri("/api/generate_tournament")
        .header("content-type", "application/json")
        .header(SESSION_ID_HEADER, id.as_str())
        .body(Body::from("{\"courts\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers().get(SESSION_ID_HEADER).unwrap(), id.as_str());

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
}

#[tokio::test]
async fn test_bad_score_fields_are_bad_request() {
    let app = create_test_server();
    let (session, _) = generate(&app, json!({ "courts": 2, "rounds": 2 })).await;

    for entry in [
        json!({ "roundIndex": 0, "matchIndex": 0, "team": "teamC", "score": 11 }),
        json!({ "roundIndex": 0, "matchIndex": 0, "team": "teamA", "score": -3 }),
    ] {
        let (status, echoed, body) =
            send(&app, "POST", "/api/update_score", Some(&session), Some(entry)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(echoed.as_deref(), Some(session.as_str()));
        assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
    }

    let (_, _, state) = send(&app, "GET", "/api/get_tournament_state", Some(&session), None).await;
    assert_eq!(state["scores"], json!({}));
}

#[tokio::test]
async fn test_oversized_courts_is_bad_request() {
    let app = create_test_server();

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/generate_tournament",
        None,
        Some(json!({ "courts": 4611686018427387904u64, "rounds": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/generate_tournament",
        None,
        Some(json!({ "courts": 1000, "rounds": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Not enough players available. Need 4000, have 8");
}

#[tokio::test]
async fn test_rounds_over_cap_is_bad_request() {
    let config = ServerConfig::from_lookup(
        |key| (key == "MAX_ROUNDS").then(|| "10".to_string()),
        None,
        None,
    )
    .expect("capped config");
    let app = create_router(AppState::new(config));

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/generate_tournament",
        None,
        Some(json!({ "rounds": 11 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid input: rounds must be at most 10");

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/generate_tournament",
        None,
        Some(json!({ "rounds": 1000000000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("at most"));

    let (_, _, health) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(health["sessions"], 0);
}

#[tokio::test]
async fn test_last_round_advance_ignores_unknown_skip_names() {
    let app = create_test_server();
    let (session, _) = generate(&app, json!({ "courts": 2, "rounds": 1 })).await;

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/advance_round",
        Some(&session),
        Some(json!({ "skipPlayers": ["Nobody Atall"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "completed": true }));
}
