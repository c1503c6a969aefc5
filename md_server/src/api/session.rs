//! Session id extraction and propagation.
//!
//! Every organizer works against their own tournament, identified by the
//! `x-session-id` header. Handlers read it through [`SessionKey`] and echo it
//! back on every response.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderValue, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use mixed_doubles::SessionId;
use uuid::Uuid;

use super::ErrorResponse;

/// Header carrying the caller's session id
pub const SESSION_ID_HEADER: &str = "x-session-id";

/// Session id sent by the caller, if any
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionKey(pub Option<SessionId>);

impl SessionKey {
    pub fn id(&self) -> Option<SessionId> {
        self.0
    }

    /// Use the caller's id or mint a new one
    pub fn or_new(&self) -> SessionId {
        self.0.unwrap_or_else(Uuid::new_v4)
    }
}

pub(super) fn parse_session_id(headers: &axum::http::HeaderMap) -> Result<Option<SessionId>, String> {
    match headers.get(SESSION_ID_HEADER) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .ok()
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .map(Some)
            .ok_or_else(|| format!("{} must be a UUID", SESSION_ID_HEADER)),
    }
}

impl<S> FromRequestParts<S> for SessionKey
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parse_session_id(&parts.headers)
            .map(SessionKey)
            .map_err(|error| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })))
    }
}

/// Response wrapper that stamps the session id header
pub struct WithSession<T>(pub Option<SessionId>, pub T);

impl<T: IntoResponse> IntoResponse for WithSession<T> {
    fn into_response(self) -> Response {
        let mut response = self.1.into_response();
        if let Some(id) = self.0
            && let Ok(value) = HeaderValue::from_str(&id.to_string())
        {
            response.headers_mut().insert(SESSION_ID_HEADER, value);
        }
        response
    }
}
