//! JSON body extractor with the API's error shape.
//!
//! axum's own `Json` answers a bad body with a plain-text 4xx. [`ApiJson`]
//! turns that rejection into the same `{"error": "Invalid input: ..."}` 400
//! every other validation failure uses, echoing the caller's session id.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use mixed_doubles::TournamentError;

use super::{ApiError, session::parse_session_id};

/// `Json<T>` whose rejection is an [`ApiError`]
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        // A malformed session header is reported by SessionKey, not here
        let session_id = parse_session_id(request.headers()).ok().flatten();

        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::from_tournament(
                TournamentError::InvalidInput(rejection.body_text()),
                session_id,
            )),
        }
    }
}
