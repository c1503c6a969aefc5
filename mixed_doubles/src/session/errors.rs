//! Tournament session error types.

use crate::pairing::PairingError;
use thiserror::Error;

/// Tournament session errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TournamentError {
    /// The caller has no tournament yet
    #[error("No tournament data")]
    NoTournamentData,

    /// A request failed validation before reaching the pairing engine
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Pairing failed
    #[error(transparent)]
    Pairing(#[from] PairingError),
}

impl TournamentError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TournamentError::InvalidInput(message.into())
    }

    /// Whether the caller can fix this by changing the request
    pub fn is_client_error(&self) -> bool {
        match self {
            TournamentError::Pairing(e) => e.is_client_error(),
            _ => true,
        }
    }

    /// Get a client-safe error message
    ///
    /// Internal pairing failures carry details about the generated round
    /// that mean nothing to the organizer, so only a generic message is
    /// returned for them.
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Pairing(PairingError::MatchGenerationFailed { .. }) => {
                "Could not generate valid matches for this round".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for tournament session operations
pub type TournamentResult<T> = Result<T, TournamentError>;
