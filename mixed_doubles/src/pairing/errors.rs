//! Pairing error types.

use thiserror::Error;

/// Pairing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    /// Not enough eligible players to fill every court
    #[error("Not enough players available. Need {needed}, have {available}")]
    InsufficientPlayers { needed: usize, available: usize },

    /// The generated round broke one of its own invariants
    #[error("Could not generate valid matches for this round: {reason}")]
    MatchGenerationFailed { reason: String },
}

impl PairingError {
    pub(crate) fn generation_failed(reason: impl Into<String>) -> Self {
        PairingError::MatchGenerationFailed {
            reason: reason.into(),
        }
    }

    /// Whether the organizer can fix this by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(self, PairingError::InsufficientPlayers { .. })
    }
}

/// Result type for pairing operations
pub type PairingResult<T> = Result<T, PairingError>;
