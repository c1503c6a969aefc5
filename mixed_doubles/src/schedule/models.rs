//! Schedule data models.

use crate::{
    pairing::{Match, RoundAssignment},
    roster::Player,
};
use serde::{Deserialize, Serialize};

/// One time slot of simultaneous matches across all courts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Position in the schedule (0-indexed)
    pub index: usize,
    /// One match per court
    pub matches: Vec<Match>,
    /// Players without a court this round
    pub sitting_out: Vec<String>,
}

impl Round {
    /// Build a round from a pairing result
    pub fn from_assignment(index: usize, assignment: RoundAssignment) -> Self {
        Self {
            index,
            matches: assignment.matches,
            sitting_out: assignment.sitting_out,
        }
    }

    /// Human-facing round number (1-indexed)
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// The full tournament plan: fixed roster plus every round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Rounds in play order
    pub rounds: Vec<Round>,
    /// Every player entered in the tournament
    pub players: Vec<Player>,
}

impl Schedule {
    /// Number of rounds
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// Whether the schedule has no rounds
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Get a round by index
    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }
}
