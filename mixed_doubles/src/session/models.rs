//! Tournament session models.

use crate::{results::ScoreSheet, roster::Player, schedule::Schedule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Most rounds a single tournament may schedule
pub const MAX_ROUNDS: usize = 100;

/// Tournament settings as entered by the organizer.
///
/// Only `courts` and `rounds` drive scheduling. The remaining fields are
/// stored and echoed back but the pairing engine does not read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentConfig {
    /// Courts in use every round
    pub courts: usize,
    /// Rounds to schedule
    pub rounds: usize,
    /// Planned round length in minutes
    pub round_duration: u32,
    /// Preference for avoiding men's pairs against women's pairs
    #[serde(rename = "avoidMMvsFF")]
    pub avoid_mm_vs_ff: bool,
    /// Preference for rating-balanced teams
    pub use_rating_balance: bool,
    /// Weight of the rating preference
    pub rating_factor: f64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            courts: 2,
            rounds: 6,
            round_duration: 13,
            avoid_mm_vs_ff: true,
            use_rating_balance: true,
            rating_factor: 3.0,
        }
    }
}

/// Where the tournament's players come from
#[derive(Debug, Clone, PartialEq)]
pub enum RosterSource {
    /// Sample from the built-in club roster
    Defaults,
    /// Use the organizer's list (truncated to the requested size)
    Custom(Vec<Player>),
}

/// Validated-on-create request for a new tournament
#[derive(Debug, Clone, PartialEq)]
pub struct NewTournament {
    pub config: TournamentConfig,
    pub roster: RosterSource,
    /// Number of players taking part
    pub total_players: usize,
}

/// Serializable view of a whole session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSnapshot {
    pub tournament: Schedule,
    pub config: TournamentConfig,
    pub scores: ScoreSheet,
    pub current_round: usize,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = TournamentConfig::default();
        assert_eq!(config.courts, 2);
        assert_eq!(config.rounds, 6);
        assert_eq!(config.round_duration, 13);
        assert!(config.avoid_mm_vs_ff);
        assert!(config.use_rating_balance);
        assert_eq!(config.rating_factor, 3.0);
    }

    #[test]
    fn test_config_field_names() {
        let value = serde_json::to_value(TournamentConfig::default()).unwrap();
        assert_eq!(value["avoidMMvsFF"], true);
        assert_eq!(value["roundDuration"], 13);
        assert_eq!(value["useRatingBalance"], true);
    }
}
