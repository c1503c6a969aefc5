//! Score and standings models.

use crate::{pairing::TeamLabel, roster::Gender};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Points type for a single game
pub type Score = u32;

/// Scores entered for one match; either side may still be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    #[serde(rename = "teamA", default, skip_serializing_if = "Option::is_none")]
    pub team_a: Option<Score>,
    #[serde(rename = "teamB", default, skip_serializing_if = "Option::is_none")]
    pub team_b: Option<Score>,
}

impl MatchScore {
    /// Set one side's score
    pub fn set(&mut self, team: TeamLabel, score: Score) {
        match team {
            TeamLabel::TeamA => self.team_a = Some(score),
            TeamLabel::TeamB => self.team_b = Some(score),
        }
    }

    /// Both scores, if both have been entered
    pub fn complete(&self) -> Option<(Score, Score)> {
        self.team_a.zip(self.team_b)
    }
}

/// A single score submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub round_index: usize,
    pub match_index: usize,
    pub team: TeamLabel,
    pub score: Score,
}

/// Every score entered so far, keyed by round index then match index.
///
/// Kept apart from the schedule and only merged when standings are computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreSheet {
    rounds: BTreeMap<usize, BTreeMap<usize, MatchScore>>,
}

impl ScoreSheet {
    /// Create an empty score sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or overwrite one side's score
    pub fn record(&mut self, entry: ScoreEntry) {
        self.rounds
            .entry(entry.round_index)
            .or_default()
            .entry(entry.match_index)
            .or_default()
            .set(entry.team, entry.score);
    }

    /// Scores for one match
    pub fn get(&self, round_index: usize, match_index: usize) -> Option<&MatchScore> {
        self.rounds
            .get(&round_index)
            .and_then(|matches| matches.get(&match_index))
    }

    /// Drop every score recorded for a round
    pub fn clear_round(&mut self, round_index: usize) -> bool {
        self.rounds.remove(&round_index).is_some()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

/// A player's line in the standings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub name: String,
    /// Sum of the player's team score over every completed match
    pub total_score: u64,
    pub matches_played: u32,
    pub wins: u32,
    /// Points per completed match, 0 before the first one
    pub average_score: f64,
    pub rating: f64,
    pub gender: Gender,
}
