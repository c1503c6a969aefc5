//! Court assignment models.

use super::errors::{PairingError, PairingResult};
use crate::roster::Player;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of players on one court
pub const PLAYERS_PER_COURT: usize = 4;

/// Two players sharing one side of the net
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team(pub [Player; 2]);

impl Team {
    /// Create a team from two players
    pub fn new(first: Player, second: Player) -> Self {
        Self([first, second])
    }

    /// Both players of the team
    pub fn players(&self) -> &[Player; 2] {
        &self.0
    }

    /// Whether a player with this name is on the team
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|p| p.name == name)
    }

    /// Combined rating of the pair
    pub fn rating_sum(&self) -> f64 {
        self.0.iter().map(|p| p.rating).sum()
    }
}

/// Which side of a match a team plays on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamLabel {
    #[serde(rename = "teamA")]
    TeamA,
    #[serde(rename = "teamB")]
    TeamB,
}

impl std::fmt::Display for TeamLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamLabel::TeamA => write!(f, "teamA"),
            TeamLabel::TeamB => write!(f, "teamB"),
        }
    }
}

/// One court's match for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub team_a: Team,
    pub team_b: Team,
}

impl Match {
    /// Get a team by its label
    pub fn team(&self, label: TeamLabel) -> &Team {
        match label {
            TeamLabel::TeamA => &self.team_a,
            TeamLabel::TeamB => &self.team_b,
        }
    }

    /// All four players, team A first
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.team_a.0.iter().chain(self.team_b.0.iter())
    }
}

/// The outcome of pairing a single round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundAssignment {
    /// One match per court, in court order
    pub matches: Vec<Match>,
    /// Names of roster players with no court this round, in roster order
    pub sitting_out: Vec<String>,
    /// Names of the players selected to play, in roster order
    pub playing: Vec<String>,
}

impl RoundAssignment {
    /// Check the round against the roster it was drawn from.
    ///
    /// Every match must hold four distinct players, nobody may play twice,
    /// nobody in `skipped` may play, and the playing and sitting-out lists
    /// must partition the roster exactly.
    pub fn verify(
        &self,
        roster: &[Player],
        court_count: usize,
        skipped: &HashSet<String>,
    ) -> PairingResult<()> {
        if self.matches.len() != court_count {
            return Err(PairingError::generation_failed(format!(
                "expected {} matches, built {}",
                court_count,
                self.matches.len()
            )));
        }

        let roster_names: HashSet<&str> = roster.iter().map(|p| p.name.as_str()).collect();
        let mut on_court: HashSet<&str> = HashSet::new();

        for (idx, m) in self.matches.iter().enumerate() {
            let names: HashSet<&str> = m.players().map(|p| p.name.as_str()).collect();
            if names.len() != PLAYERS_PER_COURT {
                return Err(PairingError::generation_failed(format!(
                    "match {} does not have {} distinct players",
                    idx, PLAYERS_PER_COURT
                )));
            }

            for name in names {
                if !roster_names.contains(name) {
                    return Err(PairingError::generation_failed(format!(
                        "{} is not on the roster",
                        name
                    )));
                }
                if skipped.contains(name) {
                    return Err(PairingError::generation_failed(format!(
                        "{} was asked to sit out but is on court",
                        name
                    )));
                }
                if !on_court.insert(name) {
                    return Err(PairingError::generation_failed(format!(
                        "{} is on more than one court",
                        name
                    )));
                }
            }
        }

        let playing: HashSet<&str> = self.playing.iter().map(String::as_str).collect();
        if playing != on_court {
            return Err(PairingError::generation_failed(
                "playing list does not match the courts",
            ));
        }

        let sitting: HashSet<&str> = self.sitting_out.iter().map(String::as_str).collect();
        if !sitting.is_disjoint(&playing) || sitting.len() + playing.len() != roster_names.len() {
            return Err(PairingError::generation_failed(
                "playing and sitting-out players do not partition the roster",
            ));
        }

        Ok(())
    }
}
