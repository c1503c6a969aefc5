//! Player roster models.

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Player gender as recorded on the sign-up sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "M"),
            Gender::Female => write!(f, "F"),
        }
    }
}

/// A player taking part in the tournament.
///
/// Players are identified by `name`; two players with the same name are
/// treated as the same person everywhere in the crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique display name
    pub name: String,
    /// Gender
    pub gender: Gender,
    /// Skill rating, only used to balance teams within a match
    pub rating: f64,
}

impl Player {
    /// Create a new player
    pub fn new(name: impl Into<String>, gender: Gender, rating: f64) -> Self {
        Self {
            name: name.into(),
            gender,
            rating,
        }
    }
}

/// Built-in club roster used when the organizer does not supply players.
const DEFAULT_ROSTER: [(&str, Gender, f64); 16] = [
    ("Alex", Gender::Male, 3.8),
    ("Ben", Gender::Male, 3.9),
    ("Charlie", Gender::Male, 3.5),
    ("Dan", Gender::Male, 4.0),
    ("Emma", Gender::Female, 3.9),
    ("Fi", Gender::Female, 3.8),
    ("Gavin", Gender::Male, 3.7),
    ("Hen", Gender::Female, 3.6),
    ("India", Gender::Female, 3.9),
    ("Julie", Gender::Female, 3.8),
    ("Ken", Gender::Male, 4.0),
    ("Liam", Gender::Male, 3.9),
    ("Mary", Gender::Female, 3.8),
    ("Nancy", Gender::Female, 3.7),
    ("Oscar", Gender::Male, 3.9),
    ("Pete", Gender::Male, 3.8),
];

/// Number of players on the built-in roster
pub const DEFAULT_ROSTER_SIZE: usize = DEFAULT_ROSTER.len();

/// Return the full built-in roster in sign-up order
pub fn default_players() -> Vec<Player> {
    DEFAULT_ROSTER
        .iter()
        .map(|&(name, gender, rating)| Player::new(name, gender, rating))
        .collect()
}

/// Draw `count` distinct players from the built-in roster in random order.
///
/// Returns `None` if `count` exceeds [`DEFAULT_ROSTER_SIZE`].
pub fn sample_default_players<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Option<Vec<Player>> {
    if count > DEFAULT_ROSTER_SIZE {
        return None;
    }

    let mut players = default_players();
    players.shuffle(rng);
    players.truncate(count);
    Some(players)
}

/// Find the first name that appears more than once
pub fn find_duplicate_name(players: &[Player]) -> Option<&str> {
    let mut seen = HashSet::new();
    players
        .iter()
        .map(|p| p.name.as_str())
        .find(|name| !seen.insert(*name))
}
