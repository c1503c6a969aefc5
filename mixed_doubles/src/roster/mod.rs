//! Player roster: the people available to fill the courts.

pub mod models;

pub use models::{
    DEFAULT_ROSTER_SIZE, Gender, Player, default_players, find_duplicate_name,
    sample_default_players,
};
