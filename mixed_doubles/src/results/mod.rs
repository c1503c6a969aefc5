//! Score keeping and standings.

pub mod aggregator;
pub mod models;

pub use aggregator::compute_results;
pub use models::{MatchScore, PlayerStats, Score, ScoreEntry, ScoreSheet};
