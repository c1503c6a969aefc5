//! Round pairing: who plays, on which court, with whom.
//!
//! The engine takes the first `courts * 4` players who are not sitting out,
//! shuffles them, deals them onto courts in blocks of four and balances each
//! court by rating (weakest + strongest against the two middle players).
//!
//! ## Example
//!
//! ```
//! use mixed_doubles::pairing::PairingEngine;
//! use mixed_doubles::roster::default_players;
//! use std::collections::HashSet;
//!
//! let players = default_players();
//! let mut engine = PairingEngine::seeded(11);
//!
//! let round = engine.assign_round(&players, 3, &HashSet::new()).unwrap();
//! assert_eq!(round.matches.len(), 3);
//! assert_eq!(round.sitting_out.len(), 4);
//! ```

pub mod engine;
pub mod errors;
pub mod models;

pub use engine::{PairingEngine, balance_teams};
pub use errors::{PairingError, PairingResult};
pub use models::{Match, PLAYERS_PER_COURT, RoundAssignment, Team, TeamLabel};
