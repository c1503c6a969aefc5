//! # Mixed Doubles
//!
//! Court assignment, scheduling and standings for social doubles
//! tournaments (padel, tennis, badminton and the like).
//!
//! ## Core Modules
//!
//! - [`roster`]: Players and the built-in club roster
//! - [`pairing`]: The round pairing engine
//! - [`schedule`]: Multi-round schedules and the round cursor
//! - [`results`]: Score sheet and standings
//! - [`session`]: Per-organizer tournament state and the session store
//!
//! ## Example
//!
//! ```
//! use mixed_doubles::{PairingEngine, build_schedule, default_players};
//!
//! let players = default_players();
//! let mut engine = PairingEngine::seeded(1);
//!
//! // Four courts, five rounds, sixteen players: nobody sits out
//! let schedule = build_schedule(&mut engine, 4, &players, 5).unwrap();
//! assert!(schedule.rounds.iter().all(|r| r.sitting_out.is_empty()));
//! ```

pub mod pairing;
pub mod results;
pub mod roster;
pub mod schedule;
pub mod session;

pub use pairing::{Match, PairingEngine, PairingError, RoundAssignment, Team, TeamLabel};
pub use results::{PlayerStats, ScoreEntry, ScoreSheet, compute_results};
pub use roster::{Gender, Player, default_players};
pub use schedule::{AdvanceOutcome, Round, Schedule, advance_round, build_schedule};
pub use session::{
    NewTournament, RosterSource, SessionId, SessionStore, TournamentConfig, TournamentError,
    TournamentSession,
};
