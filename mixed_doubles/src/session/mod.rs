//! Tournament sessions: the state one organizer works against.
//!
//! A [`TournamentSession`] owns the schedule, the organizer's settings, the
//! score sheet and the round cursor. Sessions are kept in a
//! [`SessionStore`] keyed by a UUID session id.
//!
//! ## Example
//!
//! ```
//! use mixed_doubles::pairing::{PairingEngine, TeamLabel};
//! use mixed_doubles::results::ScoreEntry;
//! use mixed_doubles::schedule::AdvanceOutcome;
//! use mixed_doubles::session::{NewTournament, RosterSource, TournamentConfig, TournamentSession};
//!
//! let mut engine = PairingEngine::seeded(3);
//! let mut session = TournamentSession::create(
//!     &mut engine,
//!     NewTournament {
//!         config: TournamentConfig { courts: 2, rounds: 3, ..Default::default() },
//!         roster: RosterSource::Defaults,
//!         total_players: 9,
//!     },
//! )?;
//!
//! session.record_score(ScoreEntry { round_index: 0, match_index: 0, team: TeamLabel::TeamA, score: 11 })?;
//! session.record_score(ScoreEntry { round_index: 0, match_index: 0, team: TeamLabel::TeamB, score: 8 })?;
//!
//! let outcome = session.advance_round(&mut engine, &[])?;
//! assert_eq!(outcome, AdvanceOutcome::Advanced { round: 1 });
//!
//! let standings = session.results();
//! assert_eq!(standings.len(), 9);
//! assert_eq!(standings[0].total_score, 11);
//! # Ok::<(), mixed_doubles::session::TournamentError>(())
//! ```

pub mod errors;
pub mod models;
pub mod store;
pub mod tournament;

pub use errors::{TournamentError, TournamentResult};
pub use models::{MAX_ROUNDS, NewTournament, RosterSource, TournamentConfig, TournamentSnapshot};
pub use store::{DEFAULT_MAX_SESSIONS, SessionId, SessionStore};
pub use tournament::TournamentSession;
