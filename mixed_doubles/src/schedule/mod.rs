//! Tournament scheduling.
//!
//! A schedule is built once, every round paired independently. As play goes
//! on, the organizer advances one round at a time and may ask players to sit
//! out; the upcoming round is then re-paired without them.

pub mod models;
pub mod scheduler;

pub use models::{Round, Schedule};
pub use scheduler::{AdvanceOutcome, advance_round, build_schedule};
