//! Round pairing engine.
//!
//! Picks who plays in a round, shuffles them onto courts and splits each
//! court into two rating-balanced teams. The pass is single-shot: there is
//! no backtracking and no attempt to avoid repeat partners across rounds.

use super::{
    errors::{PairingError, PairingResult},
    models::{Match, PLAYERS_PER_COURT, RoundAssignment, Team},
};
use crate::roster::Player;
use log::{debug, error};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::collections::HashSet;

/// Pairing engine with its own random source
pub struct PairingEngine<R = StdRng> {
    rng: R,
}

impl PairingEngine<StdRng> {
    /// Create an engine seeded from the thread-local generator
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Create an engine with a fixed seed for reproducible rounds
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for PairingEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PairingEngine<R> {
    /// Mutable access to the generator, for callers that need to draw
    /// from the same stream (e.g. sampling a roster)
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Assign players to courts for one round.
    ///
    /// # Arguments
    ///
    /// * `roster` - Every player in the tournament
    /// * `court_count` - Number of courts to fill
    /// * `skip` - Names of players who asked to sit out; unknown names are ignored
    ///
    /// # Errors
    ///
    /// * `InsufficientPlayers` - fewer than `court_count * 4` players remain after skips
    /// * `MatchGenerationFailed` - the round could not be completed or failed verification
    pub fn assign_round(
        &mut self,
        roster: &[Player],
        court_count: usize,
        skip: &HashSet<String>,
    ) -> PairingResult<RoundAssignment> {
        // A court count too large to multiply can never be filled
        let needed = court_count
            .checked_mul(PLAYERS_PER_COURT)
            .unwrap_or(usize::MAX);

        for name in skip {
            if !roster.iter().any(|p| &p.name == name) {
                debug!("Skip request for {} matches nobody on the roster", name);
            }
        }

        let available: Vec<&Player> = roster
            .iter()
            .filter(|p| !skip.contains(&p.name))
            .collect();

        debug!(
            "Pairing round: {} players, {} courts, {} available, need {}",
            roster.len(),
            court_count,
            available.len(),
            needed
        );

        if available.len() < needed {
            return Err(PairingError::InsufficientPlayers {
                needed,
                available: available.len(),
            });
        }

        let selected = &available[..needed];
        let playing: Vec<String> = selected.iter().map(|p| p.name.clone()).collect();
        let playing_set: HashSet<&str> = playing.iter().map(String::as_str).collect();
        let sitting_out: Vec<String> = roster
            .iter()
            .filter(|p| !playing_set.contains(p.name.as_str()))
            .map(|p| p.name.clone())
            .collect();

        let mut order: Vec<Player> = selected.iter().map(|&p| p.clone()).collect();
        order.shuffle(&mut self.rng);

        let matches: Vec<Match> = order
            .chunks_exact(PLAYERS_PER_COURT)
            .take(court_count)
            .filter_map(|block| <&[Player; 4]>::try_from(block).ok())
            .map(|block| balance_teams(block.clone()))
            .collect();

        if matches.len() < court_count {
            error!(
                "Built {} of {} courts from {} players",
                matches.len(),
                court_count,
                order.len()
            );
            return Err(PairingError::generation_failed(format!(
                "only {} of {} courts could be filled",
                matches.len(),
                court_count
            )));
        }

        let assignment = RoundAssignment {
            matches,
            sitting_out,
            playing,
        };

        if let Err(e) = assignment.verify(roster, court_count, skip) {
            error!("Round failed verification: {}", e);
            return Err(e);
        }

        Ok(assignment)
    }
}

/// Split four players into two teams.
///
/// The players are ordered by rating; the weakest and strongest form team A
/// and the two middle ratings form team B. Equal ratings keep their
/// incoming order.
pub fn balance_teams(mut block: [Player; 4]) -> Match {
    block.sort_by(|a, b| a.rating.total_cmp(&b.rating));
    let [lowest, low_mid, high_mid, highest] = block;

    Match {
        team_a: Team::new(lowest, highest),
        team_b: Team::new(low_mid, high_mid),
    }
}
