//! Multi-round scheduling on top of the pairing engine.

use super::models::{Round, Schedule};
use crate::{
    pairing::{PairingEngine, PairingResult},
    roster::Player,
};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Result of moving the round cursor forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdvanceOutcome {
    /// The next round was regenerated and is now current
    Advanced { round: usize },
    /// The cursor is already on the final round
    Completed,
}

/// Build every round of a tournament up front.
///
/// Each round is paired independently with nobody sitting out by request, so
/// consecutive rounds are uncorrelated. The first pairing error aborts the
/// whole build.
pub fn build_schedule<R: Rng>(
    engine: &mut PairingEngine<R>,
    court_count: usize,
    roster: &[Player],
    round_count: usize,
) -> PairingResult<Schedule> {
    info!(
        "Building schedule: {} players, {} courts, {} rounds",
        roster.len(),
        court_count,
        round_count
    );

    let no_skips = HashSet::new();
    let rounds = (0..round_count)
        .map(|index| {
            engine
                .assign_round(roster, court_count, &no_skips)
                .map(|assignment| Round::from_assignment(index, assignment))
        })
        .collect::<PairingResult<Vec<_>>>()?;

    Ok(Schedule {
        rounds,
        players: roster.to_vec(),
    })
}

/// Move from `current` to the next round, re-pairing it around `skip`.
///
/// The next round's matches and sit-outs are replaced in place. When
/// `current` is already the final round nothing changes and
/// [`AdvanceOutcome::Completed`] is returned.
pub fn advance_round<R: Rng>(
    engine: &mut PairingEngine<R>,
    current: usize,
    schedule: &mut Schedule,
    court_count: usize,
    skip: &HashSet<String>,
) -> PairingResult<AdvanceOutcome> {
    let next = current + 1;
    if next >= schedule.rounds.len() {
        debug!("Round {} is the last round; tournament complete", current);
        return Ok(AdvanceOutcome::Completed);
    }

    let assignment = engine.assign_round(&schedule.players, court_count, skip)?;
    schedule.rounds[next] = Round::from_assignment(next, assignment);

    info!(
        "Advanced to round {} with {} sitting out",
        next + 1,
        schedule.rounds[next].sitting_out.len()
    );

    Ok(AdvanceOutcome::Advanced { round: next })
}
