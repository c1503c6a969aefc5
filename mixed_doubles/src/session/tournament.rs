//! One organizer's running tournament.

use super::{
    errors::{TournamentError, TournamentResult},
    models::{MAX_ROUNDS, NewTournament, RosterSource, TournamentConfig, TournamentSnapshot},
};
use crate::{
    pairing::{PLAYERS_PER_COURT, PairingEngine, PairingError},
    results::{PlayerStats, ScoreEntry, ScoreSheet, compute_results},
    roster::{DEFAULT_ROSTER_SIZE, Player, find_duplicate_name, sample_default_players},
    schedule::{self, AdvanceOutcome, Round, Schedule},
};
use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::Rng;
use std::collections::HashSet;

/// Schedule, settings, scores and round cursor for a single tournament.
///
/// Every operation takes `&mut self`; there is no shared or global state.
#[derive(Debug, Clone)]
pub struct TournamentSession {
    schedule: Schedule,
    config: TournamentConfig,
    scores: ScoreSheet,
    current_round: usize,
    created_at: DateTime<Utc>,
}

impl TournamentSession {
    /// Validate a request, pick the roster and build the full schedule
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - zero courts/rounds/players, more than [`MAX_ROUNDS`]
    ///   rounds, too few custom players, more default players than exist,
    ///   duplicate names or bad ratings
    /// * `Pairing` - `total_players` cannot fill the courts
    pub fn create<R: Rng>(
        engine: &mut PairingEngine<R>,
        request: NewTournament,
    ) -> TournamentResult<Self> {
        let NewTournament {
            config,
            roster,
            total_players,
        } = request;

        if config.courts == 0 {
            return Err(TournamentError::invalid("courts must be at least 1"));
        }
        if config.rounds == 0 {
            return Err(TournamentError::invalid("rounds must be at least 1"));
        }
        if config.rounds > MAX_ROUNDS {
            return Err(TournamentError::invalid(format!(
                "rounds must be at most {}",
                MAX_ROUNDS
            )));
        }
        if total_players == 0 {
            return Err(TournamentError::invalid("totalPlayers must be at least 1"));
        }

        let needed = config
            .courts
            .checked_mul(PLAYERS_PER_COURT)
            .ok_or_else(|| {
                TournamentError::invalid(format!("courts value {} is too large", config.courts))
            })?;
        if needed > total_players {
            return Err(PairingError::InsufficientPlayers {
                needed,
                available: total_players,
            }
            .into());
        }

        let players = match roster {
            RosterSource::Defaults => sample_default_players(engine.rng_mut(), total_players)
                .ok_or_else(|| {
                    TournamentError::invalid(format!(
                        "Need {} players, only {} default players exist",
                        total_players, DEFAULT_ROSTER_SIZE
                    ))
                })?,
            RosterSource::Custom(mut players) => {
                if players.len() < total_players {
                    return Err(TournamentError::invalid(format!(
                        "Need {} players, got {}",
                        total_players,
                        players.len()
                    )));
                }
                players.truncate(total_players);
                players
            }
        };

        validate_players(&players)?;

        debug!(
            "Advisory settings stored, not used for pairing: avoidMMvsFF={}, useRatingBalance={}, ratingFactor={}, roundDuration={}",
            config.avoid_mm_vs_ff,
            config.use_rating_balance,
            config.rating_factor,
            config.round_duration
        );

        let schedule = schedule::build_schedule(engine, config.courts, &players, config.rounds)?;

        info!(
            "Tournament created: {} players, {} courts, {} rounds",
            players.len(),
            config.courts,
            config.rounds
        );

        Ok(Self {
            schedule,
            config,
            scores: ScoreSheet::new(),
            current_round: 0,
            created_at: Utc::now(),
        })
    }

    /// Record one side's score for a scheduled match
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - the round or match does not exist
    pub fn record_score(&mut self, entry: ScoreEntry) -> TournamentResult<()> {
        let round = self.schedule.round(entry.round_index).ok_or_else(|| {
            TournamentError::invalid(format!(
                "round {} does not exist (schedule has {} rounds)",
                entry.round_index,
                self.schedule.len()
            ))
        })?;

        if entry.match_index >= round.matches.len() {
            return Err(TournamentError::invalid(format!(
                "match {} does not exist in round {} ({} courts)",
                entry.match_index,
                entry.round_index,
                round.matches.len()
            )));
        }

        self.scores.record(entry);
        debug!(
            "Score recorded: round {}, match {}, {} = {}",
            entry.round_index, entry.match_index, entry.team, entry.score
        );
        Ok(())
    }

    /// Move to the next round, re-pairing it without the named players.
    ///
    /// When the last round is already in play this returns
    /// [`AdvanceOutcome::Completed`] without looking at `skip_players`.
    ///
    /// Scores already entered for the re-paired round are discarded, since
    /// they belong to matches that no longer exist. Clients that pre-enter
    /// scores for upcoming rounds lose them on advance.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - a skip name is not on the roster
    /// * `Pairing` - too few players remain to fill the courts
    pub fn advance_round<R: Rng>(
        &mut self,
        engine: &mut PairingEngine<R>,
        skip_players: &[String],
    ) -> TournamentResult<AdvanceOutcome> {
        if self.current_round + 1 >= self.schedule.len() {
            info!("Tournament complete after {} rounds", self.schedule.len());
            return Ok(AdvanceOutcome::Completed);
        }

        let roster: HashSet<&str> = self
            .schedule
            .players
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        let unknown: Vec<&str> = skip_players
            .iter()
            .map(String::as_str)
            .filter(|name| !roster.contains(name))
            .collect();
        if !unknown.is_empty() {
            return Err(TournamentError::invalid(format!(
                "unknown players in skip list: {}",
                unknown.join(", ")
            )));
        }

        let skip: HashSet<String> = skip_players.iter().cloned().collect();
        let outcome = schedule::advance_round(
            engine,
            self.current_round,
            &mut self.schedule,
            self.config.courts,
            &skip,
        )?;

        if let AdvanceOutcome::Advanced { round } = outcome {
            if self.scores.clear_round(round) {
                info!("Discarded stale scores for re-paired round {}", round + 1);
            }
            self.current_round = round;
        }

        Ok(outcome)
    }

    /// Current standings
    pub fn results(&self) -> Vec<PlayerStats> {
        compute_results(&self.schedule, &self.scores)
    }

    /// Owned copy of the full session state
    pub fn snapshot(&self) -> TournamentSnapshot {
        TournamentSnapshot {
            tournament: self.schedule.clone(),
            config: self.config.clone(),
            scores: self.scores.clone(),
            current_round: self.current_round,
            created_at: self.created_at,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn scores(&self) -> &ScoreSheet {
        &self.scores
    }

    /// Index of the round in play
    pub fn current_round(&self) -> usize {
        self.current_round
    }

    /// The round in play
    pub fn current(&self) -> Option<&Round> {
        self.schedule.round(self.current_round)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn validate_players(players: &[Player]) -> TournamentResult<()> {
    if players.iter().any(|p| p.name.trim().is_empty()) {
        return Err(TournamentError::invalid("player names must not be blank"));
    }

    if let Some(player) = players.iter().find(|p| !p.rating.is_finite()) {
        return Err(TournamentError::invalid(format!(
            "rating for {} must be a finite number",
            player.name
        )));
    }

    if let Some(name) = find_duplicate_name(players) {
        return Err(TournamentError::invalid(format!(
            "player name {} appears more than once",
            name
        )));
    }

    Ok(())
}
