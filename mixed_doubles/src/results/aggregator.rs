//! Standings calculation.

use super::models::{PlayerStats, ScoreSheet};
use crate::{pairing::Team, schedule::Schedule};
use log::warn;
use std::{cmp::Ordering, collections::HashMap};

/// Rank every roster player by cumulative performance.
///
/// Only matches with both scores entered count. Each player on court is
/// credited with their team's score and a match played; the higher-scoring
/// team's players also get a win (nobody wins a tie).
///
/// Ordering is total score, then wins, then matches played, all descending.
/// Players still level after that keep their roster order.
pub fn compute_results(schedule: &Schedule, scores: &ScoreSheet) -> Vec<PlayerStats> {
    let mut stats: Vec<PlayerStats> = schedule
        .players
        .iter()
        .map(|p| PlayerStats {
            name: p.name.clone(),
            total_score: 0,
            matches_played: 0,
            wins: 0,
            average_score: 0.0,
            rating: p.rating,
            gender: p.gender,
        })
        .collect();

    let slots: HashMap<String, usize> = stats
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.name.clone(), idx))
        .collect();

    let mut credit = |team: &Team, points: u32, won: bool| {
        for player in team.players() {
            match slots.get(&player.name) {
                Some(&idx) => {
                    let line = &mut stats[idx];
                    line.total_score += u64::from(points);
                    line.matches_played += 1;
                    if won {
                        line.wins += 1;
                    }
                    line.average_score = line.total_score as f64 / f64::from(line.matches_played);
                }
                None => warn!("{} played a match but is not on the roster", player.name),
            }
        }
    };

    for round in &schedule.rounds {
        for (match_idx, m) in round.matches.iter().enumerate() {
            let Some((score_a, score_b)) = scores
                .get(round.index, match_idx)
                .and_then(|s| s.complete())
            else {
                continue;
            };

            credit(&m.team_a, score_a, score_a > score_b);
            credit(&m.team_b, score_b, score_b > score_a);
        }
    }

    stats.sort_by(standings_order);
    stats
}

fn standings_order(a: &PlayerStats, b: &PlayerStats) -> Ordering {
    b.total_score
        .cmp(&a.total_score)
        .then(b.wins.cmp(&a.wins))
        .then(b.matches_played.cmp(&a.matches_played))
}
