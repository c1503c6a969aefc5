//! Club Night Example
//!
//! Builds a three-court evening from the built-in roster, enters some
//! scores, lets a player sit out and prints the standings.

use mixed_doubles::{
    AdvanceOutcome, NewTournament, PairingEngine, RosterSource, ScoreEntry, TeamLabel,
    TournamentConfig, TournamentSession,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Club Night ===\n");

    let mut engine = PairingEngine::new();
    let mut session = TournamentSession::create(
        &mut engine,
        NewTournament {
            config: TournamentConfig {
                courts: 3,
                rounds: 4,
                ..TournamentConfig::default()
            },
            roster: RosterSource::Defaults,
            total_players: 14,
        },
    )?;

    loop {
        let round = session
            .current()
            .ok_or("current round missing from schedule")?
            .clone();

        println!("Round {}", round.number());
        for (court, m) in round.matches.iter().enumerate() {
            let a = m.team_a.players();
            let b = m.team_b.players();
            println!(
                "  Court {}: {} & {}  vs  {} & {}",
                court + 1,
                a[0].name,
                a[1].name,
                b[0].name,
                b[1].name
            );

            // Stronger pair on paper takes it 11-7
            let (score_a, score_b) = if m.team_a.rating_sum() >= m.team_b.rating_sum() {
                (11, 7)
            } else {
                (7, 11)
            };
            for (team, score) in [(TeamLabel::TeamA, score_a), (TeamLabel::TeamB, score_b)] {
                session.record_score(ScoreEntry {
                    round_index: round.index,
                    match_index: court,
                    team,
                    score,
                })?;
            }
        }
        println!("  Sitting out: {}\n", round.sitting_out.join(", "));

        // The first player on court asks for a rest next round
        let resting: Vec<String> = round
            .matches
            .first()
            .map(|m| vec![m.team_a.players()[0].name.clone()])
            .unwrap_or_default();

        match session.advance_round(&mut engine, &resting)? {
            AdvanceOutcome::Advanced { .. } => continue,
            AdvanceOutcome::Completed => break,
        }
    }

    println!("Standings:");
    for (place, line) in session.results().iter().enumerate() {
        println!(
            "  {:>2}. {:<8} {:>3} pts  {} W  {} played",
            place + 1,
            line.name,
            line.total_score,
            line.wins,
            line.matches_played
        );
    }

    Ok(())
}
