/// Property-based tests for round pairing using proptest
///
/// These tests check the court assignment invariants across randomly
/// generated rosters, court counts and skip lists.
use mixed_doubles::{
    Gender, PairingEngine, PairingError, Player,
    pairing::{PLAYERS_PER_COURT, balance_teams},
};
use proptest::prelude::*;
use std::collections::HashSet;

// Strategy to generate a roster of uniquely named players
fn roster_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<Player>> {
    prop::collection::vec((any::<bool>(), 20u32..=50), min..=max).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (female, rating))| {
                let gender = if female { Gender::Female } else { Gender::Male };
                Player::new(format!("player{}", i), gender, rating as f64 / 10.0)
            })
            .collect()
    })
}

// Strategy to generate a roster plus a subset of its names to skip
fn roster_with_skips() -> impl Strategy<Value = (Vec<Player>, HashSet<String>)> {
    roster_strategy(1, 24).prop_flat_map(|roster| {
        let len = roster.len();
        (
            Just(roster),
            prop::collection::hash_set(0..len, 0..=len / 2),
        )
            .prop_map(|(roster, picks)| {
                let skip = picks.into_iter().map(|i| roster[i].name.clone()).collect();
                (roster, skip)
            })
    })
}

proptest! {
    #[test]
    fn test_round_partitions_roster(
        (roster, skip) in roster_with_skips(),
        courts in 1usize..=5,
        seed in any::<u64>(),
    ) {
        let mut engine = PairingEngine::seeded(seed);
        let available = roster.iter().filter(|p| !skip.contains(&p.name)).count();

        match engine.assign_round(&roster, courts, &skip) {
            Ok(round) => {
                prop_assert!(available >= courts * PLAYERS_PER_COURT);
                prop_assert_eq!(round.matches.len(), courts);

                let mut on_court = HashSet::new();
                for m in &round.matches {
                    let names: HashSet<&str> = m.players().map(|p| p.name.as_str()).collect();
                    prop_assert_eq!(names.len(), 4, "each match needs four distinct players");
                    for name in names {
                        prop_assert!(!skip.contains(name), "skipped player on court");
                        prop_assert!(on_court.insert(name.to_string()), "player on two courts");
                    }
                }

                let sitting: HashSet<String> = round.sitting_out.iter().cloned().collect();
                prop_assert!(sitting.is_disjoint(&on_court));
                prop_assert_eq!(sitting.len() + on_court.len(), roster.len());
            }
            Err(PairingError::InsufficientPlayers { needed, available: reported }) => {
                prop_assert_eq!(needed, courts * PLAYERS_PER_COURT);
                prop_assert_eq!(reported, available);
                prop_assert!(available < needed);
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn test_exact_fill_always_succeeds(courts in 1usize..=4, seed in any::<u64>()) {
        let roster: Vec<Player> = (0..courts * PLAYERS_PER_COURT)
            .map(|i| Player::new(format!("p{}", i), Gender::Male, 3.5))
            .collect();
        let mut engine = PairingEngine::seeded(seed);

        let round = engine.assign_round(&roster, courts, &HashSet::new());
        prop_assert!(round.is_ok());
        prop_assert!(round.unwrap().sitting_out.is_empty());
    }

    #[test]
    fn test_balance_teams_pairs_extremes(ratings in prop::array::uniform4(10u32..=60)) {
        let block = [
            Player::new("w", Gender::Male, ratings[0] as f64 / 10.0),
            Player::new("x", Gender::Female, ratings[1] as f64 / 10.0),
            Player::new("y", Gender::Male, ratings[2] as f64 / 10.0),
            Player::new("z", Gender::Female, ratings[3] as f64 / 10.0),
        ];
        let mut sorted: Vec<f64> = block.iter().map(|p| p.rating).collect();
        sorted.sort_by(f64::total_cmp);

        let m = balance_teams(block);
        let a: Vec<f64> = m.team_a.players().iter().map(|p| p.rating).collect();
        let b: Vec<f64> = m.team_b.players().iter().map(|p| p.rating).collect();

        prop_assert_eq!(a, vec![sorted[0], sorted[3]]);
        prop_assert_eq!(b, vec![sorted[1], sorted[2]]);
    }
}
