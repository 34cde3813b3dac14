//! Property tests for the rating engine

use elo_ladder::rating::RatingEngine;
use elo_ladder::types::{GameRecord, Participant};
use proptest::prelude::*;
use std::collections::HashMap;

fn game_strategy() -> impl Strategy<Value = GameRecord> {
    (0usize..8, 0usize..8, 0u8..=4, 0u8..=4).prop_map(|(a, b, score_a, score_b)| {
        GameRecord::new(
            format!("player_{}", a),
            format!("player_{}", b),
            f64::from(score_a) / 2.0,
            f64::from(score_b) / 2.0,
        )
    })
}

proptest! {
    #[test]
    fn every_referenced_name_is_counted(games in prop::collection::vec(game_strategy(), 0..60)) {
        let mut expected: HashMap<String, u32> = HashMap::new();
        for game in &games {
            *expected.entry(game.first_player.clone()).or_default() += 1;
            *expected.entry(game.second_player.clone()).or_default() += 1;
        }

        let participants = RatingEngine::new(Vec::new()).evaluate(&games);

        prop_assert_eq!(participants.len(), expected.len());
        for participant in &participants {
            prop_assert_eq!(Some(&participant.game_count), expected.get(&participant.name));
        }
    }

    #[test]
    fn replay_from_same_seed_is_identical(
        games in prop::collection::vec(game_strategy(), 0..40),
        seed_rating in 1000i64..2000,
    ) {
        let known = vec![Participant::new("player_0", seed_rating, 3)];

        let first = RatingEngine::new(known.clone()).evaluate(&games);
        let second = RatingEngine::new(known).evaluate(&games);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn deltas_are_bounded_for_unit_results(
        rating_a in 800i64..2400,
        rating_b in 800i64..2400,
        outcome in prop::sample::select(vec![(1.0, 0.0), (0.5, 0.5), (0.0, 1.0)]),
    ) {
        let known = vec![
            Participant::new("a", rating_a, 0),
            Participant::new("b", rating_b, 0),
        ];
        let mut engine = RatingEngine::new(known);
        let change = engine.apply(&GameRecord::new("a", "b", outcome.0, outcome.1));

        prop_assert!(change.first_delta.abs() <= 100);
        prop_assert!(change.second_delta.abs() <= 100);
        // Truncation keeps the pair zero-sum up to one point
        prop_assert!((change.first_delta + change.second_delta).abs() <= 1);
    }
}
