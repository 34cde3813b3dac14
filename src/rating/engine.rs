//! Rating engine
//!
//! Applies game records strictly in input order against an owned participant
//! registry. Every game mutates the ratings the next game sees, so the result
//! depends on the order of the records.

use crate::rating::calculator::RatingCalculator;
use crate::rating::elo::EloRatingCalculator;
use crate::rating::registry::ParticipantRegistry;
use crate::types::{GameRecord, Participant, RatingChange};
use std::cmp::Reverse;
use tracing::{debug, info};

/// Rating engine for a single computation run
#[derive(Debug)]
pub struct RatingEngine<C: RatingCalculator = EloRatingCalculator> {
    calculator: C,
    registry: ParticipantRegistry,
    changes: Vec<RatingChange>,
}

impl RatingEngine<EloRatingCalculator> {
    /// Create an engine with the default Elo settings, seeded with known participants
    pub fn new<I>(known: I) -> Self
    where
        I: IntoIterator<Item = Participant>,
    {
        Self::with_calculator(EloRatingCalculator::default(), known)
    }
}

impl<C: RatingCalculator> RatingEngine<C> {
    /// Create an engine using the given calculator, seeded with known participants
    pub fn with_calculator<I>(calculator: C, known: I) -> Self
    where
        I: IntoIterator<Item = Participant>,
    {
        let mut registry = ParticipantRegistry::new(calculator.initial_rating());
        registry.seed(known);
        debug!("Rating engine seeded with {} participants", registry.len());

        Self {
            calculator,
            registry,
            changes: Vec::new(),
        }
    }

    /// Apply a single game and return the integer deltas it produced
    pub fn apply(&mut self, game: &GameRecord) -> RatingChange {
        let rating_a = self.registry.resolve(&game.first_player).rating;
        let rating_b = self.registry.resolve(&game.second_player).rating;

        let (new_a, new_b) = self.calculator.rate(rating_a, rating_b, game.score_diff());

        // Truncated toward zero so stored ratings stay integral. Float to int
        // casts saturate, and the additions below saturate at the i64 bounds.
        let first_delta = (new_a - rating_a as f64) as i64;
        let second_delta = (new_b - rating_b as f64) as i64;

        let first = self.registry.resolve(&game.first_player);
        first.game_count = first.game_count.saturating_add(1);
        first.rating = first.rating.saturating_add(first_delta);
        let first_player = first.name.clone();

        let second = self.registry.resolve(&game.second_player);
        second.game_count = second.game_count.saturating_add(1);
        second.rating = second.rating.saturating_add(second_delta);
        let second_player = second.name.clone();

        let change = RatingChange {
            first_player,
            first_delta,
            second_player,
            second_delta,
        };
        info!("{}", change);

        self.changes.push(change.clone());
        change
    }

    /// Apply all games in order and return every participant in the registry,
    /// seeded ones first, then the rest in the order they were first referenced.
    pub fn evaluate<'a, I>(&mut self, games: I) -> Vec<Participant>
    where
        I: IntoIterator<Item = &'a GameRecord>,
    {
        let mut processed = 0usize;
        for game in games {
            self.apply(game);
            processed += 1;
        }

        info!(
            "Processed {} games, {} participants rated",
            processed,
            self.registry.len()
        );

        self.participants()
    }

    /// Snapshot of the current participant state
    pub fn participants(&self) -> Vec<Participant> {
        self.registry.iter().cloned().collect()
    }

    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.registry.get(name)
    }

    /// Deltas of every game applied so far, in application order
    pub fn changes(&self) -> &[RatingChange] {
        &self.changes
    }
}

/// Sort participants for presentation: highest rating first, ties by name
pub fn rank_participants(participants: &mut [Participant]) {
    participants.sort_by(|a, b| {
        Reverse(a.rating)
            .cmp(&Reverse(b.rating))
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::elo::EloConfig;

    #[test]
    fn test_single_win_between_new_participants() {
        let mut engine = RatingEngine::new(Vec::new());
        let change = engine.apply(&GameRecord::new("A", "B", 1.0, 0.0));

        assert_eq!(change.first_delta, 50);
        assert_eq!(change.second_delta, -50);
        assert_eq!(engine.participant("A").unwrap().rating, 1550);
        assert_eq!(engine.participant("B").unwrap().rating, 1450);
        assert_eq!(engine.participant("A").unwrap().game_count, 1);
    }

    #[test]
    fn test_delta_is_truncated_toward_zero() {
        // Expectation for the 1500 side against 1450 is ~0.5715, so a draw
        // moves it by ~-7.15 and the other side by ~+7.15.
        let known = vec![Participant::new("A", 1500, 0), Participant::new("B", 1450, 0)];
        let mut engine = RatingEngine::new(known);
        let change = engine.apply(&GameRecord::new("A", "B", 0.5, 0.5));

        assert_eq!(change.first_delta, -7);
        assert_eq!(change.second_delta, 7);
        assert_eq!(engine.participant("A").unwrap().rating, 1493);
        assert_eq!(engine.participant("B").unwrap().rating, 1457);
    }

    #[test]
    fn test_names_are_trimmed_on_resolution() {
        let mut engine = RatingEngine::new(vec![Participant::new("Марк", 1600, 2)]);
        engine.apply(&GameRecord::new(" Марк ", "Регина", 0.0, 1.0));

        let participants = engine.participants();
        assert_eq!(participants.len(), 2);
        assert_eq!(engine.participant("Марк").unwrap().game_count, 3);
    }

    #[test]
    fn test_changes_are_recorded_in_order() {
        let mut engine = RatingEngine::new(Vec::new());
        let games = vec![
            GameRecord::new("A", "B", 1.0, 0.0),
            GameRecord::new("B", "C", 1.0, 0.0),
        ];
        engine.evaluate(&games);

        let changes = engine.changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].first_player, "A");
        assert_eq!(changes[1].first_player, "B");
    }

    #[test]
    fn test_custom_calculator_settings() {
        let calculator = EloRatingCalculator::new(EloConfig {
            k_factor: 32.0,
            initial_rating: 1000,
            ..EloConfig::default()
        })
        .unwrap();
        let mut engine = RatingEngine::with_calculator(calculator, Vec::new());
        engine.apply(&GameRecord::new("A", "B", 1.0, 0.0));

        assert_eq!(engine.participant("A").unwrap().rating, 1016);
        assert_eq!(engine.participant("B").unwrap().rating, 984);
    }

    #[test]
    fn test_huge_score_margin_saturates_ratings() {
        let mut engine = RatingEngine::new(Vec::new());
        let game = GameRecord::from_row(&["A", "B", "1e18", "0"][..]).unwrap();
        let change = engine.apply(&game);

        assert_eq!(change.first_delta, i64::MAX);
        assert_eq!(change.second_delta, i64::MIN);
        assert_eq!(engine.participant("A").unwrap().rating, i64::MAX);
        assert_eq!(engine.participant("B").unwrap().rating, i64::MIN + 1500);
        assert_eq!(engine.participant("B").unwrap().game_count, 1);
    }

    #[test]
    fn test_extreme_seeded_values_saturate() {
        let known = vec![
            Participant::new("A", i64::MAX - 10, u32::MAX),
            Participant::new("B", 1500, 0),
        ];
        let mut engine = RatingEngine::new(known);
        engine.apply(&GameRecord::new("A", "B", 1.0, 0.0));
        engine.apply(&GameRecord::new("A", "B", 1.0, 0.0));

        let a = engine.participant("A").unwrap();
        assert_eq!(a.game_count, u32::MAX);
        assert!(a.rating >= i64::MAX - 10);
        assert_eq!(engine.participant("B").unwrap().game_count, 2);
    }

    #[test]
    fn test_rank_participants() {
        let mut participants = vec![
            Participant::new("b", 1500, 1),
            Participant::new("c", 1600, 1),
            Participant::new("a", 1500, 1),
        ];
        rank_participants(&mut participants);

        let names: Vec<_> = participants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
