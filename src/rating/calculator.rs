//! Rating calculator trait
//!
//! This module defines the interface the rating engine uses to turn a single
//! head-to-head result into new ratings for both sides.

/// Trait for calculating rating changes after a two-player game
pub trait RatingCalculator: Send + Sync {
    /// Get the initial rating for participants seen for the first time
    fn initial_rating(&self) -> i64;

    /// Expected scores of both sides, derived from their current ratings.
    /// The two values sum to 1.
    fn expected_score(&self, rating_a: i64, rating_b: i64) -> (f64, f64);

    /// Calculate new ratings for both sides of a game
    ///
    /// # Arguments
    /// * `rating_a` - Current rating of the first participant
    /// * `rating_b` - Current rating of the second participant
    /// * `score_diff` - First participant's score minus the second's
    ///
    /// # Returns
    /// Real-valued new ratings `(a, b)`; callers decide how to round them
    fn rate(&self, rating_a: i64, rating_b: i64, score_diff: f64) -> (f64, f64);
}
