//! Elo rating system implementation
//!
//! This module provides a concrete implementation of the rating calculator
//! using the logistic Elo expectation from the skillratings crate, generalised
//! from win/draw/loss to signed score margins.

use crate::error::LadderError;
use crate::rating::calculator::RatingCalculator;
use crate::types::DEFAULT_RATING;
use serde::{Deserialize, Serialize};
use skillratings::elo::EloRating;

/// Configuration for the Elo rating system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EloConfig {
    /// Maximum rating movement for a single unit of surprise
    pub k_factor: f64,
    /// Rating bonus granted to the first participant when computing expectations
    pub home_advantage: f64,
    /// Rating for newly registered participants
    pub initial_rating: i64,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k_factor: 100.0,
            home_advantage: 0.0,
            initial_rating: DEFAULT_RATING,
        }
    }
}

impl EloConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(LadderError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        if !self.home_advantage.is_finite() {
            return Err(LadderError::ConfigurationError {
                message: "Home advantage must be finite".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Elo rating calculator implementation
#[derive(Debug, Clone, Default)]
pub struct EloRatingCalculator {
    config: EloConfig,
}

impl EloRatingCalculator {
    /// Create a new Elo rating calculator
    pub fn new(config: EloConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &EloConfig {
        &self.config
    }

    /// Map a score margin onto the classical `[0, 1]` outcome scale.
    ///
    /// +1, 0 and -1 become 1, 0.5 and 0. Larger margins keep scaling linearly.
    pub fn outcome(score_diff: f64) -> f64 {
        0.5 + score_diff / 2.0
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn initial_rating(&self) -> i64 {
        self.config.initial_rating
    }

    fn expected_score(&self, rating_a: i64, rating_b: i64) -> (f64, f64) {
        let player_a = EloRating {
            rating: rating_a as f64 + self.config.home_advantage,
        };
        let player_b = EloRating {
            rating: rating_b as f64,
        };

        skillratings::elo::expected_score(&player_a, &player_b)
    }

    fn rate(&self, rating_a: i64, rating_b: i64, score_diff: f64) -> (f64, f64) {
        let (expected_a, expected_b) = self.expected_score(rating_a, rating_b);

        let outcome_a = Self::outcome(score_diff);
        let outcome_b = 1.0 - outcome_a;

        let k = self.config.k_factor;
        (
            rating_a as f64 + k * (outcome_a - expected_a),
            rating_b as f64 + k * (outcome_b - expected_b),
        )
    }
}
