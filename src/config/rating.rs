//! Rating system configuration

use crate::rating::EloConfig;
use crate::types::DEFAULT_RATING;
use serde::{Deserialize, Serialize};

/// Elo parameters applied to every computation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    pub k_factor: f64,
    pub home_advantage: f64,
    pub initial_rating: i64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            k_factor: 100.0,
            home_advantage: 0.0,
            initial_rating: DEFAULT_RATING,
        }
    }
}

impl From<&RatingSettings> for EloConfig {
    fn from(settings: &RatingSettings) -> Self {
        Self {
            k_factor: settings.k_factor,
            home_advantage: settings.home_advantage,
            initial_rating: settings.initial_rating,
        }
    }
}
