//! Rating system built on the Elo expectation curve
//!
//! This module provides the pairwise rating calculation, the participant
//! registry and the engine that replays game records through both.

pub mod calculator;
pub mod elo;
pub mod engine;
pub mod registry;

// Re-export commonly used types
pub use calculator::RatingCalculator;
pub use elo::{EloConfig, EloRatingCalculator};
pub use engine::{rank_participants, RatingEngine};
pub use registry::ParticipantRegistry;
