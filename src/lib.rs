//! Elo Ladder - rating updates for head-to-head game results
//!
//! This crate replays game records through a pairwise Elo engine, reads and
//! writes rating sheets, and runs the chat dialogue that exchanges them.

pub mod config;
pub mod error;
pub mod rating;
pub mod session;
pub mod sheet;
pub mod types;

// Re-export commonly used types and traits
pub use error::{LadderError, Result};
pub use types::*;

// Re-export key components
pub use rating::{RatingCalculator, RatingEngine};
pub use session::Conversation;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
