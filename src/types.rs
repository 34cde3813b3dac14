//! Common types used throughout the rating service

use crate::error::{LadderError, Result};
use serde::{Deserialize, Serialize};

/// Display name of a participant, the registry key
pub type ParticipantName = String;

/// Rating assigned to participants seen for the first time
pub const DEFAULT_RATING: i64 = 1500;

/// Column labels for the name, rating and game count columns of a rating sheet
pub const PARTICIPANT_COLUMN_TITLES: [&str; 3] = ["Имя", "Рейтинг", "Кол-во игр"];

/// Column labels of a game sheet, in `GameRecord::from_row` field order
pub const GAME_COLUMN_TITLES: [&str; 4] = ["Игрок 1", "Игрок 2", "Очки 1", "Очки 2"];

/// A rated participant and the number of games processed for them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: ParticipantName,
    pub rating: i64,
    pub game_count: u32,
}

impl Participant {
    /// Create a participant, trimming surrounding whitespace from the name
    pub fn new(name: impl AsRef<str>, rating: i64, game_count: u32) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            rating,
            game_count,
        }
    }

    /// Create a participant with the default rating and no games played
    pub fn with_defaults(name: impl AsRef<str>) -> Self {
        Self::new(name, DEFAULT_RATING, 0)
    }

    /// Cell values in `PARTICIPANT_COLUMN_TITLES` order
    pub fn to_row(&self) -> [String; 3] {
        [
            self.name.clone(),
            self.rating.to_string(),
            self.game_count.to_string(),
        ]
    }
}

/// Outcome of a single game between two participants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub first_player: ParticipantName,
    pub second_player: ParticipantName,
    pub first_player_score: f64,
    pub second_player_score: f64,
}

impl GameRecord {
    /// Number of positional fields a game record row must have
    pub const ROW_LEN: usize = 4;

    pub fn new(
        first_player: impl Into<String>,
        second_player: impl Into<String>,
        first_player_score: f64,
        second_player_score: f64,
    ) -> Self {
        Self {
            first_player: first_player.into(),
            second_player: second_player.into(),
            first_player_score,
            second_player_score,
        }
    }

    /// Decode a game record from its positional fields:
    /// first name, second name, first score, second score.
    pub fn from_row<S: AsRef<str>>(row: &[S]) -> Result<Self> {
        let owned_row = || row.iter().map(|c| c.as_ref().to_string()).collect::<Vec<_>>();

        if row.len() != Self::ROW_LEN {
            return Err(LadderError::MalformedGameRecord {
                row: owned_row(),
                expected: Self::ROW_LEN,
            }
            .into());
        }

        let parse_score = |value: &str| -> Result<f64> {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|score| score.is_finite())
                .ok_or_else(|| {
                    LadderError::InvalidScore {
                        value: value.to_string(),
                        row: owned_row(),
                    }
                    .into()
                })
        };

        Ok(Self {
            first_player: row[0].as_ref().to_string(),
            second_player: row[1].as_ref().to_string(),
            first_player_score: parse_score(row[2].as_ref())?,
            second_player_score: parse_score(row[3].as_ref())?,
        })
    }

    /// Signed score margin from the first player's point of view
    pub fn score_diff(&self) -> f64 {
        self.first_player_score - self.second_player_score
    }
}

/// Integer rating deltas applied for one processed game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub first_player: ParticipantName,
    pub first_delta: i64,
    pub second_player: ParticipantName,
    pub second_delta: i64,
}

impl std::fmt::Display for RatingChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) <--> {} ({})",
            self.first_player,
            signed(self.first_delta),
            self.second_player,
            signed(self.second_delta)
        )
    }
}

fn signed(delta: i64) -> String {
    if delta > 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}
