//! Error types for the rating service
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, thiserror::Error)]
pub enum LadderError {
    #[error("Can't create GameRecord from row_data: {row:?} (length = {expected} is required)")]
    MalformedGameRecord { row: Vec<String>, expected: usize },

    #[error("Invalid score '{value}' in game record row {row:?}")]
    InvalidScore { value: String, row: Vec<String> },

    #[error("Invalid participant row {row:?}: {reason}")]
    InvalidParticipantRow { row: Vec<String>, reason: String },

    #[error("File is too large: {size_bytes} bytes (limit {limit_mb} MB)")]
    FileTooLarge { size_bytes: u64, limit_mb: u64 },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
