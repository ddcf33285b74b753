//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("No rank supplied for player: {player_id}")]
    MissingRank { player_id: String },

    #[error("Invalid rankings: {reason}")]
    InvalidRankings { reason: String },

    #[error("Duplicate player in team: {player_id}")]
    DuplicatePlayer { player_id: String },

    #[error("Player not found on roster: {player_id}")]
    UnknownPlayer { player_id: String },

    #[error("Configuration error: {message}")]
    InvalidConfiguration { message: String },
}
