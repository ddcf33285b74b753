//! Team-based Elo rating core
//!
//! This module provides the settlement calculator trait, the settlement
//! result types, and the team Elo implementation that blends a shared team
//! component with a zero-sum individual component.

pub mod calculator;
pub mod team_elo;

// Re-export commonly used types
pub use calculator::{NoOpRatingCalculator, RatingCalculator, Settlement, TeamSettlement};
pub use team_elo::{expected_score, TeamEloCalculator};
