//! Team Elo - Rating engine for team-based matches
//!
//! This crate settles matches between two teams of rated players. Team
//! results move each roster by a shared Elo-style delta, while in-team
//! rankings redistribute rating between teammates without changing the
//! team's total.

pub mod config;
pub mod error;
pub mod rating;
pub mod team;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use config::TeamEloConfig;
pub use rating::{expected_score, RatingCalculator, Settlement, TeamEloCalculator};
pub use team::Team;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
