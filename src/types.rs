//! Common types used throughout the rating engine

use crate::error::{RatingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for players
pub type PlayerId = String;

/// Unique identifier for settled matches
pub type MatchId = Uuid;

/// Mapping from player id to in-team rank (1 = best)
pub type Rankings = HashMap<PlayerId, u32>;

/// Rating assigned to players created without an explicit one
pub const DEFAULT_RATING: f64 = 1500.0;

/// An individual competitor with a mutable skill rating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub rating: f64,
}

impl Player {
    /// Create a player at the default rating
    pub fn new(id: impl Into<PlayerId>) -> Self {
        Self::with_rating(id, DEFAULT_RATING)
    }

    /// Create a player at a specific rating
    pub fn with_rating(id: impl Into<PlayerId>, rating: f64) -> Self {
        Self {
            id: id.into(),
            rating,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.2}", self.id, self.rating)
    }
}

/// Match outcome from one side's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchOutcome {
    /// Numeric score used by the rating update
    pub fn score(self) -> f64 {
        match self {
            MatchOutcome::Win => 1.0,
            MatchOutcome::Draw => 0.5,
            MatchOutcome::Loss => 0.0,
        }
    }

    /// Outcome seen by the opposing side
    pub fn opposing(self) -> MatchOutcome {
        match self {
            MatchOutcome::Win => MatchOutcome::Loss,
            MatchOutcome::Draw => MatchOutcome::Draw,
            MatchOutcome::Loss => MatchOutcome::Win,
        }
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchOutcome::Win => write!(f, "Win"),
            MatchOutcome::Draw => write!(f, "Draw"),
            MatchOutcome::Loss => write!(f, "Loss"),
        }
    }
}

/// Rating change for one player produced by a settlement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingChange {
    pub player_id: PlayerId,
    pub old_rating: f64,
    pub new_rating: f64,
    /// In-team rank this change was computed from (1 = best)
    pub rank: u32,
    /// Portion of the delta shared equally across the team
    pub team_component: f64,
    /// Zero-sum portion driven by in-team rank
    pub individual_component: f64,
}

impl RatingChange {
    /// Total rating delta for this player
    pub fn delta(&self) -> f64 {
        self.new_rating - self.old_rating
    }
}

/// Immutable snapshot of one match's outcome and in-team rankings
///
/// Side B's outcome is derived from side A's at construction (Win↔Loss,
/// Draw↔Draw) and cached. Each rank map must assign the ranks `1..=N` exactly
/// once across its own entries; construction fails fast otherwise.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    team_a_outcome: MatchOutcome,
    team_b_outcome: MatchOutcome,
    rankings_a: Rankings,
    rankings_b: Rankings,
}

impl MatchResult {
    /// Create a match result from side A's outcome and both rank maps
    pub fn new(
        team_a_outcome: MatchOutcome,
        rankings_a: Rankings,
        rankings_b: Rankings,
    ) -> Result<Self> {
        validate_rank_map(&rankings_a)?;
        validate_rank_map(&rankings_b)?;

        Ok(Self {
            team_a_outcome,
            team_b_outcome: team_a_outcome.opposing(),
            rankings_a,
            rankings_b,
        })
    }

    /// Outcome for team A
    pub fn team_a_outcome(&self) -> MatchOutcome {
        self.team_a_outcome
    }

    /// Derived outcome for team B
    pub fn team_b_outcome(&self) -> MatchOutcome {
        self.team_b_outcome
    }

    /// In-team rankings for team A
    pub fn rankings_a(&self) -> &Rankings {
        &self.rankings_a
    }

    /// In-team rankings for team B
    pub fn rankings_b(&self) -> &Rankings {
        &self.rankings_b
    }
}

/// Check that a rank map's values are a permutation of `1..=N`
fn validate_rank_map(rankings: &Rankings) -> Result<()> {
    let n = rankings.len();
    let mut seen = vec![false; n];

    for (player_id, &rank) in rankings {
        if rank == 0 || rank as usize > n {
            return Err(RatingError::InvalidRankings {
                reason: format!(
                    "rank {} for player {} out of bounds for {} entries",
                    rank, player_id, n
                ),
            }
            .into());
        }
        if seen[rank as usize - 1] {
            return Err(RatingError::InvalidRankings {
                reason: format!("rank {} assigned more than once", rank),
            }
            .into());
        }
        seen[rank as usize - 1] = true;
    }

    Ok(())
}
