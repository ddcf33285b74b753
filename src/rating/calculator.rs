//! Rating calculator trait and settlement types
//!
//! This module defines the interface for match settlement and the types a
//! settlement produces. Settlement is a pure computation: calculators return
//! the full set of rating changes without touching the rosters, and callers
//! apply them as an explicit second step.

use crate::error::Result;
use crate::team::Team;
use crate::types::{MatchId, MatchOutcome, MatchResult, RatingChange, DEFAULT_RATING};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rating changes for one side of a settled match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSettlement {
    /// Outcome from this side's perspective
    pub outcome: MatchOutcome,
    /// Expected score of this side against the opponent
    pub expected_score: f64,
    /// One change per roster member
    pub changes: Vec<RatingChange>,
}

impl TeamSettlement {
    /// Sum of all member deltas on this side
    pub fn total_delta(&self) -> f64 {
        self.changes.iter().map(|c| c.delta()).sum()
    }
}

/// Result of settling one match between two teams
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    pub match_id: MatchId,
    pub settled_at: DateTime<Utc>,
    pub team_a: TeamSettlement,
    pub team_b: TeamSettlement,
}

impl Settlement {
    /// Apply both sides' changes to the rosters, mutating member ratings
    ///
    /// Each team is updated all-or-nothing; a settlement computed from these
    /// rosters always applies cleanly.
    pub fn apply(&self, team_a: &mut Team, team_b: &mut Team) -> Result<()> {
        team_a.apply(&self.team_a.changes)?;
        team_b.apply(&self.team_b.changes)?;
        Ok(())
    }
}

/// Trait for computing rating settlements after matches
pub trait RatingCalculator: Send + Sync {
    /// Compute rating changes for both teams of a finished match
    ///
    /// # Arguments
    /// * `team_a` / `team_b` - the two rosters, read-only
    /// * `result` - one side's outcome plus both teams' in-team rankings
    ///
    /// # Returns
    /// A settlement carrying every member's rating change. Nothing is mutated;
    /// apply the settlement to the rosters explicitly.
    fn settle(&self, team_a: &Team, team_b: &Team, result: &MatchResult) -> Result<Settlement>;

    /// Get the initial rating for new players
    fn initial_rating(&self) -> f64;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

/// Simple rating calculator for testing or fallback
///
/// Produces a settlement in which every rating is unchanged.
#[derive(Debug, Clone)]
pub struct NoOpRatingCalculator {
    initial_rating: f64,
}

impl NoOpRatingCalculator {
    /// Create a new no-op rating calculator
    pub fn new(initial_rating: f64) -> Self {
        Self { initial_rating }
    }
}

impl Default for NoOpRatingCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_RATING)
    }
}

impl NoOpRatingCalculator {
    fn unchanged(team: &Team, result_rankings: &crate::types::Rankings) -> Vec<RatingChange> {
        team.players()
            .iter()
            .map(|player| RatingChange {
                player_id: player.id.clone(),
                old_rating: player.rating,
                new_rating: player.rating,
                rank: result_rankings.get(&player.id).copied().unwrap_or(1),
                team_component: 0.0,
                individual_component: 0.0,
            })
            .collect()
    }
}

impl RatingCalculator for NoOpRatingCalculator {
    fn settle(&self, team_a: &Team, team_b: &Team, result: &MatchResult) -> Result<Settlement> {
        Ok(Settlement {
            match_id: crate::utils::generate_match_id(),
            settled_at: crate::utils::current_timestamp(),
            team_a: TeamSettlement {
                outcome: result.team_a_outcome(),
                expected_score: 0.5,
                changes: Self::unchanged(team_a, result.rankings_a()),
            },
            team_b: TeamSettlement {
                outcome: result.team_b_outcome(),
                expected_score: 0.5,
                changes: Self::unchanged(team_b, result.rankings_b()),
            },
        })
    }

    fn initial_rating(&self) -> f64 {
        self.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "no_op",
            "initial_rating": self.initial_rating,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Player, Rankings};

    fn team_of(ids: &[&str]) -> Team {
        Team::new(ids.iter().map(|id| Player::new(*id)).collect()).unwrap()
    }

    fn ordered_rankings(ids: &[&str]) -> Rankings {
        ids.iter()
            .enumerate()
            .map(|(i, id)| (id.to_string(), i as u32 + 1))
            .collect()
    }

    #[test]
    fn test_noop_settlement_keeps_ratings() {
        let calculator = NoOpRatingCalculator::default();
        let team_a = team_of(&["a1", "a2"]);
        let team_b = team_of(&["b1", "b2"]);
        let result = MatchResult::new(
            MatchOutcome::Win,
            ordered_rankings(&["a1", "a2"]),
            ordered_rankings(&["b1", "b2"]),
        )
        .unwrap();

        let settlement = calculator.settle(&team_a, &team_b, &result).unwrap();

        assert_eq!(settlement.team_a.changes.len(), 2);
        assert_eq!(settlement.team_b.changes.len(), 2);
        for change in settlement
            .team_a
            .changes
            .iter()
            .chain(settlement.team_b.changes.iter())
        {
            assert_eq!(change.old_rating, change.new_rating);
        }
        assert_eq!(settlement.team_a.total_delta(), 0.0);

        // Ranks are carried through from the supplied rankings.
        assert_eq!(settlement.team_a.changes[0].rank, 1);
        assert_eq!(settlement.team_a.changes[1].rank, 2);
    }

    #[test]
    fn test_noop_initial_rating() {
        let calculator = NoOpRatingCalculator::new(1200.0);
        assert_eq!(calculator.initial_rating(), 1200.0);

        let config = calculator.config();
        assert_eq!(config["type"], "no_op");
        assert_eq!(config["initial_rating"], 1200.0);
    }

    #[test]
    fn test_apply_round_trip() {
        let calculator = NoOpRatingCalculator::default();
        let mut team_a = team_of(&["a1"]);
        let mut team_b = team_of(&["b1"]);
        let result = MatchResult::new(
            MatchOutcome::Draw,
            ordered_rankings(&["a1"]),
            ordered_rankings(&["b1"]),
        )
        .unwrap();

        let settlement = calculator.settle(&team_a, &team_b, &result).unwrap();
        settlement.apply(&mut team_a, &mut team_b).unwrap();

        assert_eq!(team_a.rating_of("a1"), Some(1500.0));
        assert_eq!(team_b.rating_of("b1"), Some(1500.0));
    }
}
