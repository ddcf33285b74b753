//! Team Elo rating implementation
//!
//! This module provides the concrete settlement calculator. Each member's
//! rating delta blends two parts: a team component `K·alpha·(V − E)/N` shared
//! equally across the roster, and an individual component driven by the
//! member's in-team rank, corrected to sum to zero so it redistributes rating
//! mass within the team without changing the team's total.

use crate::config::TeamEloConfig;
use crate::error::{RatingError, Result};
use crate::rating::calculator::{RatingCalculator, Settlement, TeamSettlement};
use crate::team::Team;
use crate::types::{MatchOutcome, MatchResult, Player, Rankings, RatingChange};
use crate::utils;
use tracing::{debug, trace};

/// Expected score of `rating` against `opponent_rating`
///
/// The standard logistic win probability
/// `1 / (1 + 10^((opponent_rating − rating) / scale))`. Satisfies
/// `expected_score(a, b, s) + expected_score(b, a, s) == 1` up to
/// floating-point rounding. Used both team-vs-team (on average ratings) and
/// individual-vs-teammate.
pub fn expected_score(rating: f64, opponent_rating: f64, scale: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent_rating - rating) / scale))
}

/// Team Elo settlement calculator
#[derive(Debug, Clone)]
pub struct TeamEloCalculator {
    config: TeamEloConfig,
}

impl Default for TeamEloCalculator {
    fn default() -> Self {
        Self {
            config: TeamEloConfig::default(),
        }
    }
}

impl TeamEloCalculator {
    /// Create a new team Elo calculator
    pub fn new(config: TeamEloConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Mean expected score of `player` against each teammate
    ///
    /// Only meaningful for rosters of two or more; callers guard the team
    /// size.
    fn expected_individual_score(&self, player: &Player, team: &Team) -> f64 {
        let mut total = 0.0;
        for other in team.players() {
            if other.id == player.id {
                continue;
            }
            total += expected_score(player.rating, other.rating, self.config.scale);
        }

        total / (team.len() - 1) as f64
    }

    /// Check that the rank map covers the roster exactly
    ///
    /// Together with the permutation check at `MatchResult` construction this
    /// guarantees ranks form a bijection with member ids. Runs before any
    /// change is computed, so a bad map never yields a partial settlement.
    fn verify_rankings(team: &Team, rankings: &Rankings) -> Result<()> {
        if rankings.len() != team.len() {
            return Err(RatingError::InvalidRankings {
                reason: format!(
                    "rank map has {} entries for a roster of {}",
                    rankings.len(),
                    team.len()
                ),
            }
            .into());
        }

        for player in team.players() {
            if !rankings.contains_key(&player.id) {
                return Err(RatingError::MissingRank {
                    player_id: player.id.clone(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Compute rating changes for one side
    fn team_changes(
        &self,
        team: &Team,
        expected: f64,
        outcome: MatchOutcome,
        rankings: &Rankings,
    ) -> Vec<RatingChange> {
        let n = team.len();
        let score = outcome.score();

        // Fewer than two members: no intra-team comparison is possible, so
        // the whole K applies to the team result.
        if n < 2 {
            return team
                .players()
                .iter()
                .map(|player| {
                    let delta = self.config.k * (score - expected);
                    RatingChange {
                        player_id: player.id.clone(),
                        old_rating: player.rating,
                        new_rating: player.rating + delta,
                        rank: rankings[&player.id],
                        team_component: delta,
                        individual_component: 0.0,
                    }
                })
                .collect();
        }

        let team_delta = self.config.k * self.config.alpha * (score - expected) / n as f64;

        // Preliminary individual deltas from rank-normalized actual scores
        // versus pairwise expected scores.
        let mut preliminary = Vec::with_capacity(n);
        for player in team.players() {
            let rank = rankings[&player.id];
            let actual = (n as f64 - rank as f64) / (n as f64 - 1.0);
            let expected_indiv = self.expected_individual_score(player, team);
            preliminary.push(self.config.k * (1.0 - self.config.alpha) * (actual - expected_indiv));
        }

        // Zero-sum correction: the individual component must redistribute
        // rating mass within the team, never change its total.
        let correction = preliminary.iter().sum::<f64>() / n as f64;

        team.players()
            .iter()
            .zip(preliminary)
            .map(|(player, prelim)| {
                let individual = prelim - correction;
                let delta = team_delta + individual;
                RatingChange {
                    player_id: player.id.clone(),
                    old_rating: player.rating,
                    new_rating: player.rating + delta,
                    rank: rankings[&player.id],
                    team_component: team_delta,
                    individual_component: individual,
                }
            })
            .collect()
    }
}

impl RatingCalculator for TeamEloCalculator {
    fn settle(&self, team_a: &Team, team_b: &Team, result: &MatchResult) -> Result<Settlement> {
        // Surface ranking problems for both sides before computing anything.
        Self::verify_rankings(team_a, result.rankings_a())?;
        Self::verify_rankings(team_b, result.rankings_b())?;

        let avg_a = team_a.average_rating();
        let avg_b = team_b.average_rating();
        let expected_a = expected_score(avg_a, avg_b, self.config.scale);
        let expected_b = expected_score(avg_b, avg_a, self.config.scale);

        let match_id = utils::generate_match_id();
        debug!(
            "settling match {}: {} avg {:.1} vs avg {:.1}, expected {:.3}/{:.3}",
            match_id,
            result.team_a_outcome(),
            avg_a,
            avg_b,
            expected_a,
            expected_b
        );

        let changes_a =
            self.team_changes(team_a, expected_a, result.team_a_outcome(), result.rankings_a());
        let changes_b =
            self.team_changes(team_b, expected_b, result.team_b_outcome(), result.rankings_b());

        for change in changes_a.iter().chain(changes_b.iter()) {
            trace!(
                "rating change for {}: {:.2} -> {:.2} (rank {})",
                change.player_id,
                change.old_rating,
                change.new_rating,
                change.rank
            );
        }

        Ok(Settlement {
            match_id,
            settled_at: utils::current_timestamp(),
            team_a: TeamSettlement {
                outcome: result.team_a_outcome(),
                expected_score: expected_a,
                changes: changes_a,
            },
            team_b: TeamSettlement {
                outcome: result.team_b_outcome(),
                expected_score: expected_b,
                changes: changes_b,
            },
        })
    }

    fn initial_rating(&self) -> f64 {
        self.config.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }
}
