//! Team rosters
//!
//! A team is a duplicate-free collection of players that competes as one side
//! of a match. Rosters are immutable apart from applying settled rating
//! changes.

use crate::error::{RatingError, Result};
use crate::types::{Player, RatingChange};
use crate::utils;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One side of a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    players: Vec<Player>,
}

impl Team {
    /// Create a team, rejecting duplicate player ids
    pub fn new(players: Vec<Player>) -> Result<Self> {
        let mut seen = HashSet::new();
        for player in &players {
            if !seen.insert(player.id.as_str()) {
                return Err(RatingError::DuplicatePlayer {
                    player_id: player.id.clone(),
                }
                .into());
            }
        }

        Ok(Self { players })
    }

    /// Members of this team
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the roster is empty
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Arithmetic mean of member ratings; 0.0 for an empty team by convention
    pub fn average_rating(&self) -> f64 {
        let ratings: Vec<f64> = self.players.iter().map(|p| p.rating).collect();
        utils::mean(&ratings)
    }

    /// Whether a player id is on the roster
    pub fn contains(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    /// Current rating of a member, if present
    pub fn rating_of(&self, player_id: &str) -> Option<f64> {
        self.players
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| p.rating)
    }

    /// Apply settled rating changes to the roster, mutating member ratings
    ///
    /// All-or-nothing: every change is checked against the roster before any
    /// rating is touched, so an unknown player id leaves the team unchanged.
    pub fn apply(&mut self, changes: &[RatingChange]) -> Result<()> {
        for change in changes {
            if !self.contains(&change.player_id) {
                return Err(RatingError::UnknownPlayer {
                    player_id: change.player_id.clone(),
                }
                .into());
            }
        }

        for change in changes {
            if let Some(player) = self.players.iter_mut().find(|p| p.id == change.player_id) {
                player.rating = change.new_rating;
            }
        }

        Ok(())
    }
}
