//! Test fixtures and builders for settlement testing

use team_elo::config::TeamEloConfig;
use team_elo::rating::TeamEloCalculator;
use team_elo::team::Team;
use team_elo::types::{Player, Rankings};

/// Build a team from explicit (id, rating) pairs
pub fn team_of(ratings: &[(&str, f64)]) -> Team {
    Team::new(
        ratings
            .iter()
            .map(|(id, rating)| Player::with_rating(*id, *rating))
            .collect(),
    )
    .unwrap()
}

/// Build a team of `size` members at a uniform rating, ids `prefix1..prefixN`
pub fn even_team(prefix: &str, size: usize, rating: f64) -> Team {
    Team::new(
        (1..=size)
            .map(|i| Player::with_rating(format!("{}{}", prefix, i), rating))
            .collect(),
    )
    .unwrap()
}

/// Rank map assigning 1, 2, ... in the order the ids are given
pub fn ordered_rankings(ids: &[&str]) -> Rankings {
    ids.iter()
        .enumerate()
        .map(|(i, id)| (id.to_string(), i as u32 + 1))
        .collect()
}

/// Rank map following roster order
pub fn roster_order_rankings(team: &Team) -> Rankings {
    team.players()
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.clone(), i as u32 + 1))
        .collect()
}

/// Calculator at the standard coefficients (K=32, alpha=0.7, scale=400)
pub fn reference_calculator() -> TeamEloCalculator {
    TeamEloCalculator::new(TeamEloConfig {
        k: 32.0,
        alpha: 0.7,
        scale: 400.0,
        initial_rating: 1500.0,
    })
    .unwrap()
}
