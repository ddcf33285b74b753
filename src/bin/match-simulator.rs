//! Match Simulator CLI Tool
//!
//! Command-line tool for settling matches and watching ratings converge over
//! simulated seasons.
//!
//! Usage:
//!   cargo run --bin match-simulator -- --help
//!   cargo run --bin match-simulator single
//!   cargo run --bin match-simulator --seed 42 series --games 1000
//!   cargo run --bin match-simulator --k-factor 16 shuffle --matches 500 --divisor 2.0
//!
//! All subcommands share the rating configuration flags. A TOML file given
//! via --config is loaded first, then any explicit flag overrides it.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::prelude::*;
use team_elo::config::TeamEloConfig;
use team_elo::error::RatingError;
use team_elo::rating::{expected_score, RatingCalculator, TeamEloCalculator};
use team_elo::team::Team;
use team_elo::types::{MatchOutcome, MatchResult, Player, Rankings};

#[derive(Parser)]
#[command(name = "match-simulator")]
#[command(version = team_elo::VERSION)]
#[command(about = "Simulate team matches and watch player ratings converge")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Seed for reproducible simulations (omit for a fresh seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a TOML rating configuration file
    #[arg(long)]
    config: Option<String>,

    /// Override the K-factor
    #[arg(long)]
    k_factor: Option<f64>,

    /// Override the team/individual blend (0.0 to 1.0)
    #[arg(long)]
    alpha: Option<f64>,

    /// Override the logistic rating scale
    #[arg(long)]
    scale: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Settle one 3v3 match where team A wins, printing every change
    Single,
    /// Run a series of 5v5 games with per-player rank tendencies
    Series {
        /// Number of games to simulate
        #[arg(short, long, default_value = "1000")]
        games: usize,
    },
    /// Shuffle eight players into fresh 4v4 teams every match
    Shuffle {
        /// Number of matches to simulate
        #[arg(short, long, default_value = "1000")]
        matches: usize,
        /// Scale for the true-skill win probability
        #[arg(short, long, default_value = "1.0")]
        divisor: f64,
    },
}

/// Rank tendencies for the series simulation. Each entry weights ranks 1
/// (best) through 5 (worst) for one roster slot.
const SERIES_WEIGHTS: [[f64; 5]; 5] = [
    [0.3, 0.25, 0.2, 0.15, 0.1],
    [0.2, 0.3, 0.25, 0.15, 0.1],
    [0.25, 0.25, 0.2, 0.15, 0.15],
    [0.2, 0.2, 0.3, 0.2, 0.1],
    [0.15, 0.25, 0.3, 0.2, 0.1],
];

fn load_config(cli: &Cli) -> Result<TeamEloConfig> {
    let mut config = match &cli.config {
        Some(path) => TeamEloConfig::from_file(path)?,
        None => TeamEloConfig::from_env()?,
    };

    if let Some(k) = cli.k_factor {
        config.k = k;
    }
    if let Some(alpha) = cli.alpha {
        config.alpha = alpha;
    }
    if let Some(scale) = cli.scale {
        config.scale = scale;
    }

    Ok(config)
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn roster(prefix: &str, size: usize, rating: f64) -> Result<Team> {
    Team::new(
        (1..=size)
            .map(|i| Player::with_rating(format!("{}{}", prefix, i), rating))
            .collect(),
    )
}

/// Rankings 1..=N following roster order.
fn roster_order_rankings(team: &Team) -> Rankings {
    team.players()
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.clone(), i as u32 + 1))
        .collect()
}

/// Sample a strict ranking from per-slot rank tendencies.
///
/// Each member draws a target rank from its weight row; members are then
/// ordered by target, ties broken by a pre-shuffle, so the result is always
/// a permutation of 1..=N.
fn sample_rankings(team: &Team, rng: &mut StdRng) -> Result<Rankings> {
    const RANKS: [u32; 5] = [1, 2, 3, 4, 5];

    let mut draws = Vec::with_capacity(team.len());
    for (player, weights) in team.players().iter().zip(SERIES_WEIGHTS.iter()) {
        let target = *RANKS.choose_weighted(rng, |r| weights[(*r - 1) as usize])?;
        draws.push((player.id.clone(), target));
    }

    draws.shuffle(rng);
    draws.sort_by_key(|(_, target)| *target);

    Ok(draws
        .into_iter()
        .enumerate()
        .map(|(i, (id, _))| (id, i as u32 + 1))
        .collect())
}

fn print_team(label: &str, team: &Team) {
    println!("{}", label);
    for player in team.players() {
        println!("  {}", player);
    }
}

fn run_single(calculator: &TeamEloCalculator) -> Result<()> {
    let initial = calculator.initial_rating();
    let mut team_a = roster("A", 3, initial)?;
    let mut team_b = roster("B", 3, initial)?;

    let result = MatchResult::new(
        MatchOutcome::Win,
        roster_order_rankings(&team_a),
        roster_order_rankings(&team_b),
    )?;

    let settlement = calculator.settle(&team_a, &team_b, &result)?;

    println!(
        "🎲 Team A wins (expected score {:.3})\n",
        settlement.team_a.expected_score
    );
    for (label, side) in [("Team A:", &settlement.team_a), ("Team B:", &settlement.team_b)] {
        println!("{}", label);
        for change in &side.changes {
            println!(
                "  {} rank {}: {:.2} -> {:.2} ({:+.2} team, {:+.2} individual)",
                change.player_id,
                change.rank,
                change.old_rating,
                change.new_rating,
                change.team_component,
                change.individual_component,
            );
        }
    }

    settlement.apply(&mut team_a, &mut team_b)?;

    println!();
    print_team("Updated ratings for team A:", &team_a);
    println!();
    print_team("Updated ratings for team B:", &team_b);

    Ok(())
}

fn run_series(calculator: &TeamEloCalculator, games: usize, rng: &mut StdRng) -> Result<()> {
    let initial = calculator.initial_rating();
    let mut team_a = roster("A", 5, initial)?;
    let mut team_b = roster("B", 5, initial)?;

    println!("🎲 Simulating {} games of 5v5 (team A wins 60%)...", games);

    let mut wins_a = 0;
    for _ in 0..games {
        // Team A is the stronger side by fiat.
        let outcome = if rng.random_bool(0.6) {
            wins_a += 1;
            MatchOutcome::Win
        } else {
            MatchOutcome::Loss
        };

        let result = MatchResult::new(
            outcome,
            sample_rankings(&team_a, rng)?,
            sample_rankings(&team_b, rng)?,
        )?;

        let settlement = calculator.settle(&team_a, &team_b, &result)?;
        settlement.apply(&mut team_a, &mut team_b)?;
    }

    println!(
        "📊 Team A won {} of {} games ({:.1}%)\n",
        wins_a,
        games,
        100.0 * wins_a as f64 / games as f64
    );
    print_team("Final ratings for team A:", &team_a);
    println!();
    print_team("Final ratings for team B:", &team_b);

    Ok(())
}

fn run_shuffle(
    calculator: &TeamEloCalculator,
    matches: usize,
    divisor: f64,
    rng: &mut StdRng,
) -> Result<()> {
    // The divisor feeds expected_score as a scale, so it has the same bounds.
    if !divisor.is_finite() || divisor <= 0.0 {
        return Err(RatingError::InvalidConfiguration {
            message: format!("divisor must be positive and finite, got {}", divisor),
        }
        .into());
    }

    // Eight players whose true skill runs from 8 (best) down to 1.
    let initial = calculator.initial_rating();
    let mut pool: Vec<(Player, f64)> = (1..=8)
        .map(|i| (Player::with_rating(format!("A{}", i), initial), (9 - i) as f64))
        .collect();

    println!(
        "🎲 Simulating {} matches with shuffled 4v4 teams (divisor {})...",
        matches, divisor
    );

    for _ in 0..matches {
        pool.shuffle(rng);
        let (side_a, side_b) = pool.split_at(4);

        let mut team_a = Team::new(side_a.iter().map(|(p, _)| p.clone()).collect())?;
        let mut team_b = Team::new(side_b.iter().map(|(p, _)| p.clone()).collect())?;

        // Win probability from the true-skill averages, not the ratings.
        let skill_a = side_a.iter().map(|(_, s)| s).sum::<f64>() / 4.0;
        let skill_b = side_b.iter().map(|(_, s)| s).sum::<f64>() / 4.0;
        let outcome = if rng.random::<f64>() < expected_score(skill_a, skill_b, divisor) {
            MatchOutcome::Win
        } else {
            MatchOutcome::Loss
        };

        let result = MatchResult::new(
            outcome,
            skill_rankings(side_a),
            skill_rankings(side_b),
        )?;

        let settlement = calculator.settle(&team_a, &team_b, &result)?;
        settlement.apply(&mut team_a, &mut team_b)?;

        for (slot, member) in pool[..4].iter_mut().zip(team_a.players()) {
            slot.0.rating = member.rating;
        }
        for (slot, member) in pool[4..].iter_mut().zip(team_b.players()) {
            slot.0.rating = member.rating;
        }
    }

    pool.sort_by(|a, b| b.0.rating.total_cmp(&a.0.rating));

    println!("📊 Final ratings after {} matches:", matches);
    for (player, skill) in &pool {
        println!("  {} (true skill {}) - rating {:.2}", player.id, skill, player.rating);
    }

    Ok(())
}

/// In-team ranks by descending true skill.
fn skill_rankings(side: &[(Player, f64)]) -> Rankings {
    let mut ordered: Vec<_> = side.iter().collect();
    ordered.sort_by(|a, b| b.1.total_cmp(&a.1));
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, (p, _))| (p.id.clone(), i as u32 + 1))
        .collect()
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = load_config(&cli)?;
    println!(
        "⚙️  k={} alpha={} scale={} initial={}",
        config.k, config.alpha, config.scale, config.initial_rating
    );

    let calculator = TeamEloCalculator::new(config)?;
    let mut rng = make_rng(cli.seed);

    match cli.command {
        Commands::Single => run_single(&calculator)?,
        Commands::Series { games } => run_series(&calculator, games, &mut rng)?,
        Commands::Shuffle { matches, divisor } => {
            run_shuffle(&calculator, matches, divisor, &mut rng)?
        }
    }

    Ok(())
}
