//! Rating system configuration
//!
//! This module defines the tunable coefficients for the team Elo calculator,
//! with loading from environment variables or a TOML file and eager
//! validation so the math never sees a zero divisor.

use crate::error::{RatingError, Result};
use crate::types::DEFAULT_RATING;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Tunable coefficients for the team Elo calculator
///
/// Instances are immutable once handed to a calculator; independently
/// configured calculators can coexist without cross-talk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamEloConfig {
    /// Overall adjustment magnitude (K-factor)
    pub k: f64,
    /// Weight of the team component versus the individual component, in [0, 1]
    /// (1 = pure team-based, 0 = pure individual-based)
    pub alpha: f64,
    /// Logistic divisor for expected-score calculations
    pub scale: f64,
    /// Rating assigned to new players
    pub initial_rating: f64,
}

impl Default for TeamEloConfig {
    fn default() -> Self {
        Self {
            k: 32.0,
            alpha: 0.7,
            scale: 400.0,
            initial_rating: DEFAULT_RATING,
        }
    }
}

impl TeamEloConfig {
    /// Create conservative configuration (slower rating changes)
    pub fn conservative() -> Self {
        Self {
            k: 16.0,
            ..Self::default()
        }
    }

    /// Create aggressive configuration (faster rating changes)
    pub fn aggressive() -> Self {
        Self {
            k: 64.0,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables with fallback to defaults
    ///
    /// Recognized variables: `TEAM_ELO_K`, `TEAM_ELO_ALPHA`, `TEAM_ELO_SCALE`,
    /// `TEAM_ELO_INITIAL_RATING`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(k) = env::var("TEAM_ELO_K") {
            config.k = parse_var("TEAM_ELO_K", &k)?;
        }
        if let Ok(alpha) = env::var("TEAM_ELO_ALPHA") {
            config.alpha = parse_var("TEAM_ELO_ALPHA", &alpha)?;
        }
        if let Ok(scale) = env::var("TEAM_ELO_SCALE") {
            config.scale = parse_var("TEAM_ELO_SCALE", &scale)?;
        }
        if let Ok(initial) = env::var("TEAM_ELO_INITIAL_RATING") {
            config.initial_rating = parse_var("TEAM_ELO_INITIAL_RATING", &initial)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// Missing keys fall back to their defaults, so a file may set only the
    /// coefficients it cares about.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RatingError::InvalidConfiguration {
                message: format!("failed to read {}: {}", path.display(), e),
            }
        })?;

        let config: Self =
            toml::from_str(&contents).map_err(|e| RatingError::InvalidConfiguration {
                message: format!("failed to parse {}: {}", path.display(), e),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.k.is_finite() || self.k <= 0.0 {
            return Err(RatingError::InvalidConfiguration {
                message: format!("K-factor must be positive and finite, got {}", self.k),
            }
            .into());
        }

        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(RatingError::InvalidConfiguration {
                message: format!("alpha must lie in [0, 1], got {}", self.alpha),
            }
            .into());
        }

        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(RatingError::InvalidConfiguration {
                message: format!("scale must be positive and finite, got {}", self.scale),
            }
            .into());
        }

        if !self.initial_rating.is_finite() {
            return Err(RatingError::InvalidConfiguration {
                message: format!("initial rating must be finite, got {}", self.initial_rating),
            }
            .into());
        }

        Ok(())
    }
}

fn parse_var(name: &str, value: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|_| {
            RatingError::InvalidConfiguration {
                message: format!("invalid {} value: {}", name, value),
            }
        })
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TeamEloConfig::default();
        assert_eq!(config.k, 32.0);
        assert_eq!(config.alpha, 0.7);
        assert_eq!(config.scale, 400.0);
        assert_eq!(config.initial_rating, 1500.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = TeamEloConfig::default();
        config.k = 0.0;
        assert!(config.validate().is_err());

        config = TeamEloConfig::default();
        config.alpha = 1.5;
        assert!(config.validate().is_err());

        config = TeamEloConfig::default();
        config.alpha = -0.1;
        assert!(config.validate().is_err());

        config = TeamEloConfig::default();
        config.scale = 0.0;
        assert!(config.validate().is_err());

        config = TeamEloConfig::default();
        config.scale = f64::NAN;
        assert!(config.validate().is_err());

        config = TeamEloConfig::default();
        config.initial_rating = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_alpha_bounds_are_inclusive() {
        let mut config = TeamEloConfig::default();
        config.alpha = 0.0;
        assert!(config.validate().is_ok());
        config.alpha = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        let conservative = TeamEloConfig::conservative();
        let aggressive = TeamEloConfig::aggressive();
        let default = TeamEloConfig::default();

        assert!(conservative.k < default.k);
        assert!(aggressive.k > default.k);
        assert!(conservative.validate().is_ok());
        assert!(aggressive.validate().is_ok());
    }

    // Sole test touching TEAM_ELO_* variables; the process environment is
    // shared across test threads.
    #[test]
    fn test_from_env_overrides_and_rejects_garbage() {
        env::remove_var("TEAM_ELO_ALPHA");
        env::remove_var("TEAM_ELO_SCALE");
        env::set_var("TEAM_ELO_K", "48");
        env::set_var("TEAM_ELO_INITIAL_RATING", "1200");

        let config = TeamEloConfig::from_env().unwrap();
        assert_eq!(config.k, 48.0);
        assert_eq!(config.initial_rating, 1200.0);
        // Unset variables keep their defaults.
        assert_eq!(config.alpha, 0.7);
        assert_eq!(config.scale, 400.0);

        env::set_var("TEAM_ELO_ALPHA", "not-a-number");
        let err = TeamEloConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("TEAM_ELO_ALPHA"));

        // Parsable but out of range fails validation instead.
        env::set_var("TEAM_ELO_ALPHA", "1.5");
        assert!(TeamEloConfig::from_env().is_err());

        env::remove_var("TEAM_ELO_K");
        env::remove_var("TEAM_ELO_ALPHA");
        env::remove_var("TEAM_ELO_INITIAL_RATING");
        let config = TeamEloConfig::from_env().unwrap();
        assert_eq!(config.k, 32.0);
    }

    #[test]
    fn test_toml_parsing_with_partial_keys() {
        let config: TeamEloConfig = toml::from_str("k = 24.0\nalpha = 0.5\n").unwrap();
        assert_eq!(config.k, 24.0);
        assert_eq!(config.alpha, 0.5);
        // Unspecified keys fall back to defaults.
        assert_eq!(config.scale, 400.0);
        assert_eq!(config.initial_rating, 1500.0);
    }

    #[test]
    fn test_from_file_round_trip() {
        let path = env::temp_dir().join(format!("team-elo-config-{}.toml", std::process::id()));
        std::fs::write(&path, "k = 20.0\nscale = 200.0\n").unwrap();

        let config = TeamEloConfig::from_file(&path).unwrap();
        assert_eq!(config.k, 20.0);
        assert_eq!(config.scale, 200.0);
        assert_eq!(config.alpha, 0.7);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_from_file_rejects_invalid_values() {
        let path = env::temp_dir().join(format!("team-elo-bad-config-{}.toml", std::process::id()));
        std::fs::write(&path, "scale = 0.0\n").unwrap();

        assert!(TeamEloConfig::from_file(&path).is_err());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(TeamEloConfig::from_file("/nonexistent/team-elo.toml").is_err());
    }
}
