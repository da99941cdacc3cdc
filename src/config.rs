//! Configuration loading from TOML.
//!
//! Every field has a default, so a missing file or a partial file both
//! work. The episode budget can be given per strategy or as a total
//! for the whole sweep, but not both at once.

use crate::sweep::{EpisodeBudget, SweepPlan};
use crate::types::GameError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

/// Episodes played per strategy bucket when no budget is configured.
pub const DEFAULT_EPISODES_PER_STRATEGY: u64 = 10_000;

/// Sweep configuration.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SweepConfig {
    /// Starting bankroll in chips, a multiple of 2000.
    pub initial_bankroll: u64,
    /// Grid step in percentage points.
    pub step_size: f64,
    /// Episodes per strategy bucket. Mutually exclusive with
    /// `total_episodes`.
    pub episodes_per_strategy: Option<u64>,
    /// Episode budget split evenly across the grid. Mutually exclusive
    /// with `episodes_per_strategy`.
    pub total_episodes: Option<u64>,
    /// Seed all episode streams derive from.
    pub base_seed: u64,
    /// Run buckets across all cores.
    pub parallel: bool,
    /// Directory report files are written to.
    pub output_dir: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            initial_bankroll: 68_000,
            step_size: 0.01,
            episodes_per_strategy: None,
            total_episodes: None,
            base_seed: 0,
            parallel: true,
            output_dir: "output".to_string(),
        }
    }
}

impl SweepConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: SweepConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// The configured episode budget.
    pub fn budget(&self) -> Result<EpisodeBudget, GameError> {
        match (self.episodes_per_strategy, self.total_episodes) {
            (Some(_), Some(_)) => Err(GameError::InvalidConfiguration(
                "episodes_per_strategy and total_episodes are mutually exclusive".to_string(),
            )),
            (Some(episodes), None) => Ok(EpisodeBudget::PerStrategy(episodes)),
            (None, Some(total)) => Ok(EpisodeBudget::Total(total)),
            (None, None) => Ok(EpisodeBudget::PerStrategy(DEFAULT_EPISODES_PER_STRATEGY)),
        }
    }

    /// Validate the configuration into a runnable plan.
    pub fn plan(&self) -> Result<SweepPlan, GameError> {
        SweepPlan::new(
            self.initial_bankroll,
            self.step_size,
            self.budget()?,
            self.base_seed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SweepConfig::default();
        assert_eq!(config.initial_bankroll, 68_000);
        assert_eq!(config.step_size, 0.01);
        assert_eq!(config.episodes_per_strategy, None);
        assert_eq!(config.total_episodes, None);
        assert_eq!(config.base_seed, 0);
        assert!(config.parallel);
        assert_eq!(config.output_dir, "output");
    }

    #[test]
    fn test_parse_full_config() {
        let config: SweepConfig = toml::from_str(
            r#"
            initial_bankroll = 50000
            step_size = 0.5
            episodes_per_strategy = 500
            base_seed = 42
            parallel = false
            output_dir = "results"
            "#,
        )
        .unwrap();
        assert_eq!(config.initial_bankroll, 50_000);
        assert_eq!(config.step_size, 0.5);
        assert_eq!(config.episodes_per_strategy, Some(500));
        assert_eq!(config.base_seed, 42);
        assert!(!config.parallel);
        assert_eq!(config.output_dir, "results");
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config: SweepConfig = toml::from_str("step_size = 1.0").unwrap();
        assert_eq!(config.step_size, 1.0);
        assert_eq!(config.initial_bankroll, 68_000);
        assert!(config.parallel);
    }

    #[test]
    fn test_budget_defaults_to_per_strategy() {
        let config = SweepConfig::default();
        assert_eq!(
            config.budget().unwrap(),
            EpisodeBudget::PerStrategy(DEFAULT_EPISODES_PER_STRATEGY)
        );
    }

    #[test]
    fn test_budget_styles() {
        let mut config = SweepConfig::default();
        config.episodes_per_strategy = Some(200);
        assert_eq!(config.budget().unwrap(), EpisodeBudget::PerStrategy(200));

        let mut config = SweepConfig::default();
        config.total_episodes = Some(4_000);
        assert_eq!(config.budget().unwrap(), EpisodeBudget::Total(4_000));
    }

    #[test]
    fn test_budget_styles_are_exclusive() {
        let mut config = SweepConfig::default();
        config.episodes_per_strategy = Some(200);
        config.total_episodes = Some(4_000);
        assert!(matches!(
            config.budget(),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_plan_from_config() {
        let config = SweepConfig {
            step_size: 25.0,
            episodes_per_strategy: Some(10),
            ..SweepConfig::default()
        };
        let plan = config.plan().unwrap();
        assert_eq!(plan.percentages(), &[25.0, 50.0, 75.0, 100.0]);
        assert_eq!(plan.episodes_per_strategy(), 10);
        assert_eq!(plan.initial_bankroll(), 68_000);
    }
}
