//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Ecosystem rule parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcosystemConfig {
    /// Width and height of the square grid
    pub size: usize,
    /// Energy given to every newly created organism
    pub initial_energy: i32,
    /// Per-empty-cell plant spawn probability before the seasonal multiplier
    pub base_growth_probability: f64,
    /// Probability that the season advances at the end of a turn
    pub season_change_probability: f64,
    /// Emit population metrics every this many turns (0 disables)
    pub metrics_interval: u64,
}

impl Default for EcosystemConfig {
    fn default() -> Self {
        Self {
            size: 10,
            initial_energy: 5,
            base_growth_probability: 0.1,
            season_change_probability: 0.1,
            metrics_interval: 100,
        }
    }
}

impl EcosystemConfig {
    /// Config with default rules for a grid of the given size
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Number of cells in the grid, `None` if `size * size` overflows
    pub fn cell_count(&self) -> Option<usize> {
        self.size.checked_mul(self.size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 || self.cell_count().is_none() {
            return Err(Error::InvalidGridSize(self.size));
        }
        check_probability("base_growth_probability", self.base_growth_probability)?;
        check_probability("season_change_probability", self.season_change_probability)?;
        Ok(())
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::Config(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

/// Initial population seeded onto the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub plants: usize,
    pub herbivores: usize,
    pub carnivores: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            plants: 30,
            herbivores: 10,
            carnivores: 5,
        }
    }
}

impl PopulationConfig {
    /// Total organisms requested, `None` if the sum overflows
    pub fn total(&self) -> Option<usize> {
        self.plants
            .checked_add(self.herbivores)?
            .checked_add(self.carnivores)
    }
}

/// Configuration for one driven simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Turn budget; the run also stops once nothing is alive
    pub max_turns: u64,
    /// Delay between rendered frames
    pub tick_interval_ms: u64,
    pub ecosystem: EcosystemConfig,
    pub population: PopulationConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_turns: 1000,
            tick_interval_ms: 500,
            ecosystem: EcosystemConfig::default(),
            population: PopulationConfig::default(),
        }
    }
}

impl RunConfig {
    /// Load a run configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading run configuration");
        let contents = std::fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Write this configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.ecosystem.validate()?;
        let capacity = self
            .ecosystem
            .cell_count()
            .ok_or(Error::InvalidGridSize(self.ecosystem.size))?;
        let requested = self.population.total().unwrap_or(usize::MAX);
        if requested > capacity {
            return Err(Error::CapacityExceeded {
                requested,
                available: capacity,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let ecosystem = EcosystemConfig::default();
        assert_eq!(ecosystem.size, 10);
        assert_eq!(ecosystem.initial_energy, 5);
        assert_eq!(ecosystem.base_growth_probability, 0.1);
        assert_eq!(ecosystem.season_change_probability, 0.1);

        let population = PopulationConfig::default();
        assert_eq!(population.total(), Some(45));

        let run = RunConfig::default();
        assert_eq!(run.max_turns, 1000);
        assert!(run.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(matches!(
            EcosystemConfig::with_size(0).validate(),
            Err(Error::InvalidGridSize(0))
        ));

        let config = EcosystemConfig {
            season_change_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let run = RunConfig {
            population: PopulationConfig {
                plants: 101,
                herbivores: 0,
                carnivores: 0,
            },
            ..Default::default()
        };
        assert!(matches!(
            run.validate(),
            Err(Error::CapacityExceeded {
                requested: 101,
                available: 100
            })
        ));
    }

    #[test]
    fn test_validation_rejects_overflow() {
        let config: RunConfig =
            serde_json::from_str(r#"{"ecosystem": {"size": 8589934592}}"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidGridSize(8589934592))
        ));

        let run = RunConfig {
            population: PopulationConfig {
                plants: usize::MAX,
                herbivores: 2,
                carnivores: 0,
            },
            ..Default::default()
        };
        assert_eq!(run.population.total(), None);
        assert!(matches!(
            run.validate(),
            Err(Error::CapacityExceeded {
                requested: usize::MAX,
                available: 100
            })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RunConfig = serde_json::from_str(r#"{"seed": 7, "ecosystem": {"size": 20}}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.ecosystem.size, 20);
        assert_eq!(config.ecosystem.initial_energy, 5);
        assert_eq!(config.population, PopulationConfig::default());
    }

    #[test]
    fn test_run_config_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("ecosim-config-{}.json", std::process::id()));
        let config = RunConfig {
            seed: 42,
            max_turns: 50,
            ..Default::default()
        };

        config.save(&path).unwrap();
        let loaded = RunConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.seed, 42);
        assert_eq!(loaded.max_turns, 50);
        assert_eq!(loaded.ecosystem.size, config.ecosystem.size);
        assert_eq!(loaded.population, config.population);
    }
}
