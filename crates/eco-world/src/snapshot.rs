//! Serializable snapshots of an ecosystem.

use crate::ecosystem::Ecosystem;
use crate::grid::{CellState, Grid};
use eco_core::{EcosystemConfig, Error, PopulationCounts, Result, Season};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

/// Full ecosystem state except the random source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcosystemSnapshot {
    pub version: u32,
    /// Unix timestamp (seconds) at capture time
    pub timestamp: i64,
    pub config: EcosystemConfig,
    pub season_index: usize,
    pub turn: u64,
    /// Row-major cells
    pub cells: Vec<CellState>,
    pub history: Vec<PopulationCounts>,
}

impl EcosystemSnapshot {
    pub fn season(&self) -> Season {
        Season::from_index(self.season_index)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(Error::InvalidState(format!(
                "unsupported snapshot version {}",
                self.version
            )));
        }
        self.config.validate()?;
        if self.season_index >= Season::COUNT {
            return Err(Error::InvalidState(format!(
                "season index {} out of range",
                self.season_index
            )));
        }
        if self.history.len() as u64 != self.turn {
            return Err(Error::InvalidState(format!(
                "history has {} entries for {} turns",
                self.history.len(),
                self.turn
            )));
        }
        Ok(())
    }
}

impl<R: Rng> Ecosystem<R> {
    /// Capture the current state
    pub fn snapshot(&self) -> EcosystemSnapshot {
        EcosystemSnapshot {
            version: SNAPSHOT_VERSION,
            timestamp: chrono::Utc::now().timestamp(),
            config: self.config().clone(),
            season_index: self.season_index(),
            turn: self.turn(),
            cells: self.grid().cells().to_vec(),
            history: self.population_stats().to_vec(),
        }
    }

    /// Rebuild an ecosystem from a snapshot, continuing with a fresh random source
    pub fn restore(snapshot: EcosystemSnapshot, rng: R) -> Result<Self> {
        snapshot.validate()?;
        let size = snapshot.config.size;
        let cell_count = snapshot.cells.len();
        let grid = Grid::from_cells(size, snapshot.cells).ok_or_else(|| {
            Error::InvalidState(format!(
                "snapshot has {} cells for a {}x{} grid",
                cell_count, size, size
            ))
        })?;

        Ok(Self::from_parts(
            snapshot.config,
            grid,
            snapshot.season_index,
            snapshot.history,
            snapshot.turn,
            rng,
        ))
    }
}
