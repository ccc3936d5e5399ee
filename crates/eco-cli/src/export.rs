//! History and snapshot files.

use anyhow::{Context, Result};
use eco_core::{HistoryRecord, PopulationCounts};
use eco_world::EcosystemSnapshot;
use std::fs;
use std::path::Path;
use tracing::info;

/// Write the population history as a JSON array of numbered turns
pub fn write_history_json(path: &Path, history: &[PopulationCounts]) -> Result<()> {
    let records = HistoryRecord::from_history(history);
    let json = serde_json::to_string_pretty(&records)?;
    fs::write(path, json).with_context(|| format!("writing history to {}", path.display()))?;
    info!(path = %path.display(), turns = records.len(), "Population history exported");
    Ok(())
}

pub fn write_snapshot(path: &Path, snapshot: &EcosystemSnapshot) -> Result<()> {
    let bytes = snapshot.to_bytes()?;
    fs::write(path, &bytes).with_context(|| format!("writing snapshot to {}", path.display()))?;
    info!(path = %path.display(), turn = snapshot.turn, bytes = bytes.len(), "Snapshot saved");
    Ok(())
}

pub fn read_snapshot(path: &Path) -> Result<EcosystemSnapshot> {
    let bytes = fs::read(path).with_context(|| format!("reading snapshot {}", path.display()))?;
    Ok(EcosystemSnapshot::from_bytes(&bytes)?)
}
