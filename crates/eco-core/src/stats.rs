//! Population history statistics.

use crate::{OrganismKind, PopulationCounts};
use serde::{Deserialize, Serialize};

/// Aggregate view over a population history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Number of recorded turns
    pub turns: usize,
    /// Counts recorded on the last turn
    pub final_counts: PopulationCounts,
    /// Highest count seen per kind
    pub peak: PopulationCounts,
    /// Turn index at which the plant peak was first reached
    pub plant_peak_turn: Option<usize>,
    /// Mean plant count across all turns
    pub mean_plants: f64,
}

impl HistorySummary {
    pub fn from_history(history: &[PopulationCounts]) -> Self {
        let Some(final_counts) = history.last().copied() else {
            return Self::default();
        };

        let mut peak = PopulationCounts::default();
        let mut plant_peak_turn = None;
        for (turn, counts) in history.iter().enumerate() {
            if plant_peak_turn.is_none() || counts.plants > peak.plants {
                peak.plants = counts.plants;
                plant_peak_turn = Some(turn);
            }
            peak.herbivores = peak.herbivores.max(counts.herbivores);
            peak.carnivores = peak.carnivores.max(counts.carnivores);
        }

        let mean_plants =
            history.iter().map(|c| c.plants as f64).sum::<f64>() / history.len() as f64;

        Self {
            turns: history.len(),
            final_counts,
            peak,
            plant_peak_turn,
            mean_plants,
        }
    }

    /// Net change in a kind's count between the first and last recorded turn
    pub fn net_change(history: &[PopulationCounts], kind: OrganismKind) -> i64 {
        match (history.first(), history.last()) {
            (Some(first), Some(last)) => last.get(kind) as i64 - first.get(kind) as i64,
            _ => 0,
        }
    }
}

/// One row of an exported history, numbered from turn 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub turn: usize,
    pub plants: usize,
    pub herbivores: usize,
    pub carnivores: usize,
}

impl HistoryRecord {
    pub fn from_history(history: &[PopulationCounts]) -> Vec<Self> {
        history
            .iter()
            .enumerate()
            .map(|(i, c)| Self {
                turn: i + 1,
                plants: c.plants,
                herbivores: c.herbivores,
                carnivores: c.carnivores,
            })
            .collect()
    }
}
