//! World simulation engine.
//!
//! This module implements the square grid where plants, herbivores and carnivores
//! live, and the seasonal turn loop that grows plants and records populations.

pub mod grid;
pub mod organism;
pub mod ecosystem;
pub mod snapshot;

pub use grid::{CellState, Grid};
pub use organism::Organism;
pub use ecosystem::{Ecosystem, TurnOutcome};
pub use snapshot::EcosystemSnapshot;
