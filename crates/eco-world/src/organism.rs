//! Organism state.

use eco_core::OrganismKind;
use serde::{Deserialize, Serialize};

/// Energy given to organisms when no other value is configured
pub const DEFAULT_ENERGY: i32 = 5;

/// An organism occupying a grid cell.
///
/// `energy` is carried for every organism but no rule currently reads or changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organism {
    pub kind: OrganismKind,
    pub energy: i32,
}

impl Organism {
    pub fn new(kind: OrganismKind, energy: i32) -> Self {
        Self { kind, energy }
    }

    pub fn plant(energy: i32) -> Self {
        Self::new(OrganismKind::Plant, energy)
    }
}

impl Default for Organism {
    fn default() -> Self {
        Self::plant(DEFAULT_ENERGY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organism_creation() {
        let organism = Organism::new(OrganismKind::Herbivore, DEFAULT_ENERGY);
        assert_eq!(organism.kind, OrganismKind::Herbivore);
        assert_eq!(organism.energy, 5);
    }

    #[test]
    fn test_energy_is_not_validated() {
        let organism = Organism::new(OrganismKind::Carnivore, -3);
        assert_eq!(organism.energy, -3);
    }

    #[test]
    fn test_default_is_plant() {
        let organism = Organism::default();
        assert_eq!(organism, Organism::plant(5));
    }
}
