//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D position in the world, `(0, 0)` is the top-left cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Row-major index into a square grid of the given size
    pub fn to_index(&self, size: usize) -> usize {
        self.y * size + self.x
    }

    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            x: index % size,
            y: index / size,
        }
    }

    pub fn in_bounds(&self, size: usize) -> bool {
        self.x < size && self.y < size
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Kind of organism that can occupy a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganismKind {
    Plant,
    Herbivore,
    Carnivore,
}

impl OrganismKind {
    /// Placement order used when seeding a population
    pub const ALL: [OrganismKind; 3] = [
        OrganismKind::Plant,
        OrganismKind::Herbivore,
        OrganismKind::Carnivore,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OrganismKind::Plant => "Plant",
            OrganismKind::Herbivore => "Herbivore",
            OrganismKind::Carnivore => "Carnivore",
        }
    }
}

impl fmt::Display for OrganismKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the four seasons, cycling Spring -> Summer -> Autumn -> Winter -> Spring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    pub const COUNT: usize = Self::ALL.len();

    /// Season at a cyclic index; wraps for indices past the last season
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    pub fn index(&self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Autumn => 2,
            Season::Winter => 3,
        }
    }

    pub fn next(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Multiplier applied to the base plant spawn probability
    pub fn growth_rate(&self) -> f64 {
        match self {
            Season::Spring => 1.2,
            Season::Summer => 1.5,
            Season::Autumn => 1.0,
            Season::Winter => 0.5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Population tally for a single turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub plants: usize,
    pub herbivores: usize,
    pub carnivores: usize,
}

impl PopulationCounts {
    pub fn new(plants: usize, herbivores: usize, carnivores: usize) -> Self {
        Self {
            plants,
            herbivores,
            carnivores,
        }
    }

    pub fn total(&self) -> usize {
        self.plants + self.herbivores + self.carnivores
    }

    pub fn get(&self, kind: OrganismKind) -> usize {
        match kind {
            OrganismKind::Plant => self.plants,
            OrganismKind::Herbivore => self.herbivores,
            OrganismKind::Carnivore => self.carnivores,
        }
    }

    /// Count one more organism of the given kind
    pub fn record(&mut self, kind: OrganismKind) {
        match kind {
            OrganismKind::Plant => self.plants += 1,
            OrganismKind::Herbivore => self.herbivores += 1,
            OrganismKind::Carnivore => self.carnivores += 1,
        }
    }

    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.plants, self.herbivores, self.carnivores)
    }
}

impl From<(usize, usize, usize)> for PopulationCounts {
    fn from((plants, herbivores, carnivores): (usize, usize, usize)) -> Self {
        Self::new(plants, herbivores, carnivores)
    }
}

impl fmt::Display for PopulationCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "plants={} herbivores={} carnivores={}",
            self.plants, self.herbivores, self.carnivores
        )
    }
}
