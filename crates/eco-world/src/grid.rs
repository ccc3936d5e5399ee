//! Square grid of cells for the world.

use crate::organism::Organism;
use eco_core::{OrganismKind, PopulationCounts, Position};
use serde::{Deserialize, Serialize};

/// Occupancy of a single cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    Occupied(Organism),
}

impl CellState {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellState::Empty)
    }

    pub fn organism(&self) -> Option<&Organism> {
        match self {
            CellState::Empty => None,
            CellState::Occupied(organism) => Some(organism),
        }
    }

    pub fn kind(&self) -> Option<OrganismKind> {
        self.organism().map(|o| o.kind)
    }
}

/// A fixed-size N x N grid, stored row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Empty grid of `size * size` cells.
    ///
    /// # Panics
    ///
    /// Panics if `size * size` overflows; `EcosystemConfig::validate` rejects such sizes.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![CellState::Empty; size * size],
        }
    }

    /// Rebuild a grid from row-major cells; `None` if the cell count is not a square of `size`
    pub fn from_cells(size: usize, cells: Vec<CellState>) -> Option<Self> {
        (size.checked_mul(size) == Some(cells.len())).then_some(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the cell at a position, `None` when out of bounds
    pub fn get(&self, pos: Position) -> Option<&CellState> {
        if !pos.in_bounds(self.size) {
            return None;
        }
        self.cells.get(pos.to_index(self.size))
    }

    /// Set the cell at a position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn set(&mut self, pos: Position, cell: CellState) {
        assert!(
            pos.in_bounds(self.size),
            "position {} outside {}x{} grid",
            pos,
            self.size,
            self.size
        );
        let index = pos.to_index(self.size);
        self.cells[index] = cell;
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut CellState> + '_ {
        self.cells.iter_mut()
    }

    /// Iterator over all positions, row by row
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| Position::from_index(i, self.size))
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, &CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Position::from_index(i, self.size), cell))
    }

    /// Row-major positions of every empty cell
    pub fn empty_positions(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    pub fn any_occupied(&self) -> bool {
        self.cells.iter().any(|c| !c.is_empty())
    }

    /// Tally the live grid by organism kind
    pub fn counts(&self) -> PopulationCounts {
        let mut counts = PopulationCounts::default();
        for kind in self.cells.iter().filter_map(CellState::kind) {
            counts.record(kind);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10);
        assert_eq!(grid.size(), 10);
        assert_eq!(grid.len(), 100);
        assert!(!grid.any_occupied());
        assert_eq!(grid.counts(), PopulationCounts::default());
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::new(4);
        let pos = Position::new(1, 3);
        grid.set(pos, CellState::Occupied(Organism::new(OrganismKind::Carnivore, 5)));

        assert_eq!(grid.get(pos).and_then(CellState::kind), Some(OrganismKind::Carnivore));
        assert_eq!(grid.get(Position::new(3, 1)), Some(&CellState::Empty));
        assert_eq!(grid.get(Position::new(4, 0)), None);
        assert_eq!(grid.occupied_count(), 1);
        assert_eq!(grid.counts().as_tuple(), (0, 0, 1));
    }

    #[test]
    #[should_panic]
    fn test_set_out_of_bounds_panics() {
        let mut grid = Grid::new(3);
        grid.set(Position::new(0, 3), CellState::Empty);
    }

    #[test]
    fn test_empty_positions_row_major() {
        let mut grid = Grid::new(2);
        grid.set(Position::new(1, 0), CellState::Occupied(Organism::plant(5)));

        assert_eq!(
            grid.empty_positions(),
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_iter_positions_match_cells() {
        let grid = Grid::new(3);
        let positions: Vec<Position> = grid.positions().collect();
        assert_eq!(positions.len(), 9);
        assert_eq!(positions[4], Position::new(1, 1));
        assert!(grid.iter().all(|(_, cell)| cell.is_empty()));
    }

    #[test]
    fn test_from_cells_checks_length() {
        assert!(Grid::from_cells(2, vec![CellState::Empty; 4]).is_some());
        assert!(Grid::from_cells(2, vec![CellState::Empty; 5]).is_none());
        assert!(Grid::from_cells(usize::MAX, Vec::new()).is_none());
    }
}
