//! Terminal rendering of the grid and population trends.

use eco_core::{OrganismKind, PopulationCounts, Season};
use eco_world::{CellState, Grid};
use std::fmt::Write;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Number of most recent turns shown in the trend lines
pub const TREND_WIDTH: usize = 60;

pub fn glyph(cell: &CellState) -> char {
    match cell.kind() {
        None => '.',
        Some(OrganismKind::Plant) => 'P',
        Some(OrganismKind::Herbivore) => 'H',
        Some(OrganismKind::Carnivore) => 'C',
    }
}

/// One text row per grid row
pub fn render_grid(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.len() * 2);
    if grid.size() == 0 {
        return out;
    }
    for row in grid.cells().chunks(grid.size()) {
        let line: Vec<String> = row.iter().map(|c| glyph(c).to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Sparkline of one kind's counts, scaled against the grid capacity
pub fn sparkline(history: &[PopulationCounts], kind: OrganismKind, capacity: usize) -> String {
    let start = history.len().saturating_sub(TREND_WIDTH);
    history[start..]
        .iter()
        .map(|counts| {
            let top = SPARK_LEVELS.len() - 1;
            let level = if capacity == 0 {
                0
            } else {
                (counts.get(kind) * top / capacity).min(top)
            };
            SPARK_LEVELS[level]
        })
        .collect()
}

/// Full frame: titled grid followed by the population trend chart
pub fn render_frame(grid: &Grid, season: Season, history: &[PopulationCounts]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Ecosystem Grid (Season: {})", season);
    out.push_str(&render_grid(grid));

    let current = history.last().copied().unwrap_or_else(|| grid.counts());
    let _ = writeln!(out);
    let _ = writeln!(out, "Population Trends (turn {})", history.len());
    for kind in OrganismKind::ALL {
        let _ = writeln!(
            out,
            "{:<10} {:>4} {}",
            kind.label(),
            current.get(kind),
            sparkline(history, kind, grid.len())
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_core::Position;
    use eco_world::Organism;

    #[test]
    fn test_render_grid_glyphs() {
        let mut grid = Grid::new(2);
        grid.set(Position::new(0, 0), CellState::Occupied(Organism::plant(5)));
        grid.set(
            Position::new(1, 1),
            CellState::Occupied(Organism::new(OrganismKind::Carnivore, 5)),
        );

        assert_eq!(render_grid(&grid), "P .\n. C\n");
    }

    #[test]
    fn test_sparkline_scaling() {
        let history = vec![
            PopulationCounts::new(0, 0, 0),
            PopulationCounts::new(50, 0, 0),
            PopulationCounts::new(100, 0, 0),
        ];
        assert_eq!(sparkline(&history, OrganismKind::Plant, 100), "▁▄█");
        assert_eq!(sparkline(&history, OrganismKind::Herbivore, 100), "▁▁▁");
    }

    #[test]
    fn test_sparkline_keeps_recent_turns() {
        let history = vec![PopulationCounts::new(1, 0, 0); TREND_WIDTH + 15];
        assert_eq!(sparkline(&history, OrganismKind::Plant, 4).chars().count(), TREND_WIDTH);
    }

    #[test]
    fn test_render_frame_header() {
        let grid = Grid::new(3);
        let frame = render_frame(&grid, Season::Winter, &[]);
        assert!(frame.starts_with("Ecosystem Grid (Season: Winter)\n"));
        assert!(frame.contains("Population Trends (turn 0)"));
        assert!(frame.contains("Herbivore     0"));
    }
}
