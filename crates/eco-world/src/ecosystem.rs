//! Ecosystem engine: grid state, seeding, seasonal growth and population tracking.

use crate::grid::{CellState, Grid};
use crate::organism::Organism;
use eco_core::{EcosystemConfig, Error, OrganismKind, PopulationCounts, Position, Result, Season};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument, trace};

/// What happened during a single call to [`Ecosystem::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    /// 1-based number of the completed turn
    pub turn: u64,
    /// Plants spawned by seasonal growth this turn
    pub plants_grown: usize,
    /// Season that governed growth this turn
    pub growth_season: Season,
    pub season_changed: bool,
    /// Counts recorded into the population history
    pub counts: PopulationCounts,
}

/// The simulation state machine.
///
/// Owns the grid, the season index, the population history and the random
/// source. All randomness (seeding shuffles, growth draws, season changes) comes
/// from the injected `rng`, so a seeded source gives fully reproducible runs.
#[derive(Clone)]
pub struct Ecosystem<R = ChaCha8Rng> {
    config: EcosystemConfig,
    grid: Grid,
    season_index: usize,
    population_stats: Vec<PopulationCounts>,
    rng: R,
    turn: u64,
}

impl Ecosystem<ChaCha8Rng> {
    /// Default rules on a `size` x `size` grid with a seeded ChaCha source
    pub fn with_seed(size: usize, seed: u64) -> Result<Self> {
        Self::new(EcosystemConfig::with_size(size), ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_config(config: EcosystemConfig, seed: u64) -> Result<Self> {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Ecosystem<R> {
    pub fn new(config: EcosystemConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.size);

        Ok(Self {
            config,
            grid,
            season_index: 0,
            population_stats: Vec::new(),
            rng,
            turn: 0,
        })
    }

    /// Default rules on a `size` x `size` grid using the given random source
    pub fn with_rng(size: usize, rng: R) -> Result<Self> {
        Self::new(EcosystemConfig::with_size(size), rng)
    }

    /// Reassemble an ecosystem from already-validated parts
    pub(crate) fn from_parts(
        config: EcosystemConfig,
        grid: Grid,
        season_index: usize,
        population_stats: Vec<PopulationCounts>,
        turn: u64,
        rng: R,
    ) -> Self {
        Self {
            config,
            grid,
            season_index,
            population_stats,
            rng,
            turn,
        }
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn config(&self) -> &EcosystemConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell(&self, pos: Position) -> Option<&CellState> {
        self.grid.get(pos)
    }

    pub fn season_index(&self) -> usize {
        self.season_index
    }

    pub fn season(&self) -> Season {
        Season::from_index(self.season_index)
    }

    /// One entry per completed turn, oldest first
    pub fn population_stats(&self) -> &[PopulationCounts] {
        &self.population_stats
    }

    /// Number of completed turns
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// True while at least one cell holds an organism
    pub fn has_living_organisms(&self) -> bool {
        self.grid.any_occupied()
    }

    /// Live tally of the grid by organism kind
    pub fn population_counts(&self) -> PopulationCounts {
        self.grid.counts()
    }

    /// Seed organisms onto randomly chosen empty cells.
    ///
    /// Candidate cells are the empty cells of the grid, shuffled once; plants are
    /// placed first, then herbivores, then carnivores, each on a distinct cell.
    /// Occupied cells are never overwritten. Fails without touching the grid when
    /// the request does not fit in the free cells.
    #[instrument(skip(self), fields(size = self.grid.size()))]
    pub fn populate(
        &mut self,
        num_plants: usize,
        num_herbivores: usize,
        num_carnivores: usize,
    ) -> Result<()> {
        let mut candidates = self.grid.empty_positions();
        let available = candidates.len();
        let requested = num_plants
            .checked_add(num_herbivores)
            .and_then(|sum| sum.checked_add(num_carnivores))
            .unwrap_or(usize::MAX);

        if requested > available {
            return Err(Error::CapacityExceeded {
                requested,
                available,
            });
        }

        candidates.shuffle(&mut self.rng);

        let energy = self.config.initial_energy;
        let mut free = candidates.into_iter();
        for (kind, count) in OrganismKind::ALL
            .into_iter()
            .zip([num_plants, num_herbivores, num_carnivores])
        {
            for pos in free.by_ref().take(count) {
                self.grid
                    .set(pos, CellState::Occupied(Organism::new(kind, energy)));
            }
        }

        debug!(
            event = "populate",
            plants = num_plants,
            herbivores = num_herbivores,
            carnivores = num_carnivores,
            "Seeded initial population"
        );
        Ok(())
    }

    /// Per-empty-cell plant spawn probability for the current season, clamped to [0, 1]
    pub fn growth_probability(&self) -> f64 {
        (self.config.base_growth_probability * self.season().growth_rate()).clamp(0.0, 1.0)
    }

    /// Spawn plants on empty cells according to the current season's growth rate.
    ///
    /// Each empty cell independently becomes a plant with probability
    /// [`growth_probability`](Self::growth_probability). Returns the number of plants grown.
    pub fn apply_seasonal_effects(&mut self) -> usize {
        let probability = self.growth_probability();
        let energy = self.config.initial_energy;
        let mut grown = 0;

        for cell in self.grid.cells_mut() {
            if cell.is_empty() && self.rng.gen::<f64>() < probability {
                *cell = CellState::Occupied(Organism::plant(energy));
                grown += 1;
            }
        }

        grown
    }

    /// Advance to the next season, wrapping from Winter back to Spring
    pub fn update_season(&mut self) {
        let previous = self.season();
        self.season_index = (self.season_index + 1) % Season::COUNT;
        debug!(
            event = "season_change",
            turn = self.turn,
            from = %previous,
            to = %self.season(),
            "Season changed"
        );
    }

    /// Append the current counts to the population history
    pub fn track_population(&mut self) -> PopulationCounts {
        let counts = self.population_counts();
        self.population_stats.push(counts);
        counts
    }

    /// Advance the simulation by one turn.
    ///
    /// Growth runs under the season in effect at the start of the turn; the season
    /// may then change (taking effect next turn) before the counts are recorded.
    pub fn update(&mut self) -> TurnOutcome {
        self.turn += 1;
        let growth_season = self.season();

        let plants_grown = self.apply_seasonal_effects();

        let season_changed = self.rng.gen::<f64>() < self.config.season_change_probability;
        if season_changed {
            self.update_season();
        }

        let counts = self.track_population();

        trace!(
            turn = self.turn,
            season = %growth_season,
            plants_grown,
            plants = counts.plants,
            herbivores = counts.herbivores,
            carnivores = counts.carnivores,
            "Turn complete"
        );

        if self.config.metrics_interval > 0 && self.turn % self.config.metrics_interval == 0 {
            self.emit_population_metrics();
        }

        TurnOutcome {
            turn: self.turn,
            plants_grown,
            growth_season,
            season_changed,
            counts,
        }
    }

    fn emit_population_metrics(&self) {
        let counts = self.population_stats.last().copied().unwrap_or_default();
        let cells = self.grid.len();
        let occupancy = counts.total() as f64 / cells as f64 * 100.0;

        info!(
            event = "population_metrics",
            turn = self.turn,
            season = %self.season(),
            plants = counts.plants,
            herbivores = counts.herbivores,
            carnivores = counts.carnivores,
            occupancy = format!("{:.1}%", occupancy),
            "Population metrics"
        );
    }
}
