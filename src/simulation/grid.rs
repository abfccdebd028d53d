use rand::Rng;

use crate::config::{cell_count, SimConfig};
use crate::error::LifeError;
use crate::simulation::cell::{color_for_neighbor_count, Color};
use crate::simulation::engine::RuleEngine;
use crate::simulation::generation::Generation;
use crate::simulation::history::History;
use crate::simulation::patterns::Pattern;
use crate::simulation::pool::CellPool;

/// Outcome of writing a pattern onto a generation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StampReport {
    pub written: usize,
    pub skipped: usize,
}

/// Toroidal grid with a rewindable generation history.
///
/// Owns the history and the buffer pool that feeds it: evicted and
/// discarded generations go back to the pool, new ones come out of it.
pub struct Grid {
    width: u32,
    height: u32,
    history: History,
    pool: CellPool,
}

impl Grid {
    /// Create a grid with a single all-dead generation
    pub fn new(width: u32, height: u32, history_capacity: usize) -> Result<Self, LifeError> {
        cell_count(width, height)?;
        if history_capacity == 0 {
            return Err(LifeError::InvalidHistoryCapacity);
        }

        // double-buffered from the start; the pool grows with the history
        let mut pool = CellPool::new(width, height, 2);
        let initial = pool.acquire();

        Ok(Self {
            width,
            height,
            history: History::new(initial, history_capacity),
            pool,
        })
    }

    /// Create a grid from a validated config, randomly filled at its density
    pub fn from_config(config: &SimConfig, rng: &mut impl Rng) -> Result<Self, LifeError> {
        config.validate()?;
        let mut grid = Self::new(config.width, config.height, config.history_capacity)?;
        if config.initial_density > 0.0 {
            grid.randomize(config.initial_density, rng)?;
        }
        Ok(grid)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn pool(&self) -> &CellPool {
        &self.pool
    }

    pub fn current(&self) -> &Generation {
        self.history.current()
    }

    /// Head-or-rewound generation that interactive edits write into
    pub fn current_mut(&mut self) -> &mut Generation {
        self.history.current_mut()
    }

    /// Live neighbours of (x, y) in the current generation, wrapping at edges
    pub fn neighbor_count(&self, x: u32, y: u32) -> u8 {
        self.current().neighbor_count(x, y)
    }

    pub fn color_for_neighbor_count(count: u8) -> Color {
        color_for_neighbor_count(count)
    }

    /// Flip the cell at (x, y) in the current generation
    pub fn toggle_cell(&mut self, x: i64, y: i64) -> Result<bool, LifeError> {
        let cell = self.current_mut().cell_mut(x, y)?;
        let alive = !cell.alive;
        cell.set_alive(alive);
        if alive {
            cell.color = Color::YELLOW;
        }
        Ok(alive)
    }

    /// Write `pattern` centred on (x, y) into the current generation.
    ///
    /// Pattern cell (i, j) lands on `(x + i - width/2, y + j - height/2)`.
    /// Dead pattern cells clear their target. Writes outside the grid are
    /// skipped one by one; stamping never wraps.
    pub fn stamp(&mut self, pattern: &Pattern, x: i64, y: i64) -> StampReport {
        let left = x - (pattern.width() / 2) as i64;
        let top = y - (pattern.height() / 2) as i64;
        let generation = self.history.current_mut();
        let mut report = StampReport::default();

        for j in 0..pattern.height() {
            for i in 0..pattern.width() {
                match generation.cell_mut(left + i as i64, top + j as i64) {
                    Ok(cell) => {
                        let alive = pattern.get(i, j);
                        cell.set_alive(alive);
                        cell.color = if alive { Color::WHITE } else { Color::BLACK };
                        cell.live_neighbors = 0;
                        report.written += 1;
                    }
                    Err(_) => report.skipped += 1,
                }
            }
        }

        report
    }

    /// Copy the square region centred on (x, y) into a pattern.
    ///
    /// Positions outside the grid read as dead.
    pub fn sample_region(&self, x: i64, y: i64, size: usize) -> Pattern {
        let left = x - (size / 2) as i64;
        let top = y - (size / 2) as i64;
        let generation = self.current();
        let cells = (0..size * size)
            .map(|k| {
                let (cx, cy) = (left + (k % size) as i64, top + (k / size) as i64);
                generation.contains(cx, cy) && generation.is_alive(cx as u32, cy as u32)
            })
            .collect();

        Pattern::from_bools(size, size, cells)
    }

    /// Mirror the region centred on (x, y) and stamp it just to its right
    pub fn mirror_region(&mut self, x: i64, y: i64, size: usize) -> StampReport {
        let mirrored = self.sample_region(x, y, size).mirror_horizontal();
        self.stamp(&mirrored, x + size as i64, y)
    }

    /// Randomly fill the current generation
    pub fn randomize(&mut self, density: f64, rng: &mut impl Rng) -> Result<(), LifeError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(LifeError::InvalidDensity(density));
        }
        for cell in self.current_mut().cells_mut() {
            cell.set_alive(rng.gen::<f64>() < density);
            cell.color = Color::BLACK;
        }
        Ok(())
    }

    /// An all-dead generation of this grid's size, reused from the pool
    pub fn acquire_generation(&mut self) -> Generation {
        self.pool.acquire()
    }

    /// Make `generation` the new head, following the current generation.
    ///
    /// Anything after the current generation is discarded first, and the
    /// oldest generation is evicted once the history is full.
    pub fn append_generation(&mut self, generation: Generation) {
        debug_assert!(
            !self.history.shares_buffer_with(&generation),
            "generation buffer is already held by the history"
        );
        self.truncate_future();
        if let Some(evicted) = self.history.push(generation) {
            log::debug!("History full, evicting oldest generation");
            self.pool.release(evicted);
        }
    }

    /// Compute the successor of the current generation and append it
    pub fn advance(&mut self, engine: &RuleEngine) {
        let mut next = self.pool.acquire();
        engine.step(self.history.current(), &mut next);
        self.append_generation(next);
    }

    pub fn rewind(&mut self) -> bool {
        self.history.rewind()
    }

    pub fn step_forward(&mut self) -> bool {
        self.history.step_forward()
    }

    /// Discard every generation after the current one
    pub fn truncate_future(&mut self) -> usize {
        let discarded = self.history.truncate_future();
        let count = discarded.len();
        if count > 0 {
            log::debug!("Discarding {} future generations", count);
        }
        for generation in discarded {
            self.pool.release(generation);
        }
        count
    }

    /// Drop all history and start again from one all-dead generation
    pub fn reset(&mut self) {
        let fresh = self.pool.acquire();
        for generation in self.history.reset(fresh) {
            self.pool.release(generation);
        }
    }
}
