use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::{ColorMode, PARALLEL_THRESHOLD};
use crate::simulation::cell::{color_for_neighbor_count, Cell, CellState, Color};
use crate::simulation::generation::Generation;
use crate::simulation::rules::{Conway, Rule};

/// Computes generation N+1 from generation N with a pluggable rule
pub struct RuleEngine {
    rule: Box<dyn Rule>,
    color_mode: ColorMode,
    parallel_threshold: usize,
    /// Base seed for random colours; each row derives its own stream
    color_seed: u64,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(Box::new(Conway))
    }
}

impl RuleEngine {
    pub fn new(rule: Box<dyn Rule>) -> Self {
        Self {
            rule,
            color_mode: ColorMode::default(),
            parallel_threshold: PARALLEL_THRESHOLD,
            color_seed: 0,
        }
    }

    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn with_color_seed(mut self, color_seed: u64) -> Self {
        self.color_seed = color_seed;
        self
    }

    /// Set the seed random colours are drawn from on the next step
    pub fn reseed(&mut self, color_seed: u64) {
        self.color_seed = color_seed;
    }

    pub fn rule(&self) -> &dyn Rule {
        self.rule.as_ref()
    }

    pub fn set_rule(&mut self, rule: Box<dyn Rule>) {
        log::info!("Rule: {} -> {}", self.rule.name(), rule.name());
        self.rule = rule;
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn set_color_mode(&mut self, color_mode: ColorMode) {
        self.color_mode = color_mode;
    }

    /// Overwrite every cell of `next` with the successor of `current`.
    ///
    /// `current` is only borrowed immutably, so it is a complete snapshot for
    /// the whole step even when rows are computed on several threads.
    pub fn step(&self, current: &Generation, next: &mut Generation) {
        debug_assert_eq!(
            (current.width(), current.height()),
            (next.width(), next.height()),
            "generations must share dimensions"
        );

        let width = current.width() as usize;
        let rows = next.cells_mut();

        if rows.len() >= self.parallel_threshold {
            rows.par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| self.fill_row(current, y as u32, row));
        } else {
            rows.chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| self.fill_row(current, y as u32, row));
        }
    }

    /// Step into a freshly allocated generation
    pub fn next_generation(&self, current: &Generation) -> Generation {
        let mut next = Generation::new(current.width(), current.height());
        self.step(current, &mut next);
        next
    }

    fn fill_row(&self, current: &Generation, y: u32, row: &mut [Cell]) {
        // same stream for a row whether or not rows run in parallel
        let mut rng = StdRng::seed_from_u64(self.color_seed ^ y as u64);
        for (x, slot) in row.iter_mut().enumerate() {
            *slot = self.next_cell(current, x as u32, y, &mut rng);
        }
    }

    fn next_cell(&self, current: &Generation, x: u32, y: u32, rng: &mut impl Rng) -> Cell {
        let previous = current.get(x, y).copied().unwrap_or_else(|| Cell::dead(x, y));
        let live_neighbors = current.neighbor_count(x, y);
        let state = self.rule.next_state(previous.state, live_neighbors);

        let color = match self.color_mode {
            ColorMode::NeighborCount => color_for_neighbor_count(live_neighbors),
            ColorMode::Random => match state {
                CellState::Dead => color_for_neighbor_count(live_neighbors),
                _ if previous.is_visible() => previous.color,
                _ => Color::random(rng),
            },
        };

        let mut cell = Cell::dead(x, y);
        cell.set_state(state);
        cell.color = color;
        cell.live_neighbors = live_neighbors;
        cell
    }
}
