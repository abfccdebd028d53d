use crate::error::LifeError;

/// Grid dimensions (128x96 cells at 8px = 1024x768 window)
pub const GRID_WIDTH: u32 = 128;
pub const GRID_HEIGHT: u32 = 96;

/// Size of one cell on screen, in pixels
pub const CELL_SIZE: u32 = 8;

/// Smallest and largest zoom levels the UI may request
pub const MIN_CELL_SIZE: u32 = 2;
pub const MAX_CELL_SIZE: u32 = 64;

/// Largest grid, in cells, a simulation may be built with
pub const MAX_CELL_COUNT: usize = 1 << 24;

/// Number of generations kept for rewind (oldest evicted first)
pub const HISTORY_CAPACITY: usize = 100;

// ============================================
// Simulation timing
// ============================================

/// Seconds of accumulated frame time between automatic steps
pub const DEFAULT_TICK_RATE: f64 = 0.3;

/// Amount the tick rate moves per faster/slower command
pub const TICK_RATE_STEP: f64 = 0.02;

/// A tick rate of zero steps once per frame
pub const MIN_TICK_RATE: f64 = 0.0;

// ============================================
// Seeding and patterns
// ============================================

/// Probability that a cell starts alive in a freshly seeded grid
pub const INITIAL_DENSITY: f64 = 0.5;

/// Random stamp pattern dimensions and fill density
pub const RANDOM_PATTERN_SIZE: usize = 30;
pub const RANDOM_PATTERN_DENSITY: f64 = 0.1;

/// Side of the square region sampled by mirror-and-shift
pub const MIRROR_REGION_SIZE: usize = 8;

/// Grids with at least this many cells are stepped row-parallel
pub const PARALLEL_THRESHOLD: usize = 64 * 64;

/// Cell count of a `width` x `height` grid, if it is a buildable size.
///
/// Rejects a zero side and anything above [`MAX_CELL_COUNT`].
pub fn cell_count(width: u32, height: u32) -> Result<usize, LifeError> {
    match (width as usize).checked_mul(height as usize) {
        Some(count) if count > 0 && count <= MAX_CELL_COUNT => Ok(count),
        _ => Err(LifeError::InvalidDimensions { width, height }),
    }
}

/// How stepped cells are coloured
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colour encodes the live-neighbour count the rule saw
    #[default]
    NeighborCount,
    /// Survivors keep their colour, newborns get a random one
    Random,
}

/// Runtime simulation settings
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub history_capacity: usize,
    pub tick_rate: f64,
    pub initial_density: f64,
    pub parallel_threshold: usize,
    pub color_mode: ColorMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            cell_size: CELL_SIZE,
            history_capacity: HISTORY_CAPACITY,
            tick_rate: DEFAULT_TICK_RATE,
            initial_density: INITIAL_DENSITY,
            parallel_threshold: PARALLEL_THRESHOLD,
            color_mode: ColorMode::default(),
        }
    }
}

impl SimConfig {
    /// An empty (all-dead) grid of the given size with otherwise default settings
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            initial_density: 0.0,
            ..Self::default()
        }
    }

    /// Check every field is usable before building a simulation from it
    pub fn validate(&self) -> Result<(), LifeError> {
        cell_count(self.width, self.height)?;
        if self.history_capacity == 0 {
            return Err(LifeError::InvalidHistoryCapacity);
        }
        if self.cell_size == 0 {
            return Err(LifeError::InvalidCellSize(self.cell_size));
        }
        if !(self.tick_rate >= MIN_TICK_RATE) {
            return Err(LifeError::InvalidTickRate(self.tick_rate));
        }
        if !(0.0..=1.0).contains(&self.initial_density) {
            return Err(LifeError::InvalidDensity(self.initial_density));
        }
        Ok(())
    }

    /// Window size in pixels needed to show the whole grid
    pub fn window_size(&self) -> (u32, u32) {
        (
            self.width.saturating_mul(self.cell_size),
            self.height.saturating_mul(self.cell_size),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
        assert_eq!(SimConfig::default().history_capacity, 100);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let config = SimConfig::empty(0, 10);
        assert!(matches!(
            config.validate(),
            Err(LifeError::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_rejects_oversized_grids() {
        assert_eq!(cell_count(4096, 4096), Ok(MAX_CELL_COUNT));
        assert!(cell_count(4097, 4096).is_err());

        // 2^32 cells would wrap a u32 product to zero
        let config = SimConfig::empty(65_536, 65_536);
        assert!(matches!(
            config.validate(),
            Err(LifeError::InvalidDimensions { width: 65_536, height: 65_536 })
        ));
        assert!(SimConfig::empty(u32::MAX, u32::MAX).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_density_and_tick_rate() {
        let mut config = SimConfig::empty(4, 4);
        config.initial_density = 1.5;
        assert!(matches!(config.validate(), Err(LifeError::InvalidDensity(_))));

        let mut config = SimConfig::empty(4, 4);
        config.tick_rate = -0.1;
        assert!(matches!(config.validate(), Err(LifeError::InvalidTickRate(_))));

        let mut config = SimConfig::empty(4, 4);
        config.tick_rate = f64::NAN;
        assert!(config.validate().is_err(), "NaN tick rate must be rejected");
    }

    #[test]
    fn test_window_size() {
        let config = SimConfig::default();
        assert_eq!(config.window_size(), (1024, 768));
    }
}
