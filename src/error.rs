//! Error types for grid and configuration operations.

use thiserror::Error;

/// Errors reported by the simulation core.
///
/// None of these are fatal: the controller logs them and treats the
/// offending operation as a no-op.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifeError {
    /// A coordinate outside the grid extents.
    #[error("coordinates ({x}, {y}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// Grid dimensions with a zero side or too many cells.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// History must hold at least the current generation.
    #[error("history capacity must be at least 1")]
    InvalidHistoryCapacity,

    /// Zero-pixel cells cannot be drawn.
    #[error("invalid cell size {0}")]
    InvalidCellSize(u32),

    /// Negative (or NaN) tick interval.
    #[error("invalid tick rate {0}")]
    InvalidTickRate(f64),

    /// Probability outside [0, 1].
    #[error("density {0} is not in [0, 1]")]
    InvalidDensity(f64),

    /// Cell data does not match the declared pattern dimensions.
    #[error("pattern expects {expected} cells, got {actual}")]
    PatternShape { expected: usize, actual: usize },
}
