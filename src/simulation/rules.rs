//! Automaton rules.
//!
//! A rule only decides the next state of one cell from its current state
//! and live-neighbour count; the stepping loop is shared by every rule.

use crate::simulation::cell::CellState;

/// Next-state function for a single cell
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    fn next_state(&self, current: CellState, live_neighbors: u8) -> CellState;
}

/// Conway's Game of Life (B3/S23).
///
/// A live cell survives with 2 or 3 live neighbours, a dead cell is born
/// with exactly 3, everything else is dead.
#[derive(Clone, Copy, Debug, Default)]
pub struct Conway;

impl Rule for Conway {
    fn name(&self) -> &'static str {
        "Conway"
    }

    fn next_state(&self, current: CellState, live_neighbors: u8) -> CellState {
        let alive = match current {
            CellState::Alive => live_neighbors == 2 || live_neighbors == 3,
            CellState::Dying | CellState::Dead => live_neighbors == 3,
        };
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// Brian's Brain three-state automaton.
///
/// Alive always becomes Dying, Dying always becomes Dead, and Dead fires
/// (becomes Alive) with exactly 2 live neighbours. Only Alive cells count
/// as live neighbours.
#[derive(Clone, Copy, Debug, Default)]
pub struct BriansBrain;

impl Rule for BriansBrain {
    fn name(&self) -> &'static str {
        "Brian's Brain"
    }

    fn next_state(&self, current: CellState, live_neighbors: u8) -> CellState {
        match current {
            CellState::Alive => CellState::Dying,
            CellState::Dying => CellState::Dead,
            CellState::Dead if live_neighbors == 2 => CellState::Alive,
            CellState::Dead => CellState::Dead,
        }
    }
}
