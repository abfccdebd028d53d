pub mod cell;
pub mod controller;
pub mod engine;
pub mod generation;
pub mod grid;
pub mod history;
pub mod patterns;
pub mod pool;
pub mod rules;

pub use cell::{color_for_neighbor_count, Cell, CellState, Color};
pub use controller::{Command, CopyBox, Simulation, Status};
pub use engine::RuleEngine;
pub use generation::Generation;
pub use grid::{Grid, StampReport};
pub use history::History;
pub use patterns::{Pattern, PatternKind};
pub use pool::CellPool;
pub use rules::{BriansBrain, Conway, Rule};
