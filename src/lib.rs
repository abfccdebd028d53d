//! Toroidal Game of Life with a rewindable generation history.
//!
//! The library is the simulation core: grid, rules, history, patterns and
//! the frame-driven [`simulation::Simulation`] controller. Windowing and
//! drawing live in the binary.

pub mod config;
pub mod error;
pub mod simulation;

pub use error::LifeError;
