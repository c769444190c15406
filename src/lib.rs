//! Conway's Game of Life on a fixed, clamped-boundary grid.
//!
//! The [`simulation`] module holds the whole core: the double-buffered
//! [`Grid`](simulation::Grid), the [`StepScheduler`](simulation::StepScheduler)
//! that turns frame time into generations, and the
//! [`Simulator`](simulation::Simulator) facade that applies edit commands.
//! Windowing and rendering live in the binary.

pub mod config;
pub mod error;
pub mod simulation;

pub use error::{Result, SimError};
