mod cell;
mod grid;
pub mod patterns;
mod scheduler;
mod simulator;

pub use cell::{Cell, GpuCell};
pub(crate) use grid::checked_cell_count;
pub use grid::Grid;
pub use patterns::{Pattern, PATTERNS};
pub use scheduler::{RunState, StepScheduler};
pub use simulator::{Command, Simulator};
