use std::time::Duration;

use crate::error::{Result, SimError};
use crate::simulation::checked_cell_count;

/// Grid dimensions (64x64 cells, square and fixed for the lifetime of a run)
pub const GRID_SIZE: usize = 64;

/// Wall-clock time between generations when the simulator starts
pub const INITIAL_STEP_INTERVAL: Duration = Duration::from_millis(200);

/// Interval multiplier applied per "speed up" command
pub const SPEED_UP_FACTOR: f64 = 1.0 / 1.25;

/// Interval multiplier applied per "slow down" command
pub const SLOW_DOWN_FACTOR: f64 = 1.25;

/// Fraction of cells alive after a random fill
pub const RANDOM_FILL_DENSITY: f64 = 0.3;

// ============================================
// Window layout
// ============================================

/// Edge length of one cell on screen, in logical pixels
pub const CELL_PIXELS: u32 = 12;

/// Height of the step progress strip under the grid, in logical pixels
pub const PROGRESS_BAR_PIXELS: u32 = 10;

/// Construction-time settings for a [`Simulator`](crate::simulation::Simulator).
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub grid_size: usize,
    pub step_interval: Duration,
    pub start_paused: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            step_interval: INITIAL_STEP_INTERVAL,
            start_paused: true,
        }
    }
}

impl SimConfig {
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_step_interval(mut self, step_interval: Duration) -> Self {
        self.step_interval = step_interval;
        self
    }

    /// Reject settings the simulator cannot run with.
    pub fn validate(&self) -> Result<()> {
        checked_cell_count(self.grid_size)?;
        if self.step_interval.is_zero() {
            return Err(SimError::InvalidConfiguration(
                "step interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.start_paused);
        assert_eq!(config.grid_size, GRID_SIZE);
    }

    #[test]
    fn test_zero_grid_rejected() {
        let config = SimConfig::default().with_grid_size(0);
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_overflowing_grid_rejected() {
        let config = SimConfig::default().with_grid_size(1 << (usize::BITS / 2));
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = SimConfig::default().with_step_interval(Duration::ZERO);
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_speed_factors_cancel() {
        assert!((SPEED_UP_FACTOR * SLOW_DOWN_FACTOR - 1.0).abs() < 1e-12);
    }
}
