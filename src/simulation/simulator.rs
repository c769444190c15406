use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{SimConfig, RANDOM_FILL_DENSITY, SLOW_DOWN_FACTOR, SPEED_UP_FACTOR};
use crate::error::{Result, SimError};
use crate::simulation::grid::Grid;
use crate::simulation::patterns::PATTERNS;
use crate::simulation::scheduler::{RunState, StepScheduler};

/// One discrete, edge-triggered input to the simulator. Coordinates are grid
/// cells, already translated from screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    SetCell { row: usize, col: usize, alive: bool },
    ToggleCell { row: usize, col: usize },
    TogglePause,
    SetPaused(bool),
    /// Shorten the step interval by the canonical factor
    SpeedUp,
    /// Lengthen the step interval by the canonical factor
    SlowDown,
    ScaleInterval(f64),
    /// Advance one generation now, whether or not the scheduler is running
    StepOnce,
    Clear,
    Randomize { seed: u64 },
    /// Stamp `PATTERNS[pattern]` with its top-left corner at `(row, col)`
    Stamp { pattern: usize, row: usize, col: usize },
}

/// The simulation core: a grid, the scheduler that paces it, and a
/// generation counter.
#[derive(Clone, Debug)]
pub struct Simulator {
    grid: Grid,
    scheduler: StepScheduler,
    generation: u64,
}

impl Simulator {
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.grid_size)?;
        let mut scheduler = StepScheduler::new(config.step_interval)?;
        scheduler.set_paused(config.start_paused);

        log::debug!(
            "Simulator ready: {}x{} grid, {:?} per step",
            config.grid_size,
            config.grid_size,
            config.step_interval
        );

        Ok(Self {
            grid,
            scheduler,
            generation: 0,
        })
    }

    /// Feed one frame's elapsed time. Runs at most one generation and
    /// returns whether it did.
    pub fn advance_one_tick(&mut self, elapsed: Duration) -> bool {
        if self.scheduler.tick(elapsed) {
            self.step();
            true
        } else {
            false
        }
    }

    /// Apply one command. Rejected commands leave the simulator unchanged.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::SetCell { row, col, alive } => self.grid.set(row, col, alive)?,
            Command::ToggleCell { row, col } => {
                self.grid.toggle(row, col)?;
            }
            Command::TogglePause => {
                let state = self.scheduler.toggle_pause();
                log::info!("{}", if state == RunState::Paused { "Paused" } else { "Running" });
            }
            Command::SetPaused(paused) => self.scheduler.set_paused(paused),
            Command::SpeedUp => self.scheduler.set_interval_scale(SPEED_UP_FACTOR)?,
            Command::SlowDown => self.scheduler.set_interval_scale(SLOW_DOWN_FACTOR)?,
            Command::ScaleInterval(factor) => self.scheduler.set_interval_scale(factor)?,
            Command::StepOnce => self.step(),
            Command::Clear => {
                self.grid.clear();
                self.generation = 0;
                log::info!("Grid cleared");
            }
            Command::Randomize { seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                self.grid.randomize(&mut rng, RANDOM_FILL_DENSITY)?;
                self.generation = 0;
                log::info!("Random fill (seed {seed:#x}), population {}", self.grid.population());
            }
            Command::Stamp { pattern, row, col } => {
                let pattern = PATTERNS.get(pattern).ok_or_else(|| {
                    SimError::InvalidConfiguration(format!(
                        "no pattern #{pattern} (have {})",
                        PATTERNS.len()
                    ))
                })?;
                let placed = pattern.stamp(&mut self.grid, row, col)?;
                log::info!("Placed {} at ({row}, {col}), {placed} cells", pattern.name);
            }
        }
        Ok(())
    }

    fn step(&mut self) {
        self.grid.advance();
        self.generation += 1;
        log::trace!("Generation {}", self.generation);
    }

    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<()> {
        self.apply(Command::SetCell { row, col, alive })
    }

    /// Flip pause state, returning the new state
    pub fn toggle_pause(&mut self) -> Result<RunState> {
        self.apply(Command::TogglePause)?;
        Ok(self.scheduler.state())
    }

    pub fn scale_interval(&mut self, factor: f64) -> Result<()> {
        self.apply(Command::ScaleInterval(factor))
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool> {
        self.grid.get(row, col)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn scheduler(&self) -> &StepScheduler {
        &self.scheduler
    }

    /// Edge length N of the grid
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn progress_fraction(&self) -> f64 {
        self.scheduler.progress_fraction()
    }

    pub fn is_paused(&self) -> bool {
        self.scheduler.is_paused()
    }

    pub fn interval(&self) -> Duration {
        self.scheduler.interval()
    }
}
