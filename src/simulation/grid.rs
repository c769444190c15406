use std::fmt;

use rand::Rng;

use crate::error::{Result, SimError};
use crate::simulation::cell::Cell;

/// Relative positions of the eight Moore neighbors.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Square Life grid with a clamped (non-wrapping) boundary.
///
/// Two row-major buffers are owned for the lifetime of the grid. `current` is
/// the authoritative generation; `scratch` receives the pre-advance snapshot
/// when [`Grid::advance`] swaps the two, so a transition always reads a
/// complete prior generation and never allocates.
#[derive(Clone)]
pub struct Grid {
    size: usize,
    current: Vec<bool>,
    scratch: Vec<bool>,
}

impl Grid {
    /// Create an all-dead `size x size` grid
    pub fn new(size: usize) -> Result<Self> {
        let cell_count = checked_cell_count(size)?;
        Ok(Self {
            size,
            current: vec![false; cell_count],
            scratch: vec![false; cell_count],
        })
    }

    /// Edge length N of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current generation in row-major order
    pub fn cells(&self) -> &[bool] {
        &self.current
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool> {
        let index = self.index(row, col)?;
        Ok(self.current[index])
    }

    /// Overwrite one cell of the current generation. Takes effect immediately,
    /// not at the next advance.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<()> {
        let index = self.index(row, col)?;
        self.current[index] = alive;
        Ok(())
    }

    /// Flip one cell, returning its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<bool> {
        let index = self.index(row, col)?;
        self.current[index] = !self.current[index];
        Ok(self.current[index])
    }

    /// Live neighbors of `(row, col)` in the current generation, in `0..=8`.
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> Result<u8> {
        self.index(row, col)?;
        Ok(live_neighbors(&self.current, self.size, row, col))
    }

    /// Advance one generation (B3/S23).
    ///
    /// Every cell is evaluated against the snapshot taken before the first
    /// write, so no partially updated state is ever read.
    pub fn advance(&mut self) {
        std::mem::swap(&mut self.current, &mut self.scratch);

        let size = self.size;
        for row in 0..size {
            for col in 0..size {
                let index = row * size + col;
                let pop = live_neighbors(&self.scratch, size, row, col);
                self.current[index] = next_state(self.scratch[index], pop);
            }
        }
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.current.fill(false);
    }

    /// Replace the current generation with random cells, each alive with
    /// probability `density`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&density) {
            return Err(SimError::InvalidConfiguration(format!(
                "fill density {density} is outside [0, 1]"
            )));
        }
        for cell in &mut self.current {
            *cell = rng.gen_bool(density);
        }
        Ok(())
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.current.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of live cells in row-major order
    pub fn iter_live(&self) -> impl Iterator<Item = Cell> + '_ {
        let size = self.size;
        self.current
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(move |(index, _)| Cell::new(index / size, index % size))
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.size || col >= self.size {
            return Err(SimError::OutOfRange {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }
}

/// Number of cells in a `size x size` grid, rejecting empty grids and sizes
/// whose cell count does not fit in `usize`.
pub(crate) fn checked_cell_count(size: usize) -> Result<usize> {
    if size == 0 {
        return Err(SimError::InvalidConfiguration(
            "grid size must be at least 1".to_string(),
        ));
    }
    size.checked_mul(size).ok_or_else(|| {
        SimError::InvalidConfiguration(format!("grid size {size} has too many cells"))
    })
}

/// Count live neighbors in `state`. Offsets outside `[0, size)` contribute
/// nothing; the center is never counted.
fn live_neighbors(state: &[bool], size: usize, row: usize, col: usize) -> u8 {
    let center = Cell::new(row, col);
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|&(d_row, d_col)| center.offset(d_row, d_col, size))
        .filter(|neighbor| state[neighbor.row * size + neighbor.col])
        .count() as u8
}

fn next_state(alive: bool, pop: u8) -> bool {
    match (alive, pop) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Death or stays dead
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.current.chunks(self.size) {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.size, self.size)?;
        fmt::Display::fmt(self, f)
    }
}
