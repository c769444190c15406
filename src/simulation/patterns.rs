use crate::error::Result;
use crate::simulation::grid::Grid;

/// A named arrangement of live cells, as `(row, col)` offsets from its
/// top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
};

pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    cells: &[(0, 0), (0, 1), (0, 2)],
};

pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

pub const TOAD: Pattern = Pattern {
    name: "Toad",
    cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
};

pub const BEACON: Pattern = Pattern {
    name: "Beacon",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
};

pub const R_PENTOMINO: Pattern = Pattern {
    name: "R-pentomino",
    cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
};

#[rustfmt::skip]
pub const GOSPER_GLIDER_GUN: Pattern = Pattern {
    name: "Gosper Glider Gun",
    cells: &[
        (4, 0), (4, 1), (5, 0), (5, 1),
        (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
        (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
        (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
        (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
        (2, 34), (3, 34), (2, 35), (3, 35),
    ],
};

/// Patterns in the order the number keys select them
pub const PATTERNS: &[Pattern] = &[
    GLIDER,
    BLINKER,
    TOAD,
    BEACON,
    BLOCK,
    R_PENTOMINO,
    GOSPER_GLIDER_GUN,
];

impl Pattern {
    /// Set this pattern's cells alive with its top-left corner at
    /// `(row, col)`. Cells past the grid edge are dropped. Returns how many
    /// cells landed on the grid.
    pub fn stamp(&self, grid: &mut Grid, row: usize, col: usize) -> Result<usize> {
        // The origin itself must be on the grid; only the tail may be clipped.
        grid.get(row, col)?;

        let size = grid.size();
        let mut placed = 0;
        for &(d_row, d_col) in self.cells {
            let (r, c) = (row + d_row, col + d_col);
            if r < size && c < size {
                grid.set(r, c, true)?;
                placed += 1;
            }
        }
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn test_stamp_places_all_cells() {
        let mut grid = Grid::new(10).unwrap();
        assert_eq!(GLIDER.stamp(&mut grid, 2, 3).unwrap(), 5);
        assert!(grid.get(2, 4).unwrap());
        assert!(grid.get(4, 3).unwrap());
        assert_eq!(grid.population(), 5);
    }

    #[test]
    fn test_stamp_clips_at_edge() {
        let mut grid = Grid::new(5).unwrap();
        assert_eq!(BLINKER.stamp(&mut grid, 4, 3).unwrap(), 2);
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn test_stamp_rejects_origin_off_grid() {
        let mut grid = Grid::new(5).unwrap();
        assert!(matches!(
            BLOCK.stamp(&mut grid, 5, 0),
            Err(SimError::OutOfRange { .. })
        ));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_glider_translates() {
        let mut grid = Grid::new(12).unwrap();
        GLIDER.stamp(&mut grid, 1, 1).unwrap();
        for _ in 0..4 {
            grid.advance();
        }
        // After one period the glider has moved one cell down and right.
        let mut expected = Grid::new(12).unwrap();
        GLIDER.stamp(&mut expected, 2, 2).unwrap();
        assert_eq!(grid.cells(), expected.cells());
    }

    #[test]
    fn test_beacon_period_two() {
        let mut grid = Grid::new(8).unwrap();
        BEACON.stamp(&mut grid, 2, 2).unwrap();
        let start = grid.cells().to_vec();
        grid.advance();
        assert_eq!(grid.population(), 6);
        grid.advance();
        assert_eq!(grid.cells(), start.as_slice());
    }
}
