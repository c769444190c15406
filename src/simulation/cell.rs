/// A position on the grid. Cells are not stored objects, only coordinates
/// into a [`Grid`](super::Grid).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset this cell by a signed delta, returning None when the result
    /// leaves `[0, size)` on either axis. No wraparound.
    pub fn offset(self, d_row: isize, d_col: isize, size: usize) -> Option<Cell> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row < size && col < size).then_some(Cell { row, col })
    }
}

/// GPU-compatible cell state, one per grid cell in row-major order.
///
/// Layout: 4 bytes, matching `array<u32>` in the render shader.
/// - state: 1 = alive, 0 = dead
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuCell {
    pub state: u32,
}

impl From<bool> for GpuCell {
    fn from(alive: bool) -> Self {
        Self {
            state: u32::from(alive),
        }
    }
}
