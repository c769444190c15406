use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};

use clamped_life::config::{CELL_PIXELS, PROGRESS_BAR_PIXELS};

/// Window geometry: the grid fills the top of the surface and the progress
/// strip takes a fixed number of pixels along the bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    width: u32,
    height: u32,
    bar_pixels: u32,
    grid_size: usize,
}

impl Layout {
    pub fn new(size: PhysicalSize<u32>, scale_factor: f64, grid_size: usize) -> Self {
        let bar_pixels = (PROGRESS_BAR_PIXELS as f64 * scale_factor).round() as u32;
        Self {
            width: size.width,
            height: size.height,
            bar_pixels: bar_pixels.min(size.height),
            grid_size,
        }
    }

    /// Initial window size for a grid of `grid_size` cells
    pub fn initial_window_size(grid_size: usize) -> LogicalSize<u32> {
        let side = grid_size as u32 * CELL_PIXELS;
        LogicalSize::new(side, side + PROGRESS_BAR_PIXELS)
    }

    /// Share of the surface height used by the progress strip
    pub fn bar_fraction(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.bar_pixels as f32 / self.height as f32
    }

    /// Translate a cursor position into a grid cell. None outside the grid
    /// area, including over the progress strip.
    pub fn cell_at(&self, position: PhysicalPosition<f64>) -> Option<(usize, usize)> {
        let grid_height = self.height.saturating_sub(self.bar_pixels);
        if self.width == 0 || grid_height == 0 {
            return None;
        }
        if position.x < 0.0
            || position.y < 0.0
            || position.x >= self.width as f64
            || position.y >= grid_height as f64
        {
            return None;
        }

        let n = self.grid_size as f64;
        let col = (position.x / self.width as f64 * n) as usize;
        let row = (position.y / grid_height as f64 * n) as usize;
        Some((row.min(self.grid_size - 1), col.min(self.grid_size - 1)))
    }
}
