use wgpu::{Buffer, BufferUsages, Device, Queue};

use crate::layout::Layout;
use clamped_life::simulation::{GpuCell, Grid};

/// Render parameters passed to the shader (16 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderParams {
    pub grid_size: u32,
    pub paused: u32,        // 0 = running, 1 = paused
    pub progress: f32,      // [0, 1) toward the next generation
    pub bar_fraction: f32,  // Share of the window height used by the progress strip
}

/// Cell storage buffer plus the render uniform.
///
/// The grid is computed on the CPU; this only mirrors the current generation
/// for drawing, so a single cell buffer is enough.
pub struct GridBuffers {
    pub cells_buffer: Buffer,
    pub params_buffer: Buffer,
    /// Reused upload staging, one entry per cell
    staging: Vec<GpuCell>,
    grid_size: u32,
}

impl GridBuffers {
    pub fn new(device: &Device, queue: &Queue, grid: &Grid) -> Self {
        let cell_count = grid.cells().len();
        let buffer_size = (cell_count * std::mem::size_of::<GpuCell>()) as u64;

        let cells_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cells-buffer"),
            size: buffer_size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("render-params-buffer"),
            size: std::mem::size_of::<RenderParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut buffers = Self {
            cells_buffer,
            params_buffer,
            staging: vec![GpuCell::default(); cell_count],
            grid_size: grid.size() as u32,
        };
        buffers.upload_cells(queue, grid);
        buffers
    }

    /// Copy the current generation to the GPU
    pub fn upload_cells(&mut self, queue: &Queue, grid: &Grid) {
        debug_assert_eq!(grid.cells().len(), self.staging.len(), "Grid size changed");
        for (slot, &alive) in self.staging.iter_mut().zip(grid.cells()) {
            *slot = GpuCell::from(alive);
        }
        queue.write_buffer(&self.cells_buffer, 0, bytemuck::cast_slice(&self.staging));
    }

    pub fn update_params(&self, queue: &Queue, progress: f64, paused: bool, layout: &Layout) {
        let params = RenderParams {
            grid_size: self.grid_size,
            paused: u32::from(paused),
            progress: progress as f32,
            bar_fraction: layout.bar_fraction(),
        };
        queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&params));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_params_size() {
        // Uniform buffers bind in 16-byte units.
        assert_eq!(std::mem::size_of::<RenderParams>(), 16);
    }
}
