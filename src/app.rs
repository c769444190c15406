use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::gpu::{GpuContext, GridBuffers, RenderPipeline};
use crate::layout::Layout;
use clamped_life::config::SimConfig;
use clamped_life::simulation::{Command, Simulator, PATTERNS};

/// GPU state, created once the window exists
struct Renderer {
    gpu: GpuContext,
    buffers: GridBuffers,
    pipeline: RenderPipeline,
}

/// Application state
pub struct App {
    sim: Simulator,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    layout: Layout,
    cursor: Option<PhysicalPosition<f64>>,
    /// While a mouse button is held: the state painted into cells under the cursor
    paint: Option<bool>,
    cells_dirty: bool,
    last_frame: Option<Instant>,
    fps_counter: FpsCounter,
}

impl App {
    pub fn new(config: &SimConfig) -> clamped_life::Result<Self> {
        let sim = Simulator::new(config)?;
        let layout = Layout::new(Default::default(), 1.0, sim.size());
        Ok(Self {
            sim,
            window: None,
            renderer: None,
            layout,
            cursor: None,
            paint: None,
            cells_dirty: true,
            last_frame: None,
            fps_counter: FpsCounter::new(),
        })
    }

    fn apply(&mut self, command: Command) {
        match self.sim.apply(command) {
            Ok(()) => self.cells_dirty = true,
            Err(e) => log::warn!("{:?} rejected: {}", command, e),
        }
    }

    fn cursor_cell(&self) -> Option<(usize, usize)> {
        self.cursor.and_then(|position| self.layout.cell_at(position))
    }

    fn paint_at_cursor(&mut self) {
        if let (Some(alive), Some((row, col))) = (self.paint, self.cursor_cell()) {
            // Dragging revisits the same cell many times; skip no-op writes.
            if self.sim.get(row, col).ok() != Some(alive) {
                self.apply(Command::SetCell { row, col, alive });
            }
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Space => self.apply(Command::TogglePause),

            // Speed (interval shrinks/grows by 1.25x per press)
            KeyCode::ArrowUp | KeyCode::Equal => self.apply(Command::SpeedUp),
            KeyCode::ArrowDown | KeyCode::Minus => self.apply(Command::SlowDown),

            KeyCode::KeyN => self.apply(Command::StepOnce),
            KeyCode::KeyC => self.apply(Command::Clear),
            KeyCode::KeyR => self.apply(Command::Randomize {
                seed: rand::random(),
            }),

            // Stamp a pattern with its corner under the cursor
            KeyCode::Digit1
            | KeyCode::Digit2
            | KeyCode::Digit3
            | KeyCode::Digit4
            | KeyCode::Digit5
            | KeyCode::Digit6
            | KeyCode::Digit7 => {
                let Some(pattern) = pattern_for_key(key_code) else {
                    return;
                };
                match self.cursor_cell() {
                    Some((row, col)) => self.apply(Command::Stamp { pattern, row, col }),
                    None => log::info!("Move the cursor over the grid to place a pattern"),
                }
            }

            _ => {}
        }
    }

    fn frame(&mut self) {
        let now = Instant::now();
        let elapsed = self.last_frame.map_or(Duration::ZERO, |last| now - last);
        self.last_frame = Some(now);

        if self.sim.advance_one_tick(elapsed) {
            self.cells_dirty = true;
        }

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let gpu = &renderer.gpu;

        if self.cells_dirty {
            renderer.buffers.upload_cells(&gpu.queue, self.sim.grid());
            self.cells_dirty = false;
        }
        renderer.buffers.update_params(
            &gpu.queue,
            self.sim.progress_fraction(),
            self.sim.is_paused(),
            &self.layout,
        );

        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });
        renderer.pipeline.draw(&mut encoder, &view);
        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(fps) = self.fps_counter.tick() {
            if let Some(window) = &self.window {
                window.set_title(&format!(
                    "Clamped Life - gen {} - pop {} - {} ms/step{} - {:.0} FPS",
                    self.sim.generation(),
                    self.sim.population(),
                    self.sim.interval().as_millis(),
                    if self.sim.is_paused() { " [Paused]" } else { "" },
                    fps
                ));
            }
        }
    }
}

/// Digit keys 1-7 select `PATTERNS[0..7]`
fn pattern_for_key(key_code: KeyCode) -> Option<usize> {
    let index = match key_code {
        KeyCode::Digit1 => 0,
        KeyCode::Digit2 => 1,
        KeyCode::Digit3 => 2,
        KeyCode::Digit4 => 3,
        KeyCode::Digit5 => 4,
        KeyCode::Digit6 => 5,
        KeyCode::Digit7 => 6,
        _ => return None,
    };
    (index < PATTERNS.len()).then_some(index)
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("Initializing Clamped Life...");
        log::info!("Grid size: {}x{}", self.sim.size(), self.sim.size());

        let window_attrs = Window::default_attributes()
            .with_title("Clamped Life")
            .with_inner_size(Layout::initial_window_size(self.sim.size()));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        log::info!("Creating GPU context...");
        let gpu = match pollster::block_on(GpuContext::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("GPU initialization failed: {}", e);
                event_loop.exit();
                return;
            }
        };

        let buffers = GridBuffers::new(&gpu.device, &gpu.queue, self.sim.grid());
        let pipeline = RenderPipeline::new(&gpu.device, gpu.format(), &buffers);
        self.layout = Layout::new(window.inner_size(), window.scale_factor(), self.sim.size());

        log::info!("Initialization complete! Simulation starts paused.");
        log::info!("Controls:");
        log::info!("  Left/Right mouse: Draw/erase cells");
        log::info!("  Space: Pause/resume");
        log::info!("  Up/=, Down/-: Faster/slower");
        log::info!("  N: Single step");
        log::info!("  C: Clear");
        log::info!("  R: Random fill");
        for (i, pattern) in PATTERNS.iter().enumerate() {
            log::info!("  {}: Place {}", i + 1, pattern.name);
        }
        log::info!("  Escape: Quit");

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(Renderer {
            gpu,
            buffers,
            pipeline,
        });
        self.cells_dirty = false;
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                // Commands are edge-triggered: ignore auto-repeat.
                if event.state.is_pressed() && !event.repeat {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(position);
                self.paint_at_cursor();
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.paint = None;
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.paint = match (state, button) {
                    (ElementState::Pressed, MouseButton::Left) => Some(true),
                    (ElementState::Pressed, MouseButton::Right) => Some(false),
                    (ElementState::Released, _) => None,
                    _ => self.paint,
                };
                self.paint_at_cursor();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    renderer.gpu.resize(new_size);
                }
                let scale_factor = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                self.layout = Layout::new(new_size, scale_factor, self.sim.size());
            }
            WindowEvent::RedrawRequested => {
                self.frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Frames-per-second over one-second windows
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Count a frame; returns Some(fps) once per second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_keys_map_to_patterns() {
        assert_eq!(pattern_for_key(KeyCode::Digit1), Some(0));
        assert_eq!(pattern_for_key(KeyCode::Digit7), Some(6));
        assert_eq!(pattern_for_key(KeyCode::KeyA), None);
    }

    #[test]
    fn test_paint_skips_without_cursor() {
        let mut app = App::new(&SimConfig::default()).unwrap();
        app.paint = Some(true);
        app.paint_at_cursor();
        assert_eq!(app.sim.population(), 0);
    }

    #[test]
    fn test_keys_drive_simulator() {
        let mut app = App::new(&SimConfig::default()).unwrap();
        let interval = app.sim.interval();
        app.handle_key(KeyCode::ArrowDown);
        assert!(app.sim.interval() > interval);
        app.handle_key(KeyCode::Space);
        assert!(!app.sim.is_paused());
        app.handle_key(KeyCode::KeyR);
        assert!(app.sim.population() > 0);
        app.handle_key(KeyCode::KeyC);
        assert_eq!(app.sim.population(), 0);
    }
}
