mod app;
mod gpu;
mod layout;

use winit::event_loop::{ControlFlow, EventLoop};

use app::App;
use clamped_life::config::SimConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new()?;
    // Redraws are requested back to back; the scheduler paces generations.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(&SimConfig::default())?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
