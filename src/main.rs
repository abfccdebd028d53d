mod app;
mod gpu;
mod input;

use app::App;
use toroidal_life::config::SimConfig;
use toroidal_life::simulation::Simulation;
use winit::event_loop::{ControlFlow, EventLoop};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Game of Life");

    let simulation = match Simulation::new(SimConfig::default()) {
        Ok(simulation) => simulation,
        Err(e) => {
            log::error!("Invalid simulation config: {}", e);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(simulation);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
