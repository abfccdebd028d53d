use std::sync::Arc;
use std::time::Instant;
use toroidal_life::simulation::{Color, Command, Simulation};
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::gpu::{GpuContext, GridBuffers, GridPass};
use crate::input::{cell_at, command_for_key};

/// GPU objects created once the window exists
struct Renderer {
    gpu: GpuContext,
    buffers: GridBuffers,
    pass: GridPass,
}

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    simulation: Simulation,
    colors: Vec<Color>,
    cursor: PhysicalPosition<f64>,
    mouse_down: bool,
    last_painted: Option<(i64, i64)>,
    last_frame: Instant,
    fps_counter: FpsCounter,
}

impl App {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            window: None,
            renderer: None,
            simulation,
            colors: Vec::new(),
            cursor: PhysicalPosition::new(0.0, 0.0),
            mouse_down: false,
            last_painted: None,
            last_frame: Instant::now(),
            fps_counter: FpsCounter::new(),
        }
    }

    fn cursor_cell(&self) -> (i64, i64) {
        cell_at(self.cursor, self.simulation.cell_size())
    }

    fn render(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;
        self.simulation.update(delta);

        let Some(renderer) = self.renderer.as_ref() else {
            return;
        };

        if self.simulation.take_redraw_request() {
            self.simulation.cell_colors(&mut self.colors);
            renderer.buffers.upload_cells(&renderer.gpu.queue, &self.colors);
        }
        let (cursor_x, cursor_y) = self.cursor_cell();
        renderer.buffers.update_render_params(
            &renderer.gpu.queue,
            self.simulation.cell_size(),
            self.simulation.show_grid_lines(),
            self.simulation.copy_box_at(cursor_x, cursor_y),
        );

        let output = match renderer.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.gpu.reconfigure();
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

        let mut encoder = renderer
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        renderer.pass.draw(&mut encoder, &view);

        renderer.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(fps) = self.fps_counter.tick() {
            if let Some(window) = &self.window {
                let status = self.simulation.status();
                window.set_title(&format!(
                    "Game of Life - {:.0} FPS - {} - gen {}/{}{} - tick {:.2}s - {} alive",
                    fps,
                    status.rule,
                    status.generation_index + 1,
                    status.history_len,
                    if status.paused { " [paused]" } else { "" },
                    status.tick_rate,
                    status.alive,
                ));
            }
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        let cursor = self.cursor_cell();
        if let Some(command) = command_for_key(key_code, cursor, self.simulation.cell_size()) {
            self.simulation.execute(command);
        }
    }

    /// Toggle the cell under the pointer unless it was the last one painted
    fn paint_at_cursor(&mut self) {
        let (x, y) = self.cursor_cell();
        if self.last_painted == Some((x, y)) {
            return;
        }
        self.last_painted = Some((x, y));
        self.simulation.execute(Command::ToggleCell { x, y });
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (grid_width, grid_height) = (self.simulation.width(), self.simulation.height());
        let cell_size = self.simulation.cell_size();
        log::info!("Grid size: {}x{} at {}px", grid_width, grid_height, cell_size);

        let window_attrs = Window::default_attributes()
            .with_title("Game of Life")
            .with_inner_size(PhysicalSize::new(
                grid_width.saturating_mul(cell_size),
                grid_height.saturating_mul(cell_size),
            ));

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
                log::error!("GPU setup failed: {}", e);
                event_loop.exit();
                return;
            }
        };
        let buffers = GridBuffers::new(&gpu.device, grid_width, grid_height);
        let pass = GridPass::new(&gpu.device, gpu.format(), &buffers);

        log::info!("Controls:");
        log::info!("  Space: Pause/resume (resuming discards rewound-over generations)");
        log::info!("  Left/Right: Rewind/step through history while paused");
        log::info!("  Mouse: Toggle cells");
        log::info!("  1-5: Glider, Gosper gun, Pulsar, Spaceship, Rabbits at cursor");
        log::info!("  R: Random pattern at cursor   T: Mirror region at cursor");
        log::info!("  Up/Down: Faster/slower   C/V: Zoom out/in");
        log::info!("  Q: Show dead cells   G: Grid lines   X: Copy box");
        log::info!("  B: Switch rule   K: Colour mode");
        log::info!("  S: Reset grid   Escape: Quit");

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(Renderer { gpu, buffers, pass });
        self.last_frame = Instant::now();
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
                if event.state.is_pressed() {
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
                self.cursor = position;
                if self.mouse_down {
                    self.paint_at_cursor();
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.mouse_down = state == ElementState::Pressed;
                if self.mouse_down {
                    self.paint_at_cursor();
                } else {
                    self.last_painted = None;
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    renderer.gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Simple FPS counter
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

    /// Tick the counter, returns Some(fps) every second
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
