//! Sky Hopper entry point
//!
//! Owns the winit event loop: translates keyboard events into simulation
//! keys, drives the fixed-timestep tick from redraws, and hands the state to
//! the renderer.

use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use sky_hopper::consts::*;
use sky_hopper::renderer::{FollowCamera, RenderState, hud, shapes};
use sky_hopper::scores::ScoreBoard;
use sky_hopper::sim::{self, GamePhase, GameState, Key};

/// Application state for the event loop
struct App {
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    state: GameState,
    camera: FollowCamera,
    scores: ScoreBoard,
    accumulator: f32,
    last_frame: Option<Instant>,
    last_phase: GamePhase,
}

impl App {
    fn new(seed: u64) -> Self {
        Self {
            window: None,
            render_state: None,
            state: GameState::new(seed),
            camera: FollowCamera::new(),
            scores: ScoreBoard::new(),
            accumulator: 0.0,
            last_frame: None,
            last_phase: GamePhase::Playing,
        }
    }

    /// Run fixed-timestep simulation ticks for the elapsed real time
    fn update(&mut self, dt: f32) {
        // Cap huge frame gaps (window dragged, suspend) before accumulating
        self.accumulator += dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            sim::tick(&mut self.state);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if self.last_phase == GamePhase::Playing && self.state.phase == GamePhase::GameOver {
            match self.scores.add_score(self.state.score, self.state.time_ticks) {
                Some(rank) => log::info!(
                    "Game over: score {} (session rank {})",
                    self.state.score,
                    rank
                ),
                None => log::info!("Game over: score {}", self.state.score),
            }
        }
        self.last_phase = self.state.phase;
    }

    /// Render the current frame
    fn render(&mut self) {
        self.camera.update(self.state.camera_y);

        let world = shapes::world_vertices(&self.state);
        let overlay = hud::hud_vertices(&self.state, self.scores.top_score());

        if let Some(ref mut render_state) = self.render_state {
            match render_state.render(&world, &overlay, self.camera.pos) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    fn handle_key(&mut self, code: KeyCode, state: ElementState) {
        // Unrecognized keys are silently ignored
        let Some(key) = map_key(code) else { return };

        match state {
            ElementState::Pressed => {
                let was_over = self.state.phase == GamePhase::GameOver;
                sim::key_down(&mut self.state, key);
                if was_over && self.state.phase == GamePhase::Playing {
                    self.camera.snap(self.state.camera_y);
                    self.last_phase = GamePhase::Playing;
                    log::info!("Restarted");
                }
            }
            ElementState::Released => sim::key_up(&mut self.state, key),
        }
    }
}

/// Map window key codes to simulation keys
fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(Key::Left),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Key::Right),
        KeyCode::KeyR => Some(Key::Restart),
        _ => None,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Sky Hopper")
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("Failed to create window"),
        );
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .expect("Failed to create surface");
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = pollster::block_on(RenderState::new(
            surface,
            &adapter,
            size.width,
            size.height,
        ));

        window.request_redraw();
        self.window = Some(window);
        self.render_state = Some(render_state);
        self.last_frame = Some(Instant::now());
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(render_state) = &mut self.render_state {
                    render_state.resize(new_size.width, new_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.handle_key(code, event.state);
                }
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = self
                    .last_frame
                    .map(|last| now.duration_since(last).as_secs_f32())
                    .unwrap_or(SIM_DT);
                self.last_frame = Some(now);

                self.update(dt);
                self.render();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() -> Result<(), winit::error::EventLoopError> {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Sky Hopper starting (seed {})", seed);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(seed);
    event_loop.run_app(&mut app)
}
