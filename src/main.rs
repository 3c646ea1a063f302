//! Sisyphus - first-person box pushing
//!
//! Walk into boxes to shove them around, and roll the boulder up the hill.

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use sisyphus::config::AppConfig;
use sisyphus::scene::SceneBuilder;
use sisyphus::systems::{SimulationSystem, WindowSystem, WorldStatus};
use sisyphus_input::{GameAction, PlayerInput};
use sisyphus_math::Vec3;
use sisyphus_physics::PhysicsWorld;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window_system: Option<WindowSystem>,
    simulation: SimulationSystem,
    world: PhysicsWorld,
    input: PlayerInput,
    player_start: Vec3,
}

impl App {
    fn new() -> Self {
        // Load configuration
        let config = AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        });

        let scene = SceneBuilder::from_app_config(&config);
        let player_start = scene.player_start().unwrap_or(Vec3::ZERO);
        let world = scene.build();

        let input = PlayerInput::new()
            .with_mouse_sensitivity(config.input.mouse_sensitivity)
            .with_pitch_limit(config.input.pitch_limit.to_radians())
            .with_smoothing_half_life(config.input.smoothing_half_life)
            .with_smoothing(config.input.smoothing_enabled);

        let simulation = SimulationSystem::from_config(&config.simulation, &config.debug);

        Self {
            config,
            window_system: None,
            simulation,
            world,
            input,
            player_start,
        }
    }

    fn set_cursor_captured(&mut self, captured: bool) {
        let Some(window_system) = &mut self.window_system else {
            return;
        };
        match window_system.set_cursor_captured(captured) {
            Ok(()) if captured => log::info!("Cursor captured - Escape to release"),
            Ok(()) => log::info!("Cursor released - click to capture"),
            Err(e) => log::warn!("{}", e),
        }
    }

    fn handle_action(&mut self, action: GameAction, event_loop: &ActiveEventLoop) {
        match action {
            GameAction::CaptureCursor => self.set_cursor_captured(true),
            GameAction::ReleaseCursor => self.set_cursor_captured(false),
            GameAction::Exit => event_loop.exit(),
            GameAction::ResetPlayer => {
                self.world.reset_player(self.player_start);
            }
            GameAction::ToggleFullscreen => {
                if let Some(window_system) = &self.window_system {
                    window_system.toggle_fullscreen();
                }
            }
            GameAction::ToggleSmoothing => {
                let enabled = self.input.toggle_smoothing();
                log::info!("Input smoothing: {}", if enabled { "ON" } else { "OFF" });
            }
            GameAction::PushBoulder => {
                let push = self.config.input.boulder_push;
                if let Some(boulder) = self.world.boulder_mut() {
                    boulder.push(Vec3::new(0.0, 0.0, push));
                    log::info!("Boulder pushed uphill");
                }
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_system.is_none() {
            match WindowSystem::create(event_loop, &self.config.window) {
                Ok(window_system) => {
                    window_system.request_redraw();
                    self.window_system = Some(window_system);
                }
                Err(e) => {
                    log::error!("{}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let cursor_captured = self
            .window_system
            .as_ref()
            .is_some_and(|w| w.is_cursor_captured());

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Focused(false) => {
                self.input.release_all();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = self.input.process_keyboard(key, event.state, cursor_captured) {
                        self.handle_action(action, event_loop);
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(action) = self.input.process_mouse_button(button, state, cursor_captured) {
                    self.handle_action(action, event_loop);
                }
            }

            WindowEvent::RedrawRequested => {
                let result = self.simulation.update(&mut self.world, &mut self.input, cursor_captured);
                if result.boulder_reset {
                    log::info!("The boulder rolled back down the hill");
                }

                if let Some(window_system) = &self.window_system {
                    if self.config.debug.show_overlay {
                        window_system.show_status(&WorldStatus::of(&self.world));
                    }
                    window_system.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.process_mouse_motion(delta.0, delta.1);
        }
    }
}

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting Sisyphus");

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
