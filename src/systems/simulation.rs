//! Game simulation system
//!
//! Manages the game loop simulation including:
//! - Delta time calculation
//! - Frame time → fixed logical ticks
//! - Mouse look and movement input per tick
//! - Physics ticking

use std::time::Instant;
use sisyphus_input::PlayerInput;
use sisyphus_math::Vec3;
use sisyphus_physics::{FixedTimestep, PhysicsWorld};
use crate::config::{DebugConfig, SimulationConfig};

/// Result of a simulation update
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationResult {
    /// Logical ticks run this frame
    pub ticks: u32,
    /// Whether the boulder was sent back down the hill this frame
    pub boulder_reset: bool,
    /// Player view direction after this frame's look input
    pub view_direction: Vec3,
}

/// Manages the game simulation loop
///
/// Handles:
/// - Delta time calculation
/// - Frame time → fixed logical ticks
/// - Physics ticking with the live controls
pub struct SimulationSystem {
    last_frame: Instant,
    timestep: FixedTimestep,
    max_frame_time: f32,
    state_log_interval: u64,
}

impl SimulationSystem {
    /// Create a new simulation system with default settings
    pub fn new() -> Self {
        Self::from_config(&SimulationConfig::default(), &DebugConfig::default())
    }

    /// Create a simulation system from config
    pub fn from_config(simulation: &SimulationConfig, debug: &DebugConfig) -> Self {
        Self {
            last_frame: Instant::now(),
            timestep: FixedTimestep::new(simulation.tick_rate)
                .with_max_ticks_per_frame(simulation.max_ticks_per_frame),
            max_frame_time: simulation.max_frame_time,
            state_log_interval: debug.state_log_interval,
        }
    }

    /// Fixed timestep in use
    pub fn timestep(&self) -> &FixedTimestep {
        &self.timestep
    }

    /// Run one simulation frame
    ///
    /// # Arguments
    /// * `world` - Physics world to tick
    /// * `input` - Input state for movement and look
    /// * `cursor_captured` - Whether cursor is captured (enables free look)
    pub fn update(
        &mut self,
        world: &mut PhysicsWorld,
        input: &mut PlayerInput,
        cursor_captured: bool,
    ) -> SimulationResult {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.run_frame(raw_dt, world, input, cursor_captured)
    }

    /// Run the ticks owed for a frame that took `raw_dt` seconds
    pub fn run_frame(
        &mut self,
        raw_dt: f32,
        world: &mut PhysicsWorld,
        input: &mut PlayerInput,
        cursor_captured: bool,
    ) -> SimulationResult {
        // Cap dt to prevent spiral of death on first frame or after window focus
        let dt = raw_dt.min(self.max_frame_time);
        let ticks = self.timestep.advance(dt);
        let step = self.timestep.step();

        let mut result = SimulationResult {
            ticks,
            ..SimulationResult::default()
        };

        for _ in 0..ticks {
            result.view_direction = input.update(world.player_mut(), step, cursor_captured);

            let report = world.tick(input.controls());
            result.boulder_reset |= report.boulder_reset;

            if self.state_log_interval > 0 && world.ticks() % self.state_log_interval == 0 {
                let player = world.player();
                log::debug!(
                    "tick {}: player at {:?}, {} boxes, boulder at {:?}",
                    world.ticks(),
                    player.position,
                    world.box_count(),
                    world.boulder().map(|b| b.body().position)
                );
            }
        }

        result
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sisyphus_physics::MoveControls;
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_default_construction() {
        let sim = SimulationSystem::default();
        assert!(sim.last_frame.elapsed().as_millis() < 100);
        assert_eq!(sim.timestep().tick_rate, 60.0);
    }

    #[test]
    fn test_frame_runs_fixed_ticks() {
        let mut sim = SimulationSystem::new();
        let mut world = PhysicsWorld::new();
        let mut input = PlayerInput::new();

        // Two and a half ticks at 60 Hz
        let result = sim.run_frame(2.5 / 60.0, &mut world, &mut input, false);

        assert_eq!(result.ticks, 2);
        assert_eq!(world.ticks(), 2);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut sim = SimulationSystem::new();
        let mut world = PhysicsWorld::new();
        let mut input = PlayerInput::new();

        let result = sim.run_frame(5.0, &mut world, &mut input, false);

        assert!(result.ticks <= SimulationConfig::default().max_ticks_per_frame);
    }

    #[test]
    fn test_held_keys_move_player() {
        let mut sim = SimulationSystem::new();
        let mut world = PhysicsWorld::new();
        let mut input = PlayerInput::new();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed, false);
        assert_eq!(input.controls(), MoveControls::FORWARD);

        let result = sim.run_frame(2.5 / 60.0, &mut world, &mut input, false);

        let expected = -(result.ticks as f32) * world.controller().move_speed;
        assert!((world.player().position.z - expected).abs() < 0.0001);
        assert!((result.view_direction.z + 1.0).abs() < 0.0001);
    }
}
