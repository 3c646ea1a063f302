//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building the physics world: boxes, the boulder,
//! and the player's starting point.

use crate::config::AppConfig;
use sisyphus_math::Vec3;
use sisyphus_physics::{Body, PhysicsConfig, PhysicsWorld, PlayerController};

/// Builder for constructing the physics world
///
/// # Example
/// ```ignore
/// let world = SceneBuilder::new()
///     .with_config(PhysicsConfig::default())
///     .add_box_row(5, 3.0, Vec3::new(-1.5, 0.5, 0.0), 0.5)
///     .with_boulder(true)
///     .with_player_start(Vec3::new(0.0, 1.6, 0.0))
///     .build();
/// ```
pub struct SceneBuilder {
    config: PhysicsConfig,
    controller: PlayerController,
    /// Box centers and half-extents
    boxes: Vec<(Vec3, f32)>,
    boulder: bool,
    player_start: Option<Vec3>,
}

impl SceneBuilder {
    /// Create a new scene builder
    pub fn new() -> Self {
        Self {
            config: PhysicsConfig::default(),
            controller: PlayerController::new(),
            boxes: Vec::new(),
            boulder: false,
            player_start: None,
        }
    }

    /// Build the scene described by the application config
    pub fn from_app_config(config: &AppConfig) -> Self {
        let scene = &config.scene;
        let [x, y, z] = scene.box_offset;
        let [px, py, pz] = config.player.start_position;

        Self::new()
            .with_config(config.physics.clone())
            .with_controller(
                PlayerController::new()
                    .with_move_speed(config.player.move_speed)
                    .with_play_area(config.player.play_area),
            )
            .add_box_row(scene.box_count, scene.box_spacing, Vec3::new(x, y, z), scene.box_half_extent)
            .with_boulder(scene.boulder)
            .with_player_start(Vec3::new(px, py, pz))
    }

    /// Use the given physics tunables
    pub fn with_config(mut self, config: PhysicsConfig) -> Self {
        self.config = config;
        self
    }

    /// Use the given player controller
    pub fn with_controller(mut self, controller: PlayerController) -> Self {
        self.controller = controller;
        self
    }

    /// Add a cube box centered at `position`
    ///
    /// Mass comes from the physics config at build time.
    pub fn add_box(mut self, position: Vec3, half_extent: f32) -> Self {
        self.boxes.push((position, half_extent));
        self
    }

    /// Add `count` boxes in a row along X, the first at `offset`
    pub fn add_box_row(mut self, count: u32, spacing: f32, offset: Vec3, half_extent: f32) -> Self {
        for i in 0..count {
            let position = offset + Vec3::new(i as f32 * spacing, 0.0, 0.0);
            self = self.add_box(position, half_extent);
        }
        self
    }

    /// Spawn the boulder at the foot of the hill
    pub fn with_boulder(mut self, enabled: bool) -> Self {
        self.boulder = enabled;
        self
    }

    /// Set where the player starts
    pub fn with_player_start(mut self, position: Vec3) -> Self {
        self.player_start = Some(position);
        self
    }

    /// Get the player's starting position (if one was set)
    pub fn player_start(&self) -> Option<Vec3> {
        self.player_start
    }

    /// Number of boxes added so far
    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Build the scene and return the configured world
    pub fn build(self) -> PhysicsWorld {
        let mut world = PhysicsWorld::with_config(self.config).with_controller(self.controller);
        if self.boulder {
            world = world.with_boulder();
        }
        let mass = world.config.box_mass;
        for (position, half_extent) in self.boxes {
            let half_extents = Vec3::new(half_extent, half_extent, half_extent);
            world.add_box(Body::new_box(position, half_extents).with_mass(mass));
        }
        if let Some(start) = self.player_start {
            world.player_mut().position = start;
        }

        log::info!(
            "Built scene with {} boxes{}",
            world.box_count(),
            if world.boulder().is_some() { " and the boulder" } else { "" }
        );
        world
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}
