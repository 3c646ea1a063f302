//! Physics world and simulation

use crate::body::{Body, BodyKey, BodyKind};
use crate::boulder::Boulder;
use crate::controls::MoveControls;
use crate::integrator::integrate_boxes;
use crate::player::{PlayerBody, PlayerController, DEFAULT_PLAYER_HEIGHT, DEFAULT_PLAYER_RADIUS};
use crate::resolver::Resolution;
use serde::{Deserialize, Serialize};
use sisyphus_math::Vec3;
use slotmap::SlotMap;

/// Tunable constants for the simulation
///
/// Every rate is a per-tick delta: gravity is added to vertical velocity once
/// per tick and the friction factors scale velocity once per tick.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to vertical velocity each tick (negative = down)
    pub gravity: f32,
    /// Scale of the impulse a moving player gives a box
    pub push_force: f32,
    /// Horizontal velocity factor for boxes touching the ground
    pub friction: f32,
    /// Yaw angular velocity factor, every tick
    pub angular_friction: f32,
    /// Fraction of vertical speed kept on a ground bounce
    pub elasticity: f32,
    /// Flat velocity factor applied to boxes after everything else
    pub velocity_decay: f32,
    /// Separation margin added to every penetration correction
    pub collision_epsilon: f32,
    /// Correction budget for one player resolve
    pub max_collision_iterations: u32,
    /// Scale of the yaw torque from off-center pushes
    pub torque_multiplier: f32,
    pub box_mass: f32,
    pub box_inertia: f32,
    pub boulder_mass: f32,
    pub boulder_radius: f32,
    /// Boulder velocity factor, every tick regardless of contact
    pub boulder_friction: f32,
    /// Distance from the reset line to the boulder spawn
    pub hill_radius: f32,
    /// Height of the ground plane
    pub ground_y: f32,
    pub player_radius: f32,
    pub player_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -0.02,
            push_force: 0.25,
            friction: 0.9,
            angular_friction: 0.95,
            elasticity: 0.5,
            velocity_decay: 0.95,
            collision_epsilon: 0.01,
            max_collision_iterations: 5,
            torque_multiplier: 0.05,
            box_mass: 1.0,
            box_inertia: 1.0,
            boulder_mass: 5.0,
            boulder_radius: 1.5,
            boulder_friction: 0.7,
            hill_radius: 20.0,
            ground_y: 0.0,
            player_radius: DEFAULT_PLAYER_RADIUS,
            player_height: DEFAULT_PLAYER_HEIGHT,
        }
    }
}

impl PhysicsConfig {
    /// Create a config with default tunables and the given gravity
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity,
            ..Self::default()
        }
    }

    /// Fix up values the simulation cannot run with
    ///
    /// Elasticity is clamped into `[0, 1)`. Non-positive masses and inertia
    /// are left alone (the bodies treat them as immovable) but logged.
    pub fn validate(mut self) -> Self {
        if !(0.0..1.0).contains(&self.elasticity) {
            let clamped = if self.elasticity.is_finite() {
                self.elasticity.clamp(0.0, 0.99)
            } else {
                0.0
            };
            log::warn!("elasticity {} outside [0, 1); using {}", self.elasticity, clamped);
            self.elasticity = clamped;
        }

        for (name, value) in [
            ("box_mass", self.box_mass),
            ("box_inertia", self.box_inertia),
            ("boulder_mass", self.boulder_mass),
        ] {
            if value <= 0.0 || !value.is_finite() {
                log::warn!("{} is {}; affected bodies will not respond to impulses", name, value);
            }
        }

        if self.max_collision_iterations == 0 {
            log::warn!("max_collision_iterations is 0; the player will walk through boxes");
        }

        self
    }
}

/// What happened during one tick
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    /// Player collision resolution, if the player tried to move
    pub resolution: Option<Resolution>,
    /// Whether the boulder crossed the reset line this tick
    pub boulder_reset: bool,
}

impl TickReport {
    /// True if the player resolve ran out of iterations with overlap left
    pub fn hit_iteration_cap(&self) -> bool {
        self.resolution.as_ref().is_some_and(|r| !r.converged)
    }
}

/// Read-only view of one body, for rendering
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySnapshot {
    pub kind: BodyKind,
    pub position: Vec3,
    pub yaw: f32,
}

/// The physics world: boxes, the boulder, the player and the tunables
pub struct PhysicsWorld {
    /// Dynamic boxes (using generational keys)
    boxes: SlotMap<BodyKey, Body>,
    player: PlayerBody,
    controller: PlayerController,
    boulder: Option<Boulder>,
    /// Logical ticks run so far
    ticks: u64,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create an empty world (no boxes, no boulder) with custom configuration
    ///
    /// The player starts at the origin, standing on the ground.
    pub fn with_config(config: PhysicsConfig) -> Self {
        let config = config.validate();
        let start = Vec3::new(0.0, config.ground_y + config.player_height * 0.5, 0.0);
        let player = PlayerBody::with_dimensions(start, config.player_radius, config.player_height);
        Self {
            boxes: SlotMap::with_key(),
            player,
            controller: PlayerController::new(),
            boulder: None,
            ticks: 0,
            config,
        }
    }

    /// Builder: replace the player controller
    pub fn with_controller(mut self, controller: PlayerController) -> Self {
        self.controller = controller;
        self
    }

    /// Builder: add the boulder at the foot of the hill
    pub fn with_boulder(mut self) -> Self {
        self.boulder = Some(Boulder::new(&self.config));
        self
    }

    /// Add a box to the world and return its key
    pub fn add_box(&mut self, body: Body) -> BodyKey {
        debug_assert_eq!(body.kind(), BodyKind::Box);
        self.boxes.insert(body)
    }

    /// Remove a box from the world and return it
    pub fn remove_box(&mut self, key: BodyKey) -> Option<Body> {
        self.boxes.remove(key)
    }

    /// Get an immutable reference to a box by key
    pub fn get_box(&self, key: BodyKey) -> Option<&Body> {
        self.boxes.get(key)
    }

    /// Get a mutable reference to a box by key
    pub fn get_box_mut(&mut self, key: BodyKey) -> Option<&mut Body> {
        self.boxes.get_mut(key)
    }

    /// Get the number of boxes in the world
    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Iterate over all boxes
    pub fn boxes(&self) -> impl Iterator<Item = (BodyKey, &Body)> + '_ {
        self.boxes.iter()
    }

    pub fn player(&self) -> &PlayerBody {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerBody {
        &mut self.player
    }

    pub fn controller(&self) -> &PlayerController {
        &self.controller
    }

    pub fn boulder(&self) -> Option<&Boulder> {
        self.boulder.as_ref()
    }

    pub fn boulder_mut(&mut self) -> Option<&mut Boulder> {
        self.boulder.as_mut()
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Teleport the player, keeping the look direction
    pub fn reset_player(&mut self, position: Vec3) {
        log::info!("player reset to {:?}", position);
        self.player.position = position;
    }

    /// Advance the simulation by one logical tick
    ///
    /// Order: player movement and collision resolution, box integration,
    /// then the boulder.
    pub fn tick(&mut self, controls: MoveControls) -> TickReport {
        let resolution = self
            .controller
            .step(&mut self.player, controls, &mut self.boxes, &self.config);

        integrate_boxes(self.boxes.values_mut(), &self.config);

        let boulder_reset = match self.boulder.as_mut() {
            Some(boulder) => boulder.step(&self.config),
            None => false,
        };

        self.ticks += 1;
        TickReport {
            resolution,
            boulder_reset,
        }
    }

    /// Positions and yaws of everything the renderer draws
    ///
    /// Boxes in key order, then the boulder, then the player.
    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        let mut snapshots: Vec<BodySnapshot> = self
            .boxes
            .values()
            .map(|body| BodySnapshot {
                kind: body.kind(),
                position: body.position,
                yaw: body.yaw,
            })
            .collect();

        if let Some(boulder) = &self.boulder {
            snapshots.push(BodySnapshot {
                kind: BodyKind::Boulder,
                position: boulder.body().position,
                yaw: boulder.body().yaw,
            });
        }

        snapshots.push(BodySnapshot {
            kind: BodyKind::Player,
            position: self.player.position,
            yaw: self.player.yaw,
        });
        snapshots
    }
}
