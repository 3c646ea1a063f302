//! The boulder: a single body on its own minimal integrator
//!
//! The boulder never consults the collision detector and does not interact
//! with the player or the boxes. Friction applies every tick, not only on
//! ground contact. Crossing `z > 0` sends it back to the foot of the hill.

use crate::body::Body;
use crate::integrator::sanitize_velocity;
use crate::world::PhysicsConfig;
use sisyphus_math::Vec3;

/// The boulder and its spawn point
#[derive(Clone, Debug)]
pub struct Boulder {
    body: Body,
    spawn: Vec3,
    resets: u64,
}

impl Boulder {
    /// Create a boulder at the foot of the hill: `(0, radius, -hill_radius)`
    pub fn new(config: &PhysicsConfig) -> Self {
        let spawn = Vec3::new(0.0, config.ground_y + config.boulder_radius, -config.hill_radius);
        Self::with_spawn(spawn, config)
    }

    /// Create a boulder at a custom spawn point
    pub fn with_spawn(spawn: Vec3, config: &PhysicsConfig) -> Self {
        Self {
            body: Body::new_boulder(spawn, config.boulder_radius).with_mass(config.boulder_mass),
            spawn,
            resets: 0,
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn spawn(&self) -> Vec3 {
        self.spawn
    }

    /// How many times the boulder has been sent back to its spawn
    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// Inject a linear impulse (divided by the boulder's mass)
    pub fn push(&mut self, impulse: Vec3) {
        self.body.apply_impulse(impulse);
    }

    /// Put the boulder back at its spawn with zero linear and angular velocity
    pub fn reset(&mut self) {
        self.body.position = self.spawn;
        self.body.velocity = Vec3::ZERO;
        self.body.yaw_angular_velocity = 0.0;
        self.resets += 1;
    }

    /// Advance the boulder by one tick
    ///
    /// Returns true if the boulder crossed the reset line and was respawned.
    pub fn step(&mut self, config: &PhysicsConfig) -> bool {
        let body = &mut self.body;
        sanitize_velocity(body);

        body.velocity.y += config.gravity;
        body.velocity *= config.boulder_friction;
        body.yaw_angular_velocity *= config.angular_friction;

        body.position += body.velocity;
        body.yaw += body.yaw_angular_velocity;

        // Rest on the ground without bouncing
        let ground_offset = body.ground_offset(config.ground_y);
        if body.position.y < ground_offset {
            body.position.y = ground_offset;
            if body.velocity.y < 0.0 {
                body.velocity.y = 0.0;
            }
        }

        if body.position.z > 0.0 {
            log::debug!("boulder crossed z = 0 at {:?}; back to the foot of the hill", body.position);
            self.reset();
            return true;
        }
        false
    }
}
