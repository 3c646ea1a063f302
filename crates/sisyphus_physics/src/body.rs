//! Rigid body types for the physics core

use crate::shapes::{Aabb, BodyShape};
use sisyphus_math::Vec3;
use slotmap::new_key_type;

// Define generational key type for bodies
new_key_type! {
    /// Key to a box body in the physics world
    ///
    /// Uses generational indexing to prevent the ABA problem where a handle
    /// could point to a reused slot. If a body is removed and its slot reused,
    /// old keys will return None instead of pointing to the wrong body.
    pub struct BodyKey;
}

/// What a body is, fixed when the body is created
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Box,
    Boulder,
    Player,
}

/// A simulated body with linear motion and yaw-only rotation
///
/// All rates are per tick, not per second.
#[derive(Clone, Debug)]
pub struct Body {
    /// Center of mass, world space
    pub position: Vec3,
    /// Linear velocity (units per tick)
    pub velocity: Vec3,
    /// Rotation about the vertical axis (radians)
    pub yaw: f32,
    /// Yaw angular velocity (radians per tick)
    pub yaw_angular_velocity: f32,
    /// Mass (positive for every dynamic body)
    pub mass: f32,
    /// Collision volume
    pub shape: BodyShape,
    kind: BodyKind,
}

impl Body {
    /// Create a box body at `position` with the given half-extents and unit mass
    pub fn new_box(position: Vec3, half_extents: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            yaw_angular_velocity: 0.0,
            mass: 1.0,
            shape: BodyShape::Cuboid { half_extents },
            kind: BodyKind::Box,
        }
    }

    /// Create a boulder body at `position` with the given radius and unit mass
    pub fn new_boulder(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            yaw_angular_velocity: 0.0,
            mass: 1.0,
            shape: BodyShape::Sphere { radius },
            kind: BodyKind::Boulder,
        }
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the mass of this body
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set the yaw angular velocity of this body
    pub fn with_yaw_angular_velocity(mut self, rate: f32) -> Self {
        self.yaw_angular_velocity = rate;
        self
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Axis-aligned collision volume at the current position
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.shape.half_extents())
    }

    /// Height of the center when the body rests on ground at `ground_y`
    pub fn ground_offset(&self, ground_y: f32) -> f32 {
        ground_y + self.shape.half_extents().y
    }

    /// 1 / mass, or 0 for a non-positive or non-finite mass
    pub fn inverse_mass(&self) -> f32 {
        if self.mass > 0.0 && self.mass.is_finite() {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    /// Apply an instantaneous linear impulse
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse * self.inverse_mass();
    }

    /// Apply a yaw torque impulse through the given moment of inertia
    ///
    /// Returns the change in yaw angular velocity (0 for a non-positive inertia).
    pub fn apply_yaw_impulse(&mut self, torque: f32, inertia: f32) -> f32 {
        if inertia <= 0.0 || !inertia.is_finite() || !torque.is_finite() {
            return 0.0;
        }
        let delta = torque / inertia;
        self.yaw_angular_velocity += delta;
        delta
    }

    /// Current speed (units per tick)
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_box_body() {
        let pos = Vec3::new(1.5, 0.5, 0.0);
        let body = Body::new_box(pos, Vec3::new(0.5, 0.5, 0.5));

        assert_eq!(body.position, pos);
        assert_eq!(body.velocity, Vec3::ZERO);
        assert_eq!(body.yaw_angular_velocity, 0.0);
        assert_eq!(body.mass, 1.0);
        assert_eq!(body.kind(), BodyKind::Box);
        assert_eq!(body.aabb().min, Vec3::new(1.0, 0.0, -0.5));
        assert_eq!(body.aabb().max, Vec3::new(2.0, 1.0, 0.5));
    }

    #[test]
    fn test_new_boulder_body() {
        let body = Body::new_boulder(Vec3::new(0.0, 1.5, -20.0), 1.5).with_mass(5.0);
        assert_eq!(body.kind(), BodyKind::Boulder);
        assert_eq!(body.mass, 5.0);
        assert_eq!(body.aabb().max - body.aabb().min, Vec3::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn test_builder_methods() {
        let body = Body::new_box(Vec3::ZERO, Vec3::new(0.5, 0.5, 0.5))
            .with_velocity(Vec3::new(0.1, 0.0, 0.0))
            .with_mass(2.0)
            .with_yaw_angular_velocity(0.3);

        assert_eq!(body.velocity, Vec3::new(0.1, 0.0, 0.0));
        assert_eq!(body.mass, 2.0);
        assert_eq!(body.yaw_angular_velocity, 0.3);
    }

    #[test]
    fn test_ground_offset_is_half_height() {
        let body = Body::new_box(Vec3::ZERO, Vec3::new(0.5, 0.75, 0.5));
        assert_eq!(body.ground_offset(0.0), 0.75);
        assert_eq!(body.ground_offset(-1.0), -0.25);
    }

    #[test]
    fn test_apply_impulse_divides_by_mass() {
        let mut body = Body::new_box(Vec3::ZERO, Vec3::new(0.5, 0.5, 0.5)).with_mass(2.0);
        body.apply_impulse(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(body.velocity, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_zero_mass_ignores_impulse() {
        let mut body = Body::new_box(Vec3::ZERO, Vec3::new(0.5, 0.5, 0.5)).with_mass(0.0);
        body.apply_impulse(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(body.velocity, Vec3::ZERO);
        assert!(body.velocity.is_finite());
    }

    #[test]
    fn test_yaw_impulse_guards_zero_inertia() {
        let mut body = Body::new_box(Vec3::ZERO, Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(body.apply_yaw_impulse(0.2, 0.0), 0.0);
        assert_eq!(body.yaw_angular_velocity, 0.0);

        assert_eq!(body.apply_yaw_impulse(0.2, 2.0), 0.1);
        assert_eq!(body.yaw_angular_velocity, 0.1);
    }
}
