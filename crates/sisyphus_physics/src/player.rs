//! First-person player body and movement controller
//!
//! The controller turns held controls into one corrected position per tick:
//! desired direction, collision resolution against the boxes, commit, then
//! containment inside the play area.

use crate::body::{Body, BodyKey, BodyKind};
use crate::controls::MoveControls;
use crate::resolver::{resolve_player, Resolution};
use crate::shapes::{Aabb, BodyShape};
use crate::world::PhysicsConfig;
use sisyphus_math::Vec3;
use slotmap::SlotMap;

/// Default player collision radius
pub const DEFAULT_PLAYER_RADIUS: f32 = 0.5;

/// Default player height
pub const DEFAULT_PLAYER_HEIGHT: f32 = 1.8;

/// Default distance moved per tick
pub const DEFAULT_MOVE_SPEED: f32 = 0.15;

/// Default half-width of the square play area
pub const DEFAULT_PLAY_AREA: f32 = 45.0;

/// Player state
///
/// The collision volume is an upright capsule, treated as an axis-aligned
/// box centered on `position`.
#[derive(Clone, Debug)]
pub struct PlayerBody {
    /// Current position (center of the collision volume, also the eye)
    pub position: Vec3,
    /// Look yaw (radians, about +Y)
    pub yaw: f32,
    /// Look pitch (radians, positive looks up)
    pub pitch: f32,
    /// Collision radius
    pub radius: f32,
    /// Collision height
    pub height: f32,
}

impl PlayerBody {
    /// Create a new player at the given position
    pub fn new(position: Vec3) -> Self {
        Self::with_dimensions(position, DEFAULT_PLAYER_RADIUS, DEFAULT_PLAYER_HEIGHT)
    }

    /// Create a new player with a custom collision radius and height
    pub fn with_dimensions(position: Vec3, radius: f32, height: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            radius,
            height,
        }
    }

    pub fn kind(&self) -> BodyKind {
        BodyKind::Player
    }

    pub fn shape(&self) -> BodyShape {
        BodyShape::Capsule {
            radius: self.radius,
            height: self.height,
        }
    }

    pub fn half_extents(&self) -> Vec3 {
        self.shape().half_extents()
    }

    /// Collision volume at the current position
    pub fn volume(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.half_extents())
    }

    /// Turn the view; pitch is clamped to `±pitch_limit`
    pub fn rotate_look(&mut self, delta_yaw: f32, delta_pitch: f32, pitch_limit: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-pitch_limit, pitch_limit);
    }
}

/// Turns control state into corrected player movement
#[derive(Clone, Debug)]
pub struct PlayerController {
    /// Distance moved per tick
    pub move_speed: f32,
    /// Half-width of the square play area centered on the origin
    pub play_area_half_extent: f32,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerController {
    pub fn new() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            play_area_half_extent: DEFAULT_PLAY_AREA,
        }
    }

    /// Builder: set movement speed
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Builder: set play area half-width
    pub fn with_play_area(mut self, half_extent: f32) -> Self {
        self.play_area_half_extent = half_extent;
        self
    }

    /// Unit world-space movement direction, or None when idle
    pub fn desired_direction(&self, controls: MoveControls, yaw: f32) -> Option<Vec3> {
        let local = controls.direction().normalized();
        if local == Vec3::ZERO {
            return None;
        }
        Some(local.rotate_y(yaw))
    }

    /// Displacement the player wants this tick, before collision
    pub fn desired_displacement(&self, controls: MoveControls, yaw: f32) -> Option<Vec3> {
        self.desired_direction(controls, yaw)
            .map(|direction| direction * self.move_speed)
    }

    /// Clamp X and Z into the play area (no bounce)
    pub fn contain(&self, position: Vec3) -> Vec3 {
        let limit = self.play_area_half_extent;
        Vec3::new(
            position.x.clamp(-limit, limit),
            position.y,
            position.z.clamp(-limit, limit),
        )
    }

    /// Move the player for one tick
    ///
    /// Returns the collision resolution, or None if no control was held.
    pub fn step(
        &self,
        player: &mut PlayerBody,
        controls: MoveControls,
        boxes: &mut SlotMap<BodyKey, Body>,
        config: &PhysicsConfig,
    ) -> Option<Resolution> {
        let resolution = self.desired_direction(controls, player.yaw).map(|direction| {
            let target = player.position + direction * self.move_speed;
            resolve_player(target, player.half_extents(), direction, self.move_speed, boxes, config)
        });

        if let Some(resolution) = &resolution {
            player.position = resolution.position;
        }
        player.position = self.contain(player.position);

        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn no_boxes() -> SlotMap<BodyKey, Body> {
        SlotMap::with_key()
    }

    #[test]
    fn test_new_player() {
        let pos = Vec3::new(0.0, 1.6, 0.0);
        let player = PlayerBody::new(pos);

        assert_eq!(player.position, pos);
        assert_eq!(player.radius, DEFAULT_PLAYER_RADIUS);
        assert_eq!(player.height, DEFAULT_PLAYER_HEIGHT);
        assert_eq!(player.kind(), BodyKind::Player);
        assert_eq!(player.half_extents(), Vec3::new(0.5, 0.9, 0.5));
    }

    #[test]
    fn test_volume_centered_on_position() {
        let player = PlayerBody::new(Vec3::new(1.0, 1.6, -2.0));
        let volume = player.volume();
        assert!((volume.center() - player.position).length() < EPSILON);
        assert!((volume.min.y - 0.7).abs() < EPSILON);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut player = PlayerBody::new(Vec3::ZERO);
        let limit = std::f32::consts::FRAC_PI_3;

        player.rotate_look(0.5, 5.0, limit);
        assert_eq!(player.yaw, 0.5);
        assert_eq!(player.pitch, limit);

        player.rotate_look(0.0, -10.0, limit);
        assert_eq!(player.pitch, -limit);
    }

    #[test]
    fn test_idle_controls_produce_nothing() {
        let controller = PlayerController::new();
        assert!(controller.desired_direction(MoveControls::empty(), 0.0).is_none());
        assert!(controller
            .desired_direction(MoveControls::LEFT | MoveControls::RIGHT, 0.0)
            .is_none());
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let controller = PlayerController::new();
        let displacement = controller
            .desired_displacement(MoveControls::FORWARD | MoveControls::RIGHT, 0.0)
            .unwrap();
        assert!((displacement.length() - DEFAULT_MOVE_SPEED).abs() < EPSILON);
    }

    #[test]
    fn test_direction_follows_yaw() {
        let controller = PlayerController::new();
        // Facing a quarter turn left, forward is -X
        let direction = controller.desired_direction(MoveControls::FORWARD, FRAC_PI_2).unwrap();
        assert!((direction.x + 1.0).abs() < EPSILON);
        assert!(direction.z.abs() < EPSILON);
    }

    #[test]
    fn test_step_moves_by_speed() {
        let config = PhysicsConfig::default();
        let controller = PlayerController::new();
        let mut player = PlayerBody::new(Vec3::new(0.0, 1.6, 0.0));

        let resolution = controller
            .step(&mut player, MoveControls::FORWARD, &mut no_boxes(), &config)
            .expect("moving should resolve");

        assert_eq!(resolution.iterations, 0);
        assert!((player.position.z + DEFAULT_MOVE_SPEED).abs() < EPSILON);
        assert_eq!(player.position.y, 1.6);
    }

    #[test]
    fn test_step_idle_does_not_resolve() {
        let config = PhysicsConfig::default();
        let controller = PlayerController::new();
        let mut player = PlayerBody::new(Vec3::new(3.0, 1.6, 4.0));

        let resolution = controller.step(&mut player, MoveControls::empty(), &mut no_boxes(), &config);

        assert!(resolution.is_none());
        assert_eq!(player.position, Vec3::new(3.0, 1.6, 4.0));
    }

    #[test]
    fn test_play_area_clamps_without_bounce() {
        let config = PhysicsConfig::default();
        let controller = PlayerController::new().with_play_area(10.0);
        let mut player = PlayerBody::new(Vec3::new(9.95, 1.6, 0.0));

        for _ in 0..10 {
            controller.step(&mut player, MoveControls::RIGHT, &mut no_boxes(), &config);
        }

        assert_eq!(player.position.x, 10.0);
    }

    #[test]
    fn test_step_blocked_by_box() {
        let config = PhysicsConfig::default();
        let controller = PlayerController::new();
        let mut boxes = no_boxes();
        let key = boxes.insert(Body::new_box(Vec3::new(0.0, 0.5, -1.5), Vec3::new(0.5, 0.5, 0.5)));
        let mut player = PlayerBody::new(Vec3::new(0.0, 1.0, 0.0));

        for _ in 0..5 {
            controller.step(&mut player, MoveControls::FORWARD, &mut boxes, &config);
            assert!(player.volume().min.z >= boxes[key].aabb().max.z - EPSILON);
        }

        // Pushed, not moved: boxes only move in the integrator
        assert_eq!(boxes[key].position, Vec3::new(0.0, 0.5, -1.5));
        assert!(boxes[key].velocity.z < 0.0);
    }
}
