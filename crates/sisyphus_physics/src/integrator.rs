//! Per-tick integration for dynamic boxes
//!
//! Fixed-step Newtonian motion with ad-hoc damping. Every constant is a
//! per-tick delta, so one call advances exactly one logical tick.

use crate::body::Body;
use crate::world::PhysicsConfig;
use sisyphus_math::Vec3;

/// Zero any non-finite velocity before it reaches the position
///
/// Returns true if something had to be zeroed.
pub fn sanitize_velocity(body: &mut Body) -> bool {
    let mut corrupted = false;
    if !body.velocity.is_finite() {
        log::warn!("{:?} at {:?} had non-finite velocity {:?}; zeroed", body.kind(), body.position, body.velocity);
        body.velocity = Vec3::ZERO;
        corrupted = true;
    }
    if !body.yaw_angular_velocity.is_finite() {
        log::warn!("{:?} at {:?} had non-finite angular velocity; zeroed", body.kind(), body.position);
        body.yaw_angular_velocity = 0.0;
        corrupted = true;
    }
    corrupted
}

/// Advance one box by one tick
///
/// Order: gravity, position, yaw, ground contact (clamp, bounce, friction),
/// angular friction, then the flat velocity decay.
pub fn integrate_box(body: &mut Body, config: &PhysicsConfig) {
    sanitize_velocity(body);

    body.velocity.y += config.gravity;
    body.position += body.velocity;
    body.yaw += body.yaw_angular_velocity;

    let ground_offset = body.ground_offset(config.ground_y);
    if body.position.y < ground_offset {
        body.position.y = ground_offset;
        body.velocity.y *= -config.elasticity;
        body.velocity.x *= config.friction;
        body.velocity.z *= config.friction;
    }

    body.yaw_angular_velocity *= config.angular_friction;
    body.velocity *= config.velocity_decay;
}

/// Advance every box by one tick
pub fn integrate_boxes<'a>(boxes: impl IntoIterator<Item = &'a mut Body>, config: &PhysicsConfig) {
    for body in boxes {
        integrate_box(body, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 0.0001;

    fn unit_box(position: Vec3) -> Body {
        Body::new_box(position, Vec3::new(0.5, 0.5, 0.5))
    }

    #[test]
    fn test_gravity_applied_in_air() {
        let config = PhysicsConfig::default();
        let mut body = unit_box(Vec3::new(0.0, 5.0, 0.0));

        integrate_box(&mut body, &config);

        // Gravity then decay: -0.02 * 0.95
        assert!((body.velocity.y - config.gravity * config.velocity_decay).abs() < TOLERANCE);
        assert!((body.position.y - (5.0 + config.gravity)).abs() < TOLERANCE);
    }

    #[test]
    fn test_ground_contact_clamps_and_bounces() {
        let config = PhysicsConfig::default();
        let mut body = unit_box(Vec3::new(0.0, 0.55, 0.0)).with_velocity(Vec3::new(0.1, -0.2, 0.0));

        integrate_box(&mut body, &config);

        assert_eq!(body.position.y, 0.5);
        // Bounced upward, damped by elasticity and decay
        let expected_vy = -(-0.2 + config.gravity) * config.elasticity * config.velocity_decay;
        assert!((body.velocity.y - expected_vy).abs() < TOLERANCE);
        // Ground friction then decay on horizontal velocity
        let expected_vx = 0.1 * config.friction * config.velocity_decay;
        assert!((body.velocity.x - expected_vx).abs() < TOLERANCE);
    }

    #[test]
    fn test_friction_only_on_ground_contact() {
        let config = PhysicsConfig::default();
        let mut body = unit_box(Vec3::new(0.0, 5.0, 0.0)).with_velocity(Vec3::new(0.1, 0.0, 0.0));

        integrate_box(&mut body, &config);

        assert!((body.velocity.x - 0.1 * config.velocity_decay).abs() < TOLERANCE);
    }

    #[test]
    fn test_yaw_integrates_and_damps() {
        let config = PhysicsConfig::default();
        let mut body = unit_box(Vec3::new(0.0, 0.5, 0.0)).with_yaw_angular_velocity(0.1);

        integrate_box(&mut body, &config);

        assert!((body.yaw - 0.1).abs() < TOLERANCE);
        assert!((body.yaw_angular_velocity - 0.1 * config.angular_friction).abs() < TOLERANCE);
    }

    #[test]
    fn test_never_below_ground() {
        let config = PhysicsConfig::default();
        let mut body = unit_box(Vec3::new(0.0, 3.0, 0.0)).with_velocity(Vec3::new(0.0, -2.0, 0.0));

        for _ in 0..200 {
            integrate_box(&mut body, &config);
            assert!(body.position.y >= 0.5);
        }
    }

    #[test]
    fn test_non_finite_velocity_is_not_applied() {
        let config = PhysicsConfig::default();
        let mut body = unit_box(Vec3::new(1.0, 0.5, 2.0))
            .with_velocity(Vec3::new(f32::NAN, 0.0, 0.0))
            .with_yaw_angular_velocity(f32::INFINITY);

        integrate_box(&mut body, &config);

        assert!(body.position.is_finite());
        assert!(body.velocity.is_finite());
        assert!(body.yaw.is_finite());
        assert_eq!(body.position.x, 1.0);
        assert_eq!(body.position.z, 2.0);
    }

    #[test]
    fn test_integrate_boxes_advances_all() {
        let config = PhysicsConfig::default();
        let mut boxes = vec![unit_box(Vec3::new(0.0, 2.0, 0.0)), unit_box(Vec3::new(3.0, 4.0, 0.0))];

        integrate_boxes(boxes.iter_mut(), &config);

        assert!(boxes.iter().all(|b| b.velocity.y < 0.0));
    }
}
