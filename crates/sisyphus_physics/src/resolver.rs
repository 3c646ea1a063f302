//! Player-vs-box collision resolution
//!
//! Greedy iterative positional correction: each iteration pushes the player
//! out of the single deepest overlapping box, up to a fixed iteration budget.
//! This is not a simultaneous constraint solve. When several boxes squeeze
//! the player, a residual overlap may remain once the budget is spent.
//!
//! The player is corrected positionally. Boxes only receive impulses on their
//! linear and yaw velocities; they move later, in the integrator.

use crate::body::{Body, BodyKey};
use crate::collision::{detect_player_box, CollisionResult, Contact};
use crate::shapes::Aabb;
use crate::world::PhysicsConfig;
use sisyphus_math::Vec3;
use slotmap::SlotMap;

/// Below this, a lever arm is treated as colinear with the push
const COLINEAR_EPSILON: f32 = 1e-6;

/// An impulse the resolver applied to a box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PushImpulse {
    /// The box that was pushed
    pub body: BodyKey,
    /// Linear impulse, directed away from the player
    pub linear: Vec3,
    /// Change in the box's yaw angular velocity
    pub yaw_delta: f32,
}

/// Result of resolving one candidate player position
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Corrected player position
    pub position: Vec3,
    /// Number of corrections applied (0 if the candidate was already clear)
    pub iterations: u32,
    /// Impulses applied to boxes, in application order
    pub pushes: Vec<PushImpulse>,
    /// False only if the iteration budget ran out with overlap remaining
    pub converged: bool,
}

/// Deepest overlap between the player volume and any box
///
/// Equal depths keep the first box in iteration order.
fn deepest_contact(volume: &Aabb, boxes: &SlotMap<BodyKey, Body>, epsilon: f32) -> Option<Contact> {
    let mut deepest: Option<Contact> = None;
    for (key, body) in boxes {
        if let CollisionResult::Collision(contact) = detect_player_box(volume, key, body, epsilon) {
            if deepest.map_or(true, |best| contact.depth > best.depth) {
                deepest = Some(contact);
            }
        }
    }
    deepest
}

/// Resolve the player's candidate position against every box
///
/// `direction` is the unit world-space movement direction and `move_speed`
/// the distance moved this tick; together they scale the push impulse.
pub fn resolve_player(
    candidate: Vec3,
    half_extents: Vec3,
    direction: Vec3,
    move_speed: f32,
    boxes: &mut SlotMap<BodyKey, Body>,
    config: &PhysicsConfig,
) -> Resolution {
    let mut position = candidate;
    let mut iterations = 0;
    let mut pushes = Vec::new();
    let mut converged = false;

    for _ in 0..config.max_collision_iterations {
        let volume = Aabb::from_center_half_extents(position, half_extents);
        let Some(contact) = deepest_contact(&volume, boxes, config.collision_epsilon) else {
            converged = true;
            break;
        };

        position += contact.normal * contact.depth;
        iterations += 1;
        log::trace!(
            "collision correction {}: depth {:.4} along {:?}",
            iterations, contact.depth, contact.normal
        );

        if let Some(body) = boxes.get_mut(contact.body) {
            if let Some(push) = apply_push(body, &contact, direction, move_speed, config) {
                pushes.push(push);
            }
        }
    }

    if !converged {
        let volume = Aabb::from_center_half_extents(position, half_extents);
        converged = deepest_contact(&volume, boxes, config.collision_epsilon).is_none();
        if !converged {
            log::debug!(
                "collision budget of {} iterations spent with overlap remaining at {:?}",
                config.max_collision_iterations, position
            );
        }
    }

    Resolution {
        position,
        iterations,
        pushes,
        converged,
    }
}

/// Push impulse magnitude for a contact
///
/// Proportional to how directly the player moves into the box; zero when the
/// player is stationary or moving away.
pub fn push_magnitude(direction: Vec3, normal: Vec3, move_speed: f32, push_force: f32) -> f32 {
    let approach = (-direction.dot(normal)).max(0.0);
    push_force * move_speed * approach
}

/// Yaw torque from pushing at `point` along `push_dir` with `impulse`
///
/// The lever arm runs from the box center to the contact point, flattened
/// onto the ground plane. The sign follows the vertical component of
/// `lever x push`, so a push through the center produces no torque.
pub fn push_torque(center: Vec3, point: Vec3, push_dir: Vec3, impulse: f32, torque_multiplier: f32) -> f32 {
    let lever = (point - center).horizontal();
    let cross_y = lever.z * push_dir.x - lever.x * push_dir.z;
    if cross_y.abs() <= COLINEAR_EPSILON {
        return 0.0;
    }
    lever.length() * impulse * torque_multiplier * cross_y.signum()
}

fn apply_push(
    body: &mut Body,
    contact: &Contact,
    direction: Vec3,
    move_speed: f32,
    config: &PhysicsConfig,
) -> Option<PushImpulse> {
    let magnitude = push_magnitude(direction, contact.normal, move_speed, config.push_force);
    if magnitude <= 0.0 || !magnitude.is_finite() {
        return None;
    }

    let push_dir = -contact.normal;
    let linear = push_dir * magnitude;
    body.apply_impulse(linear);

    let torque = push_torque(body.position, contact.point, push_dir, magnitude, config.torque_multiplier);
    let yaw_delta = body.apply_yaw_impulse(torque, config.box_inertia);

    Some(PushImpulse {
        body: contact.body,
        linear,
        yaw_delta,
    })
}
