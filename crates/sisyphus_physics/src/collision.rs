//! Collision detection between the player volume and boxes
//!
//! Detection is a pure query: it reports the minimal-translation contact
//! along X or Z and never mutates anything.

use crate::body::{Body, BodyKey};
use crate::shapes::Aabb;
use sisyphus_math::Vec3;

/// Contact information from a player/box overlap
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the box toward the player (X or Z only)
    pub normal: Vec3,
    /// Penetration depth along the normal, including the collision epsilon
    pub depth: f32,
    /// Point on the player's face nearest the box, at the box's vertical center
    pub point: Vec3,
    /// The box that was hit
    pub body: BodyKey,
}

/// Outcome of a collision query
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CollisionResult {
    NoCollision,
    Collision(Contact),
}

impl CollisionResult {
    /// The contact, if there was one
    pub fn contact(&self) -> Option<&Contact> {
        match self {
            CollisionResult::Collision(contact) => Some(contact),
            CollisionResult::NoCollision => None,
        }
    }

    pub fn is_collision(&self) -> bool {
        matches!(self, CollisionResult::Collision(_))
    }
}

/// Separating axis chosen for a contact
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Z,
}

/// Horizontal overlaps on X and Z, or None if the volumes are separated
///
/// Vertical separation counts as no overlap so that boxes above or below the
/// player never block ground traversal.
fn horizontal_overlaps(player: &Aabb, other: &Aabb) -> Option<(f32, f32)> {
    if !player.overlaps_vertically(other) {
        return None;
    }

    let delta = player.center() - other.center();
    let reach = player.half_extents() + other.half_extents();

    let overlap_x = reach.x - delta.x.abs();
    let overlap_z = reach.z - delta.z.abs();
    if overlap_x <= 0.0 || overlap_z <= 0.0 {
        return None;
    }

    Some((overlap_x, overlap_z))
}

/// Least-penetration axis; equal overlaps resolve to X
fn least_penetration_axis(overlap_x: f32, overlap_z: f32) -> (Axis, f32) {
    if overlap_x <= overlap_z {
        (Axis::X, overlap_x)
    } else {
        (Axis::Z, overlap_z)
    }
}

/// Test the player's candidate volume against one box
///
/// The reported depth is the overlap on the least-penetration axis plus
/// `epsilon`, so that pushing the player out by `normal * depth` leaves a gap
/// and the same contact does not re-trigger on round-off.
pub fn detect_player_box(player: &Aabb, key: BodyKey, body: &Body, epsilon: f32) -> CollisionResult {
    let box_aabb = body.aabb();
    let Some((overlap_x, overlap_z)) = horizontal_overlaps(player, &box_aabb) else {
        return CollisionResult::NoCollision;
    };

    let player_center = player.center();
    let player_half = player.half_extents();
    let box_center = box_aabb.center();
    let (axis, overlap) = least_penetration_axis(overlap_x, overlap_z);

    // Coincident centers push toward +axis
    let (normal, point) = match axis {
        Axis::X => {
            let sign = if player_center.x >= box_center.x { 1.0 } else { -1.0 };
            let face = player_center.x - sign * player_half.x;
            (Vec3::new(sign, 0.0, 0.0), Vec3::new(face, box_center.y, player_center.z))
        }
        Axis::Z => {
            let sign = if player_center.z >= box_center.z { 1.0 } else { -1.0 };
            let face = player_center.z - sign * player_half.z;
            (Vec3::new(0.0, 0.0, sign), Vec3::new(player_center.x, box_center.y, face))
        }
    };

    CollisionResult::Collision(Contact {
        normal,
        depth: overlap + epsilon,
        point,
        body: key,
    })
}

/// Raw horizontal overlap (no epsilon) on the least-penetration axis, or 0
///
/// Used to measure residual overlap after resolution.
pub fn penetration_overlap(player: &Aabb, body: &Body) -> f32 {
    match horizontal_overlaps(player, &body.aabb()) {
        Some((overlap_x, overlap_z)) => least_penetration_axis(overlap_x, overlap_z).1,
        None => 0.0,
    }
}
