//! Collision volumes
//!
//! Every body collides as an axis-aligned box. Boxes may yaw visually, but
//! their collision volume stays axis-aligned.

use sisyphus_math::Vec3;

/// The shape a body was created with
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BodyShape {
    /// A box with the given half-extents
    Cuboid { half_extents: Vec3 },
    /// A sphere (the boulder)
    Sphere { radius: f32 },
    /// An upright capsule (the player), total height including the caps
    Capsule { radius: f32, height: f32 },
}

impl BodyShape {
    /// Half-extents of the axis-aligned collision volume
    pub fn half_extents(&self) -> Vec3 {
        match *self {
            BodyShape::Cuboid { half_extents } => half_extents,
            BodyShape::Sphere { radius } => Vec3::new(radius, radius, radius),
            BodyShape::Capsule { radius, height } => Vec3::new(radius, height * 0.5, radius),
        }
    }
}

/// An axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner (all components are minimums)
    pub min: Vec3,
    /// Maximum corner (all components are maximums)
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-extents of the box
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// True if the two volumes share interior on the vertical axis
    ///
    /// Touching faces do not count as an overlap.
    pub fn overlaps_vertically(&self, other: &Self) -> bool {
        self.max.y > other.min.y && self.min.y < other.max.y
    }
}
