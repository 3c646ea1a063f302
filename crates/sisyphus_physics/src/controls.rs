//! Movement control state
//!
//! Written by input handlers, read once per tick by the player controller.

use bitflags::bitflags;
use sisyphus_math::Vec3;

bitflags! {
    /// Which movement controls are currently held
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MoveControls: u8 {
        /// Move toward the look direction (-Z in local space)
        const FORWARD = 1 << 0;
        /// Move away from the look direction (+Z in local space)
        const BACKWARD = 1 << 1;
        /// Strafe left (-X in local space)
        const LEFT = 1 << 2;
        /// Strafe right (+X in local space)
        const RIGHT = 1 << 3;
    }
}

impl MoveControls {
    /// Unnormalized local-space direction of the held controls
    ///
    /// Opposing controls cancel out.
    pub fn direction(self) -> Vec3 {
        let mut direction = Vec3::ZERO;
        if self.contains(Self::FORWARD) {
            direction.z -= 1.0;
        }
        if self.contains(Self::BACKWARD) {
            direction.z += 1.0;
        }
        if self.contains(Self::LEFT) {
            direction.x -= 1.0;
        }
        if self.contains(Self::RIGHT) {
            direction.x += 1.0;
        }
        direction
    }
}
