//! Euler look angles in degrees (Z-up)

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Pitch limit in degrees. Looking straight up or down flips the yaw frame.
pub const PITCH_LIMIT: f32 = 89.9;

/// Look orientation owned by a character.
///
/// Positive pitch looks down, positive yaw turns left (counter-clockwise seen
/// from above). Roll is carried for completeness but always zeroed by the
/// camera rig.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LookAngles {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl LookAngles {
    pub const ZERO: LookAngles = LookAngles::new(0.0, 0.0, 0.0);

    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Angles with only the given yaw set
    pub const fn from_yaw(yaw: f32) -> Self {
        Self::new(0.0, yaw, 0.0)
    }

    /// Drop pitch and roll, keeping the heading
    pub fn yaw_only(&self) -> Self {
        Self::from_yaw(self.yaw)
    }

    /// Clamp pitch into `[-limit, limit]` and zero roll
    pub fn clamped(&self, limit: f32) -> Self {
        Self {
            pitch: self.pitch.clamp(-limit, limit),
            yaw: self.yaw,
            roll: 0.0,
        }
    }

    /// Convert to a rotation: yaw about Z, then pitch about Y, then roll about X
    pub fn to_rotation(&self) -> Quat {
        Quat::from_rotation_z(self.yaw.to_radians())
            * Quat::from_rotation_y(self.pitch.to_radians())
            * Quat::from_rotation_x(self.roll.to_radians())
    }

    /// Look direction
    pub fn forward(&self) -> Vec3 {
        self.to_rotation() * crate::FORWARD
    }

    /// Left of the look direction
    pub fn left(&self) -> Vec3 {
        self.to_rotation() * crate::LEFT
    }

    /// Right of the look direction
    pub fn right(&self) -> Vec3 {
        -self.left()
    }
}
