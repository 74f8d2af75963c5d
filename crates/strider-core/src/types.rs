//! Core types used throughout the Strider rig

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// World up axis
pub const UP: Vec3 = Vec3::Z;

/// Forward axis at zero yaw
pub const FORWARD: Vec3 = Vec3::X;

/// Left axis at zero yaw
pub const LEFT: Vec3 = Vec3::Y;

/// Position and rotation of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Compute the model matrix for this transform
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Get the forward direction
    pub fn forward(&self) -> Vec3 {
        self.rotation * FORWARD
    }

    /// Get the left direction
    pub fn left(&self) -> Vec3 {
        self.rotation * LEFT
    }

    /// Get the up direction
    pub fn up(&self) -> Vec3 {
        self.rotation * UP
    }
}

/// Strip the vertical component of a vector
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, 0.0)
}
