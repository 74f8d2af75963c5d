//! Per-character movement snapshot

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Movement state produced by each simulation tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementState {
    /// Velocity after the tick's move
    pub velocity: Vec3,
    /// Velocity the input asked for this tick
    pub wish_velocity: Vec3,
    /// Whether the last sweep found ground
    pub grounded: bool,
    /// Whether the character is crouched
    pub crouching: bool,
    /// Whether the run action was held
    pub sprinting: bool,
}

impl MovementState {
    /// Speed in the ground plane
    pub fn horizontal_speed(&self) -> f32 {
        strider_core::horizontal(self.velocity).length()
    }

    /// Duck level for animation: fully ducked while crouching
    pub fn duck_level(&self) -> f32 {
        if self.crouching {
            1.0
        } else {
            0.0
        }
    }
}
