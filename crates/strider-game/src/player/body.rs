//! Visual body node and its turn smoothing

use glam::Quat;
use serde::{Deserialize, Serialize};
use strider_core::LookAngles;

/// How the body mesh is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Visible and casting shadows
    #[default]
    On,
    /// Hidden from the camera but still casting and receiving shadows
    ShadowsOnly,
}

/// The visual body a character turns and the camera shows or hides
pub trait BodyNode {
    /// World rotation of the body
    fn rotation(&self) -> Quat;

    /// Set the world rotation of the body
    fn set_rotation(&mut self, rotation: Quat);

    /// Switch how the body is drawn
    fn set_render_mode(&mut self, _mode: RenderMode) {}
}

/// Stand-in used when no body is bound
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBody;

impl BodyNode for NullBody {
    fn rotation(&self) -> Quat {
        Quat::IDENTITY
    }

    fn set_rotation(&mut self, _rotation: Quat) {}
}

/// Plain body node holding its own rotation and render mode
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VisualBody {
    pub rotation: Quat,
    pub render_mode: RenderMode,
}

impl BodyNode for VisualBody {
    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }
}

/// Turns the body toward the look yaw, but only once the look has drifted far
/// enough or the character is actually moving. Holding still at small offsets
/// keeps the body from twitching with every mouse nudge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyOrientationSmoother {
    /// Angle (degrees) between body and look that forces a turn
    pub turn_threshold: f32,
    /// Horizontal speed (units/s) above which the body always follows
    pub speed_threshold: f32,
    /// Slerp factor per second
    pub turn_rate: f32,
}

impl Default for BodyOrientationSmoother {
    fn default() -> Self {
        Self {
            turn_threshold: 50.0,
            speed_threshold: 10.0,
            turn_rate: 2.0,
        }
    }
}

impl BodyOrientationSmoother {
    /// Turn `body` toward the yaw of `look`. Returns whether it moved.
    pub fn update(&self, body: &mut dyn BodyNode, look: &LookAngles, speed: f32, dt: f32) -> bool {
        let target = look.yaw_only().to_rotation();
        let current = body.rotation();
        let difference = current.angle_between(target).to_degrees();

        if difference > self.turn_threshold || speed > self.speed_threshold {
            let t = (self.turn_rate * dt).clamp(0.0, 1.0);
            body.set_rotation(current.slerp(target, t).normalize());
            return true;
        }
        false
    }
}
