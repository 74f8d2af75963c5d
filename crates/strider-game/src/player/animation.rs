//! Animation parameter sync
//!
//! Pushes locomotion state into an animation graph every visual frame. Nothing
//! flows back.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use strider_core::LookAngles;

use super::MovementState;

/// Look blend weights, strongest at the eyes and fading down the spine
pub const EYES_WEIGHT: f32 = 1.0;
pub const HEAD_WEIGHT: f32 = 0.75;
pub const BODY_WEIGHT: f32 = 0.5;

/// Locomotion style selector understood by the animation graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveStyle {
    /// Let the graph pick from speed
    #[default]
    Auto,
    Walk,
    Run,
}

/// Where and how strongly the rig should look
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookBlend {
    pub direction: Vec3,
    pub eyes_weight: f32,
    pub head_weight: f32,
    pub body_weight: f32,
}

impl LookBlend {
    /// Look along `direction` with the standard weights
    pub fn toward(direction: Vec3) -> Self {
        Self {
            direction,
            eyes_weight: EYES_WEIGHT,
            head_weight: HEAD_WEIGHT,
            body_weight: BODY_WEIGHT,
        }
    }
}

/// One frame of animation inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationParameters {
    pub wish_velocity: Vec3,
    pub velocity: Vec3,
    pub aim_rotation: Quat,
    pub aim_direction: Vec3,
    pub grounded: bool,
    pub look: LookBlend,
    pub move_style: MoveStyle,
    /// 0 standing, 1 fully crouched
    pub duck_level: f32,
}

/// Receiver for animation parameters
pub trait AnimationSink {
    /// Take this frame's parameters
    fn apply(&mut self, params: &AnimationParameters);

    /// Fire the one-shot jump animation
    fn trigger_jump(&mut self) {}
}

/// Stand-in used when no animation graph is bound
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAnimation;

impl AnimationSink for NullAnimation {
    fn apply(&mut self, _params: &AnimationParameters) {}
}

/// Maps movement state onto animation parameters
pub struct AnimationParameterSync;

impl AnimationParameterSync {
    /// Build the parameters for this frame
    pub fn sample(state: &MovementState, look: &LookAngles) -> AnimationParameters {
        let aim_rotation = look.to_rotation();
        let aim_direction = look.forward();
        AnimationParameters {
            wish_velocity: state.wish_velocity,
            velocity: state.velocity,
            aim_rotation,
            aim_direction,
            grounded: state.grounded,
            look: LookBlend::toward(aim_direction),
            move_style: MoveStyle::Run,
            duck_level: state.duck_level(),
        }
    }

    /// Sample and push into `sink`
    pub fn push(
        sink: &mut dyn AnimationSink,
        state: &MovementState,
        look: &LookAngles,
    ) -> AnimationParameters {
        let params = Self::sample(state, look);
        sink.apply(&params);
        params
    }
}
