//! Player locomotion module
//!
//! Fixed-tick movement, crouching, body turning and the animation feed.

mod animation;
mod body;
mod controller;
mod crouch;
mod movement;
mod state;
#[cfg(test)]
mod testing;

pub use animation::{
    AnimationParameterSync, AnimationParameters, AnimationSink, LookBlend, MoveStyle,
    NullAnimation, BODY_WEIGHT, EYES_WEIGHT, HEAD_WEIGHT,
};
pub use body::{BodyNode, BodyOrientationSmoother, NullBody, RenderMode, VisualBody};
pub use controller::{LocallyOwned, LocomotionBuilder, LocomotionController, Ownership};
pub use crouch::{CrouchStateMachine, Stance};
pub use movement::{MovementTuning, TuningError};
pub use state::MovementState;
