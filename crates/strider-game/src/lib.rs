//! Strider Game - Character locomotion and camera rig
//!
//! Provides the locomotion controller, crouch stance, body turning, animation
//! parameter sync, camera rig and input abstraction.

pub mod camera;
pub mod input;
pub mod player;

pub use camera::{CameraConfig, CameraConfigError, CameraMode, CameraRig};
pub use input::{InputAction, InputSource, InputState, TickInput};
pub use player::{
    AnimationParameterSync, AnimationParameters, AnimationSink, BodyNode,
    BodyOrientationSmoother, CrouchStateMachine, LocallyOwned, LocomotionBuilder,
    LocomotionController, MovementState, MovementTuning, NullAnimation, NullBody, Ownership,
    RenderMode, Stance, TuningError, VisualBody,
};
