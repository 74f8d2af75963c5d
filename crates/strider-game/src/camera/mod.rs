//! Camera rig module
//!
//! First-person and third-person camera with mouse look, occlusion and crouch dip.

mod config;
mod controller;

pub use config::{CameraConfig, CameraConfigError};
pub use controller::{CameraMode, CameraRig};
