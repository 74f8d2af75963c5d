//! Strider Core - Core types and utilities for the Strider character rig
//!
//! This crate provides the foundational types used throughout the rig:
//! - Mathematical primitives (re-exported from glam)
//! - Look angles and the Z-up axis convention
//! - Transform for camera and body nodes
//! - Fixed-timestep frame clock

pub mod angles;
pub mod time;
pub mod types;

pub use angles::{LookAngles, PITCH_LIMIT};
pub use glam::{Mat4, Quat, Vec2, Vec3};
pub use time::{GameTime, TimeConfig, TimeError};
pub use types::{horizontal, Transform, FORWARD, LEFT, UP};
