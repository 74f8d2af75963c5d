//! Camera configuration

use serde::{Deserialize, Serialize};
use strider_core::PITCH_LIMIT;

/// Rejected camera configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraConfigError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("pitch_limit must be within (0, 90), got {0}")]
    PitchLimit(f32),
}

/// Camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Mouse sensitivity (degrees per unit of look delta)
    pub sensitivity: f32,
    /// Pitch is clamped to +/- this many degrees
    pub pitch_limit: f32,
    /// Initial follow distance (0 = first person)
    pub follow_distance: f32,
    /// Upper bound for the follow distance
    pub max_follow_distance: f32,
    /// Follow distance used when toggling into third person
    pub third_person_distance: f32,
    /// Head anchor height above the character's feet
    pub eye_height: f32,
    /// How far the view dips while crouched
    pub crouch_offset: f32,
    /// Offset easing rate per second
    pub offset_smoothing: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.1,
            pitch_limit: PITCH_LIMIT,
            follow_distance: 0.0,
            max_follow_distance: 1000.0,
            third_person_distance: 150.0,
            eye_height: 64.0,
            crouch_offset: 32.0,
            offset_smoothing: 10.0,
        }
    }
}

impl CameraConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), CameraConfigError> {
        let fields = [
            ("sensitivity", self.sensitivity),
            ("pitch_limit", self.pitch_limit),
            ("follow_distance", self.follow_distance),
            ("max_follow_distance", self.max_follow_distance),
            ("third_person_distance", self.third_person_distance),
            ("eye_height", self.eye_height),
            ("crouch_offset", self.crouch_offset),
            ("offset_smoothing", self.offset_smoothing),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(CameraConfigError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(CameraConfigError::Negative { field, value });
            }
        }
        if self.pitch_limit <= 0.0 || self.pitch_limit >= 90.0 {
            return Err(CameraConfigError::PitchLimit(self.pitch_limit));
        }
        Ok(())
    }
}
