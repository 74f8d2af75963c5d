//! Movement tuning

use serde::{Deserialize, Serialize};

/// Rejected movement tuning
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TuningError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
}

/// Movement tuning, fixed for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Friction control factor on the ground
    pub ground_control: f32,
    /// Friction control factor in the air
    pub air_control: f32,
    /// Longest wish velocity honoured while airborne
    pub max_air_accel_force: f32,
    /// Default speed (units/s)
    pub walk_speed: f32,
    /// Speed while the run action is held
    pub run_speed: f32,
    /// Speed while crouched; wins over running
    pub crouch_speed: f32,
    /// Upward velocity added by a jump
    pub jump_impulse: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            ground_control: 4.0,
            air_control: 0.1,
            max_air_accel_force: 50.0,
            walk_speed: 160.0,
            run_speed: 290.0,
            crouch_speed: 145.0,
            jump_impulse: 400.0,
        }
    }
}

impl MovementTuning {
    /// Check every field is finite and non-negative
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("ground_control", self.ground_control),
            ("air_control", self.air_control),
            ("max_air_accel_force", self.max_air_accel_force),
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("crouch_speed", self.crouch_speed),
            ("jump_impulse", self.jump_impulse),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(TuningError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }
        Ok(())
    }

    /// Target speed for the current stance. Crouching beats running beats walking.
    pub fn wish_speed(&self, crouching: bool, sprinting: bool) -> f32 {
        if crouching {
            self.crouch_speed
        } else if sprinting {
            self.run_speed
        } else {
            self.walk_speed
        }
    }

    /// Friction control factor based on grounded state
    pub fn control(&self, grounded: bool) -> f32 {
        if grounded {
            self.ground_control
        } else {
            self.air_control
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MovementTuning::default().validate().is_ok());
    }

    #[test]
    fn test_speed_precedence() {
        let tuning = MovementTuning::default();
        assert_eq!(tuning.wish_speed(true, true), tuning.crouch_speed);
        assert_eq!(tuning.wish_speed(false, true), tuning.run_speed);
        assert_eq!(tuning.wish_speed(false, false), tuning.walk_speed);
    }

    #[test]
    fn test_rejects_negative() {
        let tuning = MovementTuning {
            run_speed: -1.0,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::Negative {
                field: "run_speed",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_rejects_nan() {
        let tuning = MovementTuning {
            jump_impulse: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonFinite { field: "jump_impulse", .. })
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let tuning: MovementTuning = toml::from_str("walk_speed = 90.0").unwrap();
        assert_eq!(tuning.walk_speed, 90.0);
        assert_eq!(tuning.run_speed, 290.0);
    }

    #[test]
    fn test_control_by_regime() {
        let tuning = MovementTuning::default();
        assert_eq!(tuning.control(true), 4.0);
        assert_eq!(tuning.control(false), 0.1);
    }
}
