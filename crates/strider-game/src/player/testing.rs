//! Test doubles for the collaborator traits

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use strider_physics::KinematicController;

use super::animation::{AnimationParameters, AnimationSink};

/// Kinematic body that integrates position directly against an optional flat floor
#[derive(Debug, Clone)]
pub struct ScriptedController {
    pub position: Vec3,
    pub velocity: Vec3,
    pub height: f32,
    pub grounded: bool,
    /// Floor height; `None` keeps the body airborne forever
    pub floor: Option<f32>,
    pub moves: u32,
}

impl ScriptedController {
    pub fn grounded() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            height: 64.0,
            grounded: true,
            floor: Some(0.0),
            moves: 0,
        }
    }

    pub fn falling() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 500.0),
            grounded: false,
            floor: None,
            ..Self::grounded()
        }
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }
}

impl KinematicController for ScriptedController {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    fn move_and_slide(&mut self, dt: f32) {
        self.moves += 1;
        self.position += self.velocity * dt;
        self.grounded = match self.floor {
            Some(floor) if self.position.z <= floor => {
                self.position.z = floor;
                true
            }
            _ => false,
        };
    }

    fn punch(&mut self, impulse: Vec3) {
        self.grounded = false;
        self.velocity += impulse;
    }
}

/// Everything an animation sink was sent
#[derive(Debug, Default)]
pub struct AnimationLog {
    pub applied: Vec<AnimationParameters>,
    pub jumps: u32,
}

/// Animation sink that records into a shared log
#[derive(Debug, Clone, Default)]
pub struct RecordingAnimation {
    pub log: Rc<RefCell<AnimationLog>>,
}

impl AnimationSink for RecordingAnimation {
    fn apply(&mut self, params: &AnimationParameters) {
        self.log.borrow_mut().applied.push(params.clone());
    }

    fn trigger_jump(&mut self) {
        self.log.borrow_mut().jumps += 1;
    }
}
