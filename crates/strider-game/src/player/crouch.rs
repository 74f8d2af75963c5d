//! Crouch stance machine
//!
//! Two stances with instantaneous transitions. Crouching halves the collider and
//! standing doubles it back, so one round trip restores the height exactly
//! (halving and doubling a float are both exact). Visual blending is left to the
//! animation side via the duck level.

use strider_physics::KinematicController;
use tracing::debug;

/// Player stance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stance {
    /// Full collider height
    #[default]
    Standing,
    /// Half collider height
    Crouching,
}

impl Stance {
    /// Check if crouched
    pub fn is_crouching(&self) -> bool {
        matches!(self, Stance::Crouching)
    }
}

/// Stance machine driven by crouch press/release edges
#[derive(Debug, Clone, Default)]
pub struct CrouchStateMachine {
    stance: Stance,
}

impl CrouchStateMachine {
    /// Start standing
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stance
    pub fn stance(&self) -> Stance {
        self.stance
    }

    /// Check if crouched
    pub fn is_crouching(&self) -> bool {
        self.stance.is_crouching()
    }

    /// Enter the crouch, halving the collider. Returns false if already crouched.
    pub fn crouch(&mut self, body: &mut dyn KinematicController) -> bool {
        if self.stance == Stance::Crouching {
            return false;
        }
        self.stance = Stance::Crouching;
        let height = body.height() / 2.0;
        body.set_height(height);
        debug!(height, "crouched");
        true
    }

    /// Leave the crouch, doubling the collider. Returns false if already standing.
    pub fn stand(&mut self, body: &mut dyn KinematicController) -> bool {
        if self.stance == Stance::Standing {
            return false;
        }
        self.stance = Stance::Standing;
        let height = body.height() * 2.0;
        body.set_height(height);
        debug!(height, "stood up");
        true
    }

    /// Apply this tick's edges. A press and a release in the same tick crouch
    /// then stand, leaving the height unchanged.
    pub fn update(&mut self, pressed: bool, released: bool, body: &mut dyn KinematicController) {
        if pressed {
            self.crouch(body);
        }
        if released {
            self.stand(body);
        }
    }
}
