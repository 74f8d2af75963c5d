//! Capabilities the locomotion core consumes from the physics side

use glam::Vec3;
use rapier3d::prelude::ColliderHandle;
use strider_core::horizontal;

use crate::accel;

/// Acceleration rate used by [`KinematicController::accelerate`] unless overridden
pub const DEFAULT_ACCELERATION: f32 = 10.0;

/// Friction stop speed used by [`KinematicController::apply_friction`] unless overridden
pub const DEFAULT_STOP_SPEED: f32 = 140.0;

/// A kinematic sweep-and-resolve character body.
///
/// Implementors own velocity, collider height and the grounded flag. The
/// provided methods express acceleration, friction and impulses in terms of
/// the required accessors.
pub trait KinematicController {
    /// Whether the last sweep found standing support
    fn is_grounded(&self) -> bool;

    /// Current velocity
    fn velocity(&self) -> Vec3;

    /// Overwrite the velocity
    fn set_velocity(&mut self, velocity: Vec3);

    /// Collider height
    fn height(&self) -> f32;

    /// Resize the collider
    fn set_height(&mut self, height: f32);

    /// Sweep the collider along `velocity * dt`, resolving collisions and
    /// refreshing the grounded flag
    fn move_and_slide(&mut self, dt: f32);

    /// Detach from the ground and add an instantaneous velocity change
    fn punch(&mut self, impulse: Vec3);

    /// Rate at which `accelerate` closes the gap to the wish velocity
    fn acceleration(&self) -> f32 {
        DEFAULT_ACCELERATION
    }

    /// Speed floor used by friction
    fn stop_speed(&self) -> f32 {
        DEFAULT_STOP_SPEED
    }

    /// Accelerate toward `wish_velocity`
    fn accelerate(&mut self, wish_velocity: Vec3, dt: f32) {
        let velocity = accel::accelerate(self.velocity(), wish_velocity, self.acceleration(), dt);
        self.set_velocity(velocity);
    }

    /// Bleed off horizontal speed with the given control factor.
    ///
    /// The vertical component belongs to gravity and is left untouched.
    fn apply_friction(&mut self, control: f32, dt: f32) {
        let velocity = self.velocity();
        let slowed = accel::apply_friction(horizontal(velocity), control, self.stop_speed(), dt);
        self.set_velocity(Vec3::new(slowed.x, slowed.y, velocity.z));
    }
}

/// What a trace should skip
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TraceFilter {
    /// Usually the traced character's own collider
    pub ignore: Option<ColliderHandle>,
    /// Skip non-solid trigger volumes
    pub ignore_triggers: bool,
}

impl TraceFilter {
    /// Filter that skips `collider` and all trigger volumes
    pub fn excluding(collider: Option<ColliderHandle>) -> Self {
        Self {
            ignore: collider,
            ignore_triggers: true,
        }
    }
}

/// Result of a segment trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceResult {
    /// Whether anything was hit
    pub hit: bool,
    /// Point of impact (equals `end_position` on a hit)
    pub hit_position: Vec3,
    /// Where the trace stopped: the impact point, or the requested end
    pub end_position: Vec3,
}

impl TraceResult {
    /// A trace that reached its end unobstructed
    pub fn miss(to: Vec3) -> Self {
        Self {
            hit: false,
            hit_position: to,
            end_position: to,
        }
    }

    /// A trace stopped at `point`
    pub fn blocked(point: Vec3) -> Self {
        Self {
            hit: true,
            hit_position: point,
            end_position: point,
        }
    }
}

/// World geometry queries used to keep the camera out of walls
pub trait OcclusionQuery {
    /// Trace the segment `from -> to`
    fn trace(&self, from: Vec3, to: Vec3, filter: TraceFilter) -> TraceResult;
}
