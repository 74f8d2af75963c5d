//! Locomotion controller: input and look in, velocity and stance out

use glam::{Vec2, Vec3};
use strider_core::{horizontal, LookAngles, UP};
use strider_physics::{accel, KinematicController, PhysicsConfig};
use tracing::{debug, trace};

use crate::input::{InputAction, InputSource};

use super::animation::{AnimationParameterSync, AnimationParameters, AnimationSink, NullAnimation};
use super::body::{BodyNode, BodyOrientationSmoother, NullBody};
use super::crouch::{CrouchStateMachine, Stance};
use super::movement::{MovementTuning, TuningError};
use super::MovementState;

/// Wish directions shorter than this are treated as no input
const MIN_WISH_LENGTH: f32 = 1e-4;

/// Who runs the simulation for a character
pub trait Ownership {
    /// True for remote replicas that only mirror replicated state
    fn is_proxy(&self) -> bool;
}

/// The local machine owns the character
#[derive(Debug, Clone, Copy, Default)]
pub struct LocallyOwned;

impl Ownership for LocallyOwned {
    fn is_proxy(&self) -> bool {
        false
    }
}

/// Builder for [`LocomotionController`]
pub struct LocomotionBuilder {
    tuning: MovementTuning,
    gravity: Vec3,
    smoother: BodyOrientationSmoother,
    body: Box<dyn BodyNode>,
    animation: Box<dyn AnimationSink>,
    ownership: Box<dyn Ownership>,
}

impl LocomotionBuilder {
    /// Start from `tuning` with default gravity and no bound collaborators
    pub fn new(tuning: MovementTuning) -> Self {
        Self {
            tuning,
            gravity: PhysicsConfig::default().gravity,
            smoother: BodyOrientationSmoother::default(),
            body: Box::new(NullBody),
            animation: Box::new(NullAnimation),
            ownership: Box::new(LocallyOwned),
        }
    }

    /// World gravity
    pub fn gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Body turn smoothing
    pub fn smoother(mut self, smoother: BodyOrientationSmoother) -> Self {
        self.smoother = smoother;
        self
    }

    /// Visual body to turn
    pub fn body(mut self, body: impl BodyNode + 'static) -> Self {
        self.body = Box::new(body);
        self
    }

    /// Animation graph to feed
    pub fn animation(mut self, animation: impl AnimationSink + 'static) -> Self {
        self.animation = Box::new(animation);
        self
    }

    /// Ownership check
    pub fn ownership(mut self, ownership: impl Ownership + 'static) -> Self {
        self.ownership = Box::new(ownership);
        self
    }

    /// Validate the tuning and build
    pub fn build(self) -> Result<LocomotionController, TuningError> {
        self.tuning.validate()?;
        Ok(LocomotionController {
            tuning: self.tuning,
            gravity: self.gravity,
            state: MovementState::default(),
            crouch: CrouchStateMachine::new(),
            smoother: self.smoother,
            body: self.body,
            animation: self.animation,
            ownership: self.ownership,
        })
    }
}

/// Per-character locomotion.
///
/// The simulation tick ([`fixed_update`](Self::fixed_update)) runs at a fixed
/// rate and drives crouch, velocity and body turning. The visual tick
/// ([`update_animation`](Self::update_animation)) only reads.
pub struct LocomotionController {
    tuning: MovementTuning,
    gravity: Vec3,
    state: MovementState,
    crouch: CrouchStateMachine,
    smoother: BodyOrientationSmoother,
    body: Box<dyn BodyNode>,
    animation: Box<dyn AnimationSink>,
    ownership: Box<dyn Ownership>,
}

impl LocomotionController {
    /// Start building a controller
    pub fn builder(tuning: MovementTuning) -> LocomotionBuilder {
        LocomotionBuilder::new(tuning)
    }

    /// Controller with no bound collaborators
    pub fn new(tuning: MovementTuning) -> Result<Self, TuningError> {
        Self::builder(tuning).build()
    }

    /// State after the last tick
    pub fn state(&self) -> &MovementState {
        &self.state
    }

    /// Movement tuning
    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    /// Current stance
    pub fn stance(&self) -> Stance {
        self.crouch.stance()
    }

    /// Check if crouched
    pub fn is_crouching(&self) -> bool {
        self.crouch.is_crouching()
    }

    /// Bound body node
    pub fn body(&self) -> &dyn BodyNode {
        self.body.as_ref()
    }

    /// Bound body node, for the camera to switch render modes
    pub fn body_mut(&mut self) -> &mut dyn BodyNode {
        self.body.as_mut()
    }

    /// Run one simulation tick.
    ///
    /// With no controller the wish velocity is still built and the body still
    /// turns; jump, crouch and movement are skipped.
    pub fn fixed_update(
        &mut self,
        mut controller: Option<&mut dyn KinematicController>,
        input: &dyn InputSource,
        look: &LookAngles,
        dt: f32,
    ) -> MovementState {
        if self.ownership.is_proxy() {
            return self.state;
        }

        self.state.sprinting = input.down(InputAction::Run);
        if input.pressed(InputAction::Jump) {
            if let Some(controller) = controller.as_deref_mut() {
                self.jump(controller);
            }
        }

        self.state.wish_velocity = self.build_wish_velocity(input, look);

        if let Some(controller) = controller.as_deref_mut() {
            self.crouch.update(
                input.pressed(InputAction::Duck),
                input.released(InputAction::Duck),
                controller,
            );
            self.integrate(controller, dt);
            self.state.velocity = controller.velocity();
            self.state.grounded = controller.is_grounded();
        }
        self.state.crouching = self.crouch.is_crouching();

        self.rotate_body(look, dt);

        trace!(
            velocity = ?self.state.velocity,
            wish = ?self.state.wish_velocity,
            grounded = self.state.grounded,
            "locomotion tick"
        );
        self.state
    }

    /// Push animation parameters for this frame.
    ///
    /// Runs for replicas too; their controller carries replicated velocity.
    pub fn update_animation(
        &mut self,
        controller: Option<&dyn KinematicController>,
        look: &LookAngles,
    ) -> AnimationParameters {
        if let Some(controller) = controller {
            self.state.velocity = controller.velocity();
            self.state.grounded = controller.is_grounded();
        }
        AnimationParameterSync::push(self.animation.as_mut(), &self.state, look)
    }

    /// Wish velocity from held directions in the yaw-only look frame, falling
    /// back to the analog move axis when no direction is held
    fn build_wish_velocity(&self, input: &dyn InputSource, look: &LookAngles) -> Vec3 {
        let frame = look.yaw_only();
        let forward = frame.forward();
        let left = frame.left();

        let mut wish = Vec3::ZERO;
        if input.down(InputAction::Forward) {
            wish += forward;
        }
        if input.down(InputAction::Backward) {
            wish -= forward;
        }
        if input.down(InputAction::Left) {
            wish += left;
        }
        if input.down(InputAction::Right) {
            wish -= left;
        }
        if wish == Vec3::ZERO {
            let axis: Vec2 = input.move_axis();
            wish = forward * axis.x + left * axis.y;
        }

        let mut wish = horizontal(wish);
        if wish.length() > MIN_WISH_LENGTH {
            wish = wish.normalize();
        } else {
            wish = Vec3::ZERO;
        }

        wish * self.tuning.wish_speed(self.crouch.is_crouching(), self.state.sprinting)
    }

    fn jump(&mut self, controller: &mut dyn KinematicController) {
        if !controller.is_grounded() {
            return;
        }
        controller.punch(UP * self.tuning.jump_impulse);
        self.animation.trigger_jump();
        debug!(impulse = self.tuning.jump_impulse, "jump");
    }

    /// Friction, acceleration and gravity around the sweep. Gravity is split in
    /// two halves, one before and one after the move (leapfrog style).
    fn integrate(&mut self, controller: &mut dyn KinematicController, dt: f32) {
        let half_gravity = self.gravity * dt * 0.5;
        let was_grounded = controller.is_grounded();
        let control = self.tuning.control(was_grounded);

        if was_grounded {
            controller.set_velocity(horizontal(controller.velocity()));
            controller.accelerate(self.state.wish_velocity, dt);
        } else {
            controller.set_velocity(controller.velocity() + half_gravity);
            let wish = accel::clamp_air_wish(self.state.wish_velocity, self.tuning.max_air_accel_force);
            controller.accelerate(wish, dt);
        }
        controller.apply_friction(control, dt);

        controller.move_and_slide(dt);

        if controller.is_grounded() {
            controller.set_velocity(horizontal(controller.velocity()));
            if !was_grounded {
                debug!("landed");
            }
        } else {
            controller.set_velocity(controller.velocity() + half_gravity);
        }
    }

    fn rotate_body(&mut self, look: &LookAngles, dt: f32) {
        let speed = self.state.horizontal_speed();
        self.smoother.update(self.body.as_mut(), look, speed, dt);
    }
}
