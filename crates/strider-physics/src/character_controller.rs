//! Character controller using rapier3d's kinematic character controller

use glam::Vec3;
use strider_core::UP;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;

use crate::kinematic::{KinematicController, DEFAULT_ACCELERATION, DEFAULT_STOP_SPEED};
use crate::PhysicsWorld;

/// Translation shortfall (units) below which a sweep counts as unobstructed
const CLIP_EPSILON: f32 = 1e-3;

/// Character controller configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CharacterControllerConfig {
    /// Capsule height when standing (default: 64 units)
    pub height: f32,
    /// Capsule radius (default: 16 units)
    pub radius: f32,
    /// Maximum slope angle in degrees (default: 45)
    pub max_slope_angle: f32,
    /// Step height for climbing stairs (default: 18 units)
    pub step_height: f32,
    /// Skin width for collision detection
    pub skin_width: f32,
    /// Whether to snap to ground when walking down slopes
    pub snap_to_ground: bool,
    /// Maximum ground snap distance
    pub ground_snap_distance: f32,
    /// Rate used when accelerating toward a wish velocity
    pub acceleration: f32,
    /// Speed floor used by friction
    pub stop_speed: f32,
}

impl Default for CharacterControllerConfig {
    fn default() -> Self {
        Self {
            height: 64.0,
            radius: 16.0,
            max_slope_angle: 45.0,
            step_height: 18.0,
            skin_width: 0.5,
            snap_to_ground: true,
            ground_snap_distance: 4.0,
            acceleration: DEFAULT_ACCELERATION,
            stop_speed: DEFAULT_STOP_SPEED,
        }
    }
}

/// Character body with collision, stored outside the physics world
pub struct CharacterController {
    /// Configuration
    pub config: CharacterControllerConfig,
    /// Current position (feet)
    pub position: Vec3,
    /// Current velocity
    pub velocity: Vec3,
    /// Whether the character is on the ground
    pub grounded: bool,
    /// Current capsule height (changes while crouching)
    height: f32,
    /// The collider handle for this character
    pub collider_handle: Option<ColliderHandle>,
    /// Rapier's kinematic character controller
    controller: KinematicCharacterController,
}

impl CharacterController {
    /// Create a new character controller with default config
    pub fn new() -> Self {
        Self::with_config(CharacterControllerConfig::default())
    }

    /// Create a new character controller with custom config
    pub fn with_config(config: CharacterControllerConfig) -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.up = Vector::<Real>::z_axis();
        controller.max_slope_climb_angle = config.max_slope_angle.to_radians();
        controller.min_slope_slide_angle = config.max_slope_angle.to_radians();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(config.step_height),
            min_width: CharacterLength::Relative(0.5),
            include_dynamic_bodies: true,
        });
        controller.snap_to_ground = if config.snap_to_ground {
            Some(CharacterLength::Absolute(config.ground_snap_distance))
        } else {
            None
        };
        controller.offset = CharacterLength::Absolute(config.skin_width);

        Self {
            height: config.height,
            config,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            grounded: false,
            collider_handle: None,
            controller,
        }
    }

    /// Spawn the character in the physics world
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) -> ColliderHandle {
        self.position = position;
        self.height = self.config.height;

        let collider = ColliderBuilder::new(self.capsule())
            .translation(to_vector(self.center_position()))
            .friction(0.0) // Smooth sliding against walls
            .restitution(0.0)
            .build();

        let handle = physics.add_static_collider(collider);
        self.collider_handle = Some(handle);
        handle
    }

    /// Borrow the controller together with the world it moves through
    pub fn bind<'a>(&'a mut self, physics: &'a mut PhysicsWorld) -> CharacterBody<'a> {
        CharacterBody {
            character: self,
            physics,
        }
    }

    /// Current capsule height
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Get the center position (middle of capsule)
    pub fn center_position(&self) -> Vec3 {
        self.position + UP * (self.height / 2.0)
    }

    /// Check if standing on ground
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn capsule(&self) -> SharedShape {
        let half_height = (self.height - 2.0 * self.config.radius) / 2.0;
        SharedShape::capsule_z(half_height.max(0.01), self.config.radius)
    }

    fn sync_collider(&self, physics: &mut PhysicsWorld) {
        let Some(handle) = self.collider_handle else {
            return;
        };
        if let Some(collider) = physics.collider_set.get_mut(handle) {
            collider.set_translation(to_vector(self.center_position()));
        }
    }

    /// Move the character with collision detection
    fn move_character(&mut self, physics: &mut PhysicsWorld, desired_translation: Vec3, dt: f32) {
        let Some(collider_handle) = self.collider_handle else {
            return;
        };

        let Some(collider) = physics.collider_set.get(collider_handle) else {
            return;
        };

        let shape = collider.shape();
        let center = self.center_position();
        let current_pos = Isometry::translation(center.x, center.y, center.z);

        let movement = self.controller.move_shape(
            dt,
            &physics.rigid_body_set,
            &physics.collider_set,
            &physics.query_pipeline,
            shape,
            &current_pos,
            to_vector(desired_translation),
            QueryFilter::default()
                .exclude_collider(collider_handle)
                .exclude_sensors(),
            |_| {},
        );

        self.grounded = movement.grounded;

        let effective = Vec3::new(
            movement.translation.x,
            movement.translation.y,
            movement.translation.z,
        );
        self.position += effective;

        // Clip velocity to what the sweep allowed so walls and ceilings absorb it
        if dt > 0.0 {
            let allowed = effective / dt;
            if desired_translation.x.abs() - effective.x.abs() > CLIP_EPSILON {
                self.velocity.x = allowed.x;
            }
            if desired_translation.y.abs() - effective.y.abs() > CLIP_EPSILON {
                self.velocity.y = allowed.y;
            }
            if desired_translation.z > 0.0 && effective.z < desired_translation.z * 0.5 {
                self.velocity.z = allowed.z.max(0.0);
            }
        }

        self.sync_collider(physics);
    }

    /// Set the character's position directly (teleport)
    pub fn set_position(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.position = position;
        self.sync_collider(physics);
    }
}

impl Default for CharacterController {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`CharacterController`] bound to its physics world for one tick
pub struct CharacterBody<'a> {
    character: &'a mut CharacterController,
    physics: &'a mut PhysicsWorld,
}

impl KinematicController for CharacterBody<'_> {
    fn is_grounded(&self) -> bool {
        self.character.grounded
    }

    fn velocity(&self) -> Vec3 {
        self.character.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.character.velocity = velocity;
    }

    fn height(&self) -> f32 {
        self.character.height
    }

    fn set_height(&mut self, height: f32) {
        self.character.height = height;
        let shape = self.character.capsule();
        let center = self.character.center_position();
        if let Some(handle) = self.character.collider_handle {
            if let Some(collider) = self.physics.collider_set.get_mut(handle) {
                collider.set_shape(shape);
                collider.set_translation(to_vector(center));
            }
        }
    }

    fn move_and_slide(&mut self, dt: f32) {
        let translation = self.character.velocity * dt;
        self.character.move_character(self.physics, translation, dt);
    }

    fn punch(&mut self, impulse: Vec3) {
        self.character.grounded = false;
        self.character.velocity += impulse;
    }

    fn acceleration(&self) -> f32 {
        self.character.config.acceleration
    }

    fn stop_speed(&self) -> f32 {
        self.character.config.stop_speed
    }
}

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_on_ground() -> (PhysicsWorld, CharacterController) {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        let mut character = CharacterController::new();
        character.spawn(&mut world, Vec3::new(0.0, 0.0, 1.0));
        world.refresh_queries();
        (world, character)
    }

    #[test]
    fn test_character_controller_config() {
        let config = CharacterControllerConfig::default();
        assert_eq!(config.height, 64.0);
        assert_eq!(config.radius, 16.0);
        assert_eq!(config.max_slope_angle, 45.0);
    }

    #[test]
    fn test_center_position() {
        let mut controller = CharacterController::new();
        controller.position = Vec3::new(0.0, 0.0, 10.0);
        assert_eq!(controller.center_position(), Vec3::new(0.0, 0.0, 42.0));
    }

    #[test]
    fn test_falls_onto_ground() {
        let (mut world, mut character) = spawn_on_ground();
        let mut body = character.bind(&mut world);
        body.set_velocity(Vec3::new(0.0, 0.0, -100.0));
        for _ in 0..10 {
            body.move_and_slide(1.0 / 60.0);
        }
        assert!(body.is_grounded());
        assert!(character.position.z > -1.0);
    }

    #[test]
    fn test_set_height_is_reversible() {
        let (mut world, mut character) = spawn_on_ground();
        let mut body = character.bind(&mut world);
        let original = body.height();
        body.set_height(original / 2.0);
        assert_eq!(body.height(), 32.0);
        body.set_height(body.height() * 2.0);
        assert_eq!(body.height(), original);
    }

    #[test]
    fn test_punch_leaves_ground() {
        let (mut world, mut character) = spawn_on_ground();
        character.grounded = true;
        let mut body = character.bind(&mut world);
        body.punch(Vec3::Z * 400.0);
        assert!(!body.is_grounded());
        assert_eq!(body.velocity().z, 400.0);
    }

    #[test]
    fn test_teleport_moves_collider() {
        let (mut world, mut character) = spawn_on_ground();
        let target = Vec3::new(100.0, -50.0, 0.0);
        character.set_position(&mut world, target);

        let handle = character.collider_handle.unwrap();
        let collider = world.get_collider(handle).unwrap();
        let center = collider.translation();
        assert_eq!(Vec3::new(center.x, center.y, center.z), target + Vec3::Z * 32.0);
    }
}
