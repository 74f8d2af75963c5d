//! Strider Physics - Movement math and the kinematic world the rig moves through
//!
//! Provides the ground/air acceleration model, the capabilities the locomotion
//! core consumes (`KinematicController`, `OcclusionQuery`), and a rapier3d-backed
//! world and character controller implementing them.

pub mod accel;
mod character_controller;
mod kinematic;

pub use character_controller::{CharacterBody, CharacterController, CharacterControllerConfig};
pub use kinematic::{
    KinematicController, OcclusionQuery, TraceFilter, TraceResult, DEFAULT_ACCELERATION,
    DEFAULT_STOP_SPEED,
};
pub use rapier3d::prelude::ColliderHandle;

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

/// Physics world configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -800 units/s² on Z)
    pub gravity: Vec3,
    /// Physics timestep (default: 1/60)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, 0.0, -800.0),
            timestep: 1.0 / 60.0,
        }
    }
}

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Impulse joint storage
    pub impulse_joint_set: ImpulseJointSet,
    /// Multi-body joint storage
    pub multibody_joint_set: MultibodyJointSet,

    /// Integration parameters
    integration_parameters: IntegrationParameters,
    /// Physics pipeline
    physics_pipeline: PhysicsPipeline,
    /// Island manager
    island_manager: IslandManager,
    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,
    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,
    /// Continuous collision detection solver
    ccd_solver: CCDSolver,
    /// Query pipeline for raycasts and shape casts
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Step the physics simulation
    pub fn step(&mut self) {
        let gravity = vector![self.config.gravity.x, self.config.gravity.y, self.config.gravity.z];

        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        self.refresh_queries();
    }

    /// Rebuild the query acceleration structure after colliders changed
    pub fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, f32)> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline
            .cast_ray(&self.rigid_body_set, &self.collider_set, &ray, max_distance, true, filter)
    }

    /// Create a ground plane collider at height `z`
    pub fn create_ground(&mut self, z: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 0.0, 1.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, 0.0, z])
            .friction(0.7)
            .restitution(0.0)
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }

    /// Create a non-solid trigger volume
    pub fn create_trigger_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .sensor(true)
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl OcclusionQuery for PhysicsWorld {
    fn trace(&self, from: Vec3, to: Vec3, filter: TraceFilter) -> TraceResult {
        let delta = to - from;
        let length = delta.length();
        if length <= f32::EPSILON {
            return TraceResult::miss(to);
        }
        let direction = delta / length;

        let mut query = QueryFilter::default();
        if let Some(handle) = filter.ignore {
            query = query.exclude_collider(handle);
        }
        if filter.ignore_triggers {
            query = query.exclude_sensors();
        }

        match self.raycast(from, direction, length, query) {
            Some((_handle, toi)) => TraceResult::blocked(from + direction * toi),
            None => TraceResult::miss(to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_world_creation() {
        let world = PhysicsWorld::new();
        assert_eq!(world.config.gravity, Vec3::new(0.0, 0.0, -800.0));
    }

    #[test]
    fn test_ground_creation() {
        let mut world = PhysicsWorld::new();
        let ground = world.create_ground(0.0);
        assert!(world.get_collider(ground).is_some());
    }

    #[test]
    fn test_raycast() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        world.refresh_queries();

        let hit = world.raycast(
            Vec3::new(0.0, 0.0, 100.0),
            Vec3::new(0.0, 0.0, -1.0),
            1000.0,
            QueryFilter::default(),
        );
        assert!(hit.is_some());
    }

    #[test]
    fn test_trace_stops_at_wall() {
        let mut world = PhysicsWorld::new();
        world.create_static_box(Vec3::new(10.0, 100.0, 100.0), Vec3::new(-60.0, 0.0, 0.0));
        world.refresh_queries();

        let result = world.trace(Vec3::ZERO, Vec3::new(-150.0, 0.0, 0.0), TraceFilter::default());
        assert!(result.hit);
        assert!((result.hit_position.x + 50.0).abs() < 0.01);
        assert_eq!(result.end_position, result.hit_position);
    }

    #[test]
    fn test_trace_miss_reaches_end() {
        let world = PhysicsWorld::new();
        let to = Vec3::new(-150.0, 0.0, 0.0);
        let result = world.trace(Vec3::ZERO, to, TraceFilter::default());
        assert!(!result.hit);
        assert_eq!(result.end_position, to);
    }

    #[test]
    fn test_trace_ignores_triggers_and_self() {
        let mut world = PhysicsWorld::new();
        world.create_trigger_box(Vec3::splat(20.0), Vec3::new(-60.0, 0.0, 0.0));
        let own = world.create_static_box(Vec3::splat(5.0), Vec3::new(-10.0, 0.0, 0.0));
        world.refresh_queries();

        let from = Vec3::new(0.0, 0.0, 0.0);
        let to = Vec3::new(-150.0, 0.0, 0.0);
        let result = world.trace(from, to, TraceFilter::excluding(Some(own)));
        assert!(!result.hit);

        let blocked = world.trace(from, to, TraceFilter::default());
        assert!(blocked.hit);
    }
}
