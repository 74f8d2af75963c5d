//! Camera rig with mouse look, occlusion-aware follow distance and crouch dip

use glam::{Mat4, Quat, Vec2, Vec3};
use strider_core::{LookAngles, Transform, UP};
use strider_physics::{ColliderHandle, OcclusionQuery, TraceFilter};
use tracing::debug;

use crate::input::{InputAction, InputSource};
use crate::player::{BodyNode, RenderMode};

use super::{CameraConfig, CameraConfigError};

/// Camera mode (first-person or third-person)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    /// Camera at the head anchor
    FirstPerson,
    /// Camera behind the head anchor
    ThirdPerson { distance: f32 },
}

impl CameraMode {
    /// Follow distance (0 for first-person)
    pub fn distance(&self) -> f32 {
        match self {
            CameraMode::FirstPerson => 0.0,
            CameraMode::ThirdPerson { distance } => *distance,
        }
    }

    /// Check if in first-person mode
    pub fn is_first_person(&self) -> bool {
        matches!(self, CameraMode::FirstPerson)
    }

    fn from_distance(distance: f32) -> Self {
        if distance > 0.0 {
            CameraMode::ThirdPerson { distance }
        } else {
            CameraMode::FirstPerson
        }
    }
}

/// Per-character camera.
///
/// Owns no look state of its own: each update integrates the look delta into
/// the caller's [`LookAngles`] and derives the camera transform from it.
pub struct CameraRig {
    /// Configuration
    pub config: CameraConfig,
    mode: CameraMode,
    /// Collider skipped by the occlusion trace
    ignore: Option<ColliderHandle>,
    /// Smoothed vertical offset
    offset: Vec3,
    /// Distance actually used after occlusion
    resolved_distance: f32,
    transform: Transform,
}

impl CameraRig {
    /// Create a camera rig with the default config
    pub fn new() -> Self {
        Self::from_valid_config(CameraConfig::default())
    }

    /// Create a camera rig with a custom config
    pub fn with_config(config: CameraConfig) -> Result<Self, CameraConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: CameraConfig) -> Self {
        let distance = config.follow_distance.clamp(0.0, config.max_follow_distance);
        Self {
            mode: CameraMode::from_distance(distance),
            config,
            ignore: None,
            offset: Vec3::ZERO,
            resolved_distance: 0.0,
            transform: Transform::default(),
        }
    }

    /// Skip `collider` when tracing for occlusion (the controlled character)
    pub fn track_collider(&mut self, collider: Option<ColliderHandle>) {
        self.ignore = collider;
    }

    /// Current camera mode
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Requested follow distance (0 = first person)
    pub fn follow_distance(&self) -> f32 {
        self.mode.distance()
    }

    /// Set the follow distance, clamped to `[0, max_follow_distance]`
    pub fn set_follow_distance(&mut self, distance: f32) {
        let distance = distance.clamp(0.0, self.config.max_follow_distance);
        let mode = CameraMode::from_distance(distance);
        if mode.is_first_person() != self.mode.is_first_person() {
            debug!(distance, "camera perspective changed");
        }
        self.mode = mode;
    }

    /// Swap between first person and the configured third-person distance
    pub fn toggle_perspective(&mut self) {
        if self.mode.is_first_person() {
            self.set_follow_distance(self.config.third_person_distance);
        } else {
            self.set_follow_distance(0.0);
        }
    }

    /// Integrate a look delta into `look`, clamping pitch and zeroing roll
    pub fn handle_mouse_look(&self, delta: Vec2, look: &mut LookAngles) {
        look.yaw -= delta.x * self.config.sensitivity;
        look.pitch += delta.y * self.config.sensitivity;
        *look = look.clamped(self.config.pitch_limit);
    }

    /// Head anchor for a character standing at `feet`
    pub fn head_anchor(&self, feet: Vec3) -> Vec3 {
        feet + UP * self.config.eye_height
    }

    /// Camera transform from the last update
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Camera world position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Camera world rotation
    pub fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    /// Smoothed crouch offset
    pub fn current_offset(&self) -> Vec3 {
        self.offset
    }

    /// Distance from the head anchor after occlusion (0 in first person)
    pub fn resolved_distance(&self) -> f32 {
        self.resolved_distance
    }

    /// View matrix for the current transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.transform.position, self.transform.forward(), UP)
    }

    /// Update the camera (call each visual frame).
    ///
    /// Writes the integrated look back into `look`, switches the body's render
    /// mode for the current perspective and returns the camera transform.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        input: &dyn InputSource,
        look: &mut LookAngles,
        head_position: Vec3,
        crouching: bool,
        occlusion: Option<&dyn OcclusionQuery>,
        body: &mut dyn BodyNode,
        dt: f32,
    ) -> Transform {
        if input.pressed(InputAction::View) {
            self.toggle_perspective();
        }

        self.handle_mouse_look(input.look_delta(), look);
        let rotation = look.to_rotation();

        let mut position = match self.mode {
            CameraMode::FirstPerson => {
                body.set_render_mode(RenderMode::ShadowsOnly);
                self.resolved_distance = 0.0;
                head_position
            }
            CameraMode::ThirdPerson { distance } => {
                body.set_render_mode(RenderMode::On);
                let end = head_position - look.forward() * distance;
                let position = match occlusion {
                    Some(world) => {
                        world
                            .trace(head_position, end, TraceFilter::excluding(self.ignore))
                            .end_position
                    }
                    None => end,
                };
                self.resolved_distance = head_position.distance(position);
                position
            }
        };

        let target = if crouching {
            -UP * self.config.crouch_offset
        } else {
            Vec3::ZERO
        };
        let t = (self.config.offset_smoothing * dt).clamp(0.0, 1.0);
        self.offset = self.offset.lerp(target, t);
        position += self.offset;

        self.transform = Transform::from_position_rotation(position, rotation);
        self.transform
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use crate::player::VisualBody;
    use std::cell::Cell;
    use strider_physics::TraceResult;

    const DT: f32 = 1.0 / 60.0;

    /// Occlusion query that reports a wall at a fixed distance along any trace
    struct FixedTrace {
        wall_at: Option<f32>,
        last_filter: Cell<Option<TraceFilter>>,
    }

    impl FixedTrace {
        fn wall(distance: f32) -> Self {
            Self {
                wall_at: Some(distance),
                last_filter: Cell::new(None),
            }
        }

        fn open() -> Self {
            Self {
                wall_at: None,
                last_filter: Cell::new(None),
            }
        }
    }

    impl OcclusionQuery for FixedTrace {
        fn trace(&self, from: Vec3, to: Vec3, filter: TraceFilter) -> TraceResult {
            self.last_filter.set(Some(filter));
            let length = from.distance(to);
            match self.wall_at {
                Some(d) if d < length => TraceResult::blocked(from + (to - from) / length * d),
                _ => TraceResult::miss(to),
            }
        }
    }

    fn third_person(distance: f32) -> CameraRig {
        let mut rig = CameraRig::new();
        rig.set_follow_distance(distance);
        rig
    }

    #[test]
    fn test_pitch_clamped_for_huge_deltas() {
        let rig = CameraRig::new();
        let mut look = LookAngles::ZERO;

        for _ in 0..100 {
            rig.handle_mouse_look(Vec2::new(0.0, 1.0e6), &mut look);
        }
        assert_eq!(look.pitch, 89.9);

        for _ in 0..100 {
            rig.handle_mouse_look(Vec2::new(0.0, -1.0e6), &mut look);
        }
        assert_eq!(look.pitch, -89.9);
    }

    #[test]
    fn test_pitch_uses_configured_limit() {
        let rig = CameraRig::with_config(CameraConfig {
            pitch_limit: 45.0,
            ..Default::default()
        })
        .unwrap();
        let mut look = LookAngles::ZERO;
        rig.handle_mouse_look(Vec2::new(0.0, 5000.0), &mut look);
        assert_eq!(look.pitch, 45.0);
    }

    #[test]
    fn test_mouse_look_directions() {
        let rig = CameraRig::new();
        let mut look = LookAngles::new(0.0, 0.0, 5.0);
        rig.handle_mouse_look(Vec2::new(10.0, 20.0), &mut look);

        // Mouse right turns right (negative yaw), mouse down looks down
        assert!((look.yaw - -1.0).abs() < 1e-5);
        assert!((look.pitch - 2.0).abs() < 1e-5);
        assert_eq!(look.roll, 0.0);
    }

    #[test]
    fn test_first_person_at_eye() {
        let mut rig = CameraRig::new();
        let mut body = VisualBody::default();
        let mut look = LookAngles::new(10.0, 45.0, 0.0);
        let head = Vec3::new(1.0, 2.0, 64.0);

        let transform = rig.update(&InputState::new(), &mut look, head, false, None, &mut body, DT);

        assert_eq!(transform.position, head);
        assert_eq!(transform.rotation, look.to_rotation());
        assert_eq!(body.render_mode, RenderMode::ShadowsOnly);
        assert_eq!(rig.resolved_distance(), 0.0);
    }

    #[test]
    fn test_third_person_blocked_by_wall() {
        let mut rig = third_person(150.0);
        rig.track_collider(Some(ColliderHandle::from_raw_parts(3, 0)));
        let mut body = VisualBody::default();
        let mut look = LookAngles::ZERO;
        let head = Vec3::new(0.0, 0.0, 64.0);
        let trace = FixedTrace::wall(60.0);

        let transform = rig.update(
            &InputState::new(),
            &mut look,
            head,
            false,
            Some(&trace),
            &mut body,
            DT,
        );

        assert!((rig.resolved_distance() - 60.0).abs() < 1e-3);
        assert!((transform.position - Vec3::new(-60.0, 0.0, 64.0)).length() < 1e-3);
        assert_eq!(body.render_mode, RenderMode::On);

        let filter = trace.last_filter.get().unwrap();
        assert_eq!(filter.ignore, Some(ColliderHandle::from_raw_parts(3, 0)));
        assert!(filter.ignore_triggers);
    }

    #[test]
    fn test_third_person_unobstructed() {
        let mut rig = third_person(150.0);
        let mut body = VisualBody::default();
        let mut look = LookAngles::from_yaw(90.0);
        let head = Vec3::new(0.0, 0.0, 64.0);

        let transform = rig.update(
            &InputState::new(),
            &mut look,
            head,
            false,
            Some(&FixedTrace::open()),
            &mut body,
            DT,
        );

        assert!((rig.resolved_distance() - 150.0).abs() < 1e-3);
        // Looking along +Y puts the camera behind on -Y
        assert!((transform.position - Vec3::new(0.0, -150.0, 64.0)).length() < 1e-3);
    }

    #[test]
    fn test_missing_occlusion_uses_full_distance() {
        let mut rig = third_person(100.0);
        let mut body = VisualBody::default();
        let mut look = LookAngles::ZERO;
        rig.update(&InputState::new(), &mut look, Vec3::ZERO, false, None, &mut body, DT);
        assert!((rig.resolved_distance() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_crouch_offset_converges() {
        let mut rig = CameraRig::new();
        let mut body = VisualBody::default();
        let mut look = LookAngles::ZERO;
        let input = InputState::new();
        let head = Vec3::new(0.0, 0.0, 64.0);

        let first = rig.update(&input, &mut look, head, true, None, &mut body, DT);
        assert!(first.position.z < 64.0);
        assert!(first.position.z > 64.0 - 32.0);

        for _ in 0..240 {
            rig.update(&input, &mut look, head, true, None, &mut body, DT);
        }
        assert!((rig.current_offset().z - -32.0).abs() < 1e-3);
        assert!((rig.position().z - 32.0).abs() < 1e-3);

        // Long frames snap instead of overshooting
        rig.update(&input, &mut look, head, false, None, &mut body, 1.0);
        assert_eq!(rig.current_offset(), Vec3::ZERO);
    }

    #[test]
    fn test_follow_distance_clamped() {
        let mut rig = CameraRig::new();
        rig.set_follow_distance(5000.0);
        assert_eq!(rig.follow_distance(), 1000.0);

        rig.set_follow_distance(-10.0);
        assert_eq!(rig.follow_distance(), 0.0);
        assert!(rig.mode().is_first_person());
    }

    #[test]
    fn test_view_action_toggles_perspective() {
        let mut rig = CameraRig::new();
        let mut body = VisualBody::default();
        let mut look = LookAngles::ZERO;
        let mut input = InputState::new();
        input.press(InputAction::View);

        rig.update(&input, &mut look, Vec3::ZERO, false, None, &mut body, DT);
        assert_eq!(rig.mode(), CameraMode::ThirdPerson { distance: 150.0 });
        assert_eq!(body.render_mode, RenderMode::On);

        rig.update(&input, &mut look, Vec3::ZERO, false, None, &mut body, DT);
        assert!(rig.mode().is_first_person());
        assert_eq!(body.render_mode, RenderMode::ShadowsOnly);
    }

    #[test]
    fn test_update_writes_look_back() {
        let mut rig = CameraRig::new();
        let mut body = VisualBody::default();
        let mut look = LookAngles::ZERO;
        let mut input = InputState::new();
        input.add_look_delta(Vec2::new(-100.0, 0.0));

        let transform = rig.update(&input, &mut look, Vec3::ZERO, false, None, &mut body, DT);
        assert!((look.yaw - 10.0).abs() < 1e-4);
        assert_eq!(transform.rotation, LookAngles::from_yaw(10.0).to_rotation());
    }

    #[test]
    fn test_view_matrix_looks_forward() {
        let mut rig = CameraRig::new();
        let mut body = VisualBody::default();
        let mut look = LookAngles::ZERO;
        rig.update(&InputState::new(), &mut look, Vec3::ZERO, false, None, &mut body, DT);

        // A point straight ahead lands on the view axis, in front of the camera
        let ahead = rig.view_matrix().transform_point3(Vec3::new(10.0, 0.0, 0.0));
        assert!(ahead.x.abs() < 1e-4 && ahead.y.abs() < 1e-4);
        assert!(ahead.z < 0.0);
    }

    #[test]
    fn test_head_anchor() {
        let rig = CameraRig::new();
        assert_eq!(rig.head_anchor(Vec3::new(1.0, 1.0, 0.0)), Vec3::new(1.0, 1.0, 64.0));
    }

    #[test]
    fn test_with_config_validates() {
        let bad = CameraConfig {
            offset_smoothing: -1.0,
            ..Default::default()
        };
        assert!(CameraRig::with_config(bad).is_err());
    }
}
