//! Ground/air acceleration and friction
//!
//! Pure functions over velocities. The locomotion controller picks the control
//! factor for the current regime (ground or air); nothing here knows which one
//! it is running.

use glam::Vec3;

/// Speeds below this are treated as standing still by friction
pub const MIN_FRICTION_SPEED: f32 = 0.01;

/// Wish velocities shorter than this are treated as no input
pub const MIN_WISH_SPEED: f32 = 1e-4;

/// Accelerate `velocity` toward `wish_velocity`.
///
/// Only the component of velocity along the wish direction is considered, and
/// the added speed is capped so that component never exceeds the wish speed.
/// Velocity perpendicular to the wish direction is left for friction to bleed off.
pub fn accelerate(velocity: Vec3, wish_velocity: Vec3, control: f32, dt: f32) -> Vec3 {
    let wish_speed = wish_velocity.length();
    if wish_speed < MIN_WISH_SPEED {
        return velocity;
    }
    let wish_dir = wish_velocity / wish_speed;

    let current_speed = velocity.dot(wish_dir);
    let add_speed = wish_speed - current_speed;
    if add_speed <= 0.0 {
        return velocity;
    }

    let accel_speed = (control * dt * wish_speed).min(add_speed);
    velocity + wish_dir * accel_speed
}

/// Decay the speed of `velocity` toward zero.
///
/// Below `stop_speed` the drop is computed as if moving at `stop_speed`, so slow
/// movement comes to rest in finite time instead of creeping.
pub fn apply_friction(velocity: Vec3, control: f32, stop_speed: f32, dt: f32) -> Vec3 {
    let speed = velocity.length();
    if speed < MIN_FRICTION_SPEED {
        return velocity;
    }

    let control_speed = speed.max(stop_speed);
    let drop = control_speed * control * dt;
    let new_speed = (speed - drop).max(0.0);

    velocity * (new_speed / speed)
}

/// Limit an airborne wish velocity to `max_force` in length
pub fn clamp_air_wish(wish_velocity: Vec3, max_force: f32) -> Vec3 {
    wish_velocity.clamp_length_max(max_force.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accelerate_from_rest() {
        let v = accelerate(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 10.0, 0.01);
        // control * dt * wish_speed = 10 * 0.01 * 100
        assert!((v.x - 10.0).abs() < 1e-4);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_accelerate_never_overshoots() {
        let wish = Vec3::new(100.0, 0.0, 0.0);
        let mut v = Vec3::new(95.0, 0.0, 0.0);
        v = accelerate(v, wish, 10.0, 1.0);
        assert!((v.x - 100.0).abs() < 1e-4);

        // Already at wish speed: nothing added
        let again = accelerate(v, wish, 10.0, 1.0);
        assert_eq!(again, v);
    }

    #[test]
    fn test_accelerate_keeps_perpendicular_velocity() {
        let v = accelerate(
            Vec3::new(0.0, 50.0, 0.0),
            Vec3::new(100.0, 0.0, 0.0),
            10.0,
            0.01,
        );
        assert_eq!(v.y, 50.0);
        assert!(v.x > 0.0);
    }

    #[test]
    fn test_accelerate_zero_wish_is_noop() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        assert_eq!(accelerate(v, Vec3::ZERO, 10.0, 0.016), v);
    }

    #[test]
    fn test_friction_monotonic_and_non_negative() {
        let mut v = Vec3::new(300.0, -120.0, 0.0);
        let mut last = v.length();
        for _ in 0..500 {
            v = apply_friction(v, 4.0, 140.0, 1.0 / 60.0);
            let speed = v.length();
            assert!(speed <= last);
            assert!(speed >= 0.0);
            last = speed;
        }
        assert!(last < MIN_FRICTION_SPEED);
    }

    #[test]
    fn test_friction_zero_dt_is_identity() {
        let v = Vec3::new(10.0, 0.0, 0.0);
        assert_eq!(apply_friction(v, 4.0, 140.0, 0.0), v);
    }

    #[test]
    fn test_friction_preserves_direction() {
        let v = apply_friction(Vec3::new(200.0, 200.0, 0.0), 4.0, 140.0, 0.01);
        assert!((v.x - v.y).abs() < 1e-3);
        assert!(v.x < 200.0);
    }

    #[test]
    fn test_clamp_air_wish() {
        let clamped = clamp_air_wish(Vec3::new(290.0, 0.0, 0.0), 50.0);
        assert!((clamped.length() - 50.0).abs() < 1e-4);

        let short = Vec3::new(10.0, 0.0, 0.0);
        assert_eq!(clamp_air_wish(short, 50.0), short);
    }
}
