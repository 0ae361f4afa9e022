//! Polar motion state shared by every entity
//!
//! Velocity is kept as (speed, direction). Anything that changes velocity by
//! adding a vector (thrust) composes in cartesian space and converts back, so
//! existing momentum is preserved.

use glam::Vec2;

use crate::{cartesian_to_polar, normalize_angle, polar_to_cartesian, wrap_coordinate};

/// Position, polar velocity and facing of an entity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motion {
    /// Playfield position, wrapped into [0, size) after every move
    pub position: Vec2,
    /// Scalar speed (units per tick, never negative)
    speed: f32,
    /// Direction of travel (radians)
    direction: f32,
    /// Facing (radians), independent of direction of travel
    rotation: f32,
}

impl Motion {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    /// Set velocity from speed and direction; negative speeds flip direction
    pub fn set_velocity(&mut self, speed: f32, direction: f32) {
        if speed < 0.0 {
            self.speed = -speed;
            self.direction = normalize_angle(direction + std::f32::consts::PI);
        } else {
            self.speed = speed;
            self.direction = normalize_angle(direction);
        }
    }

    pub fn set_direction(&mut self, direction: f32) {
        self.direction = normalize_angle(direction);
    }

    pub fn set_rotation(&mut self, theta: f32) {
        self.rotation = normalize_angle(theta);
    }

    pub fn rotate(&mut self, delta: f32) {
        self.rotation = normalize_angle(self.rotation + delta);
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn direction(&self) -> f32 {
        self.direction
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Velocity as a cartesian vector
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        polar_to_cartesian(self.speed, self.direction)
    }

    /// Thrust: add `delta` along the current rotation to the velocity
    pub fn accelerate(&mut self, delta: f32) {
        let combined = self.velocity() + polar_to_cartesian(delta, self.rotation);
        let (speed, direction) = cartesian_to_polar(combined);
        self.speed = speed;
        // A zero vector has no heading; keep the old one
        if speed > f32::EPSILON {
            self.direction = normalize_angle(direction);
        }
    }

    /// Drag: scale speed by `factor` (expected in [0, 1])
    pub fn apply_friction(&mut self, factor: f32) {
        self.speed = (self.speed * factor).max(0.0);
    }

    /// Clamp speed to `max`
    pub fn limit_speed(&mut self, max: f32) {
        self.speed = self.speed.min(max);
    }

    /// Advance one tick and wrap onto the torus
    pub fn advance(&mut self, size: f32) {
        let next = self.position + self.velocity();
        self.position = Vec2::new(wrap_coordinate(next.x, size), wrap_coordinate(next.y, size));
    }

    /// Map a point from local coordinates into the playfield
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        self.position + Vec2::from_angle(self.rotation).rotate(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const SIZE: f32 = 750.0;

    #[test]
    fn test_thrust_adds_to_existing_velocity() {
        let mut motion = Motion::default();
        motion.set_velocity(3.0, 0.0);
        motion.set_rotation(FRAC_PI_2);
        motion.accelerate(4.0);

        // 3 along x + 4 along y
        assert!((motion.speed() - 5.0).abs() < 1e-4);
        let v = motion.velocity();
        assert!((v.x - 3.0).abs() < 1e-4);
        assert!((v.y - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_opposing_thrust_slows_down() {
        let mut motion = Motion::default();
        motion.set_velocity(5.0, 0.0);
        motion.set_rotation(PI);
        motion.accelerate(2.0);
        assert!((motion.speed() - 3.0).abs() < 1e-4);
        assert!(motion.direction().abs() < 1e-4);
    }

    #[test]
    fn test_friction_shrinks_speed() {
        let mut motion = Motion::default();
        motion.set_velocity(10.0, 1.0);
        motion.apply_friction(0.5);
        assert!((motion.speed() - 5.0).abs() < 1e-6);
        assert!((motion.direction() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_speed_flips_direction() {
        let mut motion = Motion::default();
        motion.set_velocity(-2.0, 0.0);
        assert_eq!(motion.speed(), 2.0);
        assert!((motion.velocity().x + 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_advance_wraps_near_edge() {
        let mut motion = Motion::at(Vec2::new(0.5, 400.0));
        motion.set_velocity(1.0, PI);
        motion.advance(SIZE);
        assert!(motion.position.x > SIZE - 1.0);
        assert!(motion.position.x < SIZE);
        assert!((motion.position.y - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_to_world_applies_rotation_then_translation() {
        let mut motion = Motion::at(Vec2::new(100.0, 100.0));
        motion.set_rotation(FRAC_PI_2);
        let nose = motion.to_world(Vec2::new(20.0, 0.0));
        assert!((nose.x - 100.0).abs() < 1e-4);
        assert!((nose.y - 120.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_advance_stays_on_torus(
            x in -5000.0f32..5000.0,
            y in -5000.0f32..5000.0,
            speed in 0.0f32..50.0,
            direction in -10.0f32..10.0,
        ) {
            let mut motion = Motion::at(Vec2::new(x, y));
            motion.set_velocity(speed, direction);
            motion.advance(SIZE);
            prop_assert!(motion.position.x >= 0.0 && motion.position.x < SIZE);
            prop_assert!(motion.position.y >= 0.0 && motion.position.y < SIZE);
        }

        #[test]
        fn prop_small_negative_move_reappears_opposite(eps in 0.0f32..0.5, step in 0.8f32..2.0) {
            let mut motion = Motion::at(Vec2::new(eps, eps));
            motion.set_velocity(step, -3.0 * PI / 4.0);
            motion.advance(SIZE);
            prop_assert!(motion.position.x > SIZE - 2.0);
            prop_assert!(motion.position.y > SIZE - 2.0);
        }
    }
}
