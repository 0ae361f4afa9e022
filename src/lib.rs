//! Rock Storm - a wrap-around arcade space combat simulation
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (motion, collisions, deferred timers, game director)
//! - `tuning`: Data-driven game balance
//! - `display`: Score/lives/level/legend sinks
//! - `error`: Construction and configuration errors

pub mod display;
pub mod error;
pub mod sim;
pub mod tuning;

pub use display::{DisplaySink, HudState, LogDisplay};
pub use error::{Result, SimError};
pub use tuning::Tuning;

use glam::Vec2;

/// Default game constants (overridable through [`Tuning`])
pub mod consts {
    use std::f32::consts::PI;

    /// Side length of the square, torus-wrapped playfield
    pub const SIZE: f32 = 750.0;
    /// Distance from the edges at which the opening asteroids are placed
    pub const EDGE_OFFSET: f32 = 100.0;
    /// Simulated milliseconds per tick (~30 Hz)
    pub const FRAME_INTERVAL_MS: u64 = 33;

    /// Ship defaults
    pub const SHIP_ACCELERATION: f32 = 0.4;
    pub const SHIP_FRICTION: f32 = 0.98;
    pub const SHIP_MAX_SPEED: f32 = 12.0;
    pub const SHIP_TURN_STEP: f32 = PI / 16.0;
    pub const START_LIVES: u32 = 3;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 15.0;
    pub const BULLET_DURATION_MS: u64 = 1000;
    pub const BULLET_LIMIT: usize = 8;

    /// Asteroid tables, indexed by size class (small, medium, large)
    pub const ASTEROID_SCALE: [f32; 3] = [0.5, 1.0, 2.0];
    pub const ASTEROID_MAX_SPEED: [f32; 3] = [7.0, 5.0, 3.0];
    pub const ASTEROID_SCORE: [u32; 3] = [100, 50, 20];
    /// Speed of the four asteroids that open every level
    pub const OPENING_ASTEROID_SPEED: f32 = 3.0;

    /// Raider tables, indexed by size class (large, small)
    pub const RAIDER_SCALE: [f32; 2] = [1.0, 0.5];
    pub const RAIDER_SPEED: [f32; 2] = [4.0, 5.0];
    pub const RAIDER_SCORE: [u32; 2] = [200, 1000];
    pub const RAIDER_SHOT_INTERVAL_MS: u64 = 1500;
    pub const RAIDER_COURSE_INTERVAL_MS: u64 = 1000;

    /// Director transition delays
    pub const END_DELAY_MS: u64 = 2500;
    pub const RESPAWN_GRACE_MS: u64 = 5000;
    pub const RAIDER_DELAY_MS: u64 = 2000;

    /// Debris lifetime is DEBRIS_MIN_MS + rand(0..DEBRIS_JITTER_MS)
    pub const DEBRIS_MIN_MS: u64 = 1500;
    pub const DEBRIS_JITTER_MS: u64 = 500;

    /// Legends shown by the director
    pub const TITLE_LEGEND: &str = "Asteroids";
    pub const GAME_OVER_LEGEND: &str = "Game Over";
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

/// Wrap a coordinate onto the torus [0, size)
#[inline]
pub fn wrap_coordinate(value: f32, size: f32) -> f32 {
    let wrapped = value.rem_euclid(size);
    // rem_euclid rounds tiny negative inputs up to exactly `size`
    if wrapped >= size { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(1.5 * PI) + PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 1e-6);
        assert!((normalize_angle(2.0 * PI + 0.25) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_polar_roundtrip_direction() {
        let v = polar_to_cartesian(10.0, PI / 2.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 10.0).abs() < 1e-5);
        let (r, theta) = cartesian_to_polar(v);
        assert!((r - 10.0).abs() < 1e-5);
        assert!((theta - PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_wrap_coordinate_edges() {
        assert_eq!(wrap_coordinate(0.0, 750.0), 0.0);
        assert_eq!(wrap_coordinate(750.0, 750.0), 0.0);
        assert!((wrap_coordinate(-1.0, 750.0) - 749.0).abs() < 1e-4);
        assert!((wrap_coordinate(751.5, 750.0) - 1.5).abs() < 1e-4);
        let tiny = wrap_coordinate(-1e-9, 750.0);
        assert!((0.0..750.0).contains(&tiny));
    }
}
