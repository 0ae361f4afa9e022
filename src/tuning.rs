//! Data-driven game balance
//!
//! Every physics, scoring and timing constant the simulation reads. Loaded from
//! JSON (missing fields fall back to [`crate::consts`]) and passed down explicitly;
//! nothing in the simulation reads a global.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

/// Simulation tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    /// Side length of the torus-wrapped playfield
    pub playfield_size: f32,
    /// Inset of the opening asteroids from each corner
    pub edge_offset: f32,
    /// Simulated milliseconds that elapse per tick
    pub frame_interval_ms: u64,

    // === Ship ===
    pub ship_acceleration: f32,
    /// Speed multiplier applied every tick (drag)
    pub ship_friction: f32,
    pub ship_max_speed: f32,
    /// Radians turned per tick while a turn intent is held
    pub ship_turn_step: f32,
    pub start_lives: u32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_duration_ms: u64,
    /// Maximum concurrent ship bullets
    pub bullet_limit: usize,

    // === Asteroids (indexed small, medium, large) ===
    pub asteroid_scale: [f32; 3],
    pub asteroid_max_speed: [f32; 3],
    pub asteroid_score: [u32; 3],
    pub opening_asteroid_speed: f32,

    // === Raider (indexed large, small) ===
    pub raider_scale: [f32; 2],
    pub raider_speed: [f32; 2],
    pub raider_score: [u32; 2],
    pub raider_shot_interval_ms: u64,
    pub raider_course_interval_ms: u64,

    // === Director delays ===
    /// Delay after a ship loss or a cleared field
    pub end_delay_ms: u64,
    /// Grace period after a ship is placed
    pub respawn_grace_ms: u64,
    /// Delay before the next raider after one is destroyed
    pub raider_delay_ms: u64,

    // === Debris ===
    pub debris_min_ms: u64,
    pub debris_jitter_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_size: SIZE,
            edge_offset: EDGE_OFFSET,
            frame_interval_ms: FRAME_INTERVAL_MS,

            ship_acceleration: SHIP_ACCELERATION,
            ship_friction: SHIP_FRICTION,
            ship_max_speed: SHIP_MAX_SPEED,
            ship_turn_step: SHIP_TURN_STEP,
            start_lives: START_LIVES,

            bullet_speed: BULLET_SPEED,
            bullet_duration_ms: BULLET_DURATION_MS,
            bullet_limit: BULLET_LIMIT,

            asteroid_scale: ASTEROID_SCALE,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            asteroid_score: ASTEROID_SCORE,
            opening_asteroid_speed: OPENING_ASTEROID_SPEED,

            raider_scale: RAIDER_SCALE,
            raider_speed: RAIDER_SPEED,
            raider_score: RAIDER_SCORE,
            raider_shot_interval_ms: RAIDER_SHOT_INTERVAL_MS,
            raider_course_interval_ms: RAIDER_COURSE_INTERVAL_MS,

            end_delay_ms: END_DELAY_MS,
            respawn_grace_ms: RESPAWN_GRACE_MS,
            raider_delay_ms: RAIDER_DELAY_MS,

            debris_min_ms: DEBRIS_MIN_MS,
            debris_jitter_ms: DEBRIS_JITTER_MS,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f32) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SimError::InvalidTuning(format!("{name} must be positive, got {value}")))
            }
        }

        positive("playfield_size", self.playfield_size)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("ship_max_speed", self.ship_max_speed)?;
        for (size, &scale) in self.asteroid_scale.iter().enumerate() {
            positive(&format!("asteroid_scale[{size}]"), scale)?;
        }
        for (size, &scale) in self.raider_scale.iter().enumerate() {
            positive(&format!("raider_scale[{size}]"), scale)?;
        }

        if self.edge_offset < 0.0 || self.edge_offset * 2.0 > self.playfield_size {
            return Err(SimError::InvalidTuning(format!(
                "edge_offset {} does not fit a playfield of {}",
                self.edge_offset, self.playfield_size
            )));
        }
        if !(0.0..=1.0).contains(&self.ship_friction) {
            return Err(SimError::InvalidTuning(format!(
                "ship_friction must be within [0, 1], got {}",
                self.ship_friction
            )));
        }
        if self.frame_interval_ms == 0 {
            return Err(SimError::InvalidTuning("frame_interval_ms must be non-zero".into()));
        }
        if self.bullet_limit == 0 {
            return Err(SimError::InvalidTuning("bullet_limit must be non-zero".into()));
        }
        if self.start_lives == 0 {
            return Err(SimError::InvalidTuning("start_lives must be non-zero".into()));
        }
        Ok(())
    }

    /// Playfield center
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::splat(self.playfield_size / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "bullet_limit": 3, "playfield_size": 500.0 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.bullet_limit, 3);
        assert_eq!(tuning.playfield_size, 500.0);
        assert_eq!(tuning.start_lives, START_LIVES);
    }

    #[test]
    fn test_rejects_zero_bullet_limit() {
        let err = Tuning::from_json(r#"{ "bullet_limit": 0 }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidTuning(_)));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SimError::Parse(_)));
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let mut tuning = Tuning::default();
        tuning.ship_friction = 0.9;
        let json = tuning.to_json().expect("serializes");
        assert_eq!(Tuning::from_json(&json).expect("parses"), tuning);
    }
}
