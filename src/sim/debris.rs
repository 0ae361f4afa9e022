//! Destruction debris
//!
//! Purely visual line segments. They drift, spin to a random angle and
//! expire after a randomized lifetime; the tag table gives them no part in
//! collision outcomes.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityKind};
use super::motion::Motion;
use super::outline::Outline;
use crate::tuning::Tuning;

/// Maximum positional jitter around the wreck, per axis
const JITTER: f32 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Debris {
    pub outline: Outline,
}

impl Debris {
    /// A line of `length` near `origin`, drifting slowly in a random direction
    pub fn spawn(origin: Vec2, length: f32, rng: &mut Pcg32) -> Entity {
        let offset = Vec2::new(rng.random_range(-JITTER..=JITTER), rng.random_range(-JITTER..=JITTER));
        let mut motion = Motion::at(origin + offset);
        motion.set_rotation(rng.random_range(0.0..TAU));
        motion.set_velocity(rng.random::<f32>(), rng.random_range(0.0..TAU));
        Entity::new(
            motion,
            EntityKind::Debris(Self {
                outline: Outline::segment(length),
            }),
        )
    }

    /// Randomized lifetime in `[debris_min_ms, debris_min_ms + debris_jitter_ms]`
    pub fn lifetime_ms(tuning: &Tuning, rng: &mut Pcg32) -> u64 {
        tuning
            .debris_min_ms
            .saturating_add(rng.random_range(0..=tuning.debris_jitter_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_debris_stays_near_wreck() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let debris = Debris::spawn(Vec2::splat(200.0), 20.0, &mut rng);
            let offset = debris.motion.position - Vec2::splat(200.0);
            assert!(offset.x.abs() <= JITTER && offset.y.abs() <= JITTER);
            assert!(debris.motion.speed() < 1.0);
        }
    }

    #[test]
    fn test_lifetime_range() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let ms = Debris::lifetime_ms(&tuning, &mut rng);
            assert!((1500..=2000).contains(&ms));
        }
    }

    #[test]
    fn test_lifetime_saturates() {
        let tuning = Tuning {
            debris_min_ms: u64::MAX - 1,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(12);
        for _ in 0..20 {
            assert!(Debris::lifetime_ms(&tuning, &mut rng) >= u64::MAX - 1);
        }
    }
}
