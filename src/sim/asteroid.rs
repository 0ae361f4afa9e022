//! Asteroids and their size classes

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::entity::{Effects, Entity, EntityKind, Env, GameEvent};
use super::motion::Motion;
use super::outline::{ASTEROID_POINTS, ASTEROID_VARIETIES, Outline};
use crate::error::SimError;
use crate::tuning::Tuning;

/// Number of fragments a broken asteroid splits into
pub const FRAGMENTS: usize = 2;

/// Asteroid size class; the discriminant indexes the tuning tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AsteroidSize {
    Small = 0,
    Medium = 1,
    Large = 2,
}

impl AsteroidSize {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The next class down, or `None` for the smallest
    pub fn smaller(self) -> Option<Self> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

impl TryFrom<u8> for AsteroidSize {
    type Error = SimError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AsteroidSize::Small),
            1 => Ok(AsteroidSize::Medium),
            2 => Ok(AsteroidSize::Large),
            other => Err(SimError::InvalidAsteroidSize(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub size: AsteroidSize,
    pub variety: usize,
    pub outline: Outline,
}

impl Asteroid {
    pub fn new(size: AsteroidSize, variety: usize, tuning: &Tuning) -> Self {
        let variety = variety % ASTEROID_VARIETIES;
        Self {
            size,
            variety,
            outline: Outline::scaled(ASTEROID_POINTS[variety], tuning.asteroid_scale[size.index()]),
        }
    }

    /// An asteroid at `position` moving at `speed` along `direction`
    pub fn spawn(
        size: AsteroidSize,
        variety: usize,
        position: Vec2,
        speed: f32,
        direction: f32,
        rotation: f32,
        tuning: &Tuning,
    ) -> Entity {
        let mut motion = Motion::at(position);
        motion.set_velocity(speed, direction);
        motion.set_rotation(rotation);
        Entity::new(motion, EntityKind::Asteroid(Self::new(size, variety, tuning)))
    }

    /// Report the loss and break into smaller fragments, if any
    pub(crate) fn on_destroyed(&self, position: Vec2, env: &mut Env<'_>, fx: &mut Effects) {
        fx.events.push(GameEvent::AsteroidDestroyed { size: self.size });

        let Some(child) = self.size.smaller() else {
            return;
        };
        let max_speed = env.tuning.asteroid_max_speed[child.index()].max(1.0);
        for _ in 0..FRAGMENTS {
            let variety = env.rng.random_range(0..ASTEROID_VARIETIES);
            let speed = env.rng.random_range(1.0..=max_speed);
            let direction = env.rng.random_range(0.0..TAU);
            let rotation = env.rng.random_range(0.0..TAU);
            fx.spawned.push(Self::spawn(child, variety, position, speed, direction, rotation, env.tuning));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Category;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_size_from_u8() {
        assert_eq!(AsteroidSize::try_from(2).unwrap(), AsteroidSize::Large);
        let err = AsteroidSize::try_from(3).unwrap_err();
        assert!(matches!(err, SimError::InvalidAsteroidSize(3)));
    }

    #[test]
    fn test_large_splits_into_two_mediums() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut env = Env {
            tuning: &tuning,
            rng: &mut rng,
            ship_position: None,
        };
        let mut fx = Effects::default();

        Asteroid::new(AsteroidSize::Large, 1, &tuning).on_destroyed(Vec2::splat(300.0), &mut env, &mut fx);

        assert_eq!(fx.events, vec![GameEvent::AsteroidDestroyed { size: AsteroidSize::Large }]);
        assert_eq!(fx.spawned.len(), FRAGMENTS);
        for child in &fx.spawned {
            assert_eq!(child.category(), Category::Asteroid);
            let EntityKind::Asteroid(asteroid) = &child.kind else {
                panic!("fragment is not an asteroid");
            };
            assert_eq!(asteroid.size, AsteroidSize::Medium);
            assert!(child.motion.speed() >= 1.0);
            assert!(child.motion.speed() <= tuning.asteroid_max_speed[1]);
        }
    }

    #[test]
    fn test_small_leaves_nothing() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut env = Env {
            tuning: &tuning,
            rng: &mut rng,
            ship_position: None,
        };
        let mut fx = Effects::default();

        Asteroid::new(AsteroidSize::Small, 0, &tuning).on_destroyed(Vec2::ZERO, &mut env, &mut fx);
        assert!(fx.spawned.is_empty());
        assert_eq!(fx.events.len(), 1);
    }

    #[test]
    fn test_outline_scales_with_size() {
        let tuning = Tuning::default();
        let small = Asteroid::new(AsteroidSize::Small, 2, &tuning);
        let large = Asteroid::new(AsteroidSize::Large, 2, &tuning);
        for (l, s) in large.outline.points().iter().zip(small.outline.points()) {
            assert!((*l - *s * 4.0).length() < 1e-4);
        }
    }
}
