//! Straight-line shots with a fixed lifetime
//!
//! Both kinds share one payload; the [`EntityKind`] variant decides which
//! destroyer tags they carry. Expiry comes from the `Expire` timer armed when
//! the bullet joins the registry.

use glam::Vec2;

use super::entity::{Entity, EntityKind};
use super::motion::Motion;
use super::outline::{BULLET_POINTS, Outline};
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub outline: Outline,
}

impl Default for Bullet {
    fn default() -> Self {
        Self {
            outline: Outline::scaled(BULLET_POINTS, 1.0),
        }
    }
}

impl Bullet {
    fn launch(origin: Vec2, heading: f32, tuning: &Tuning) -> Motion {
        let mut motion = Motion::at(origin);
        motion.set_velocity(tuning.bullet_speed, heading);
        motion
    }

    /// Fired by the player ship
    pub fn ship_shot(origin: Vec2, heading: f32, tuning: &Tuning) -> Entity {
        Entity::new(Self::launch(origin, heading, tuning), EntityKind::ShipBullet(Self::default()))
    }

    /// Fired by a raider
    pub fn raider_shot(origin: Vec2, heading: f32, tuning: &Tuning) -> Entity {
        Entity::new(Self::launch(origin, heading, tuning), EntityKind::RaiderBullet(Self::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Category;

    #[test]
    fn test_shot_kinds() {
        let tuning = Tuning::default();
        let ours = Bullet::ship_shot(Vec2::splat(10.0), 0.0, &tuning);
        let theirs = Bullet::raider_shot(Vec2::splat(10.0), 0.0, &tuning);
        assert_eq!(ours.category(), Category::ShipBullet);
        assert_eq!(theirs.category(), Category::RaiderBullet);
        assert!((ours.motion.velocity().x - tuning.bullet_speed).abs() < 1e-5);
    }
}
