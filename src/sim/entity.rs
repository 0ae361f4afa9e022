//! The closed set of simulated entities
//!
//! Every entity is a [`Motion`] plus one [`EntityKind`] variant. Behaviour is a
//! match per operation; nothing is dispatched through trait objects.
//!
//! Destruction is decided per side. When A touches B, A expires iff B's
//! `destroys` tags include A's own category tag, and the same test is made
//! independently for B against A.

use bitflags::bitflags;
use glam::Vec2;
use rand_pcg::Pcg32;

use super::asteroid::{Asteroid, AsteroidSize};
use super::bullet::Bullet;
use super::debris::Debris;
use super::motion::Motion;
use super::outline::Outline;
use super::raider::{Raider, RaiderSize};
use super::ship::Ship;
use super::timer::DeferredAction;
use crate::tuning::Tuning;

bitflags! {
    /// Destroyer capability tags, one per destroyable category
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Tags: u8 {
        const SHIP = 1 << 0;
        const ASTEROID = 1 << 1;
        const RAIDER = 1 << 2;
        const SHIP_BULLET = 1 << 3;
        const RAIDER_BULLET = 1 << 4;
    }
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ship,
    Asteroid,
    Raider,
    ShipBullet,
    RaiderBullet,
    Debris,
}

impl Category {
    /// The tag a destroyer must carry to destroy this category (empty: indestructible)
    pub fn tag(self) -> Tags {
        match self {
            Category::Ship => Tags::SHIP,
            Category::Asteroid => Tags::ASTEROID,
            Category::Raider => Tags::RAIDER,
            Category::ShipBullet => Tags::SHIP_BULLET,
            Category::RaiderBullet => Tags::RAIDER_BULLET,
            Category::Debris => Tags::empty(),
        }
    }

    /// The tags entities of this category carry
    pub fn destroys(self) -> Tags {
        match self {
            Category::Ship => Tags::ASTEROID | Tags::RAIDER_BULLET,
            Category::Asteroid => Tags::SHIP | Tags::SHIP_BULLET | Tags::RAIDER_BULLET,
            Category::Raider => Tags::SHIP | Tags::ASTEROID | Tags::SHIP_BULLET,
            Category::ShipBullet => Tags::ASTEROID | Tags::RAIDER,
            Category::RaiderBullet => Tags::SHIP | Tags::ASTEROID,
            Category::Debris => Tags::empty(),
        }
    }
}

/// Progress events reported to the director
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShipDestroyed,
    AsteroidDestroyed { size: AsteroidSize },
    RaiderDestroyed { size: RaiderSize },
}

/// The partner an entity collided with, as seen before either side reacted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub category: Category,
    pub destroys: Tags,
    pub position: Vec2,
}

/// Shared inputs for entity callbacks
pub struct Env<'a> {
    pub tuning: &'a Tuning,
    pub rng: &'a mut Pcg32,
    /// Position of the live player ship, if any
    pub ship_position: Option<Vec2>,
}

/// Side effects collected from entity callbacks
#[derive(Debug, Default)]
pub struct Effects {
    /// New entities; they join the registry at the next tick boundary
    pub spawned: Vec<Entity>,
    pub events: Vec<GameEvent>,
    /// Timers the calling entity wants re-armed: (action, delay_ms)
    pub rearm: Vec<(DeferredAction, u64)>,
}

/// Variant data
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Ship(Ship),
    Asteroid(Asteroid),
    Raider(Raider),
    ShipBullet(Bullet),
    RaiderBullet(Bullet),
    Debris(Debris),
}

/// A simulated entity
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub motion: Motion,
    pub kind: EntityKind,
    expired: bool,
}

impl Entity {
    pub fn new(motion: Motion, kind: EntityKind) -> Self {
        Self {
            motion,
            kind,
            expired: false,
        }
    }

    pub fn category(&self) -> Category {
        match self.kind {
            EntityKind::Ship(_) => Category::Ship,
            EntityKind::Asteroid(_) => Category::Asteroid,
            EntityKind::Raider(_) => Category::Raider,
            EntityKind::ShipBullet(_) => Category::ShipBullet,
            EntityKind::RaiderBullet(_) => Category::RaiderBullet,
            EntityKind::Debris(_) => Category::Debris,
        }
    }

    pub fn destroys(&self) -> Tags {
        self.category().destroys()
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Mark for removal at the next tick boundary
    pub fn expire(&mut self) {
        self.expired = true;
    }

    /// Local-space outline for collision tests and drawing
    pub fn outline(&self) -> &Outline {
        match &self.kind {
            EntityKind::Ship(ship) => ship.outline(),
            EntityKind::Asteroid(asteroid) => &asteroid.outline,
            EntityKind::Raider(raider) => &raider.outline,
            EntityKind::ShipBullet(bullet) | EntityKind::RaiderBullet(bullet) => &bullet.outline,
            EntityKind::Debris(debris) => &debris.outline,
        }
    }

    /// Position and rotation used to place the outline
    pub fn transform(&self) -> (Vec2, f32) {
        (self.motion.position, self.motion.rotation())
    }

    /// Outline placed into the playfield
    pub fn world_outline(&self) -> Vec<Vec2> {
        self.outline().to_world(&self.motion)
    }

    pub fn contact(&self) -> Contact {
        Contact {
            category: self.category(),
            destroys: self.destroys(),
            position: self.motion.position,
        }
    }

    pub fn as_ship_mut(&mut self) -> Option<(&mut Motion, &mut Ship)> {
        match &mut self.kind {
            EntityKind::Ship(ship) => Some((&mut self.motion, ship)),
            _ => None,
        }
    }

    /// Timers armed when the entity joins the registry
    pub fn initial_timers(&self, tuning: &Tuning, rng: &mut Pcg32) -> Vec<(DeferredAction, u64)> {
        match &self.kind {
            EntityKind::ShipBullet(_) | EntityKind::RaiderBullet(_) => {
                vec![(DeferredAction::Expire, tuning.bullet_duration_ms)]
            }
            EntityKind::Debris(_) => vec![(DeferredAction::Expire, Debris::lifetime_ms(tuning, rng))],
            EntityKind::Raider(_) => vec![
                (DeferredAction::Shoot, tuning.raider_shot_interval_ms),
                (DeferredAction::ChangeCourse, tuning.raider_course_interval_ms),
            ],
            EntityKind::Ship(_) | EntityKind::Asteroid(_) => Vec::new(),
        }
    }

    /// Advance one tick
    pub fn advance(&mut self, env: &mut Env<'_>, fx: &mut Effects) {
        if self.expired {
            return;
        }
        let size = env.tuning.playfield_size;
        match &mut self.kind {
            EntityKind::Ship(ship) => ship.advance(&mut self.motion, env.tuning),
            EntityKind::Raider(raider) => raider.advance(&mut self.motion, env, fx),
            EntityKind::Asteroid(_)
            | EntityKind::ShipBullet(_)
            | EntityKind::RaiderBullet(_)
            | EntityKind::Debris(_) => self.motion.advance(size),
        }
    }

    /// React to touching `other`
    pub fn collided_with(&mut self, other: &Contact, env: &mut Env<'_>, fx: &mut Effects) {
        if self.expired {
            return;
        }
        let tag = self.category().tag();
        if tag.is_empty() || !other.destroys.contains(tag) {
            return;
        }

        self.expired = true;
        let position = self.motion.position;
        match &self.kind {
            EntityKind::Ship(_) => Ship::on_destroyed(position, env, fx),
            EntityKind::Asteroid(asteroid) => asteroid.on_destroyed(position, env, fx),
            EntityKind::Raider(raider) => raider.on_destroyed(position, env, fx),
            EntityKind::ShipBullet(_) | EntityKind::RaiderBullet(_) | EntityKind::Debris(_) => {}
        }
        log::debug!("{:?} destroyed by {:?} at {}", self.category(), other.category, position);
    }

    /// A deferred timer owned by this entity fired
    pub fn on_deadline(&mut self, action: DeferredAction, env: &mut Env<'_>, fx: &mut Effects) {
        if self.expired {
            return;
        }
        match (&mut self.kind, action) {
            (EntityKind::Raider(raider), _) => raider.on_deadline(action, &self.motion, env, fx),
            (
                EntityKind::ShipBullet(_) | EntityKind::RaiderBullet(_) | EntityKind::Debris(_),
                DeferredAction::Expire,
            ) => self.expired = true,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_table() {
        // Ship bullets take out asteroids and raiders, not ships
        assert!(Category::ShipBullet.destroys().contains(Category::Asteroid.tag()));
        assert!(Category::ShipBullet.destroys().contains(Category::Raider.tag()));
        assert!(!Category::ShipBullet.destroys().contains(Category::Ship.tag()));

        // Raider bullets break the ship and asteroids
        assert_eq!(Category::RaiderBullet.destroys(), Tags::SHIP | Tags::ASTEROID);

        // A raider breaks asteroids but asteroids can't touch it
        assert!(Category::Raider.destroys().contains(Category::Asteroid.tag()));
        assert!(!Category::Asteroid.destroys().contains(Category::Raider.tag()));

        // Debris can't be destroyed and destroys nothing
        assert!(Category::Debris.tag().is_empty());
        assert!(Category::Debris.destroys().is_empty());
    }
}
