//! The alien raider
//!
//! Crosses the field horizontally, jinking every second and shooting every
//! second and a half. The large class aims at the ship; the small class is
//! faster and sprays shots at random.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use super::bullet::Bullet;
use super::debris::Debris;
use super::entity::{Effects, Entity, EntityKind, Env, GameEvent};
use super::motion::Motion;
use super::outline::{Outline, RAIDER_POINTS};
use super::timer::DeferredAction;
use crate::error::SimError;
use crate::tuning::Tuning;

/// Raider size class; the discriminant indexes the tuning tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaiderSize {
    Large = 0,
    Small = 1,
}

impl RaiderSize {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Class for a level: none on the first, small on the second, large after
    pub fn for_level(level: u32) -> Option<Self> {
        match level {
            0 | 1 => None,
            2 => Some(RaiderSize::Small),
            _ => Some(RaiderSize::Large),
        }
    }
}

impl TryFrom<u8> for RaiderSize {
    type Error = SimError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RaiderSize::Large),
            1 => Ok(RaiderSize::Small),
            other => Err(SimError::InvalidRaiderSize(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Raider {
    pub size: RaiderSize,
    pub outline: Outline,
    /// A course change is due after the next move
    change_course: bool,
}

impl Raider {
    pub fn new(size: RaiderSize, tuning: &Tuning) -> Self {
        Self {
            size,
            outline: Outline::scaled(RAIDER_POINTS, tuning.raider_scale[size.index()]),
            change_course: false,
        }
    }

    /// Enter from the left edge at a random height, heading left or right
    pub fn spawn(size: RaiderSize, env: &mut Env<'_>) -> Entity {
        let y = env.rng.random_range(0.0..env.tuning.playfield_size);
        let direction = if env.rng.random_bool(0.5) { 0.0 } else { PI };
        let mut motion = Motion::at(Vec2::new(0.0, y));
        motion.set_velocity(env.tuning.raider_speed[size.index()], direction);
        Entity::new(motion, EntityKind::Raider(Self::new(size, env.tuning)))
    }

    pub(crate) fn advance(&mut self, motion: &mut Motion, env: &mut Env<'_>, fx: &mut Effects) {
        motion.advance(env.tuning.playfield_size);
        if self.change_course {
            self.change_course = false;
            let jink = env.rng.random_range(-1i32..=1) as f32;
            // Keep drifting the way the nose already points horizontally
            let heading = if motion.direction().cos() > 0.0 { jink } else { PI + jink };
            motion.set_direction(heading);
            fx.rearm
                .push((DeferredAction::ChangeCourse, env.tuning.raider_course_interval_ms));
        }
    }

    pub(crate) fn on_deadline(
        &mut self,
        action: DeferredAction,
        motion: &Motion,
        env: &mut Env<'_>,
        fx: &mut Effects,
    ) {
        match action {
            DeferredAction::Shoot => {
                if let Some(target) = env.ship_position {
                    let heading = self.aim(motion.position, target, env);
                    fx.spawned
                        .push(Bullet::raider_shot(motion.position, heading, env.tuning));
                }
                fx.rearm
                    .push((DeferredAction::Shoot, env.tuning.raider_shot_interval_ms));
            }
            DeferredAction::ChangeCourse => self.change_course = true,
            DeferredAction::Expire => {}
        }
    }

    fn aim(&self, from: Vec2, target: Vec2, env: &mut Env<'_>) -> f32 {
        match self.size {
            RaiderSize::Small => env.rng.random_range(0.0..TAU),
            RaiderSize::Large => {
                let delta = target - from;
                delta.y.atan2(delta.x)
            }
        }
    }

    pub(crate) fn on_destroyed(&self, position: Vec2, env: &mut Env<'_>, fx: &mut Effects) {
        let scale = (self.size.index() + 1) as f32;
        for length in [10.0, 10.0, 10.0, 10.0, 5.0, 5.0] {
            fx.spawned.push(Debris::spawn(position, length * scale, env.rng));
        }
        fx.events.push(GameEvent::RaiderDestroyed { size: self.size });
    }
}
