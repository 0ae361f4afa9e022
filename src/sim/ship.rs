//! The player ship

use glam::Vec2;

use super::bullet::Bullet;
use super::debris::Debris;
use super::entity::{Effects, Entity, EntityKind, Env, GameEvent};
use super::motion::Motion;
use super::outline::{Outline, SHIP_FLAME_POINTS, SHIP_NOSE, SHIP_POINTS};
use crate::tuning::Tuning;

/// Debris line lengths left behind by a destroyed ship
const WRECK_LINES: [f32; 3] = [20.0, 20.0, 5.0];

#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    hull: Outline,
    flame: Outline,
    /// Thrust was applied since the last move
    thrusting: bool,
    /// Flame outline is the one currently shown
    show_flame: bool,
}

impl Default for Ship {
    fn default() -> Self {
        Self::new()
    }
}

impl Ship {
    pub fn new() -> Self {
        Self {
            hull: Outline::scaled(SHIP_POINTS, 1.0),
            flame: Outline::scaled(SHIP_FLAME_POINTS, 1.0),
            thrusting: false,
            show_flame: false,
        }
    }

    /// A ship at rest at `position`, facing `rotation`
    pub fn spawn(position: Vec2, rotation: f32) -> Entity {
        let mut motion = Motion::at(position);
        motion.set_rotation(rotation);
        Entity::new(motion, EntityKind::Ship(Self::new()))
    }

    pub fn outline(&self) -> &Outline {
        if self.show_flame { &self.flame } else { &self.hull }
    }

    pub fn is_flame_shown(&self) -> bool {
        self.show_flame
    }

    pub fn turn_left(&self, motion: &mut Motion, tuning: &Tuning) {
        motion.rotate(-tuning.ship_turn_step);
    }

    pub fn turn_right(&self, motion: &mut Motion, tuning: &Tuning) {
        motion.rotate(tuning.ship_turn_step);
    }

    pub fn thrust(&mut self, motion: &mut Motion, tuning: &Tuning) {
        motion.accelerate(tuning.ship_acceleration);
        motion.limit_speed(tuning.ship_max_speed);
        self.thrusting = true;
    }

    /// Drag, then move. The flame flickers every other frame under thrust.
    pub fn advance(&mut self, motion: &mut Motion, tuning: &Tuning) {
        motion.apply_friction(tuning.ship_friction);
        motion.advance(tuning.playfield_size);
        self.show_flame = self.thrusting && !self.show_flame;
        self.thrusting = false;
    }

    /// World position of the nose
    pub fn nose(motion: &Motion) -> Vec2 {
        motion.to_world(SHIP_NOSE)
    }

    /// A bullet leaving the nose along the ship's facing
    pub fn fire(motion: &Motion, tuning: &Tuning) -> Entity {
        Bullet::ship_shot(Self::nose(motion), motion.rotation(), tuning)
    }

    pub(crate) fn on_destroyed(position: Vec2, env: &mut Env<'_>, fx: &mut Effects) {
        for length in WRECK_LINES {
            fx.spawned.push(Debris::spawn(position, length, env.rng));
        }
        fx.events.push(GameEvent::ShipDestroyed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_turning_steps_by_fixed_angle() {
        let tuning = Tuning::default();
        let ship = Ship::new();
        let mut motion = Motion::default();
        ship.turn_right(&mut motion, &tuning);
        assert!((motion.rotation() - tuning.ship_turn_step).abs() < 1e-6);
        ship.turn_left(&mut motion, &tuning);
        ship.turn_left(&mut motion, &tuning);
        assert!((motion.rotation() + tuning.ship_turn_step).abs() < 1e-6);
    }

    #[test]
    fn test_thrust_is_capped() {
        let tuning = Tuning::default();
        let mut ship = Ship::new();
        let mut motion = Motion::at(Vec2::splat(100.0));
        for _ in 0..200 {
            ship.thrust(&mut motion, &tuning);
        }
        assert!(motion.speed() <= tuning.ship_max_speed + 1e-4);
    }

    #[test]
    fn test_friction_applies_before_move() {
        let tuning = Tuning::default();
        let mut ship = Ship::new();
        let mut motion = Motion::at(Vec2::splat(100.0));
        motion.set_velocity(10.0, 0.0);
        ship.advance(&mut motion, &tuning);
        let expected = 10.0 * tuning.ship_friction;
        assert!((motion.speed() - expected).abs() < 1e-5);
        assert!((motion.position.x - (100.0 + expected)).abs() < 1e-4);
    }

    #[test]
    fn test_flame_flickers_under_thrust() {
        let tuning = Tuning::default();
        let mut ship = Ship::new();
        let mut motion = Motion::at(Vec2::splat(100.0));

        let mut shown = Vec::new();
        for _ in 0..4 {
            ship.thrust(&mut motion, &tuning);
            ship.advance(&mut motion, &tuning);
            shown.push(ship.is_flame_shown());
        }
        assert_eq!(shown, vec![true, false, true, false]);

        ship.thrust(&mut motion, &tuning);
        ship.advance(&mut motion, &tuning);
        assert!(ship.is_flame_shown());
        ship.advance(&mut motion, &tuning);
        assert!(!ship.is_flame_shown());
        assert_eq!(ship.outline().points().len(), SHIP_POINTS.len());
    }

    #[test]
    fn test_bullet_leaves_the_nose() {
        let tuning = Tuning::default();
        let mut motion = Motion::at(Vec2::new(375.0, 375.0));
        motion.set_rotation(-FRAC_PI_2);
        let bullet = Ship::fire(&motion, &tuning);

        assert!((bullet.motion.position.x - 375.0).abs() < 1e-3);
        assert!((bullet.motion.position.y - 355.0).abs() < 1e-3);
        assert!((bullet.motion.speed() - tuning.bullet_speed).abs() < 1e-5);
        assert!((bullet.motion.direction() + FRAC_PI_2).abs() < 1e-5);
    }
}
