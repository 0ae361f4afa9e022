//! Game director state
//!
//! The director is the only thing that changes score, lives and level. It
//! owns the registry, the seeded RNG and the display sink, and schedules the
//! single pending transition deadline that moves the game between phases.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::asteroid::{Asteroid, AsteroidSize};
use super::entity::{Category, Entity, Env, GameEvent};
use super::outline::ASTEROID_VARIETIES;
use super::raider::{Raider, RaiderSize};
use super::registry::{EntityId, Registry};
use super::ship::Ship;
use crate::consts::{GAME_OVER_LEGEND, TITLE_LEGEND};
use crate::display::{DisplaySink, HudState};
use crate::error::Result;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title legend over drifting asteroids, waiting for a new game
    Splash,
    /// Active play with no deadline pending
    Playing,
    /// Active play with a transition deadline pending
    AwaitingTransition,
    /// Out of lives; input is ignored
    GameOver,
}

/// Player intent flags, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    /// Edge-triggered: cleared once a tick has sampled it
    pub fire: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    TurnLeft,
    TurnRight,
    Thrust,
    Fire,
}

/// The game director
#[derive(Debug)]
pub struct Director<D: DisplaySink = HudState> {
    pub(crate) tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub(crate) seed: u64,
    pub(crate) registry: Registry,
    pub(crate) display: D,
    pub(crate) phase: GamePhase,
    pub(crate) lives: u32,
    pub(crate) score: u32,
    pub(crate) level: u32,
    /// Simulated time at which the next transition check fires
    pub(crate) transition_at: Option<u64>,
    pub(crate) ship: Option<EntityId>,
    pub(crate) raider: Option<EntityId>,
    pub(crate) intents: Intents,
    /// Simulated milliseconds since construction
    pub(crate) time_ms: u64,
    pub(crate) ticks: u64,
}

impl<D: DisplaySink> Director<D> {
    /// Build a director showing the splash screen
    pub fn new(seed: u64, tuning: Tuning, display: D) -> Result<Self> {
        tuning.validate()?;
        let mut director = Self {
            lives: tuning.start_lives,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            registry: Registry::new(),
            display,
            phase: GamePhase::Splash,
            score: 0,
            level: 1,
            transition_at: None,
            ship: None,
            raider: None,
            intents: Intents::default(),
            time_ms: 0,
            ticks: 0,
        };
        director.splash_screen();
        Ok(director)
    }

    fn splash_screen(&mut self) {
        self.clear();
        self.display.set_legend(TITLE_LEGEND);
        self.place_asteroids();
        self.phase = GamePhase::Splash;
    }

    /// Reset lives, score and level and start playing
    pub fn start_game(&mut self) {
        self.clear();
        self.lives = self.tuning.start_lives;
        self.score = 0;
        self.level = 1;
        self.intents = Intents::default();
        self.phase = GamePhase::Playing;

        self.place_asteroids();
        self.place_ship();

        self.display.set_lives(self.lives);
        self.display.set_score(self.score);
        self.display.set_level(self.level);
        log::info!("New game (seed {})", self.seed);
    }

    /// Put a fresh ship at the center, facing up, and arm the grace deadline
    pub fn place_ship(&mut self) {
        if let Some(old) = self.ship.take() {
            self.registry.expire(old);
        }
        let ship = Ship::spawn(self.tuning.center(), -FRAC_PI_2);
        self.ship = Some(self.registry.add(ship, &self.tuning, &mut self.rng));
        self.schedule_transition(self.tuning.respawn_grace_ms);
        self.display.set_legend("");
        log::info!("Ship placed");
    }

    /// Send in a raider sized for the current level (none on level 1)
    pub fn place_raider(&mut self) {
        if self.raider.is_some_and(|id| self.registry.is_live(id)) {
            return;
        }
        let Some(size) = RaiderSize::for_level(self.level) else {
            return;
        };
        let ship_position = self.ship_position();
        let mut env = Env {
            tuning: &self.tuning,
            rng: &mut self.rng,
            ship_position,
        };
        let raider = Raider::spawn(size, &mut env);
        self.raider = Some(self.registry.add(raider, &self.tuning, &mut self.rng));
        log::info!("{size:?} raider incoming");
    }

    /// Four large asteroids, one inset from each corner
    pub fn place_asteroids(&mut self) {
        let near = self.tuning.edge_offset;
        let far = self.tuning.playfield_size - near;
        let corners = [
            Vec2::new(near, near),
            Vec2::new(far, near),
            Vec2::new(near, far),
            Vec2::new(far, far),
        ];
        for (variety, corner) in corners.into_iter().enumerate() {
            let direction = self.rng.random_range(0.0..TAU);
            let rotation = self.rng.random_range(0.0..TAU);
            let asteroid = Asteroid::spawn(
                AsteroidSize::Large,
                variety % ASTEROID_VARIETIES,
                corner,
                self.tuning.opening_asteroid_speed,
                direction,
                rotation,
                &self.tuning,
            );
            self.registry.add(asteroid, &self.tuning, &mut self.rng);
        }
    }

    /// Drop every entity and the pending deadline
    pub fn clear(&mut self) {
        self.registry.clear();
        self.ship = None;
        self.raider = None;
        self.transition_at = None;
    }

    /// Advance the level and rebuild the field
    pub fn next_level(&mut self) {
        self.level += 1;
        self.display.set_level(self.level);
        log::info!("Level {}", self.level);

        self.clear();
        self.place_asteroids();
        self.place_ship();
    }

    /// Arm (or re-arm) the transition deadline `delay_ms` from now
    pub fn schedule_transition(&mut self, delay_ms: u64) {
        if matches!(self.phase, GamePhase::Splash | GamePhase::GameOver) {
            return;
        }
        self.transition_at = Some(self.time_ms.saturating_add(delay_ms));
        self.phase = GamePhase::AwaitingTransition;
    }

    /// Run the transition check if its deadline has passed. At most one rule
    /// applies per deadline.
    pub(crate) fn perform_transition(&mut self) {
        match self.transition_at {
            Some(at) if at <= self.time_ms => {}
            _ => return,
        }
        self.transition_at = None;
        self.phase = GamePhase::Playing;

        if self.lives == 0 {
            self.game_over();
        } else if !self.is_ship_live() {
            self.place_ship();
        } else if self.count_asteroids() == 0 {
            self.next_level();
        } else if !self.raider.is_some_and(|id| self.registry.is_live(id)) {
            self.place_raider();
        }
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.intents = Intents::default();
        self.display.set_legend(GAME_OVER_LEGEND);
        log::info!("Game over with {} points on level {}", self.score, self.level);
    }

    /// Fold one progress event into score, lives and deadlines
    pub(crate) fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::ShipDestroyed => {
                self.ship = None;
                self.lives = self.lives.saturating_sub(1);
                self.display.set_lives(self.lives);
                log::info!("Ship lost, {} lives left", self.lives);
                self.schedule_transition(self.tuning.end_delay_ms);
            }
            GameEvent::AsteroidDestroyed { size } => {
                self.add_score(self.tuning.asteroid_score[size.index()]);
                if self.count_asteroids() == 0 {
                    self.schedule_transition(self.tuning.end_delay_ms);
                }
            }
            GameEvent::RaiderDestroyed { size } => {
                self.add_score(self.tuning.raider_score[size.index()]);
                self.raider = None;
                if self.is_ship_live() {
                    self.schedule_transition(self.tuning.raider_delay_ms);
                }
            }
        }
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.display.set_score(self.score);
    }

    /// Press or release an intent. Ignored outside active play.
    pub fn set_intent(&mut self, intent: Intent, held: bool) {
        if matches!(self.phase, GamePhase::Splash | GamePhase::GameOver) {
            return;
        }
        match intent {
            Intent::TurnLeft => self.intents.turn_left = held,
            Intent::TurnRight => self.intents.turn_right = held,
            Intent::Thrust => self.intents.thrust = held,
            Intent::Fire => self.intents.fire = held,
        }
    }

    /// Is the number of live ship bullets at the cap?
    pub fn at_bullet_limit(&self) -> bool {
        self.registry.count_where(|e| e.category() == Category::ShipBullet) >= self.tuning.bullet_limit
    }

    /// Fire from the ship's nose. Declined without a ship or at the bullet cap.
    pub fn shoot(&mut self) -> bool {
        let Some(motion) = self.ship.and_then(|id| self.live_entity(id)).map(|e| e.motion) else {
            return false;
        };
        if self.at_bullet_limit() {
            return false;
        }
        let bullet = Ship::fire(&motion, &self.tuning);
        self.registry.add(bullet, &self.tuning, &mut self.rng);
        true
    }

    /// Asteroids live or waiting to join
    pub fn count_asteroids(&self) -> usize {
        self.registry.count_where(|e| e.category() == Category::Asteroid)
    }

    fn live_entity(&self, id: EntityId) -> Option<&Entity> {
        self.registry.get(id).filter(|e| !e.is_expired())
    }

    pub fn is_ship_live(&self) -> bool {
        self.ship.is_some_and(|id| self.registry.is_live(id))
    }

    pub fn ship_position(&self) -> Option<Vec2> {
        self.ship.and_then(|id| self.live_entity(id)).map(|e| e.motion.position)
    }

    pub fn ship(&self) -> Option<&Entity> {
        self.ship.and_then(|id| self.live_entity(id))
    }

    pub fn raider(&self) -> Option<&Entity> {
        self.raider.and_then(|id| self.live_entity(id))
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn intents(&self) -> Intents {
        self.intents
    }

    pub fn transition_at(&self) -> Option<u64> {
        self.transition_at
    }

    pub fn time_ms(&self) -> u64 {
        self.time_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Live entities for drawing
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.registry.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::START_LIVES;

    fn director() -> Director {
        Director::new(7, Tuning::default(), HudState::default()).expect("default tuning is valid")
    }

    #[test]
    fn test_splash_screen() {
        let d = director();
        assert_eq!(d.phase(), GamePhase::Splash);
        assert_eq!(d.display().legend, TITLE_LEGEND);
        assert_eq!(d.count_asteroids(), 4);
        assert!(d.ship().is_none());
        assert!(d.transition_at().is_none());
    }

    #[test]
    fn test_rejects_invalid_tuning() {
        let tuning = Tuning {
            bullet_limit: 0,
            ..Tuning::default()
        };
        assert!(Director::new(1, tuning, HudState::default()).is_err());
    }

    #[test]
    fn test_intents_ignored_on_splash() {
        let mut d = director();
        d.set_intent(Intent::Thrust, true);
        assert_eq!(d.intents(), Intents::default());
    }

    #[test]
    fn test_start_game_resets_progress() {
        let mut d = director();
        d.start_game();
        assert_eq!(d.phase(), GamePhase::AwaitingTransition);
        assert_eq!(d.lives(), START_LIVES);
        assert_eq!(d.score(), 0);
        assert_eq!(d.level(), 1);
        assert_eq!(d.count_asteroids(), 4);
        assert!(d.is_ship_live());
        assert_eq!(d.display().legend, "");
        assert_eq!(d.display().lives, START_LIVES);
        assert_eq!(d.transition_at(), Some(d.tuning().respawn_grace_ms));

        let ship = d.ship().expect("ship placed");
        assert_eq!(ship.motion.position, d.tuning().center());
        assert!((ship.motion.rotation() + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_shoot_declined_without_ship() {
        let mut d = director();
        assert!(!d.shoot());
        d.start_game();
        assert!(d.shoot());
    }

    #[test]
    fn test_no_raider_on_first_level() {
        let mut d = director();
        d.start_game();
        d.place_raider();
        assert!(d.raider().is_none());
        d.level = 2;
        d.place_raider();
        assert!(d.raider.is_some());
    }

    #[test]
    fn test_lives_never_underflow() {
        let mut d = director();
        d.start_game();
        for _ in 0..10 {
            d.handle_event(GameEvent::ShipDestroyed);
        }
        assert_eq!(d.lives(), 0);
        assert_eq!(d.display().lives, 0);
    }
}
