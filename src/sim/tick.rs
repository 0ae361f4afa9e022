//! Fixed timestep simulation tick
//!
//! One call to [`Director::on_tick`] advances simulated time by one frame
//! interval and runs, in order: the registry tick boundary, due timers, the
//! transition check, player intents, motion, and the collision sweep. Progress
//! events from all of them are folded into the director at the end.

use super::entity::Env;
use super::state::{Director, GamePhase};
use crate::display::DisplaySink;

impl<D: DisplaySink> Director<D> {
    /// Advance the game by one fixed timestep
    pub fn on_tick(&mut self) {
        self.ticks += 1;
        self.time_ms = self.time_ms.saturating_add(self.tuning.frame_interval_ms);
        self.registry.begin_tick(self.time_ms);

        let ship_position = self.ship_position();
        let mut events = self.registry.fire_due_timers(&mut Env {
            tuning: &self.tuning,
            rng: &mut self.rng,
            ship_position,
        });

        self.perform_transition();
        self.apply_intents();

        let ship_position = self.ship_position();
        let mut env = Env {
            tuning: &self.tuning,
            rng: &mut self.rng,
            ship_position,
        };
        events.extend(self.registry.advance_all(&mut env));
        events.extend(self.registry.sweep_collisions(&mut env));

        for event in events {
            self.handle_event(event);
        }
    }

    /// Apply held intents to the live ship
    fn apply_intents(&mut self) {
        if !matches!(self.phase, GamePhase::Playing | GamePhase::AwaitingTransition) {
            return;
        }
        let intents = self.intents;
        self.intents.fire = false;

        let Some(id) = self.ship else {
            return;
        };
        let tuning = &self.tuning;
        let Some((motion, ship)) = self
            .registry
            .get_mut(id)
            .filter(|e| !e.is_expired())
            .and_then(|e| e.as_ship_mut())
        else {
            return;
        };

        if intents.turn_left {
            ship.turn_left(motion, tuning);
        }
        if intents.turn_right {
            ship.turn_right(motion, tuning);
        }
        if intents.thrust {
            ship.thrust(motion, tuning);
        }
        if intents.fire {
            self.shoot();
        }
    }
}
