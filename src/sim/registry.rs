//! The entity set
//!
//! Entities live in a slot map and are addressed by stable [`EntityId`]
//! handles. Mutation during a tick follows two rules:
//!
//! - Removal only marks an entity expired. Expired entities are compacted out
//!   (and their timers cancelled) at the next tick boundary.
//! - Additions land in a pending list and join the live order at the next
//!   tick boundary, so nothing spawned mid-sweep takes part in that sweep.

use glam::Vec2;
use rand_pcg::Pcg32;
use slotmap::{SlotMap, new_key_type};

use super::collision::polygons_overlap;
use super::entity::{Effects, Entity, Env, GameEvent};
use super::timer::TimerQueue;
use crate::tuning::Tuning;

new_key_type! {
    /// Stable handle to a registered entity
    pub struct EntityId;
}

#[derive(Debug, Default)]
pub struct Registry {
    entities: SlotMap<EntityId, Entity>,
    /// Live entities in registration order
    live: Vec<EntityId>,
    /// Added since the last tick boundary
    pending: Vec<EntityId>,
    timers: TimerQueue,
    now_ms: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity; it moves and collides from the next tick on
    pub fn add(&mut self, entity: Entity, tuning: &Tuning, rng: &mut Pcg32) -> EntityId {
        let timers = entity.initial_timers(tuning, rng);
        log::debug!("spawn {:?} at {}", entity.category(), entity.motion.position);
        let id = self.entities.insert(entity);
        for (action, delay_ms) in timers {
            self.timers.schedule(id, action, self.now_ms, delay_ms);
        }
        self.pending.push(id);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Registered and not expired
    pub fn is_live(&self, id: EntityId) -> bool {
        self.entities.get(id).is_some_and(|e| !e.is_expired())
    }

    /// Mark for removal; safe at any point in a tick
    pub fn expire(&mut self, id: EntityId) {
        if let Some(entity) = self.entities.get_mut(id) {
            entity.expire();
        }
    }

    pub fn remove(&mut self, id: EntityId) {
        self.expire(id);
    }

    /// Simulated time of the current tick
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Tick boundary: drop expired entities, then admit pending ones
    pub fn begin_tick(&mut self, now_ms: u64) {
        self.now_ms = now_ms;

        let entities = &mut self.entities;
        let timers = &mut self.timers;
        let mut compact = |ids: &mut Vec<EntityId>| {
            ids.retain(|&id| {
                let keep = entities.get(id).is_some_and(|e| !e.is_expired());
                if !keep {
                    entities.remove(id);
                    timers.cancel_owner(id);
                }
                keep
            });
        };
        compact(&mut self.live);
        compact(&mut self.pending);

        self.live.append(&mut self.pending);
    }

    /// Fire every timer whose deadline has passed. Timers on expired or
    /// removed owners are dropped silently.
    pub fn fire_due_timers(&mut self, env: &mut Env<'_>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for timer in self.timers.take_due(self.now_ms) {
            let mut fx = Effects::default();
            match self.entities.get_mut(timer.owner) {
                Some(entity) if !entity.is_expired() => {
                    log::debug!("{:?} deadline for {:?}", timer.action, entity.category());
                    entity.on_deadline(timer.action, env, &mut fx);
                }
                _ => continue,
            }
            self.apply(timer.owner, fx, env, &mut events);
        }
        events
    }

    /// Move every live entity, in registration order
    pub fn advance_all(&mut self, env: &mut Env<'_>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for i in 0..self.live.len() {
            let id = self.live[i];
            let mut fx = Effects::default();
            let Some(entity) = self.entities.get_mut(id) else {
                continue;
            };
            entity.advance(env, &mut fx);
            self.apply(id, fx, env, &mut events);
        }
        events
    }

    /// Test every unordered pair of live entities once and notify both sides
    /// of each contact. An entity that expires partway through is skipped for
    /// the rest of the sweep; spawns wait for the next tick.
    pub fn sweep_collisions(&mut self, env: &mut Env<'_>) -> Vec<GameEvent> {
        let shapes: Vec<Vec<Vec2>> = self
            .live
            .iter()
            .map(|&id| self.entities.get(id).map(Entity::world_outline).unwrap_or_default())
            .collect();

        let mut spawned = Vec::new();
        let mut events = Vec::new();

        for i in 0..self.live.len() {
            for j in (i + 1)..self.live.len() {
                let (a, b) = (self.live[i], self.live[j]);
                if !self.is_live(a) {
                    break;
                }
                if !self.is_live(b) {
                    continue;
                }
                if !polygons_overlap(&shapes[i], &shapes[j]) {
                    continue;
                }

                let (Some(contact_a), Some(contact_b)) = (
                    self.entities.get(a).map(Entity::contact),
                    self.entities.get(b).map(Entity::contact),
                ) else {
                    continue;
                };

                let mut fx = Effects::default();
                if let Some(entity) = self.entities.get_mut(a) {
                    entity.collided_with(&contact_b, env, &mut fx);
                }
                if let Some(entity) = self.entities.get_mut(b) {
                    entity.collided_with(&contact_a, env, &mut fx);
                }
                spawned.append(&mut fx.spawned);
                events.append(&mut fx.events);
            }
        }

        for entity in spawned {
            self.add(entity, env.tuning, env.rng);
        }
        events
    }

    fn apply(&mut self, owner: EntityId, fx: Effects, env: &mut Env<'_>, events: &mut Vec<GameEvent>) {
        for (action, delay_ms) in fx.rearm {
            self.timers.schedule(owner, action, self.now_ms, delay_ms);
        }
        for entity in fx.spawned {
            self.add(entity, env.tuning, env.rng);
        }
        events.extend(fx.events);
    }

    /// Count live and pending entities matching `predicate`
    pub fn count_where(&self, predicate: impl Fn(&Entity) -> bool) -> usize {
        self.live
            .iter()
            .chain(&self.pending)
            .filter_map(|&id| self.entities.get(id))
            .filter(|e| !e.is_expired() && predicate(e))
            .count()
    }

    /// Handles of live and pending entities matching `predicate`
    pub fn find(&self, predicate: impl Fn(&Entity) -> bool) -> Vec<EntityId> {
        self.live
            .iter()
            .chain(&self.pending)
            .copied()
            .filter(|&id| self.entities.get(id).is_some_and(|e| !e.is_expired() && predicate(e)))
            .collect()
    }

    /// Snapshot of the entities that were live at the last tick boundary
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.live
            .iter()
            .filter_map(|&id| self.entities.get(id).map(|e| (id, e)))
            .filter(|(_, e)| !e.is_expired())
    }

    /// Number of entities registered, including expired ones not yet compacted
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop every entity and every pending timer
    pub fn clear(&mut self) {
        self.entities.clear();
        self.live.clear();
        self.pending.clear();
        self.timers.clear();
    }
}
