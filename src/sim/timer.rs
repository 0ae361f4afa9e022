//! One-shot deferred timers bound to entities
//!
//! A timer names its owner by handle only. If the owner has expired (or the
//! registry was cleared) by the time the deadline passes, the timer is dropped
//! without effect. Time is simulated milliseconds advanced once per tick.

use super::registry::EntityId;

/// Which deferred action fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredAction {
    /// End of a bullet's or a debris line's lifetime
    Expire,
    /// Raider fires at the ship
    Shoot,
    /// Raider considers a new heading
    ChangeCourse,
}

/// A pending deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredTimer {
    pub owner: EntityId,
    pub action: DeferredAction,
    /// Absolute simulated time (ms) at which the timer fires
    pub deadline_ms: u64,
    /// Insertion sequence, breaks ties between equal deadlines
    seq: u64,
}

/// All pending timers, fired in deadline order
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    timers: Vec<DeferredTimer>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` on `owner` at `now_ms + delay_ms`
    pub fn schedule(&mut self, owner: EntityId, action: DeferredAction, now_ms: u64, delay_ms: u64) {
        let timer = DeferredTimer {
            owner,
            action,
            deadline_ms: now_ms.saturating_add(delay_ms),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.timers.push(timer);
    }

    /// Remove and return every timer whose deadline is at or before `now_ms`,
    /// earliest first
    pub fn take_due(&mut self, now_ms: u64) -> Vec<DeferredTimer> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.deadline_ms <= now_ms);
        self.timers = pending;
        due.sort_by_key(|t| (t.deadline_ms, t.seq));
        due
    }

    /// Drop every timer owned by `owner`
    pub fn cancel_owner(&mut self, owner: EntityId) {
        self.timers.retain(|t| t.owner != owner);
    }

    pub fn pending_for(&self, owner: EntityId) -> impl Iterator<Item = &DeferredTimer> + '_ {
        self.timers.iter().filter(move |t| t.owner == owner)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<EntityId> {
        let mut map: SlotMap<EntityId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_fires_once_at_deadline() {
        let id = ids(1)[0];
        let mut queue = TimerQueue::new();
        queue.schedule(id, DeferredAction::Expire, 100, 1000);

        assert!(queue.take_due(1099).is_empty());
        let due = queue.take_due(1100);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].action, DeferredAction::Expire);
        assert!(queue.take_due(5000).is_empty());
    }

    #[test]
    fn test_multiple_timers_per_owner_fire_in_order() {
        let id = ids(1)[0];
        let mut queue = TimerQueue::new();
        queue.schedule(id, DeferredAction::Shoot, 0, 1500);
        queue.schedule(id, DeferredAction::ChangeCourse, 0, 1000);
        assert_eq!(queue.pending_for(id).count(), 2);

        let due = queue.take_due(2000);
        let actions: Vec<_> = due.iter().map(|t| t.action).collect();
        assert_eq!(actions, vec![DeferredAction::ChangeCourse, DeferredAction::Shoot]);
    }

    #[test]
    fn test_cancel_owner() {
        let owners = ids(2);
        let mut queue = TimerQueue::new();
        queue.schedule(owners[0], DeferredAction::Expire, 0, 10);
        queue.schedule(owners[1], DeferredAction::Expire, 0, 10);
        queue.cancel_owner(owners[0]);
        let due = queue.take_due(10);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].owner, owners[1]);
    }
}
