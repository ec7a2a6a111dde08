//! Wall-clock deadline scheduler.
//!
//! Deferred actions (currently only the ship respawn) are explicit
//! records carrying their target wall time, kept in a small deadline
//! list. The engine drains due events each tick and re-validates state
//! at fire time, so a stale deadline (e.g. a respawn scheduled before
//! the game ended) is a harmless no-op rather than a dangling callback.

/// An action deferred to a wall-clock deadline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEvent {
    /// Wall-clock seconds (engine clock) at which the event fires.
    pub due_wall_secs: f64,
    pub action: ScheduledAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    RespawnShip,
}

/// Deadline list ordered by insertion; scanned linearly (the list holds
/// at most a handful of entries).
#[derive(Debug, Default)]
pub struct DeadlineList {
    events: Vec<ScheduledEvent>,
}

impl DeadlineList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_wall_secs: f64, action: ScheduledAction) {
        self.events.push(ScheduledEvent {
            due_wall_secs,
            action,
        });
    }

    /// Remove and return every event whose deadline has passed.
    pub fn drain_due(&mut self, now_wall_secs: f64) -> Vec<ScheduledEvent> {
        let mut due = Vec::new();
        self.events.retain(|event| {
            if event.due_wall_secs <= now_wall_secs {
                due.push(*event);
                false
            } else {
                true
            }
        });
        due
    }

    /// Push every pending deadline into the future by `secs`. Used by
    /// the suspend-on-pause respawn policy: shifting deadlines by the
    /// paused duration is equivalent to stopping their countdown.
    pub fn shift(&mut self, secs: f64) {
        for event in &mut self.events {
            event.due_wall_secs += secs;
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
