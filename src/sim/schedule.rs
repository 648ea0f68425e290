//! Deferred one-shot commands on a monotonic millisecond clock
//!
//! Replaces wall-clock timers: the frame step drains whatever is due before
//! touching input or physics, so a command never lands mid-pass.

use serde::{Deserialize, Serialize};

/// Work the game defers to a later frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Apply the life loss after the ship's death pause
    LoseLife,
    /// Advance to the next level after the field is cleared
    NextLevel,
    /// Bring the instructions overlay back after game over
    ShowInstructions,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Scheduled {
    due_ms: f64,
    /// Insertion order, breaks ties between equal due times
    seq: u64,
    command: Command,
}

/// Pending commands, fired once each when their due time passes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    pending: Vec<Scheduled>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `command` to run `delay_ms` after `now_ms`
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, command: Command) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due_ms: now_ms + delay_ms,
            seq,
            command,
        });
    }

    /// Remove and return every command due at `now_ms`, earliest first
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<Command> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|s| s.due_ms <= now_ms);
        self.pending = pending;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|s| s.command).collect()
    }

    /// Whether `command` is waiting to fire
    pub fn is_pending(&self, command: Command) -> bool {
        self.pending.iter().any(|s| s.command == command)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop everything (new session)
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
