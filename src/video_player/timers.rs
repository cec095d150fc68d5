// SPDX-License-Identifier: MPL-2.0
//! Cancellable timers keyed by purpose.
//!
//! The controller never sleeps. Scheduling a side effect records a deadline
//! under its [`TimerKey`]; re-arming a key replaces the previous deadline, and
//! cancelling a key guarantees the stale callback never fires. Whoever drives
//! the controller calls `tick` once [`Timers::next_deadline`] has passed.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Purpose of a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKey {
    /// End of the seek-commit coalescing window.
    SeekDebounce,
    /// Delay before a recovery attempt.
    RetryDelay,
    /// Extra delay after a full engine reset before playback resumes.
    RetryResume,
    /// Overlay idle timeout.
    IdleHide,
    /// Keep-alive ping while playing.
    Heartbeat,
}

impl TimerKey {
    /// Every key, used for teardown.
    pub const ALL: [Self; 5] = [
        Self::SeekDebounce,
        Self::RetryDelay,
        Self::RetryResume,
        Self::IdleHide,
        Self::Heartbeat,
    ];
}

/// Table of pending deadlines, at most one per key.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    deadlines: HashMap<TimerKey, Instant>,
}

impl Timers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` to fire `delay` after `now`, replacing any pending deadline.
    pub fn arm(&mut self, key: TimerKey, now: Instant, delay: Duration) {
        self.deadlines.insert(key, now + delay);
    }

    /// Cancels `key`. Returns true if it was pending.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        self.deadlines.remove(&key).is_some()
    }

    /// Cancels every pending timer.
    pub fn cancel_all(&mut self) {
        self.deadlines.clear();
    }

    #[must_use]
    pub fn is_armed(&self, key: TimerKey) -> bool {
        self.deadlines.contains_key(&key)
    }

    #[must_use]
    pub fn deadline(&self, key: TimerKey) -> Option<Instant> {
        self.deadlines.get(&key).copied()
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    /// Removes and returns every key due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerKey> {
        let mut due: Vec<(Instant, TimerKey)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, deadline)| (*deadline, *key))
            .collect();
        due.sort();

        for (_, key) in &due {
            self.deadlines.remove(key);
        }
        due.into_iter().map(|(_, key)| key).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
