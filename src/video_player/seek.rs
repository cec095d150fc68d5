// SPDX-License-Identifier: MPL-2.0
//! Seek coordinator.
//!
//! Owns the exclusive seek window. While a session is active the reconciler
//! drops progress reports, so the burst of stale pre-seek positions the engine
//! emits right after a seek never reaches the seek bar.
//!
//! Commits are debounced on the trailing edge: every commit restarts the
//! window, and only when the window elapses is the latest target sent to the
//! engine, exactly once.

use super::engine::Engine;
use super::state::PlaybackState;
use super::timers::{TimerKey, Timers};
use crate::domain::video::Fraction;
use std::time::{Duration, Instant};

/// Transient seek state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeekSession {
    active: bool,
    /// Latest committed target, not yet sent.
    pending: Option<Fraction>,
    /// Position before the session began, restored if the engine rejects the seek.
    origin: Option<Fraction>,
}

impl SeekSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn pending(&self) -> Option<Fraction> {
        self.pending
    }

    /// Opens the seek window. Calling it again while open changes nothing.
    pub fn begin(&mut self, state: &PlaybackState) {
        if self.active {
            return;
        }
        self.active = true;
        self.origin = Some(state.position);
    }

    /// Moves the seek bar without commanding the engine.
    pub fn update(&mut self, state: &mut PlaybackState, fraction: f64) {
        self.begin(state);
        state.position = Fraction::position(fraction);
    }

    /// Records `fraction` as the target and restarts the debounce window.
    pub fn commit(
        &mut self,
        state: &mut PlaybackState,
        timers: &mut Timers,
        now: Instant,
        debounce: Duration,
        fraction: f64,
    ) {
        self.begin(state);
        let target = Fraction::position(fraction);
        if self.pending.is_some() {
            tracing::trace!(target = target.value(), "coalescing seek commit");
        }
        self.pending = Some(target);
        state.position = target;
        timers.arm(TimerKey::SeekDebounce, now, debounce);
    }

    /// Seeks to `target` immediately and holds the window open for `guard`,
    /// dropping the stale progress burst that follows the jump. Supersedes any
    /// pending drag target. Returns whether the engine accepted the seek.
    pub fn skip<E: Engine>(
        &mut self,
        state: &mut PlaybackState,
        engine: &mut E,
        timers: &mut Timers,
        now: Instant,
        guard: Duration,
        target: Fraction,
    ) -> bool {
        if let Err(err) = engine.seek_to(target) {
            tracing::debug!(error = %err, target = target.value(), "engine rejected skip");
            return false;
        }
        self.begin(state);
        self.pending = None;
        state.position = target;
        timers.arm(TimerKey::SeekDebounce, now, guard);
        true
    }

    /// Called when the debounce window elapses: sends the pending target and
    /// closes the window. Returns the position sent, if any.
    pub fn flush<E: Engine>(
        &mut self,
        state: &mut PlaybackState,
        engine: &mut E,
    ) -> Option<Fraction> {
        if !self.active {
            self.pending = None;
            return None;
        }
        let origin = self.origin;
        let sent = self.pending.take().and_then(|target| match engine.seek_to(target) {
            Ok(()) => Some(target),
            Err(err) => {
                tracing::debug!(error = %err, target = target.value(), "engine rejected seek");
                if let Some(origin) = origin {
                    state.position = origin;
                }
                None
            }
        });
        self.active = false;
        self.origin = None;
        sent
    }

    /// Abandons the session and its pending window.
    pub fn clear(&mut self, timers: &mut Timers) {
        timers.cancel(TimerKey::SeekDebounce);
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, RecordingEngine};

    const DEBOUNCE: Duration = Duration::from_millis(500);

    #[test]
    fn begin_is_idempotent() {
        let mut state = PlaybackState {
            position: Fraction::position(0.3),
            ..PlaybackState::default()
        };
        let mut session = SeekSession::new();
        session.begin(&state);
        state.position = Fraction::position(0.6);
        session.begin(&state);

        assert!(session.is_active());
        assert_eq!(session.origin, Some(Fraction::position(0.3)));
    }

    #[test]
    fn update_moves_bar_without_engine_command() {
        let mut state = PlaybackState::default();
        let mut session = SeekSession::new();
        session.update(&mut state, 0.42);

        assert!(session.is_active());
        assert_abs_diff_eq!(state.position.value(), 0.42);
        assert!(session.pending().is_none());
    }

    #[test]
    fn commits_in_window_coalesce_to_latest() {
        let start = Instant::now();
        let mut state = PlaybackState::default();
        let mut session = SeekSession::new();
        let mut timers = Timers::new();
        let mut engine = RecordingEngine::default();

        session.commit(&mut state, &mut timers, start, DEBOUNCE, 0.2);
        session.commit(
            &mut state,
            &mut timers,
            start + Duration::from_millis(100),
            DEBOUNCE,
            0.5,
        );

        assert!(timers.take_due(start + DEBOUNCE).is_empty());
        let due = timers.take_due(start + Duration::from_millis(600));
        assert_eq!(due, vec![TimerKey::SeekDebounce]);

        let sent = session.flush(&mut state, &mut engine);
        assert_eq!(sent, Some(Fraction::position(0.5)));
        assert_eq!(engine.seeks(), vec![Fraction::position(0.5)]);
        assert!(!session.is_active());
    }

    #[test]
    fn flush_after_clear_sends_nothing() {
        let start = Instant::now();
        let mut state = PlaybackState::default();
        let mut session = SeekSession::new();
        let mut timers = Timers::new();
        let mut engine = RecordingEngine::default();

        session.commit(&mut state, &mut timers, start, DEBOUNCE, 0.7);
        session.clear(&mut timers);

        assert!(!timers.is_armed(TimerKey::SeekDebounce));
        assert_eq!(session.flush(&mut state, &mut engine), None);
        assert!(engine.seeks().is_empty());
    }

    #[test]
    fn second_flush_never_resends() {
        let start = Instant::now();
        let mut state = PlaybackState::default();
        let mut session = SeekSession::new();
        let mut timers = Timers::new();
        let mut engine = RecordingEngine::default();

        session.commit(&mut state, &mut timers, start, DEBOUNCE, 0.3);
        session.flush(&mut state, &mut engine);
        session.flush(&mut state, &mut engine);

        assert_eq!(engine.seeks().len(), 1);
    }

    #[test]
    fn rejected_seek_restores_origin() {
        let start = Instant::now();
        let mut state = PlaybackState {
            position: Fraction::position(0.1),
            ..PlaybackState::default()
        };
        let mut session = SeekSession::new();
        let mut timers = Timers::new();
        let mut engine = RecordingEngine::default();
        engine.reject_seeks();

        session.commit(&mut state, &mut timers, start, DEBOUNCE, 0.9);
        assert_eq!(session.flush(&mut state, &mut engine), None);

        assert_abs_diff_eq!(state.position.value(), 0.1);
        assert!(!session.is_active());
    }

    #[test]
    fn skip_seeks_at_once_and_guards_window() {
        let start = Instant::now();
        let mut state = PlaybackState::default();
        let mut session = SeekSession::new();
        let mut timers = Timers::new();
        let mut engine = RecordingEngine::default();

        session.commit(&mut state, &mut timers, start, DEBOUNCE, 0.8);
        let target = Fraction::position(0.4);
        assert!(session.skip(&mut state, &mut engine, &mut timers, start, DEBOUNCE, target));

        assert_eq!(engine.seeks(), vec![target]);
        assert!(session.is_active());
        assert!(session.pending().is_none());

        timers.take_due(start + DEBOUNCE);
        assert_eq!(session.flush(&mut state, &mut engine), None);
        assert_eq!(engine.seeks().len(), 1);
        assert!(!session.is_active());
    }

    #[test]
    fn rejected_skip_leaves_window_closed() {
        let mut state = PlaybackState::default();
        let mut session = SeekSession::new();
        let mut timers = Timers::new();
        let mut engine = RecordingEngine::default();
        engine.reject_seeks();

        let skipped = session.skip(
            &mut state,
            &mut engine,
            &mut timers,
            Instant::now(),
            DEBOUNCE,
            Fraction::position(0.5),
        );

        assert!(!skipped);
        assert!(!session.is_active());
        assert!(!timers.is_armed(TimerKey::SeekDebounce));
        assert_eq!(state.position, Fraction::ZERO);
    }
}
