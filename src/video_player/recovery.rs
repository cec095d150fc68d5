// SPDX-License-Identifier: MPL-2.0
//! Recovery policy.
//!
//! Errors are retried locally up to a fixed budget; only the error that
//! exceeds the budget is surfaced. Two retry strategies exist:
//!
//! - **Full reset** for stream-protocol failures: the engine's demuxer is
//!   reinitialized and playback restarts after an extra delay.
//! - **Soft resume** for everything else: play again from the last known
//!   position.
//!
//! ```text
//!   Healthy ──error (budget left)──▶ Retrying ──progress──▶ Healthy
//!      │                                │
//!      └────error (budget spent)────────┴──────▶ Failed (terminal)
//! ```

use super::engine::Engine;
use super::state::PlaybackState;
use super::timers::{TimerKey, Timers};
use crate::domain::error::{EngineError, ErrorClass, PlaybackError};
use crate::domain::video::RecoveryPhase;
use std::time::{Duration, Instant};

/// Retry bookkeeping for the current episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryState {
    pub attempts: u32,
    pub last_class: Option<ErrorClass>,
}

/// Decision taken for an engine error.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorOutcome {
    /// A retry was scheduled.
    Retrying { attempt: u32, class: ErrorClass },
    /// The budget is spent; the error must be surfaced.
    Failed(PlaybackError),
    /// Playback had already failed; the error is dropped.
    AlreadyFailed,
}

#[derive(Debug, Clone)]
pub struct RecoveryPolicy {
    phase: RecoveryPhase,
    retry: RetryState,
    max_retries: u32,
    /// Strategy to run when the retry delay elapses.
    scheduled: Option<ErrorClass>,
    resume_scheduled: bool,
}

impl RecoveryPolicy {
    #[must_use]
    pub fn new(max_retries: u32) -> Self {
        Self {
            phase: RecoveryPhase::Healthy,
            retry: RetryState::default(),
            max_retries,
            scheduled: None,
            resume_scheduled: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> RecoveryPhase {
        self.phase
    }

    #[must_use]
    pub fn retry_state(&self) -> RetryState {
        self.retry
    }

    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Handles an engine error, arming the retry timer when budget is left.
    ///
    /// On failure the caller owns the remaining teardown (seek session, host
    /// notification); this method records `last_error` and cancels pending
    /// retries.
    pub fn on_error(
        &mut self,
        error: &EngineError,
        state: &mut PlaybackState,
        timers: &mut Timers,
        now: Instant,
        retry_delay: Duration,
    ) -> ErrorOutcome {
        if self.phase.is_failed() {
            tracing::debug!(error = %error, "ignoring error after terminal failure");
            return ErrorOutcome::AlreadyFailed;
        }

        let class = ErrorClass::classify(error);
        self.retry.last_class = Some(class);

        if self.retry.attempts < self.max_retries {
            self.retry.attempts += 1;
            self.phase = RecoveryPhase::Retrying;
            self.scheduled = Some(class);
            self.resume_scheduled = false;
            timers.cancel(TimerKey::RetryResume);
            timers.arm(TimerKey::RetryDelay, now, retry_delay);
            tracing::info!(
                attempt = self.retry.attempts,
                max = self.max_retries,
                %class,
                "playback error, retry scheduled"
            );
            return ErrorOutcome::Retrying {
                attempt: self.retry.attempts,
                class,
            };
        }

        let failure = PlaybackError::from_engine(error);
        tracing::warn!(error = %failure, attempts = self.retry.attempts, "playback failed");
        self.phase = RecoveryPhase::Failed;
        state.last_error = Some(failure.clone());
        self.scheduled = None;
        self.resume_scheduled = false;
        timers.cancel(TimerKey::RetryDelay);
        timers.cancel(TimerKey::RetryResume);
        ErrorOutcome::Failed(failure)
    }

    /// Runs the retry once its delay elapsed. Returns the class whose
    /// strategy ran, or `None` when the retry had been cancelled.
    pub fn retry_due<E: Engine>(
        &mut self,
        state: &mut PlaybackState,
        engine: &mut E,
        timers: &mut Timers,
        now: Instant,
        reset_delay: Duration,
    ) -> Option<ErrorClass> {
        let class = self.scheduled.take()?;
        match class {
            ErrorClass::StreamProtocol => {
                tracing::debug!("full engine reset");
                state.has_started_playing = false;
                engine.reinitialize();
                self.resume_scheduled = true;
                timers.arm(TimerKey::RetryResume, now, reset_delay);
            }
            ErrorClass::Network | ErrorClass::Unknown => {
                tracing::debug!(position = state.position.value(), "soft resume");
                state.is_playing = true;
                if let Err(err) = engine.seek_to(state.position) {
                    tracing::debug!(error = %err, "resume seek rejected");
                }
            }
        }
        Some(class)
    }

    /// Restarts playback after a full engine reset.
    pub fn resume_due(&mut self, state: &mut PlaybackState) {
        if std::mem::take(&mut self.resume_scheduled) {
            state.is_playing = true;
        }
    }

    /// Playback is flowing again. A retry already scheduled still runs.
    pub fn on_flowing(&mut self) {
        if self.phase.is_retrying() {
            tracing::debug!(attempts = self.retry.attempts, "playback recovered");
            self.phase = RecoveryPhase::Healthy;
        }
    }

    /// Forgets every error, e.g. on episode change or manual replay.
    pub fn reset(&mut self, timers: &mut Timers) {
        timers.cancel(TimerKey::RetryDelay);
        timers.cancel(TimerKey::RetryResume);
        self.phase = RecoveryPhase::Healthy;
        self.retry = RetryState::default();
        self.scheduled = None;
        self.resume_scheduled = false;
    }
}
