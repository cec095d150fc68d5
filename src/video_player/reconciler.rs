// SPDX-License-Identifier: MPL-2.0
//! Event reconciler.
//!
//! Merges engine events into the [`PlaybackState`]. The engine is the source
//! of truth for position except while the user is seeking or cannot see the
//! seek bar; progress reports arriving in those windows are dropped whole.

use super::engine::{Engine, EngineEvent};
use super::state::PlaybackState;
use crate::domain::error::EngineError;
use crate::domain::video::Fraction;
use std::time::Duration;

/// Conditions under which progress reports are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressGate {
    pub seek_active: bool,
    pub overlay_visible: bool,
}

impl ProgressGate {
    #[must_use]
    pub fn accepts_progress(self) -> bool {
        !self.seek_active && self.overlay_visible
    }
}

/// What the reconciler did with an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciled {
    /// State was updated; playback is flowing.
    Flowing,
    /// State was updated.
    Applied,
    /// The event was dropped without touching state.
    Ignored,
    /// The event is an error for the recovery policy.
    Error(EngineError),
}

/// Applies one engine event to `state`.
pub fn reconcile<E: Engine>(
    state: &mut PlaybackState,
    event: EngineEvent,
    gate: ProgressGate,
    engine: &mut E,
    read_ahead: Duration,
) -> Reconciled {
    match event {
        EngineEvent::Progress { played, loaded } => {
            if !gate.accepts_progress() {
                return Reconciled::Ignored;
            }
            state.position = Fraction::position(played);
            state.buffered = Fraction::new(loaded);
            Reconciled::Flowing
        }
        EngineEvent::Duration(secs) => {
            state.duration_secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
            Reconciled::Applied
        }
        EngineEvent::BufferStart => {
            state.is_buffering = true;
            if let Err(err) = engine.extend_read_ahead(read_ahead) {
                tracing::debug!(error = %err, "engine declined read-ahead hint");
            }
            Reconciled::Applied
        }
        EngineEvent::BufferEnd => {
            state.is_buffering = false;
            Reconciled::Applied
        }
        EngineEvent::PlayStart => {
            state.has_started_playing = true;
            Reconciled::Flowing
        }
        EngineEvent::Error(err) => Reconciled::Error(err),
    }
}
