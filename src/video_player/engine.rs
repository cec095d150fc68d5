// SPDX-License-Identifier: MPL-2.0
//! Boundary with the adaptive-streaming engine.
//!
//! The engine is a black box: it receives a continuously applied
//! [`EngineConfig`] plus a few imperative commands, and reports what happens
//! through [`EngineEvent`]s which the host forwards to the controller.

use crate::domain::error::EngineError;
use crate::domain::video::{Fraction, PlaybackRate, Resolution, Volume};
use std::time::Duration;

/// Configuration the engine should converge to.
///
/// The controller re-applies it whenever any field changes.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Stream to play. `None` while no episode is loaded.
    pub source_url: Option<String>,
    pub playing: bool,
    pub volume: Volume,
    pub muted: bool,
    pub rate: PlaybackRate,
}

/// Events emitted by the engine, in roughly chronological order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Periodic progress report, both values as fractions of the duration.
    Progress { played: f64, loaded: f64 },
    /// Stream duration became known or changed.
    Duration(f64),
    BufferStart,
    BufferEnd,
    /// Playback actually started producing frames.
    PlayStart,
    Error(EngineError),
}

/// Commands the controller issues to the engine it owns.
pub trait Engine {
    /// Converge to `config`.
    fn apply(&mut self, config: &EngineConfig);

    /// Jump to `position` of the current stream.
    fn seek_to(&mut self, position: Fraction) -> Result<(), EngineError>;

    /// Current play time in seconds.
    fn current_time(&self) -> f64;

    /// Ask for a larger read-ahead buffer. Best effort.
    fn extend_read_ahead(&mut self, window: Duration) -> Result<(), EngineError>;

    /// Tear down internal demuxer state so the next play starts from scratch.
    fn reinitialize(&mut self);

    /// Advisory quality preference. Engines without manual quality selection
    /// ignore it.
    fn prefer_resolution(&mut self, _resolution: Resolution) {}
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn apply(&mut self, config: &EngineConfig) {
        (**self).apply(config);
    }

    fn seek_to(&mut self, position: Fraction) -> Result<(), EngineError> {
        (**self).seek_to(position)
    }

    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn extend_read_ahead(&mut self, window: Duration) -> Result<(), EngineError> {
        (**self).extend_read_ahead(window)
    }

    fn reinitialize(&mut self) {
        (**self).reinitialize();
    }

    fn prefer_resolution(&mut self, resolution: Resolution) {
        (**self).prefer_resolution(resolution);
    }
}
