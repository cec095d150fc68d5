// SPDX-License-Identifier: MPL-2.0
//! Playback state store.
//!
//! Holds everything the host needs to render the player. The store is owned by
//! the controller and only mutated by the reconciler, the seek coordinator, the
//! recovery policy and the control surface.

use super::engine::EngineConfig;
use crate::domain::error::PlaybackError;
use crate::domain::video::{Fraction, PlaybackRate, Resolution, Volume};

/// Current status of the player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub is_muted: bool,
    pub volume: Volume,
    /// Fraction of the duration played.
    pub position: Fraction,
    /// Fraction of the duration loaded.
    pub buffered: Fraction,
    pub duration_secs: f64,
    pub is_buffering: bool,
    pub rate: PlaybackRate,
    pub resolution: Resolution,
    /// Set only once recovery has given up.
    pub last_error: Option<PlaybackError>,
    /// Becomes true on the first playback start of the current episode.
    pub has_started_playing: bool,
}

impl PlaybackState {
    /// Creates a fresh state with the given audio preferences.
    #[must_use]
    pub fn new(volume: Volume, muted: bool) -> Self {
        Self {
            volume,
            is_muted: muted,
            ..Self::default()
        }
    }

    /// Clears per-episode progress while keeping audio and rate preferences.
    pub fn reset_for_episode(&mut self) {
        self.position = Fraction::ZERO;
        self.buffered = Fraction::ZERO;
        self.duration_secs = 0.0;
        self.is_buffering = false;
        self.last_error = None;
        self.has_started_playing = false;
        self.is_playing = true;
    }

    /// Current play time in seconds, derived from the position fraction.
    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        self.position.to_secs(self.duration_secs)
    }

    /// Builds the configuration the engine should be running with.
    #[must_use]
    pub fn engine_config(&self, source_url: Option<&str>) -> EngineConfig {
        EngineConfig {
            source_url: source_url.map(str::to_owned),
            playing: self.is_playing,
            volume: self.volume,
            muted: self.is_muted,
            rate: self.rate,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            is_muted: false,
            volume: Volume::default(),
            position: Fraction::ZERO,
            buffered: Fraction::ZERO,
            duration_secs: 0.0,
            is_buffering: false,
            rate: PlaybackRate::default(),
            resolution: Resolution::default(),
            last_error: None,
            has_started_playing: false,
        }
    }
}
