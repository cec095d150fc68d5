// SPDX-License-Identifier: MPL-2.0
//! Video playback newtypes.
//!
//! This module provides type-safe wrappers for video playback values,
//! ensuring they are always within valid ranges or drawn from a fixed set.

use std::fmt;

// =============================================================================
// Volume
// =============================================================================

/// Volume bounds (0.0 to 1.0).
pub mod volume_bounds {
    /// Minimum volume level.
    pub const MIN: f32 = 0.0;
    /// Maximum volume level.
    pub const MAX: f32 = 1.0;
    /// Default volume level.
    pub const DEFAULT: f32 = 0.5;
    /// Volume adjustment step per key press (10%).
    pub const STEP: f32 = 0.1;
}

/// Volume level, guaranteed to be within valid range (0.0–1.0).
///
/// This newtype enforces validity at the type level, making it impossible
/// to create an invalid volume value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a new volume level, clamping to valid range.
    ///
    /// `NaN` is treated as silence.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self(volume_bounds::MIN);
        }
        Self(volume.clamp(volume_bounds::MIN, volume_bounds::MAX))
    }

    /// Returns the volume value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true if volume is effectively silent (below audible threshold).
    #[must_use]
    pub fn is_silent(self) -> bool {
        self.0 < 0.001
    }

    /// Increases volume by one step, clamping to maximum.
    #[must_use]
    pub fn increase(self) -> Self {
        Self::new(self.0 + volume_bounds::STEP)
    }

    /// Decreases volume by one step, clamping to minimum.
    ///
    /// Lands exactly on zero when the remainder is below audible level, so
    /// repeated decrements reach silence despite float rounding.
    #[must_use]
    pub fn decrease(self) -> Self {
        let next = Self::new(self.0 - volume_bounds::STEP);
        if next.is_silent() {
            Self(volume_bounds::MIN)
        } else {
            next
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(volume_bounds::DEFAULT)
    }
}

// =============================================================================
// Fraction
// =============================================================================

/// A fraction of the stream duration, within `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Fraction(f64);

impl Fraction {
    /// The start of the stream.
    pub const ZERO: Self = Self(0.0);

    /// Largest value a playback position may take; the end is exclusive.
    pub const MAX_POSITION: f64 = 0.999_999;

    /// Creates a fraction, clamping to `0.0..=1.0`. `NaN` maps to zero.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Creates a playback position, clamping to `0.0..1.0`.
    #[must_use]
    pub fn position(value: f64) -> Self {
        Self(Self::new(value).0.min(Self::MAX_POSITION))
    }

    /// Converts a time offset into a position fraction of `duration_secs`.
    ///
    /// Returns `None` while the duration is still unknown.
    #[must_use]
    pub fn from_secs(secs: f64, duration_secs: f64) -> Option<Self> {
        (duration_secs > 0.0).then(|| Self::position(secs / duration_secs))
    }

    /// Returns the value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the offset in seconds for a stream of `duration_secs`.
    #[must_use]
    pub fn to_secs(self, duration_secs: f64) -> f64 {
        self.0 * duration_secs
    }
}

// =============================================================================
// PlaybackRate
// =============================================================================

/// Playback rate, restricted to the presets offered in the speed menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackRate {
    Quarter,
    Half,
    ThreeQuarters,
    #[default]
    Normal,
    OneAndQuarter,
    OneAndHalf,
    OneAndThreeQuarters,
    Double,
}

impl PlaybackRate {
    /// All rates in menu order.
    pub const ALL: [Self; 8] = [
        Self::Quarter,
        Self::Half,
        Self::ThreeQuarters,
        Self::Normal,
        Self::OneAndQuarter,
        Self::OneAndHalf,
        Self::OneAndThreeQuarters,
        Self::Double,
    ];

    /// Returns the rate multiplier.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Quarter => 0.25,
            Self::Half => 0.5,
            Self::ThreeQuarters => 0.75,
            Self::Normal => 1.0,
            Self::OneAndQuarter => 1.25,
            Self::OneAndHalf => 1.5,
            Self::OneAndThreeQuarters => 1.75,
            Self::Double => 2.0,
        }
    }

    /// Looks up the preset matching `value`, if any.
    #[must_use]
    pub fn from_value(value: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|rate| (rate.value() - value).abs() < 0.001)
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.value())
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Stream quality label offered in the resolution menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Resolution {
    #[default]
    Auto,
    P1080,
    P720,
    P480,
    P360,
}

impl Resolution {
    /// All resolutions in menu order.
    pub const ALL: [Self; 5] = [Self::Auto, Self::P1080, Self::P720, Self::P480, Self::P360];

    /// Returns the menu label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::P1080 => "1080p",
            Self::P720 => "720p",
            Self::P480 => "480p",
            Self::P360 => "360p",
        }
    }

    /// Looks up a resolution by its menu label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|res| res.label() == label)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Tests
// =============================================================================
