// SPDX-License-Identifier: MPL-2.0
//! Playback state machines.
//!
//! Phases that the controller would otherwise spread across boolean flags are
//! expressed here as enums.

/// Recovery phase of the current episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryPhase {
    /// Playback is flowing (or has not failed yet).
    #[default]
    Healthy,
    /// An error occurred and a retry is pending or in flight.
    Retrying,
    /// The retry budget is exhausted. Terminal until episode change or replay.
    Failed,
}

impl RecoveryPhase {
    /// Returns true if playback has failed terminally.
    #[must_use]
    pub fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Returns true if a retry is pending or in flight.
    #[must_use]
    pub fn is_retrying(self) -> bool {
        matches!(self, Self::Retrying)
    }
}

/// Visibility of the control overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayVisibility {
    #[default]
    Visible,
    Hidden,
}

impl OverlayVisibility {
    #[must_use]
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Submenu of the control bar. At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Menu {
    Speed,
    Resolution,
    Settings,
}
