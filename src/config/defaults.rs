// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the controller. Constants are organized by category.
//!
//! # Categories
//!
//! - **Seek**: Debounce window for seek commits
//! - **Recovery**: Retry budget and retry delays
//! - **Overlay**: Control overlay idle timeout
//! - **Transport**: Skip step and volume step
//! - **Engine**: Read-ahead hint and keep-alive interval
//!
//! Volume bounds and the seek ceiling belong to the domain newtypes and are
//! re-exported here so every tunable can be found in one place.

use crate::domain::video::newtypes::volume_bounds;
use crate::domain::video::Fraction;

// ==========================================================================
// Seek Defaults
// ==========================================================================

/// Debounce window for seek commits (in milliseconds).
pub const DEFAULT_SEEK_DEBOUNCE_MS: u64 = 500;

/// Minimum seek debounce window.
pub const MIN_SEEK_DEBOUNCE_MS: u64 = 50;

/// Maximum seek debounce window.
pub const MAX_SEEK_DEBOUNCE_MS: u64 = 5_000;

/// Largest position fraction the seek bar can reach (the end is exclusive).
pub const MAX_POSITION_FRACTION: f64 = Fraction::MAX_POSITION;

// ==========================================================================
// Recovery Defaults
// ==========================================================================

/// Number of automatic retries before playback is declared failed.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Upper bound accepted from configuration for the retry budget.
pub const MAX_MAX_RETRIES: u32 = 10;

/// Delay before a retry is attempted (in milliseconds).
pub const DEFAULT_RETRY_DELAY_MS: u64 = 2_000;

/// Extra delay after a full engine reset before playback resumes (in milliseconds).
pub const DEFAULT_RETRY_RESET_DELAY_MS: u64 = 1_000;

// ==========================================================================
// Overlay Defaults
// ==========================================================================

/// Idle time before the control overlay hides (in milliseconds).
pub const DEFAULT_IDLE_HIDE_MS: u64 = 3_000;

/// Minimum overlay idle timeout.
pub const MIN_IDLE_HIDE_MS: u64 = 1_000;

/// Maximum overlay idle timeout.
pub const MAX_IDLE_HIDE_MS: u64 = 30_000;

// ==========================================================================
// Transport Defaults
// ==========================================================================

/// Seconds skipped by the skip forward/backward buttons and arrow keys.
pub const DEFAULT_SKIP_STEP_SECS: f64 = 10.0;

/// Minimum skip step.
pub const MIN_SKIP_STEP_SECS: f64 = 1.0;

/// Maximum skip step.
pub const MAX_SKIP_STEP_SECS: f64 = 120.0;

/// Initial playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = volume_bounds::DEFAULT;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = volume_bounds::MIN;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = volume_bounds::MAX;

/// Volume adjustment per arrow key press (10%).
pub const VOLUME_STEP: f32 = volume_bounds::STEP;

// ==========================================================================
// Engine Defaults
// ==========================================================================

/// Read-ahead window requested from the engine when it starts buffering.
pub const DEFAULT_READ_AHEAD_SECS: u64 = 60;

/// Interval between keep-alive pings while playing (5 minutes).
pub const DEFAULT_HEARTBEAT_SECS: u64 = 300;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Seek validation
    assert!(MIN_SEEK_DEBOUNCE_MS > 0);
    assert!(DEFAULT_SEEK_DEBOUNCE_MS >= MIN_SEEK_DEBOUNCE_MS);
    assert!(DEFAULT_SEEK_DEBOUNCE_MS <= MAX_SEEK_DEBOUNCE_MS);
    assert!(MAX_POSITION_FRACTION < 1.0);

    // Recovery validation
    assert!(DEFAULT_MAX_RETRIES > 0);
    assert!(DEFAULT_MAX_RETRIES <= MAX_MAX_RETRIES);
    assert!(DEFAULT_RETRY_DELAY_MS > 0);
    assert!(DEFAULT_RETRY_RESET_DELAY_MS > 0);

    // Overlay validation
    assert!(DEFAULT_IDLE_HIDE_MS >= MIN_IDLE_HIDE_MS);
    assert!(DEFAULT_IDLE_HIDE_MS <= MAX_IDLE_HIDE_MS);

    // Transport validation
    assert!(DEFAULT_SKIP_STEP_SECS >= MIN_SKIP_STEP_SECS);
    assert!(DEFAULT_SKIP_STEP_SECS <= MAX_SKIP_STEP_SECS);
    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(VOLUME_STEP > 0.0);

    // Engine validation
    assert!(DEFAULT_READ_AHEAD_SECS > 0);
    assert!(DEFAULT_HEARTBEAT_SECS > 0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_defaults_are_valid() {
        assert_eq!(DEFAULT_SEEK_DEBOUNCE_MS, 500);
        assert!(DEFAULT_SEEK_DEBOUNCE_MS >= MIN_SEEK_DEBOUNCE_MS);
    }

    #[test]
    fn recovery_defaults_match_retry_policy() {
        assert_eq!(DEFAULT_MAX_RETRIES, 3);
        assert_eq!(DEFAULT_RETRY_DELAY_MS, 2_000);
        assert_eq!(DEFAULT_RETRY_RESET_DELAY_MS, 1_000);
    }

    #[test]
    fn transport_defaults_are_valid() {
        assert_eq!(DEFAULT_SKIP_STEP_SECS, 10.0);
        assert!(DEFAULT_VOLUME >= MIN_VOLUME);
        assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    }

    #[test]
    fn default_volume_steps_cleanly_to_bounds() {
        use crate::domain::video::Volume;

        let mut volume = Volume::new(DEFAULT_VOLUME);
        for _ in 0..10 {
            volume = volume.increase();
        }
        assert!((volume.value() - MAX_VOLUME).abs() < f32::EPSILON);
        for _ in 0..20 {
            volume = volume.decrease();
        }
        assert!((volume.value() - MIN_VOLUME).abs() < f32::EPSILON);
        assert!(MAX_POSITION_FRACTION < 1.0);
    }

    #[test]
    fn overlay_default_is_three_seconds() {
        assert_eq!(DEFAULT_IDLE_HIDE_MS, 3_000);
    }
}
