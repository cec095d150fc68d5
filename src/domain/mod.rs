// SPDX-License-Identifier: MPL-2.0
//! Domain layer - playback value types with no I/O.
//!
//! # Modules
//!
//! - [`error`]: Engine and playback errors ([`EngineError`](error::EngineError),
//!   [`ErrorClass`](error::ErrorClass), [`PlaybackError`](error::PlaybackError))
//! - [`video`]: Playback value objects ([`Volume`](video::Volume),
//!   [`Fraction`](video::Fraction), [`PlaybackRate`](video::PlaybackRate),
//!   [`Resolution`](video::Resolution)) and phase enums

pub mod error;
pub mod video;
