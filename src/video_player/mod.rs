// SPDX-License-Identifier: MPL-2.0
//! Video playback controller for adaptive streams.
//!
//! The controller drives an external streaming [`Engine`] and keeps the
//! transport UI consistent with the engine's asynchronous, out-of-order
//! events: seeks are coalesced, errors are retried within a budget, and the
//! overlay hides itself while playback runs.

pub mod controller;
pub mod controls;
pub mod driver;
pub mod engine;
pub mod overlay;
pub mod playlist;
pub mod reconciler;
pub mod recovery;
pub mod seek;
mod state;
pub mod time_units;
pub mod timers;

pub use controller::{Effect, Message, PlaybackController};
pub use controls::{KeyCommand, Menus};
pub use driver::{spawn, PlayerHandle, Spawned};
pub use engine::{Engine, EngineConfig, EngineEvent};
pub use playlist::{Episode, Playlist};
pub use state::PlaybackState;
pub use timers::TimerKey;
