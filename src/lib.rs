// SPDX-License-Identifier: MPL-2.0
//! `streamlens` is a playback controller for adaptive video streams.
//!
//! It sits between a host UI and a black-box streaming engine, reconciling
//! engine events with user input, retrying failures within a fixed budget and
//! navigating per-episode playlists.

#![doc(html_root_url = "https://docs.rs/streamlens/0.3.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod video_player;

#[cfg(test)]
mod test_utils;
