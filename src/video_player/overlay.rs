// SPDX-License-Identifier: MPL-2.0
//! Overlay visibility state machine for the transport controls.
//!
//! The overlay starts visible. Pointer activity shows it and restarts the idle
//! timer; when the timer fires the overlay hides only if playback is running
//! and no submenu is open, otherwise the timer is simply re-armed.

use super::timers::{TimerKey, Timers};
use crate::domain::video::OverlayVisibility;
use std::time::{Duration, Instant};

/// Overlay visibility state.
#[derive(Debug, Clone, Default)]
pub struct State {
    visibility: OverlayVisibility,
}

/// Messages for the overlay.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    /// Pointer moved over the player.
    PointerMoved,
    /// The idle timer elapsed.
    IdleElapsed { playing: bool, menu_open: bool },
    /// Playback stopped, by the user or by a terminal failure.
    Paused,
    /// Playback resumed; the overlay may hide again once idle.
    Resumed,
}

/// Effects produced by overlay visibility changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    VisibilityChanged(bool),
}

impl State {
    /// Handle an overlay message, arming or re-arming the idle timer as needed.
    pub fn handle(
        &mut self,
        msg: Message,
        timers: &mut Timers,
        now: Instant,
        idle: Duration,
    ) -> Effect {
        match msg {
            Message::PointerMoved => {
                timers.arm(TimerKey::IdleHide, now, idle);
                self.show()
            }
            Message::IdleElapsed { playing, menu_open } => {
                if playing && !menu_open {
                    if self.visibility.is_visible() {
                        self.visibility = OverlayVisibility::Hidden;
                        return Effect::VisibilityChanged(false);
                    }
                    return Effect::None;
                }
                timers.arm(TimerKey::IdleHide, now, idle);
                Effect::None
            }
            Message::Paused => self.show(),
            Message::Resumed => {
                timers.arm(TimerKey::IdleHide, now, idle);
                Effect::None
            }
        }
    }

    #[must_use]
    pub fn visibility(&self) -> OverlayVisibility {
        self.visibility
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    fn show(&mut self) -> Effect {
        if self.visibility.is_visible() {
            return Effect::None;
        }
        self.visibility = OverlayVisibility::Visible;
        Effect::VisibilityChanged(true)
    }
}
