// SPDX-License-Identifier: MPL-2.0
//! Control surface: transport actions, submenus and keyboard shortcuts.

use super::state::PlaybackState;
use crate::domain::video::{Fraction, Menu, Volume};
use iced_core::keyboard::{self, key::Named};

/// Transport action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    SkipBackward,
    SkipForward,
    VolumeUp,
    VolumeDown,
    TogglePlay,
}

impl KeyCommand {
    /// Maps a pressed key to its transport command.
    #[must_use]
    pub fn from_key(key: &keyboard::Key) -> Option<Self> {
        match key {
            keyboard::Key::Named(Named::ArrowLeft) => Some(Self::SkipBackward),
            keyboard::Key::Named(Named::ArrowRight) => Some(Self::SkipForward),
            keyboard::Key::Named(Named::ArrowUp) => Some(Self::VolumeUp),
            keyboard::Key::Named(Named::ArrowDown) => Some(Self::VolumeDown),
            keyboard::Key::Named(Named::Space) => Some(Self::TogglePlay),
            keyboard::Key::Character(c) if c.as_str() == " " => Some(Self::TogglePlay),
            _ => None,
        }
    }
}

/// Which submenu is open, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Menus {
    open: Option<Menu>,
}

impl Menus {
    /// Opens `menu` (closing any other) or closes it if already open.
    pub fn toggle(&mut self, menu: Menu) {
        self.open = if self.open == Some(menu) {
            None
        } else {
            Some(menu)
        };
    }

    /// Closes `menu` if it is the open one.
    pub fn close(&mut self, menu: Menu) {
        if self.open == Some(menu) {
            self.open = None;
        }
    }

    pub fn close_all(&mut self) {
        self.open = None;
    }

    #[must_use]
    pub fn is_open(&self, menu: Menu) -> bool {
        self.open == Some(menu)
    }

    #[must_use]
    pub fn any_open(&self) -> bool {
        self.open.is_some()
    }

    #[must_use]
    pub fn open(&self) -> Option<Menu> {
        self.open
    }
}

/// Sets the volume, muting at zero and unmuting when raised from mute.
pub fn set_volume(state: &mut PlaybackState, volume: Volume) {
    state.volume = volume;
    if volume.is_silent() {
        state.is_muted = true;
    } else if state.is_muted {
        state.is_muted = false;
    }
}

pub fn toggle_mute(state: &mut PlaybackState) {
    state.is_muted = !state.is_muted;
}

/// Target of a relative skip from `current_secs`, clamped to the stream.
///
/// `None` while the duration is unknown.
#[must_use]
pub fn skip_target(state: &PlaybackState, current_secs: f64, delta_secs: f64) -> Option<Fraction> {
    let duration = state.duration_secs;
    if duration <= 0.0 {
        return None;
    }
    let target = (current_secs + delta_secs).clamp(0.0, duration);
    Fraction::from_secs(target, duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn arrow_keys_and_space_are_bound() {
        let named = |n| keyboard::Key::Named(n);
        assert_eq!(
            KeyCommand::from_key(&named(Named::ArrowLeft)),
            Some(KeyCommand::SkipBackward)
        );
        assert_eq!(
            KeyCommand::from_key(&named(Named::ArrowRight)),
            Some(KeyCommand::SkipForward)
        );
        assert_eq!(
            KeyCommand::from_key(&named(Named::ArrowUp)),
            Some(KeyCommand::VolumeUp)
        );
        assert_eq!(
            KeyCommand::from_key(&named(Named::ArrowDown)),
            Some(KeyCommand::VolumeDown)
        );
        assert_eq!(
            KeyCommand::from_key(&named(Named::Space)),
            Some(KeyCommand::TogglePlay)
        );
        assert_eq!(
            KeyCommand::from_key(&keyboard::Key::Character(" ".into())),
            Some(KeyCommand::TogglePlay)
        );
        assert_eq!(KeyCommand::from_key(&named(Named::Enter)), None);
        assert_eq!(KeyCommand::from_key(&keyboard::Key::Character("m".into())), None);
    }

    #[test]
    fn opening_a_menu_closes_the_others() {
        let mut menus = Menus::default();
        menus.toggle(Menu::Settings);
        menus.toggle(Menu::Speed);

        assert!(menus.is_open(Menu::Speed));
        assert!(!menus.is_open(Menu::Settings));
        assert!(!menus.is_open(Menu::Resolution));

        menus.toggle(Menu::Speed);
        assert!(!menus.any_open());
    }

    #[test]
    fn close_only_affects_named_menu() {
        let mut menus = Menus::default();
        menus.toggle(Menu::Resolution);
        menus.close(Menu::Speed);
        assert!(menus.is_open(Menu::Resolution));
        menus.close(Menu::Resolution);
        assert_eq!(menus.open(), None);
    }

    #[test]
    fn zero_volume_mutes() {
        let mut state = PlaybackState::default();
        set_volume(&mut state, Volume::new(0.0));
        assert!(state.is_muted);
    }

    #[test]
    fn raising_volume_unmutes() {
        let mut state = PlaybackState {
            is_muted: true,
            ..PlaybackState::default()
        };
        set_volume(&mut state, Volume::new(0.3));
        assert!(!state.is_muted);
        assert_abs_diff_eq!(state.volume.value(), 0.3);
    }

    #[test]
    fn skip_target_clamps_to_stream_bounds() {
        let state = PlaybackState {
            duration_secs: 100.0,
            ..PlaybackState::default()
        };
        let back = skip_target(&state, 4.0, -10.0).expect("duration known");
        assert_eq!(back, Fraction::ZERO);

        let forward = skip_target(&state, 95.0, 10.0).expect("duration known");
        assert_abs_diff_eq!(forward.value(), Fraction::MAX_POSITION);

        let mid = skip_target(&state, 40.0, 10.0).expect("duration known");
        assert_abs_diff_eq!(mid.value(), 0.5);
    }

    #[test]
    fn skip_target_needs_duration() {
        assert!(skip_target(&PlaybackState::default(), 5.0, 10.0).is_none());
    }
}
