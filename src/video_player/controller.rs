// SPDX-License-Identifier: MPL-2.0
//! Playback controller.
//!
//! Composes the state store, reconciler, seek coordinator, recovery policy,
//! playlist, control surface and overlay behind one reducer. Every mutation
//! happens inside [`PlaybackController::handle`] or
//! [`PlaybackController::tick`]; both take the current instant so scheduling
//! is deterministic and the caller never blocks.
//!
//! After each call the controller converges the engine to the state: the
//! [`EngineConfig`] is re-applied when it changed, the keep-alive
//! heartbeat is armed exactly while playback runs, and every start or stop of
//! playback is forwarded to the overlay.

use super::controls::{self, KeyCommand, Menus};
use super::engine::{Engine, EngineConfig, EngineEvent};
use super::overlay;
use super::playlist::Playlist;
use super::reconciler::{reconcile, ProgressGate, Reconciled};
use super::recovery::{ErrorOutcome, RecoveryPolicy};
use super::seek::SeekSession;
use super::state::PlaybackState;
use super::time_units::format_timestamp;
use super::timers::{TimerKey, Timers};
use crate::config::{Config, Timings, DEFAULT_VOLUME};
use crate::domain::error::{ErrorClass, PlaybackError};
use crate::domain::video::{Menu, PlaybackRate, RecoveryPhase, Resolution, Volume};
use iced_core::keyboard;
use std::time::Instant;

/// Inputs accepted by the controller.
#[derive(Debug, Clone)]
pub enum Message {
    /// Event forwarded from the engine.
    Engine(EngineEvent),
    /// User grabbed the seek bar.
    BeginSeek,
    /// Seek bar dragged to a fraction.
    UpdateSeek(f64),
    /// Seek bar released at a fraction.
    CommitSeek(f64),
    TogglePlay,
    ToggleMute,
    SetVolume(f32),
    SkipForward,
    SkipBackward,
    SetPlaybackRate(PlaybackRate),
    SetResolution(Resolution),
    ToggleMenu(Menu),
    CloseMenus,
    RequestFullscreen,
    ExitFullscreen,
    /// Key pressed while the player may have focus.
    KeyPressed(keyboard::Key),
    FocusChanged(bool),
    PointerMoved,
    NextEpisode,
    PreviousEpisode,
    SelectEpisode(String),
    /// Replace the playlist wholesale, e.g. when a new title opens.
    LoadPlaylist(Playlist),
    /// Swap to another server's list of the same title.
    SwitchServer(Playlist),
}

/// Effects the host must carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Recovery gave up. Emitted once per terminal failure.
    PlaybackFailed(PlaybackError),
    /// The current episode changed to this index.
    EpisodeChanged(usize),
    /// Ping the stream origin to keep the connection alive.
    KeepAlive(String),
    EnterFullscreen,
    ExitFullscreen,
    /// The last key press was handled; suppress its default action.
    KeyCaptured,
}

/// Video playback controller driving an [`Engine`].
#[derive(Debug)]
pub struct PlaybackController<E: Engine> {
    engine: E,
    state: PlaybackState,
    seek: SeekSession,
    recovery: RecoveryPolicy,
    playlist: Playlist,
    menus: Menus,
    overlay: overlay::State,
    timers: Timers,
    timings: Timings,
    focused: bool,
    fullscreen: bool,
    applied: Option<EngineConfig>,
    /// `is_playing` as of the last sync.
    was_playing: bool,
    torn_down: bool,
}

impl<E: Engine> PlaybackController<E> {
    /// Creates a paused controller for `playlist`, using the audio
    /// preferences and timing overrides from `config`.
    pub fn new(engine: E, playlist: Playlist, config: &Config) -> Self {
        let volume = Volume::new(config.volume.unwrap_or(DEFAULT_VOLUME));
        let muted = config.muted.unwrap_or(false);
        Self::with_timings(
            engine,
            playlist,
            Timings::from_config(config),
            PlaybackState::new(volume, muted),
        )
    }

    /// Creates a controller from already resolved parts.
    pub fn with_timings(
        engine: E,
        playlist: Playlist,
        timings: Timings,
        state: PlaybackState,
    ) -> Self {
        let mut controller = Self {
            engine,
            state,
            seek: SeekSession::new(),
            recovery: RecoveryPolicy::new(timings.max_retries),
            playlist,
            menus: Menus::default(),
            overlay: overlay::State::default(),
            timers: Timers::new(),
            timings,
            focused: false,
            fullscreen: false,
            applied: None,
            was_playing: false,
            torn_down: false,
        };
        controller.sync(Instant::now());
        controller
    }

    /// Handle a message.
    ///
    /// Note: Takes `Message` by value following Iced's `update(message: Message)` pattern.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.torn_down {
            return effects;
        }
        match msg {
            Message::Engine(event) => self.on_engine_event(event, now, &mut effects),
            Message::BeginSeek => self.seek.begin(&self.state),
            Message::UpdateSeek(fraction) => self.seek.update(&mut self.state, fraction),
            Message::CommitSeek(fraction) => self.seek.commit(
                &mut self.state,
                &mut self.timers,
                now,
                self.timings.seek_debounce,
                fraction,
            ),
            Message::TogglePlay => self.toggle_play(),
            Message::ToggleMute => controls::toggle_mute(&mut self.state),
            Message::SetVolume(volume) => controls::set_volume(&mut self.state, Volume::new(volume)),
            Message::SkipForward => self.skip(self.timings.skip_step_secs, now),
            Message::SkipBackward => self.skip(-self.timings.skip_step_secs, now),
            Message::SetPlaybackRate(rate) => {
                self.state.rate = rate;
                self.menus.close(Menu::Speed);
            }
            Message::SetResolution(resolution) => {
                self.state.resolution = resolution;
                self.engine.prefer_resolution(resolution);
                self.menus.close(Menu::Resolution);
            }
            Message::ToggleMenu(menu) => self.menus.toggle(menu),
            Message::CloseMenus => self.menus.close_all(),
            Message::RequestFullscreen => {
                if !self.fullscreen {
                    self.fullscreen = true;
                    effects.push(Effect::EnterFullscreen);
                }
            }
            Message::ExitFullscreen => {
                if self.fullscreen {
                    self.fullscreen = false;
                    effects.push(Effect::ExitFullscreen);
                }
            }
            Message::KeyPressed(key) => self.on_key(&key, now, &mut effects),
            Message::FocusChanged(focused) => self.focused = focused,
            Message::PointerMoved => {
                self.overlay.handle(
                    overlay::Message::PointerMoved,
                    &mut self.timers,
                    now,
                    self.timings.idle_hide,
                );
            }
            Message::NextEpisode => {
                if self.playlist.has_next() {
                    let index = self.playlist.current_index() + 1;
                    self.change_episode(index, &mut effects);
                }
            }
            Message::PreviousEpisode => {
                if self.playlist.has_prev() {
                    let index = self.playlist.current_index() - 1;
                    self.change_episode(index, &mut effects);
                }
            }
            Message::SelectEpisode(slug) => match self.playlist.index_of(&slug) {
                Some(index) => self.change_episode(index, &mut effects),
                None => tracing::debug!(%slug, "unknown episode selected"),
            },
            Message::LoadPlaylist(playlist) => {
                let index = playlist.current_index();
                self.replace_playlist(playlist, index, &mut effects);
            }
            Message::SwitchServer(playlist) => self.switch_server(playlist, &mut effects),
        }
        self.sync(now);
        effects
    }

    /// Fires every timer due at `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.torn_down {
            return effects;
        }
        for key in self.timers.take_due(now) {
            match key {
                TimerKey::SeekDebounce => {
                    self.seek.flush(&mut self.state, &mut self.engine);
                }
                TimerKey::RetryDelay => {
                    let ran = self.recovery.retry_due(
                        &mut self.state,
                        &mut self.engine,
                        &mut self.timers,
                        now,
                        self.timings.retry_reset_delay,
                    );
                    if ran == Some(ErrorClass::StreamProtocol) {
                        // A reinitialized engine has forgotten its configuration.
                        self.applied = None;
                    }
                }
                TimerKey::RetryResume => self.recovery.resume_due(&mut self.state),
                TimerKey::IdleHide => {
                    let msg = overlay::Message::IdleElapsed {
                        playing: self.state.is_playing,
                        menu_open: self.menus.any_open(),
                    };
                    self.overlay
                        .handle(msg, &mut self.timers, now, self.timings.idle_hide);
                }
                TimerKey::Heartbeat => {
                    if let Some(episode) = self.playlist.current() {
                        if self.state.is_playing {
                            tracing::trace!(url = %episode.stream_url, "keep-alive");
                            effects.push(Effect::KeepAlive(episode.stream_url.clone()));
                        }
                    }
                }
            }
        }
        self.sync(now);
        effects
    }

    /// Earliest pending timer deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Cancels every pending timer. Later messages and ticks are ignored.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.timers.cancel_all();
        self.seek = SeekSession::new();
        tracing::debug!("playback controller torn down");
    }

    fn on_engine_event(&mut self, event: EngineEvent, now: Instant, effects: &mut Vec<Effect>) {
        let gate = ProgressGate {
            seek_active: self.seek.is_active(),
            overlay_visible: self.overlay.is_visible(),
        };
        match reconcile(
            &mut self.state,
            event,
            gate,
            &mut self.engine,
            self.timings.read_ahead,
        ) {
            Reconciled::Flowing => self.recovery.on_flowing(),
            Reconciled::Applied | Reconciled::Ignored => {}
            Reconciled::Error(err) => {
                let outcome = self.recovery.on_error(
                    &err,
                    &mut self.state,
                    &mut self.timers,
                    now,
                    self.timings.retry_delay,
                );
                if let ErrorOutcome::Failed(failure) = outcome {
                    self.seek.clear(&mut self.timers);
                    self.state.is_playing = false;
                    self.state.is_buffering = false;
                    effects.push(Effect::PlaybackFailed(failure));
                }
            }
        }
    }

    fn on_key(&mut self, key: &keyboard::Key, now: Instant, effects: &mut Vec<Effect>) {
        if !self.focused {
            return;
        }
        let Some(command) = KeyCommand::from_key(key) else {
            return;
        };
        effects.push(Effect::KeyCaptured);
        match command {
            KeyCommand::SkipBackward => self.skip(-self.timings.skip_step_secs, now),
            KeyCommand::SkipForward => self.skip(self.timings.skip_step_secs, now),
            KeyCommand::VolumeUp => {
                let volume = self.state.volume.increase();
                controls::set_volume(&mut self.state, volume);
            }
            KeyCommand::VolumeDown => {
                let volume = self.state.volume.decrease();
                controls::set_volume(&mut self.state, volume);
            }
            KeyCommand::TogglePlay => self.toggle_play(),
        }
    }

    fn toggle_play(&mut self) {
        if self.recovery.phase().is_failed() {
            tracing::info!("manual replay after failure");
            self.recovery.reset(&mut self.timers);
            self.state.last_error = None;
            self.state.is_playing = true;
            return;
        }

        if !self.state.has_started_playing && !self.state.is_playing {
            self.state.has_started_playing = true;
        }
        self.state.is_playing = !self.state.is_playing;
    }

    fn skip(&mut self, delta_secs: f64, now: Instant) {
        let current = self.engine.current_time();
        let Some(target) = controls::skip_target(&self.state, current, delta_secs) else {
            return;
        };
        self.seek.skip(
            &mut self.state,
            &mut self.engine,
            &mut self.timers,
            now,
            self.timings.seek_debounce,
            target,
        );
    }

    fn change_episode(&mut self, index: usize, effects: &mut Vec<Effect>) {
        if !self.playlist.set_current(index) {
            return;
        }
        self.reset_episode();
        tracing::info!(
            index,
            episode = self.playlist.current().map(|ep| ep.name.as_str()),
            "episode changed"
        );
        effects.push(Effect::EpisodeChanged(index));
    }

    /// Installs a new list. Nothing of the previous title survives, even when
    /// the new list is empty.
    fn replace_playlist(&mut self, playlist: Playlist, index: usize, effects: &mut Vec<Effect>) {
        self.playlist = playlist;
        if self.playlist.is_empty() {
            tracing::info!("empty playlist loaded");
            self.reset_episode();
            self.state.is_playing = false;
            return;
        }
        self.change_episode(index, effects);
    }

    fn reset_episode(&mut self) {
        self.seek.clear(&mut self.timers);
        self.recovery.reset(&mut self.timers);
        self.state.reset_for_episode();
    }

    fn switch_server(&mut self, playlist: Playlist, effects: &mut Vec<Effect>) {
        let index = self
            .playlist
            .current()
            .and_then(|ep| playlist.index_of_name(&ep.name))
            .unwrap_or(0);
        tracing::info!(index, episodes = playlist.len(), "switching server");
        self.replace_playlist(playlist, index, effects);
    }

    /// Converges the engine configuration, the heartbeat and the overlay to
    /// the state.
    fn sync(&mut self, now: Instant) {
        let config = self
            .state
            .engine_config(self.playlist.current().map(|ep| ep.stream_url.as_str()));
        if self.applied.as_ref() != Some(&config) {
            self.engine.apply(&config);
            self.applied = Some(config);
        }

        if self.state.is_playing != self.was_playing {
            self.was_playing = self.state.is_playing;
            let msg = if self.state.is_playing {
                overlay::Message::Resumed
            } else {
                overlay::Message::Paused
            };
            self.overlay
                .handle(msg, &mut self.timers, now, self.timings.idle_hide);
        }

        let beating = self.timers.is_armed(TimerKey::Heartbeat);
        if self.state.is_playing && !beating {
            self.timers.arm(TimerKey::Heartbeat, now, self.timings.heartbeat);
        } else if !self.state.is_playing && beating {
            self.timers.cancel(TimerKey::Heartbeat);
        }
    }

    // Presentation queries

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[must_use]
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    #[must_use]
    pub fn menus(&self) -> Menus {
        self.menus
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    #[must_use]
    pub fn recovery_phase(&self) -> RecoveryPhase {
        self.recovery.phase()
    }

    /// Errors retried so far for the current episode.
    #[must_use]
    pub fn retry_attempts(&self) -> u32 {
        self.recovery.retry_state().attempts
    }

    #[must_use]
    pub fn is_seeking(&self) -> bool {
        self.seek.is_active()
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    #[must_use]
    pub fn show_failure_overlay(&self) -> bool {
        self.state.last_error.is_some()
    }

    /// Text for the failure overlay. Never the raw engine message.
    #[must_use]
    pub fn failure_message(&self) -> Option<(&'static str, &'static str)> {
        self.show_failure_overlay()
            .then_some((PlaybackError::USER_MESSAGE, PlaybackError::USER_GUIDANCE))
    }

    #[must_use]
    pub fn show_buffering(&self) -> bool {
        self.state.is_buffering && !self.show_failure_overlay()
    }

    /// The poster covers the player until playback first starts.
    #[must_use]
    pub fn show_poster(&self) -> bool {
        !self.state.has_started_playing && !self.show_failure_overlay()
    }

    #[must_use]
    pub fn episode_label(&self) -> Option<(usize, usize)> {
        self.playlist.label()
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.playlist.has_next()
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.playlist.has_prev()
    }

    #[must_use]
    pub fn elapsed_label(&self) -> String {
        format_timestamp(self.state.elapsed_secs())
    }

    #[must_use]
    pub fn duration_label(&self) -> String {
        format_timestamp(self.state.duration_secs)
    }
}
