// SPDX-License-Identifier: MPL-2.0
//! Async driver running a controller on a tokio task.
//!
//! Host messages arrive on an unbounded channel and effects leave on another.
//! Between messages the task sleeps until the controller's next timer
//! deadline, then ticks it. Dropping every [`PlayerHandle`] stops the task and
//! tears the controller down, so no timer fires after the player is gone.

use super::controller::{Effect, Message, PlaybackController};
use super::engine::Engine;
use crate::error::{Error, Result};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Cloneable handle for sending messages to a running player.
#[derive(Clone)]
pub struct PlayerHandle {
    tx: mpsc::UnboundedSender<Message>,
}

impl PlayerHandle {
    /// Queues a message for the player task.
    pub fn send(&self, message: Message) -> Result<()> {
        self.tx.send(message).map_err(|_| Error::PlayerClosed)
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl std::fmt::Debug for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerHandle")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

/// A spawned player.
#[derive(Debug)]
pub struct Spawned<E: Engine> {
    pub handle: PlayerHandle,
    pub effects: mpsc::UnboundedReceiver<Effect>,
    /// Resolves to the torn-down controller once every handle is dropped.
    pub task: JoinHandle<PlaybackController<E>>,
}

/// Spawns `controller` on the current tokio runtime.
pub fn spawn<E>(controller: PlaybackController<E>) -> Spawned<E>
where
    E: Engine + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let (effect_tx, effects) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(controller, rx, effect_tx));
    Spawned {
        handle: PlayerHandle { tx },
        effects,
        task,
    }
}

async fn run<E: Engine>(
    mut controller: PlaybackController<E>,
    mut rx: mpsc::UnboundedReceiver<Message>,
    effect_tx: mpsc::UnboundedSender<Effect>,
) -> PlaybackController<E> {
    tracing::debug!("player task started");
    loop {
        let deadline = controller.next_deadline();
        let effects = tokio::select! {
            msg = rx.recv() => match msg {
                Some(msg) => controller.handle(msg, now()),
                None => break,
            },
            () = sleep_until(deadline) => controller.tick(now()),
        };
        for effect in effects {
            // A host that stopped listening still gets a clean shutdown.
            if effect_tx.send(effect).is_err() {
                tracing::trace!("effect receiver dropped");
            }
        }
    }
    controller.teardown();
    tracing::debug!("player task stopped");
    controller
}

/// Reads the tokio clock so paused-time tests stay consistent.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::video::Fraction;
    use crate::test_utils::RecordingEngine;
    use crate::video_player::engine::EngineEvent;
    use crate::video_player::playlist::{Episode, Playlist};
    use std::time::Duration;

    fn controller(engine: &RecordingEngine) -> PlaybackController<RecordingEngine> {
        PlaybackController::new(
            engine.clone(),
            Playlist::single(Episode::new("Movie", "movie", "https://cdn.example/movie.m3u8")),
            &Config::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn heartbeat_is_forwarded_while_playing() {
        let engine = RecordingEngine::default();
        let mut player = spawn(controller(&engine));

        player.handle.send(Message::TogglePlay).expect("player running");
        let effect = player.effects.recv().await.expect("effect");

        assert_eq!(
            effect,
            Effect::KeepAlive("https://cdn.example/movie.m3u8".into())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn debounced_seek_fires_on_timer() {
        let engine = RecordingEngine::default();
        let player = spawn(controller(&engine));

        player
            .handle
            .send(Message::Engine(EngineEvent::Duration(100.0)))
            .expect("player running");
        player.handle.send(Message::CommitSeek(0.2)).expect("player running");
        player.handle.send(Message::CommitSeek(0.5)).expect("player running");
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(engine.seeks(), vec![Fraction::position(0.5)]);

        drop(player.handle);
        let controller = player.task.await.expect("task joined");
        assert!(!controller.is_seeking());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_tears_down() {
        let engine = RecordingEngine::default();
        let player = spawn(controller(&engine));

        player.handle.send(Message::CommitSeek(0.7)).expect("player running");
        drop(player.handle);

        let controller = player.task.await.expect("task joined");
        assert_eq!(controller.next_deadline(), None);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(engine.seeks().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn send_fails_after_task_ends() {
        let engine = RecordingEngine::default();
        let player = spawn(controller(&engine));
        let extra = player.handle.clone();
        player.task.abort();
        let _ = player.task.await;

        assert!(matches!(
            extra.send(Message::TogglePlay),
            Err(Error::PlayerClosed)
        ));
    }
}
