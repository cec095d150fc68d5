// SPDX-License-Identifier: MPL-2.0
//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;
use streamlens::domain::error::EngineError;
use streamlens::domain::video::Fraction;
use streamlens::video_player::{Engine, EngineConfig, Episode, Playlist};

/// Something the scripted engine was told to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Apply(EngineConfig),
    Seek(Fraction),
    ReadAhead(Duration),
    Reinitialize,
}

/// Engine double whose clones share one call log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEngine {
    calls: Arc<Mutex<Vec<Call>>>,
    current_time: Arc<Mutex<f64>>,
}

impl ScriptedEngine {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn seeks(&self) -> Vec<Fraction> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Seek(pos) => Some(pos),
                _ => None,
            })
            .collect()
    }

    pub fn last_config(&self) -> Option<EngineConfig> {
        self.calls().into_iter().rev().find_map(|call| match call {
            Call::Apply(config) => Some(config),
            _ => None,
        })
    }

    pub fn set_current_time(&self, secs: f64) {
        *self.current_time.lock().unwrap() = secs;
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Engine for ScriptedEngine {
    fn apply(&mut self, config: &EngineConfig) {
        self.push(Call::Apply(config.clone()));
    }

    fn seek_to(&mut self, position: Fraction) -> Result<(), EngineError> {
        self.push(Call::Seek(position));
        Ok(())
    }

    fn current_time(&self) -> f64 {
        *self.current_time.lock().unwrap()
    }

    fn extend_read_ahead(&mut self, window: Duration) -> Result<(), EngineError> {
        self.push(Call::ReadAhead(window));
        Ok(())
    }

    fn reinitialize(&mut self) {
        self.push(Call::Reinitialize);
    }
}

pub fn series(count: usize) -> Playlist {
    Playlist::new(
        (1..=count)
            .map(|n| {
                Episode::new(
                    format!("Episode {n}"),
                    format!("episode-{n}"),
                    format!("https://stream.example/series/{n}/index.m3u8"),
                )
            })
            .collect(),
        0,
    )
}
