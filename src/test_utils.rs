// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and a scriptable engine.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macros for convenient use in tests
pub use approx::assert_abs_diff_eq;

use crate::domain::error::{EngineError, EngineErrorCode};
use crate::domain::video::{Fraction, Resolution};
use crate::video_player::engine::{Engine, EngineConfig};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A command received by [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    Apply(EngineConfig),
    Seek(Fraction),
    ReadAhead(Duration),
    Reinitialize,
    PreferResolution(Resolution),
}

/// Engine double that records every command it receives.
///
/// Clones share the same log, so a test can keep one clone while the
/// controller owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    inner: Arc<Mutex<Recorded>>,
}

#[derive(Debug, Default)]
struct Recorded {
    log: Vec<EngineCommand>,
    current_time: f64,
    reject_seeks: bool,
    reject_read_ahead: bool,
}

impl RecordingEngine {
    pub fn set_current_time(&self, secs: f64) {
        self.with(|rec| rec.current_time = secs);
    }

    pub fn reject_seeks(&self) {
        self.with(|rec| rec.reject_seeks = true);
    }

    pub fn reject_read_ahead(&self) {
        self.with(|rec| rec.reject_read_ahead = true);
    }

    pub fn commands(&self) -> Vec<EngineCommand> {
        self.with(|rec| rec.log.clone())
    }

    pub fn seeks(&self) -> Vec<Fraction> {
        self.commands()
            .into_iter()
            .filter_map(|cmd| match cmd {
                EngineCommand::Seek(pos) => Some(pos),
                _ => None,
            })
            .collect()
    }

    pub fn last_config(&self) -> Option<EngineConfig> {
        self.commands().into_iter().rev().find_map(|cmd| match cmd {
            EngineCommand::Apply(config) => Some(config),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.with(|rec| rec.log.clear());
    }

    fn record(&self, command: EngineCommand) {
        self.with(|rec| rec.log.push(command));
    }

    fn with<T>(&self, f: impl FnOnce(&mut Recorded) -> T) -> T {
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }
}

impl Engine for RecordingEngine {
    fn apply(&mut self, config: &EngineConfig) {
        self.record(EngineCommand::Apply(config.clone()));
    }

    fn seek_to(&mut self, position: Fraction) -> Result<(), EngineError> {
        if self.with(|rec| rec.reject_seeks) {
            return Err(EngineError::with_code(
                EngineErrorCode::SeekOutOfRange,
                "seek rejected",
            ));
        }
        self.record(EngineCommand::Seek(position));
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.with(|rec| rec.current_time)
    }

    fn extend_read_ahead(&mut self, window: Duration) -> Result<(), EngineError> {
        if self.with(|rec| rec.reject_read_ahead) {
            return Err(EngineError::with_code(
                EngineErrorCode::Unsupported,
                "no buffer control",
            ));
        }
        self.record(EngineCommand::ReadAhead(window));
        Ok(())
    }

    fn reinitialize(&mut self) {
        self.record(EngineCommand::Reinitialize);
    }

    fn prefer_resolution(&mut self, resolution: Resolution) {
        self.record(EngineCommand::PreferResolution(resolution));
    }
}
