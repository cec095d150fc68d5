// SPDX-License-Identifier: MPL-2.0
//! This module handles the controller's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! Every field is optional; missing values fall back to [`defaults`]. The
//! resolved values the controller actually runs with are exposed as [`Timings`].
//!
//! # Examples
//!
//! ```no_run
//! use streamlens::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.idle_hide_ms = Some(5_000);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "StreamLens";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub volume: Option<f32>,
    #[serde(default)]
    pub muted: Option<bool>,
    #[serde(default)]
    pub seek_debounce_ms: Option<u64>,
    #[serde(default)]
    pub max_retries: Option<u32>,
    #[serde(default)]
    pub retry_delay_ms: Option<u64>,
    #[serde(default)]
    pub retry_reset_delay_ms: Option<u64>,
    #[serde(default)]
    pub idle_hide_ms: Option<u64>,
    #[serde(default)]
    pub skip_step_secs: Option<f64>,
    #[serde(default)]
    pub read_ahead_secs: Option<u64>,
    #[serde(default)]
    pub heartbeat_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            volume: Some(DEFAULT_VOLUME),
            muted: Some(false),
            seek_debounce_ms: None,
            max_retries: None,
            retry_delay_ms: None,
            retry_reset_delay_ms: None,
            idle_hide_ms: None,
            skip_step_secs: None,
            read_ahead_secs: None,
            heartbeat_secs: None,
        }
    }
}

/// Resolved timing and budget values used by the playback controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    pub seek_debounce: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub retry_reset_delay: Duration,
    pub idle_hide: Duration,
    pub skip_step_secs: f64,
    pub read_ahead: Duration,
    pub heartbeat: Duration,
}

impl Timings {
    /// Resolves optional overrides, clamping each to its allowed range.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let seek_ms = config
            .seek_debounce_ms
            .unwrap_or(DEFAULT_SEEK_DEBOUNCE_MS)
            .clamp(MIN_SEEK_DEBOUNCE_MS, MAX_SEEK_DEBOUNCE_MS);
        let idle_ms = config
            .idle_hide_ms
            .unwrap_or(DEFAULT_IDLE_HIDE_MS)
            .clamp(MIN_IDLE_HIDE_MS, MAX_IDLE_HIDE_MS);
        let skip = config
            .skip_step_secs
            .unwrap_or(DEFAULT_SKIP_STEP_SECS)
            .clamp(MIN_SKIP_STEP_SECS, MAX_SKIP_STEP_SECS);

        Self {
            seek_debounce: Duration::from_millis(seek_ms),
            max_retries: config
                .max_retries
                .unwrap_or(DEFAULT_MAX_RETRIES)
                .min(MAX_MAX_RETRIES),
            retry_delay: Duration::from_millis(
                config.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS),
            ),
            retry_reset_delay: Duration::from_millis(
                config
                    .retry_reset_delay_ms
                    .unwrap_or(DEFAULT_RETRY_RESET_DELAY_MS),
            ),
            idle_hide: Duration::from_millis(idle_ms),
            skip_step_secs: skip,
            read_ahead: Duration::from_secs(
                config.read_ahead_secs.unwrap_or(DEFAULT_READ_AHEAD_SECS),
            ),
            heartbeat: Duration::from_secs(
                config
                    .heartbeat_secs
                    .unwrap_or(DEFAULT_HEARTBEAT_SECS)
                    .max(1),
            ),
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
