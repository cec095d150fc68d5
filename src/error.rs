// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

pub use crate::domain::error::{EngineError, EngineErrorCode, ErrorClass, PlaybackError};

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Engine Error: {0}")]
    Engine(#[from] EngineError),
    #[error("Logging Error: {0}")]
    Logging(String),
    #[error("Player task is not running")]
    PlayerClosed,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
