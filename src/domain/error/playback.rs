// SPDX-License-Identifier: MPL-2.0
//! Playback error taxonomy.
//!
//! Engines report failures as [`EngineError`]. When the engine wrapper knows
//! what went wrong it attaches an [`EngineErrorCode`]; otherwise the message is
//! classified heuristically. Either way the result is one of the three
//! [`ErrorClass`] values the recovery policy understands.

use std::fmt;

/// Structured failure codes an engine wrapper may attach to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineErrorCode {
    /// The stream origin could not be reached or the transfer was cut.
    NetworkUnreachable,
    /// A segment or playlist request timed out.
    NetworkTimeout,
    /// The manifest could not be parsed.
    ManifestInvalid,
    /// The demuxer could not make sense of a segment.
    DemuxFailed,
    /// A seek target was outside the seekable range.
    SeekOutOfRange,
    /// The engine does not support the requested operation.
    Unsupported,
}

/// Error reported by the playback engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineError {
    /// Structured code, when the engine wrapper could determine one.
    pub code: Option<EngineErrorCode>,
    /// Human readable description. Never shown to the viewer.
    pub message: String,
}

impl EngineError {
    /// Creates an error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// Creates an error with a structured code.
    pub fn with_code(code: EngineErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} ({:?})", self.message, code),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for EngineError {}

/// Recovery-relevant category of a playback failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorClass {
    /// Transient connectivity failure.
    Network,
    /// Engine-internal demuxer or manifest failure.
    StreamProtocol,
    /// Anything else.
    #[default]
    Unknown,
}

impl ErrorClass {
    /// Classifies an engine error, preferring its structured code.
    pub fn classify(error: &EngineError) -> Self {
        match error.code {
            Some(EngineErrorCode::NetworkUnreachable | EngineErrorCode::NetworkTimeout) => {
                Self::Network
            }
            Some(EngineErrorCode::ManifestInvalid | EngineErrorCode::DemuxFailed) => {
                Self::StreamProtocol
            }
            Some(EngineErrorCode::SeekOutOfRange | EngineErrorCode::Unsupported) => Self::Unknown,
            None => Self::from_message(&error.message),
        }
    }

    /// Classifies a raw error message by the markers it contains.
    ///
    /// Stream-protocol markers win over network markers: an HLS error that
    /// mentions the network still needs a full engine reset.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("hls")
            || msg_lower.contains("manifest")
            || msg_lower.contains("demux")
        {
            return Self::StreamProtocol;
        }

        if msg_lower.contains("network") || msg_lower.contains("fetch") {
            return Self::Network;
        }

        Self::Unknown
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::StreamProtocol => write!(f, "stream protocol"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Terminal playback failure recorded in the playback state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackError {
    pub class: ErrorClass,
    pub message: String,
}

impl PlaybackError {
    /// Message shown on the failure overlay. Raw engine text is never displayed.
    pub const USER_MESSAGE: &'static str = "Playback failed";

    /// Guidance shown under [`Self::USER_MESSAGE`].
    pub const USER_GUIDANCE: &'static str = "Please try again or pick a different source.";

    pub fn from_engine(error: &EngineError) -> Self {
        Self {
            class: ErrorClass::classify(error),
            message: error.message.clone(),
        }
    }
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.class, self.message)
    }
}
