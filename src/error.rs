//! Error types for the non-simulation parts of the game.
//!
//! The simulation itself is infallible: invariant breaks are clamped in place.
//! Everything that talks to the outside world (storage, the text relay,
//! player-supplied configuration) reports through one of these.

use std::io;

/// Durable storage failures.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid stored data: {0}")]
    Json(#[from] serde_json::Error),

    /// The host has no durable storage (private browsing, sandboxed page, ...)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Text-generation relay failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The request never produced a response (network down, host refused, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The relay answered with a non-2xx status and an error message
    #[error("{message} (status {status})")]
    Service { status: u16, message: String },

    /// The relay answered but the body was not a recognizable payload
    #[error("Malformed relay response: {0}")]
    Malformed(String),
}

/// Configuration knob failures. Callers log these and keep the old value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Unknown setting: {0}")]
    UnknownKnob(String),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}
