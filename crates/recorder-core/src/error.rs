//! Error types for playback, decoding and the records store

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by a playback engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// There is no active record to play
    #[error("No active record to play")]
    NoActiveRecord,

    /// The engine's worker is gone (channel closed)
    #[error("Playback engine disconnected")]
    Disconnected,

    /// Engine-specific failure
    #[error("Playback engine error: {0}")]
    Engine(String),
}

/// Errors reported by an amplitude decoder
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Source file does not exist
    #[error("Audio file not found: {0:?}")]
    FileNotFound(PathBuf),

    /// Duration was zero or could not be determined
    #[error("Cannot decode a record with zero duration")]
    InvalidDuration,

    /// Decoder-specific failure
    #[error("Failed to decode audio: {0}")]
    Failed(String),
}

/// Errors reported by a records store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with this id
    #[error("Record {0} not found")]
    RecordNotFound(u64),
}

/// Result type for playback operations
pub type PlaybackResult<T> = Result<T, PlaybackError>;

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for records store operations
pub type StoreResult<T> = Result<T, StoreError>;
