//! Recorder Core - waveform and playback logic shared by the recorder UI
//!
//! Everything in here is toolkit-agnostic: amplitude normalization, grid and
//! zoom calculation, pixel/time geometry, seek and drag-to-dismiss state
//! machines, and the playback session that owns the waveform snapshot.

pub mod config;
pub mod error;
pub mod gesture;
pub mod playback;
pub mod record;
pub mod time;
pub mod waveform;

pub use error::{
    DecodeError, DecodeResult, PlaybackError, PlaybackResult, StoreError, StoreResult,
};
pub use waveform::{
    adjust_waveform_heights, calculate_grid_step, calculate_scale, SeekController, SeekEvent,
    ViewGeometry, WaveformState,
};
