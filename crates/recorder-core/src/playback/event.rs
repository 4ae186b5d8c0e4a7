//! Ordered playback event and command channels
//!
//! The playback engine reports what it is doing over a FIFO channel instead
//! of invoking callbacks, so the session sees start, progress, pause, stop
//! and seek notifications in exactly the order the engine produced them.
//!
//! # Usage
//!
//! ```ignore
//! let (events_tx, events_rx) = playback_channel();
//! let engine = MyEngine::spawn(events_tx)?;
//!
//! // UI side, on every tick / subscription message:
//! for event in events_rx.try_iter() {
//!     session.apply(event, Instant::now());
//! }
//! ```

use std::path::PathBuf;

use crossbeam::channel::{self, Receiver, Sender};

use crate::error::PlaybackError;

/// Notifications from a playback engine
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// Playback started (or resumed)
    Started,
    /// Current position in milliseconds
    Progress(u64),
    Paused,
    /// Playback stopped and the position was reset
    Stopped,
    /// A seek completed at this position
    Seeked(u64),
    /// The engine failed; the session only records and logs it
    Error(PlaybackError),
}

/// Sending half, owned by the engine
pub type PlaybackEventSender = Sender<PlaybackEvent>;

/// Receiving half, owned by the session's host
pub type PlaybackEventReceiver = Receiver<PlaybackEvent>;

/// Create an unbounded FIFO event channel
pub fn playback_channel() -> (PlaybackEventSender, PlaybackEventReceiver) {
    channel::unbounded()
}

/// Requests from the UI thread to an engine's worker thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackCommand {
    /// Start playing a file, or resume if it is already loaded and paused
    Play(PathBuf),
    Pause,
    Stop,
    Seek(u64),
    /// Terminate the worker thread
    Shutdown,
}

/// Create a command channel for an engine worker
pub fn command_channel() -> (Sender<PlaybackCommand>, Receiver<PlaybackCommand>) {
    channel::unbounded()
}
