//! Playback: engine seam, ordered event channel and the session view-model
//!
//! ```text
//! PlayerSession ──play/pause/stop/seek──► dyn PlaybackEngine
//!       ▲                                        │
//!       └──────── PlaybackEvent (FIFO channel) ◄─┘
//! ```

mod engine;
mod event;
mod session;

pub use engine::PlaybackEngine;
pub use event::{
    command_channel, playback_channel, PlaybackCommand, PlaybackEvent, PlaybackEventReceiver,
    PlaybackEventSender,
};
pub use session::{PlayerSession, MOVE_TO_START_DURATION};
