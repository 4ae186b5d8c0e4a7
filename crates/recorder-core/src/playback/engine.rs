//! Playback engine seam
//!
//! The session drives playback only through this trait. Engines report back
//! asynchronously through a `PlaybackEventSender` handed to them at
//! construction.

use std::path::Path;

use crate::error::PlaybackResult;

/// Controls playback of one audio file at a time
pub trait PlaybackEngine {
    /// Start playing `path` (resumes when the same file is paused)
    fn play(&mut self, path: &Path) -> PlaybackResult<()>;

    fn pause(&mut self) -> PlaybackResult<()>;

    fn stop(&mut self) -> PlaybackResult<()>;

    /// Jump to `position_ms`
    fn seek(&mut self, position_ms: u64) -> PlaybackResult<()>;

    fn is_playing(&self) -> bool;
}
