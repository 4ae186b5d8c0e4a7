//! Message handlers for RecorderApp
//!
//! Each handler module is responsible for a specific category of messages.
//! Handlers receive `&mut RecorderApp` and return `Task<Message>`.

pub mod playback;
pub mod records;
pub mod settings;
pub mod tick;
