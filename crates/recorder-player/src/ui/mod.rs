//! UI module for recorder-player
//!
//! Built with iced. Playback runs on the simulated engine's clock thread and
//! reports back through the ordered playback event channel.

pub mod app;
mod handlers;
pub mod message;

pub use app::RecorderApp;
pub use message::Message;
