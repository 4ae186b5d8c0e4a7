//! Waveform view functions
//!
//! Plain functions that take the session's snapshot and callback closures
//! and return an `Element`, following the iced 0.14 pattern.
//!
//! ## Usage
//!
//! ```ignore
//! fn view(&self) -> Element<Message> {
//!     let waveform = waveform_view(
//!         self.session.waveform(),
//!         || Message::SeekStart,
//!         Message::SeekProgress,
//!         Message::SeekEnd,
//!     );
//!
//!     column![waveform, /* other widgets */].into()
//! }
//! ```

use iced::widget::Canvas;
use iced::{Element, Length};
use recorder_core::config::WaveformSettings;
use recorder_core::waveform::{ViewGeometry, WaveformState};

use super::canvas::WaveformCanvas;

/// Default waveform view height in pixels
pub const WAVEFORM_VIEW_HEIGHT: f32 = 240.0;

/// Create a waveform element with drag-to-seek
///
/// # Arguments
///
/// * `state` - Snapshot to draw (owned by the session)
/// * `on_seek_start` - Called when a drag begins; stop following playback
/// * `on_seek_progress` - Called with the position under the scrubber while dragging
/// * `on_seek_end` - Called with the final position when the drag ends; commit the seek
pub fn waveform_view<'a, Message>(
    state: &'a WaveformState,
    on_seek_start: impl Fn() -> Message + 'a,
    on_seek_progress: impl Fn(u64) -> Message + 'a,
    on_seek_end: impl Fn(u64) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    Canvas::new(WaveformCanvas {
        state,
        template: ViewGeometry::default(),
        on_seek_start,
        on_seek_progress,
        on_seek_end,
    })
    .width(Length::Fill)
    .height(Length::Fixed(WAVEFORM_VIEW_HEIGHT))
    .into()
}

/// Like `waveform_view`, with label metrics from `settings` and a custom height
pub fn waveform_view_with_settings<'a, Message>(
    state: &'a WaveformState,
    settings: &WaveformSettings,
    height: f32,
    on_seek_start: impl Fn() -> Message + 'a,
    on_seek_progress: impl Fn(u64) -> Message + 'a,
    on_seek_end: impl Fn(u64) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    Canvas::new(WaveformCanvas {
        state,
        template: ViewGeometry::from_settings(settings),
        on_seek_start,
        on_seek_progress,
        on_seek_end,
    })
    .width(Length::Fill)
    .height(Length::Fixed(height))
    .into()
}
