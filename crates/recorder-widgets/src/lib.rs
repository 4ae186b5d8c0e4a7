//! UI widgets for the recorder player
//!
//! Following idiomatic iced patterns:
//!
//! - **State structs**: Pure data from `recorder-core` (`WaveformState`, `DampedDrag`)
//! - **View functions**: Take state + callbacks, return `Element<Message>`
//! - **Canvas Programs**: Handle custom rendering and event-to-callback translation
//!
//! ## View Functions
//!
//! - `waveform_view`: Scrolling waveform with a fixed scrubber and drag-to-seek
//! - `playback_panel`: Panel that follows a damped vertical drag and can be swiped away

pub mod panel;
pub mod subscription;
pub mod theme;
pub mod waveform;

pub use panel::{playback_panel, DraggablePanel, PanelGesture};
pub use subscription::channel_subscription;

pub use waveform::{
    waveform_view, waveform_view_with_settings, WaveformCanvas, WaveformInteraction,
    BOTTOM_LABEL_PADDING, GRID_SUBLINE_HEIGHT, WAVEFORM_VIEW_HEIGHT,
};
