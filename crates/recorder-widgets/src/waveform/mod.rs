//! Scrolling waveform with a fixed center scrubber
//!
//! - `canvas`: the canvas `Program` (grid, waveform ticks, start/end
//!   markers, scrubber, timeline labels) and drag-to-seek handling
//! - `view`: view functions returning `Element`s

mod canvas;
mod view;

pub use canvas::{WaveformCanvas, WaveformInteraction, BOTTOM_LABEL_PADDING, GRID_SUBLINE_HEIGHT};
pub use view::{waveform_view, waveform_view_with_settings, WAVEFORM_VIEW_HEIGHT};
