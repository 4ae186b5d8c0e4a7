//! Waveform rendering and navigation core
//!
//! Converts raw amplitude samples into drawable heights, picks zoom and grid
//! density for a recording, and maps between time and pixels for a view
//! that scrolls underneath a fixed center scrubber.
//!
//! ## Data flow
//!
//! ```text
//! decoded gains ──► adjust_waveform_heights ──┐
//! duration ──► calculate_scale / calculate_grid_step ──► WaveformState
//!                                                           │
//! view size + drag input ──► ViewGeometry ◄─────────────────┘
//!                              │
//!                              └──► SeekController ──► SeekEvent (to the session)
//! ```

mod geometry;
pub mod loader;
mod normalize;
mod scale;
mod seek;
mod state;

pub use geometry::{GridLine, ViewGeometry, WaveformTick};
pub use loader::{AmplitudeDecoder, LoadFailure, LoadOutcome, LoadRequest, LoadResult, WaveformLoader};
pub use normalize::adjust_waveform_heights;
pub use scale::{
    calculate_grid_step, calculate_grid_step_with, calculate_scale, CANONICAL_GRID_STEPS,
    DEFAULT_WIDTH_SCALE, GRID_LINES_COUNT, SHORT_RECORD_MS,
};
pub use seek::{SeekController, SeekEvent};
pub use state::{WaveformState, DEFAULT_GRID_STEP_MS};
