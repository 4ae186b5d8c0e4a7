//! Waveform snapshot handed from the session to the renderer
//!
//! The snapshot is an immutable value: the session replaces it wholesale on
//! every progress update, and the renderer only ever reads it. Sample data is
//! shared through an `Arc<[u32]>` so cloning a snapshot is cheap and equality
//! compares contents.

use std::sync::Arc;

use crate::config::WaveformSettings;

use super::scale::{calculate_grid_step_with, calculate_scale, DEFAULT_WIDTH_SCALE};

/// Grid step used before any recording is loaded
pub const DEFAULT_GRID_STEP_MS: u64 = 4_000;

/// Everything needed to draw one waveform
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformState {
    /// Total recording duration
    pub duration_ms: u64,
    /// Current playback position, never above `duration_ms`
    pub play_progress_ms: u64,
    /// Height-normalized samples, one per audio frame
    pub waveform_data: Arc<[u32]>,
    /// Draw time labels above and below the grid
    pub show_timeline: bool,
    /// Drawable waveform width relative to the view width
    /// (1.0 fits the view exactly, 2.0 doubles the pan range)
    pub width_scale: f32,
    /// Number of samples the duration is divided into
    pub duration_samples: usize,
    /// Interval between major grid lines
    pub grid_step_ms: u64,
}

impl Default for WaveformState {
    fn default() -> Self {
        Self {
            duration_ms: 0,
            play_progress_ms: 0,
            waveform_data: Arc::from(Vec::new()),
            show_timeline: true,
            width_scale: DEFAULT_WIDTH_SCALE,
            duration_samples: 0,
            grid_step_ms: DEFAULT_GRID_STEP_MS,
        }
    }
}

impl WaveformState {
    /// Build a snapshot for a recording from already normalized heights
    ///
    /// Width scale and grid step are derived from the duration.
    pub fn new(duration_ms: u64, heights: impl Into<Arc<[u32]>>, settings: &WaveformSettings) -> Self {
        let waveform_data: Arc<[u32]> = heights.into();
        let duration_samples = waveform_data.len();
        Self {
            duration_ms,
            play_progress_ms: 0,
            waveform_data,
            show_timeline: settings.show_timeline,
            width_scale: calculate_scale(
                duration_ms,
                settings.short_record_ms,
                settings.default_width_scale,
            ),
            duration_samples,
            grid_step_ms: calculate_grid_step_with(duration_ms, settings.grid_lines_count),
        }
    }

    /// Copy of this snapshot at a new playback position (clamped to the duration)
    pub fn with_progress(&self, progress_ms: u64) -> Self {
        Self {
            play_progress_ms: progress_ms.min(self.duration_ms),
            ..self.clone()
        }
    }

    /// Copy of this snapshot with the timeline labels toggled
    pub fn with_timeline(&self, show_timeline: bool) -> Self {
        Self {
            show_timeline,
            ..self.clone()
        }
    }

    /// Whether there is anything to draw
    ///
    /// Zero duration or no samples is the neutral, no-render state.
    pub fn is_empty(&self) -> bool {
        self.duration_ms == 0 || self.waveform_data.is_empty()
    }

    /// Playback position as a fraction in 0.0..=1.0 (0.0 for empty recordings)
    pub fn progress_fraction(&self) -> f32 {
        if self.duration_ms == 0 {
            0.0
        } else {
            self.play_progress_ms as f32 / self.duration_ms as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> WaveformSettings {
        WaveformSettings::default()
    }

    #[test]
    fn test_new_derives_scale_and_grid() {
        let state = WaveformState::new(437_232, vec![1, 2, 3], &settings());
        assert_eq!(state.duration_samples, 3);
        assert_eq!(state.width_scale, 1.5);
        assert_eq!(state.grid_step_ms, 30_000);
        assert_eq!(state.play_progress_ms, 0);
    }

    #[test]
    fn test_progress_is_clamped() {
        let state = WaveformState::new(10_000, vec![1; 10], &settings());
        assert_eq!(state.with_progress(25_000).play_progress_ms, 10_000);
        assert_eq!(state.with_progress(4_000).play_progress_ms, 4_000);
    }

    #[test]
    fn test_equality_compares_contents() {
        let a = WaveformState::new(20_000, vec![5, 6, 7], &settings());
        let b = WaveformState::new(20_000, vec![5, 6, 7], &settings());
        let c = WaveformState::new(20_000, vec![5, 6, 8], &settings());

        assert!(!Arc::ptr_eq(&a.waveform_data, &b.waveform_data));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_snapshot_shares_samples() {
        let a = WaveformState::new(20_000, vec![5, 6, 7], &settings());
        let b = a.with_progress(1_000);
        assert!(Arc::ptr_eq(&a.waveform_data, &b.waveform_data));
    }

    #[test]
    fn test_empty_and_fraction() {
        let empty = WaveformState::default();
        assert!(empty.is_empty());
        assert_eq!(empty.progress_fraction(), 0.0);

        let state = WaveformState::new(8_000, vec![1; 8], &settings()).with_progress(2_000);
        assert!(!state.is_empty());
        assert!((state.progress_fraction() - 0.25).abs() < 1e-6);
    }
}
