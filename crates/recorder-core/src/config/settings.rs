//! Tunable settings for the waveform view and the playback panel
//!
//! Both structs use `#[serde(default)]` so a config file only needs to list
//! the values it changes.

use serde::{Deserialize, Serialize};

use crate::waveform::{DEFAULT_WIDTH_SCALE, GRID_LINES_COUNT, SHORT_RECORD_MS};

/// Waveform rendering and zoom settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformSettings {
    /// Recordings shorter than this are drawn narrower than the default scale
    /// Default: 18000 ms
    pub short_record_ms: u64,

    /// Width scale for recordings at or above `short_record_ms`
    /// Default: 1.5
    pub default_width_scale: f32,

    /// Target number of major grid lines across the whole recording
    /// Default: 16
    pub grid_lines_count: u64,

    /// Peak bar height in pixels that amplitudes are normalized to
    /// Default: 100
    pub half_height_px: u32,

    /// Timeline label text height
    /// Default: 14
    pub text_height_px: f32,

    /// Gap between timeline labels and the waveform area
    /// Default: 6
    pub text_padding_px: f32,

    /// Draw time labels above and below the grid
    /// Default: true
    pub show_timeline: bool,
}

impl Default for WaveformSettings {
    fn default() -> Self {
        Self {
            short_record_ms: SHORT_RECORD_MS,
            default_width_scale: DEFAULT_WIDTH_SCALE,
            grid_lines_count: GRID_LINES_COUNT,
            half_height_px: 100,
            text_height_px: 14.0,
            text_padding_px: 6.0,
            show_timeline: true,
        }
    }
}

/// Drag-to-dismiss playback panel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    /// Offset the panel sits at when idle
    /// Default: 12 px
    pub resting_offset_px: f32,

    /// Asymptotic limit of the damped drag offset
    /// Default: 250 px
    pub max_travel_px: f32,

    /// Fraction of the panel height a release must exceed to dismiss
    /// Default: 0.5
    pub dismiss_ratio: f32,

    /// Off-screen target as a multiple of the panel height
    /// Default: 1.5
    pub off_screen_factor: f32,

    /// Panel height
    /// Default: 300 px
    pub panel_height_px: f32,

    /// Return and dismiss animation length
    /// Default: 500 ms
    pub animation_ms: u64,

    /// Time the dismissed panel stays off-screen before snapping back
    /// Default: 600 ms
    pub reset_delay_ms: u64,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            resting_offset_px: 12.0,
            max_travel_px: 250.0,
            dismiss_ratio: 0.5,
            off_screen_factor: 1.5,
            panel_height_px: 300.0,
            animation_ms: 500,
            reset_delay_ms: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_serialize() {
        let yaml = serde_yaml::to_string(&WaveformSettings::default()).unwrap();
        assert!(yaml.contains("grid_lines_count: 16"));
        assert!(yaml.contains("short_record_ms: 18000"));

        let yaml = serde_yaml::to_string(&PanelSettings::default()).unwrap();
        assert!(yaml.contains("reset_delay_ms: 600"));
    }

    #[test]
    fn test_empty_document_is_default() {
        let panel: PanelSettings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(panel, PanelSettings::default());
    }
}
