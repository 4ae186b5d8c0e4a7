//! Player configuration for recorder-player
//!
//! Configuration is stored as YAML in the user's config directory.
//! Default location: ~/.config/recorder/config.yaml

use std::path::{Path, PathBuf};

use anyhow::Result;
use recorder_core::config::{self as core_config, PanelSettings, WaveformSettings};
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Waveform scale, grid and label settings
    pub waveform: WaveformSettings,
    /// Drag-to-dismiss panel tuning
    pub panel: PanelSettings,
    /// How often the simulated engine reports progress
    pub playback_tick_ms: u64,
}

/// Height of the player panel region: room for the title, a full-height
/// waveform, the progress row and the transport
pub const DEFAULT_PANEL_HEIGHT_PX: f32 = 420.0;

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            waveform: WaveformSettings::default(),
            panel: PanelSettings {
                panel_height_px: DEFAULT_PANEL_HEIGHT_PX,
                ..PanelSettings::default()
            },
            playback_tick_ms: 50,
        }
    }
}

/// Get the default config file path
///
/// Returns: ~/.config/recorder/config.yaml
pub fn default_config_path() -> PathBuf {
    core_config::default_config_path("config.yaml")
}

pub fn load_config(path: &Path) -> PlayerConfig {
    let config: PlayerConfig = core_config::load_config(path);
    log::info!(
        "load_config: short record {} ms, grid lines {}, tick {} ms",
        config.waveform.short_record_ms,
        config.waveform.grid_lines_count,
        config.playback_tick_ms
    );
    config
}

pub fn save_config(config: &PlayerConfig, path: &Path) -> Result<()> {
    core_config::save_config(config, path)
}
