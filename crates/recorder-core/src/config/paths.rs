//! Path utilities for recorder configuration files

use std::path::PathBuf;

/// Directory holding recorder configuration
///
/// Returns: `<config_dir>/recorder` (e.g. `~/.config/recorder` on Linux)
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("recorder")
}

/// Default config file path for a given file name
///
/// Returns: `<config_dir>/recorder/{filename}`
pub fn default_config_path(filename: &str) -> PathBuf {
    default_config_dir().join(filename)
}

/// Where recordings are stored
///
/// Returns: `~/Music/Recordings`
pub fn default_records_dir() -> PathBuf {
    dirs::audio_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Music")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Recordings")
}
