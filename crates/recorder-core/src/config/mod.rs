//! Shared configuration for the recorder
//!
//! - Generic YAML config loading/saving
//! - Config file path utilities
//! - Waveform and playback panel settings
//!
//! # Usage
//!
//! ```ignore
//! use recorder_core::config::{load_config, save_config, default_config_path};
//!
//! let path = default_config_path("config.yaml");
//! let config: MyAppConfig = load_config(&path);
//! save_config(&config, &path)?;
//! ```

mod io;
mod paths;
mod settings;

pub use io::{load_config, read_yaml, save_config};
pub use paths::{default_config_dir, default_config_path, default_records_dir};
pub use settings::{PanelSettings, WaveformSettings};
