//! YAML configuration I/O
//!
//! Settings files are small YAML documents. Reading never fails the caller:
//! a missing file means "first start" and a broken one is replaced by
//! defaults with a warning. Saving goes through a sibling temp file, so a
//! reader sees either the old document or the new one.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Parse a YAML file, `Ok(None)` if it does not exist
pub fn read_yaml<T>(path: &Path) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Cannot read {}", path.display())),
    };
    serde_yaml::from_str(&contents)
        .map(Some)
        .with_context(|| format!("Invalid YAML in {}", path.display()))
}

/// Load settings, falling back to `T::default()` for a missing or bad file
///
/// ```ignore
/// let settings: WaveformSettings = load_config(Path::new("waveform.yaml"));
/// ```
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    match read_yaml(path) {
        Ok(Some(config)) => {
            log::info!("load_config: loaded {}", path.display());
            config
        }
        Ok(None) => {
            log::info!("load_config: no file at {}, using defaults", path.display());
            T::default()
        }
        Err(e) => {
            log::warn!("load_config: {:#}, using defaults", e);
            T::default()
        }
    }
}

/// Write settings as YAML, creating parent directories
///
/// The document is written to `<path>.tmp` and renamed over `path`.
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    let yaml = serde_yaml::to_string(config).context("Cannot serialize settings")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create {}", parent.display()))?;
    }

    let staging = staging_path(path);
    fs::write(&staging, yaml).with_context(|| format!("Cannot write {}", staging.display()))?;
    fs::rename(&staging, path).with_context(|| format!("Cannot replace {}", path.display()))?;

    log::info!("save_config: saved {}", path.display());
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PanelSettings, WaveformSettings};

    #[test]
    fn test_load_nonexistent_returns_default() {
        let settings: WaveformSettings = load_config(Path::new("/nonexistent/path/config.yaml"));
        assert_eq!(settings, WaveformSettings::default());
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("panel.yaml");

        let settings = PanelSettings {
            max_travel_px: 180.0,
            reset_delay_ms: 900,
            ..PanelSettings::default()
        };

        save_config(&settings, &path).unwrap();
        let loaded: PanelSettings = load_config(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waveform.yaml");
        std::fs::write(&path, "grid_lines_count: 8\nshow_timeline: false\n").unwrap();

        let loaded: WaveformSettings = load_config(&path);
        assert_eq!(loaded.grid_lines_count, 8);
        assert!(!loaded.show_timeline);
        assert_eq!(loaded.short_record_ms, 18_000);
    }

    #[test]
    fn test_read_yaml_distinguishes_missing_and_broken() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert!(read_yaml::<PanelSettings>(&missing).unwrap().is_none());

        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "max_travel_px: [1, 2").unwrap();
        let err = read_yaml::<PanelSettings>(&broken).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.yaml"));
    }

    #[test]
    fn test_save_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.yaml");

        save_config(&PanelSettings::default(), &path).unwrap();
        let updated = PanelSettings {
            dismiss_ratio: 0.3,
            ..PanelSettings::default()
        };
        save_config(&updated, &path).unwrap();

        let loaded: PanelSettings = load_config(&path);
        assert_eq!(loaded, updated);
        assert!(!staging_path(&path).exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_invalid_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "grid_lines_count: [not, a, number").unwrap();

        let loaded: WaveformSettings = load_config(&path);
        assert_eq!(loaded, WaveformSettings::default());
    }
}
