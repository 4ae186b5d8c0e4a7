//! Recording metadata and the records store
//!
//! A `Record` is one audio file in the library plus the metadata shown
//! alongside its waveform (name, size, format, bitrate, sample rate) and the
//! raw per-frame gains decoded from it.

mod store;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use store::{InMemoryRecordsStore, RecordsStore};

/// Container/codec a recording was made with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingFormat {
    #[default]
    M4a,
    Wav,
    #[serde(rename = "3gp")]
    ThreeGp,
}

impl RecordingFormat {
    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            Self::M4a => "m4a",
            Self::Wav => "wav",
            Self::ThreeGp => "3gp",
        }
    }

    /// Guess the format from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "m4a" | "aac" | "mp4" => Some(Self::M4a),
            "wav" => Some(Self::Wav),
            "3gp" => Some(Self::ThreeGp),
            _ => None,
        }
    }

    /// Whether the encoder for this format takes a bitrate setting
    pub fn has_bitrate(self) -> bool {
        matches!(self, Self::M4a)
    }
}

impl fmt::Display for RecordingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::M4a => "M4A",
            Self::Wav => "WAV",
            Self::ThreeGp => "3GP",
        };
        f.write_str(label)
    }
}

/// One recording in the library
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub id: u64,
    pub name: String,
    pub duration_ms: u64,
    pub path: PathBuf,
    pub format: RecordingFormat,
    pub size_bytes: u64,
    /// Hz
    pub sample_rate: u32,
    pub channel_count: u16,
    /// bits per second (0 when unknown or not applicable)
    pub bitrate: u32,
    /// Raw per-frame gains as produced by the decoder
    pub amplitudes: Vec<u32>,
    /// `amplitudes` hold decoded data rather than a placeholder
    pub waveform_processed: bool,
}

impl Record {
    /// One-line summary under the record name: `"1.5 MB, m4a, 128 kbps, 44 kHz"`
    ///
    /// The bitrate part is left out when the bitrate is unknown.
    pub fn info_text(&self) -> String {
        let size = format_file_size(self.size_bytes);
        let format = self.format.extension();
        let sample_rate = format!("{} kHz", self.sample_rate / 1000);
        if self.bitrate > 0 {
            format!("{}, {}, {} kbps, {}", size, format, self.bitrate / 1000, sample_rate)
        } else {
            format!("{}, {}, {}", size, format, sample_rate)
        }
    }
}

/// Encoder settings summary, e.g. `"M4A, 44.1 kHz, 128 kbps, Stereo"`
///
/// Only M4A recordings list a bitrate.
pub fn recording_settings_text(
    format: RecordingFormat,
    sample_rate: u32,
    bitrate: u32,
    channel_count: u16,
) -> String {
    let sample_rate = format_sample_rate(sample_rate);
    let channels = format_channel_count(channel_count);
    if format.has_bitrate() {
        format!("{}, {}, {} kbps, {}", format, sample_rate, bitrate / 1000, channels)
    } else {
        format!("{}, {}, {}", format, sample_rate, channels)
    }
}

fn format_sample_rate(sample_rate: u32) -> String {
    if sample_rate % 1000 == 0 {
        format!("{} kHz", sample_rate / 1000)
    } else {
        format!("{:.1} kHz", sample_rate as f32 / 1000.0)
    }
}

fn format_channel_count(channel_count: u16) -> String {
    match channel_count {
        1 => "Mono".to_string(),
        2 => "Stereo".to_string(),
        n => format!("{} channels", n),
    }
}

/// Short human-readable file size using decimal units (`"512 B"`, `"1.5 MB"`, `"25 MB"`)
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

    if bytes < 1000 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1000.0;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    if value < 10.0 {
        format!("{:.1} {}", value, UNITS[unit])
    } else {
        format!("{:.0} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        Record {
            id: 1,
            name: "Interview".to_string(),
            duration_ms: 437_232,
            path: PathBuf::from("/tmp/Interview.m4a"),
            format: RecordingFormat::M4a,
            size_bytes: 1_520_000,
            sample_rate: 44_100,
            channel_count: 2,
            bitrate: 128_000,
            amplitudes: Vec::new(),
            waveform_processed: false,
        }
    }

    #[test]
    fn test_info_text() {
        let record = sample_record();
        assert_eq!(record.info_text(), "1.5 MB, m4a, 128 kbps, 44 kHz");

        let wav = Record {
            format: RecordingFormat::Wav,
            bitrate: 0,
            size_bytes: 42_000_000,
            sample_rate: 48_000,
            ..sample_record()
        };
        assert_eq!(wav.info_text(), "42 MB, wav, 48 kHz");
    }

    #[test]
    fn test_recording_settings_text() {
        assert_eq!(
            recording_settings_text(RecordingFormat::M4a, 44_100, 128_000, 2),
            "M4A, 44.1 kHz, 128 kbps, Stereo"
        );
        assert_eq!(
            recording_settings_text(RecordingFormat::Wav, 16_000, 256_000, 1),
            "WAV, 16 kHz, Mono"
        );
        assert_eq!(
            recording_settings_text(RecordingFormat::ThreeGp, 8_000, 0, 1),
            "3GP, 8 kHz, Mono"
        );
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(999), "999 B");
        assert_eq!(format_file_size(1_000), "1.0 KB");
        assert_eq!(format_file_size(1_520_000), "1.5 MB");
        assert_eq!(format_file_size(25_300_000), "25 MB");
        assert_eq!(format_file_size(3_200_000_000), "3.2 GB");
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(RecordingFormat::from_extension("M4A"), Some(RecordingFormat::M4a));
        assert_eq!(RecordingFormat::from_extension("3gp"), Some(RecordingFormat::ThreeGp));
        assert_eq!(RecordingFormat::from_extension("flac"), None);
        assert_eq!(RecordingFormat::ThreeGp.extension(), "3gp");
    }
}
