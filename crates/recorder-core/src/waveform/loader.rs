//! Background waveform loading
//!
//! Decoding a recording into per-frame gains and normalizing them can take a
//! while for long recordings. The `WaveformLoader` runs both on a dedicated
//! thread so the UI never blocks:
//!
//! 1. UI sends a `LoadRequest` (decode a file, or normalize gains it already has)
//! 2. The loader thread decodes (if needed) and runs `adjust_waveform_heights`
//! 3. UI polls `try_recv()` from its tick handler and swaps in the new snapshot
//!
//! ## Usage
//!
//! ```ignore
//! let loader = WaveformLoader::spawn(Box::new(decoder), 100)?;
//! loader.load(LoadRequest::Decode { record_id, path, duration_ms })?;
//!
//! // In the tick handler:
//! while let Some(outcome) = loader.try_recv() {
//!     session.apply_loaded(outcome);
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};

use crate::error::{DecodeError, DecodeResult};

use super::normalize::adjust_waveform_heights;

/// Turns an audio file into raw per-frame gains
///
/// This is the seam to the platform decode engine.
pub trait AmplitudeDecoder: Send {
    fn decode(&mut self, path: &Path, duration_ms: u64) -> DecodeResult<Vec<u32>>;
}

/// Work for the loader thread
#[derive(Debug, Clone)]
pub enum LoadRequest {
    /// Decode the file, then normalize
    Decode {
        record_id: u64,
        path: PathBuf,
        duration_ms: u64,
    },
    /// Normalize gains that were decoded earlier
    Normalize { record_id: u64, gains: Vec<u32> },
}

impl LoadRequest {
    pub fn record_id(&self) -> u64 {
        match self {
            Self::Decode { record_id, .. } | Self::Normalize { record_id, .. } => *record_id,
        }
    }
}

/// A finished load
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub record_id: u64,
    /// Raw gains as decoded (to store back on the record)
    pub raw: Vec<u32>,
    /// Normalized heights, ready for a `WaveformState`
    pub heights: Arc<[u32]>,
}

/// A load that could not be completed
#[derive(Debug, Clone)]
pub struct LoadFailure {
    pub record_id: u64,
    pub error: DecodeError,
}

/// Loader thread reply
pub type LoadOutcome = Result<LoadResult, LoadFailure>;

/// Background thread that decodes and normalizes waveforms
pub struct WaveformLoader {
    tx: Sender<LoadRequest>,
    rx: Receiver<LoadOutcome>,
    _handle: JoinHandle<()>,
}

impl WaveformLoader {
    /// Spawn the loader thread
    ///
    /// `half_height` is the bar height (in pixels) heights are scaled to.
    pub fn spawn(decoder: Box<dyn AmplitudeDecoder>, half_height: u32) -> std::io::Result<Self> {
        let (request_tx, request_rx) = channel::unbounded::<LoadRequest>();
        let (result_tx, result_rx) = channel::unbounded::<LoadOutcome>();

        let handle = thread::Builder::new()
            .name("waveform-loader".to_string())
            .spawn(move || {
                loader_thread(decoder, half_height, request_rx, result_tx);
            })?;

        log::info!("WaveformLoader background thread started");

        Ok(Self {
            tx: request_tx,
            rx: result_rx,
            _handle: handle,
        })
    }

    /// Queue a load (non-blocking)
    pub fn load(&self, request: LoadRequest) -> Result<(), String> {
        self.tx
            .send(request)
            .map_err(|e| format!("Waveform loader thread disconnected: {}", e))
    }

    /// Poll for a finished load (non-blocking)
    pub fn try_recv(&self) -> Option<LoadOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::error!("Waveform loader thread disconnected unexpectedly");
                None
            }
        }
    }

    /// Block until the next load finishes
    pub fn recv(&self) -> Option<LoadOutcome> {
        self.rx.recv().ok()
    }
}

fn loader_thread(
    mut decoder: Box<dyn AmplitudeDecoder>,
    half_height: u32,
    rx: Receiver<LoadRequest>,
    tx: Sender<LoadOutcome>,
) {
    log::debug!("Waveform loader thread starting");

    while let Ok(request) = rx.recv() {
        let start_time = Instant::now();
        let record_id = request.record_id();

        let raw = match request {
            LoadRequest::Decode { path, duration_ms, .. } => {
                if duration_ms == 0 {
                    Err(DecodeError::InvalidDuration)
                } else {
                    decoder.decode(&path, duration_ms)
                }
            }
            LoadRequest::Normalize { gains, .. } => Ok(gains),
        };

        let outcome = match raw {
            Ok(raw) => {
                let heights: Arc<[u32]> = adjust_waveform_heights(&raw, half_height).into();
                log::debug!(
                    "Waveform loader: record {} ready ({} samples) in {:?}",
                    record_id,
                    heights.len(),
                    start_time.elapsed()
                );
                Ok(LoadResult {
                    record_id,
                    raw,
                    heights,
                })
            }
            Err(error) => {
                log::warn!("Waveform loader: record {} failed: {}", record_id, error);
                Err(LoadFailure { record_id, error })
            }
        };

        if tx.send(outcome).is_err() {
            break;
        }
    }

    log::debug!("Waveform loader thread exiting");
}
