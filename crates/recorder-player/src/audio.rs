//! Simulated audio backend for recorder-player
//!
//! No audio is decoded or played. `SimulatedPlayer` runs a clock thread that
//! honours `PlaybackCommand`s and reports progress over the playback event
//! channel exactly like a real engine would, and `SyntheticDecoder` produces
//! deterministic gains for the waveform loader.
//!
//! # Architecture
//!
//! - UI Thread: calls `PlaybackEngine` methods, which only enqueue commands
//! - Clock Thread: owns position and duration, emits `PlaybackEvent`s in order
//! - Atomics: UI reads `is_playing` without locks

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};
use recorder_core::playback::{
    command_channel, PlaybackCommand, PlaybackEngine, PlaybackEvent, PlaybackEventSender,
};
use recorder_core::waveform::AmplitudeDecoder;
use recorder_core::{DecodeError, DecodeResult, PlaybackError, PlaybackResult};

/// Length of one decoded gain frame
pub const FRAME_MS: u64 = 40;

/// Durations of the files the clock can "play"
type Catalog = Arc<Mutex<HashMap<PathBuf, u64>>>;

/// Playback engine backed by a clock thread
pub struct SimulatedPlayer {
    commands: Sender<PlaybackCommand>,
    playing: Arc<AtomicBool>,
    catalog: Catalog,
    handle: Option<JoinHandle<()>>,
}

impl SimulatedPlayer {
    /// Spawn the clock thread
    ///
    /// Progress is reported every `tick` while playing.
    pub fn spawn(events: PlaybackEventSender, tick: Duration) -> std::io::Result<Self> {
        let (tx, rx) = command_channel();
        let playing = Arc::new(AtomicBool::new(false));
        let catalog: Catalog = Arc::default();

        let clock = Clock {
            events,
            playing: Arc::clone(&playing),
            catalog: Arc::clone(&catalog),
            tick: tick.max(Duration::from_millis(1)),
            path: None,
            duration_ms: 0,
            position_ms: 0,
            last_tick: Instant::now(),
        };

        let handle = thread::Builder::new()
            .name("playback-clock".to_string())
            .spawn(move || clock.run(rx))?;

        log::info!("SimulatedPlayer: clock thread started ({} ms tick)", tick.as_millis());

        Ok(Self {
            commands: tx,
            playing,
            catalog,
            handle: Some(handle),
        })
    }

    /// Make `path` playable with the given duration
    pub fn register(&self, path: &Path, duration_ms: u64) {
        if let Ok(mut catalog) = self.catalog.lock() {
            catalog.insert(path.to_path_buf(), duration_ms);
        }
    }

    fn send(&self, command: PlaybackCommand) -> PlaybackResult<()> {
        log::debug!("SimulatedPlayer: {:?}", command);
        self.commands
            .send(command)
            .map_err(|_| PlaybackError::Disconnected)
    }
}

impl PlaybackEngine for SimulatedPlayer {
    fn play(&mut self, path: &Path) -> PlaybackResult<()> {
        self.send(PlaybackCommand::Play(path.to_path_buf()))
    }

    fn pause(&mut self) -> PlaybackResult<()> {
        self.send(PlaybackCommand::Pause)
    }

    fn stop(&mut self) -> PlaybackResult<()> {
        self.send(PlaybackCommand::Stop)
    }

    fn seek(&mut self, position_ms: u64) -> PlaybackResult<()> {
        self.send(PlaybackCommand::Seek(position_ms))
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }
}

impl Drop for SimulatedPlayer {
    fn drop(&mut self) {
        let _ = self.commands.send(PlaybackCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// State owned by the clock thread
struct Clock {
    events: PlaybackEventSender,
    playing: Arc<AtomicBool>,
    catalog: Catalog,
    tick: Duration,
    path: Option<PathBuf>,
    duration_ms: u64,
    position_ms: u64,
    last_tick: Instant,
}

impl Clock {
    fn run(mut self, rx: Receiver<PlaybackCommand>) {
        loop {
            match rx.recv_timeout(self.tick) {
                Ok(PlaybackCommand::Shutdown) => break,
                Ok(command) => self.handle(command),
                Err(RecvTimeoutError::Timeout) => self.advance(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        log::info!("SimulatedPlayer: clock thread stopped");
    }

    fn emit(&self, event: PlaybackEvent) {
        // Nobody listening any more; the UI is shutting down
        let _ = self.events.send(event);
    }

    fn set_playing(&self, playing: bool) {
        self.playing.store(playing, Ordering::Release);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    fn handle(&mut self, command: PlaybackCommand) {
        match command {
            PlaybackCommand::Play(path) => self.play(path),
            PlaybackCommand::Pause => {
                if self.is_playing() {
                    self.advance();
                    self.set_playing(false);
                    self.emit(PlaybackEvent::Paused);
                }
            }
            PlaybackCommand::Stop => {
                if self.path.take().is_some() {
                    self.set_playing(false);
                    self.duration_ms = 0;
                    self.position_ms = 0;
                    self.emit(PlaybackEvent::Stopped);
                }
            }
            PlaybackCommand::Seek(ms) => {
                // Nothing loaded yet: keep the position for the next play
                self.position_ms = if self.path.is_some() {
                    ms.min(self.duration_ms)
                } else {
                    ms
                };
                self.last_tick = Instant::now();
                self.emit(PlaybackEvent::Seeked(self.position_ms));
                if self.is_playing() {
                    self.emit(PlaybackEvent::Progress(self.position_ms));
                }
            }
            PlaybackCommand::Shutdown => {}
        }
    }

    fn play(&mut self, path: PathBuf) {
        if self.is_playing() {
            return;
        }

        let resume = self.path.as_deref() == Some(path.as_path());
        if !resume {
            let duration = self
                .catalog
                .lock()
                .ok()
                .and_then(|catalog| catalog.get(&path).copied());
            let Some(duration_ms) = duration else {
                log::warn!("SimulatedPlayer: unknown file {:?}", path);
                self.emit(PlaybackEvent::Error(PlaybackError::Engine(format!(
                    "Cannot open {}",
                    path.display()
                ))));
                return;
            };
            self.path = Some(path);
            self.duration_ms = duration_ms;
            // A seek before the first play keeps its position
            self.position_ms = self.position_ms.min(duration_ms);
        }
        if self.position_ms >= self.duration_ms {
            self.position_ms = 0;
        }

        self.last_tick = Instant::now();
        self.set_playing(true);
        self.emit(PlaybackEvent::Started);
        self.emit(PlaybackEvent::Progress(self.position_ms));
    }

    /// Move the position forward by the wall time since the last tick
    fn advance(&mut self) {
        if !self.is_playing() {
            return;
        }
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick).as_millis() as u64;
        self.last_tick = now;

        self.position_ms = (self.position_ms + elapsed).min(self.duration_ms);
        self.emit(PlaybackEvent::Progress(self.position_ms));

        if self.position_ms >= self.duration_ms {
            log::info!("SimulatedPlayer: reached end of {:?}", self.path);
            self.set_playing(false);
            self.path = None;
            self.duration_ms = 0;
            self.position_ms = 0;
            self.emit(PlaybackEvent::Stopped);
        }
    }
}

/// Amplitude decoder that invents gains instead of reading audio
///
/// The output is deterministic per path: a slow swell with noise on top, one
/// gain per `FRAME_MS` in the 0..=255 range of a decoded 8-bit envelope.
#[derive(Debug, Default)]
pub struct SyntheticDecoder;

impl AmplitudeDecoder for SyntheticDecoder {
    fn decode(&mut self, path: &Path, duration_ms: u64) -> DecodeResult<Vec<u32>> {
        if duration_ms == 0 {
            return Err(DecodeError::InvalidDuration);
        }

        let frames = duration_ms.div_ceil(FRAME_MS) as usize;
        // FNV-1a over the path picks the noise seed
        let mut seed = path
            .to_string_lossy()
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325u64, |hash, b| {
                (hash ^ b as u64).wrapping_mul(0x0100_0000_01b3)
            })
            | 1;

        let gains = (0..frames)
            .map(|i| {
                // xorshift64
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                let swell = ((i as f32 * 0.013).sin() * 0.5 + 0.5) * 190.0;
                let noise = (seed % 64) as f32;
                (swell + noise).min(255.0) as u32
            })
            .collect();

        Ok(gains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recorder_core::playback::playback_channel;

    fn wait_for(
        rx: &crossbeam::channel::Receiver<PlaybackEvent>,
        pred: impl Fn(&PlaybackEvent) -> bool,
    ) -> Vec<PlaybackEvent> {
        let mut seen = Vec::new();
        while let Ok(event) = rx.recv_timeout(Duration::from_secs(2)) {
            let done = pred(&event);
            seen.push(event);
            if done {
                break;
            }
        }
        seen
    }

    #[test]
    fn test_play_reports_started_then_progress() {
        let (tx, rx) = playback_channel();
        let mut player = SimulatedPlayer::spawn(tx, Duration::from_millis(5)).unwrap();
        let path = PathBuf::from("/tmp/a.m4a");
        player.register(&path, 10_000);

        player.play(&path).unwrap();
        let events = wait_for(&rx, |e| matches!(e, PlaybackEvent::Progress(ms) if *ms > 0));

        assert_eq!(events[0], PlaybackEvent::Started);
        assert_eq!(events[1], PlaybackEvent::Progress(0));
        assert!(player.is_playing());
    }

    #[test]
    fn test_short_file_stops_at_end() {
        let (tx, rx) = playback_channel();
        let mut player = SimulatedPlayer::spawn(tx, Duration::from_millis(5)).unwrap();
        let path = PathBuf::from("/tmp/short.wav");
        player.register(&path, 30);

        player.play(&path).unwrap();
        let events = wait_for(&rx, |e| *e == PlaybackEvent::Stopped);

        assert_eq!(events.last(), Some(&PlaybackEvent::Stopped));
        assert!(events.contains(&PlaybackEvent::Progress(30)));
        // Progress never goes backwards before the stop
        let positions: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                PlaybackEvent::Progress(ms) => Some(*ms),
                _ => None,
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] <= w[1]));
        assert!(!player.is_playing());
    }

    #[test]
    fn test_unknown_file_reports_error() {
        let (tx, rx) = playback_channel();
        let mut player = SimulatedPlayer::spawn(tx, Duration::from_millis(5)).unwrap();

        player.play(Path::new("/tmp/missing.m4a")).unwrap();
        let events = wait_for(&rx, |e| matches!(e, PlaybackEvent::Error(_)));

        assert!(matches!(events.last(), Some(PlaybackEvent::Error(PlaybackError::Engine(_)))));
        assert!(!player.is_playing());
    }

    #[test]
    fn test_pause_then_seek() {
        let (tx, rx) = playback_channel();
        let mut player = SimulatedPlayer::spawn(tx, Duration::from_millis(5)).unwrap();
        let path = PathBuf::from("/tmp/b.m4a");
        player.register(&path, 60_000);

        player.play(&path).unwrap();
        wait_for(&rx, |e| *e == PlaybackEvent::Started);
        player.pause().unwrap();
        wait_for(&rx, |e| *e == PlaybackEvent::Paused);
        assert!(!player.is_playing());

        player.seek(90_000).unwrap();
        let events = wait_for(&rx, |e| matches!(e, PlaybackEvent::Seeked(_)));
        // Clamped to the duration
        assert_eq!(events.last(), Some(&PlaybackEvent::Seeked(60_000)));
    }

    #[test]
    fn test_synthetic_decoder_is_deterministic() {
        let mut decoder = SyntheticDecoder;
        let path = Path::new("/tmp/record.m4a");

        let a = decoder.decode(path, 4_000).unwrap();
        let b = decoder.decode(path, 4_000).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 100);
        assert!(a.iter().all(|&g| g <= 255));

        assert_eq!(decoder.decode(path, 0), Err(DecodeError::InvalidDuration));
    }
}
