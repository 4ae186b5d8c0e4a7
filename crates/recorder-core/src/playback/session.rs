//! Playback session: the owner of the waveform snapshot
//!
//! The session folds engine events and user seek gestures into one
//! `WaveformState` plus the texts and button flags shown around it. Every
//! change replaces the snapshot; the renderer only reads it.
//!
//! While the user drags the waveform (`is_seek`), engine progress updates
//! are ignored so playback does not fight the pointer. When playback stops
//! the position animates back to the start over a short decelerating tween.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::WaveformSettings;
use crate::error::{PlaybackError, PlaybackResult};
use crate::gesture::{Easing, Tween};
use crate::record::Record;
use crate::time::format_time_interval_hour_min_sec;
use crate::waveform::{adjust_waveform_heights, LoadOutcome, WaveformState};

use super::engine::PlaybackEngine;
use super::event::PlaybackEvent;

/// Length of the move-to-start animation after playback stops
pub const MOVE_TO_START_DURATION: Duration = Duration::from_millis(330);

/// View-model for the player screen
#[derive(Debug, Clone)]
pub struct PlayerSession {
    settings: WaveformSettings,
    waveform: WaveformState,
    record_id: Option<u64>,
    record_path: Option<PathBuf>,
    /// Clock text for the current position
    pub time_text: String,
    /// Label at the start of the progress bar
    pub start_text: String,
    /// Label at the end of the progress bar (record duration)
    pub end_text: String,
    /// Playback position in 0.0..=1.0
    pub progress: f32,
    pub record_name: String,
    pub record_info: String,
    pub show_pause: bool,
    pub show_stop: bool,
    /// User is dragging the waveform
    pub is_seek: bool,
    /// Last error reported by the engine
    pub last_error: Option<PlaybackError>,
    move_to_start: Option<Tween>,
}

impl PlayerSession {
    pub fn new(settings: WaveformSettings) -> Self {
        Self {
            waveform: WaveformState {
                show_timeline: settings.show_timeline,
                ..WaveformState::default()
            },
            settings,
            record_id: None,
            record_path: None,
            time_text: String::new(),
            start_text: String::new(),
            end_text: String::new(),
            progress: 0.0,
            record_name: String::new(),
            record_info: String::new(),
            show_pause: false,
            show_stop: false,
            is_seek: false,
            last_error: None,
            move_to_start: None,
        }
    }

    /// Current snapshot for the renderer
    pub fn waveform(&self) -> &WaveformState {
        &self.waveform
    }

    pub fn record_id(&self) -> Option<u64> {
        self.record_id
    }

    pub fn has_record(&self) -> bool {
        self.record_id.is_some()
    }

    /// Whether `tick` has an animation to advance
    pub fn is_animating(&self) -> bool {
        self.move_to_start.is_some()
    }

    /// Make `record` the active one and rebuild the snapshot from its gains
    pub fn load_record(&mut self, record: &Record) {
        let heights = adjust_waveform_heights(&record.amplitudes, self.settings.half_height_px);
        self.waveform = WaveformState::new(record.duration_ms, heights, &self.settings);
        self.record_id = Some(record.id);
        self.record_path = Some(record.path.clone());

        let zero = format_time_interval_hour_min_sec(0);
        self.start_text = zero.clone();
        self.time_text = zero;
        self.end_text = format_time_interval_hour_min_sec(record.duration_ms);
        self.progress = 0.0;
        self.record_name = record.name.clone();
        self.record_info = record.info_text();
        self.move_to_start = None;

        log::info!(
            "PlayerSession: loaded record {} ({} ms, {} samples, grid {} ms)",
            record.id,
            record.duration_ms,
            self.waveform.duration_samples,
            self.waveform.grid_step_ms
        );
    }

    /// Show or hide the timeline labels
    pub fn set_show_timeline(&mut self, show: bool) {
        self.settings.show_timeline = show;
        self.waveform = self.waveform.with_timeline(show);
    }

    /// Forget the active record
    pub fn clear(&mut self) {
        *self = Self::new(self.settings.clone());
    }

    /// Swap in heights computed by the background loader
    ///
    /// Returns `true` when the result belonged to the active record.
    pub fn apply_loaded(&mut self, outcome: LoadOutcome) -> bool {
        match outcome {
            Ok(result) if Some(result.record_id) == self.record_id => {
                let progress = self.waveform.play_progress_ms;
                let show_timeline = self.waveform.show_timeline;
                self.waveform =
                    WaveformState::new(self.waveform.duration_ms, result.heights, &self.settings)
                        .with_progress(progress)
                        .with_timeline(show_timeline);
                true
            }
            Ok(result) => {
                log::debug!(
                    "PlayerSession: ignoring waveform for inactive record {}",
                    result.record_id
                );
                false
            }
            Err(failure) => {
                log::warn!(
                    "PlayerSession: waveform for record {} failed: {}",
                    failure.record_id,
                    failure.error
                );
                false
            }
        }
    }

    /// Fold one engine event into the session
    pub fn apply(&mut self, event: PlaybackEvent, now: Instant) {
        match event {
            PlaybackEvent::Started => {
                self.move_to_start = None;
                self.show_pause = true;
                self.show_stop = true;
            }
            PlaybackEvent::Progress(ms) => {
                if !self.is_seek {
                    self.set_position(ms);
                    self.show_pause = true;
                    self.show_stop = true;
                }
            }
            PlaybackEvent::Paused => {
                self.show_pause = false;
                self.show_stop = true;
            }
            PlaybackEvent::Stopped => {
                self.show_pause = false;
                self.show_stop = false;
                self.start_move_to_start(now);
            }
            PlaybackEvent::Seeked(_) => {}
            PlaybackEvent::Error(error) => {
                log::error!("PlayerSession: playback error: {}", error);
                self.last_error = Some(error);
            }
        }
    }

    /// User put a finger/pointer on the waveform
    pub fn seek_start(&mut self) {
        self.move_to_start = None;
        self.is_seek = true;
    }

    /// Live position while the user drags (no engine seek)
    pub fn seek_progress(&mut self, position_ms: u64) {
        self.set_position(position_ms);
    }

    /// User released the waveform: commit the seek
    pub fn seek_end(
        &mut self,
        position_ms: u64,
        engine: &mut dyn PlaybackEngine,
    ) -> PlaybackResult<()> {
        self.set_position(position_ms);
        self.is_seek = false;
        if !engine.is_playing() {
            self.show_pause = false;
            self.show_stop = true;
        }
        log::debug!("PlayerSession: seek committed at {} ms", self.waveform.play_progress_ms);
        engine.seek(self.waveform.play_progress_ms)
    }

    /// Progress bar moved to `fraction` (0.0..=1.0) of the duration
    pub fn progress_bar_changed(
        &mut self,
        fraction: f32,
        engine: &mut dyn PlaybackEngine,
    ) -> PlaybackResult<()> {
        let fraction = fraction.clamp(0.0, 1.0) as f64;
        let position_ms = (self.waveform.duration_ms as f64 * fraction) as u64;
        self.set_position(position_ms);
        engine.seek(self.waveform.play_progress_ms)
    }

    /// Start playing the active record
    ///
    /// Refused (with a log message) when the engine is already playing.
    pub fn play(&mut self, engine: &mut dyn PlaybackEngine) -> PlaybackResult<()> {
        if engine.is_playing() {
            log::warn!("PlayerSession: playback did not start because already playing");
            return Ok(());
        }
        let path = self.record_path.as_deref().ok_or(PlaybackError::NoActiveRecord)?;
        engine.play(path)
    }

    pub fn pause(&mut self, engine: &mut dyn PlaybackEngine) -> PlaybackResult<()> {
        engine.pause()
    }

    pub fn stop(&mut self, engine: &mut dyn PlaybackEngine) -> PlaybackResult<()> {
        engine.stop()
    }

    /// Advance the move-to-start animation
    pub fn tick(&mut self, now: Instant) {
        if let Some(tween) = self.move_to_start {
            self.set_position(tween.value_at(now).round().max(0.0) as u64);
            if tween.is_finished(now) {
                self.move_to_start = None;
            }
        }
    }

    fn start_move_to_start(&mut self, now: Instant) {
        let from = self.waveform.play_progress_ms as f32;
        self.move_to_start = Some(Tween::new(
            from,
            0.0,
            now,
            MOVE_TO_START_DURATION,
            Easing::Decelerate,
        ));
    }

    fn set_position(&mut self, position_ms: u64) {
        self.waveform = self.waveform.with_progress(position_ms);
        self.progress = self.waveform.progress_fraction();
        self.time_text = format_time_interval_hour_min_sec(self.waveform.play_progress_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordingFormat;
    use crate::waveform::{LoadFailure, LoadResult};
    use crate::DecodeError;
    use std::path::Path;

    #[derive(Default)]
    struct FakeEngine {
        playing: bool,
        calls: Vec<String>,
    }

    impl PlaybackEngine for FakeEngine {
        fn play(&mut self, path: &Path) -> PlaybackResult<()> {
            self.playing = true;
            self.calls.push(format!("play {}", path.display()));
            Ok(())
        }

        fn pause(&mut self) -> PlaybackResult<()> {
            self.playing = false;
            self.calls.push("pause".to_string());
            Ok(())
        }

        fn stop(&mut self) -> PlaybackResult<()> {
            self.playing = false;
            self.calls.push("stop".to_string());
            Ok(())
        }

        fn seek(&mut self, position_ms: u64) -> PlaybackResult<()> {
            self.calls.push(format!("seek {}", position_ms));
            Ok(())
        }

        fn is_playing(&self) -> bool {
            self.playing
        }
    }

    fn record() -> Record {
        Record {
            id: 4,
            name: "Lecture".to_string(),
            duration_ms: 437_232,
            path: PathBuf::from("/records/lecture.m4a"),
            format: RecordingFormat::M4a,
            size_bytes: 3_500_000,
            sample_rate: 44_100,
            channel_count: 1,
            bitrate: 64_000,
            amplitudes: (0..437).map(|i| (i * 7 % 300) as u32).collect(),
            waveform_processed: true,
        }
    }

    fn loaded_session() -> PlayerSession {
        let mut session = PlayerSession::new(WaveformSettings::default());
        session.load_record(&record());
        session
    }

    #[test]
    fn test_load_record() {
        let session = loaded_session();
        let waveform = session.waveform();

        assert_eq!(waveform.duration_ms, 437_232);
        assert_eq!(waveform.duration_samples, 437);
        assert_eq!(waveform.grid_step_ms, 30_000);
        assert_eq!(waveform.width_scale, 1.5);
        assert!(waveform.waveform_data.iter().all(|&h| h <= 100));

        assert_eq!(session.start_text, "00:00");
        assert_eq!(session.time_text, "00:00");
        assert_eq!(session.end_text, "07:17");
        assert_eq!(session.record_name, "Lecture");
        assert_eq!(session.record_info, "3.5 MB, m4a, 64 kbps, 44 kHz");
    }

    #[test]
    fn test_event_folding() {
        let now = Instant::now();
        let mut session = loaded_session();

        session.apply(PlaybackEvent::Started, now);
        assert!(session.show_pause && session.show_stop);

        session.apply(PlaybackEvent::Progress(60_000), now);
        assert_eq!(session.waveform().play_progress_ms, 60_000);
        assert_eq!(session.time_text, "01:00");
        assert!((session.progress - 60_000.0 / 437_232.0).abs() < 1e-6);

        session.apply(PlaybackEvent::Paused, now);
        assert!(!session.show_pause && session.show_stop);

        session.apply(PlaybackEvent::Seeked(10), now);
        assert_eq!(session.waveform().play_progress_ms, 60_000);

        session.apply(PlaybackEvent::Error(PlaybackError::Engine("boom".into())), now);
        assert_eq!(session.last_error, Some(PlaybackError::Engine("boom".into())));
    }

    #[test]
    fn test_progress_ignored_while_seeking() {
        let now = Instant::now();
        let mut session = loaded_session();

        session.seek_start();
        session.seek_progress(100_000);
        session.apply(PlaybackEvent::Progress(5_000), now);
        assert_eq!(session.waveform().play_progress_ms, 100_000);

        let mut engine = FakeEngine::default();
        session.seek_end(120_000, &mut engine).unwrap();
        assert!(!session.is_seek);
        assert_eq!(engine.calls, vec!["seek 120000"]);
        // Not playing: stop button offered, pause hidden
        assert!(session.show_stop && !session.show_pause);

        session.apply(PlaybackEvent::Progress(121_000), now);
        assert_eq!(session.waveform().play_progress_ms, 121_000);
    }

    #[test]
    fn test_seek_end_while_playing_keeps_buttons() {
        let mut session = loaded_session();
        let mut engine = FakeEngine::default();
        session.play(&mut engine).unwrap();
        session.apply(PlaybackEvent::Started, Instant::now());

        session.seek_start();
        session.seek_end(1_000, &mut engine).unwrap();
        assert!(session.show_pause && session.show_stop);
    }

    #[test]
    fn test_progress_bar_seeks() {
        let mut session = loaded_session();
        let mut engine = FakeEngine::default();

        session.progress_bar_changed(0.5, &mut engine).unwrap();
        assert_eq!(session.waveform().play_progress_ms, 218_616);
        assert_eq!(engine.calls, vec!["seek 218616"]);

        session.progress_bar_changed(3.0, &mut engine).unwrap();
        assert_eq!(session.waveform().play_progress_ms, 437_232);
    }

    #[test]
    fn test_play_is_refused_when_playing() {
        let mut session = loaded_session();
        let mut engine = FakeEngine::default();

        session.play(&mut engine).unwrap();
        session.play(&mut engine).unwrap();
        assert_eq!(engine.calls, vec!["play /records/lecture.m4a"]);

        session.pause(&mut engine).unwrap();
        session.stop(&mut engine).unwrap();
        assert_eq!(engine.calls[1..], ["pause".to_string(), "stop".to_string()]);
    }

    #[test]
    fn test_play_without_record() {
        let mut session = PlayerSession::new(WaveformSettings::default());
        let mut engine = FakeEngine::default();
        assert_eq!(session.play(&mut engine), Err(PlaybackError::NoActiveRecord));
        assert!(engine.calls.is_empty());
    }

    #[test]
    fn test_stop_animates_to_start() {
        let t0 = Instant::now();
        let mut session = loaded_session();
        session.apply(PlaybackEvent::Progress(200_000), t0);

        session.apply(PlaybackEvent::Stopped, t0);
        assert!(!session.show_pause && !session.show_stop);
        assert!(session.is_animating());

        session.tick(t0 + Duration::from_millis(100));
        let mid = session.waveform().play_progress_ms;
        assert!(mid > 0 && mid < 200_000);

        session.tick(t0 + MOVE_TO_START_DURATION);
        assert_eq!(session.waveform().play_progress_ms, 0);
        assert_eq!(session.time_text, "00:00");
        assert!(!session.is_animating());
    }

    #[test]
    fn test_seek_cancels_move_to_start() {
        let t0 = Instant::now();
        let mut session = loaded_session();
        session.apply(PlaybackEvent::Progress(200_000), t0);
        session.apply(PlaybackEvent::Stopped, t0);

        session.seek_start();
        assert!(!session.is_animating());
        session.tick(t0 + Duration::from_secs(1));
        assert_eq!(session.waveform().play_progress_ms, 200_000);
    }

    #[test]
    fn test_zero_duration_record() {
        let mut session = PlayerSession::new(WaveformSettings::default());
        session.load_record(&Record {
            id: 1,
            ..Record::default()
        });

        session.apply(PlaybackEvent::Progress(500), Instant::now());
        assert_eq!(session.progress, 0.0);
        assert_eq!(session.waveform().play_progress_ms, 0);
        assert!(session.waveform().is_empty());
    }

    #[test]
    fn test_apply_loaded() {
        let mut session = loaded_session();
        session.apply(PlaybackEvent::Progress(9_000), Instant::now());

        let applied = session.apply_loaded(Ok(LoadResult {
            record_id: 4,
            raw: vec![1; 10],
            heights: vec![7u32; 10].into(),
        }));
        assert!(applied);
        assert_eq!(session.waveform().duration_samples, 10);
        assert_eq!(session.waveform().play_progress_ms, 9_000);

        let stale = session.apply_loaded(Ok(LoadResult {
            record_id: 99,
            raw: Vec::new(),
            heights: Vec::<u32>::new().into(),
        }));
        assert!(!stale);
        assert_eq!(session.waveform().duration_samples, 10);

        let failed = session.apply_loaded(Err(LoadFailure {
            record_id: 4,
            error: DecodeError::InvalidDuration,
        }));
        assert!(!failed);
    }

    #[test]
    fn test_clear() {
        let mut session = loaded_session();
        session.clear();
        assert!(!session.has_record());
        assert!(session.waveform().is_empty());
        assert!(session.record_name.is_empty());
    }

    #[test]
    fn test_timeline_toggle_survives_reload() {
        let mut session = loaded_session();
        assert!(session.waveform().show_timeline);

        session.set_show_timeline(false);
        assert!(!session.waveform().show_timeline);

        session.load_record(&record());
        assert!(!session.waveform().show_timeline);
    }
}
