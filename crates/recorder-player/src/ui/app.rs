//! Main iced application for recorder-player
//!
//! This is the entry point for the GUI. It manages:
//! - The records list and the active record
//! - The playback session mirrored from the engine's event channel
//! - Layout of the records list and the draggable player panel

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use iced::time;
use iced::widget::{button, column, container, row, scrollable, slider, text, toggler, Space};
use iced::{Center, Element, Fill, Length, Subscription, Task, Theme};
use recorder_core::config::default_records_dir;
use recorder_core::gesture::DampedDragConfig;
use recorder_core::playback::{playback_channel, PlaybackEventReceiver, PlayerSession};
use recorder_core::record::{InMemoryRecordsStore, Record, RecordingFormat, RecordsStore};
use recorder_core::time::format_time_interval_hour_min_sec;
use recorder_core::waveform::WaveformLoader;
use recorder_widgets::{
    channel_subscription, playback_panel, waveform_view_with_settings, DraggablePanel,
};

use super::handlers;
use super::message::Message;
use crate::audio::{SimulatedPlayer, SyntheticDecoder};
use crate::config::PlayerConfig;

/// Subscription identity of the playback event channel
const PLAYBACK_EVENTS_ID: u64 = 1;

/// Tick rate while something is animating
const ANIMATION_TICK: Duration = Duration::from_millis(16);

/// Tick rate otherwise (loader polling)
const IDLE_TICK: Duration = Duration::from_millis(200);

/// Panel height taken by everything except the waveform
const PANEL_CHROME_HEIGHT: f32 = 170.0;

/// Smallest waveform height when the panel is configured very short
const MIN_WAVEFORM_HEIGHT: f32 = 80.0;

/// Application state
pub struct RecorderApp {
    pub config: PlayerConfig,
    pub config_path: PathBuf,
    pub store: InMemoryRecordsStore,
    pub session: PlayerSession,
    pub player: SimulatedPlayer,
    pub events: PlaybackEventReceiver,
    pub loader: WaveformLoader,
    pub panel: DraggablePanel,
    /// Status message
    pub status: String,
}

impl RecorderApp {
    /// Create the application with the engine threads running
    pub fn new(config: PlayerConfig, config_path: PathBuf) -> Result<Self> {
        let (events_tx, events_rx) = playback_channel();
        let player = SimulatedPlayer::spawn(
            events_tx,
            Duration::from_millis(config.playback_tick_ms),
        )
        .context("Failed to start playback clock thread")?;
        let loader = WaveformLoader::spawn(
            Box::new(SyntheticDecoder),
            config.waveform.half_height_px,
        )
        .context("Failed to start waveform loader thread")?;

        let mut store = InMemoryRecordsStore::new();
        for record in demo_records(&default_records_dir()) {
            player.register(&record.path, record.duration_ms);
            store.insert(record);
        }
        log::info!("RecorderApp: {} records available", store.len());

        Ok(Self {
            session: PlayerSession::new(config.waveform.clone()),
            panel: DraggablePanel::new(DampedDragConfig::from(&config.panel)),
            config,
            config_path,
            store,
            player,
            events: events_rx,
            loader,
            status: String::new(),
        })
    }

    /// Update application state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => handlers::tick::handle(self),
            Message::Playback(event) => handlers::playback::handle_event(self, event),
            Message::SelectRecord(id) => handlers::records::select(self, id),
            Message::Play
            | Message::Pause
            | Message::Stop
            | Message::ProgressBarChanged(_)
            | Message::SeekStart
            | Message::SeekProgress(_)
            | Message::SeekEnd(_) => handlers::playback::handle(self, message),
            Message::Panel(gesture) => handlers::playback::handle_panel(self, gesture),
            Message::SetShowTimeline(_) | Message::SaveSettingsComplete(_) => {
                handlers::settings::handle(self, message)
            }
        }
    }

    /// Playback events plus a tick that speeds up while animating
    pub fn subscription(&self) -> Subscription<Message> {
        let tick = if self.session.is_animating() || self.panel.is_animating() {
            ANIMATION_TICK
        } else {
            IDLE_TICK
        };

        Subscription::batch([
            channel_subscription(PLAYBACK_EVENTS_ID, self.events.clone()).map(Message::Playback),
            time::every(tick).map(|_| Message::Tick),
        ])
    }

    /// Build the view
    pub fn view(&self) -> Element<'_, Message> {
        let header = self.view_header();
        let records = self.view_records();

        let mut content = column![header, records].spacing(10).padding(10);
        if self.session.has_record() {
            content = content.push(playback_panel(
                self.view_player(),
                &self.panel,
                Message::Panel,
            ));
        }

        let status_bar = container(text(&self.status).size(12)).padding(5);

        container(column![content.height(Fill), status_bar])
            .width(Fill)
            .height(Fill)
            .into()
    }

    /// View for the header/global controls
    fn view_header(&self) -> Element<'_, Message> {
        let title = text("RECORDER").size(24);

        let timeline_toggle = toggler(self.config.waveform.show_timeline)
            .on_toggle(Message::SetShowTimeline);

        row![
            title,
            Space::new().width(Fill),
            text("Timeline").size(14),
            timeline_toggle,
        ]
        .spacing(10)
        .align_y(Center)
        .padding(10)
        .into()
    }

    fn view_records(&self) -> Element<'_, Message> {
        let active = self.session.record_id();
        let entries: Vec<Element<Message>> = self
            .store
            .records()
            .map(|record| {
                let marker = if Some(record.id) == active { "▶" } else { " " };
                let label = row![
                    text(marker).size(14),
                    text(&record.name).size(14),
                    Space::new().width(Fill),
                    text(format_time_interval_hour_min_sec(record.duration_ms)).size(12),
                ]
                .spacing(8)
                .align_y(Center);

                button(label)
                    .on_press(Message::SelectRecord(record.id))
                    .width(Fill)
                    .padding(8)
                    .into()
            })
            .collect();

        scrollable(column(entries).spacing(2))
            .height(Length::Fill)
            .into()
    }

    /// Player panel: title, waveform, progress and transport
    fn view_player(&self) -> Element<'_, Message> {
        let session = &self.session;

        let title = column![
            text(&session.record_name).size(18),
            text(&session.record_info).size(12),
        ]
        .spacing(2);

        let waveform_height =
            (self.panel.panel_height() - PANEL_CHROME_HEIGHT).max(MIN_WAVEFORM_HEIGHT);
        let waveform = waveform_view_with_settings(
            session.waveform(),
            &self.config.waveform,
            waveform_height,
            || Message::SeekStart,
            Message::SeekProgress,
            Message::SeekEnd,
        );

        let progress = row![
            text(&session.start_text).size(12),
            slider(0.0..=1.0, session.progress, Message::ProgressBarChanged).step(0.001),
            text(&session.end_text).size(12),
        ]
        .spacing(10)
        .align_y(Center);

        let play_pause = if session.show_pause {
            button(text("⏸").size(18)).on_press(Message::Pause)
        } else {
            button(text("▶").size(18)).on_press(Message::Play)
        }
        .padding(8);

        let mut transport = row![play_pause].spacing(10).align_y(Center);
        if session.show_stop {
            transport = transport.push(button(text("■").size(18)).on_press(Message::Stop).padding(8));
        }
        transport = transport.push(Space::new().width(Fill));
        transport = transport.push(text(&session.time_text).size(16));

        column![title, waveform, progress, transport].spacing(10).into()
    }

    /// Get the theme
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Records shown on first start
fn demo_records(dir: &Path) -> Vec<Record> {
    let entries = [
        ("Voice memo", 12_000, RecordingFormat::M4a, 128_000, 2u16),
        ("Lecture", 437_232, RecordingFormat::M4a, 64_000, 1),
        ("Interview", 2_730_000, RecordingFormat::Wav, 0, 2),
        ("Rehearsal", 4_215_500, RecordingFormat::ThreeGp, 0, 1),
    ];

    entries
        .into_iter()
        .map(|(name, duration_ms, format, bitrate, channel_count)| {
            let sample_rate = 44_100;
            let size_bytes = if bitrate > 0 {
                duration_ms * bitrate as u64 / 8 / 1000
            } else {
                duration_ms * sample_rate as u64 * 2 * channel_count as u64 / 1000
            };
            Record {
                name: name.to_string(),
                duration_ms,
                path: dir.join(format!("{}.{}", name, format.extension())),
                format,
                size_bytes,
                sample_rate,
                channel_count,
                bitrate,
                ..Record::default()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_records() {
        let records = demo_records(Path::new("/records"));
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| !r.waveform_processed && r.amplitudes.is_empty()));
        assert_eq!(records[1].path, PathBuf::from("/records/Lecture.m4a"));
        assert_eq!(records[1].info_text(), "3.5 MB, m4a, 64 kbps, 44 kHz");
    }
}
