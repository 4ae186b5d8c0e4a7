//! Application messages for recorder-player

use recorder_core::playback::PlaybackEvent;
use recorder_widgets::PanelGesture;

/// Messages that can be sent to the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Tick for animations and loader polling
    Tick,
    /// Event from the playback engine, in the order it was produced
    Playback(PlaybackEvent),
    /// Make a record active and show it in the player panel
    SelectRecord(u64),

    // Transport
    Play,
    Pause,
    Stop,
    /// Progress slider moved (0.0-1.0)
    ProgressBarChanged(f32),

    // Waveform drag-to-seek
    SeekStart,
    SeekProgress(u64),
    SeekEnd(u64),

    /// Player panel gesture (drag-to-dismiss)
    Panel(PanelGesture),

    // Settings
    /// Show or hide the waveform timeline
    SetShowTimeline(bool),
    /// Settings save complete
    SaveSettingsComplete(Result<(), String>),
}
