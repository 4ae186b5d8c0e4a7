//! Playback message handler
//!
//! Transport buttons, progress slider, waveform seeking, the engine's event
//! stream and the player panel's drag-to-dismiss gesture.

use std::time::Instant;

use iced::Task;
use recorder_core::gesture::DragEvent;
use recorder_core::playback::PlaybackEvent;
use recorder_core::PlaybackResult;
use recorder_widgets::PanelGesture;

use crate::ui::app::RecorderApp;
use crate::ui::message::Message;

/// Fold one engine event into the session
pub fn handle_event(app: &mut RecorderApp, event: PlaybackEvent) -> Task<Message> {
    if let PlaybackEvent::Error(ref error) = event {
        app.status = format!("Playback error: {}", error);
    }
    app.session.apply(event, Instant::now());
    Task::none()
}

/// Handle transport and seek messages
pub fn handle(app: &mut RecorderApp, message: Message) -> Task<Message> {
    let session = &mut app.session;
    let player = &mut app.player;

    let result: PlaybackResult<()> = match message {
        Message::Play => session.play(player),
        Message::Pause => session.pause(player),
        Message::Stop => session.stop(player),
        Message::ProgressBarChanged(fraction) => session.progress_bar_changed(fraction, player),
        Message::SeekStart => {
            session.seek_start();
            Ok(())
        }
        Message::SeekProgress(position_ms) => {
            session.seek_progress(position_ms);
            Ok(())
        }
        Message::SeekEnd(position_ms) => session.seek_end(position_ms, player),
        _ => Ok(()),
    };

    if let Err(e) = result {
        log::error!("Playback command failed: {}", e);
        app.status = format!("Playback failed: {}", e);
    }
    Task::none()
}

/// Handle player panel gestures; a completed swipe stops playback
pub fn handle_panel(app: &mut RecorderApp, gesture: PanelGesture) -> Task<Message> {
    let event = app.panel.handle_event(gesture, Instant::now());
    on_panel_event(app, event);
    Task::none()
}

pub(super) fn on_panel_event(app: &mut RecorderApp, event: Option<DragEvent>) {
    match event {
        Some(DragEvent::Dismissed) => {
            log::info!("Player panel dismissed, stopping playback");
            if let Err(e) = app.session.stop(&mut app.player) {
                log::error!("Stop after dismiss failed: {}", e);
            }
            app.status = "Playback stopped".to_string();
        }
        Some(DragEvent::Reset) | None => {}
    }
}
