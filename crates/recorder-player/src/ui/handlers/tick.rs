//! Tick message handler
//!
//! Handles the periodic tick for:
//! - Waveform loader results (store the decoded gains, swap in the snapshot)
//! - The session's move-to-start animation after a stop
//! - The player panel's return/dismiss animation

use std::time::Instant;

use iced::Task;
use recorder_core::record::RecordsStore;

use super::playback::on_panel_event;
use crate::ui::app::RecorderApp;
use crate::ui::message::Message;

/// Handle the tick message
pub fn handle(app: &mut RecorderApp) -> Task<Message> {
    while let Some(outcome) = app.loader.try_recv() {
        if let Ok(ref result) = outcome {
            if let Err(e) = app.store.update_amplitudes(result.record_id, result.raw.clone()) {
                log::warn!("Could not store waveform: {}", e);
            }
        }
        if let Err(ref failure) = outcome {
            app.status = format!("Waveform unavailable: {}", failure.error);
        }
        app.session.apply_loaded(outcome);
    }

    let now = Instant::now();
    app.session.tick(now);
    let event = app.panel.tick(now);
    on_panel_event(app, event);

    Task::none()
}
