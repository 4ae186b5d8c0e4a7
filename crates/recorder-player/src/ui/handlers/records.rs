//! Records list message handler

use iced::Task;
use recorder_core::record::RecordsStore;
use recorder_core::waveform::LoadRequest;

use crate::ui::app::RecorderApp;
use crate::ui::message::Message;

/// Make `id` the active record
///
/// Playback of the previous record stops. Records without decoded gains are
/// sent to the waveform loader; the panel shows an empty waveform until the
/// result arrives on a tick.
pub fn select(app: &mut RecorderApp, id: u64) -> Task<Message> {
    if app.session.record_id() == Some(id) {
        return Task::none();
    }

    if let Err(e) = app.store.set_active(id) {
        log::warn!("select: {}", e);
        app.status = e.to_string();
        return Task::none();
    }
    let Some(record) = app.store.active_record() else {
        return Task::none();
    };

    if app.session.has_record() {
        if let Err(e) = app.session.stop(&mut app.player) {
            log::error!("select: stopping previous record failed: {}", e);
        }
    }

    app.session.load_record(&record);
    app.status = format!("Loaded {}", record.name);

    if !record.waveform_processed {
        let request = LoadRequest::Decode {
            record_id: record.id,
            path: record.path.clone(),
            duration_ms: record.duration_ms,
        };
        if let Err(e) = app.loader.load(request) {
            log::error!("select: {}", e);
            app.status = e;
        }
    }

    Task::none()
}
