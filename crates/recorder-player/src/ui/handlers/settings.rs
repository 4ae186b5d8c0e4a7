//! Settings message handler
//!
//! Applies setting changes immediately and saves them in the background.

use iced::Task;

use crate::config;
use crate::ui::app::RecorderApp;
use crate::ui::message::Message;

/// Handle settings messages
pub fn handle(app: &mut RecorderApp, message: Message) -> Task<Message> {
    match message {
        Message::SetShowTimeline(show) => {
            app.config.waveform.show_timeline = show;
            app.session.set_show_timeline(show);

            let config = app.config.clone();
            let config_path = app.config_path.clone();
            Task::perform(
                async move { config::save_config(&config, &config_path).map_err(|e| e.to_string()) },
                Message::SaveSettingsComplete,
            )
        }
        Message::SaveSettingsComplete(result) => {
            app.status = match result {
                Ok(()) => "Settings saved".to_string(),
                Err(e) => format!("Settings save failed: {}", e),
            };
            Task::none()
        }
        _ => Task::none(),
    }
}
