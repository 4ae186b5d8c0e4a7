//! Recorder Player - browse recordings and play them back on a scrolling waveform
//!
//! This is the main entry point for the GUI application. It:
//! 1. Loads the YAML config (waveform, panel and playback settings)
//! 2. Starts the simulated playback clock and the waveform loader threads
//! 3. Launches the iced GUI application

mod audio;
mod config;
mod ui;

use std::cell::RefCell;

use iced::{Size, Task};

use ui::{Message, RecorderApp};

fn main() -> anyhow::Result<()> {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("recorder-player starting up");

    let config_path = config::default_config_path();
    let config = config::load_config(&config_path);

    let app = RecorderApp::new(config, config_path)?;

    // The boot closure must be Fn; it is only called once
    let app_cell = RefCell::new(Some(app));

    iced::application(
        move || {
            let app = app_cell
                .borrow_mut()
                .take()
                .expect("application state already taken");
            (app, Task::none())
        },
        update,
        view,
    )
    .subscription(subscription)
    .theme(theme)
    .title("Recorder")
    .window_size(Size::new(900.0, 700.0))
    .run()?;

    log::info!("recorder-player stopped");
    Ok(())
}

/// Update function for iced
fn update(app: &mut RecorderApp, message: Message) -> Task<Message> {
    app.update(message)
}

/// View function for iced
fn view(app: &RecorderApp) -> iced::Element<'_, Message> {
    app.view()
}

/// Subscription function for iced
fn subscription(app: &RecorderApp) -> iced::Subscription<Message> {
    app.subscription()
}

/// Theme function for iced
fn theme(app: &RecorderApp) -> iced::Theme {
    app.theme()
}
