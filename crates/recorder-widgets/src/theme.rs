//! Shared colors and stroke widths for recorder widgets

use iced::Color;

/// Canvas background behind the waveform
pub const BACKGROUND: Color = Color::from_rgb(0.13, 0.13, 0.15);

/// Waveform ticks, start/end markers and timeline labels (#E6E6E6)
pub const DARK_WHITE: Color = Color::from_rgb(0.9, 0.9, 0.9);

/// Grid lines: light grey at 75% opacity (#F5F5F5BF)
pub const GRID: Color = Color::from_rgba(0.96, 0.96, 0.96, 0.75);

/// Fixed center scrubber (#FFD600)
pub const SCRUBBER: Color = Color::from_rgb(1.0, 0.84, 0.0);

/// Playback panel card
pub const PANEL_BACKGROUND: Color = Color::from_rgb(0.18, 0.18, 0.21);

pub const WAVEFORM_STROKE_WIDTH: f32 = 1.3;
pub const MARKER_STROKE_WIDTH: f32 = 1.5;
pub const GRID_STROKE_WIDTH: f32 = 0.5;
pub const SCRUBBER_STROKE_WIDTH: f32 = 2.0;
