//! Pixel/time geometry for the scrolling waveform view
//!
//! The waveform is drawn `width_scale` times wider than the view and slides
//! underneath a scrubber fixed at the horizontal center. `shift_px` is the x
//! coordinate of the waveform's logical start; it is always kept inside
//! `[-duration_px + width/2, width/2]` so the scrubber never points outside
//! the waveform.
//!
//! Degenerate inputs (zero duration, zero width, non-positive width scale)
//! produce a neutral geometry: every ratio is zero, nothing is drawn and the
//! shift is pinned to the resting position `width/2`.

use crate::config::WaveformSettings;
use crate::time::format_time_interval_hour_min;

use super::state::WaveformState;

/// One vertical waveform tick, drawn symmetrically around the center line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformTick {
    /// Column in view coordinates
    pub x: f32,
    /// Height above (and below) the center line
    pub height: u32,
}

/// One major grid line plus its half-step sub-line
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    /// Major line position in view coordinates
    pub x: f32,
    /// Sub-line position (half a step to the right)
    pub sub_x: f32,
    /// Time of the major line; negative before the waveform start
    pub millis: i64,
    /// Timeline label, only for non-negative times with the timeline enabled
    pub label: Option<String>,
}

/// Live conversion factors between time, samples and pixels
#[derive(Debug, Clone, PartialEq)]
pub struct ViewGeometry {
    pub view_width: f32,
    pub view_height: f32,
    /// X coordinate of the waveform start
    pub shift_px: f32,
    /// Full drawable waveform width (`view_width * width_scale`)
    pub duration_px: f32,
    pub millis_per_px: f32,
    pub px_per_millis: f32,
    pub px_per_sample: f32,
    pub samples_per_px: f32,
    pub text_height_px: f32,
    /// Vertical space reserved for labels at the top and bottom
    pub text_indent_px: f32,
    duration_ms: u64,
}

impl Default for ViewGeometry {
    fn default() -> Self {
        Self::from_settings(&WaveformSettings::default())
    }
}

impl ViewGeometry {
    /// Neutral geometry with the given label metrics
    pub fn new(text_height_px: f32, text_padding_px: f32) -> Self {
        Self {
            view_width: 0.0,
            view_height: 0.0,
            shift_px: 0.0,
            duration_px: 0.0,
            millis_per_px: 0.0,
            px_per_millis: 0.0,
            px_per_sample: 0.0,
            samples_per_px: 0.0,
            text_height_px,
            text_indent_px: text_height_px + text_padding_px,
            duration_ms: 0,
        }
    }

    /// Neutral geometry with label metrics from settings
    pub fn from_settings(settings: &WaveformSettings) -> Self {
        Self::new(settings.text_height_px, settings.text_padding_px)
    }

    /// Geometry for a view of the given size, centered on the playback position
    pub fn for_view(&self, width: f32, height: f32, state: &WaveformState) -> Self {
        let mut geometry = self.clone();
        geometry.resize(width, height, state);
        geometry
    }

    /// Recompute all ratios for a new view size and recenter on playback
    pub fn resize(&mut self, width: f32, height: f32, state: &WaveformState) {
        self.view_width = width.max(0.0);
        self.view_height = height.max(0.0);
        self.duration_ms = state.duration_ms;

        let usable = self.view_width > 0.0
            && state.duration_ms > 0
            && state.width_scale.is_finite()
            && state.width_scale > 0.0;

        if !usable {
            log::debug!(
                "ViewGeometry::resize: degenerate view (width={}, duration={}ms, scale={})",
                width,
                state.duration_ms,
                state.width_scale
            );
            self.duration_px = 0.0;
            self.millis_per_px = 0.0;
            self.px_per_millis = 0.0;
            self.px_per_sample = 0.0;
            self.samples_per_px = 0.0;
            self.shift_px = self.half_width();
            return;
        }

        self.duration_px = self.view_width * state.width_scale;
        self.millis_per_px = state.duration_ms as f32 / self.duration_px;
        self.px_per_millis = self.duration_px / state.duration_ms as f32;
        if state.duration_samples > 0 {
            self.px_per_sample = self.duration_px / state.duration_samples as f32;
            self.samples_per_px = state.duration_samples as f32 / self.duration_px;
        } else {
            self.px_per_sample = 0.0;
            self.samples_per_px = 0.0;
        }

        self.track_progress(state.play_progress_ms);
    }

    /// Whether this geometry can't map between time and pixels
    pub fn is_degenerate(&self) -> bool {
        self.duration_px <= 0.0 || self.millis_per_px <= 0.0
    }

    /// Scrubber position (view center)
    pub fn half_width(&self) -> f32 {
        self.view_width / 2.0
    }

    /// Leftmost allowed shift (waveform end under the scrubber)
    pub fn min_shift(&self) -> f32 {
        -self.duration_px + self.half_width()
    }

    /// Rightmost allowed shift (waveform start under the scrubber)
    pub fn max_shift(&self) -> f32 {
        self.half_width()
    }

    /// Clamp a shift into the allowed range
    pub fn clamp_shift(&self, shift_px: f32) -> f32 {
        if self.is_degenerate() || !shift_px.is_finite() {
            return self.max_shift();
        }
        shift_px.clamp(self.min_shift(), self.max_shift())
    }

    /// Set the shift (clamped) and return the value actually applied
    pub fn set_shift(&mut self, shift_px: f32) -> f32 {
        self.shift_px = self.clamp_shift(shift_px);
        self.shift_px
    }

    /// Move the waveform by a drag delta; overshoot saturates at either end
    pub fn shift_by(&mut self, delta_px: f32) -> f32 {
        self.set_shift(self.shift_px + delta_px)
    }

    /// Time under the scrubber for a given shift
    pub fn position_at_shift(&self, shift_px: f32) -> u64 {
        if self.is_degenerate() {
            return 0;
        }
        let shift = self.clamp_shift(shift_px);
        let millis = ((-shift + self.half_width()) * self.millis_per_px).max(0.0) as u64;
        millis.min(self.duration_ms)
    }

    /// Time currently under the scrubber
    pub fn position_ms(&self) -> u64 {
        self.position_at_shift(self.shift_px)
    }

    /// Shift that places the given time under the scrubber
    pub fn shift_for_position(&self, position_ms: u64) -> f32 {
        self.clamp_shift(-(position_ms as f32 * self.px_per_millis) + self.half_width())
    }

    /// Follow the playback position
    pub fn track_progress(&mut self, position_ms: u64) {
        self.shift_px = self.shift_for_position(position_ms);
    }

    /// X coordinate of the waveform start marker
    pub fn start_marker_x(&self) -> f32 {
        self.shift_px
    }

    /// X coordinate of the waveform end marker
    pub fn end_marker_x(&self, sample_count: usize) -> f32 {
        self.shift_px + sample_count as f32 * self.px_per_sample
    }

    /// Visible waveform ticks, one per pixel column
    ///
    /// Columns past the last sample reuse the last sample's height.
    pub fn waveform_ticks<'a>(&self, data: &'a [u32]) -> impl Iterator<Item = WaveformTick> + 'a {
        let shift = self.shift_px;
        let samples_per_px = self.samples_per_px;
        let last_sample = data.len().saturating_sub(1);

        let (first, end) = if data.is_empty() || self.is_degenerate() || samples_per_px <= 0.0 {
            (0, 0)
        } else {
            let total = self.duration_px as usize;
            let first = (-shift).ceil().max(0.0) as usize;
            let last_visible = (self.view_width - shift).floor();
            let end = if last_visible < 0.0 {
                0
            } else {
                (last_visible as usize + 1).min(total)
            };
            (first, end.max(first))
        };

        (first..end).map(move |index| {
            let sample_index = ((index as f32 * samples_per_px) as usize).min(last_sample);
            WaveformTick {
                x: shift + index as f32,
                height: data[sample_index],
            }
        })
    }

    /// Visible grid lines for the current shift
    ///
    /// Lines start half a view before the waveform and continue one step past
    /// its end plus half a view, so the edges never show an empty grid.
    pub fn grid_lines(&self, state: &WaveformState) -> Vec<GridLine> {
        if self.is_degenerate() || state.grid_step_ms == 0 {
            return Vec::new();
        }

        let step = state.grid_step_ms as i64;
        let step_px = step as f32 * self.px_per_millis;
        let sub_step_px = (step / 2) as f32 * self.px_per_millis;
        let half_width_ms = self.half_width() * self.millis_per_px;
        let grid_end = state.duration_ms as i64 + half_width_ms as i64 + step;
        let half_screen_steps = (half_width_ms / step as f32) as i64;

        // Skip straight to the first step that can be visible
        let first_visible_ms = ((-step_px - self.shift_px) / self.px_per_millis).floor() as i64;
        let first_step = (-half_screen_steps).max(first_visible_ms.div_euclid(step));

        let mut lines = Vec::new();
        let mut millis = first_step * step;
        while millis < grid_end {
            let x = self.shift_px + millis as f32 * self.px_per_millis;
            if x > self.view_width + step_px {
                break;
            }
            if x >= -step_px {
                let label = (state.show_timeline && millis >= 0)
                    .then(|| format_time_interval_hour_min(millis as u64));
                lines.push(GridLine {
                    x,
                    sub_x: x + sub_step_px,
                    millis,
                    label,
                });
            }
            millis += step;
        }
        lines
    }
}
