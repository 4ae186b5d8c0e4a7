//! Drag-to-seek state machine for the waveform view
//!
//! Three phases, mirroring the pointer gesture:
//!
//! - **begin**: no geometry change; the owner stops following playback
//! - **update**: the drag delta moves the shift (clamped) and the time under
//!   the scrubber is reported as live progress, without seeking
//! - **end**: the final time is reported as a committed seek and the owner
//!   resumes following playback

use super::geometry::ViewGeometry;

/// What the seek controller asks its owner to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekEvent {
    /// Stop moving the waveform with playback progress
    Started,
    /// Live position feedback while dragging (no engine seek)
    Progress(u64),
    /// Commit a seek to this position and resume following playback
    Committed(u64),
}

/// Tracks whether a seek drag is in progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeekController {
    seeking: bool,
}

impl SeekController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress
    pub fn is_seeking(&self) -> bool {
        self.seeking
    }

    /// Pointer went down on the waveform
    pub fn begin(&mut self) -> SeekEvent {
        self.seeking = true;
        SeekEvent::Started
    }

    /// Pointer moved horizontally by `delta_px` while dragging
    pub fn update(&mut self, geometry: &mut ViewGeometry, delta_px: f32) -> SeekEvent {
        let shift = geometry.shift_by(delta_px);
        SeekEvent::Progress(geometry.position_at_shift(shift))
    }

    /// Pointer released (or the gesture was cancelled)
    pub fn end(&mut self, geometry: &ViewGeometry) -> SeekEvent {
        self.seeking = false;
        SeekEvent::Committed(geometry.position_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WaveformSettings;
    use crate::waveform::WaveformState;

    fn setup() -> (WaveformState, ViewGeometry) {
        let state = WaveformState::new(60_000, vec![10u32; 600], &WaveformSettings::default());
        let geometry = ViewGeometry::default().for_view(400.0, 120.0, &state);
        (state, geometry)
    }

    #[test]
    fn test_phases() {
        let (_, mut geometry) = setup();
        let mut seek = SeekController::new();

        assert!(!seek.is_seeking());
        assert_eq!(seek.begin(), SeekEvent::Started);
        assert!(seek.is_seeking());

        // Dragging left by 100 px moves 100 px * 100 ms/px forward in time
        assert_eq!(seek.update(&mut geometry, -100.0), SeekEvent::Progress(10_000));
        assert!(seek.is_seeking());

        assert_eq!(seek.end(&geometry), SeekEvent::Committed(10_000));
        assert!(!seek.is_seeking());
    }

    #[test]
    fn test_begin_does_not_move() {
        let (_, mut geometry) = setup();
        let before = geometry.shift_px;
        let mut seek = SeekController::new();
        seek.begin();
        assert_eq!(geometry.shift_px, before);
        assert_eq!(seek.update(&mut geometry, 0.0), SeekEvent::Progress(0));
    }

    #[test]
    fn test_overshoot_saturates_at_ends() {
        let (state, mut geometry) = setup();
        let mut seek = SeekController::new();
        seek.begin();

        assert_eq!(
            seek.update(&mut geometry, -50_000.0),
            SeekEvent::Progress(state.duration_ms)
        );
        assert_eq!(seek.update(&mut geometry, 80_000.0), SeekEvent::Progress(0));
        assert_eq!(seek.end(&geometry), SeekEvent::Committed(0));
    }

    #[test]
    fn test_seek_on_empty_recording() {
        let state = WaveformState::default();
        let mut geometry = ViewGeometry::default().for_view(400.0, 120.0, &state);
        let mut seek = SeekController::new();
        seek.begin();
        assert_eq!(seek.update(&mut geometry, -30.0), SeekEvent::Progress(0));
        assert_eq!(seek.end(&geometry), SeekEvent::Committed(0));
    }
}
