//! Damped drag-to-dismiss controller
//!
//! Drives the vertical offset of a floating panel the user can swipe away.
//! Raw drag distance is passed through an arctangent curve,
//! `offset = k * atan(raw / k)` with `k = max_travel / (π/2)`, so the panel
//! slows down as it approaches `max_travel` instead of stopping abruptly.
//!
//! ## Lifecycle
//!
//! ```text
//! Resting ──begin──► Dragging ──release──┬─► Returning ──(anim done)──► Resting
//!    ▲                   ▲               │
//!    │                   │               └─► Dismissing ──(anim done, Dismissed)──► AwaitingReset
//!    │                   └── begin (cancels any animation) ◄──────────────────────────────┤
//!    └───────────────────────────────(delay elapsed, Reset)───────────────────────────────┘
//! ```
//!
//! The controller owns no timers: the host calls `tick(now)` from its frame
//! clock while `is_animating()` is true.

use std::f32::consts::FRAC_PI_2;
use std::time::{Duration, Instant};

use crate::config::PanelSettings;

use super::animation::{Easing, Tween};

/// Tuning for a `DampedDrag`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedDragConfig {
    /// Offset the panel sits at when idle
    pub resting_offset: f32,
    /// Asymptotic limit of the damped offset
    pub max_travel: f32,
    /// Fraction of `panel_height` a release must exceed to dismiss
    pub dismiss_ratio: f32,
    /// Off-screen target as a multiple of `panel_height`
    pub off_screen_factor: f32,
    /// Measured panel height
    pub panel_height: f32,
    /// Return and dismiss animation length
    pub animation: Duration,
    /// Time spent off-screen before snapping back to rest
    pub reset_delay: Duration,
}

impl Default for DampedDragConfig {
    fn default() -> Self {
        Self::from(&PanelSettings::default())
    }
}

impl From<&PanelSettings> for DampedDragConfig {
    fn from(settings: &PanelSettings) -> Self {
        Self {
            resting_offset: settings.resting_offset_px,
            max_travel: settings.max_travel_px,
            dismiss_ratio: settings.dismiss_ratio,
            off_screen_factor: settings.off_screen_factor,
            panel_height: settings.panel_height_px,
            animation: Duration::from_millis(settings.animation_ms),
            reset_delay: Duration::from_millis(settings.reset_delay_ms),
        }
    }
}

impl DampedDragConfig {
    /// Damping constant of the arctangent curve
    pub fn k(&self) -> f32 {
        self.max_travel / FRAC_PI_2
    }

    /// Absolute offset a release must exceed to dismiss
    pub fn dismiss_threshold(&self) -> f32 {
        self.panel_height * self.dismiss_ratio
    }

    /// Where the dismiss animation ends
    pub fn off_screen_offset(&self) -> f32 {
        self.panel_height * self.off_screen_factor
    }

    /// Apply the damping curve to a raw offset
    pub fn damp(&self, raw: f32) -> f32 {
        let k = self.k();
        if k <= 0.0 {
            return 0.0;
        }
        k * (raw / k).atan()
    }
}

/// Where the controller is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragPhase {
    Resting,
    Dragging,
    Returning(Tween),
    Dismissing(Tween),
    AwaitingReset { until: Instant },
}

/// Emitted from `tick` when the controller crosses a lifecycle boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// The panel finished sliding off-screen; the host should stop/dismiss
    Dismissed,
    /// The panel snapped back to its resting offset after a dismissal
    Reset,
}

/// Single-axis damped drag with animated return or dismissal
#[derive(Debug, Clone)]
pub struct DampedDrag {
    config: DampedDragConfig,
    phase: DragPhase,
    /// Accumulated raw drag distance (starts at the resting offset)
    cumulative: f32,
    /// Damped offset of the current gesture, used for the dismiss decision
    drag_offset: f32,
    /// Offset to display right now
    offset: f32,
}

impl Default for DampedDrag {
    fn default() -> Self {
        Self::new(DampedDragConfig::default())
    }
}

impl DampedDrag {
    pub fn new(config: DampedDragConfig) -> Self {
        Self {
            phase: DragPhase::Resting,
            cumulative: config.resting_offset,
            drag_offset: config.resting_offset,
            offset: config.resting_offset,
            config,
        }
    }

    pub fn config(&self) -> &DampedDragConfig {
        &self.config
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Current display offset
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging)
    }

    /// Whether the host needs to keep calling `tick`
    pub fn is_animating(&self) -> bool {
        matches!(
            self.phase,
            DragPhase::Returning(_) | DragPhase::Dismissing(_) | DragPhase::AwaitingReset { .. }
        )
    }

    /// Update the measured panel height (takes effect on the next release)
    pub fn set_panel_height(&mut self, height: f32) {
        self.config.panel_height = height.max(0.0);
    }

    /// Pointer went down on the panel
    ///
    /// Any in-flight animation is cancelled and the panel stays where the
    /// animation had got to until the first drag update. A dismissal that
    /// was still animating is abandoned, so it never fires.
    pub fn begin(&mut self, now: Instant) {
        if let DragPhase::Returning(tween) | DragPhase::Dismissing(tween) = self.phase {
            self.offset = tween.value_at(now);
            log::debug!("DampedDrag: animation cancelled at offset {:.1}", self.offset);
        }
        self.cumulative = self.config.resting_offset;
        self.drag_offset = self.config.resting_offset;
        self.phase = DragPhase::Dragging;
    }

    /// Pointer moved by `delta` along the drag axis
    ///
    /// Returns the new display offset. Ignored unless dragging.
    pub fn drag(&mut self, delta: f32) -> f32 {
        if self.is_dragging() {
            self.cumulative += delta;
            self.drag_offset = self.config.damp(self.cumulative);
            self.offset = self.drag_offset;
        }
        self.offset
    }

    /// Pointer released: animate off-screen or back to rest
    pub fn release(&mut self, now: Instant) {
        if !self.is_dragging() {
            return;
        }

        let dismiss = self.drag_offset.abs() > self.config.dismiss_threshold();
        let target = if dismiss {
            self.config.off_screen_offset()
        } else {
            self.config.resting_offset
        };
        let tween = Tween::new(
            self.offset,
            target,
            now,
            self.config.animation,
            Easing::FastOutSlowIn,
        );

        self.phase = if dismiss {
            log::debug!(
                "DampedDrag: released at {:.1} (threshold {:.1}), dismissing",
                self.drag_offset,
                self.config.dismiss_threshold()
            );
            DragPhase::Dismissing(tween)
        } else {
            DragPhase::Returning(tween)
        };
        self.drag_offset = self.config.resting_offset;
        self.cumulative = self.config.resting_offset;
    }

    /// Gesture cancelled by the system; resolves exactly like a release
    pub fn cancel(&mut self, now: Instant) {
        self.release(now);
    }

    /// Advance animations to `now`
    pub fn tick(&mut self, now: Instant) -> Option<DragEvent> {
        match self.phase {
            DragPhase::Resting | DragPhase::Dragging => None,
            DragPhase::Returning(tween) => {
                self.offset = tween.value_at(now);
                if tween.is_finished(now) {
                    self.phase = DragPhase::Resting;
                }
                None
            }
            DragPhase::Dismissing(tween) => {
                self.offset = tween.value_at(now);
                if tween.is_finished(now) {
                    self.phase = DragPhase::AwaitingReset {
                        until: tween.finishes_at() + self.config.reset_delay,
                    };
                    log::info!("DampedDrag: panel dismissed");
                    Some(DragEvent::Dismissed)
                } else {
                    None
                }
            }
            DragPhase::AwaitingReset { until } => {
                if now >= until {
                    self.offset = self.config.resting_offset;
                    self.phase = DragPhase::Resting;
                    Some(DragEvent::Reset)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Run ticks every 16 ms from `from` to `to`, collecting events
    fn run(drag: &mut DampedDrag, from: Instant, to: Instant) -> Vec<DragEvent> {
        let mut events = Vec::new();
        let mut now = from;
        while now <= to {
            events.extend(drag.tick(now));
            now += ms(16);
        }
        events.extend(drag.tick(to));
        events
    }

    #[test]
    fn test_damping_curve() {
        let config = DampedDragConfig::default();
        assert!((config.k() - 250.0 / FRAC_PI_2).abs() < 1e-3);
        assert_eq!(config.damp(0.0), 0.0);
        // Small drags are nearly linear
        assert!((config.damp(10.0) - 10.0).abs() < 0.1);
        // Never exceeds the travel limit
        assert!(config.damp(100_000.0) < 250.0);
        assert!(config.damp(-100_000.0) > -250.0);
        assert!(config.damp(400.0) < 400.0);
    }

    #[test]
    fn test_drag_starts_from_resting_offset() {
        let t0 = Instant::now();
        let mut drag = DampedDrag::default();
        assert_eq!(drag.offset(), 12.0);

        drag.begin(t0);
        let offset = drag.drag(0.0);
        assert!((offset - DampedDragConfig::default().damp(12.0)).abs() < 1e-4);
    }

    #[test]
    fn test_large_drag_dismisses_exactly_once() {
        let t0 = Instant::now();
        let mut drag = DampedDrag::default();
        assert_eq!(drag.config().dismiss_threshold(), 150.0);

        drag.begin(t0);
        for _ in 0..40 {
            drag.drag(10.0);
        }
        assert!(drag.offset() > 150.0);

        drag.release(t0 + ms(100));
        assert!(matches!(drag.phase(), DragPhase::Dismissing(_)));

        let events = run(&mut drag, t0 + ms(100), t0 + ms(2_000));
        assert_eq!(events, vec![DragEvent::Dismissed, DragEvent::Reset]);
        assert_eq!(drag.offset(), 12.0);
        assert_eq!(drag.phase(), DragPhase::Resting);
    }

    #[test]
    fn test_dismiss_reaches_off_screen_before_reset() {
        let t0 = Instant::now();
        let mut drag = DampedDrag::default();
        drag.begin(t0);
        drag.drag(500.0);
        drag.release(t0);

        assert_eq!(drag.tick(t0 + ms(500)), Some(DragEvent::Dismissed));
        assert_eq!(drag.offset(), 450.0);
        assert!(drag.is_animating());

        assert_eq!(drag.tick(t0 + ms(1_000)), None);
        assert_eq!(drag.offset(), 450.0);
        assert_eq!(drag.tick(t0 + ms(1_100)), Some(DragEvent::Reset));
        assert!(!drag.is_animating());
    }

    #[test]
    fn test_small_drag_returns_to_rest() {
        let t0 = Instant::now();
        let mut drag = DampedDrag::default();

        drag.begin(t0);
        drag.drag(100.0);
        let released_at = drag.offset();
        assert!(released_at < 150.0);
        drag.release(t0);
        assert!(matches!(drag.phase(), DragPhase::Returning(_)));

        let mid = drag.tick(t0 + ms(250));
        assert_eq!(mid, None);
        assert!(drag.offset() < released_at && drag.offset() > 12.0);

        let events = run(&mut drag, t0 + ms(250), t0 + ms(2_000));
        assert!(events.is_empty());
        assert_eq!(drag.offset(), 12.0);
        assert_eq!(drag.phase(), DragPhase::Resting);
    }

    #[test]
    fn test_upward_drag_uses_absolute_offset() {
        let t0 = Instant::now();
        let mut drag = DampedDrag::default();
        drag.begin(t0);
        drag.drag(-600.0);
        assert!(drag.offset() < -150.0);
        drag.release(t0);
        assert!(matches!(drag.phase(), DragPhase::Dismissing(_)));
    }

    #[test]
    fn test_cancel_resolves_like_release() {
        let t0 = Instant::now();
        let mut drag = DampedDrag::default();
        drag.begin(t0);
        drag.drag(500.0);
        drag.cancel(t0);
        assert_eq!(drag.tick(t0 + ms(600)), Some(DragEvent::Dismissed));
    }

    #[test]
    fn test_new_drag_cancels_dismiss_animation() {
        let t0 = Instant::now();
        let mut drag = DampedDrag::default();
        drag.begin(t0);
        drag.drag(500.0);
        drag.release(t0);
        drag.tick(t0 + ms(200));
        let frozen = drag.offset();

        // User grabs the panel mid-flight
        drag.begin(t0 + ms(200));
        assert!(drag.is_dragging());
        assert_eq!(drag.offset(), frozen);

        // Short second gesture: no dismissal from either gesture
        drag.drag(20.0);
        drag.release(t0 + ms(300));
        let events = run(&mut drag, t0 + ms(300), t0 + ms(3_000));
        assert!(events.is_empty());
        assert_eq!(drag.offset(), 12.0);
    }

    #[test]
    fn test_drag_ignored_when_not_dragging() {
        let t0 = Instant::now();
        let mut drag = DampedDrag::default();
        assert_eq!(drag.drag(300.0), 12.0);
        drag.release(t0);
        assert_eq!(drag.phase(), DragPhase::Resting);
        assert_eq!(drag.tick(t0 + ms(1_000)), None);
    }

    #[test]
    fn test_measured_height_changes_threshold() {
        let t0 = Instant::now();
        let mut drag = DampedDrag::default();
        drag.set_panel_height(120.0);
        drag.begin(t0);
        drag.drag(60.0);
        // damp(72) ≈ 68.6 > 60
        drag.release(t0);
        assert!(matches!(drag.phase(), DragPhase::Dismissing(_)));
    }
}
