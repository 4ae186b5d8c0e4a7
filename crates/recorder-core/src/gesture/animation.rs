//! Timed value animations
//!
//! A `Tween` is a pure function of time: it stores where it started and
//! evaluates its value for any `Instant`, so the owner just samples it from
//! its frame tick and drops it to cancel.

use std::time::{Duration, Instant};

/// Progress curve applied to a tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Fast start, slowing to a stop: `1 - (1 - t)²`
    Decelerate,
    /// Material standard curve, cubic bezier (0.4, 0.0, 0.2, 1.0)
    #[default]
    FastOutSlowIn,
}

impl Easing {
    /// Map linear progress `t` in 0.0..=1.0 to eased progress
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
        }
    }
}

/// Evaluate a CSS-style cubic bezier easing (endpoints fixed at 0,0 and 1,1)
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    fn component(p1: f32, p2: f32, t: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    // x(t) is monotonic for x1, x2 in [0, 1], so bisection converges
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    for _ in 0..24 {
        let mid = (lo + hi) * 0.5;
        if component(x1, x2, mid) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    component(y1, y2, (lo + hi) * 0.5)
}

/// Animates a single float from one value to another over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, started: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            started,
            duration,
            easing,
        }
    }

    /// Value the tween ends at
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Instant the tween reaches its target
    pub fn finishes_at(&self) -> Instant {
        self.started + self.duration
    }

    /// Linear progress in 0.0..=1.0
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.finishes_at()
    }

    /// Animated value at `now` (exactly `target()` once finished)
    pub fn value_at(&self, now: Instant) -> f32 {
        if self.is_finished(now) {
            return self.to;
        }
        let eased = self.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * eased
    }
}
