//! Gesture controllers and timed animations
//!
//! - `DampedDrag`: drag-to-dismiss panel offset with arctangent damping
//! - `Tween` / `Easing`: time-sampled animations used by the controllers
//!   and by the playback session's move-to-start transition

mod animation;
mod damped;

pub use animation::{Easing, Tween};
pub use damped::{DampedDrag, DampedDragConfig, DragEvent, DragPhase};
