//! Drag-to-dismiss playback panel
//!
//! Wraps arbitrary panel content in a `mouse_area` and offsets it vertically
//! by a `DampedDrag`. Swiping the panel far enough slides it off-screen and
//! emits `DragEvent::Dismissed`; a short swipe springs back.
//!
//! # Usage
//!
//! ```rust,ignore
//! // App state
//! let mut panel = DraggablePanel::new(DampedDragConfig::from(&config.panel));
//!
//! // In your view function
//! playback_panel(controls, &self.panel, Message::PanelGesture)
//!
//! // In your update function
//! if let Some(DragEvent::Dismissed) = panel.handle_event(gesture, Instant::now()) {
//!     // Stop playback
//! }
//!
//! // In your tick handler (while panel.is_animating())
//! panel.tick(Instant::now());
//! ```

use std::time::Instant;

use iced::widget::{column, container, mouse_area, Space};
use iced::{Background, Border, Element, Length, Point};
use recorder_core::gesture::{DampedDrag, DampedDragConfig, DragEvent};

use crate::theme;

/// Messages emitted by the panel during interaction
#[derive(Debug, Clone)]
pub enum PanelGesture {
    /// Mouse button pressed on the panel
    Pressed,
    /// Mouse button released
    Released,
    /// Cursor left the panel mid-drag
    Cancelled,
    /// Mouse moved to position (for drag handling)
    Moved(Point),
}

/// Panel drag state: the damped controller plus pointer tracking
#[derive(Debug, Clone, Default)]
pub struct DraggablePanel {
    drag: DampedDrag,
    /// Last cursor position during drag
    last_drag_pos: Option<Point>,
}

impl DraggablePanel {
    pub fn new(config: DampedDragConfig) -> Self {
        Self {
            drag: DampedDrag::new(config),
            last_drag_pos: None,
        }
    }

    /// Current vertical offset
    pub fn offset(&self) -> f32 {
        self.drag.offset()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Whether `tick` needs to be called
    pub fn is_animating(&self) -> bool {
        self.drag.is_animating()
    }

    pub fn drag(&self) -> &DampedDrag {
        &self.drag
    }

    /// Height of the region the panel slides in (takes effect on the next release)
    pub fn set_panel_height(&mut self, height: f32) {
        self.drag.set_panel_height(height);
    }

    pub fn panel_height(&self) -> f32 {
        self.drag.config().panel_height
    }

    /// Distance from the top of the panel region to the card
    ///
    /// The region sits directly below the records list, so the card is
    /// pinned at its top edge: an upward drag still counts toward dismissal
    /// but only shows while it is within the resting offset.
    pub fn card_top(&self) -> f32 {
        self.offset().max(0.0)
    }

    /// Handle a panel gesture
    ///
    /// Call this from your update function when you receive a `PanelGesture`.
    /// Releasing never dismisses immediately; the `Dismissed` event comes from
    /// `tick` once the panel has slid off-screen.
    pub fn handle_event(&mut self, event: PanelGesture, now: Instant) -> Option<DragEvent> {
        match event {
            PanelGesture::Pressed => {
                self.drag.begin(now);
                self.last_drag_pos = None;
            }
            PanelGesture::Released => {
                self.drag.release(now);
                self.last_drag_pos = None;
            }
            PanelGesture::Cancelled => {
                if self.drag.is_dragging() {
                    self.drag.cancel(now);
                }
                self.last_drag_pos = None;
            }
            PanelGesture::Moved(position) => {
                if self.drag.is_dragging() {
                    if let Some(last_pos) = self.last_drag_pos {
                        self.drag.drag(position.y - last_pos.y);
                    }
                    self.last_drag_pos = Some(position);
                }
            }
        }
        self.drag.tick(now)
    }

    /// Advance the return/dismiss animation
    pub fn tick(&mut self, now: Instant) -> Option<DragEvent> {
        self.drag.tick(now)
    }
}

/// Create the draggable panel element
///
/// The element is a fixed region `panel_height` tall. `content` is drawn
/// inside a card pushed down by the panel's offset and clipped at the region's
/// bottom edge, so a dismissed card slides out of view. The `on_gesture`
/// callback receives `PanelGesture`s that should be passed to
/// `DraggablePanel::handle_event` in your update function.
pub fn playback_panel<'a, Message>(
    content: impl Into<Element<'a, Message>>,
    panel: &DraggablePanel,
    on_gesture: impl Fn(PanelGesture) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let card = container(content)
        .width(Length::Fill)
        .padding(12)
        .style(|_theme| container::Style {
            background: Some(Background::Color(theme::PANEL_BACKGROUND)),
            border: Border {
                radius: 12.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        });

    let shifted = container(column![Space::new().height(Length::Fixed(panel.card_top())), card])
        .width(Length::Fill)
        .height(Length::Fixed(panel.panel_height()))
        .clip(true);

    mouse_area(shifted)
        .on_press(on_gesture(PanelGesture::Pressed))
        .on_release(on_gesture(PanelGesture::Released))
        .on_exit(on_gesture(PanelGesture::Cancelled))
        .on_move(move |pos| on_gesture(PanelGesture::Moved(pos)))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_drag_follows_pointer_delta() {
        let t0 = Instant::now();
        let mut panel = DraggablePanel::default();

        panel.handle_event(PanelGesture::Pressed, t0);
        // First move only records the position
        panel.handle_event(PanelGesture::Moved(Point::new(10.0, 100.0)), t0);
        assert!((panel.offset() - 12.0).abs() < 1e-4);

        panel.handle_event(PanelGesture::Moved(Point::new(10.0, 150.0)), t0);
        assert!(panel.offset() > 12.0);
        assert!(panel.is_dragging());
    }

    #[test]
    fn test_panel_height_moves_dismiss_threshold() {
        let t0 = Instant::now();
        let mut panel = DraggablePanel::default();
        panel.set_panel_height(600.0);
        assert_eq!(panel.panel_height(), 600.0);

        // Damped offset ~202 px: dismisses a 300 px panel but not a 600 px one
        panel.handle_event(PanelGesture::Pressed, t0);
        panel.handle_event(PanelGesture::Moved(Point::new(0.0, 0.0)), t0);
        panel.handle_event(PanelGesture::Moved(Point::new(0.0, 500.0)), t0);
        panel.handle_event(PanelGesture::Released, t0);

        let mut events = Vec::new();
        let mut now = t0;
        while now < t0 + Duration::from_secs(2) {
            now += Duration::from_millis(16);
            events.extend(panel.tick(now));
        }
        assert!(events.is_empty());
        assert_eq!(panel.offset(), 12.0);
    }

    #[test]
    fn test_moves_ignored_without_press() {
        let t0 = Instant::now();
        let mut panel = DraggablePanel::default();
        panel.handle_event(PanelGesture::Moved(Point::new(0.0, 0.0)), t0);
        panel.handle_event(PanelGesture::Moved(Point::new(0.0, 400.0)), t0);
        assert_eq!(panel.offset(), 12.0);
    }

    #[test]
    fn test_swipe_dismisses_once() {
        let t0 = Instant::now();
        let mut panel = DraggablePanel::default();

        panel.handle_event(PanelGesture::Pressed, t0);
        panel.handle_event(PanelGesture::Moved(Point::new(0.0, 0.0)), t0);
        panel.handle_event(PanelGesture::Moved(Point::new(0.0, 500.0)), t0);
        assert_eq!(panel.handle_event(PanelGesture::Released, t0), None);

        let mut dismissed = 0;
        let mut now = t0;
        while now < t0 + Duration::from_secs(2) {
            now += Duration::from_millis(16);
            if panel.tick(now) == Some(DragEvent::Dismissed) {
                dismissed += 1;
            }
        }
        assert_eq!(dismissed, 1);
        assert_eq!(panel.offset(), 12.0);
        assert!(!panel.is_animating());
    }

    #[test]
    fn test_upward_drag_pins_card_but_dismisses() {
        let t0 = Instant::now();
        let mut panel = DraggablePanel::default();

        panel.handle_event(PanelGesture::Pressed, t0);
        panel.handle_event(PanelGesture::Moved(Point::new(0.0, 500.0)), t0);
        panel.handle_event(PanelGesture::Moved(Point::new(0.0, 0.0)), t0);
        assert!(panel.offset() < 0.0);
        assert_eq!(panel.card_top(), 0.0);

        panel.handle_event(PanelGesture::Released, t0);
        let mut dismissed = false;
        let mut now = t0;
        while now < t0 + Duration::from_secs(2) {
            now += Duration::from_millis(16);
            dismissed |= panel.tick(now) == Some(DragEvent::Dismissed);
        }
        assert!(dismissed);
        assert_eq!(panel.card_top(), 12.0);
    }

    #[test]
    fn test_cancel_after_release_is_ignored() {
        let t0 = Instant::now();
        let mut panel = DraggablePanel::default();
        panel.handle_event(PanelGesture::Pressed, t0);
        panel.handle_event(PanelGesture::Moved(Point::new(0.0, 0.0)), t0);
        panel.handle_event(PanelGesture::Moved(Point::new(0.0, 40.0)), t0);
        panel.handle_event(PanelGesture::Released, t0);
        assert!(panel.is_animating());

        // Pointer leaving after release must not restart anything
        panel.handle_event(PanelGesture::Cancelled, t0);
        assert!(panel.is_animating());
        assert!(!panel.is_dragging());
    }
}
