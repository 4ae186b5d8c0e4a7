//! Canvas Program for the scrolling waveform
//!
//! The waveform scrolls underneath a fixed center scrubber. Geometry is
//! derived from the `WaveformState` snapshot on every draw; while the user
//! drags, the canvas keeps its own `ViewGeometry` so the waveform follows
//! the pointer exactly, and reports positions through the seek callbacks.

use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Stroke, Text};
use iced::{mouse, touch, Color, Point, Rectangle, Theme};
use recorder_core::waveform::{SeekController, SeekEvent, ViewGeometry, WaveformState};

use crate::theme;

/// Length of the half-step sub-lines at the top and bottom of the grid
pub const GRID_SUBLINE_HEIGHT: f32 = 12.0;

/// Gap between the bottom timeline label and the canvas edge
pub const BOTTOM_LABEL_PADDING: f32 = 6.0;

/// Canvas state for tracking a seek drag
#[derive(Debug, Clone, Default)]
pub struct WaveformInteraction {
    /// Geometry owned by the drag while it lasts
    pub geometry: ViewGeometry,
    pub seek: SeekController,
    /// Pointer x at the previous drag event
    last_x: Option<f32>,
    /// Finger driving the drag, for touch input
    finger: Option<touch::Finger>,
}

/// Canvas program for the waveform with drag-to-seek
pub struct WaveformCanvas<'a, Message, StartFn, ProgressFn, EndFn>
where
    StartFn: Fn() -> Message,
    ProgressFn: Fn(u64) -> Message,
    EndFn: Fn(u64) -> Message,
{
    pub state: &'a WaveformState,
    /// Text metrics the per-view geometry is derived from
    pub template: ViewGeometry,
    pub on_seek_start: StartFn,
    pub on_seek_progress: ProgressFn,
    pub on_seek_end: EndFn,
}

impl<'a, Message, StartFn, ProgressFn, EndFn> WaveformCanvas<'a, Message, StartFn, ProgressFn, EndFn>
where
    StartFn: Fn() -> Message,
    ProgressFn: Fn(u64) -> Message,
    EndFn: Fn(u64) -> Message,
{
    /// Seek events are captured so enclosing widgets (the dismiss panel's
    /// `mouse_area`) never see the pointer of an active scrub
    fn publish(&self, event: SeekEvent) -> canvas::Action<Message> {
        let message = match event {
            SeekEvent::Started => (self.on_seek_start)(),
            SeekEvent::Progress(millis) => (self.on_seek_progress)(millis),
            SeekEvent::Committed(millis) => (self.on_seek_end)(millis),
        };
        canvas::Action::publish(message).and_capture()
    }

    fn begin(
        &self,
        interaction: &mut WaveformInteraction,
        bounds: Rectangle,
        x: f32,
    ) -> Option<canvas::Action<Message>> {
        if interaction.seek.is_seeking() {
            return None;
        }
        interaction.geometry = self.template.for_view(bounds.width, bounds.height, self.state);
        interaction.last_x = Some(x);
        Some(self.publish(interaction.seek.begin()))
    }

    fn drag(&self, interaction: &mut WaveformInteraction, x: f32) -> Option<canvas::Action<Message>> {
        if !interaction.seek.is_seeking() {
            return None;
        }
        let last_x = interaction.last_x.replace(x)?;
        let delta = x - last_x;
        if delta == 0.0 {
            return Some(canvas::Action::capture());
        }
        let event = interaction.seek.update(&mut interaction.geometry, delta);
        Some(self.publish(event))
    }

    fn end(&self, interaction: &mut WaveformInteraction) -> Option<canvas::Action<Message>> {
        if !interaction.seek.is_seeking() {
            return None;
        }
        interaction.last_x = None;
        interaction.finger = None;
        Some(self.publish(interaction.seek.end(&interaction.geometry)))
    }

    /// Geometry to draw with: the drag's own while seeking, else derived from the snapshot
    fn geometry(&self, interaction: &WaveformInteraction, bounds: Rectangle) -> ViewGeometry {
        let drag_geometry = &interaction.geometry;
        if interaction.seek.is_seeking()
            && drag_geometry.view_width == bounds.width
            && drag_geometry.view_height == bounds.height
        {
            drag_geometry.clone()
        } else {
            self.template.for_view(bounds.width, bounds.height, self.state)
        }
    }
}

impl<'a, Message, StartFn, ProgressFn, EndFn> Program<Message>
    for WaveformCanvas<'a, Message, StartFn, ProgressFn, EndFn>
where
    Message: Clone,
    StartFn: Fn() -> Message,
    ProgressFn: Fn(u64) -> Message,
    EndFn: Fn(u64) -> Message,
{
    type State = WaveformInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                // Deltas are taken in window coordinates, like CursorMoved
                let position = cursor.position_over(bounds)?;
                self.begin(interaction, bounds, position.x)
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) if interaction.finger.is_none() => {
                self.drag(interaction, position.x)
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
                if interaction.finger.is_none() =>
            {
                self.end(interaction)
            }
            Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if !bounds.contains(*position) {
                    return None;
                }
                let action = self.begin(interaction, bounds, position.x);
                if action.is_some() {
                    interaction.finger = Some(*id);
                }
                action
            }
            Event::Touch(touch::Event::FingerMoved { id, position })
                if interaction.finger == Some(*id) =>
            {
                self.drag(interaction, position.x)
            }
            Event::Touch(
                touch::Event::FingerLifted { id, .. } | touch::Event::FingerLost { id, .. },
            ) if interaction.finger == Some(*id) => self.end(interaction),
            _ => None,
        }
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if interaction.seek.is_seeking() {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) && !self.state.is_empty() {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), theme::BACKGROUND);

        if !self.state.is_empty() {
            let geometry = self.geometry(interaction, bounds);
            draw_grid(&mut frame, &geometry, self.state);
            draw_waveform(&mut frame, &geometry, self.state);
            draw_start_and_end(&mut frame, &geometry, self.state);
        }

        // Scrubber
        let center_x = bounds.width / 2.0;
        frame.stroke(
            &Path::line(Point::new(center_x, 0.0), Point::new(center_x, bounds.height)),
            Stroke::default()
                .with_color(theme::SCRUBBER)
                .with_width(theme::SCRUBBER_STROKE_WIDTH),
        );

        vec![frame.into_geometry()]
    }
}

fn vertical_line(frame: &mut Frame, x: f32, top: f32, bottom: f32, color: Color, width: f32) {
    frame.stroke(
        &Path::line(Point::new(x, top), Point::new(x, bottom)),
        Stroke::default().with_color(color).with_width(width),
    );
}

fn draw_grid(frame: &mut Frame, geometry: &ViewGeometry, state: &WaveformState) {
    let height = geometry.view_height;
    let indent = geometry.text_indent_px;
    let (color, width) = (theme::GRID, theme::GRID_STROKE_WIDTH);

    for line in geometry.grid_lines(state) {
        vertical_line(frame, line.x, indent, height - indent, color, width);
        // Half-step ticks at the top and bottom edges
        vertical_line(frame, line.sub_x, indent, indent + GRID_SUBLINE_HEIGHT, color, width);
        vertical_line(
            frame,
            line.sub_x,
            height - indent - GRID_SUBLINE_HEIGHT,
            height - indent,
            color,
            width,
        );

        if let Some(label) = line.label {
            for baseline in [geometry.text_height_px, height - BOTTOM_LABEL_PADDING] {
                frame.fill_text(Text {
                    content: label.clone(),
                    position: Point::new(line.x, baseline),
                    size: geometry.text_height_px.into(),
                    color: theme::DARK_WHITE,
                    align_x: Horizontal::Center.into(),
                    align_y: Vertical::Bottom.into(),
                    ..Text::default()
                });
            }
        }
    }
}

fn draw_waveform(frame: &mut Frame, geometry: &ViewGeometry, state: &WaveformState) {
    let center_y = geometry.view_height / 2.0;

    // All ticks in one path, one stroke call
    let path = Path::new(|builder| {
        for tick in geometry.waveform_ticks(&state.waveform_data) {
            let half = tick.height as f32 + 1.0;
            builder.move_to(Point::new(tick.x, center_y - half));
            builder.line_to(Point::new(tick.x, center_y + half));
        }
    });

    frame.stroke(
        &path,
        Stroke::default()
            .with_color(theme::DARK_WHITE)
            .with_width(theme::WAVEFORM_STROKE_WIDTH),
    );
}

fn draw_start_and_end(frame: &mut Frame, geometry: &ViewGeometry, state: &WaveformState) {
    let top = geometry.text_indent_px;
    let bottom = geometry.view_height - geometry.text_indent_px;
    let (color, width) = (theme::DARK_WHITE, theme::MARKER_STROKE_WIDTH);

    vertical_line(frame, geometry.start_marker_x(), top, bottom, color, width);
    vertical_line(
        frame,
        geometry.end_marker_x(state.waveform_data.len()),
        top,
        bottom,
        color,
        width,
    );
}
