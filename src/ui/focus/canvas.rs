// SPDX-License-Identifier: MPL-2.0
//! Canvas program that draws the focused media under the zoom/pan transform
//! and turns pointer input into [`CanvasEvent`]s.

use super::{contained_size, CanvasEvent, Message};
use crate::ui::state::{TransformState, ZoomDirection};
use iced::widget::canvas::{self, Frame, Geometry};
use iced::widget::image;
use iced::{mouse, Point, Rectangle, Renderer, Size, Theme};

/// Pixel deltas per wheel line on touchpads.
const PIXELS_PER_LINE: f32 = 120.0;

pub struct MediaCanvas<'a> {
    handle: image::Handle,
    media_size: Option<Size>,
    transform: &'a TransformState,
}

impl<'a> MediaCanvas<'a> {
    #[must_use]
    pub fn new(
        handle: image::Handle,
        media_size: Option<Size>,
        transform: &'a TransformState,
    ) -> Self {
        Self {
            handle,
            media_size,
            transform,
        }
    }

    /// Media rectangle at scale 1, centred in `bounds`.
    fn fitted_rect(&self, bounds: Size) -> Rectangle {
        let size = contained_size(self.media_size, bounds);
        Rectangle::new(
            Point::new(
                (bounds.width - size.width) / 2.0,
                (bounds.height - size.height) / 2.0,
            ),
            size,
        )
    }

    /// On-screen media rectangle after zoom and pan, in canvas coordinates.
    #[must_use]
    pub fn media_rect(&self, bounds: Size) -> Rectangle {
        let fitted = self.fitted_rect(bounds);
        let scale = self.transform.scale();
        Rectangle::new(
            self.transform.to_screen(fitted.position(), Point::ORIGIN),
            Size::new(fitted.width * scale, fitted.height * scale),
        )
    }
}

fn wheel_steps(delta: &mouse::ScrollDelta) -> f32 {
    match delta {
        mouse::ScrollDelta::Lines { y, .. } => *y,
        mouse::ScrollDelta::Pixels { y, .. } => *y / PIXELS_PER_LINE,
    }
}

fn publish(event: CanvasEvent) -> Option<iced::widget::Action<Message>> {
    Some(iced::widget::Action::publish(Message::Canvas(event)).and_capture())
}

impl canvas::Program<Message> for MediaCanvas<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<iced::widget::Action<Message>> {
        let position = cursor.position_in(bounds);

        match event {
            iced::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let position = position?;
                let steps = wheel_steps(delta);
                if steps.abs() < f32::EPSILON {
                    return None;
                }
                let direction = if steps > 0.0 {
                    ZoomDirection::In
                } else {
                    ZoomDirection::Out
                };
                let media = self.media_rect(bounds.size());
                publish(CanvasEvent::Wheel {
                    direction,
                    cursor_offset: position - media.position(),
                })
            }
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = position?;
                if self.media_rect(bounds.size()).contains(position) {
                    publish(CanvasEvent::Pressed(position))
                } else {
                    publish(CanvasEvent::BackdropPressed)
                }
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { .. })
                if self.transform.is_dragging() =>
            {
                match position {
                    Some(position) => publish(CanvasEvent::Moved(position)),
                    None => publish(CanvasEvent::CursorLeft),
                }
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                match position {
                    Some(position) => publish(CanvasEvent::Released(position)),
                    None => publish(CanvasEvent::CursorLeft),
                }
            }
            iced::Event::Mouse(mouse::Event::CursorLeft) => publish(CanvasEvent::CursorLeft),
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.draw_image(
            self.media_rect(bounds.size()),
            canvas::Image::new(self.handle.clone()),
        );
        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.transform.is_dragging() {
            mouse::Interaction::Grabbing
        } else if self.transform.can_pan() && cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}
