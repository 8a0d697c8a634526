use iced::mouse;
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Stroke};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use crate::annotation::BoundingBox;
use crate::gui::{Message, PointerEvent};

pub const BOX_COLOR: Color = Color::from_rgb(1.0, 0.0, 0.0);

/// Transparent layer over the image: draws the boxes and turns left-button
/// drags into pointer messages.
pub struct BoxCanvas<'a> {
    pub committed: &'a [BoundingBox],
    pub active: Option<BoundingBox>,
    pub enabled: bool,
}

/// Left-button drag tracked across canvas events
#[derive(Debug, Default)]
pub struct DragState {
    pressed: bool,
    /// Last pointer position seen during the drag
    last: Option<(i32, i32)>,
}

impl DragState {
    fn press(&mut self, position: (i32, i32)) {
        self.pressed = true;
        self.last = Some(position);
    }

    fn move_to(&mut self, position: Option<(i32, i32)>) -> Option<(i32, i32)> {
        if !self.pressed {
            return None;
        }
        let position = position?;
        self.last = Some(position);
        Some(position)
    }

    /// Ends the drag. Falls back to the last known position when the cursor
    /// is unavailable, so every press is paired with a release.
    fn release(&mut self, position: Option<(i32, i32)>) -> Option<(i32, i32)> {
        if !self.pressed {
            return None;
        }
        self.pressed = false;
        position.or(self.last.take())
    }
}

fn to_pixel(point: Point) -> (i32, i32) {
    (point.x.round() as i32, point.y.round() as i32)
}

fn outline(frame: &mut Frame, bbox: &BoundingBox) {
    let rect = Path::rectangle(
        Point::new(bbox.left() as f32, bbox.top() as f32),
        Size::new(bbox.width() as f32, bbox.height() as f32),
    );
    frame.stroke(&rect, Stroke::default().with_color(BOX_COLOR).with_width(1.0));
}

impl canvas::Program<Message> for BoxCanvas<'_> {
    type State = DragState;

    fn update(
        &self,
        state: &mut DragState,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let Event::Mouse(mouse_event) = event else {
            return None;
        };

        match mouse_event {
            mouse::Event::ButtonPressed(mouse::Button::Left) if self.enabled => {
                let (x, y) = to_pixel(cursor.position_in(bounds)?);
                state.press((x, y));
                Some(canvas::Action::publish(Message::Pointer(PointerEvent::Pressed(x, y))).and_capture())
            }
            mouse::Event::CursorMoved { .. } => {
                let position = cursor.position_from(bounds.position()).map(to_pixel);
                let (x, y) = state.move_to(position)?;
                Some(canvas::Action::publish(Message::Pointer(PointerEvent::Moved(x, y))))
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) => {
                let position = cursor.position_from(bounds.position()).map(to_pixel);
                let (x, y) = state.release(position)?;
                Some(canvas::Action::publish(Message::Pointer(PointerEvent::Released(x, y))).and_capture())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &DragState,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        for bbox in self.committed {
            outline(&mut frame, bbox);
        }
        if let Some(bbox) = &self.active {
            outline(&mut frame, bbox);
        }
        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &DragState,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_without_cursor_uses_last_position() {
        let mut drag = DragState::default();
        drag.press((4, 5));
        assert_eq!(drag.move_to(Some((20, 30))), Some((20, 30)));
        assert_eq!(drag.move_to(None), None);

        assert_eq!(drag.release(None), Some((20, 30)));
        assert!(!drag.pressed);
    }

    #[test]
    fn test_release_right_after_press_falls_back_to_anchor() {
        let mut drag = DragState::default();
        drag.press((7, 8));
        assert_eq!(drag.release(None), Some((7, 8)));
    }

    #[test]
    fn test_events_without_press_are_ignored() {
        let mut drag = DragState::default();
        assert_eq!(drag.move_to(Some((1, 1))), None);
        assert_eq!(drag.release(Some((1, 1))), None);

        drag.press((0, 0));
        assert_eq!(drag.release(Some((3, 3))), Some((3, 3)));
        assert_eq!(drag.release(Some((3, 3))), None);
    }
}
