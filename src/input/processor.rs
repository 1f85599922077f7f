//! Converts raw platform events into camera operations.
//!
//! The `InputProcessor` owns the transient pointer state (cursor position
//! and held buttons). It is the only thing that sits between raw window
//! events and the [`CameraController`].

use glam::Vec2;

use super::event::{InputEvent, MouseButton, MouseButtons};
use crate::camera::CameraController;

/// What the caller should do after an event was processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputResponse {
    /// The view changed and a new frame should be drawn.
    pub redraw: bool,
    /// The primary button was released this event.
    pub primary_released: bool,
}

impl InputResponse {
    const fn redraw() -> Self {
        Self {
            redraw: true,
            primary_released: false,
        }
    }
}

/// Routes pointer events to the camera controller.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// let response = input.handle_event(event, &mut controller);
/// if response.redraw {
///     window.request_redraw();
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct InputProcessor {
    /// Last known cursor position in physical pixels.
    cursor: Vec2,
    /// Buttons currently held.
    held: MouseButtons,
}

impl InputProcessor {
    /// Create a processor with no buttons held and the cursor at the
    /// origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Buttons currently held.
    #[must_use]
    pub fn held(&self) -> MouseButtons {
        self.held
    }

    /// Process a raw input event against `controller`.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        controller: &mut CameraController,
    ) -> InputResponse {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.cursor = Vec2::new(x, y);
                if self.held.is_empty() {
                    return InputResponse::default();
                }
                let rotated =
                    controller.on_pointer_drag(self.cursor, self.held);
                InputResponse {
                    redraw: rotated.is_some(),
                    primary_released: false,
                }
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_button(button, pressed, controller)
            }
            InputEvent::Scroll { delta } => {
                if delta == 0.0 {
                    return InputResponse::default();
                }
                let _ = controller.on_scroll(delta);
                InputResponse::redraw()
            }
            InputEvent::Resized { width, height } => {
                if width == 0 || height == 0 {
                    return InputResponse::default();
                }
                controller.resize(width, height);
                InputResponse::redraw()
            }
        }
    }

    fn handle_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
        controller: &mut CameraController,
    ) -> InputResponse {
        if pressed {
            self.held.insert(button.into());
            controller.on_pointer_down(self.cursor, button);
            return InputResponse::default();
        }

        self.held.remove(button.into());
        if button != MouseButton::Left {
            return InputResponse::default();
        }
        controller.on_pointer_up(button);
        InputResponse {
            redraw: true,
            primary_released: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::UVec2;

    use super::*;
    use crate::options::{CameraOptions, TrackballOptions};

    fn controller() -> CameraController {
        CameraController::new(
            &CameraOptions::default(),
            &TrackballOptions::default(),
            UVec2::new(800, 600),
        )
    }

    fn press(input: &mut InputProcessor, c: &mut CameraController) {
        let _ = input.handle_event(
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            },
            c,
        );
    }

    #[test]
    fn left_drag_rotates_and_requests_redraw() {
        let mut c = controller();
        let mut input = InputProcessor::new();
        let start = c.orientation();

        let _ = input.handle_event(
            InputEvent::CursorMoved { x: 400.0, y: 300.0 },
            &mut c,
        );
        press(&mut input, &mut c);
        assert!(input.held().contains(MouseButtons::LEFT));
        assert!(c.trackball().is_dragging());

        let response = input.handle_event(
            InputEvent::CursorMoved { x: 500.0, y: 300.0 },
            &mut c,
        );
        assert!(response.redraw);
        assert_ne!(c.orientation(), start);
    }

    #[test]
    fn hover_without_buttons_is_inert() {
        let mut c = controller();
        let mut input = InputProcessor::new();
        let start = c.orientation();
        let response = input.handle_event(
            InputEvent::CursorMoved { x: 10.0, y: 20.0 },
            &mut c,
        );
        assert_eq!(response, InputResponse::default());
        assert_eq!(input.cursor(), Vec2::new(10.0, 20.0));
        assert_eq!(c.orientation(), start);
    }

    #[test]
    fn right_drag_does_not_rotate() {
        let mut c = controller();
        let mut input = InputProcessor::new();
        let start = c.orientation();
        let _ = input.handle_event(
            InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed: true,
            },
            &mut c,
        );
        assert!(!c.trackball().is_dragging());
        let response = input.handle_event(
            InputEvent::CursorMoved { x: 600.0, y: 100.0 },
            &mut c,
        );
        assert!(!response.redraw);
        assert_eq!(c.orientation(), start);

        let response = input.handle_event(
            InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed: false,
            },
            &mut c,
        );
        assert!(!response.primary_released);
        assert!(input.held().is_empty());
    }

    #[test]
    fn left_release_ends_drag() {
        let mut c = controller();
        let mut input = InputProcessor::new();
        press(&mut input, &mut c);
        let response = input.handle_event(
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: false,
            },
            &mut c,
        );
        assert!(response.primary_released);
        assert!(response.redraw);
        assert!(!c.trackball().is_dragging());
        assert!(input.held().is_empty());
    }

    #[test]
    fn scroll_zooms() {
        let mut c = controller();
        let mut input = InputProcessor::new();
        let before = c.translation_z();
        let response =
            input.handle_event(InputEvent::Scroll { delta: 1.0 }, &mut c);
        assert!(response.redraw);
        assert!(c.translation_z().abs() < before.abs());

        let response =
            input.handle_event(InputEvent::Scroll { delta: 0.0 }, &mut c);
        assert!(!response.redraw);
    }

    #[test]
    fn resize_updates_viewport() {
        let mut c = controller();
        let mut input = InputProcessor::new();
        let response = input.handle_event(
            InputEvent::Resized {
                width: 1024,
                height: 512,
            },
            &mut c,
        );
        assert!(response.redraw);
        assert_eq!(c.viewport(), UVec2::new(1024, 512));

        let response = input.handle_event(
            InputEvent::Resized {
                width: 0,
                height: 512,
            },
            &mut c,
        );
        assert!(!response.redraw);
        assert_eq!(c.viewport(), UVec2::new(1024, 512));
    }
}
