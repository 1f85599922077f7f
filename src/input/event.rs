use bitflags::bitflags;

/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// drives the [`CameraController`](crate::camera::CameraController).
///
/// # Example
///
/// ```ignore
/// let response = input_processor.handle_event(
///     InputEvent::CursorMoved { x: 100.0, y: 200.0 },
///     &mut controller,
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute viewport position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels (grows downward).
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel (positive = away from the user).
    Scroll {
        /// Vertical scroll amount in lines.
        delta: f32,
    },
    /// Viewport resized.
    Resized {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

bitflags! {
    /// Set of currently held mouse buttons.
    #[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Hash)]
    pub struct MouseButtons: u8 {
        /// Primary (left) button.
        const LEFT   = 0b0000_0001;
        /// Secondary (right) button.
        const RIGHT  = 0b0000_0010;
        /// Middle button.
        const MIDDLE = 0b0000_0100;
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::LEFT,
            MouseButton::Right => Self::RIGHT,
            MouseButton::Middle => Self::MIDDLE,
        }
    }
}

impl MouseButton {
    /// Map a winit button. Back, forward and other extra buttons have no
    /// counterpart and yield `None`.
    #[cfg(feature = "viewer")]
    #[must_use]
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(Self::Left),
            winit::event::MouseButton::Right => Some(Self::Right),
            winit::event::MouseButton::Middle => Some(Self::Middle),
            winit::event::MouseButton::Back
            | winit::event::MouseButton::Forward
            | winit::event::MouseButton::Other(_) => None,
        }
    }
}

#[cfg(all(test, feature = "viewer"))]
mod tests {
    use winit::event::MouseButton as WinitButton;

    use super::*;

    #[test]
    fn primary_buttons_map_one_to_one() {
        assert_eq!(
            MouseButton::from_winit(WinitButton::Left),
            Some(MouseButton::Left)
        );
        assert_eq!(
            MouseButton::from_winit(WinitButton::Right),
            Some(MouseButton::Right)
        );
        assert_eq!(
            MouseButton::from_winit(WinitButton::Middle),
            Some(MouseButton::Middle)
        );
    }

    #[test]
    fn side_buttons_are_unmapped() {
        for button in [
            WinitButton::Back,
            WinitButton::Forward,
            WinitButton::Other(7),
        ] {
            assert_eq!(MouseButton::from_winit(button), None, "{button:?}");
        }
    }
}
