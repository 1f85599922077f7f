//! Input handling: event types, held-button tracking, and the input
//! processor that turns raw window events into camera operations.

/// Platform-agnostic input events.
pub mod event;
/// Bindable keyboard actions.
pub mod keyboard;
/// Drives the camera controller from raw events.
pub mod processor;

pub use event::{InputEvent, MouseButton, MouseButtons};
pub use keyboard::KeyAction;
pub use processor::{InputProcessor, InputResponse};
