use serde::{Deserialize, Serialize};

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// reset_view = "KeyR"
/// quit = "Escape"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Restore the initial orientation and camera distance.
    ResetView,
    /// Advance the cube color by one hue step.
    CycleColor,
    /// Show or hide the 2D triangle overlay.
    ToggleTriangle,
    /// Close the viewer.
    Quit,
}
