//! GPU-free viewer state: options, camera controller, scene and input.

use glam::UVec2;

use crate::camera::CameraController;
use crate::input::{InputEvent, InputProcessor, KeyAction};
use crate::options::Options;
use crate::scene::Scene;

/// Everything the viewer mutates in response to input.
///
/// Kept separate from the GPU side so event handling can be driven (and
/// tested) without a device.
pub struct ViewState {
    /// Active options.
    pub(crate) options: Options,
    /// Trackball camera controller.
    pub camera_controller: CameraController,
    /// Drawables rendered each frame.
    pub(crate) scene: Scene,
    /// Pointer state.
    pub(crate) input: InputProcessor,
    /// Set once a [`KeyAction::Quit`] has been executed.
    quit_requested: bool,
}

impl ViewState {
    /// Demo scene and a controller sized to `viewport`.
    #[must_use]
    pub fn new(options: Options, viewport: UVec2) -> Self {
        let camera_controller = CameraController::new(
            &options.camera,
            &options.trackball,
            viewport,
        );
        let scene = Scene::demo(&options.display);
        Self {
            options,
            camera_controller,
            scene,
            input: InputProcessor::new(),
            quit_requested: false,
        }
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Whether the user asked to close the viewer.
    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Process a platform-agnostic input event.
    ///
    /// Returns `true` if the view changed and a redraw is needed. Releasing
    /// the primary button also advances the cube color by one hue step.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let response =
            self.input.handle_event(event, &mut self.camera_controller);
        if response.primary_released {
            self.scene.cycle_colors(self.options.display.hue_step);
        }
        response.redraw
    }

    /// Resolve a physical key string through the key bindings and execute
    /// the bound action.
    ///
    /// Returns the executed action, if any.
    pub fn handle_key(&mut self, key: &str) -> Option<KeyAction> {
        let action = self.options.keybindings.lookup(key)?;
        log::debug!("key {key} -> {action:?}");
        action.execute(self);
        Some(action)
    }

    /// Replace options and apply them to the controller and scene.
    pub fn set_options(&mut self, options: Options) {
        self.options = options;
        self.apply_options();
    }

    /// Push current option values to the controller and scene.
    pub fn apply_options(&mut self) {
        self.camera_controller
            .apply_options(&self.options.camera, &self.options.trackball);
        self.scene.show_overlays = self.options.display.show_triangle;
    }

    /// Restore the initial view.
    pub fn reset_view(&mut self) {
        self.camera_controller.reset();
    }

    /// Advance the cube color by one hue step.
    pub fn cycle_color(&mut self) {
        self.scene.cycle_colors(self.options.display.hue_step);
    }

    /// Show or hide the 2D overlay.
    pub fn toggle_triangle(&mut self) {
        self.options.display.show_triangle =
            !self.options.display.show_triangle;
        self.scene.show_overlays = self.options.display.show_triangle;
    }

    /// Ask the host to close the viewer.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }
}

impl KeyAction {
    /// Execute this action on the given state.
    pub fn execute(self, state: &mut ViewState) {
        match self {
            Self::ResetView => state.reset_view(),
            Self::CycleColor => state.cycle_color(),
            Self::ToggleTriangle => state.toggle_triangle(),
            Self::Quit => state.request_quit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;

    fn state() -> ViewState {
        ViewState::new(Options::default(), UVec2::new(800, 600))
    }

    fn hue(state: &ViewState) -> f32 {
        state.scene().primary_material().unwrap().diffuse.hue()
    }

    fn button(pressed: bool) -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        }
    }

    #[test]
    fn click_cycles_cube_color() {
        let mut s = state();
        assert!((hue(&s) - 35.0).abs() < 1e-3);
        assert!(!s.handle_input(button(true)));
        assert!(s.handle_input(button(false)));
        assert!((hue(&s) - 85.0).abs() < 1e-3);
    }

    #[test]
    fn drag_then_reset_restores_view() {
        let mut s = state();
        let start = s.camera_controller.orientation();
        let _ = s.handle_input(InputEvent::CursorMoved { x: 400.0, y: 300.0 });
        let _ = s.handle_input(button(true));
        assert!(s.handle_input(InputEvent::CursorMoved { x: 470.0, y: 260.0 }));
        let _ = s.handle_input(InputEvent::Scroll { delta: -1.0 });
        assert_ne!(s.camera_controller.orientation(), start);

        assert_eq!(s.handle_key("KeyR"), Some(KeyAction::ResetView));
        assert_eq!(s.camera_controller.orientation(), start);
        assert_eq!(s.camera_controller.translation_z(), -10.0);
    }

    #[test]
    fn keys_toggle_overlay_and_quit() {
        let mut s = state();
        assert!(s.scene().is_visible(1));
        assert_eq!(s.handle_key("KeyT"), Some(KeyAction::ToggleTriangle));
        assert!(!s.scene().is_visible(1));
        assert!(!s.options().display.show_triangle);

        assert!(!s.quit_requested());
        assert_eq!(s.handle_key("Escape"), Some(KeyAction::Quit));
        assert!(s.quit_requested());

        assert_eq!(s.handle_key("KeyQ"), None);
    }

    #[test]
    fn cycle_color_key_uses_configured_step() {
        let mut options = Options::default();
        options.display.hue_step = 90.0;
        let mut s = ViewState::new(options, UVec2::new(100, 100));
        let _ = s.handle_key("KeyC");
        assert!((hue(&s) - 125.0).abs() < 1e-3);
    }

    #[test]
    fn set_options_applies_overlay_and_clamp() {
        let mut s = state();
        let mut options = Options::default();
        options.display.show_triangle = false;
        options.camera.max_distance = 5.0;
        s.set_options(options);
        assert!(!s.scene().is_visible(1));
        assert_eq!(s.camera_controller.translation_z(), -5.0);
    }
}
