use glam::{Mat4, Quat, UVec2, Vec2, Vec3};

use crate::camera::core::{Camera, CameraUniform};
use crate::camera::trackball::{Trackball, TrackballRotation};
use crate::input::{MouseButton, MouseButtons};
use crate::options::{CameraOptions, TrackballOptions};

/// Translation applied along the camera's forward axis for one scroll step.
///
/// A positive `scroll_delta` uses the reciprocal factor, moving the camera
/// toward the origin; a negative one moves it away. Zero yields zero.
#[must_use]
pub fn zoom_translation(distance: f32, scroll_delta: f32, factor: f32) -> f32 {
    if scroll_delta == 0.0 {
        return 0.0;
    }
    let scale = if scroll_delta > 0.0 { 1.0 / factor } else { factor };
    distance * (1.0 - scale)
}

/// Trackball-driven object orientation plus a dolly camera.
///
/// The controller owns the orientation of the manipulated object and the
/// signed camera translation along z (negative = camera backed away from
/// the origin). Drags rotate the object in world space; scrolling moves
/// the camera.
pub struct CameraController {
    orientation: Quat,
    initial_orientation: Quat,
    translation_z: f32,
    initial_translation_z: f32,
    trackball: Trackball,
    viewport: UVec2,

    /// Projection parameters.
    pub camera: Camera,
    zoom_factor: f32,
    min_distance: f32,
    max_distance: f32,
}

impl CameraController {
    /// Create a controller for a viewport of the given size.
    #[must_use]
    pub fn new(
        camera_options: &CameraOptions,
        trackball_options: &TrackballOptions,
        viewport: UVec2,
    ) -> Self {
        let initial_orientation = Quat::from_rotation_x(
            camera_options.initial_pitch.to_radians(),
        ) * Quat::from_rotation_y(
            camera_options.initial_yaw.to_radians(),
        );
        let initial_translation_z = -camera_options.distance.abs();
        let viewport = viewport.max(UVec2::ONE);

        Self {
            orientation: initial_orientation,
            initial_orientation,
            translation_z: initial_translation_z,
            initial_translation_z,
            trackball: Trackball::new(trackball_options.degenerate_epsilon),
            viewport,
            camera: Camera::from_options(camera_options, aspect(viewport)),
            zoom_factor: camera_options.zoom_factor,
            min_distance: camera_options.min_distance,
            max_distance: camera_options.max_distance,
        }
    }

    /// Re-read tunables from options without resetting the current view.
    pub fn apply_options(
        &mut self,
        camera_options: &CameraOptions,
        trackball_options: &TrackballOptions,
    ) {
        self.camera = Camera::from_options(camera_options, self.camera.aspect);
        self.zoom_factor = camera_options.zoom_factor;
        self.min_distance = camera_options.min_distance;
        self.max_distance = camera_options.max_distance;
        self.trackball
            .set_epsilon(trackball_options.degenerate_epsilon);
        self.translation_z = self.clamp_translation(self.translation_z);
    }

    /// Orientation of the manipulated object.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Signed camera translation along z.
    #[must_use]
    pub fn translation_z(&self) -> f32 {
        self.translation_z
    }

    /// Current viewport size in pixels.
    #[must_use]
    pub fn viewport(&self) -> UVec2 {
        self.viewport
    }

    /// Read-only access to the trackball drag state.
    #[must_use]
    pub fn trackball(&self) -> &Trackball {
        &self.trackball
    }

    /// Begin a trackball drag. Only the primary button starts a drag.
    pub fn on_pointer_down(&mut self, position: Vec2, button: MouseButton) {
        if button != MouseButton::Left {
            return;
        }
        self.trackball.press(position, self.viewport);
    }

    /// End the current trackball drag.
    pub fn on_pointer_up(&mut self, _button: MouseButton) {
        self.trackball.release();
    }

    /// Continue a drag to `position`.
    ///
    /// Returns the rotation applied to the orientation, or `None` when the
    /// primary button is not held, no drag is active, or the movement is
    /// too small to define an axis. A returned rotation means the view
    /// needs a redraw.
    pub fn on_pointer_drag(
        &mut self,
        position: Vec2,
        held: MouseButtons,
    ) -> Option<TrackballRotation> {
        if !held.contains(MouseButtons::LEFT) {
            return None;
        }

        let rotation = self.trackball.drag(position, self.viewport)?;
        // World-space rotation; renormalized so drift cannot accumulate
        // over long drags.
        self.orientation =
            (rotation.to_quat() * self.orientation).normalize();
        Some(rotation)
    }

    /// Zoom by one scroll step, returning the new camera translation.
    pub fn on_scroll(&mut self, scroll_delta: f32) -> f32 {
        if scroll_delta == 0.0 {
            return self.translation_z;
        }
        let step =
            zoom_translation(self.translation_z, scroll_delta, self.zoom_factor);
        self.translation_z = self.clamp_translation(self.translation_z + step);
        self.translation_z
    }

    /// Update the viewport size. Zero-sized dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = UVec2::new(width, height);
        self.camera.aspect = aspect(self.viewport);
    }

    /// Restore the initial orientation and distance and cancel any drag.
    pub fn reset(&mut self) {
        self.orientation = self.initial_orientation;
        self.translation_z = self.initial_translation_z;
        self.trackball.release();
    }

    /// Model matrix of the manipulated object.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation)
    }

    /// World-to-camera matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::Z * self.translation_z)
    }

    /// Projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.camera.build_projection()
    }

    /// Camera uniform for the current state.
    #[must_use]
    pub fn uniform(&self) -> CameraUniform {
        let mut uniform = CameraUniform::new();
        uniform.update(&self.camera, self.view_matrix());
        uniform
    }

    fn clamp_translation(&self, translation: f32) -> f32 {
        let sign = if translation > 0.0 { 1.0 } else { -1.0 };
        // max/min rather than clamp: an inverted range must not panic.
        sign * translation
            .abs()
            .max(self.min_distance)
            .min(self.max_distance)
    }
}

fn aspect(viewport: UVec2) -> f32 {
    viewport.x as f32 / viewport.y.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn controller() -> CameraController {
        CameraController::new(
            &CameraOptions::default(),
            &TrackballOptions::default(),
            UVec2::new(800, 600),
        )
    }

    fn quat_near(a: Quat, b: Quat) -> bool {
        // q and -q encode the same rotation.
        a.dot(b).abs() > 1.0 - EPS
    }

    #[test]
    fn initial_state_matches_options() {
        let c = controller();
        assert_eq!(c.translation_z(), -10.0);
        let expected = Quat::from_rotation_x(30f32.to_radians())
            * Quat::from_rotation_y(40f32.to_radians());
        assert!(quat_near(c.orientation(), expected));
        assert!((c.camera.aspect - 800.0 / 600.0).abs() < EPS);
    }

    #[test]
    fn drag_without_press_does_nothing() {
        let mut c = controller();
        let before = c.orientation();
        assert!(c
            .on_pointer_drag(Vec2::new(500.0, 300.0), MouseButtons::LEFT)
            .is_none());
        assert_eq!(c.orientation(), before);
    }

    #[test]
    fn drag_requires_primary_button_held() {
        let mut c = controller();
        c.on_pointer_down(Vec2::new(400.0, 300.0), MouseButton::Left);
        assert!(c
            .on_pointer_drag(Vec2::new(500.0, 300.0), MouseButtons::RIGHT)
            .is_none());
        assert!(c
            .on_pointer_drag(Vec2::new(500.0, 300.0), MouseButtons::empty())
            .is_none());
    }

    #[test]
    fn non_primary_press_does_not_anchor() {
        let mut c = controller();
        c.on_pointer_down(Vec2::new(400.0, 300.0), MouseButton::Right);
        assert!(!c.trackball().is_dragging());
    }

    #[test]
    fn drag_composes_rotation_in_world_space() {
        let mut c = controller();
        let before = c.orientation();
        c.on_pointer_down(Vec2::new(400.0, 300.0), MouseButton::Left);
        let rotation = c
            .on_pointer_drag(Vec2::new(500.0, 300.0), MouseButtons::LEFT)
            .unwrap();

        assert!((rotation.axis - Vec3::Y).length() < EPS);
        assert!(rotation.angle > 0.0 && rotation.angle < 0.5);
        let expected = Quat::from_axis_angle(Vec3::Y, rotation.angle) * before;
        assert!(quat_near(c.orientation(), expected));
        assert!((c.orientation().length() - 1.0).abs() < EPS);
    }

    #[test]
    fn repeated_position_does_not_rotate() {
        let mut c = controller();
        c.on_pointer_down(Vec2::new(400.0, 300.0), MouseButton::Left);
        let _ = c
            .on_pointer_drag(Vec2::new(450.0, 320.0), MouseButtons::LEFT)
            .unwrap();
        let before = c.orientation();
        assert!(c
            .on_pointer_drag(Vec2::new(450.0, 320.0), MouseButtons::LEFT)
            .is_none());
        assert_eq!(c.orientation(), before);
    }

    #[test]
    fn release_stops_rotation() {
        let mut c = controller();
        c.on_pointer_down(Vec2::new(400.0, 300.0), MouseButton::Left);
        c.on_pointer_up(MouseButton::Left);
        assert!(c
            .on_pointer_drag(Vec2::new(600.0, 100.0), MouseButtons::LEFT)
            .is_none());
    }

    #[test]
    fn long_drag_stays_normalized() {
        let mut c = controller();
        c.on_pointer_down(Vec2::new(400.0, 300.0), MouseButton::Left);
        for i in 0..2000 {
            let t = i as f32 * 0.05;
            let p = Vec2::new(400.0 + 150.0 * t.cos(), 300.0 + 150.0 * t.sin());
            let _ = c.on_pointer_drag(p, MouseButtons::LEFT);
        }
        assert!((c.orientation().length() - 1.0).abs() < EPS);
    }

    #[test]
    fn zoom_translation_matches_reference_formula() {
        let zoom_in = zoom_translation(-10.0, 1.0, 0.85);
        assert!((zoom_in - (-10.0 * (1.0 - 1.0 / 0.85))).abs() < EPS);
        let zoom_out = zoom_translation(-10.0, -1.0, 0.85);
        assert!((zoom_out - (-10.0 * (1.0 - 0.85))).abs() < EPS);
        assert_eq!(zoom_translation(-10.0, 0.0, 0.85), 0.0);
    }

    #[test]
    fn scroll_up_moves_camera_closer() {
        let mut c = controller();
        let z = c.on_scroll(1.0);
        assert!((z - (-10.0 + 10.0 * (1.0 / 0.85 - 1.0))).abs() < 1e-4);
        assert!(z.abs() < 10.0);

        let mut c = controller();
        let z = c.on_scroll(-1.0);
        assert!((z - -11.5).abs() < 1e-4);
    }

    #[test]
    fn zero_scroll_is_noop() {
        let mut c = controller();
        assert_eq!(c.on_scroll(0.0), -10.0);
    }

    #[test]
    fn scroll_is_clamped() {
        let mut c = controller();
        for _ in 0..200 {
            let _ = c.on_scroll(1.0);
        }
        assert!((c.translation_z() - -0.1).abs() < EPS);
        for _ in 0..200 {
            let _ = c.on_scroll(-1.0);
        }
        assert!((c.translation_z() - -100.0).abs() < EPS);
    }

    #[test]
    fn resize_ignores_zero_and_updates_aspect() {
        let mut c = controller();
        c.resize(0, 100);
        assert_eq!(c.viewport(), UVec2::new(800, 600));
        c.resize(1000, 500);
        assert_eq!(c.viewport(), UVec2::new(1000, 500));
        assert_eq!(c.camera.aspect, 2.0);
    }

    #[test]
    fn reset_restores_initial_view() {
        let mut c = controller();
        let initial = c.orientation();
        c.on_pointer_down(Vec2::new(400.0, 300.0), MouseButton::Left);
        let _ = c.on_pointer_drag(Vec2::new(700.0, 100.0), MouseButtons::LEFT);
        let _ = c.on_scroll(1.0);
        c.reset();
        assert_eq!(c.orientation(), initial);
        assert_eq!(c.translation_z(), -10.0);
        assert!(!c.trackball().is_dragging());
    }

    #[test]
    fn view_matrix_places_camera_behind_origin() {
        let c = controller();
        let origin_in_view = c.view_matrix().transform_point3(Vec3::ZERO);
        assert!((origin_in_view - Vec3::new(0.0, 0.0, -10.0)).length() < EPS);
        assert!((Vec3::from(c.uniform().position) - Vec3::Z * 10.0).length() < 1e-4);
    }

    #[test]
    fn inverted_distance_range_does_not_panic() {
        let options = CameraOptions {
            min_distance: 20.0,
            max_distance: 5.0,
            ..Default::default()
        };
        let mut c = CameraController::new(
            &options,
            &TrackballOptions::default(),
            UVec2::new(800, 600),
        );
        let z = c.on_scroll(1.0);
        assert!(z.is_finite());
        assert!(z.abs() <= 20.0);
        c.apply_options(&options, &TrackballOptions::default());
        assert!(c.translation_z().is_finite());
    }

    #[test]
    fn zero_epsilon_drag_without_press_keeps_orientation() {
        let trackball = TrackballOptions {
            degenerate_epsilon: 0.0,
        };
        let mut c = CameraController::new(
            &CameraOptions::default(),
            &trackball,
            UVec2::new(800, 600),
        );
        let before = c.orientation();
        assert!(c
            .on_pointer_drag(Vec2::new(500.0, 300.0), MouseButtons::LEFT)
            .is_none());
        assert_eq!(c.orientation(), before);
        assert!(c.orientation().is_finite());
    }

    #[test]
    fn apply_options_clamps_existing_distance() {
        let mut c = controller();
        let options = CameraOptions {
            max_distance: 5.0,
            ..Default::default()
        };
        c.apply_options(&options, &TrackballOptions::default());
        assert_eq!(c.translation_z(), -5.0);
    }
}
