//! Virtual trackball: maps pointer drags to incremental 3D rotations.
//!
//! Pointer positions are projected onto a unit hemisphere (with a cone
//! falloff towards the disk edge) centered on the viewport. Each drag
//! step rotates by the angle between the previous and current projected
//! points, about their cross product.

use glam::{Quat, UVec2, Vec2, Vec3};

/// Below this length an anchor or rotation axis is considered degenerate.
pub const DEFAULT_DEGENERATE_EPSILON: f32 = 0.001;

/// Project a pointer position (viewport pixels, y down) onto the unit
/// trackball sphere.
///
/// The result is always unit length. Points outside the unit disk land on
/// the equator (`z = 0`); points inside get `z = 1 - L` where `L` is the
/// planar distance from the viewport center.
#[must_use]
pub fn project_to_sphere(position: Vec2, viewport: UVec2) -> Vec3 {
    let size = viewport.max(UVec2::ONE).as_vec2();
    let normalized = 2.0 * position / size - Vec2::ONE;
    let length = normalized.length();

    let z = if length > 1.0 { 0.0 } else { 1.0 - length };
    Vec3::new(normalized.x, -normalized.y, z).normalize()
}

/// A single incremental rotation produced by a drag step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackballRotation {
    /// Rotation angle in radians, in `[0, π]`.
    pub angle: f32,
    /// Unit rotation axis in world space.
    pub axis: Vec3,
}

impl TrackballRotation {
    /// The rotation as a quaternion.
    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_axis_angle(self.axis, self.angle)
    }
}

/// Drag state of the virtual trackball.
///
/// The anchor is the last sphere-projected pointer position, or
/// [`Vec3::ZERO`] when no drag is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trackball {
    anchor: Vec3,
    epsilon: f32,
}

impl Default for Trackball {
    fn default() -> Self {
        Self::new(DEFAULT_DEGENERATE_EPSILON)
    }
}

impl Trackball {
    /// Create an idle trackball with the given degeneracy threshold.
    #[must_use]
    pub fn new(epsilon: f32) -> Self {
        Self {
            anchor: Vec3::ZERO,
            epsilon,
        }
    }

    /// Change the degeneracy threshold without touching the drag state.
    pub fn set_epsilon(&mut self, epsilon: f32) {
        self.epsilon = epsilon;
    }

    /// Current anchor (zero when idle).
    #[must_use]
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        let length = self.anchor.length();
        length > 0.0 && length >= self.epsilon
    }

    /// Start a drag at `position`.
    pub fn press(&mut self, position: Vec2, viewport: UVec2) {
        self.anchor = project_to_sphere(position, viewport);
    }

    /// End the current drag.
    pub fn release(&mut self) {
        self.anchor = Vec3::ZERO;
    }

    /// Advance the drag to `position`, returning the rotation between the
    /// previous anchor and the new point.
    ///
    /// Returns `None` (and leaves the anchor untouched) when no drag is
    /// active or the two points are nearly collinear.
    pub fn drag(
        &mut self,
        position: Vec2,
        viewport: UVec2,
    ) -> Option<TrackballRotation> {
        let current = project_to_sphere(position, viewport);
        let axis = self.anchor.cross(current);

        if !self.is_dragging() || axis.length() < self.epsilon {
            return None;
        }
        // Parallel points give a zero axis even with a zero epsilon.
        let axis = axis.try_normalize()?;

        let angle = self.anchor.dot(current).clamp(-1.0, 1.0).acos();
        self.anchor = current;

        Some(TrackballRotation { angle, axis })
    }
}
