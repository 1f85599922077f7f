use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Camera with projection parameters from `options` and the given
    /// aspect ratio.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Build the projection matrix.
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the camera matrices.
pub struct CameraUniform {
    /// Projection matrix.
    pub projection: [[f32; 4]; 4],
    /// World-to-camera matrix.
    pub view: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity matrices.
    pub fn new() -> Self {
        Self {
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
        }
    }

    /// Update uniform fields from the camera and its view matrix.
    pub fn update(&mut self, camera: &Camera, view: Mat4) {
        self.projection = camera.build_projection().to_cols_array_2d();
        self.view = view.to_cols_array_2d();
        self.position = view.inverse().transform_point3(Vec3::ZERO).to_array();
        self.aspect = camera.aspect;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_gpu_aligned() {
        assert_eq!(size_of::<CameraUniform>() % 16, 0);
    }

    #[test]
    fn uniform_tracks_camera_position() {
        let camera = Camera::from_options(&CameraOptions::default(), 1.5);
        let mut uniform = CameraUniform::new();
        uniform.update(&camera, Mat4::from_translation(Vec3::Z * -10.0));
        assert_eq!(uniform.aspect, 1.5);
        assert!((Vec3::from(uniform.position) - Vec3::Z * 10.0).length() < 1e-5);
    }

    #[test]
    fn projection_maps_near_and_far_to_unit_depth() {
        let camera = Camera::from_options(&CameraOptions::default(), 4.0 / 3.0);
        let proj = camera.build_projection();
        let near = proj.project_point3(Vec3::new(0.0, 0.0, -camera.znear));
        let far = proj.project_point3(Vec3::new(0.0, 0.0, -camera.zfar));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }
}
