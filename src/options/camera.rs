use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection, placement, and zoom parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Initial distance of the camera from the origin (positive, the camera
    /// sits on the +z side looking down -z).
    #[schemars(title = "Distance", range(min = 1.0, max = 50.0), extend("step" = 0.5))]
    pub distance: f32,
    /// Per-notch zoom factor. A scroll step moves the camera by
    /// `distance * (1 - factor)` or `distance * (1 - 1 / factor)`.
    #[schemars(title = "Zoom Factor", range(min = 0.5, max = 0.99), extend("step" = 0.01))]
    pub zoom_factor: f32,
    /// Smallest allowed camera distance.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Largest allowed camera distance.
    #[schemars(skip)]
    pub max_distance: f32,
    /// Initial rotation of the object about the x axis, in degrees.
    #[schemars(skip)]
    pub initial_pitch: f32,
    /// Initial rotation of the object about the y axis, in degrees.
    #[schemars(skip)]
    pub initial_yaw: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 35.0,
            znear: 0.01,
            zfar: 100.0,
            distance: 10.0,
            zoom_factor: 0.85,
            min_distance: 0.1,
            max_distance: 100.0,
            initial_pitch: 30.0,
            initial_yaw: 40.0,
        }
    }
}
