use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Colors, lighting, and overlay toggles.
pub struct DisplayOptions {
    /// Framebuffer clear color (linear RGB).
    #[schemars(skip)]
    pub clear_color: [f32; 3],
    /// Starting hue of the cube's diffuse color, in degrees.
    #[schemars(title = "Hue", range(min = 0.0, max = 360.0), extend("step" = 1.0))]
    pub initial_hue: f32,
    /// Hue advance applied on every left-button release, in degrees.
    #[schemars(title = "Hue Step", range(min = 0.0, max = 180.0), extend("step" = 1.0))]
    pub hue_step: f32,
    /// Light position in camera space.
    #[schemars(skip)]
    pub light_position: [f32; 3],
    /// Phong shininess exponent of the cube.
    #[schemars(title = "Shininess", range(min = 1.0, max = 256.0), extend("step" = 1.0))]
    pub shininess: f32,
    /// Whether to draw the vertex-colored triangle overlay.
    #[schemars(title = "Show Triangle")]
    pub show_triangle: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            clear_color: [0.647, 0.788, 0.918],
            initial_hue: 35.0,
            hue_step: 50.0,
            light_position: [7.0, 5.0, 2.5],
            shininess: 80.0,
            show_triangle: true,
        }
    }
}
