//! Renderable scene description.
//!
//! A [`Scene`] is a flat list of [`Drawable`] variants. There is no
//! transform hierarchy: each lit object has its own placement transform,
//! optionally composed under the trackball orientation, and 2D overlays
//! are drawn directly in clip space.

/// RGB colors with HSV construction.
pub mod color;
/// CPU-side mesh data, interleaving and index compression.
pub mod mesh;
/// Built-in primitive meshes.
pub mod primitives;
/// CPU-side RGBA8 images.
pub mod texture;

use glam::{Mat4, Vec3};

pub use color::Color3;
pub use mesh::{
    compress_indices, ColoredVertex2D, CompressedIndices, IndexType,
    MeshData, PhongVertex, TexturedVertex,
};
pub use texture::TextureImage;

use crate::options::DisplayOptions;

/// Value used for the derived ambient color.
const AMBIENT_VALUE: f32 = 0.3;

/// World-space light of the textured demo object.
const TEXTURED_LIGHT: Vec3 = Vec3::new(-3.0, 10.0, 10.0);

/// Where a Phong light sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightPosition {
    /// Fixed relative to the camera.
    Camera(Vec3),
    /// Fixed in the world; follows the view transform.
    World(Vec3),
}

impl LightPosition {
    /// The light position in camera space under `view`.
    #[must_use]
    pub fn to_camera_space(self, view: Mat4) -> Vec3 {
        match self {
            Self::Camera(position) => position,
            Self::World(position) => view.transform_point3(position),
        }
    }
}

/// Phong lighting material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongMaterial {
    /// Ambient term color.
    pub ambient: Color3,
    /// Diffuse term color.
    pub diffuse: Color3,
    /// Specular highlight color.
    pub specular: Color3,
    /// Specular exponent.
    pub shininess: f32,
}

impl PhongMaterial {
    /// Saturated diffuse color at `hue` with a dim ambient of the same hue
    /// and a white specular highlight.
    #[must_use]
    pub fn from_hue(hue: f32, shininess: f32) -> Self {
        Self {
            ambient: Color3::from_hsv(hue, 1.0, AMBIENT_VALUE),
            diffuse: Color3::from_hsv(hue, 1.0, 1.0),
            specular: Color3::WHITE,
            shininess,
        }
    }

    /// Material for textured surfaces: a dim gray ambient and a white
    /// diffuse tint, so the texture shows unaltered.
    #[must_use]
    pub fn textured(shininess: f32) -> Self {
        Self {
            ambient: Color3::new(0.1, 0.1, 0.1),
            diffuse: Color3::WHITE,
            specular: Color3::WHITE,
            shininess,
        }
    }

    /// Advance the diffuse hue by `degrees`, re-deriving the ambient color.
    pub fn shift_hue(&mut self, degrees: f32) {
        let hue = self.diffuse.hue() + degrees;
        *self = Self {
            specular: self.specular,
            ..Self::from_hue(hue, self.shininess)
        };
    }
}

/// A lit mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct PhongObject {
    /// Geometry.
    pub mesh: MeshData,
    /// Surface material.
    pub material: PhongMaterial,
    /// Placement of the mesh.
    pub transform: Mat4,
    /// Whether the placement is composed under the trackball orientation.
    pub follows_trackball: bool,
    /// Light override; `None` uses the display light.
    pub light: Option<LightPosition>,
}

impl PhongObject {
    /// Model matrix given the current trackball orientation matrix.
    #[must_use]
    pub fn model_matrix(&self, trackball: Mat4) -> Mat4 {
        placement(self.follows_trackball, trackball, self.transform)
    }
}

/// A lit mesh whose diffuse color is sampled from a texture.
#[derive(Debug, Clone, PartialEq)]
pub struct TexturedObject {
    /// Geometry; must carry texture coordinates.
    pub mesh: MeshData,
    /// Ambient, specular and shininess. The diffuse color tints the
    /// texture.
    pub material: PhongMaterial,
    /// Diffuse texture.
    pub texture: TextureImage,
    /// Placement of the mesh.
    pub transform: Mat4,
    /// Whether the placement is composed under the trackball orientation.
    pub follows_trackball: bool,
    /// Light override; `None` uses the display light.
    pub light: Option<LightPosition>,
}

impl TexturedObject {
    /// Model matrix given the current trackball orientation matrix.
    #[must_use]
    pub fn model_matrix(&self, trackball: Mat4) -> Mat4 {
        placement(self.follows_trackball, trackball, self.transform)
    }
}

fn placement(
    follows_trackball: bool,
    trackball: Mat4,
    transform: Mat4,
) -> Mat4 {
    if follows_trackball {
        trackball * transform
    } else {
        transform
    }
}

/// An unlit, vertex-colored mesh drawn in clip space.
#[derive(Debug, Clone, PartialEq)]
pub struct ColoredMesh2D {
    /// Non-indexed triangle list.
    pub vertices: Vec<ColoredVertex2D>,
}

/// Everything the renderer knows how to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    /// Phong-shaded indexed mesh.
    Phong(PhongObject),
    /// Phong-shaded indexed mesh with a diffuse texture.
    Textured(TexturedObject),
    /// Vertex-colored 2D overlay.
    VertexColor2D(ColoredMesh2D),
}

impl Drawable {
    /// Short label for GPU resource names and logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Phong(_) => "Phong Mesh",
            Self::Textured(_) => "Textured Mesh",
            Self::VertexColor2D(_) => "Vertex Color 2D",
        }
    }
}

/// Ordered list of drawables. Draw order is list order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    drawables: Vec<Drawable>,
    /// Whether 2D overlays are drawn.
    pub show_overlays: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene with overlays enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            drawables: Vec::new(),
            show_overlays: true,
        }
    }

    /// The demo scene: a trackball-driven solid cube, the colored triangle
    /// overlay and a small checkered cube orbiting beside the first one.
    #[must_use]
    pub fn demo(display: &DisplayOptions) -> Self {
        let mut scene = Self::new();
        let _ = scene.push(Drawable::Phong(PhongObject {
            mesh: primitives::cube_solid(),
            material: PhongMaterial::from_hue(
                display.initial_hue,
                display.shininess,
            ),
            transform: Mat4::IDENTITY,
            follows_trackball: true,
            light: None,
        }));
        let _ = scene.push(Drawable::VertexColor2D(ColoredMesh2D {
            vertices: primitives::triangle_2d(),
        }));
        let _ = scene.push(Drawable::Textured(TexturedObject {
            mesh: primitives::cube_solid(),
            material: PhongMaterial::textured(display.shininess),
            texture: TextureImage::checkerboard(
                64,
                8,
                Color3::WHITE,
                Color3::from_hsv(210.0, 0.6, 0.8),
            ),
            transform: Mat4::from_translation(Vec3::new(2.5, 0.0, 0.0))
                * Mat4::from_scale(Vec3::splat(0.5)),
            follows_trackball: true,
            light: Some(LightPosition::World(TEXTURED_LIGHT)),
        }));
        scene.show_overlays = display.show_triangle;
        scene
    }

    /// Append a drawable and return its index.
    pub fn push(&mut self, drawable: Drawable) -> usize {
        self.drawables.push(drawable);
        self.drawables.len() - 1
    }

    /// All drawables in draw order.
    #[must_use]
    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    /// Number of drawables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    /// Whether the scene has no drawables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Whether the drawable at `index` should be drawn this frame.
    #[must_use]
    pub fn is_visible(&self, index: usize) -> bool {
        match self.drawables.get(index) {
            Some(Drawable::Phong(_) | Drawable::Textured(_)) => true,
            Some(Drawable::VertexColor2D(_)) => self.show_overlays,
            None => false,
        }
    }

    /// Advance the hue of every trackball-driven Phong object.
    pub fn cycle_colors(&mut self, degrees: f32) {
        for drawable in &mut self.drawables {
            if let Drawable::Phong(object) = drawable {
                if object.follows_trackball {
                    object.material.shift_hue(degrees);
                }
            }
        }
    }

    /// Material of the first trackball-driven Phong object, if any.
    #[must_use]
    pub fn primary_material(&self) -> Option<&PhongMaterial> {
        self.drawables.iter().find_map(|d| match d {
            Drawable::Phong(object) if object.follows_trackball => {
                Some(&object.material)
            }
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_scene_layout() {
        let scene = Scene::demo(&DisplayOptions::default());
        assert_eq!(scene.len(), 3);
        assert!(matches!(scene.drawables()[0], Drawable::Phong(_)));
        assert!(matches!(scene.drawables()[1], Drawable::VertexColor2D(_)));
        assert!(matches!(scene.drawables()[2], Drawable::Textured(_)));
        assert!(scene.is_visible(0));
        assert!(scene.is_visible(1));
        assert!(scene.is_visible(2));
        assert!(!scene.is_visible(3));
    }

    #[test]
    fn hidden_overlay() {
        let display = DisplayOptions {
            show_triangle: false,
            ..Default::default()
        };
        let scene = Scene::demo(&display);
        assert!(scene.is_visible(0));
        assert!(!scene.is_visible(1));
        assert!(scene.is_visible(2));
    }

    #[test]
    fn material_from_hue_derives_dim_ambient() {
        let material = PhongMaterial::from_hue(35.0, 80.0);
        assert!((material.diffuse.hue() - 35.0).abs() < 1e-3);
        assert!((material.ambient.hue() - 35.0).abs() < 1e-3);
        assert!((material.ambient.r - AMBIENT_VALUE).abs() < 1e-6);
        assert_eq!(material.specular, Color3::WHITE);
    }

    #[test]
    fn cycle_colors_advances_cube_hue() {
        let mut scene = Scene::demo(&DisplayOptions::default());
        scene.cycle_colors(50.0);
        let hue = scene.primary_material().unwrap().diffuse.hue();
        assert!((hue - 85.0).abs() < 1e-3);

        for _ in 0..6 {
            scene.cycle_colors(50.0);
        }
        // 35 + 7 * 50 = 385 → 25
        let hue = scene.primary_material().unwrap().diffuse.hue();
        assert!((hue - 25.0).abs() < 1e-2);
    }

    fn textured(scene: &Scene) -> &TexturedObject {
        scene
            .drawables()
            .iter()
            .find_map(|d| match d {
                Drawable::Textured(object) => Some(object),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn textured_demo_object_is_uploadable() {
        let scene = Scene::demo(&DisplayOptions::default());
        let object = textured(&scene);

        let vertices = object.mesh.interleave_textured();
        assert_eq!(vertices.len(), 24);
        assert!(vertices
            .iter()
            .all(|v| v.texcoord.iter().all(|c| (0.0..=1.0).contains(c))));
        let indices = object.mesh.compressed_indices();
        assert_eq!(indices.index_type, IndexType::U16);
        assert_eq!(indices.count, 36);

        let texture = &object.texture;
        assert_eq!((texture.width(), texture.height()), (64, 64));
        assert_eq!(
            texture.pixels().len(),
            (texture.width() * texture.height() * 4) as usize
        );
        assert_ne!(texture.texel(0, 0), texture.texel(8, 0));
    }

    #[test]
    fn textured_object_orbits_with_trackball() {
        let scene = Scene::demo(&DisplayOptions::default());
        let object = textured(&scene);
        let spin = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);

        let center =
            object.model_matrix(Mat4::IDENTITY).transform_point3(Vec3::ZERO);
        assert!((center - Vec3::new(2.5, 0.0, 0.0)).length() < 1e-5);
        let rotated = object.model_matrix(spin).transform_point3(Vec3::ZERO);
        assert!((rotated - Vec3::new(0.0, 0.0, -2.5)).length() < 1e-5);

        let still = TexturedObject {
            follows_trackball: false,
            ..object.clone()
        };
        assert_eq!(still.model_matrix(spin), still.transform);
    }

    #[test]
    fn world_light_follows_view() {
        let view = Mat4::from_translation(Vec3::Z * -10.0);
        let world = LightPosition::World(TEXTURED_LIGHT);
        assert_eq!(world.to_camera_space(view), Vec3::new(-3.0, 10.0, 0.0));
        let camera = LightPosition::Camera(Vec3::new(7.0, 5.0, 2.5));
        assert_eq!(camera.to_camera_space(view), Vec3::new(7.0, 5.0, 2.5));
    }

    #[test]
    fn cycling_leaves_textured_material_alone() {
        let mut scene = Scene::demo(&DisplayOptions::default());
        let before = textured(&scene).material;
        scene.cycle_colors(50.0);
        assert_eq!(textured(&scene).material, before);
    }

    #[test]
    fn empty_scene_has_no_primary_material() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.primary_material().is_none());
    }
}
