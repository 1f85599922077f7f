//! Scene rendering.
//!
//! [`Renderer`] owns one pipeline per [`Drawable`] kind, the GPU copies of
//! the scene's drawables, the camera uniform and the depth attachment.
//! Every GPU object is created from a [`RenderContext`] passed in by the
//! caller; there is no global resource registry.

mod mesh_buffers;
mod phong;
pub(crate) mod pipeline_util;
mod textured;
mod uniform;
mod vertex_color;

use glam::{Mat4, Vec3};

pub use self::phong::PhongUniform;
use self::phong::{GpuPhongMesh, PhongPipeline};
use self::textured::{GpuTexturedMesh, TexturedPipeline};
use self::uniform::UniformBuffer;
use self::vertex_color::{GpuColoredMesh, VertexColorPipeline};
use crate::camera::core::CameraUniform;
use crate::camera::CameraController;
use crate::error::TrackviewError;
use crate::gpu::{DepthTarget, RenderContext, ShaderComposer};
use crate::options::DisplayOptions;
use crate::scene::{Drawable, LightPosition, Scene};

/// GPU counterpart of a [`Drawable`], index-aligned with the scene.
enum GpuDrawable {
    Phong(GpuPhongMesh),
    Textured(GpuTexturedMesh),
    VertexColor2D(GpuColoredMesh),
}

/// Draws a [`Scene`] into a color target.
pub struct Renderer {
    camera: UniformBuffer<CameraUniform>,
    phong: PhongPipeline,
    textured: TexturedPipeline,
    vertex_color: VertexColorPipeline,
    drawables: Vec<GpuDrawable>,
    depth: DepthTarget,
    clear_color: wgpu::Color,
    light_position: Vec3,
}

impl Renderer {
    /// Build every pipeline and upload `scene`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackviewError::Shader`] if a pipeline shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        scene: &Scene,
        display: &DisplayOptions,
    ) -> Result<Self, TrackviewError> {
        let camera_layout = pipeline_util::uniform_layout(
            &context.device,
            "Camera Bind Group Layout",
        );
        let camera = UniformBuffer::new(
            &context.device,
            "Camera Uniform",
            &camera_layout,
            &CameraUniform::new(),
        );
        let phong =
            PhongPipeline::new(context, shader_composer, &camera_layout)?;
        let textured =
            TexturedPipeline::new(context, shader_composer, &camera_layout)?;
        let vertex_color = VertexColorPipeline::new(context, shader_composer)?;
        let (width, height) = context.size();

        let mut renderer = Self {
            camera,
            phong,
            textured,
            vertex_color,
            drawables: Vec::new(),
            depth: DepthTarget::new(&context.device, width, height),
            clear_color: wgpu::Color::BLACK,
            light_position: Vec3::ZERO,
        };
        renderer.apply_display(display, context.format());
        renderer.upload_scene(context, scene);
        Ok(renderer)
    }

    /// Replace all GPU drawables with fresh uploads of `scene`.
    pub fn upload_scene(&mut self, context: &RenderContext, scene: &Scene) {
        self.drawables = scene
            .drawables()
            .iter()
            .map(|drawable| {
                log::trace!("uploading {}", drawable.label());
                match drawable {
                    Drawable::Phong(object) => GpuDrawable::Phong(
                        GpuPhongMesh::upload(context, &self.phong, object),
                    ),
                    Drawable::Textured(object) => {
                        GpuDrawable::Textured(GpuTexturedMesh::upload(
                            context,
                            &self.textured,
                            object,
                        ))
                    }
                    Drawable::VertexColor2D(mesh) => {
                        GpuDrawable::VertexColor2D(GpuColoredMesh::upload(
                            context, mesh,
                        ))
                    }
                }
            })
            .collect();
        log::debug!("uploaded {} drawables", self.drawables.len());
    }

    /// Pick up clear color and light position from display options.
    pub fn apply_display(
        &mut self,
        display: &DisplayOptions,
        format: wgpu::TextureFormat,
    ) {
        let [r, g, b] = display.clear_color;
        let encode = |c: f32| {
            if format.is_srgb() {
                srgb_to_linear(c)
            } else {
                c
            }
        };
        self.clear_color = wgpu::Color {
            r: f64::from(encode(r)),
            g: f64::from(encode(g)),
            b: f64::from(encode(b)),
            a: 1.0,
        };
        self.light_position = Vec3::from(display.light_position);
    }

    /// Recreate the depth attachment to match the context size.
    pub fn resize(&mut self, context: &RenderContext) {
        let (width, height) = context.size();
        if self.depth.size() != (width, height) {
            self.depth = DepthTarget::new(&context.device, width, height);
        }
    }

    /// Write the camera and per-object uniforms for this frame.
    pub fn prepare(
        &self,
        queue: &wgpu::Queue,
        controller: &CameraController,
        scene: &Scene,
    ) {
        self.camera.write(queue, &controller.uniform());

        let trackball = controller.model_matrix();
        let view = controller.view_matrix();
        for (drawable, gpu) in scene.drawables().iter().zip(&self.drawables) {
            match (drawable, gpu) {
                (Drawable::Phong(object), GpuDrawable::Phong(mesh)) => {
                    mesh.update(
                        queue,
                        &PhongUniform::new(
                            &object.material,
                            object.model_matrix(trackball),
                            view,
                            self.light_for(object.light, view),
                        ),
                    );
                }
                (Drawable::Textured(object), GpuDrawable::Textured(mesh)) => {
                    mesh.update(
                        queue,
                        &PhongUniform::new(
                            &object.material,
                            object.model_matrix(trackball),
                            view,
                            self.light_for(object.light, view),
                        ),
                    );
                }
                _ => {}
            }
        }
    }

    /// Camera-space light for an object, falling back to the display
    /// light.
    fn light_for(&self, light: Option<LightPosition>, view: Mat4) -> Vec3 {
        camera_space_light(light, self.light_position, view)
    }

    /// Record the scene pass into `encoder`, targeting `view`.
    ///
    /// Lit meshes (plain, then textured) are drawn first with depth
    /// testing and back-face culling, then visible overlays on top.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        scene: &Scene,
    ) {
        let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene render pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });

        rp.set_pipeline(self.phong.pipeline());
        rp.set_bind_group(0, self.camera.bind_group(), &[]);
        for (index, gpu) in self.drawables.iter().enumerate() {
            if let GpuDrawable::Phong(mesh) = gpu {
                if scene.is_visible(index) {
                    mesh.draw(&mut rp);
                }
            }
        }

        rp.set_pipeline(self.textured.pipeline());
        rp.set_bind_group(0, self.camera.bind_group(), &[]);
        for (index, gpu) in self.drawables.iter().enumerate() {
            if let GpuDrawable::Textured(mesh) = gpu {
                if scene.is_visible(index) {
                    mesh.draw(&mut rp);
                }
            }
        }

        rp.set_pipeline(self.vertex_color.pipeline());
        for (index, gpu) in self.drawables.iter().enumerate() {
            if let GpuDrawable::VertexColor2D(mesh) = gpu {
                if scene.is_visible(index) {
                    mesh.draw(&mut rp);
                }
            }
        }
    }

    /// Number of uploaded drawables.
    #[must_use]
    pub fn drawable_count(&self) -> usize {
        self.drawables.len()
    }
}

/// `light` in camera space, or `fallback` (already camera space) when the
/// object has no light of its own.
fn camera_space_light(
    light: Option<LightPosition>,
    fallback: Vec3,
    view: Mat4,
) -> Vec3 {
    light.map_or(fallback, |light| light.to_camera_space(view))
}

/// sRGB transfer function inverse, for clear colors on sRGB targets.
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objects_without_a_light_use_the_display_light() {
        let view = Mat4::from_translation(Vec3::Z * -10.0);
        let fallback = Vec3::new(7.0, 5.0, 2.5);
        assert_eq!(camera_space_light(None, fallback, view), fallback);
        assert_eq!(
            camera_space_light(
                Some(LightPosition::World(Vec3::new(-3.0, 10.0, 10.0))),
                fallback,
                view,
            ),
            Vec3::new(-3.0, 10.0, 0.0)
        );
    }

    #[test]
    fn srgb_conversion_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!((srgb_to_linear(0.5) - 0.214).abs() < 1e-3);
        // Continuous at the linear/power split.
        let below = srgb_to_linear(0.04045);
        let above = srgb_to_linear(0.040_451);
        assert!((above - below).abs() < 1e-5);
    }
}
