//! Phong-lit indexed meshes with a sampled diffuse texture.

use glam::{Mat4, Vec3};

use super::mesh_buffers::MeshBuffers;
use super::phong::PhongUniform;
use super::pipeline_util::{self, PipelineDesc};
use super::uniform::UniformBuffer;
use crate::error::TrackviewError;
use crate::gpu::{RenderContext, SampledTexture, Shader, ShaderComposer};
use crate::scene::{TexturedObject, TexturedVertex};

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32x2,
];

/// Vertex layout matching [`TexturedVertex`].
fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<TexturedVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

/// Pipeline, per-object layout and shared sampler for textured meshes.
pub(crate) struct TexturedPipeline {
    pipeline: wgpu::RenderPipeline,
    object_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl TexturedPipeline {
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, TrackviewError> {
        let object_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Textured Object Layout"),
                entries: &[
                    pipeline_util::uniform_entry(0),
                    pipeline_util::texture_2d_entry(1),
                    pipeline_util::filtering_sampler_entry(2),
                ],
            },
        );
        let pipeline = pipeline_util::create_pipeline(
            context,
            shader_composer,
            PipelineDesc {
                label: "Textured Phong",
                shader: Shader::TexturedPhong,
                bind_group_layouts: &[camera_layout, &object_layout],
                vertex_layout: vertex_layout(),
                cull_mode: Some(wgpu::Face::Back),
                depth_stencil: pipeline_util::depth_stencil_state(),
            },
        )?;
        let sampler =
            pipeline_util::repeat_sampler(&context.device, "Textured Sampler");
        Ok(Self {
            pipeline,
            object_layout,
            sampler,
        })
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

/// A textured object uploaded to the GPU.
pub(crate) struct GpuTexturedMesh {
    buffers: MeshBuffers,
    uniform: UniformBuffer<PhongUniform>,
    // Bound through `uniform`'s bind group.
    _texture: SampledTexture,
}

impl GpuTexturedMesh {
    pub fn upload(
        context: &RenderContext,
        pipeline: &TexturedPipeline,
        object: &TexturedObject,
    ) -> Self {
        let device = &context.device;
        let vertices = object.mesh.interleave_textured();
        let indices = object.mesh.compressed_indices();
        let buffers = MeshBuffers::new(
            device,
            "Textured",
            bytemuck::cast_slice(&vertices),
            &indices,
        );

        let image = &object.texture;
        let texture = SampledTexture::from_rgba8(
            device,
            &context.queue,
            "Textured Diffuse Texture",
            image.width(),
            image.height(),
            image.pixels(),
        );
        log::debug!(
            "uploaded textured mesh: {} vertices, {} indices, {}x{} texture",
            vertices.len(),
            indices.count,
            image.width(),
            image.height()
        );

        let uniform = UniformBuffer::with_resources(
            device,
            "Textured Object Uniform",
            &pipeline.object_layout,
            &PhongUniform::new(
                &object.material,
                object.transform,
                Mat4::IDENTITY,
                Vec3::ZERO,
            ),
            &[
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&pipeline.sampler),
                },
            ],
        );

        Self {
            buffers,
            uniform,
            _texture: texture,
        }
    }

    /// Refresh the object uniform for this frame.
    pub fn update(&self, queue: &wgpu::Queue, uniform: &PhongUniform) {
        self.uniform.write(queue, uniform);
    }

    /// Record the draw. The camera bind group must already be set.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(1, self.uniform.bind_group(), &[]);
        self.buffers.draw(render_pass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_vertex_size() {
        assert_eq!(vertex_layout().array_stride, 32);
        assert_eq!(VERTEX_ATTRIBUTES[1].offset, 12);
        assert_eq!(VERTEX_ATTRIBUTES[2].offset, 24);
        assert_eq!(VERTEX_ATTRIBUTES[2].shader_location, 2);
    }
}
