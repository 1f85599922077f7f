//! Phong-lit indexed meshes.

use glam::{Mat4, Vec3};

use super::mesh_buffers::MeshBuffers;
use super::pipeline_util::{self, PipelineDesc};
use super::uniform::UniformBuffer;
use crate::error::TrackviewError;
use crate::gpu::{RenderContext, Shader, ShaderComposer};
use crate::scene::{PhongMaterial, PhongObject, PhongVertex};

/// Per-object uniform for the Phong shaders (`trackview::phong_light`),
/// shared by plain and textured meshes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PhongUniform {
    /// Object-to-world transform.
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of the model-view matrix.
    pub normal_matrix: [[f32; 4]; 4],
    /// Ambient color (alpha unused).
    pub ambient: [f32; 4],
    /// Diffuse color (alpha unused).
    pub diffuse: [f32; 4],
    /// Specular color (alpha unused).
    pub specular: [f32; 4],
    /// Light position in camera space.
    pub light_position: [f32; 3],
    /// Specular exponent.
    pub shininess: f32,
}

impl PhongUniform {
    /// Uniform for an object with `material` drawn with `model` under
    /// `view`.
    #[must_use]
    pub fn new(
        material: &PhongMaterial,
        model: Mat4,
        view: Mat4,
        light_position: Vec3,
    ) -> Self {
        let normal_matrix = (view * model).inverse().transpose();
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            ambient: material.ambient.to_rgba(1.0),
            diffuse: material.diffuse.to_rgba(1.0),
            specular: material.specular.to_rgba(1.0),
            light_position: light_position.to_array(),
            shininess: material.shininess,
        }
    }
}

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

/// Vertex layout matching [`PhongVertex`].
fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<PhongVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

/// Pipeline and per-object layout for Phong meshes.
pub(crate) struct PhongPipeline {
    pipeline: wgpu::RenderPipeline,
    object_layout: wgpu::BindGroupLayout,
}

impl PhongPipeline {
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, TrackviewError> {
        let object_layout = pipeline_util::uniform_layout(
            &context.device,
            "Phong Object Layout",
        );
        let pipeline = pipeline_util::create_pipeline(
            context,
            shader_composer,
            PipelineDesc {
                label: "Phong",
                shader: Shader::Phong,
                bind_group_layouts: &[camera_layout, &object_layout],
                vertex_layout: vertex_layout(),
                cull_mode: Some(wgpu::Face::Back),
                depth_stencil: pipeline_util::depth_stencil_state(),
            },
        )?;
        Ok(Self {
            pipeline,
            object_layout,
        })
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

/// A Phong object uploaded to the GPU.
pub(crate) struct GpuPhongMesh {
    buffers: MeshBuffers,
    uniform: UniformBuffer<PhongUniform>,
}

impl GpuPhongMesh {
    pub fn upload(
        context: &RenderContext,
        pipeline: &PhongPipeline,
        object: &PhongObject,
    ) -> Self {
        let vertices = object.mesh.interleave();
        let indices = object.mesh.compressed_indices();
        let buffers = MeshBuffers::new(
            &context.device,
            "Phong",
            bytemuck::cast_slice(&vertices),
            &indices,
        );
        log::debug!(
            "uploaded phong mesh: {} vertices, {} {:?} indices",
            vertices.len(),
            indices.count,
            indices.index_type
        );

        let uniform = UniformBuffer::new(
            &context.device,
            "Phong Object Uniform",
            &pipeline.object_layout,
            &PhongUniform::new(
                &object.material,
                object.transform,
                Mat4::IDENTITY,
                Vec3::ZERO,
            ),
        );

        Self { buffers, uniform }
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
