//! Unlit vertex-colored 2D overlays.

use wgpu::util::DeviceExt;

use super::pipeline_util::{self, PipelineDesc};
use crate::error::TrackviewError;
use crate::gpu::{RenderContext, Shader, ShaderComposer};
use crate::scene::{ColoredMesh2D, ColoredVertex2D};

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x3];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<ColoredVertex2D>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

pub(crate) struct VertexColorPipeline {
    pipeline: wgpu::RenderPipeline,
}

impl VertexColorPipeline {
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, TrackviewError> {
        let pipeline = pipeline_util::create_pipeline(
            context,
            shader_composer,
            PipelineDesc {
                label: "Vertex Color 2D",
                shader: Shader::VertexColor2D,
                bind_group_layouts: &[],
                vertex_layout: vertex_layout(),
                cull_mode: None,
                depth_stencil: pipeline_util::overlay_depth_state(),
            },
        )?;
        Ok(Self { pipeline })
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

/// A 2D overlay uploaded to the GPU. Non-indexed.
pub(crate) struct GpuColoredMesh {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl GpuColoredMesh {
    pub fn upload(context: &RenderContext, mesh: &ColoredMesh2D) -> Self {
        let vertex_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Color 2D Buffer"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        Self {
            vertex_buffer,
            vertex_count: mesh.vertices.len() as u32,
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.vertex_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_vertex_size() {
        assert_eq!(vertex_layout().array_stride, 20);
        assert_eq!(VERTEX_ATTRIBUTES[1].offset, 8);
        assert_eq!(VERTEX_ATTRIBUTES[1].shader_location, 1);
    }
}
