use wgpu::util::DeviceExt;

use crate::scene::{CompressedIndices, IndexType};

/// Vertex and index buffers of one indexed mesh.
pub(crate) struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_format: wgpu::IndexFormat,
    index_count: u32,
}

impl MeshBuffers {
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        vertices: &[u8],
        indices: &CompressedIndices,
    ) -> Self {
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: vertices,
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Index Buffer")),
                contents: &indices.data,
                usage: wgpu::BufferUsages::INDEX,
            });
        Self {
            vertex_buffer,
            index_buffer,
            index_format: index_format(indices.index_type),
            index_count: indices.count,
        }
    }

    /// Bind the buffers and draw every index. Bind groups must already be
    /// set.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.index_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass
            .set_index_buffer(self.index_buffer.slice(..), self.index_format);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

pub(crate) fn index_format(index_type: IndexType) -> wgpu::IndexFormat {
    match index_type {
        IndexType::U16 => wgpu::IndexFormat::Uint16,
        IndexType::U32 => wgpu::IndexFormat::Uint32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_format_matches_width() {
        assert_eq!(index_format(IndexType::U16), wgpu::IndexFormat::Uint16);
        assert_eq!(index_format(IndexType::U32), wgpu::IndexFormat::Uint32);
        for index_type in [IndexType::U16, IndexType::U32] {
            assert_eq!(
                index_format(index_type).byte_size(),
                index_type.size()
            );
        }
    }
}
