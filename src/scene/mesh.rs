//! CPU-side mesh data: vertex interleaving and index compression.

use glam::{Vec2, Vec3};

/// Interleaved position + normal vertex, as consumed by the Phong
/// pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PhongVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space unit normal.
    pub normal: [f32; 3],
}

/// Position + color vertex for flat 2D overlays in clip space.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColoredVertex2D {
    /// Clip-space position.
    pub position: [f32; 2],
    /// Linear RGB color.
    pub color: [f32; 3],
}

/// Interleaved position + normal + texture coordinate vertex, as consumed
/// by the textured Phong pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TexturedVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space unit normal.
    pub normal: [f32; 3],
    /// Texture coordinate, `(0, 0)` at the top-left texel.
    pub texcoord: [f32; 2],
}

/// Non-interleaved indexed triangle mesh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals, one per position.
    pub normals: Vec<Vec3>,
    /// Texture coordinates, one per position. May be empty for meshes
    /// that are never textured.
    pub texcoords: Vec<Vec2>,
    /// Triangle list indices, three per triangle.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Interleave positions and normals into a single vertex array.
    ///
    /// The output length is the shorter of the two attribute arrays.
    #[must_use]
    pub fn interleave(&self) -> Vec<PhongVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| PhongVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect()
    }

    /// Interleave positions, normals and texture coordinates.
    ///
    /// The output length is the shorter of positions and normals; missing
    /// texture coordinates read as `(0, 0)`.
    #[must_use]
    pub fn interleave_textured(&self) -> Vec<TexturedVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .enumerate()
            .map(|(i, (p, n))| TexturedVertex {
                position: p.to_array(),
                normal: n.to_array(),
                texcoord: self
                    .texcoords
                    .get(i)
                    .copied()
                    .unwrap_or(Vec2::ZERO)
                    .to_array(),
            })
            .collect()
    }

    /// Compress the index list to the narrowest supported index type.
    #[must_use]
    pub fn compressed_indices(&self) -> CompressedIndices {
        compress_indices(&self.indices)
    }
}

/// Width of a compressed index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    /// 16-bit indices.
    U16,
    /// 32-bit indices.
    U32,
}

impl IndexType {
    /// Size of one index in bytes.
    #[must_use]
    pub fn size(self) -> usize {
        match self {
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }
}

/// Index data packed into the narrowest type that can hold the largest
/// index, along with the index range it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedIndices {
    /// Packed native-endian index bytes.
    pub data: Vec<u8>,
    /// Element type of `data`.
    pub index_type: IndexType,
    /// Number of indices.
    pub count: u32,
    /// Smallest referenced index.
    pub start: u32,
    /// Largest referenced index.
    pub end: u32,
}

/// Pack `indices` into `u16` when every index fits, otherwise `u32`.
///
/// wgpu has no 8-bit index format, so `u16` is the narrowest choice.
#[must_use]
pub fn compress_indices(indices: &[u32]) -> CompressedIndices {
    let start = indices.iter().copied().min().unwrap_or(0);
    let end = indices.iter().copied().max().unwrap_or(0);

    let (index_type, data) = if end <= u32::from(u16::MAX) {
        let narrow: Vec<u16> = indices.iter().map(|&i| i as u16).collect();
        (IndexType::U16, bytemuck::cast_slice::<u16, u8>(&narrow).to_vec())
    } else {
        (IndexType::U32, bytemuck::cast_slice::<u32, u8>(indices).to_vec())
    };

    CompressedIndices {
        data,
        index_type,
        count: indices.len() as u32,
        start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleave_pairs_attributes() {
        let mesh = MeshData {
            positions: vec![Vec3::X, Vec3::Y],
            normals: vec![Vec3::Z, Vec3::NEG_Z],
            texcoords: Vec::new(),
            indices: vec![0, 1],
        };
        let vertices = mesh.interleave();
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[0].position, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[1].normal, [0.0, 0.0, -1.0]);
        assert_eq!(size_of::<PhongVertex>(), 24);
    }

    #[test]
    fn textured_interleave_carries_texcoords() {
        let mesh = MeshData {
            positions: vec![Vec3::X, Vec3::Y, Vec3::Z],
            normals: vec![Vec3::Z; 3],
            texcoords: vec![Vec2::new(0.25, 0.75), Vec2::ONE],
            indices: vec![0, 1, 2],
        };
        let vertices = mesh.interleave_textured();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[0].texcoord, [0.25, 0.75]);
        assert_eq!(vertices[1].texcoord, [1.0, 1.0]);
        // Missing coordinates fall back to the origin.
        assert_eq!(vertices[2].texcoord, [0.0, 0.0]);
        assert_eq!(vertices[2].position, [0.0, 0.0, 1.0]);
        assert_eq!(size_of::<TexturedVertex>(), 32);
    }

    #[test]
    fn small_meshes_use_u16_indices() {
        let compressed = compress_indices(&[3, 1, 2, 7]);
        assert_eq!(compressed.index_type, IndexType::U16);
        assert_eq!(compressed.count, 4);
        assert_eq!(compressed.start, 1);
        assert_eq!(compressed.end, 7);
        assert_eq!(compressed.data.len(), 4 * IndexType::U16.size());
        let unpacked: Vec<u16> = compressed
            .data
            .chunks_exact(2)
            .map(|b| u16::from_ne_bytes([b[0], b[1]]))
            .collect();
        assert_eq!(unpacked, vec![3, 1, 2, 7]);
    }

    #[test]
    fn large_indices_stay_u32() {
        let compressed = compress_indices(&[0, 70_000]);
        assert_eq!(compressed.index_type, IndexType::U32);
        assert_eq!(compressed.data.len(), 8);
        assert_eq!(compressed.end, 70_000);
    }

    #[test]
    fn empty_index_list() {
        let compressed = compress_indices(&[]);
        assert_eq!(compressed.count, 0);
        assert!(compressed.data.is_empty());
    }
}
