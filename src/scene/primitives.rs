//! Built-in primitive meshes.

use glam::{Vec2, Vec3};

use super::color::Color3;
use super::mesh::{ColoredVertex2D, MeshData};

/// Solid cube spanning `[-1, 1]` on every axis.
///
/// Each face has its own four vertices so normals stay flat: 24 vertices,
/// 36 indices, counter-clockwise winding seen from outside. Every face
/// carries texture coordinates spanning the full `[0, 1]` square.
#[must_use]
pub fn cube_solid() -> MeshData {
    // (normal, tangent, bitangent) with tangent × bitangent = normal.
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    // Each face maps the whole texture, image top along +bitangent.
    const TEXCOORDS: [Vec2; 4] = [
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 0.0),
    ];

    let mut mesh = MeshData {
        positions: Vec::with_capacity(24),
        normals: Vec::with_capacity(24),
        texcoords: Vec::with_capacity(24),
        indices: Vec::with_capacity(36),
    };

    for (normal, u, v) in FACES {
        let base = mesh.positions.len() as u32;
        let corners = [-u - v, u - v, u + v, -u + v];
        for (corner, texcoord) in corners.into_iter().zip(TEXCOORDS) {
            mesh.positions.push(normal + corner);
            mesh.normals.push(normal);
            mesh.texcoords.push(texcoord);
        }
        mesh.indices.extend_from_slice(&[
            base,
            base + 1,
            base + 2,
            base,
            base + 2,
            base + 3,
        ]);
    }

    mesh
}

/// The red/green/blue triangle overlay, in clip space.
#[must_use]
pub fn triangle_2d() -> Vec<ColoredVertex2D> {
    [
        ([-0.5, -0.5], Color3::RED),
        ([0.5, -0.5], Color3::GREEN),
        ([0.0, 0.5], Color3::BLUE),
    ]
    .into_iter()
    .map(|(position, color)| ColoredVertex2D {
        position,
        color: color.to_array(),
    })
    .collect()
}
