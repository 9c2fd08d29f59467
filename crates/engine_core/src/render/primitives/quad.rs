//! Fixed quads: the wall and the ground plane

use super::{MeshBuffers, RawVertex};

/// Triangles shared by both quads: corners (0, 2, 1) and (0, 3, 2)
const QUAD_INDICES: [u32; 6] = [0, 2, 1, 0, 3, 2];

/// A 2x2 quad in the XY plane facing +Z
///
/// The color slot carries the surface tangent `(1, 0, 0)` for normal mapping.
pub fn wall() -> MeshBuffers {
    const NORMAL: [f32; 3] = [0.0, 0.0, 1.0];
    const TANGENT: [f32; 3] = [1.0, 0.0, 0.0];

    let vertices = vec![
        RawVertex::new([-1.0, -1.0, 0.0], NORMAL, TANGENT, [0.0, 0.0]),
        RawVertex::new([-1.0, 1.0, 0.0], NORMAL, TANGENT, [0.0, 1.0]),
        RawVertex::new([1.0, 1.0, 0.0], NORMAL, TANGENT, [1.0, 1.0]),
        RawVertex::new([1.0, -1.0, 0.0], NORMAL, TANGENT, [1.0, 0.0]),
    ];

    MeshBuffers::new(vertices, QUAD_INDICES.to_vec())
}

/// A 20x10 ground quad in the XZ plane
///
/// Texture coordinates cover `[0, 1] x [0, 0.5]` to keep the texel aspect
/// ratio square. The normal and color slots hold the same fixed values as
/// the wall.
pub fn plane() -> MeshBuffers {
    const NORMAL: [f32; 3] = [0.0, 0.0, 1.0];
    const COLOR: [f32; 3] = [1.0, 0.0, 0.0];

    let vertices = vec![
        RawVertex::new([-10.0, 0.0, -5.0], NORMAL, COLOR, [0.0, 0.0]),
        RawVertex::new([10.0, 0.0, -5.0], NORMAL, COLOR, [1.0, 0.0]),
        RawVertex::new([10.0, 0.0, 5.0], NORMAL, COLOR, [1.0, 0.5]),
        RawVertex::new([-10.0, 0.0, 5.0], NORMAL, COLOR, [0.0, 0.5]),
    ];

    MeshBuffers::new(vertices, QUAD_INDICES.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::primitives::test_support::{assert_indices_in_range, assert_winding_matches_normals};

    #[test]
    fn test_wall() {
        let mesh = wall();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.index_count(), 6);
        assert_indices_in_range(&mesh);
        assert_winding_matches_normals(&mesh);
        assert!(mesh.vertices.iter().all(|v| v.color == [1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_plane() {
        let mesh = plane();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 2, 1], [0, 3, 2]]);
        assert!(mesh.vertices.iter().all(|v| v.position[1] == 0.0));
        assert_eq!(mesh.vertices[2].tex_coord, [1.0, 0.5]);
    }
}
