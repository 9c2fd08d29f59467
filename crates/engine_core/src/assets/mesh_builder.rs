//! Flattens a parsed model into upload-ready buffers
//!
//! Every face emits three fresh vertices, so the independently indexed
//! position, normal and texture streams never have to be reconciled into
//! one shared index. The index buffer is simply `0, 1, 2, ...`.

use super::obj_loader::ParsedMesh;
use crate::foundation::math::{to_array2, to_array3};
use crate::render::primitives::{MeshBuffers, RawVertex};

/// De-index a parsed mesh into `3 * faces` vertices and indices
pub fn materialize(mesh: &ParsedMesh) -> MeshBuffers {
    let mut buffers = MeshBuffers::with_capacity(mesh.faces.len() * 3, mesh.faces.len());
    let mut next_index = 0u32;

    for face in &mesh.faces {
        for corner in &face.corners {
            let position = mesh.positions.get(corner.position).map(to_array3).unwrap_or_default();
            let normal = to_array3(&mesh.corner_normal(corner));
            let tex_coord = corner
                .tex_coord
                .and_then(|i| mesh.tex_coords.get(i))
                .map(to_array2)
                .unwrap_or_default();

            // Parsed meshes carry no color
            buffers.push_vertex(RawVertex::new(position, normal, [0.0; 3], tex_coord));
        }
        buffers.push_triangle([next_index, next_index + 1, next_index + 2]);
        next_index += 3;
    }

    log::debug!(
        "Materialized {} faces into {} vertices",
        mesh.faces.len(),
        buffers.vertex_count()
    );
    buffers
}
