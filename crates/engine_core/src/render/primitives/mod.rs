//! Procedural geometry
//!
//! Generators for the built-in shapes. Each one returns a [`MeshBuffers`]
//! pair in the shared 11-float vertex layout, triangulated two triangles per
//! grid quad with a consistent diagonal. The torus and sphere close their
//! seams through modulo index arithmetic instead of duplicating vertices;
//! the planar generators are open grids.

pub mod mesh;
pub mod torus;
pub mod sphere;
pub mod quad;
pub mod height_field;

pub use mesh::{MeshBuffers, RawVertex};
pub use torus::torus;
pub use sphere::sphere;
pub use quad::{plane, wall};
pub use height_field::{crater_height_map, plane_with_craters, Crater};

use thiserror::Error;

/// Invalid generator parameters
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// A sample count is below the minimum the shape needs
    #[error("{shape}: {axis} sample count {found} is below the minimum of {minimum}")]
    TooFewSamples {
        /// Shape being generated
        shape: &'static str,
        /// Which sampling axis
        axis: &'static str,
        /// Requested count
        found: u32,
        /// Smallest accepted count
        minimum: u32,
    },

    /// The vertex count does not fit a 32-bit index buffer
    #[error("{shape}: {first} x {second} samples exceed the 32-bit index range")]
    TooManyVertices {
        /// Shape being generated
        shape: &'static str,
        /// First sample count
        first: u32,
        /// Second sample count
        second: u32,
    },

    /// Height map size does not match the sample grid
    #[error("height map has {found} samples, expected {expected}")]
    HeightMapSize {
        /// `samples_x * samples_z`
        expected: usize,
        /// Actual length
        found: usize,
    },
}

fn require_samples(shape: &'static str, axis: &'static str, found: u32, minimum: u32) -> Result<(), GeometryError> {
    if found < minimum {
        return Err(GeometryError::TooFewSamples {
            shape,
            axis,
            found,
            minimum,
        });
    }
    Ok(())
}

fn grid_vertex_count(shape: &'static str, first: u32, second: u32) -> Result<u32, GeometryError> {
    first
        .checked_mul(second)
        .ok_or(GeometryError::TooManyVertices { shape, first, second })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::MeshBuffers;
    use crate::foundation::math::Vec3;

    /// Every index refers to an existing vertex
    pub fn assert_indices_in_range(mesh: &MeshBuffers) {
        let count = mesh.vertex_count() as u32;
        for index in &mesh.indices {
            assert!(*index < count, "index {} out of range for {} vertices", index, count);
        }
    }

    /// Non-degenerate triangles face the same way as their vertex normals
    pub fn assert_winding_matches_normals(mesh: &MeshBuffers) {
        for [a, b, c] in mesh.triangles() {
            let va = &mesh.vertices[a as usize];
            let vb = &mesh.vertices[b as usize];
            let vc = &mesh.vertices[c as usize];
            let pa = Vec3::from(va.position);
            let face = (pa - Vec3::from(vb.position)).cross(&(pa - Vec3::from(vc.position)));
            // Seam and pole triangles collapse to (almost) nothing
            if face.norm() < 1e-6 {
                continue;
            }
            let average = Vec3::from(va.normal) + Vec3::from(vb.normal) + Vec3::from(vc.normal);
            assert!(
                face.dot(&average) > 0.0,
                "triangle {:?} winds against its normals",
                [a, b, c]
            );
        }
    }
}
