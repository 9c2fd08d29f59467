//! Torus generator

use std::f32::consts::TAU;

use super::{grid_vertex_count, require_samples, GeometryError, MeshBuffers, RawVertex};
use crate::foundation::math::{to_array3, Vec3};

/// Generate a closed torus around the Z axis
///
/// A large loop of radius `loop_radius` is sampled at `num_loop_samples`
/// angles theta, and a small circle of radius `circle_radius` at
/// `num_circle_samples` angles phi around each loop point.
///
/// Vertex `(i, j)` is stored at `i * num_circle_samples + j` with
/// - normal `(cos θ cos φ, sin θ cos φ, sin φ)`,
/// - color `(1 - i/N, i/N, j/M)` as a visual aid,
/// - texture coordinates `(θ / 2π, φ / 2π)`.
///
/// # Returns
/// `N * M` vertices and `2 * N * M` triangles. Both indices wrap, so the
/// surface has no seam.
pub fn torus(
    loop_radius: f32,
    circle_radius: f32,
    num_loop_samples: u32,
    num_circle_samples: u32,
) -> Result<MeshBuffers, GeometryError> {
    require_samples("torus", "loop", num_loop_samples, 3)?;
    require_samples("torus", "circle", num_circle_samples, 3)?;
    let vertex_count = grid_vertex_count("torus", num_loop_samples, num_circle_samples)? as usize;

    let n = num_loop_samples;
    let m = num_circle_samples;
    let mut mesh = MeshBuffers::with_capacity(vertex_count, vertex_count * 2);

    for i in 0..n {
        let theta = TAU * i as f32 / n as f32;
        let loop_center = Vec3::new(loop_radius * theta.cos(), loop_radius * theta.sin(), 0.0);

        for j in 0..m {
            let phi = TAU * j as f32 / m as f32;

            let normal = Vec3::new(theta.cos() * phi.cos(), theta.sin() * phi.cos(), phi.sin());
            let position = loop_center + normal * circle_radius;
            let color = [1.0 - i as f32 / n as f32, i as f32 / n as f32, j as f32 / m as f32];
            let tex_coord = [theta / TAU, phi / TAU];

            mesh.push_vertex(RawVertex::new(to_array3(&position), to_array3(&normal), color, tex_coord));
        }
    }

    for i in 0..n {
        let next_i = (i + 1) % n;
        for j in 0..m {
            let next_j = (j + 1) % m;
            mesh.push_triangle([next_i * m + j, i * m + next_j, i * m + j]);
            mesh.push_triangle([next_i * m + j, next_i * m + next_j, i * m + next_j]);
        }
    }

    log::debug!(
        "Generated torus: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::primitives::test_support::{assert_indices_in_range, assert_winding_matches_normals};
    use approx::assert_relative_eq;

    #[test]
    fn test_torus_counts() {
        for (n, m) in [(3, 3), (4, 7), (30, 20)] {
            let mesh = torus(1.0, 0.25, n, m).unwrap();
            assert_eq!(mesh.vertex_count(), (n * m) as usize);
            assert_eq!(mesh.triangle_count(), (2 * n * m) as usize);
            assert_eq!(mesh.index_count(), (6 * n * m) as usize);
            assert_indices_in_range(&mesh);
        }
    }

    #[test]
    fn test_torus_wraps_loop_seam() {
        let (n, m) = (8, 5);
        let mesh = torus(2.0, 0.5, n, m).unwrap();
        let last_ring = (n - 1) * m..n * m;
        let first_ring = 0..m;

        let seam_triangles = mesh
            .triangles()
            .filter(|t| t.iter().any(|i| last_ring.contains(i)) && t.iter().any(|i| first_ring.contains(i)))
            .count();

        // Every quad between the last and first ring contributes two triangles
        assert_eq!(seam_triangles, (2 * m) as usize);
    }

    #[test]
    fn test_torus_wraps_circle_seam() {
        let (n, m) = (6, 6);
        let mesh = torus(2.0, 0.5, n, m).unwrap();
        // Vertex (0, m-1) must share a triangle with vertex (0, 0)
        let connected = mesh
            .triangles()
            .any(|t| t.contains(&(m - 1)) && t.contains(&0));
        assert!(connected);
    }

    #[test]
    fn test_torus_vertex_attributes() {
        let mesh = torus(2.0, 0.5, 4, 4).unwrap();

        // i = 0, j = 0: outermost point on the +X axis
        let v = &mesh.vertices[0];
        assert_relative_eq!(v.position[0], 2.5);
        assert_relative_eq!(v.normal[0], 1.0);
        assert_eq!(v.color, [1.0, 0.0, 0.0]);
        assert_eq!(v.tex_coord, [0.0, 0.0]);

        // i = 1 (theta = pi/2), j = 1 (phi = pi/2): top of the tube
        let v = &mesh.vertices[4 + 1];
        assert_relative_eq!(v.position[1], 2.0, epsilon = 1e-5);
        assert_relative_eq!(v.position[2], 0.5, epsilon = 1e-5);
        assert_relative_eq!(v.tex_coord[0], 0.25);
        assert_relative_eq!(v.tex_coord[1], 0.25);
        assert_relative_eq!(v.color[1], 0.25);
    }

    #[test]
    fn test_torus_normals_are_unit_and_outward() {
        let mesh = torus(1.0, 0.3, 16, 12).unwrap();
        for v in &mesh.vertices {
            assert_relative_eq!(Vec3::from(v.normal).norm(), 1.0, epsilon = 1e-5);
        }
        assert_winding_matches_normals(&mesh);
    }

    #[test]
    fn test_torus_rejects_too_few_samples() {
        assert!(matches!(
            torus(1.0, 0.5, 2, 8),
            Err(GeometryError::TooFewSamples { axis: "loop", .. })
        ));
        assert!(matches!(
            torus(1.0, 0.5, 8, 0),
            Err(GeometryError::TooFewSamples { axis: "circle", .. })
        ));
    }
}
