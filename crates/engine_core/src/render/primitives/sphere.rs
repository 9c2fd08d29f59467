//! UV-sphere generator

use std::f32::consts::{PI, TAU};

use super::{grid_vertex_count, require_samples, GeometryError, MeshBuffers, RawVertex};
use crate::foundation::math::{to_array3, Vec3};

/// Generate a UV-sphere centered at the origin
///
/// Theta runs over `[0, 2π]` with `num_samples_theta` samples and phi over
/// `[0, π]` with `num_samples_phi` samples. The normal is
/// `(cos θ sin φ, sin θ sin φ, -cos φ)`; negating z makes the surface run
/// from the south pole to the north pole as phi grows, which keeps the
/// triangle winding facing outward.
///
/// # Returns
/// `N * M` vertices and `2 * N * (M - 1)` triangles. The theta index wraps
/// modulo `N`; the phi index does not, leaving the poles open.
pub fn sphere(radius: f32, num_samples_theta: u32, num_samples_phi: u32) -> Result<MeshBuffers, GeometryError> {
    require_samples("sphere", "theta", num_samples_theta, 2)?;
    require_samples("sphere", "phi", num_samples_phi, 2)?;
    let vertex_count = grid_vertex_count("sphere", num_samples_theta, num_samples_phi)? as usize;

    let n = num_samples_theta;
    let m = num_samples_phi;
    let triangle_count = 2 * n as usize * (m as usize - 1);
    let mut mesh = MeshBuffers::with_capacity(vertex_count, triangle_count);

    for i in 0..n {
        let theta = TAU * i as f32 / (n - 1) as f32;

        for j in 0..m {
            let phi = PI * j as f32 / (m - 1) as f32;

            let normal = Vec3::new(theta.cos() * phi.sin(), theta.sin() * phi.sin(), -phi.cos());
            let position = normal * radius;
            let u = i as f32 / n as f32;
            let v = j as f32 / m as f32;
            let color = [u, 1.0 - v, v];
            let tex_coord = [u, 1.0 - v];

            mesh.push_vertex(RawVertex::new(to_array3(&position), to_array3(&normal), color, tex_coord));
        }
    }

    for i in 0..n {
        let next_i = (i + 1) % n;
        for j in 0..m - 1 {
            mesh.push_triangle([next_i * m + j, i * m + (j + 1), i * m + j]);
            mesh.push_triangle([next_i * m + j, next_i * m + (j + 1), i * m + (j + 1)]);
        }
    }

    log::debug!(
        "Generated sphere: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}
