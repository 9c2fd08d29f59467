//! Height-field driven grids

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::{grid_vertex_count, require_samples, GeometryError, MeshBuffers, RawVertex};

/// Rim height as a fraction of crater depth
const RIM_HEIGHT_RATIO: f32 = 0.25;

/// Rim band width as a fraction of crater radius
const RIM_WIDTH_RATIO: f32 = 0.5;

/// Generate a `samples_x x samples_z` grid in the XZ plane
///
/// The grid spans `[0, grid_width] x [0, grid_height]`. Vertex `(x, z)` is
/// stored at `x * samples_z + z` and takes its Y coordinate from
/// `height_map[z + x * samples_z]`.
///
/// Every normal is `(0, 1, 0)`: this is a flat shading approximation and
/// callers that need correct lighting on the slopes must recompute normals.
///
/// # Returns
/// `W * L` vertices and `2 * (W - 1) * (L - 1)` triangles; the grid is open
/// and does not wrap.
pub fn plane_with_craters(
    height_map: &[f32],
    grid_width: f32,
    grid_height: f32,
    samples_x: u32,
    samples_z: u32,
) -> Result<MeshBuffers, GeometryError> {
    require_samples("height field", "x", samples_x, 2)?;
    require_samples("height field", "z", samples_z, 2)?;
    let vertex_count = grid_vertex_count("height field", samples_x, samples_z)? as usize;
    if height_map.len() != vertex_count {
        return Err(GeometryError::HeightMapSize {
            expected: vertex_count,
            found: height_map.len(),
        });
    }

    let w = samples_x;
    let l = samples_z;
    let quads = (w as usize - 1) * (l as usize - 1);
    let mut mesh = MeshBuffers::with_capacity(vertex_count, quads * 2);

    for x in 0..w {
        let u = x as f32 / (w - 1) as f32;
        for z in 0..l {
            let v = z as f32 / (l - 1) as f32;
            let height = height_map[(z + x * l) as usize];

            mesh.push_vertex(RawVertex::new(
                [u * grid_width, height, v * grid_height],
                [0.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
                [u, v],
            ));
        }
    }

    for x in 0..w - 1 {
        for z in 0..l - 1 {
            let corner = x * l + z;
            let next_row = (x + 1) * l + z;
            mesh.push_triangle([corner, corner + 1, next_row + 1]);
            mesh.push_triangle([next_row + 1, next_row, corner]);
        }
    }

    log::debug!(
        "Generated height field: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// A bowl-shaped depression with a raised rim
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crater {
    /// Center X in grid units
    pub center_x: f32,
    /// Center Z in grid units
    pub center_z: f32,
    /// Radius of the bowl
    pub radius: f32,
    /// Depth at the center
    pub depth: f32,
}

impl Crater {
    /// Height contribution at distance `distance` from the center
    fn height_at(&self, distance: f32) -> f32 {
        if self.radius <= 0.0 {
            return 0.0;
        }

        let rim_width = self.radius * RIM_WIDTH_RATIO;
        if distance < self.radius {
            let t = distance / self.radius;
            -self.depth * (1.0 - t * t)
        } else if distance < self.radius + rim_width {
            let t = (distance - self.radius) / rim_width;
            self.depth * RIM_HEIGHT_RATIO * (PI * t).sin()
        } else {
            0.0
        }
    }
}

/// Build a height map for [`plane_with_craters`] from a list of craters
///
/// Samples are laid out as `z + x * samples_z`, at the same grid positions
/// the generator places its vertices. Overlapping craters add up.
pub fn crater_height_map(
    samples_x: u32,
    samples_z: u32,
    grid_width: f32,
    grid_height: f32,
    craters: &[Crater],
) -> Result<Vec<f32>, GeometryError> {
    require_samples("height field", "x", samples_x, 2)?;
    require_samples("height field", "z", samples_z, 2)?;
    let count = grid_vertex_count("height field", samples_x, samples_z)? as usize;

    let mut heights = Vec::with_capacity(count);
    for x in 0..samples_x {
        let px = x as f32 / (samples_x - 1) as f32 * grid_width;
        for z in 0..samples_z {
            let pz = z as f32 / (samples_z - 1) as f32 * grid_height;
            let height = craters
                .iter()
                .map(|c| c.height_at((px - c.center_x).hypot(pz - c.center_z)))
                .sum::<f32>();
            heights.push(height);
        }
    }
    Ok(heights)
}
