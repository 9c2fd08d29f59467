//! Math utilities and types
//!
//! Provides the vector types used by the asset parsers and geometry generators.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Unit normal of the triangle `(a, b, c)`
///
/// Computed as `(a - b) x (a - c)`, so counter-clockwise triangles face
/// the viewer. Degenerate triangles have no defined normal and yield `None`.
pub fn triangle_normal(a: &Vec3, b: &Vec3, c: &Vec3) -> Option<Vec3> {
    let edge1 = a - b;
    let edge2 = a - c;
    edge1.cross(&edge2).try_normalize(f32::EPSILON)
}

/// Convert a vector into the plain array layout used by vertex buffers
pub fn to_array3(v: &Vec3) -> [f32; 3] {
    [v.x, v.y, v.z]
}

/// Convert a 2D vector into the plain array layout used by vertex buffers
pub fn to_array2(v: &Vec2) -> [f32; 2] {
    [v.x, v.y]
}
