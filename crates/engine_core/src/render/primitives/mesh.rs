//! Mesh buffer representation shared by every generator and loader
//!
//! All geometry handed to the graphics backend uses one interleaved vertex
//! layout of 11 floats: position (3), normal (3), color (3) and texture
//! coordinates (2). Generators may use the color slot for debug colors or
//! tangents; meshes loaded from model files leave it zeroed.

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex as uploaded to the backend
///
/// `#[repr(C)]` keeps the field order and packing identical to the
/// attribute layout the shaders expect (44 bytes, no padding).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct RawVertex {
    /// Position in 3D space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Color, or a tangent for meshes that need one
    pub color: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl RawVertex {
    /// Number of scalar attributes per vertex
    pub const ATTRIBUTE_COUNT: usize = 11;

    /// Size of one vertex in bytes
    pub const STRIDE: usize = Self::ATTRIBUTE_COUNT * std::mem::size_of::<f32>();

    /// Create a new vertex
    pub const fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            color,
            tex_coord,
        }
    }

    /// Flatten into the 11-float interleaved layout
    pub fn to_array(&self) -> [f32; Self::ATTRIBUTE_COUNT] {
        let mut out = [0.0; Self::ATTRIBUTE_COUNT];
        out.copy_from_slice(bytemuck::cast_slice(std::slice::from_ref(self)));
        out
    }
}

/// Vertex and triangle index buffers ready for upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// Vertex data
    pub vertices: Vec<RawVertex>,

    /// Triangle list indices, three per triangle
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Create a new mesh buffer pair
    pub fn new(vertices: Vec<RawVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Create empty buffers sized for a known vertex and triangle count
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(triangle_count * 3),
        }
    }

    /// Append a vertex
    pub fn push_vertex(&mut self, vertex: RawVertex) {
        self.vertices.push(vertex);
    }

    /// Append a triangle
    pub fn push_triangle(&mut self, triangle: [u32; 3]) {
        self.indices.extend_from_slice(&triangle);
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of index entries (the element count used for drawing)
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
    }

    /// Raw interleaved vertex bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
