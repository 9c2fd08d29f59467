//! # Graphics Backend Abstraction
//!
//! Defines the narrow interface the resource core needs from a graphics API:
//! shader compilation and linking, static vertex/index buffer creation, and
//! 2D/cube-map texture upload. Everything else (contexts, draw calls,
//! windowing) lives outside this crate.

use std::fmt;

use thiserror::Error;

use crate::assets::ImageData;
use crate::render::primitives::MeshBuffers;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Opaque handle to a backend object (program, buffer, texture)
///
/// Zero is reserved as the null handle; backends never hand it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GpuHandle(pub u64);

impl GpuHandle {
    /// The "no object" handle
    pub const NULL: Self = Self(0);

    /// Whether this is the null handle
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for GpuHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex stage
    Vertex,
    /// Fragment stage
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// Texture minification/magnification filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    /// Nearest texel
    Nearest,
    /// Bilinear
    Linear,
}

/// Texture coordinate wrap mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    /// Tile
    Repeat,
    /// Clamp to the edge texel
    ClampToEdge,
}

/// Sampling state applied to a texture object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Minification filter
    pub min_filter: TextureFilter,
    /// Magnification filter
    pub mag_filter: TextureFilter,
    /// Wrap along S (u)
    pub wrap_s: TextureWrap,
    /// Wrap along T (v)
    pub wrap_t: TextureWrap,
    /// Wrap along R (w)
    pub wrap_r: TextureWrap,
}

impl SamplerConfig {
    /// Fixed sampling for cube maps: linear filtering, edge clamp on all axes
    pub const CUBE_MAP: Self = Self {
        min_filter: TextureFilter::Linear,
        mag_filter: TextureFilter::Linear,
        wrap_s: TextureWrap::ClampToEdge,
        wrap_t: TextureWrap::ClampToEdge,
        wrap_r: TextureWrap::ClampToEdge,
    };
}

/// Backend failures, carrying the backend's diagnostic text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Shader stage failed to compile; holds the compiler log
    #[error("{0}")]
    CompileFailed(String),

    /// Program failed to link; holds the linker log
    #[error("{0}")]
    LinkFailed(String),

    /// Handle does not name a live object of the expected type
    #[error("Invalid handle: {0}")]
    InvalidHandle(GpuHandle),

    /// Object creation or upload failed
    #[error("Allocation failed: {0}")]
    AllocationFailed(String),
}

/// Buffer pair created for one mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshUpload {
    /// Vertex buffer
    pub vertex_buffer: GpuHandle,
    /// Index buffer
    pub index_buffer: GpuHandle,
    /// Number of index entries to draw
    pub index_count: u32,
}

/// Graphics API operations used by the resource core
///
/// Implementations own all GPU-side objects. The core never frees what it
/// creates through this trait: objects live until the backend is torn down.
pub trait GraphicsBackend {
    /// Compile one shader stage from source
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> BackendResult<GpuHandle>;

    /// Link a program from a compiled vertex and fragment stage
    fn link_program(&mut self, vertex: GpuHandle, fragment: GpuHandle) -> BackendResult<GpuHandle>;

    /// Release a shader stage object that is no longer needed
    fn delete_shader(&mut self, shader: GpuHandle);

    /// Create a static vertex buffer from interleaved attribute bytes
    fn create_vertex_buffer(&mut self, data: &[u8]) -> BackendResult<GpuHandle>;

    /// Create a static index buffer from `u32` index bytes
    fn create_index_buffer(&mut self, data: &[u8]) -> BackendResult<GpuHandle>;

    /// Create a 2D texture from decoded pixels
    fn create_texture_2d(&mut self, image: &ImageData) -> BackendResult<GpuHandle>;

    /// Create an empty cube-map texture
    fn create_cube_map(&mut self) -> BackendResult<GpuHandle>;

    /// Upload one face of a cube map; `face` counts from +X in the usual
    /// +X, -X, +Y, -Y, +Z, -Z order
    fn upload_cube_map_face(&mut self, cube_map: GpuHandle, face: u32, image: &ImageData) -> BackendResult<()>;

    /// Apply sampling state to a texture
    fn set_sampler(&mut self, texture: GpuHandle, sampler: SamplerConfig) -> BackendResult<()>;

    /// Upload a generated or loaded mesh as a vertex/index buffer pair
    fn upload_mesh(&mut self, mesh: &MeshBuffers) -> BackendResult<MeshUpload> {
        let index_count = u32::try_from(mesh.index_count())
            .map_err(|_| BackendError::AllocationFailed(format!("{} indices exceed u32", mesh.index_count())))?;
        let vertex_buffer = self.create_vertex_buffer(mesh.vertex_bytes())?;
        let index_buffer = self.create_index_buffer(mesh.index_bytes())?;
        Ok(MeshUpload {
            vertex_buffer,
            index_buffer,
            index_count,
        })
    }
}
