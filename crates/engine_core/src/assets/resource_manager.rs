//! Resource Manager - Named Registry of GPU-Bindable Assets
//!
//! Owns every shader program, texture and mesh the engine creates, each
//! stored as a [`Resource`] under a caller-chosen name. Resources are
//! produced by loading files (materials, textures, models, cube maps) or by
//! the procedural generators in [`crate::render::primitives`], and live
//! until the manager is dropped. There is no unload API.
//!
//! **Lookup policy**: names are not required to be unique. Registering a
//! name twice keeps both entries in insertion order, but lookups always
//! resolve to the first one; the later entry is only visible through
//! [`ResourceManager::resources`].
//!
//! **Failure policy**: a failed load leaves the registry unchanged. Backend
//! objects created before the failure (a stage that compiled, the first
//! faces of a cube map) are not released.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::mesh_builder::materialize;
use super::obj_loader::{ObjError, ObjLoader};
use super::{shader_loader, texture_loader};
use crate::backend::{BackendError, GpuHandle, GraphicsBackend, ShaderStage};
use crate::config::ResourceConfig;
use crate::render::primitives::{self, GeometryError, MeshBuffers};

/// Broad classes of load failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A file is missing or unreadable
    Io,
    /// A model file is malformed
    Format,
    /// Shader compilation/linking, image decoding or upload failed
    Backend,
    /// The caller asked for something that cannot exist
    Usage,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Io => "io",
            Self::Format => "format",
            Self::Backend => "backend",
            Self::Usage => "usage",
        };
        f.pad(name)
    }
}

/// Resource Manager errors
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A source file could not be opened or read
    #[error("Error opening file {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Model text was malformed
    #[error("Error parsing model: {0}")]
    Format(ObjError),

    /// The backend rejected a shader stage
    #[error("Error compiling {stage} shader: {log}")]
    ShaderCompile {
        /// Stage that failed
        stage: ShaderStage,
        /// Compiler log
        log: String,
    },

    /// The backend could not link the program
    #[error("Error linking shaders: {log}")]
    ShaderLink {
        /// Linker log
        log: String,
    },

    /// A texture image could not be decoded
    #[error("Error loading texture {}: {reason}", path.display())]
    TextureLoad {
        /// Image file
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// A cube-map face could not be decoded
    #[error("Error loading cube map texture: {}: {reason}", path.display())]
    CubeMapFace {
        /// Face index
        face: u32,
        /// Image file
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// Buffer or texture upload failed
    #[error("Backend error: {0}")]
    Upload(#[from] BackendError),

    /// Unknown resource kind name
    #[error("Invalid type of resource: {0}")]
    UnsupportedKind(String),

    /// Generator parameters were out of range
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),
}

impl ResourceError {
    /// Which class of failure this is
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io { .. } | Self::Format(ObjError::Io(_)) => ErrorCategory::Io,
            Self::Format(_) => ErrorCategory::Format,
            Self::ShaderCompile { .. }
            | Self::ShaderLink { .. }
            | Self::TextureLoad { .. }
            | Self::CubeMapFace { .. }
            | Self::Upload(_) => ErrorCategory::Backend,
            Self::UnsupportedKind(_) | Self::InvalidGeometry(_) => ErrorCategory::Usage,
        }
    }

    fn from_model(path: &Path, error: ObjError) -> Self {
        match error {
            ObjError::Io(source) => Self::Io {
                path: path.to_path_buf(),
                source,
            },
            other => Self::Format(other),
        }
    }
}

/// What a resource holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Linked shader program
    Material,
    /// 2D texture or cube map
    Texture,
    /// Vertex and index buffer pair
    Mesh,
}

impl FromStr for ResourceKind {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Material" => Ok(Self::Material),
            "Texture" => Ok(Self::Texture),
            "Mesh" => Ok(Self::Mesh),
            other => Err(ResourceError::UnsupportedKind(other.to_string())),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Material => "Material",
            Self::Texture => "Texture",
            Self::Mesh => "Mesh",
        };
        f.pad(name)
    }
}

/// A named backend object (or buffer pair)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    kind: ResourceKind,
    name: String,
    primary: GpuHandle,
    secondary: GpuHandle,
    size: u32,
}

impl Resource {
    /// Create a resource record
    ///
    /// `secondary` is the index buffer for meshes and [`GpuHandle::NULL`]
    /// otherwise; `size` is the mesh element count (triangles x 3).
    pub fn new(kind: ResourceKind, name: impl Into<String>, primary: GpuHandle, secondary: GpuHandle, size: u32) -> Self {
        Self {
            kind,
            name: name.into(),
            primary,
            secondary,
            size,
        }
    }

    /// Resource kind
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Registered name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Program, texture or vertex buffer
    pub fn primary(&self) -> GpuHandle {
        self.primary
    }

    /// Index buffer of a mesh
    pub fn secondary(&self) -> GpuHandle {
        self.secondary
    }

    /// Number of indices to draw
    pub fn size(&self) -> u32 {
        self.size
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8} {:<20} {}", self.kind, self.name, self.primary)?;
        if !self.secondary.is_null() {
            write!(f, " {}", self.secondary)?;
        }
        if self.kind == ResourceKind::Mesh {
            write!(f, " ({} indices)", self.size)?;
        }
        Ok(())
    }
}

/// Registry of every resource created through it
#[derive(Debug, Default)]
pub struct ResourceManager {
    config: ResourceConfig,
    resources: Vec<Resource>,
    /// Name to the position of its first registration
    index: HashMap<String, usize>,
}

impl ResourceManager {
    /// Create an empty registry
    pub fn new(config: ResourceConfig) -> Self {
        Self {
            config,
            resources: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Path and shader settings in use
    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Register a pre-built resource
    pub fn add_resource(&mut self, resource: Resource) -> &Resource {
        let position = self.resources.len();
        if self.index.contains_key(resource.name()) {
            log::warn!(
                "Resource name '{}' is already registered; the new {} stays unreachable by name",
                resource.name(),
                resource.kind()
            );
        } else {
            self.index.insert(resource.name().to_string(), position);
        }

        log::info!(
            "Registered {} '{}' (size {})",
            resource.kind(),
            resource.name(),
            resource.size()
        );
        self.resources.push(resource);
        &self.resources[position]
    }

    /// First resource registered under `name`
    pub fn get_resource(&self, name: &str) -> Option<&Resource> {
        self.index.get(name).map(|&position| &self.resources[position])
    }

    /// All resources in registration order
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    /// Number of registered resources, duplicates included
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Load a resource from disk and register it
    ///
    /// For materials `path` is the prefix the stage extensions are appended
    /// to; for textures and meshes it is the file itself. Relative paths are
    /// resolved against the configured search paths.
    pub fn load_resource(
        &mut self,
        backend: &mut dyn GraphicsBackend,
        kind: ResourceKind,
        name: &str,
        path: &str,
    ) -> Result<&Resource, ResourceError> {
        match kind {
            ResourceKind::Material => {
                let program = shader_loader::build_material(backend, &self.config, path)?;
                Ok(self.add_resource(Resource::new(kind, name, program, GpuHandle::NULL, 0)))
            }
            ResourceKind::Texture => {
                let path = self.config.resolve_path(Path::new(path));
                let texture = texture_loader::load_texture(backend, &path)?;
                Ok(self.add_resource(Resource::new(kind, name, texture, GpuHandle::NULL, 0)))
            }
            ResourceKind::Mesh => {
                let path = self.config.resolve_path(Path::new(path));
                let parsed = ObjLoader::load_obj(&path).map_err(|e| ResourceError::from_model(&path, e))?;
                self.register_mesh(backend, name, &materialize(&parsed))
            }
        }
    }

    /// Generate a torus and register it as a mesh
    pub fn create_torus(
        &mut self,
        backend: &mut dyn GraphicsBackend,
        name: &str,
        loop_radius: f32,
        circle_radius: f32,
        num_loop_samples: u32,
        num_circle_samples: u32,
    ) -> Result<&Resource, ResourceError> {
        let mesh = primitives::torus(loop_radius, circle_radius, num_loop_samples, num_circle_samples)?;
        self.register_mesh(backend, name, &mesh)
    }

    /// Generate a UV-sphere and register it as a mesh
    pub fn create_sphere(
        &mut self,
        backend: &mut dyn GraphicsBackend,
        name: &str,
        radius: f32,
        num_samples_theta: u32,
        num_samples_phi: u32,
    ) -> Result<&Resource, ResourceError> {
        let mesh = primitives::sphere(radius, num_samples_theta, num_samples_phi)?;
        self.register_mesh(backend, name, &mesh)
    }

    /// Register the unit wall quad
    pub fn create_wall(&mut self, backend: &mut dyn GraphicsBackend, name: &str) -> Result<&Resource, ResourceError> {
        self.register_mesh(backend, name, &primitives::wall())
    }

    /// Register the unit ground quad
    pub fn create_plane(&mut self, backend: &mut dyn GraphicsBackend, name: &str) -> Result<&Resource, ResourceError> {
        self.register_mesh(backend, name, &primitives::plane())
    }

    /// Generate a height-field grid and register it as a mesh
    pub fn create_plane_with_craters(
        &mut self,
        backend: &mut dyn GraphicsBackend,
        name: &str,
        height_map: &[f32],
        grid_width: f32,
        grid_height: f32,
        samples_x: u32,
        samples_z: u32,
    ) -> Result<&Resource, ResourceError> {
        let mesh = primitives::plane_with_craters(height_map, grid_width, grid_height, samples_x, samples_z)?;
        self.register_mesh(backend, name, &mesh)
    }

    /// Load six face images into a cube map and register it as a texture
    pub fn load_cube_map(
        &mut self,
        backend: &mut dyn GraphicsBackend,
        name: &str,
        faces: &[PathBuf],
    ) -> Result<&Resource, ResourceError> {
        let faces: Vec<PathBuf> = faces.iter().map(|face| self.config.resolve_path(face)).collect();
        let cube_map = texture_loader::load_cube_map(backend, &faces)?;
        Ok(self.add_resource(Resource::new(
            ResourceKind::Texture,
            name,
            cube_map,
            GpuHandle::NULL,
            0,
        )))
    }

    fn register_mesh(
        &mut self,
        backend: &mut dyn GraphicsBackend,
        name: &str,
        mesh: &MeshBuffers,
    ) -> Result<&Resource, ResourceError> {
        let upload = backend.upload_mesh(mesh)?;
        Ok(self.add_resource(Resource::new(
            ResourceKind::Mesh,
            name,
            upload.vertex_buffer,
            upload.index_buffer,
            upload.index_count,
        )))
    }
}
