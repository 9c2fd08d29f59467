//! Asset loading
//!
//! File-backed resources (models, shader pairs, textures, cube maps) and the
//! registry that owns everything uploaded to the backend.

pub mod obj_loader;
pub mod mesh_builder;
pub mod image_loader;
pub mod shader_loader;
pub mod texture_loader;
pub mod resource_manager;

pub use obj_loader::{Corner, Face, NormalSource, ObjError, ObjLoader, ParsedMesh};
pub use mesh_builder::materialize;
pub use image_loader::ImageData;
pub use resource_manager::{ErrorCategory, Resource, ResourceError, ResourceKind, ResourceManager};

#[cfg(test)]
mod test_model_loading;
