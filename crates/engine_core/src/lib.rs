//! # Engine Core
//!
//! Resource loading and procedural geometry for a small real-time renderer.
//!
//! ## Features
//!
//! - **Model Loading**: OBJ-style text models with quad splitting and
//!   smooth normal synthesis
//! - **Procedural Geometry**: torus, UV-sphere, wall/plane quads and
//!   height-field grids with craters
//! - **Materials and Textures**: shader pair compilation and linking, 2D
//!   textures and cube maps
//! - **Resource Registry**: named, first-match lookup of every uploaded asset
//! - **Backend Agnostic**: all GPU work goes through [`backend::GraphicsBackend`];
//!   [`backend::HeadlessBackend`] runs without a GPU
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use engine_core::prelude::*;
//!
//! fn main() -> Result<(), ResourceError> {
//!     let mut backend = HeadlessBackend::new();
//!     let mut resources = ResourceManager::new(ResourceConfig::default());
//!
//!     resources.create_torus(&mut backend, "ring", 1.0, 0.25, 32, 16)?;
//!     resources.load_resource(&mut backend, ResourceKind::Mesh, "teapot", "models/teapot.obj")?;
//!
//!     if let Some(ring) = resources.get_resource("ring") {
//!         println!("{ring}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod backend;
pub mod render;
pub mod assets;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{ErrorCategory, ImageData, ObjLoader, Resource, ResourceError, ResourceKind, ResourceManager},
        backend::{GpuHandle, GraphicsBackend, HeadlessBackend},
        config::{Config, ResourceConfig},
        foundation::math::{Vec2, Vec3},
        render::primitives::{Crater, MeshBuffers, RawVertex},
    };
}
