//! # Backend Module
//!
//! The boundary between the resource core and the graphics API.
//!
//! ## Organization
//!
//! - **Graphics**: the [`GraphicsBackend`] trait and the opaque handle and
//!   sampler types that cross it
//! - **Headless**: an in-memory implementation that records every object it
//!   is asked to create, used by tests and offline tools
//!
//! ## Design Principles
//!
//! - **Explicit context**: every component that allocates GPU objects takes
//!   the backend as a parameter instead of relying on an implicit current
//!   context
//! - **Diagnostics as data**: compiler, linker and allocation failures carry
//!   the backend's own message text

pub mod graphics;
pub mod headless;

pub use graphics::{
    BackendError, BackendResult, GpuHandle, GraphicsBackend, MeshUpload, SamplerConfig, ShaderStage,
    TextureFilter, TextureWrap,
};
pub use headless::{BackendCall, HeadlessBackend, TextureInfo};
