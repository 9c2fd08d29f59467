//! # Rendering Data
//!
//! CPU-side geometry handed to the graphics backend. Only the procedural
//! generators and the shared vertex layout live here; drawing is the
//! backend's business.

pub mod primitives;

pub use primitives::{GeometryError, MeshBuffers, RawVertex};
