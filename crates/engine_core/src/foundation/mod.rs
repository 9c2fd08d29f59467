//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Text utilities for line-oriented asset formats
//! - Logging utilities

pub mod math;
pub mod text;
pub mod logging;
