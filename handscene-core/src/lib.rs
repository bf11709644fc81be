//! Core data structures for handscene
//!
//! This crate provides the fundamental types for hand-tracked scene interaction,
//! including normalized landmarks, the fixed hand topology, the viewport mapping
//! from normalized coordinates into scene space, and per-instance transforms.

pub mod point;
pub mod landmark;
pub mod topology;
pub mod viewport;
pub mod mapping;
pub mod transform;
pub mod slot;
pub mod config;
pub mod error;

pub use point::*;
pub use landmark::*;
pub use topology::*;
pub use viewport::*;
pub use mapping::*;
pub use transform::*;
pub use slot::*;
pub use config::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4, UnitQuaternion};
