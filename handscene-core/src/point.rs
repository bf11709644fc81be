//! Scene-space point and vector types

use nalgebra::{Point3, Vector3};

/// A 3D point in scene space
pub type Point3f = Point3<f32>;

/// A 3D vector in scene space
pub type Vector3f = Vector3<f32>;

/// Unit +Y, the rest axis of cylinder segments
pub fn up_axis() -> Vector3f {
    Vector3f::y()
}
