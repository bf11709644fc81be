//! Per-instance transforms for marker and segment geometry

use crate::point::{up_axis, Point3f, Vector3f};
use nalgebra::{Matrix4, Translation3, UnitQuaternion};

/// Where suppressed instances are parked, far outside the visible volume
pub const HIDDEN_POSITION: [f32; 3] = [0.0, 0.0, 1000.0];

/// Translation, rotation and non-uniform scale of one rendered instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    pub translation: Vector3f,
    pub rotation: UnitQuaternion<f32>,
    pub scale: Vector3f,
}

impl InstanceTransform {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            translation: Vector3f::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3f::repeat(1.0),
        }
    }

    /// Unrotated, unit-scale instance placed at `position`
    pub fn at(position: &Point3f) -> Self {
        Self {
            translation: position.coords,
            ..Self::identity()
        }
    }

    /// A suppressed instance: parked out of view and collapsed to zero scale
    pub fn hidden() -> Self {
        Self {
            translation: Vector3f::from(HIDDEN_POSITION),
            rotation: UnitQuaternion::identity(),
            scale: Vector3f::zeros(),
        }
    }

    /// Segment spanning `start` to `end` for geometry of unit height along +Y
    ///
    /// The instance sits at the midpoint, its +Y axis is rotated onto the
    /// start-to-end direction, and it is stretched along Y by the distance.
    /// Coincident endpoints give an unrotated segment of zero length.
    pub fn segment(start: &Point3f, end: &Point3f) -> Self {
        let delta = end - start;
        let length = delta.norm();
        let rotation = if length > f32::EPSILON {
            UnitQuaternion::rotation_between(&up_axis(), &delta)
                // Antiparallel to +Y has no unique rotation; any half turn about a horizontal axis works
                .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3f::x_axis(), std::f32::consts::PI))
        } else {
            UnitQuaternion::identity()
        };

        Self {
            translation: nalgebra::center(start, end).coords,
            rotation,
            scale: Vector3f::new(1.0, length, 1.0),
        }
    }

    pub fn position(&self) -> Point3f {
        Point3f::from(self.translation)
    }

    /// Whether this instance is collapsed to nothing
    pub fn is_hidden(&self) -> bool {
        self.scale.iter().all(|s| *s == 0.0)
    }

    /// Homogeneous matrix applying scale, then rotation, then translation
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Translation3::from(self.translation).to_homogeneous()
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply the transformation to a point in instance-local space
    pub fn transform_point(&self, point: &Point3f) -> Point3f {
        let scaled = Point3f::from(point.coords.component_mul(&self.scale));
        self.rotation * scaled + self.translation
    }
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_endpoints() {
        let a = Point3f::new(1.0, 2.0, 0.0);
        let b = Point3f::new(4.0, 6.0, 0.0);
        let seg = InstanceTransform::segment(&a, &b);

        assert_relative_eq!(seg.position(), Point3f::new(2.5, 4.0, 0.0));
        assert_relative_eq!(seg.scale.y, 5.0);

        // The unit cylinder's caps at y = +-0.5 land on the endpoints
        let top = seg.transform_point(&Point3f::new(0.0, 0.5, 0.0));
        let bottom = seg.transform_point(&Point3f::new(0.0, -0.5, 0.0));
        assert_relative_eq!(top, b, epsilon = 1e-5);
        assert_relative_eq!(bottom, a, epsilon = 1e-5);
    }

    #[test]
    fn test_segment_pointing_down() {
        let a = Point3f::new(0.0, 1.0, 0.0);
        let b = Point3f::new(0.0, -1.0, 0.0);
        let seg = InstanceTransform::segment(&a, &b);

        let top = seg.transform_point(&Point3f::new(0.0, 0.5, 0.0));
        assert_relative_eq!(top, b, epsilon = 1e-5);
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Point3f::new(1.0, 1.0, 1.0);
        let seg = InstanceTransform::segment(&p, &p);
        assert_relative_eq!(seg.scale.y, 0.0);
        assert_eq!(seg.rotation, UnitQuaternion::identity());
    }

    #[test]
    fn test_hidden() {
        let hidden = InstanceTransform::hidden();
        assert!(hidden.is_hidden());
        assert_relative_eq!(hidden.position(), Point3f::new(0.0, 0.0, 1000.0));
        assert!(!InstanceTransform::identity().is_hidden());
    }

    #[test]
    fn test_matrix_matches_transform_point() {
        let seg = InstanceTransform::segment(&Point3f::new(-1.0, 0.0, 2.0), &Point3f::new(3.0, 1.0, -1.0));
        let local = Point3f::new(0.2, 0.3, -0.1);

        let via_matrix = Point3f::from_homogeneous(seg.to_matrix() * local.to_homogeneous()).unwrap();
        assert_relative_eq!(via_matrix, seg.transform_point(&local), epsilon = 1e-5);
    }
}
