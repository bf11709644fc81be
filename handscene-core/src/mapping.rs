//! Mapping from normalized landmark coordinates into scene space

use crate::landmark::Landmark;
use crate::point::Point3f;
use crate::viewport::Viewport;

/// Depth exaggeration applied to landmark `z` so relative depth is perceptible
pub const DEFAULT_DEPTH_SCALE: f32 = 5.0;

/// Maps normalized landmarks onto the visible scene region
///
/// The image is mirrored horizontally (selfie view) and image `y` grows
/// downwards, so both axes are flipped:
///
/// ```text
/// sx = (x - 0.5) * -W
/// sy = (y - 0.5) * -H
/// sz = -z * depth_scale
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    pub depth_scale: f32,
}

impl CoordinateMapper {
    pub fn new(depth_scale: f32) -> Self {
        Self { depth_scale }
    }

    pub fn map(&self, landmark: &Landmark, viewport: &Viewport) -> Point3f {
        Point3f::new(
            (landmark.x - 0.5) * -viewport.width,
            (landmark.y - 0.5) * -viewport.height,
            -landmark.z * self.depth_scale,
        )
    }

    /// Map onto the `z = 0` plane, ignoring landmark depth
    pub fn map_flat(&self, landmark: &Landmark, viewport: &Viewport) -> Point3f {
        self.map(&landmark.flattened(), viewport)
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH_SCALE)
    }
}
