//! Viewable extent of the scene

use serde::{Deserialize, Serialize};

/// Width and height of the visible scene region, in scene units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Visible extent of an orthographic camera
    ///
    /// With a zoom of `z`, one scene unit covers `z` pixels, so a window of
    /// `w x h` pixels shows `w / z` by `h / z` scene units.
    pub fn from_orthographic(window_width: f32, window_height: f32, zoom: f32) -> Self {
        Self {
            width: window_width / zoom,
            height: window_height / zoom,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_orthographic(1280.0, 720.0, 50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_orthographic_extent() {
        let viewport = Viewport::from_orthographic(1280.0, 720.0, 50.0);
        assert_relative_eq!(viewport.width, 25.6);
        assert_relative_eq!(viewport.height, 14.4);
        assert_relative_eq!(viewport.aspect_ratio(), 16.0 / 9.0, epsilon = 1e-5);
    }
}
