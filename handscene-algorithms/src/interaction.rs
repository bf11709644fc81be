//! Fingertip proximity test against a single static object

use handscene_core::{CoordinateMapper, FrameLandmarks, Point3f, ToolConfig, Vector3f, Viewport};
use nalgebra::UnitQuaternion;

/// Touch state of the interaction object for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchState {
    #[default]
    Idle,
    Touching,
}

impl TouchState {
    pub fn is_touching(self) -> bool {
        self == TouchState::Touching
    }
}

/// A static point in scene space that fingertips can touch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionObject {
    pub position: Point3f,
    pub touch_radius: f32,
}

impl InteractionObject {
    pub fn new(position: Point3f, touch_radius: f32) -> Self {
        Self { position, touch_radius }
    }

    pub fn from_config(config: &ToolConfig) -> Self {
        Self::new(Point3f::from(config.position), config.touch_radius)
    }

    /// Strictly inside the touch radius
    pub fn contains(&self, point: &Point3f) -> bool {
        nalgebra::distance(&self.position, point) < self.touch_radius
    }
}

impl Default for InteractionObject {
    fn default() -> Self {
        Self::new(Point3f::origin(), 1.5)
    }
}

/// Decides, from one frame alone, whether any index fingertip touches the object
///
/// Fingertips are projected onto the `z = 0` plane before measuring, so only
/// the on-screen position matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionEvaluator {
    object: InteractionObject,
}

impl InteractionEvaluator {
    pub fn new(object: InteractionObject) -> Self {
        Self { object }
    }

    pub fn object(&self) -> &InteractionObject {
        &self.object
    }

    /// Flat scene-space position of every hand's index fingertip
    pub fn fingertips<'a>(
        &'a self,
        frame: &'a FrameLandmarks,
        viewport: &'a Viewport,
        mapper: &'a CoordinateMapper,
    ) -> impl Iterator<Item = Point3f> + 'a {
        frame.iter().map(move |hand| mapper.map_flat(hand.index_tip(), viewport))
    }

    /// Distance from the object to the closest fingertip, if any hand is tracked
    pub fn nearest_distance(
        &self,
        frame: &FrameLandmarks,
        viewport: &Viewport,
        mapper: &CoordinateMapper,
    ) -> Option<f32> {
        self.fingertips(frame, viewport, mapper)
            .map(|tip| nalgebra::distance(&self.object.position, &tip))
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn evaluate(&self, frame: &FrameLandmarks, viewport: &Viewport, mapper: &CoordinateMapper) -> TouchState {
        if self
            .fingertips(frame, viewport, mapper)
            .any(|tip| self.object.contains(&tip))
        {
            TouchState::Touching
        } else {
            TouchState::Idle
        }
    }
}

/// Visual response of the tool: spins while touched, holds still otherwise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolMotion {
    /// Accumulated Euler angles, applied in X, Y, Z order
    pub angles: Vector3f,
    pub spin_step: f32,
    state: TouchState,
}

impl ToolMotion {
    pub fn new(spin_step: f32) -> Self {
        Self {
            angles: Vector3f::zeros(),
            spin_step,
            state: TouchState::Idle,
        }
    }

    /// Advance one frame; returns true when the touch state changed
    pub fn step(&mut self, state: TouchState) -> bool {
        if state.is_touching() {
            self.angles.x += self.spin_step;
            self.angles.y += self.spin_step;
        }
        let changed = state != self.state;
        self.state = state;
        changed
    }

    pub fn state(&self) -> TouchState {
        self.state
    }

    pub fn orientation(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3f::x_axis(), self.angles.x)
            * UnitQuaternion::from_axis_angle(&Vector3f::y_axis(), self.angles.y)
            * UnitQuaternion::from_axis_angle(&Vector3f::z_axis(), self.angles.z)
    }
}

impl Default for ToolMotion {
    fn default() -> Self {
        Self::new(0.05)
    }
}
