//! Bevy resources for the hand scene

use bevy::prelude::*;
use handscene_algorithms::{InteractionEvaluator, InteractionObject, SkeletonInstances, ToolMotion, TouchState};
use handscene_core::{CoordinateMapper, FrameLandmarks, HandsceneConfig, LatestLandmarks, SceneConfig, Viewport};
use handscene_session::Session;

/// Configuration the scene was built from
#[derive(Resource, Debug, Clone, Default)]
pub struct ViewerConfig(pub HandsceneConfig);

/// Current viewport extent and the landmark mapper
#[derive(Resource, Debug, Clone, Copy)]
pub struct SceneMapping {
    pub viewport: Viewport,
    pub mapper: CoordinateMapper,
    pub zoom: f32,
}

impl SceneMapping {
    pub fn from_config(scene: &SceneConfig) -> Self {
        Self {
            viewport: Viewport::from_orthographic(
                scene.window_width as f32,
                scene.window_height as f32,
                scene.zoom,
            ),
            mapper: CoordinateMapper::new(scene.depth_scale),
            zoom: scene.zoom,
        }
    }

    /// Recompute the viewport for a window size; returns true when it changed
    pub fn resize(&mut self, window_width: f32, window_height: f32) -> bool {
        let viewport = Viewport::from_orthographic(window_width, window_height, self.zoom);
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        true
    }
}

impl Default for SceneMapping {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

/// Shared slot the tracking side publishes into
#[derive(Resource, Debug, Clone, Default)]
pub struct LandmarkFeed(pub LatestLandmarks);

/// Snapshot of the feed taken once per frame, read by every layout system
#[derive(Resource, Debug, Clone, Default)]
pub struct CurrentFrame {
    pub landmarks: FrameLandmarks,
    pub generation: u64,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Skeleton(pub SkeletonInstances);

/// Touch evaluation and the tool's accumulated spin
#[derive(Resource, Debug, Clone, Copy)]
pub struct ToolState {
    pub evaluator: InteractionEvaluator,
    pub motion: ToolMotion,
}

impl ToolState {
    pub fn from_config(config: &HandsceneConfig) -> Self {
        Self {
            evaluator: InteractionEvaluator::new(InteractionObject::from_config(&config.tool)),
            motion: ToolMotion::new(config.tool.spin_step),
        }
    }

    pub fn touch_state(&self) -> TouchState {
        self.motion.state()
    }
}

impl Default for ToolState {
    fn default() -> Self {
        Self::from_config(&HandsceneConfig::default())
    }
}

/// Materials the tool switches between
#[derive(Resource, Debug, Clone)]
pub struct ToolMaterials {
    pub idle: Handle<StandardMaterial>,
    pub touching: Handle<StandardMaterial>,
}

impl ToolMaterials {
    pub fn for_state(&self, state: TouchState) -> &Handle<StandardMaterial> {
        match state {
            TouchState::Idle => &self.idle,
            TouchState::Touching => &self.touching,
        }
    }
}

/// The tracking session, owned by the main thread
///
/// Inserted with `insert_non_send_resource`; its backends are `Send` but not `Sync`.
pub struct SessionHandle(pub Session);

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self(session)
    }
}
