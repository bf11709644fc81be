//! Plugin wiring the hand scene into a Bevy app

use bevy::prelude::*;
use handscene_core::{HandsceneConfig, LatestLandmarks};

use crate::resources::{CurrentFrame, LandmarkFeed, SceneMapping, Skeleton, ToolState, ViewerConfig};
use crate::scene::{spawn_camera, spawn_lighting, spawn_overlay, spawn_skeleton, spawn_tool};
use crate::systems::{
    apply_tool, evaluate_touch, layout_skeleton, retry_camera_on_key, snapshot_landmarks,
    stop_session_on_exit, sync_bones, sync_joints, tick_session, update_status_text, update_viewport,
    HandsceneSet,
};

/// Hand skeleton overlay with a touchable tool
///
/// The plugin reads landmarks from a [`LatestLandmarks`] slot. If a
/// [`SessionHandle`](crate::resources::SessionHandle) non-send resource is
/// present, it is ticked once per frame to fill that slot; otherwise anything
/// holding a clone of the slot can publish into it.
///
/// ```no_run
/// use bevy::prelude::*;
/// use handscene_visualization::HandscenePlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(HandscenePlugin::default())
///     .run();
/// ```
pub struct HandscenePlugin {
    pub config: HandsceneConfig,
    pub landmarks: LatestLandmarks,
    pub spawn_camera: bool,
    pub spawn_lighting: bool,
    pub spawn_overlay: bool,
    /// Keyboard camera retry (needs input resources)
    pub enable_input: bool,
}

impl HandscenePlugin {
    pub fn new(config: HandsceneConfig) -> Self {
        Self {
            config,
            landmarks: LatestLandmarks::new(),
            spawn_camera: true,
            spawn_lighting: true,
            spawn_overlay: true,
            enable_input: true,
        }
    }

    /// No camera, lights, overlay or input; for tests
    pub fn headless(config: HandsceneConfig) -> Self {
        Self {
            spawn_camera: false,
            spawn_lighting: false,
            spawn_overlay: false,
            enable_input: false,
            ..Self::new(config)
        }
    }

    /// Read from an existing slot instead of a fresh one
    pub fn with_landmarks(mut self, landmarks: LatestLandmarks) -> Self {
        self.landmarks = landmarks;
        self
    }
}

impl Default for HandscenePlugin {
    fn default() -> Self {
        Self::new(HandsceneConfig::default())
    }
}

impl Plugin for HandscenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ViewerConfig(self.config.clone()))
            .insert_resource(SceneMapping::from_config(&self.config.scene))
            .insert_resource(LandmarkFeed(self.landmarks.clone()))
            .insert_resource(ToolState::from_config(&self.config))
            .init_resource::<CurrentFrame>()
            .init_resource::<Skeleton>();

        app.configure_sets(
            Update,
            (HandsceneSet::Track, HandsceneSet::Layout, HandsceneSet::Apply).chain(),
        );

        app.add_systems(Startup, (spawn_skeleton, spawn_tool));
        app.add_systems(
            Update,
            (
                (tick_session, update_viewport, snapshot_landmarks)
                    .chain()
                    .in_set(HandsceneSet::Track),
                (layout_skeleton, evaluate_touch).in_set(HandsceneSet::Layout),
                (sync_joints, sync_bones, apply_tool, update_status_text).in_set(HandsceneSet::Apply),
            ),
        );
        app.add_systems(Last, stop_session_on_exit);

        if self.spawn_camera {
            app.add_systems(Startup, spawn_camera);
        }
        if self.spawn_lighting {
            app.add_systems(Startup, spawn_lighting);
        }
        if self.spawn_overlay {
            app.add_systems(Startup, spawn_overlay);
        }
        if self.enable_input {
            app.add_systems(Update, retry_camera_on_key.before(HandsceneSet::Track));
        }
    }
}
