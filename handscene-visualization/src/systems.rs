//! Per-frame systems
//!
//! Every frame recomputes the whole scene from one snapshot of the landmark
//! feed: tracking publishes, layout reads the snapshot, apply writes the
//! results onto entities.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use handscene_session::{Session, SessionPhase};
use tracing::{debug, info, warn};

use crate::components::{BoneSegment, JointMarker, StatusText, SurgicalTool};
use crate::convert::{quat_from_unit_quaternion, transform_from_instance};
use crate::resources::{
    CurrentFrame, LandmarkFeed, SceneMapping, SessionHandle, Skeleton, ToolMaterials, ToolState,
};

/// Ordering of the per-frame work
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum HandsceneSet {
    /// Run detection and take the frame snapshot
    Track,
    /// Skeleton layout and touch evaluation
    Layout,
    /// Write transforms, materials and text
    Apply,
}

pub fn tick_session(time: Res<Time>, session: Option<NonSendMut<SessionHandle>>) {
    if let Some(mut session) = session {
        session.0.tick(time.elapsed_secs_f64() * 1000.0);
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn update_viewport(windows: Query<&Window, With<PrimaryWindow>>, mut mapping: ResMut<SceneMapping>) {
    let Ok(window) = windows.single() else {
        return;
    };
    let (width, height) = (window.width(), window.height());
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    // Avoid touching the resource when nothing changed
    let mut resized = *mapping;
    if resized.resize(width, height) {
        debug!(width = resized.viewport.width, height = resized.viewport.height, "viewport resized");
        *mapping = resized;
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn snapshot_landmarks(feed: Res<LandmarkFeed>, mut current: ResMut<CurrentFrame>) {
    current.landmarks = feed.0.snapshot();
    current.generation = feed.0.generation();
}

#[allow(clippy::needless_pass_by_value)]
pub fn layout_skeleton(current: Res<CurrentFrame>, mapping: Res<SceneMapping>, mut skeleton: ResMut<Skeleton>) {
    skeleton.0.update(&current.landmarks, &mapping.viewport, &mapping.mapper);
}

#[allow(clippy::needless_pass_by_value)]
pub fn evaluate_touch(current: Res<CurrentFrame>, mapping: Res<SceneMapping>, mut tool: ResMut<ToolState>) {
    let state = tool
        .evaluator
        .evaluate(&current.landmarks, &mapping.viewport, &mapping.mapper);
    if tool.motion.step(state) {
        info!(touching = state.is_touching(), "tool touch state changed");
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn sync_joints(skeleton: Res<Skeleton>, mut joints: Query<(&JointMarker, &mut Transform, &mut Visibility)>) {
    let instances = skeleton.0.joints();
    for (marker, mut transform, mut visibility) in &mut joints {
        let Some(instance) = instances.get(marker.slot) else {
            continue;
        };
        *transform = transform_from_instance(instance);
        visibility.set_if_neq(if instance.is_hidden() {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        });
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn sync_bones(skeleton: Res<Skeleton>, mut bones: Query<(&BoneSegment, &mut Transform, &mut Visibility)>) {
    let instances = skeleton.0.bones();
    for (segment, mut transform, mut visibility) in &mut bones {
        let Some(instance) = instances.get(segment.slot) else {
            continue;
        };
        *transform = transform_from_instance(instance);
        visibility.set_if_neq(if instance.is_hidden() {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        });
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn apply_tool(
    tool: Res<ToolState>,
    materials: Option<Res<ToolMaterials>>,
    mut tools: Query<(&mut Transform, &mut MeshMaterial3d<StandardMaterial>), With<SurgicalTool>>,
) {
    let Some(materials) = materials else {
        return;
    };
    let rotation = quat_from_unit_quaternion(&tool.motion.orientation());
    let handle = materials.for_state(tool.touch_state());
    for (mut transform, mut material) in &mut tools {
        transform.rotation = rotation;
        if material.0 != *handle {
            material.0 = handle.clone();
        }
    }
}

/// Overlay text for the current session state
pub fn overlay_text(session: Option<&Session>) -> String {
    let mut text = String::from("Virtual Surgery\n");
    match session {
        Some(session) => {
            text.push_str(&format!("Status: {}\n", session.status().message()));
            if let Some(help) = session.capture_help() {
                text.push_str(&help);
                text.push('\n');
            }
            if session.offers_retry() {
                text.push_str("Press R to start the camera.\n");
            }
        }
        None => text.push_str("Status: No tracker\n"),
    }
    text.push_str("Raise your hand.\nTouch the cylinder with your index finger to interact.");
    text
}

pub fn update_status_text(session: Option<NonSend<SessionHandle>>, mut texts: Query<&mut Text, With<StatusText>>) {
    let content = overlay_text(session.as_ref().map(|s| &s.0));
    for mut text in &mut texts {
        if text.0 != content {
            text.0.clone_from(&content);
        }
    }
}

/// Rerun the camera step when the user asks and the failure allows it
#[allow(clippy::needless_pass_by_value)]
pub fn retry_camera_on_key(keys: Res<ButtonInput<KeyCode>>, session: Option<NonSendMut<SessionHandle>>) {
    let Some(mut session) = session else {
        return;
    };
    if !keys.just_pressed(KeyCode::KeyR) || !session.0.offers_retry() {
        return;
    }
    match pollster::block_on(session.0.retry_camera()) {
        Ok(()) => info!("camera started"),
        Err(e) => warn!(error = %e, "camera retry failed"),
    }
}

/// Release the camera and model when the app exits
pub fn stop_session_on_exit(mut exits: EventReader<AppExit>, session: Option<NonSendMut<SessionHandle>>) {
    if exits.read().next().is_none() {
        return;
    }
    if let Some(mut session) = session {
        if session.0.phase() != SessionPhase::Stopped {
            session.0.stop();
        }
    }
}
