//! Startup systems: instance pools, tool, camera, lights and overlay

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use handscene_core::{InstanceTransform, Point3f, MAX_BONES, MAX_JOINTS};

use crate::components::{BoneSegment, JointMarker, StatusText, SurgicalTool};
use crate::convert::{color_from_rgb, transform_from_instance, vec3_from_point};
use crate::resources::{ToolMaterials, ViewerConfig};

/// Spawn every joint and bone slot up front, hidden
///
/// Slots are never despawned; layout systems move them and toggle visibility.
pub fn spawn_skeleton(
    mut commands: Commands,
    config: Res<ViewerConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let style = &config.0.skeleton;
    let joint_mesh = meshes.add(Sphere::new(style.joint_radius));
    // Unit height; bone transforms stretch it along Y
    let bone_mesh = meshes.add(Cylinder::new(style.bone_radius, 1.0));
    let joint_material = materials.add(StandardMaterial {
        base_color: color_from_rgb(style.joint_color),
        ..default()
    });
    let bone_material = materials.add(StandardMaterial {
        base_color: color_from_rgb(style.bone_color),
        ..default()
    });

    let hidden = transform_from_instance(&InstanceTransform::hidden());

    for slot in 0..MAX_JOINTS {
        commands.spawn((
            JointMarker { slot },
            Mesh3d(joint_mesh.clone()),
            MeshMaterial3d(joint_material.clone()),
            hidden,
            Visibility::Hidden,
        ));
    }
    for slot in 0..MAX_BONES {
        commands.spawn((
            BoneSegment { slot },
            Mesh3d(bone_mesh.clone()),
            MeshMaterial3d(bone_material.clone()),
            hidden,
            Visibility::Hidden,
        ));
    }
}

pub fn spawn_tool(
    mut commands: Commands,
    config: Res<ViewerConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let tool = &config.0.tool;
    let tool_materials = ToolMaterials {
        idle: materials.add(StandardMaterial {
            base_color: color_from_rgb(tool.idle_color),
            ..default()
        }),
        touching: materials.add(StandardMaterial {
            base_color: color_from_rgb(tool.touch_color),
            ..default()
        }),
    };

    let [x, y, z] = tool.position;
    commands.spawn((
        SurgicalTool,
        Mesh3d(meshes.add(Cylinder::new(tool.radius, tool.length))),
        MeshMaterial3d(tool_materials.idle.clone()),
        Transform::from_translation(vec3_from_point(&Point3f::new(x, y, z))),
    ));
    commands.insert_resource(tool_materials);
}

/// Orthographic camera looking down -Z
///
/// `zoom` pixels per scene unit, so the visible extent follows the window size.
pub fn spawn_camera(mut commands: Commands, config: Res<ViewerConfig>) {
    let scene = &config.0.scene;
    commands.spawn((
        Camera3d::default(),
        Projection::from(OrthographicProjection {
            scaling_mode: ScalingMode::WindowSize,
            scale: 1.0 / scene.zoom,
            ..OrthographicProjection::default_3d()
        }),
        Transform::from_xyz(0.0, 0.0, scene.camera_z).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(ClearColor(Color::BLACK));
}

pub fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

pub fn spawn_overlay(mut commands: Commands) {
    commands.spawn((
        StatusText,
        Text::new("Status: Initializing..."),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::WHITE),
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(20.0),
            left: Val::Px(20.0),
            max_width: Val::Px(420.0),
            padding: UiRect::all(Val::Px(10.0)),
            ..default()
        },
    ));
}
