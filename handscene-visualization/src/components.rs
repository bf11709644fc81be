//! ECS components linking entities to skeleton slots and scene objects

use bevy::prelude::*;

/// Sphere drawn at one joint slot
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointMarker {
    pub slot: usize,
}

/// Cylinder drawn along one bone slot
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoneSegment {
    pub slot: usize,
}

/// The touchable tool
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct SurgicalTool;

/// Overlay text showing session status and camera help
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct StatusText;
