//! Configuration types
//!
//! Every field has a default, so an empty document (or no document at all)
//! describes the stock scene. Loading from disk lives in `handscene-io`.

use crate::error::{Error, Result};
use crate::mapping::DEFAULT_DEPTH_SCALE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB colour written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to `[0, 1]`
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6)
            .ok_or_else(|| Error::Config(format!("colour {:?} is not of the form #RRGGBB", s)))?;
        // from_str_radix alone would accept a sign
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::Config(format!("colour {:?} has a non-hex digit", s)));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| Error::Config(format!("colour {:?} has a non-hex digit", s)))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HandsceneConfig {
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub skeleton: SkeletonStyle,
    #[serde(default)]
    pub tool: ToolConfig,
    #[serde(default)]
    pub tracker: TrackerOptions,
    #[serde(default)]
    pub capture: CaptureConstraints,
}

impl HandsceneConfig {
    /// Reject values that would make the scene degenerate
    pub fn validate(&self) -> Result<()> {
        if self.scene.zoom <= 0.0 {
            return Err(Error::Config("scene.zoom must be positive".to_string()));
        }
        if self.scene.window_width == 0 || self.scene.window_height == 0 {
            return Err(Error::Config("scene window size must be non-zero".to_string()));
        }
        if self.tool.touch_radius <= 0.0 {
            return Err(Error::Config("tool.touch_radius must be positive".to_string()));
        }
        if self.tracker.num_hands == 0 || self.tracker.num_hands > crate::MAX_HANDS {
            return Err(Error::Config(format!(
                "tracker.num_hands must be between 1 and {}",
                crate::MAX_HANDS
            )));
        }
        for (name, value) in [
            ("min_hand_detection_confidence", self.tracker.min_hand_detection_confidence),
            ("min_hand_presence_confidence", self.tracker.min_hand_presence_confidence),
            ("min_tracking_confidence", self.tracker.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!("tracker.{} must be in [0, 1]", name)));
            }
        }
        Ok(())
    }
}

/// Camera and mapping parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Depth exaggeration applied to landmark `z`
    #[serde(default = "default_depth_scale")]
    pub depth_scale: f32,
    /// Pixels per scene unit of the orthographic camera
    #[serde(default = "default_zoom")]
    pub zoom: f32,
    /// Camera distance from the origin along +Z
    #[serde(default = "default_camera_z")]
    pub camera_z: f32,
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

fn default_depth_scale() -> f32 { DEFAULT_DEPTH_SCALE }
fn default_zoom() -> f32 { 50.0 }
fn default_camera_z() -> f32 { 10.0 }
fn default_window_width() -> u32 { 1280 }
fn default_window_height() -> u32 { 720 }

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            depth_scale: default_depth_scale(),
            zoom: default_zoom(),
            camera_z: default_camera_z(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

/// Look of the joint markers and bone segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonStyle {
    #[serde(default = "default_joint_radius")]
    pub joint_radius: f32,
    #[serde(default = "default_bone_radius")]
    pub bone_radius: f32,
    #[serde(default = "default_joint_color")]
    pub joint_color: Rgb,
    #[serde(default = "default_bone_color")]
    pub bone_color: Rgb,
}

fn default_joint_radius() -> f32 { 0.6 }
fn default_bone_radius() -> f32 { 0.25 }
fn default_joint_color() -> Rgb { Rgb::new(0xFF, 0x2D, 0x55) }
fn default_bone_color() -> Rgb { Rgb::new(0xFF, 0xFF, 0xFF) }

impl Default for SkeletonStyle {
    fn default() -> Self {
        Self {
            joint_radius: default_joint_radius(),
            bone_radius: default_bone_radius(),
            joint_color: default_joint_color(),
            bone_color: default_bone_color(),
        }
    }
}

/// The touchable tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub position: [f32; 3],
    /// Fingertip distance below which the tool counts as touched
    #[serde(default = "default_touch_radius")]
    pub touch_radius: f32,
    /// Rotation added about X and Y on every touching frame, in radians
    #[serde(default = "default_spin_step")]
    pub spin_step: f32,
    #[serde(default = "default_tool_radius")]
    pub radius: f32,
    #[serde(default = "default_tool_length")]
    pub length: f32,
    #[serde(default = "default_idle_color")]
    pub idle_color: Rgb,
    #[serde(default = "default_touch_color")]
    pub touch_color: Rgb,
}

fn default_touch_radius() -> f32 { 1.5 }
fn default_spin_step() -> f32 { 0.05 }
fn default_tool_radius() -> f32 { 0.2 }
fn default_tool_length() -> f32 { 3.0 }
fn default_idle_color() -> Rgb { Rgb::new(0x00, 0xFF, 0xFF) }
fn default_touch_color() -> Rgb { Rgb::new(0xFF, 0x69, 0xB4) }

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            touch_radius: default_touch_radius(),
            spin_step: default_spin_step(),
            radius: default_tool_radius(),
            length: default_tool_length(),
            idle_color: default_idle_color(),
            touch_color: default_touch_color(),
        }
    }
}

/// Where the hand model runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delegate {
    #[default]
    Cpu,
    Gpu,
}

/// Whether frames are independent images or a timestamped video sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunningMode {
    Image,
    #[default]
    Video,
}

/// Options handed to the hand-landmark model at load time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerOptions {
    #[serde(default = "default_model_asset_path")]
    pub model_asset_path: String,
    #[serde(default)]
    pub delegate: Delegate,
    #[serde(default)]
    pub running_mode: RunningMode,
    #[serde(default = "default_num_hands")]
    pub num_hands: usize,
    #[serde(default = "default_confidence")]
    pub min_hand_detection_confidence: f32,
    #[serde(default = "default_confidence")]
    pub min_hand_presence_confidence: f32,
    #[serde(default = "default_confidence")]
    pub min_tracking_confidence: f32,
}

fn default_model_asset_path() -> String {
    "https://storage.googleapis.com/mediapipe-models/hand_landmarker/hand_landmarker/float16/1/hand_landmarker.task".to_string()
}
fn default_num_hands() -> usize { crate::MAX_HANDS }
fn default_confidence() -> f32 { 0.5 }

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            model_asset_path: default_model_asset_path(),
            delegate: Delegate::default(),
            running_mode: RunningMode::default(),
            num_hands: default_num_hands(),
            min_hand_detection_confidence: default_confidence(),
            min_hand_presence_confidence: default_confidence(),
            min_tracking_confidence: default_confidence(),
        }
    }
}

/// Which way the requested camera faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacingMode {
    #[default]
    User,
    Environment,
}

/// Preferred capture format; devices may deliver something else
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConstraints {
    #[serde(default = "default_ideal_width")]
    pub ideal_width: u32,
    #[serde(default = "default_ideal_height")]
    pub ideal_height: u32,
    #[serde(default)]
    pub facing_mode: FacingMode,
}

fn default_ideal_width() -> u32 { 1280 }
fn default_ideal_height() -> u32 { 720 }

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            ideal_width: default_ideal_width(),
            ideal_height: default_ideal_height(),
            facing_mode: FacingMode::default(),
        }
    }
}
