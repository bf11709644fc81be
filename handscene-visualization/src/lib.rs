//! Visualization for handscene
//!
//! A Bevy viewer that draws up to two tracked hands as joint spheres and bone
//! cylinders over an orthographic scene, and a cylinder tool that changes
//! colour and spins while an index fingertip touches it:
//! - Fixed pools of joint and bone entities, hidden when unused
//! - Per-frame touch evaluation against the tool
//! - Status overlay with camera help and retry

pub mod convert;
pub mod components;
pub mod resources;
pub mod scene;
pub mod systems;
pub mod plugin;

pub use components::*;
pub use resources::*;
pub use systems::{overlay_text, HandsceneSet};
pub use plugin::*;
