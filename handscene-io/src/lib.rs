//! I/O for handscene
//!
//! This crate reads and writes recorded landmark frames, provides a scripted
//! landmark source for running without a tracker, and loads TOML configuration.

pub mod replay;
pub mod synthetic;
pub mod config;

pub use replay::{Recording, RecordedFrame};
pub use synthetic::{open_hand, ScriptedHand};
pub use config::{load_config, load_config_or_default, parse_config};

use handscene_core::FrameLandmarks;

/// A landmark source indexed by playback time
pub trait LandmarkTimeline: Send {
    /// The frame visible `elapsed_ms` after playback started
    fn frame_at(&self, elapsed_ms: f64) -> FrameLandmarks;
}
