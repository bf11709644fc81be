//! # handscene Algorithms
//!
//! Per-frame geometry for hand-tracked scenes: laying out joint markers and
//! bone segments for the tracked hands, and deciding whether an index
//! fingertip touches the interaction object.

pub mod skeleton;
pub mod interaction;

// Re-export commonly used items
pub use skeleton::*;
pub use interaction::*;
