//! Tracking session for handscene
//!
//! This crate drives the hand tracker and the camera: the one-shot setup
//! sequence, capture error classification, the status line, and per-frame
//! detection into the shared latest-landmarks slot.
//!
//! Real inference and capture backends plug in through [`ModelLoader`],
//! [`HandLandmarker`] and [`CameraDevice`]. The crate ships a timeline-backed
//! landmarker and a virtual camera for running without either.

pub mod error;
pub mod capture;
pub mod status;
pub mod backend;
pub mod session;
pub mod timeline;
pub mod virtual_camera;

pub use error::*;
pub use capture::*;
pub use status::*;
pub use backend::*;
pub use session::*;
pub use timeline::*;
pub use virtual_camera::*;
