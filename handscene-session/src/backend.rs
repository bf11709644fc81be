//! Interfaces to the hand tracker and the camera

use crate::capture::{CaptureEnvironment, CaptureError};
use crate::error::SessionResult;
use async_trait::async_trait;
use handscene_core::{CaptureConstraints, FrameLandmarks, TrackerOptions};

/// A loaded hand-landmark model running in video mode
pub trait HandLandmarker: Send {
    /// Detect hands in the stream's current frame
    ///
    /// Timestamps are in milliseconds and must not go backwards.
    fn detect_for_video(&mut self, stream: &dyn VideoStream, timestamp_ms: f64) -> SessionResult<FrameLandmarks>;

    /// Release the model. Further detection fails.
    fn close(&mut self);
}

/// Loads the tracker runtime and then the model
#[async_trait]
pub trait ModelLoader: Send {
    async fn load_runtime(&mut self) -> SessionResult<()>;

    async fn load_model(&mut self, options: &TrackerOptions) -> SessionResult<Box<dyn HandLandmarker>>;
}

/// A camera that can be opened into a video stream
#[async_trait]
pub trait CameraDevice: Send {
    fn environment(&self) -> CaptureEnvironment;

    async fn open(&mut self, constraints: &CaptureConstraints) -> Result<Box<dyn VideoStream>, CaptureError>;
}

/// An open camera stream
#[async_trait]
pub trait VideoStream: Send + Sync {
    /// Start playback; fails with [`CaptureError::AutoplayBlocked`] when refused
    async fn play(&mut self) -> Result<(), CaptureError>;

    /// Whether a decoded frame is available
    fn is_ready(&self) -> bool;

    /// Delivered frame size, which may differ from the requested one
    fn resolution(&self) -> (u32, u32);

    /// Stop every track. Idempotent.
    fn stop(&mut self);
}
