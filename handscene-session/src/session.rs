//! Tracker and camera lifecycle
//!
//! A [`Session`] runs the setup sequence once (runtime, model, camera), then
//! turns each [`Session::tick`] into one detection whose result replaces the
//! contents of the shared [`LatestLandmarks`] slot. Setup failures end up in the
//! status line; a failed camera step can be retried without reloading the model.

use crate::backend::{CameraDevice, HandLandmarker, ModelLoader, VideoStream};
use crate::capture::CaptureError;
use crate::error::{SessionError, SessionResult};
use crate::status::{Status, StatusReporter};
use handscene_core::{CaptureConstraints, LatestLandmarks, TrackerOptions};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    LoadingRuntime,
    LoadingModel,
    RequestingCamera,
    Active,
    Failed,
    Stopped,
}

/// Shared cancellation flag
///
/// Setup steps check it after every await; whatever a step acquired after the
/// flag was raised is released before the step returns.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct Session {
    loader: Box<dyn ModelLoader>,
    camera: Box<dyn CameraDevice>,
    options: TrackerOptions,
    constraints: CaptureConstraints,
    landmarker: Option<Box<dyn HandLandmarker>>,
    stream: Option<Box<dyn VideoStream>>,
    phase: SessionPhase,
    status: StatusReporter,
    capture_error: Option<CaptureError>,
    slot: LatestLandmarks,
    cancel: CancelToken,
}

impl Session {
    pub fn new(loader: Box<dyn ModelLoader>, camera: Box<dyn CameraDevice>, slot: LatestLandmarks) -> Self {
        Self {
            loader,
            camera,
            options: TrackerOptions::default(),
            constraints: CaptureConstraints::default(),
            landmarker: None,
            stream: None,
            phase: SessionPhase::Idle,
            status: StatusReporter::new(),
            capture_error: None,
            slot,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_options(mut self, options: TrackerOptions) -> Self {
        self.options = options;
        self
    }

    /// Share an existing cancellation flag
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_constraints(mut self, constraints: CaptureConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn status(&self) -> &StatusReporter {
        &self.status
    }

    /// The most recent capture failure, cleared when the camera step reruns
    pub fn capture_error(&self) -> Option<&CaptureError> {
        self.capture_error.as_ref()
    }

    /// Help for the most recent capture failure, given the camera's environment
    pub fn capture_help(&self) -> Option<String> {
        let environment = self.camera.environment();
        self.capture_error
            .as_ref()
            .map(|error| error.help_text_in(&environment))
    }

    /// Whether the UI should offer a "start camera" button
    pub fn offers_retry(&self) -> bool {
        self.phase == SessionPhase::Failed
            && self.landmarker.is_some()
            && self.capture_error.as_ref().is_some_and(CaptureError::offers_retry)
    }

    pub fn landmarks(&self) -> LatestLandmarks {
        self.slot.clone()
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Load the runtime and the model, then open the camera
    pub async fn start(&mut self) -> SessionResult<()> {
        self.enter(SessionPhase::LoadingRuntime, Status::LoadingRuntime);
        if let Err(e) = self.loader.load_runtime().await {
            return Err(self.fail_init(e));
        }
        self.check_cancelled()?;

        self.enter(SessionPhase::LoadingModel, Status::LoadingModel);
        let mut landmarker = match self.loader.load_model(&self.options).await {
            Ok(landmarker) => landmarker,
            Err(e) => return Err(self.fail_init(e)),
        };
        if self.cancel.is_cancelled() {
            landmarker.close();
            return Err(SessionError::Cancelled);
        }
        info!(
            num_hands = self.options.num_hands,
            delegate = ?self.options.delegate,
            "hand model loaded"
        );
        self.landmarker = Some(landmarker);

        self.open_camera().await
    }

    /// Rerun the camera step after a capture failure
    pub async fn retry_camera(&mut self) -> SessionResult<()> {
        if self.landmarker.is_none() {
            return Err(SessionError::ModelLoad("model not loaded".to_string()));
        }
        self.check_cancelled()?;
        info!("retrying camera");
        self.open_camera().await
    }

    async fn open_camera(&mut self) -> SessionResult<()> {
        self.enter(SessionPhase::RequestingCamera, Status::RequestingCamera);
        self.capture_error = None;
        self.release_stream();

        if let Err(e) = self.camera.environment().check() {
            return Err(self.fail_capture(e));
        }

        let mut stream = match self.camera.open(&self.constraints).await {
            Ok(stream) => stream,
            Err(e) => return Err(self.fail_capture(e)),
        };
        if self.cancel.is_cancelled() {
            stream.stop();
            return Err(SessionError::Cancelled);
        }

        if let Err(e) = stream.play().await {
            stream.stop();
            return Err(self.fail_capture(e));
        }
        if self.cancel.is_cancelled() {
            stream.stop();
            return Err(SessionError::Cancelled);
        }

        let (width, height) = stream.resolution();
        info!(width, height, "camera stream opened");
        self.stream = Some(stream);
        self.enter(SessionPhase::Active, Status::CameraActive);
        Ok(())
    }

    /// Run one detection and publish the result
    ///
    /// Returns the number of hands found, or `None` when nothing ran or
    /// detection failed. A failed detection leaves the slot unchanged.
    pub fn tick(&mut self, now_ms: f64) -> Option<usize> {
        if self.phase != SessionPhase::Active || self.cancel.is_cancelled() {
            return None;
        }
        let (Some(landmarker), Some(stream)) = (self.landmarker.as_mut(), self.stream.as_deref()) else {
            return None;
        };
        if !stream.is_ready() {
            return None;
        }

        match landmarker.detect_for_video(stream, now_ms) {
            Ok(frame) => {
                let hands = frame.len();
                self.slot.publish(frame);
                // No hands keeps the previous message to avoid flicker
                if hands > 0 {
                    self.status.update(Status::Tracking(hands));
                }
                Some(hands)
            }
            Err(e) => {
                warn!(error = %e, timestamp_ms = now_ms, "hand detection failed");
                None
            }
        }
    }

    /// Cancel any setup in flight and release the model and the camera
    pub fn stop(&mut self) {
        if self.phase == SessionPhase::Stopped {
            return;
        }
        self.cancel.cancel();
        if let Some(mut landmarker) = self.landmarker.take() {
            landmarker.close();
        }
        self.release_stream();
        self.phase = SessionPhase::Stopped;
        info!("session stopped");
    }

    fn enter(&mut self, phase: SessionPhase, status: Status) {
        debug!(?phase, "session phase");
        self.phase = phase;
        self.status.update(status);
    }

    fn check_cancelled(&self) -> SessionResult<()> {
        if self.cancel.is_cancelled() {
            Err(SessionError::Cancelled)
        } else {
            Ok(())
        }
    }

    fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
    }

    fn fail_init(&mut self, error: SessionError) -> SessionError {
        warn!(error = %error, "tracker setup failed");
        let message = match &error {
            SessionError::ModelLoad(m) | SessionError::Runtime(m) => m.clone(),
            other => other.to_string(),
        };
        self.phase = SessionPhase::Failed;
        self.status.update(Status::InitError(message));
        error
    }

    fn fail_capture(&mut self, error: CaptureError) -> SessionError {
        warn!(error = %error, "camera setup failed");
        self.phase = SessionPhase::Failed;
        self.status.update(Status::CameraError(error.label().to_string()));
        self.capture_error = Some(error.clone());
        SessionError::Capture(error)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}
