//! Camera device with no hardware behind it

use crate::backend::{CameraDevice, VideoStream};
use crate::capture::{CaptureEnvironment, CaptureError};
use async_trait::async_trait;
use handscene_core::CaptureConstraints;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

/// A camera whose environment and failures are set by the caller
///
/// Clones share failure settings and the live-stream count, so a test or a UI
/// can fix the device after handing a clone to a session. Opened streams
/// deliver the requested resolution and are ready as soon as they play.
#[derive(Debug, Clone, Default)]
pub struct VirtualCamera {
    environment: CaptureEnvironment,
    faults: Arc<Mutex<Faults>>,
    live_streams: Arc<AtomicUsize>,
}

#[derive(Debug, Default)]
struct Faults {
    open_error: Option<CaptureError>,
    block_autoplay: bool,
}

impl VirtualCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_environment(mut self, environment: CaptureEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Fail every open with `error`
    pub fn failing_with(self, error: CaptureError) -> Self {
        self.faults.lock().open_error = Some(error);
        self
    }

    /// Streams open but refuse to play
    pub fn with_autoplay_blocked(self) -> Self {
        self.faults.lock().block_autoplay = true;
        self
    }

    /// Clear configured failures, as if the user fixed the device
    pub fn clear_failure(&self) {
        let mut faults = self.faults.lock();
        faults.open_error = None;
        faults.block_autoplay = false;
    }

    /// Streams opened and not yet stopped
    pub fn live_streams(&self) -> usize {
        self.live_streams.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CameraDevice for VirtualCamera {
    fn environment(&self) -> CaptureEnvironment {
        self.environment.clone()
    }

    async fn open(&mut self, constraints: &CaptureConstraints) -> Result<Box<dyn VideoStream>, CaptureError> {
        let block_autoplay = {
            let faults = self.faults.lock();
            if let Some(error) = &faults.open_error {
                return Err(error.clone());
            }
            faults.block_autoplay
        };
        let mut stream = VirtualStream::new(constraints.ideal_width, constraints.ideal_height);
        stream.block_autoplay = block_autoplay;
        stream.live = Some(self.live_streams.clone());
        self.live_streams.fetch_add(1, Ordering::SeqCst);
        debug!(facing = ?constraints.facing_mode, "virtual camera opened");
        Ok(Box::new(stream))
    }
}

#[derive(Debug)]
pub struct VirtualStream {
    width: u32,
    height: u32,
    playing: bool,
    stopped: bool,
    block_autoplay: bool,
    live: Option<Arc<AtomicUsize>>,
}

impl VirtualStream {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            playing: false,
            stopped: false,
            block_autoplay: false,
            live: None,
        }
    }
}

#[async_trait]
impl VideoStream for VirtualStream {
    async fn play(&mut self) -> Result<(), CaptureError> {
        if self.block_autoplay {
            return Err(CaptureError::AutoplayBlocked);
        }
        self.playing = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.playing && !self.stopped
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.playing = false;
        if let Some(live) = &self.live {
            live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_play_stop() {
        let mut camera = VirtualCamera::new();
        let constraints = CaptureConstraints::default();

        let mut stream = pollster::block_on(camera.open(&constraints)).unwrap();
        assert_eq!(stream.resolution(), (1280, 720));
        assert!(!stream.is_ready());
        assert_eq!(camera.live_streams(), 1);

        pollster::block_on(stream.play()).unwrap();
        assert!(stream.is_ready());

        stream.stop();
        stream.stop();
        assert!(!stream.is_ready());
        assert_eq!(camera.live_streams(), 0);
    }

    #[test]
    fn test_configured_failures() {
        let mut camera = VirtualCamera::new().failing_with(CaptureError::DeviceBusy);
        let result = pollster::block_on(camera.open(&CaptureConstraints::default()));
        assert_eq!(result.err(), Some(CaptureError::DeviceBusy));

        camera.clone().clear_failure();
        assert!(pollster::block_on(camera.open(&CaptureConstraints::default())).is_ok());

        let mut camera = VirtualCamera::new().with_autoplay_blocked();
        let mut stream = pollster::block_on(camera.open(&CaptureConstraints::default())).unwrap();
        assert_eq!(pollster::block_on(stream.play()), Err(CaptureError::AutoplayBlocked));
    }
}
