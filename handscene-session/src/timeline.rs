//! Tracker backend that plays back a landmark timeline instead of running a model

use crate::backend::{HandLandmarker, ModelLoader, VideoStream};
use crate::error::{SessionError, SessionResult};
use async_trait::async_trait;
use handscene_core::{FrameLandmarks, TrackerOptions};
use handscene_io::LandmarkTimeline;
use tracing::info;

/// Serves frames from a [`LandmarkTimeline`]
///
/// Playback time starts at the first detection's timestamp. Only the first
/// `num_hands` hands of each frame are returned.
pub struct TimelineLandmarker {
    timeline: Box<dyn LandmarkTimeline>,
    num_hands: usize,
    origin_ms: Option<f64>,
    last_ms: f64,
    closed: bool,
}

impl TimelineLandmarker {
    pub fn new(timeline: Box<dyn LandmarkTimeline>, num_hands: usize) -> Self {
        Self {
            timeline,
            num_hands,
            origin_ms: None,
            last_ms: f64::NEG_INFINITY,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl HandLandmarker for TimelineLandmarker {
    fn detect_for_video(&mut self, _stream: &dyn VideoStream, timestamp_ms: f64) -> SessionResult<FrameLandmarks> {
        if self.closed {
            return Err(SessionError::Detection("landmarker is closed".to_string()));
        }
        if timestamp_ms < self.last_ms {
            return Err(SessionError::Detection(format!(
                "timestamp {} ms is earlier than the previous {} ms",
                timestamp_ms, self.last_ms
            )));
        }
        self.last_ms = timestamp_ms;

        let origin = *self.origin_ms.get_or_insert(timestamp_ms);
        let frame = self.timeline.frame_at(timestamp_ms - origin);
        if frame.len() > self.num_hands {
            let hands = frame.hands()[..self.num_hands].to_vec();
            return Ok(FrameLandmarks::from_hands(hands));
        }
        Ok(frame)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Model loader that hands out a [`TimelineLandmarker`]
///
/// The timeline is moved into the landmarker, so the model can be loaded once.
pub struct TimelineLoader {
    timeline: Option<Box<dyn LandmarkTimeline>>,
    runtime_loaded: bool,
}

impl TimelineLoader {
    pub fn new(timeline: Box<dyn LandmarkTimeline>) -> Self {
        Self {
            timeline: Some(timeline),
            runtime_loaded: false,
        }
    }
}

#[async_trait]
impl ModelLoader for TimelineLoader {
    async fn load_runtime(&mut self) -> SessionResult<()> {
        self.runtime_loaded = true;
        Ok(())
    }

    async fn load_model(&mut self, options: &TrackerOptions) -> SessionResult<Box<dyn HandLandmarker>> {
        if !self.runtime_loaded {
            return Err(SessionError::Runtime("runtime not loaded".to_string()));
        }
        let timeline = self
            .timeline
            .take()
            .ok_or_else(|| SessionError::ModelLoad("timeline already in use".to_string()))?;
        info!(num_hands = options.num_hands, "using landmark timeline as hand model");
        Ok(Box::new(TimelineLandmarker::new(timeline, options.num_hands)))
    }
}
