//! Human-readable session status

use std::fmt;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Initializing,
    LoadingRuntime,
    LoadingModel,
    RequestingCamera,
    CameraActive,
    Tracking(usize),
    /// Carries the capture error label
    CameraError(String),
    /// Carries the runtime or model error message
    InitError(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Initializing => write!(f, "Initializing..."),
            Status::LoadingRuntime => write!(f, "Loading tracker runtime..."),
            Status::LoadingModel => write!(f, "Loading hand model..."),
            Status::RequestingCamera => write!(f, "Model Ready. Requesting Camera..."),
            Status::CameraActive => write!(f, "Camera Active. Processing..."),
            Status::Tracking(n) => write!(f, "Tracking {} Hand(s)", n),
            Status::CameraError(label) => write!(f, "Camera Error: {}", label),
            Status::InitError(message) => write!(f, "AI Init Error: {}", message),
        }
    }
}

/// Keeps the current status and reports only changes
#[derive(Debug, Clone)]
pub struct StatusReporter {
    current: Status,
    changes: u64,
}

impl StatusReporter {
    pub fn new() -> Self {
        Self {
            current: Status::Initializing,
            changes: 0,
        }
    }

    /// Set the status, returning whether its message changed
    pub fn update(&mut self, status: Status) -> bool {
        if status.to_string() == self.current.to_string() {
            return false;
        }
        info!(status = %status, "status update");
        self.current = status;
        self.changes += 1;
        true
    }

    pub fn current(&self) -> &Status {
        &self.current
    }

    pub fn message(&self) -> String {
        self.current.to_string()
    }

    /// Number of distinct updates since creation
    pub fn changes(&self) -> u64 {
        self.changes
    }
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new()
    }
}
