//! Error types for the tracking session

use crate::capture::CaptureError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Camera error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Failed to load hand model: {0}")]
    ModelLoad(String),

    #[error("Failed to load tracker runtime: {0}")]
    Runtime(String),

    #[error("Session cancelled")]
    Cancelled,

    #[error("Detection failed: {0}")]
    Detection(String),
}

/// Result type alias for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;
