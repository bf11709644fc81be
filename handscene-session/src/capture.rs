//! Camera capture failures and the environment checks that precede capture
//!
//! Capture backends report failures by platform error name. [`CaptureError::from_platform_name`]
//! folds those names into a small set of categories, each with a short label for the
//! status line, help text for the user, and whether retrying from a button makes sense.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Capture needs a secure origin (HTTPS or localhost)
    #[error("camera requires a secure context, current origin is {origin}")]
    InsecureContext { origin: String },

    /// The platform has no media capture API
    #[error("media capture API not available")]
    Unsupported,

    #[error("camera permission denied")]
    PermissionDenied,

    #[error("no camera device found")]
    NoDevice,

    #[error("camera is already in use")]
    DeviceBusy,

    #[error("security error accessing camera")]
    Security,

    /// The stream opened but refused to start playing
    #[error("video playback was blocked")]
    AutoplayBlocked,

    #[error("{name}: {message}")]
    Other { name: String, message: String },
}

impl CaptureError {
    /// Classify a platform capture error by its name
    pub fn from_platform_name(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" => Self::PermissionDenied,
            "NotFoundError" | "DevicesNotFoundError" => Self::NoDevice,
            "NotReadableError" | "TrackStartError" => Self::DeviceBusy,
            "SecurityError" => Self::Security,
            "" => Self::Other {
                name: "CameraError".to_string(),
                message: message.to_string(),
            },
            _ => Self::Other {
                name: name.to_string(),
                message: message.to_string(),
            },
        }
    }

    /// Short form shown after `Camera Error: ` in the status line
    pub fn label(&self) -> &str {
        match self {
            Self::InsecureContext { .. } => "insecure context",
            Self::Unsupported => "unsupported browser",
            Self::PermissionDenied => "NotAllowedError",
            Self::NoDevice => "NotFoundError",
            Self::DeviceBusy => "NotReadableError",
            Self::Security => "SecurityError",
            Self::AutoplayBlocked => "autoplay blocked",
            Self::Other { name, .. } => name,
        }
    }

    /// What the user can do about it
    pub fn help_text(&self) -> String {
        match self {
            Self::InsecureContext { origin } => format!(
                "Camera requires a secure context (HTTPS). Current origin is {}. \
                 Serve the app over HTTPS or from localhost.",
                origin
            ),
            Self::Unsupported => "Media capture API (getUserMedia) not available.".to_string(),
            Self::PermissionDenied => "Permission denied. Allow camera access in the permission \
                                       prompt or settings, then start the camera again."
                .to_string(),
            Self::NoDevice => "No camera device found.".to_string(),
            Self::DeviceBusy => "Camera is already in use by another app or tab.".to_string(),
            Self::Security => "Security error accessing camera.".to_string(),
            Self::AutoplayBlocked => "Video autoplay was blocked. Start the camera to begin.".to_string(),
            Self::Other { message, .. } => message.clone(),
        }
    }

    /// Help text given where the failure happened
    ///
    /// Outside a secure context, a denied permission or a security error is
    /// explained by the origin rather than by the prompt.
    pub fn help_text_in(&self, environment: &CaptureEnvironment) -> String {
        match self {
            Self::PermissionDenied | Self::Security if !environment.secure_context => {
                Self::InsecureContext {
                    origin: environment.origin.clone(),
                }
                .help_text()
            }
            _ => self.help_text(),
        }
    }

    /// Whether a manual "start camera" retry is offered
    ///
    /// Retrying cannot fix an insecure origin or a missing API.
    pub fn offers_retry(&self) -> bool {
        !matches!(self, Self::InsecureContext { .. } | Self::Unsupported)
    }
}

/// What the host offers before any device is opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureEnvironment {
    pub secure_context: bool,
    pub media_api_available: bool,
    pub origin: String,
}

impl CaptureEnvironment {
    /// A secure host with a capture API
    pub fn secure(origin: impl Into<String>) -> Self {
        Self {
            secure_context: true,
            media_api_available: true,
            origin: origin.into(),
        }
    }

    /// Check preconditions in the order the host would fail them
    pub fn check(&self) -> Result<(), CaptureError> {
        if !self.secure_context {
            return Err(CaptureError::InsecureContext {
                origin: self.origin.clone(),
            });
        }
        if !self.media_api_available {
            return Err(CaptureError::Unsupported);
        }
        Ok(())
    }
}

impl Default for CaptureEnvironment {
    fn default() -> Self {
        Self::secure("http://localhost")
    }
}
