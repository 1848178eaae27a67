// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the capability and camera core
//!
//! None of these escape the orchestrator's public surface: OS failures are
//! normalized into status values, booleans, or `None` results, and errors
//! only travel between the host traits and the components that log them.

use std::fmt;

/// Photo capture errors surfaced by the camera hardware
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The camera runtime rejected or aborted the capture
    /// (session torn down, device wedged, hardware in use)
    CameraRuntime(String),
    /// Capture was attempted with no usable device selected
    NoDevice,
    /// Anything else the hardware layer reports
    Unexpected(String),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::CameraRuntime(msg) => write!(f, "Camera runtime error: {}", msg),
            CaptureError::NoDevice => write!(f, "No camera device selected"),
            CaptureError::Unexpected(msg) => write!(f, "Capture failed: {}", msg),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<String> for CaptureError {
    fn from(msg: String) -> Self {
        CaptureError::Unexpected(msg)
    }
}

impl From<&str> for CaptureError {
    fn from(msg: &str) -> Self {
        CaptureError::Unexpected(msg.to_string())
    }
}
