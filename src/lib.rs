// SPDX-License-Identifier: GPL-3.0-only

//! Fieldcam capability and camera-session core
//!
//! This library decides when the camera of the Fieldcam wildlife
//! reporting app is usable. It reconciles OS permission state across
//! platforms and API levels, prompts for what can still be prompted,
//! and drives a bounded retry state machine for camera readiness.
//!
//! # Architecture
//!
//! - [`permissions`]: type resolution, checking, requesting, and the
//!   committed readiness snapshot
//! - [`camera`]: camera session manager and its retry state machine
//! - [`coordinator`]: wires snapshot changes into session events and
//!   owns the retry cool-down clock
//! - [`lifecycle`]: foreground-transition trigger for re-checks
//! - [`platform`]: host traits the OS layers implement
//!
//! Screens, navigation, and network repositories live outside this
//! crate; they consume the snapshot and session state exposed here.

pub mod camera;
pub mod config;
pub mod constants;
pub mod coordinator;
pub mod errors;
pub mod lifecycle;
pub mod permissions;
pub mod platform;

// Re-export commonly used types
pub use camera::CameraSession;
pub use camera::fsm::{Readiness, SessionState};
pub use camera::types::{CameraDevice, CameraPosition, FlashMode, PhotoFile, PhotoOptions};
pub use config::OrchestratorConfig;
pub use coordinator::CaptureCoordinator;
pub use errors::CaptureError;
pub use lifecycle::{AppState, LifecycleWatcher};
pub use permissions::PermissionOrchestrator;
pub use permissions::types::{PermissionStatus, PermissionSummary, PermissionType};
pub use platform::{CameraHardware, PermissionHost, Platform};
