// SPDX-License-Identifier: GPL-3.0-only

//! Camera session management
//!
//! [`CameraSession`] owns device selection, the capture lifecycle, flash
//! cycling, and the bounded readiness-retry machine in [`fsm`]. It never
//! talks to the permission layer directly; the coordinator samples the
//! permission snapshot and feeds readiness events in.

pub mod fsm;
pub mod types;

use crate::constants::{CAMERA_EXHAUSTED_MESSAGE, MAX_READINESS_RETRIES};
use crate::errors::CaptureError;
use crate::platform::CameraHardware;
use fsm::{Readiness, RetryState, SessionEffect, SessionEvent, SessionState, reduce};
use tracing::{debug, error, info, warn};
use types::{CameraDevice, CameraPosition, FlashMode, PhotoFile, PhotoOptions};

pub struct CameraSession<C: CameraHardware> {
    hardware: C,
    state: SessionState,
    retry: RetryState,
    position: CameraPosition,
    flash_mode: FlashMode,
    is_capturing: bool,
    camera_error: Option<String>,
    devices: Vec<CameraDevice>,
    device: Option<CameraDevice>,
}

impl<C: CameraHardware> CameraSession<C> {
    pub fn new(hardware: C) -> Self {
        Self::with_retry_max(hardware, MAX_READINESS_RETRIES)
    }

    /// Construct with a non-default retry budget
    pub fn with_retry_max(hardware: C, retry_max: u32) -> Self {
        let mut session = Self {
            hardware,
            state: SessionState::Idle,
            retry: RetryState::new(retry_max),
            position: CameraPosition::default(),
            flash_mode: FlashMode::default(),
            is_capturing: false,
            camera_error: None,
            devices: Vec::new(),
            device: None,
        };
        session.refresh_devices();
        session
    }

    /// Re-enumerate hardware and re-select the device for the current
    /// position. Returns `true` if the selected device changed.
    pub fn refresh_devices(&mut self) -> bool {
        self.devices = self.hardware.devices();
        let selected = self.select_device();
        let changed = selected != self.device;
        if changed {
            match &selected {
                Some(device) => info!(device = %device.name, position = %self.position, "Camera device selected"),
                None => warn!(position = %self.position, "No camera device for position"),
            }
        }
        self.device = selected;
        changed
    }

    fn select_device(&self) -> Option<CameraDevice> {
        self.devices
            .iter()
            .find(|device| device.position == self.position)
            .cloned()
    }

    pub fn device(&self) -> Option<&CameraDevice> {
        self.device.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_camera_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    pub fn is_capturing(&self) -> bool {
        self.is_capturing
    }

    /// True while a failed evaluation is cooling down before its re-check
    pub fn is_retrying(&self) -> bool {
        self.state == SessionState::Retrying
    }

    pub fn camera_position(&self) -> CameraPosition {
        self.position
    }

    pub fn flash_mode(&self) -> FlashMode {
        self.flash_mode
    }

    pub fn camera_error(&self) -> Option<&str> {
        self.camera_error.as_deref()
    }

    pub fn retry_count(&self) -> u32 {
        self.retry.count()
    }

    /// Build the readiness inputs from the sampled permission facts and
    /// the current device selection
    pub fn readiness(
        &self,
        has_permissions: bool,
        camera_granted: bool,
        location_granted: bool,
    ) -> Readiness {
        Readiness {
            has_permissions,
            camera_granted,
            location_granted,
            device_available: self.device.is_some(),
        }
    }

    /// Feed one event through the reducer, maintaining the error message
    /// alongside the state. Returns the effect for the driver to honor.
    pub fn handle_event(&mut self, event: SessionEvent) -> Option<SessionEffect> {
        let (next, effect) = reduce(self.state, &mut self.retry, event);
        if next != self.state {
            debug!(from = ?self.state, to = ?next, retries = self.retry.count(), "Session transition");
        }
        match next {
            SessionState::Ready => self.camera_error = None,
            SessionState::Error => {
                if self.state != SessionState::Error {
                    warn!(retries = self.retry.count(), "Camera readiness retries exhausted");
                }
                self.camera_error = Some(CAMERA_EXHAUSTED_MESSAGE.to_string());
            }
            _ => {}
        }
        self.state = next;
        effect
    }

    /// Explicit user-driven retry; clears the error banner and asks the
    /// driver for one more readiness pass without touching the counter
    pub fn retry_camera(&mut self) -> Option<SessionEffect> {
        self.camera_error = None;
        self.handle_event(SessionEvent::RetryRequested)
    }

    /// Capture one photo.
    ///
    /// A no-op returning `None` unless the session is `Ready` with a
    /// device selected. The caller's flash override merges over the
    /// session's current mode. Hardware failures never propagate: runtime
    /// camera errors and unexpected errors are logged (distinctly) and the
    /// capture yields `None`.
    pub async fn take_photo(&mut self, options: Option<PhotoOptions>) -> Option<PhotoFile> {
        if self.state != SessionState::Ready {
            debug!(state = ?self.state, "Ignoring capture while not ready");
            return None;
        }
        let Some(device) = self.device.clone() else {
            debug!("Ignoring capture with no device selected");
            return None;
        };

        let mut merged = options.unwrap_or_default();
        merged.flash = Some(merged.flash.unwrap_or(self.flash_mode));

        self.is_capturing = true;
        let result = self.hardware.take_photo(&device, &merged).await;
        self.is_capturing = false;

        match result {
            Ok(photo) => {
                info!(path = %photo.path.display(), "Photo captured");
                Some(photo)
            }
            Err(CaptureError::CameraRuntime(msg)) => {
                warn!(device = %device.name, error = %msg, "Camera runtime error during capture");
                None
            }
            Err(err) => {
                error!(device = %device.name, error = %err, "Unexpected capture failure");
                None
            }
        }
    }

    /// Toggle strictly between the two sensor positions and re-select the
    /// device. Returns `true` if a device exists for the new position.
    pub fn flip_camera(&mut self) -> bool {
        self.position = self.position.opposite();
        info!(position = %self.position, "Flipping camera");
        self.device = self.select_device();
        self.device.is_some()
    }

    /// Cycle the flash mode: Off -> On -> Auto -> Off
    pub fn toggle_flash_mode(&mut self) -> FlashMode {
        self.flash_mode = self.flash_mode.next();
        debug!(flash = %self.flash_mode, "Flash mode cycled");
        self.flash_mode
    }
}
