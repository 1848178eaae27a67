// SPDX-License-Identifier: GPL-3.0-only

//! Simulated desktop host
//!
//! Backs the `fieldcam` CLI (and doubles as a reference host
//! implementation): permission state comes from a scripted table instead
//! of a mobile OS, and the settings deep-links open the desktop settings
//! surface where one exists.

use super::{CameraAuthorization, CameraHardware, PermissionHost, Platform};
use crate::camera::types::{CameraDevice, CameraPosition, PhotoFile, PhotoOptions};
use crate::errors::CaptureError;
use crate::permissions::types::{PermissionKey, PermissionStatus};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// Scripted permission host for desktop runs.
///
/// Keys absent from the table report `Granted`; `request` answers from
/// the same table (the simulator has no user to prompt).
pub struct DesktopHost {
    statuses: HashMap<PermissionKey, PermissionStatus>,
    camera: CameraAuthorization,
    all_files: bool,
}

impl Default for DesktopHost {
    fn default() -> Self {
        Self {
            statuses: HashMap::new(),
            camera: CameraAuthorization::Granted,
            all_files: true,
        }
    }
}

impl DesktopHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script one key's status
    pub fn with_status(mut self, key: PermissionKey, status: PermissionStatus) -> Self {
        self.statuses.insert(key, status);
        self
    }

    /// Script the camera capability result
    pub fn with_camera(mut self, authorization: CameraAuthorization) -> Self {
        self.camera = authorization;
        self
    }
}

impl PermissionHost for DesktopHost {
    fn platform(&self) -> Platform {
        Platform::Desktop
    }

    fn api_level(&self) -> u32 {
        0
    }

    async fn check(&self, key: PermissionKey) -> PermissionStatus {
        self.statuses
            .get(&key)
            .copied()
            .unwrap_or(PermissionStatus::Granted)
    }

    async fn request(&self, key: PermissionKey) -> PermissionStatus {
        // No prompt to show; the scripted status is the outcome
        self.check(key).await
    }

    async fn camera_authorization(&self) -> CameraAuthorization {
        self.camera
    }

    async fn request_camera(&self) -> CameraAuthorization {
        self.camera
    }

    async fn has_all_files_access(&self) -> bool {
        self.all_files
    }

    fn open_all_files_settings(&self) {
        // No such screen on desktop; the app settings page is the
        // closest surface
        self.open_app_settings();
    }

    fn open_app_settings(&self) {
        let target = if cfg!(target_os = "macos") {
            Some("x-apple.systempreferences:com.apple.preference.security?Privacy_Camera")
        } else if cfg!(target_os = "windows") {
            Some("ms-settings:privacy-webcam")
        } else {
            None
        };
        match target {
            Some(uri) => {
                info!(uri, "Opening system settings");
                if let Err(e) = open::that_detached(uri) {
                    warn!(error = %e, "Failed to open system settings");
                }
            }
            None => warn!("No settings deep-link on this desktop platform"),
        }
    }
}

/// Simulated camera hardware with one device per position
pub struct DesktopCamera {
    devices: Vec<CameraDevice>,
}

impl Default for DesktopCamera {
    fn default() -> Self {
        Self {
            devices: vec![
                CameraDevice {
                    id: "sim-back".to_string(),
                    name: "Simulated back camera".to_string(),
                    position: CameraPosition::Back,
                },
                CameraDevice {
                    id: "sim-front".to_string(),
                    name: "Simulated front camera".to_string(),
                    position: CameraPosition::Front,
                },
            ],
        }
    }
}

impl DesktopCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a device list (possibly empty)
    pub fn with_devices(devices: Vec<CameraDevice>) -> Self {
        Self { devices }
    }
}

impl CameraHardware for DesktopCamera {
    fn devices(&self) -> Vec<CameraDevice> {
        self.devices.clone()
    }

    async fn take_photo(
        &self,
        device: &CameraDevice,
        options: &PhotoOptions,
    ) -> Result<PhotoFile, CaptureError> {
        info!(device = %device.name, flash = ?options.flash, "Simulated capture");
        Ok(PhotoFile {
            path: PathBuf::from(format!("/tmp/fieldcam-{}.jpg", device.id)),
            width: 4000,
            height: 3000,
        })
    }
}
