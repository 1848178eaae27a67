// SPDX-License-Identifier: GPL-3.0-only

//! Host platform abstraction
//!
//! The orchestrator talks to the OS exclusively through the traits in this
//! module, so the same state machines run unchanged against Android, iOS,
//! or the simulated desktop host used by the CLI and the test suite.

pub mod desktop;

use crate::camera::types::{CameraDevice, PhotoFile, PhotoOptions};
use crate::errors::CaptureError;
use crate::permissions::types::{PermissionKey, PermissionStatus};

/// Operating system family the process runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Ios,
    /// Desktop/simulated environments; permission semantics follow iOS
    /// (no all-files concept, single gallery key)
    Desktop,
}

impl Platform {
    pub fn is_android(self) -> bool {
        matches!(self, Platform::Android)
    }
}

/// Native camera authorization result
///
/// The camera capability API is richer than the generic permission check:
/// it distinguishes "never asked" from "refused" and has a parental-control
/// style `Restricted` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraAuthorization {
    Granted,
    Denied,
    NotDetermined,
    Restricted,
}

impl CameraAuthorization {
    /// Fold the four-valued native result onto the permission model.
    /// `Restricted` cannot be prompted away, so it maps to `Blocked`;
    /// `NotDetermined` is promptable and maps to `Denied`.
    pub fn as_status(self) -> PermissionStatus {
        match self {
            CameraAuthorization::Granted => PermissionStatus::Granted,
            CameraAuthorization::Denied => PermissionStatus::Denied,
            CameraAuthorization::NotDetermined => PermissionStatus::Denied,
            CameraAuthorization::Restricted => PermissionStatus::Blocked,
        }
    }
}

/// OS permission primitives plus the dedicated capability APIs
///
/// All query methods are infallible by contract: the OS reports a status
/// for every key, never an error. Cancellation is not supported by the
/// underlying primitives, so none of these futures are cancelled mid-call.
pub trait PermissionHost {
    /// Platform family, fixed for the process lifetime
    fn platform(&self) -> Platform;

    /// OS API level (Android SDK int; 0 where the concept does not apply)
    fn api_level(&self) -> u32;

    /// Query the current status of one concrete key
    async fn check(&self, key: PermissionKey) -> PermissionStatus;

    /// Prompt the user for one concrete key and return the resulting status
    async fn request(&self, key: PermissionKey) -> PermissionStatus;

    /// Dedicated camera capability query
    async fn camera_authorization(&self) -> CameraAuthorization;

    /// Dedicated camera prompt
    async fn request_camera(&self) -> CameraAuthorization;

    /// Android all-files access capability query; callers must treat
    /// non-Android platforms as trivially granted
    async fn has_all_files_access(&self) -> bool;

    /// Deep-link to the all-files access screen of the Settings app
    fn open_all_files_settings(&self);

    /// Deep-link to this app's page in the Settings app
    fn open_app_settings(&self);
}

/// Camera hardware primitives
pub trait CameraHardware {
    /// Enumerate currently attached camera devices
    fn devices(&self) -> Vec<CameraDevice>;

    /// Capture one photo on the given device
    async fn take_photo(
        &self,
        device: &CameraDevice,
        options: &PhotoOptions,
    ) -> Result<PhotoFile, CaptureError>;
}
