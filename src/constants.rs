// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use crate::permissions::types::PermissionType;
use std::time::Duration;

/// Window after a check starts during which further checks are absorbed
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Maximum automatic readiness retries before the camera gives up
pub const MAX_READINESS_RETRIES: u32 = 3;

/// Flat delay between readiness retries (no backoff)
pub const RETRY_COOLDOWN: Duration = Duration::from_millis(1000);

/// The permission bundle every full readiness check runs with
pub const CAPTURE_BUNDLE: [PermissionType; 4] = [
    PermissionType::Camera,
    PermissionType::Gallery,
    PermissionType::Location,
    PermissionType::AllFiles,
];

/// Android API level that introduced the granular media permissions
pub const ANDROID_GRANULAR_MEDIA: u32 = 33;

/// Android API level that introduced scoped storage
pub const ANDROID_SCOPED_STORAGE: u32 = 29;

/// Message shown when automatic readiness retries are exhausted
pub const CAMERA_EXHAUSTED_MESSAGE: &str =
    "Camera is not available. Check camera and location permissions in Settings, then retry.";
