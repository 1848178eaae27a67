// SPDX-License-Identifier: GPL-3.0-only

//! Abstract type -> concrete key resolution
//!
//! Pure and infallible. The matrix encodes the Android storage permission
//! history: granular media keys from API 33, scoped storage from API 29,
//! and the legacy read/write pair (either one satisfies the gallery)
//! before that.

use super::types::{PermissionKey, PermissionType};
use crate::constants::{ANDROID_GRANULAR_MEDIA, ANDROID_SCOPED_STORAGE};
use crate::platform::Platform;

/// Resolve an abstract permission type to the concrete keys backing it.
///
/// `Camera` and `AllFiles` resolve to no generic key at all: both are
/// served by dedicated capability APIs, and the checker records their
/// results under fixed keys itself.
pub fn resolve(ty: PermissionType, platform: Platform, api_level: u32) -> Vec<PermissionKey> {
    match (ty, platform) {
        (PermissionType::Camera, _) | (PermissionType::AllFiles, _) => Vec::new(),

        (PermissionType::Gallery, Platform::Android) => {
            if api_level >= ANDROID_GRANULAR_MEDIA {
                vec![PermissionKey::ReadMediaImages]
            } else if api_level >= ANDROID_SCOPED_STORAGE {
                vec![PermissionKey::ReadExternalStorage]
            } else {
                // Legacy devices: either key is enough to read the gallery
                vec![
                    PermissionKey::ReadExternalStorage,
                    PermissionKey::WriteExternalStorage,
                ]
            }
        }
        (PermissionType::Gallery, Platform::Ios | Platform::Desktop) => {
            vec![PermissionKey::PhotoLibrary]
        }

        (PermissionType::FullGallery, Platform::Android) => {
            if api_level >= ANDROID_GRANULAR_MEDIA {
                vec![
                    PermissionKey::ReadMediaImages,
                    PermissionKey::ReadMediaVideo,
                ]
            } else if api_level >= ANDROID_SCOPED_STORAGE {
                vec![PermissionKey::ReadExternalStorage]
            } else {
                vec![
                    PermissionKey::ReadExternalStorage,
                    PermissionKey::WriteExternalStorage,
                ]
            }
        }
        (PermissionType::FullGallery, Platform::Ios | Platform::Desktop) => {
            vec![
                PermissionKey::PhotoLibrary,
                PermissionKey::PhotoLibraryAddOnly,
            ]
        }

        (PermissionType::Location, Platform::Android) => vec![PermissionKey::FineLocation],
        (PermissionType::Location, Platform::Ios | Platform::Desktop) => {
            vec![PermissionKey::LocationWhenInUse]
        }
    }
}
