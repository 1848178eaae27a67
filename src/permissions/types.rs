// SPDX-License-Identifier: GPL-3.0-only

//! Shared permission model types
//!
//! An abstract [`PermissionType`] is what the application reasons about
//! (camera, gallery, ...). A concrete [`PermissionKey`] is what the OS
//! actually checks; one type can be backed by several keys depending on
//! platform and API level.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Abstract capability the application cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionType {
    /// Camera hardware access
    Camera,
    /// Read access to stored photos
    Gallery,
    /// Read access to photos and videos, plus save-to-library on iOS
    FullGallery,
    /// Device location while the app is in use
    Location,
    /// Broad filesystem access (Android only)
    AllFiles,
}

impl PermissionType {
    /// All variants, for iteration in diagnostics
    pub const ALL: [PermissionType; 5] = [
        PermissionType::Camera,
        PermissionType::Gallery,
        PermissionType::FullGallery,
        PermissionType::Location,
        PermissionType::AllFiles,
    ];
}

impl std::fmt::Display for PermissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionType::Camera => write!(f, "camera"),
            PermissionType::Gallery => write!(f, "gallery"),
            PermissionType::FullGallery => write!(f, "full-gallery"),
            PermissionType::Location => write!(f, "location"),
            PermissionType::AllFiles => write!(f, "all-files"),
        }
    }
}

/// Status of a single concrete permission key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PermissionStatus {
    /// Usable now
    Granted,
    /// Not granted, but the OS allows another prompt
    #[default]
    Denied,
    /// Permanently denied; only the Settings app can change it
    Blocked,
    /// Not available on this device at all
    Unavailable,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }

    /// True for statuses that cannot be fixed by re-prompting
    pub fn needs_settings(self) -> bool {
        matches!(
            self,
            PermissionStatus::Blocked | PermissionStatus::Unavailable
        )
    }
}

/// Concrete OS permission identifier
///
/// `Camera` and `ManageExternalStorage` are queried through dedicated
/// capability APIs rather than the generic check/request primitives, but
/// their results are recorded in the status map under these keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionKey {
    Camera,
    ReadMediaImages,
    ReadMediaVideo,
    ReadExternalStorage,
    WriteExternalStorage,
    PhotoLibrary,
    PhotoLibraryAddOnly,
    FineLocation,
    LocationWhenInUse,
    ManageExternalStorage,
}

impl PermissionKey {
    /// The identifier string the OS layer uses for this key
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionKey::Camera => "camera",
            PermissionKey::ReadMediaImages => "android.permission.READ_MEDIA_IMAGES",
            PermissionKey::ReadMediaVideo => "android.permission.READ_MEDIA_VIDEO",
            PermissionKey::ReadExternalStorage => "android.permission.READ_EXTERNAL_STORAGE",
            PermissionKey::WriteExternalStorage => "android.permission.WRITE_EXTERNAL_STORAGE",
            PermissionKey::PhotoLibrary => "ios.permission.PHOTO_LIBRARY",
            PermissionKey::PhotoLibraryAddOnly => "ios.permission.PHOTO_LIBRARY_ADD_ONLY",
            PermissionKey::FineLocation => "android.permission.ACCESS_FINE_LOCATION",
            PermissionKey::LocationWhenInUse => "ios.permission.LOCATION_WHEN_IN_USE",
            PermissionKey::ManageExternalStorage => "android.permission.MANAGE_EXTERNAL_STORAGE",
        }
    }
}

impl std::fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Committed per-key statuses, replaced wholesale on every check
pub type StatusMap = HashMap<PermissionKey, PermissionStatus>;

/// Aggregate result of a permission check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionSummary {
    /// True iff every requested type classified as granted
    pub all_granted: bool,
    /// Types whose backing keys are not all usable
    pub missing: Vec<PermissionType>,
    /// Subset of `missing` that cannot be re-prompted
    pub blocked: Vec<PermissionType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_settings_split() {
        assert!(!PermissionStatus::Granted.needs_settings());
        assert!(!PermissionStatus::Denied.needs_settings());
        assert!(PermissionStatus::Blocked.needs_settings());
        assert!(PermissionStatus::Unavailable.needs_settings());
    }

    #[test]
    fn test_key_identifiers_are_unique() {
        let keys = [
            PermissionKey::Camera,
            PermissionKey::ReadMediaImages,
            PermissionKey::ReadMediaVideo,
            PermissionKey::ReadExternalStorage,
            PermissionKey::WriteExternalStorage,
            PermissionKey::PhotoLibrary,
            PermissionKey::PhotoLibraryAddOnly,
            PermissionKey::FineLocation,
            PermissionKey::LocationWhenInUse,
            PermissionKey::ManageExternalStorage,
        ];
        let mut seen = std::collections::HashSet::new();
        for key in keys {
            assert!(seen.insert(key.as_str()), "duplicate identifier for {key:?}");
        }
    }
}
