// SPDX-License-Identifier: GPL-3.0-only

//! Permission orchestration
//!
//! [`PermissionOrchestrator`] owns the readiness tracker and the host
//! handle, and is the only writer of the permission snapshot. Checking and
//! requesting live in their own modules ([`checker`], [`requester`]) as
//! impl blocks on the orchestrator, keeping the two flows side by side
//! with their guards.

pub mod checker;
pub mod lease;
pub mod requester;
pub mod resolver;
pub mod tracker;
pub mod types;

use crate::platform::PermissionHost;
use futures::future::join_all;
use tracker::ReadinessTracker;
use types::{PermissionKey, PermissionStatus, PermissionSummary, PermissionType, StatusMap};

/// Reconciles abstract permission types against OS state.
///
/// One orchestrator is constructed per consuming subtree and injected by
/// reference into its dependents; nothing outside its own methods mutates
/// the snapshot.
pub struct PermissionOrchestrator<H: PermissionHost> {
    host: H,
    tracker: ReadinessTracker,
}

impl<H: PermissionHost> PermissionOrchestrator<H> {
    pub fn new(host: H, debounce: std::time::Duration) -> Self {
        Self {
            host,
            tracker: ReadinessTracker::new(debounce),
        }
    }

    pub fn has_permissions(&self) -> bool {
        self.tracker.has_permissions()
    }

    pub fn permission_status(&self) -> &StatusMap {
        self.tracker.status()
    }

    pub fn status_of(&self, key: PermissionKey) -> Option<PermissionStatus> {
        self.tracker.status_of(key)
    }

    pub fn missing_permissions(&self) -> &[PermissionType] {
        self.tracker.missing()
    }

    pub fn blocked_permissions(&self) -> &[PermissionType] {
        self.tracker.blocked()
    }

    pub fn is_requesting(&self) -> bool {
        self.tracker.is_requesting()
    }

    /// Last committed aggregate without touching the OS
    pub fn summary(&self) -> PermissionSummary {
        self.tracker.summary()
    }

    /// Clear the snapshot and every internal guard back to construction
    /// state. Full teardown/testing only.
    pub fn reset_permissions(&mut self) {
        self.tracker.reset();
    }

    /// Deep-link to the Android all-files access settings screen
    pub fn open_all_files_settings(&self) {
        self.host.open_all_files_settings();
    }

    /// Deep-link to this app's OS settings page
    pub fn open_app_settings(&self) {
        self.host.open_app_settings();
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

/// Query the current status of every concrete key backing one type.
///
/// Camera and all-files go through their dedicated capability APIs and are
/// recorded under fixed keys; everything else resolves to generic keys
/// fanned out through `check`. All-files access has no runtime prompt on
/// Android, so a negative query classifies as `Blocked` rather than
/// `Denied`; off Android it is trivially granted.
async fn query_current<H: PermissionHost>(
    host: &H,
    ty: PermissionType,
) -> Vec<(PermissionKey, PermissionStatus)> {
    match ty {
        PermissionType::Camera => {
            let auth = host.camera_authorization().await;
            vec![(PermissionKey::Camera, auth.as_status())]
        }
        PermissionType::AllFiles => {
            let status = if !host.platform().is_android() || host.has_all_files_access().await {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Blocked
            };
            vec![(PermissionKey::ManageExternalStorage, status)]
        }
        _ => {
            let keys = resolver::resolve(ty, host.platform(), host.api_level());
            join_all(
                keys.into_iter()
                    .map(|key| async move { (key, host.check(key).await) }),
            )
            .await
        }
    }
}

/// Classify one type from its concrete key statuses.
///
/// Any key needing Settings makes the whole type blocked; otherwise the
/// keys are OR'd and any granted key grants the type.
fn classify(results: &[(PermissionKey, PermissionStatus)]) -> TypeClass {
    if results.iter().any(|(_, status)| status.needs_settings()) {
        TypeClass::Blocked
    } else if results.iter().any(|(_, status)| status.is_granted()) {
        TypeClass::Granted
    } else {
        TypeClass::Missing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeClass {
    Granted,
    Missing,
    Blocked,
}
