// SPDX-License-Identifier: GPL-3.0-only

//! Active permission prompting
//!
//! Requesting is pre-flight checked: the OS refuses to re-prompt a
//! permanently blocked permission, so a bundle containing one is rejected
//! outright and the blocked types are folded into the sticky sets for the
//! caller to offer a Settings deep-link instead.

use super::types::{PermissionKey, PermissionStatus, PermissionType};
use super::{PermissionOrchestrator, TypeClass, classify, query_current};
use crate::platform::PermissionHost;
use futures::future::join_all;
use tracing::{info, warn};

impl<H: PermissionHost> PermissionOrchestrator<H> {
    /// Prompt the user for the given permission types.
    ///
    /// Returns `true` iff every requested type ends granted. Returns
    /// `false` immediately (no prompt issued) when another request is
    /// already running or when any requested type is pre-flight blocked.
    pub async fn request_alert_permissions(&mut self, types: &[PermissionType]) -> bool {
        if self.tracker.is_requesting() {
            warn!("Permission request already in flight, rejecting");
            return false;
        }
        self.tracker.set_requesting(true);
        let granted = self.request_inner(types).await;
        self.tracker.set_requesting(false);
        granted
    }

    async fn request_inner(&mut self, types: &[PermissionType]) -> bool {
        let host = &self.host;

        // Pre-flight: never prompt for a bundle containing a blocked type
        let preflight = join_all(
            types
                .iter()
                .map(|&ty| async move { (ty, query_current(host, ty).await) }),
        )
        .await;

        let pre_blocked: Vec<PermissionType> = preflight
            .iter()
            .filter(|(_, results)| classify(results) == TypeClass::Blocked)
            .map(|(ty, _)| *ty)
            .collect();

        if !pre_blocked.is_empty() {
            warn!(
                blocked = ?pre_blocked,
                "Request rejected: bundle contains permanently blocked types"
            );
            self.tracker.record_blocked(&pre_blocked);
            return false;
        }

        let host = &self.host;
        let outcomes = join_all(types.iter().map(|&ty| {
            async move {
                let results: Vec<(PermissionKey, PermissionStatus)> = match ty {
                    PermissionType::Camera => {
                        let auth = host.request_camera().await;
                        vec![(PermissionKey::Camera, auth.as_status())]
                    }
                    // Pre-flight guarantees all-files is already granted
                    // here; there is no runtime prompt for it anyway.
                    PermissionType::AllFiles => {
                        vec![(PermissionKey::ManageExternalStorage, PermissionStatus::Granted)]
                    }
                    _ => {
                        let keys =
                            super::resolver::resolve(ty, host.platform(), host.api_level());
                        join_all(
                            keys.into_iter()
                                .map(|key| async move { (key, host.request(key).await) }),
                        )
                        .await
                    }
                };
                (ty, results)
            }
        }))
        .await;

        let mut all_granted = true;
        let mut newly_blocked: Vec<PermissionType> = Vec::new();
        for (ty, results) in &outcomes {
            match classify(results) {
                TypeClass::Granted => {}
                TypeClass::Missing => all_granted = false,
                TypeClass::Blocked => {
                    all_granted = false;
                    newly_blocked.push(*ty);
                }
            }
        }

        if !newly_blocked.is_empty() {
            self.tracker.record_blocked(&newly_blocked);
        }

        info!(requested = types.len(), all_granted, "Permission request finished");
        all_granted
    }
}
