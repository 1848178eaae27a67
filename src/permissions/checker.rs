// SPDX-License-Identifier: GPL-3.0-only

//! Permission checking
//!
//! A check fans out every concrete-key query concurrently, joins them all,
//! and only then commits the snapshot, so no partial state is ever
//! observable. Overlapping and rapid-fire callers are absorbed by the
//! query lease and read the last committed aggregate.

use super::types::{PermissionSummary, PermissionType, StatusMap};
use super::{PermissionOrchestrator, TypeClass, classify, query_current};
use crate::platform::PermissionHost;
use futures::future::join_all;
use tracing::{debug, info};

impl<H: PermissionHost> PermissionOrchestrator<H> {
    /// Check the current status of the given permission types.
    ///
    /// Stale-read by design: while another check is in flight, or within
    /// the debounce window of the previous check's start, this returns the
    /// last committed aggregate without issuing a single OS call.
    pub async fn check_permissions(&mut self, types: &[PermissionType]) -> PermissionSummary {
        let token = match self.tracker.lease_mut().try_acquire() {
            Ok(token) => token,
            Err(rejection) => {
                debug!(?rejection, "Check absorbed, serving last snapshot");
                return self.tracker.summary();
            }
        };

        let host = &self.host;
        let joined = join_all(
            types
                .iter()
                .map(|&ty| async move { (ty, query_current(host, ty).await) }),
        )
        .await;

        let mut status = StatusMap::new();
        let mut missing: Vec<PermissionType> = Vec::new();
        let mut blocked: Vec<PermissionType> = Vec::new();

        for (ty, results) in &joined {
            for (key, key_status) in results {
                status.insert(*key, *key_status);
            }
            match classify(results) {
                TypeClass::Granted => {}
                TypeClass::Missing => missing.push(*ty),
                TypeClass::Blocked => {
                    missing.push(*ty);
                    blocked.push(*ty);
                }
            }
        }

        info!(
            requested = types.len(),
            missing = ?missing,
            blocked = ?blocked,
            "Permission check complete"
        );

        self.tracker.commit(status, missing, blocked);
        self.tracker.lease_mut().release(token);
        self.tracker.summary()
    }
}
