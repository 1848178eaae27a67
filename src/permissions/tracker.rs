// SPDX-License-Identifier: GPL-3.0-only

//! Readiness tracker: the committed permission snapshot
//!
//! This is the single owner of the status map and the derived
//! missing/blocked sets. Snapshots are replaced wholesale by
//! [`commit`](ReadinessTracker::commit) after the checker's fan-out joins,
//! so readers never observe a half-updated state. Blocked types are sticky:
//! a type stays blocked across checks until a check finds it granted again.

use super::lease::QueryLease;
use super::types::{PermissionKey, PermissionStatus, PermissionSummary, PermissionType, StatusMap};
use std::time::Duration;
use tracing::debug;

#[derive(Debug)]
pub struct ReadinessTracker {
    status: StatusMap,
    missing: Vec<PermissionType>,
    blocked: Vec<PermissionType>,
    has_permissions: bool,
    is_requesting: bool,
    lease: QueryLease,
}

impl ReadinessTracker {
    pub fn new(debounce: Duration) -> Self {
        Self {
            status: StatusMap::new(),
            missing: Vec::new(),
            blocked: Vec::new(),
            has_permissions: false,
            is_requesting: false,
            lease: QueryLease::new(debounce),
        }
    }

    /// True iff the last committed check found every requested type granted
    pub fn has_permissions(&self) -> bool {
        self.has_permissions
    }

    /// Last committed per-key statuses
    pub fn status(&self) -> &StatusMap {
        &self.status
    }

    /// Status of one concrete key, if the last check covered it
    pub fn status_of(&self, key: PermissionKey) -> Option<PermissionStatus> {
        self.status.get(&key).copied()
    }

    /// Types the last check found not fully usable
    pub fn missing(&self) -> &[PermissionType] {
        &self.missing
    }

    /// Types that cannot be re-prompted (always a subset of `missing`)
    pub fn blocked(&self) -> &[PermissionType] {
        &self.blocked
    }

    pub fn is_requesting(&self) -> bool {
        self.is_requesting
    }

    pub(crate) fn set_requesting(&mut self, requesting: bool) {
        self.is_requesting = requesting;
    }

    pub(crate) fn lease_mut(&mut self) -> &mut QueryLease {
        &mut self.lease
    }

    /// The last committed aggregate, for callers absorbed by the lease
    pub fn summary(&self) -> PermissionSummary {
        PermissionSummary {
            all_granted: self.has_permissions,
            missing: self.missing.clone(),
            blocked: self.blocked.clone(),
        }
    }

    /// Atomically replace the snapshot with the joined results of a check.
    ///
    /// `fresh_blocked` holds the types this check classified as blocked.
    /// The committed blocked set additionally keeps previously blocked
    /// types that are still missing; types no longer missing are pruned.
    pub(crate) fn commit(
        &mut self,
        status: StatusMap,
        missing: Vec<PermissionType>,
        fresh_blocked: Vec<PermissionType>,
    ) {
        let mut blocked = fresh_blocked;
        for ty in &self.blocked {
            if missing.contains(ty) && !blocked.contains(ty) {
                blocked.push(*ty);
            }
        }

        debug_assert!(
            blocked.iter().all(|ty| missing.contains(ty)),
            "blocked set must stay a subset of missing"
        );

        debug!(
            missing = missing.len(),
            blocked = blocked.len(),
            keys = status.len(),
            "Committing permission snapshot"
        );

        self.has_permissions = missing.is_empty();
        self.status = status;
        self.missing = missing;
        self.blocked = blocked;
    }

    /// Record types the requester found (or made) permanently blocked.
    ///
    /// The status map itself stays checker-owned; only the derived sets
    /// move, preserving the blocked-implies-missing invariant.
    pub(crate) fn record_blocked(&mut self, types: &[PermissionType]) {
        for ty in types {
            if !self.missing.contains(ty) {
                self.missing.push(*ty);
            }
            if !self.blocked.contains(ty) {
                self.blocked.push(*ty);
            }
        }
        if !types.is_empty() {
            self.has_permissions = false;
        }
    }

    /// Restore construction state, including the lease guards.
    /// Full teardown only; never called mid-flow.
    pub fn reset(&mut self) {
        self.status.clear();
        self.missing.clear();
        self.blocked.clear();
        self.has_permissions = false;
        self.is_requesting = false;
        self.lease.reset();
    }
}
