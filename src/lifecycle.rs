// SPDX-License-Identifier: GPL-3.0-only

//! App lifecycle watching
//!
//! The watcher turns the OS foreground/background event stream into a
//! single trigger: one permission bundle check per transition into the
//! foreground. The transition predicate is pure so the stream plumbing
//! never needs mocking.

/// Coarse app lifecycle state as reported by the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// In the foreground and interactive
    Active,
    /// Foregrounded but not interactive (system dialog, app switcher)
    Inactive,
    /// Fully backgrounded
    Background,
}

/// Tracks the previous lifecycle state and decides when a transition
/// warrants a permission re-check
#[derive(Debug, Default)]
pub struct LifecycleWatcher {
    previous: Option<AppState>,
}

impl LifecycleWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transition. Returns `true` exactly when the app comes
    /// back into the foreground from an inactive or background state;
    /// the very first observation never triggers (the mount-time check
    /// already covered it).
    pub fn observe(&mut self, next: AppState) -> bool {
        let should_check = matches!(
            self.previous,
            Some(AppState::Inactive) | Some(AppState::Background)
        ) && next == AppState::Active;
        self.previous = Some(next);
        should_check
    }
}
