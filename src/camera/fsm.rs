// SPDX-License-Identifier: GPL-3.0-only

//! Camera session state machine
//!
//! A pure reducer over readiness events. The driver (the coordinator)
//! owns the clock: it sleeps the flat cool-down before feeding
//! `CooldownElapsed` and runs the permission bundle check when the reducer
//! asks for a `Recheck`. Keeping the reducer pure makes the retry cap and
//! the cool-down independently testable.

/// Bounded automatic retry budget, owned by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    count: u32,
    max: u32,
}

impl RetryState {
    pub fn new(max: u32) -> Self {
        Self { count: 0, max }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Record one failed readiness evaluation.
    /// Returns `true` once the cap is reached; the count never passes it.
    pub fn register_failure(&mut self) -> bool {
        if self.count < self.max {
            self.count += 1;
        }
        self.count >= self.max
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

/// Inputs to the readiness predicate, sampled from the permission
/// snapshot and the device list at event time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
    pub has_permissions: bool,
    pub camera_granted: bool,
    pub location_granted: bool,
    pub device_available: bool,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        self.has_permissions
            && self.camera_granted
            && self.location_granted
            && self.device_available
    }
}

/// Session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing evaluated yet
    #[default]
    Idle,
    /// Waiting for the next readiness evaluation
    CheckingAccess,
    /// Camera is usable; capture may proceed
    Ready,
    /// A failed evaluation scheduled a re-check; cooling down
    Retrying,
    /// Retry budget exhausted; only an explicit retry recovers
    Error,
}

/// Events the reducer consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The permission snapshot changed
    PermissionsChanged(Readiness),
    /// The device list changed
    DevicesChanged(Readiness),
    /// The flat cool-down between retries finished
    CooldownElapsed,
    /// Explicit user retry (does not touch the retry counter)
    RetryRequested,
}

/// Side effects the driver must perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    /// Run the standard permission bundle check, then re-evaluate
    Recheck,
}

/// Advance the state machine by one event.
///
/// Readiness evaluations reset the retry budget on success; on failure
/// they spend one retry, and spending the last one lands in `Error`.
pub fn reduce(
    state: SessionState,
    retry: &mut RetryState,
    event: SessionEvent,
) -> (SessionState, Option<SessionEffect>) {
    match event {
        SessionEvent::PermissionsChanged(readiness) | SessionEvent::DevicesChanged(readiness) => {
            if readiness.is_ready() {
                retry.reset();
                (SessionState::Ready, None)
            } else if state == SessionState::Error {
                // Auto-retry already gave up; stay put until an explicit retry
                (SessionState::Error, None)
            } else if retry.register_failure() {
                (SessionState::Error, None)
            } else {
                (SessionState::Retrying, Some(SessionEffect::Recheck))
            }
        }
        SessionEvent::CooldownElapsed => match state {
            SessionState::Retrying => (SessionState::CheckingAccess, None),
            other => (other, None),
        },
        SessionEvent::RetryRequested => (SessionState::CheckingAccess, Some(SessionEffect::Recheck)),
    }
}
