// SPDX-License-Identifier: GPL-3.0-only

//! Single-flight query lease
//!
//! A check may only run while holding the lease. Acquisition fails while a
//! previous holder has not released it (single-flight) or inside the
//! debounce window measured from the previous acquisition (wall-clock,
//! not operation-count). Rejected callers fall back to the last committed
//! snapshot instead of waiting.

use std::time::{Duration, Instant};

/// Proof that the lease is held. Not cloneable; must be surrendered to
/// [`QueryLease::release`] when the guarded operation completes.
#[derive(Debug)]
pub struct LeaseToken {
    _private: (),
}

/// Why an acquisition was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseRejection {
    /// Another check is still running
    InFlight,
    /// The previous check started less than the debounce window ago
    Debounced,
}

#[derive(Debug)]
pub struct QueryLease {
    debounce: Duration,
    in_flight: bool,
    last_started: Option<Instant>,
}

impl QueryLease {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            in_flight: false,
            last_started: None,
        }
    }

    /// Acquire at an explicit timestamp (unit tests drive this directly)
    pub fn try_acquire_at(&mut self, now: Instant) -> Result<LeaseToken, LeaseRejection> {
        if self.in_flight {
            return Err(LeaseRejection::InFlight);
        }
        if let Some(started) = self.last_started
            && now.duration_since(started) < self.debounce
        {
            return Err(LeaseRejection::Debounced);
        }
        self.in_flight = true;
        self.last_started = Some(now);
        Ok(LeaseToken { _private: () })
    }

    /// Acquire at the current wall-clock time
    pub fn try_acquire(&mut self) -> Result<LeaseToken, LeaseRejection> {
        self.try_acquire_at(Instant::now())
    }

    /// Release the lease. The debounce timestamp keeps the acquisition
    /// time, so back-to-back completed checks are still absorbed.
    pub fn release(&mut self, token: LeaseToken) {
        let _ = token;
        self.in_flight = false;
    }

    /// Forget all guard state (full teardown only)
    pub fn reset(&mut self) {
        self.in_flight = false;
        self.last_started = None;
    }
}
