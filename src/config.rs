// SPDX-License-Identifier: GPL-3.0-only

//! Orchestrator configuration

use crate::constants::{DEBOUNCE_WINDOW, MAX_READINESS_RETRIES, RETRY_COOLDOWN};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the capability/camera orchestrator.
///
/// Defaults match production behavior; tests shrink the timing fields so
/// the retry loop runs without real waiting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Window after a check starts during which further checks are absorbed
    pub debounce_window_ms: u64,
    /// Flat delay between automatic readiness retries
    pub retry_cooldown_ms: u64,
    /// Automatic readiness retries before the camera gives up
    pub retry_max: u32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            debounce_window_ms: DEBOUNCE_WINDOW.as_millis() as u64,
            retry_cooldown_ms: RETRY_COOLDOWN.as_millis() as u64,
            retry_max: MAX_READINESS_RETRIES,
        }
    }
}

impl OrchestratorConfig {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_window_ms)
    }

    pub fn retry_cooldown(&self) -> Duration {
        Duration::from_millis(self.retry_cooldown_ms)
    }
}
