// SPDX-License-Identifier: GPL-3.0-only

//! Capture coordinator
//!
//! Owns the permission orchestrator and the camera session and wires
//! their loop: checks commit a snapshot, the coordinator samples it into
//! readiness events, and the session's reducer decides whether to retry.
//! The coordinator also owns the clock (cool-down sleeps) and the
//! lifecycle subscription.

use crate::camera::CameraSession;
use crate::camera::fsm::{Readiness, SessionEffect, SessionEvent};
use crate::config::OrchestratorConfig;
use crate::constants::CAPTURE_BUNDLE;
use crate::lifecycle::{AppState, LifecycleWatcher};
use crate::permissions::PermissionOrchestrator;
use crate::permissions::types::PermissionKey;
use crate::platform::{CameraHardware, PermissionHost, Platform};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub struct CaptureCoordinator<H: PermissionHost, C: CameraHardware> {
    permissions: PermissionOrchestrator<H>,
    session: CameraSession<C>,
    watcher: LifecycleWatcher,
    cooldown: Duration,
}

impl<H: PermissionHost, C: CameraHardware> CaptureCoordinator<H, C> {
    pub fn new(host: H, hardware: C, config: &OrchestratorConfig) -> Self {
        Self {
            permissions: PermissionOrchestrator::new(host, config.debounce_window()),
            session: CameraSession::with_retry_max(hardware, config.retry_max),
            watcher: LifecycleWatcher::new(),
            cooldown: config.retry_cooldown(),
        }
    }

    pub fn permissions(&self) -> &PermissionOrchestrator<H> {
        &self.permissions
    }

    pub fn permissions_mut(&mut self) -> &mut PermissionOrchestrator<H> {
        &mut self.permissions
    }

    pub fn session(&self) -> &CameraSession<C> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut CameraSession<C> {
        &mut self.session
    }

    /// Sample the committed snapshot into the session's readiness inputs
    fn current_readiness(&self) -> Readiness {
        let camera_granted = self
            .permissions
            .status_of(PermissionKey::Camera)
            .is_some_and(|status| status.is_granted());
        let location_key = match self.permissions.host().platform() {
            Platform::Android => PermissionKey::FineLocation,
            Platform::Ios | Platform::Desktop => PermissionKey::LocationWhenInUse,
        };
        let location_granted = self
            .permissions
            .status_of(location_key)
            .is_some_and(|status| status.is_granted());
        self.session.readiness(
            self.permissions.has_permissions(),
            camera_granted,
            location_granted,
        )
    }

    /// Run the standard bundle check and drive the session until it
    /// settles in `Ready` or `Error` (bounded by the retry budget).
    pub async fn refresh(&mut self) {
        self.permissions.check_permissions(&CAPTURE_BUNDLE).await;
        self.session.refresh_devices();
        let event = SessionEvent::PermissionsChanged(self.current_readiness());
        self.drive(event).await;
    }

    /// React to a hardware hotplug notification
    pub async fn on_devices_changed(&mut self) {
        self.session.refresh_devices();
        let event = SessionEvent::DevicesChanged(self.current_readiness());
        self.drive(event).await;
    }

    /// Explicit user retry after the budget was exhausted: re-checks
    /// immediately (no cool-down) without resetting the counter.
    pub async fn retry_camera(&mut self) {
        if self.session.retry_camera().is_some() {
            self.permissions.check_permissions(&CAPTURE_BUNDLE).await;
            self.session.refresh_devices();
            let event = SessionEvent::PermissionsChanged(self.current_readiness());
            self.drive(event).await;
        }
    }

    async fn drive(&mut self, first: SessionEvent) {
        let mut effect = self.session.handle_event(first);
        while let Some(SessionEffect::Recheck) = effect {
            debug!(retries = self.session.retry_count(), "Cooling down before re-check");
            tokio::time::sleep(self.cooldown).await;
            self.session.handle_event(SessionEvent::CooldownElapsed);
            self.permissions.check_permissions(&CAPTURE_BUNDLE).await;
            self.session.refresh_devices();
            let readiness = self.current_readiness();
            effect = self
                .session
                .handle_event(SessionEvent::PermissionsChanged(readiness));
        }
    }

    /// Consume the OS lifecycle stream until the sender drops, running
    /// one bundle check per transition back into the foreground.
    pub async fn run_lifecycle(&mut self, mut events: mpsc::Receiver<AppState>) {
        while let Some(state) = events.recv().await {
            if self.watcher.observe(state) {
                info!("App foregrounded, re-checking permissions");
                self.refresh().await;
            }
        }
        debug!("Lifecycle stream closed, watcher torn down");
    }
}
