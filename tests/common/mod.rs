// SPDX-License-Identifier: GPL-3.0-only

//! Shared fakes for the integration tests
//!
//! `FakeHost` answers permission queries from a scripted table and counts
//! every native call, so tests can assert not only on outcomes but on how
//! many OS calls a flow issued. `FakeCamera` does the same for capture.

// Not every test binary uses every helper
#![allow(dead_code)]

use fieldcam::camera::types::{CameraDevice, CameraPosition, PhotoFile, PhotoOptions};
use fieldcam::errors::CaptureError;
use fieldcam::permissions::types::{PermissionKey, PermissionStatus};
use fieldcam::platform::{CameraAuthorization, CameraHardware, PermissionHost, Platform};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct HostState {
    statuses: HashMap<PermissionKey, PermissionStatus>,
    request_results: HashMap<PermissionKey, PermissionStatus>,
    camera: Option<CameraAuthorization>,
    camera_request: Option<CameraAuthorization>,
    all_files: bool,
}

pub struct FakeHostInner {
    platform: Platform,
    api_level: u32,
    state: Mutex<HostState>,
    pub check_calls: AtomicUsize,
    pub request_calls: AtomicUsize,
    pub camera_auth_calls: AtomicUsize,
    pub camera_request_calls: AtomicUsize,
    pub settings_opens: AtomicUsize,
}

/// Cloneable handle; tests keep one clone to inspect counters after the
/// orchestrator took ownership of the other.
#[derive(Clone)]
pub struct FakeHost {
    pub inner: Arc<FakeHostInner>,
}

impl FakeHost {
    pub fn new(platform: Platform, api_level: u32) -> Self {
        Self {
            inner: Arc::new(FakeHostInner {
                platform,
                api_level,
                state: Mutex::new(HostState {
                    camera: Some(CameraAuthorization::Granted),
                    all_files: true,
                    ..HostState::default()
                }),
                check_calls: AtomicUsize::new(0),
                request_calls: AtomicUsize::new(0),
                camera_auth_calls: AtomicUsize::new(0),
                camera_request_calls: AtomicUsize::new(0),
                settings_opens: AtomicUsize::new(0),
            }),
        }
    }

    pub fn android(api_level: u32) -> Self {
        Self::new(Platform::Android, api_level)
    }

    pub fn set_status(&self, key: PermissionKey, status: PermissionStatus) {
        self.inner
            .state
            .lock()
            .unwrap()
            .statuses
            .insert(key, status);
    }

    /// Status a prompt resolves to (defaults to the current status)
    pub fn set_request_result(&self, key: PermissionKey, status: PermissionStatus) {
        self.inner
            .state
            .lock()
            .unwrap()
            .request_results
            .insert(key, status);
    }

    pub fn set_camera(&self, authorization: CameraAuthorization) {
        let mut state = self.inner.state.lock().unwrap();
        state.camera = Some(authorization);
    }

    pub fn set_camera_request(&self, authorization: CameraAuthorization) {
        let mut state = self.inner.state.lock().unwrap();
        state.camera_request = Some(authorization);
    }

    pub fn set_all_files(&self, granted: bool) {
        self.inner.state.lock().unwrap().all_files = granted;
    }

    pub fn check_calls(&self) -> usize {
        self.inner.check_calls.load(Ordering::SeqCst)
    }

    pub fn request_calls(&self) -> usize {
        self.inner.request_calls.load(Ordering::SeqCst)
    }

    pub fn camera_auth_calls(&self) -> usize {
        self.inner.camera_auth_calls.load(Ordering::SeqCst)
    }

    pub fn camera_request_calls(&self) -> usize {
        self.inner.camera_request_calls.load(Ordering::SeqCst)
    }
}

impl PermissionHost for FakeHost {
    fn platform(&self) -> Platform {
        self.inner.platform
    }

    fn api_level(&self) -> u32 {
        self.inner.api_level
    }

    async fn check(&self, key: PermissionKey) -> PermissionStatus {
        self.inner.check_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .state
            .lock()
            .unwrap()
            .statuses
            .get(&key)
            .copied()
            .unwrap_or(PermissionStatus::Granted)
    }

    async fn request(&self, key: PermissionKey) -> PermissionStatus {
        self.inner.request_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.inner.state.lock().unwrap();
        state
            .request_results
            .get(&key)
            .or_else(|| state.statuses.get(&key))
            .copied()
            .unwrap_or(PermissionStatus::Granted)
    }

    async fn camera_authorization(&self) -> CameraAuthorization {
        self.inner.camera_auth_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .state
            .lock()
            .unwrap()
            .camera
            .unwrap_or(CameraAuthorization::Granted)
    }

    async fn request_camera(&self) -> CameraAuthorization {
        self.inner
            .camera_request_calls
            .fetch_add(1, Ordering::SeqCst);
        let state = self.inner.state.lock().unwrap();
        state.camera_request.or(state.camera).unwrap_or(CameraAuthorization::Granted)
    }

    async fn has_all_files_access(&self) -> bool {
        self.inner.state.lock().unwrap().all_files
    }

    fn open_all_files_settings(&self) {
        self.inner.settings_opens.fetch_add(1, Ordering::SeqCst);
    }

    fn open_app_settings(&self) {
        self.inner.settings_opens.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct FakeCameraInner {
    devices: Mutex<Vec<CameraDevice>>,
    result: Mutex<Result<PhotoFile, CaptureError>>,
    pub capture_calls: AtomicUsize,
    pub last_options: Mutex<Option<PhotoOptions>>,
}

#[derive(Clone)]
pub struct FakeCamera {
    pub inner: Arc<FakeCameraInner>,
}

pub fn back_device() -> CameraDevice {
    CameraDevice {
        id: "cam0".to_string(),
        name: "Back camera".to_string(),
        position: CameraPosition::Back,
    }
}

pub fn front_device() -> CameraDevice {
    CameraDevice {
        id: "cam1".to_string(),
        name: "Front camera".to_string(),
        position: CameraPosition::Front,
    }
}

impl FakeCamera {
    pub fn with_both_devices() -> Self {
        Self::with_devices(vec![back_device(), front_device()])
    }

    pub fn with_devices(devices: Vec<CameraDevice>) -> Self {
        Self {
            inner: Arc::new(FakeCameraInner {
                devices: Mutex::new(devices),
                result: Mutex::new(Ok(PhotoFile {
                    path: PathBuf::from("/tmp/fake.jpg"),
                    width: 4000,
                    height: 3000,
                })),
                capture_calls: AtomicUsize::new(0),
                last_options: Mutex::new(None),
            }),
        }
    }

    pub fn set_devices(&self, devices: Vec<CameraDevice>) {
        *self.inner.devices.lock().unwrap() = devices;
    }

    pub fn set_result(&self, result: Result<PhotoFile, CaptureError>) {
        *self.inner.result.lock().unwrap() = result;
    }

    pub fn capture_calls(&self) -> usize {
        self.inner.capture_calls.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<PhotoOptions> {
        *self.inner.last_options.lock().unwrap()
    }
}

impl CameraHardware for FakeCamera {
    fn devices(&self) -> Vec<CameraDevice> {
        self.inner.devices.lock().unwrap().clone()
    }

    async fn take_photo(
        &self,
        _device: &CameraDevice,
        options: &PhotoOptions,
    ) -> Result<PhotoFile, CaptureError> {
        self.inner.capture_calls.fetch_add(1, Ordering::SeqCst);
        *self.inner.last_options.lock().unwrap() = Some(*options);
        self.inner.result.lock().unwrap().clone()
    }
}
