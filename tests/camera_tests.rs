// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the camera session and the capture coordinator

mod common;

use common::{FakeCamera, FakeHost, back_device};
use fieldcam::camera::CameraSession;
use fieldcam::camera::fsm::{SessionEvent, SessionState};
use fieldcam::camera::types::{CameraPosition, FlashMode, PhotoOptions};
use fieldcam::config::OrchestratorConfig;
use fieldcam::coordinator::CaptureCoordinator;
use fieldcam::errors::CaptureError;
use fieldcam::lifecycle::AppState;
use fieldcam::permissions::types::{PermissionKey, PermissionStatus};
use fieldcam::platform::{CameraAuthorization, Platform};
use tokio::sync::mpsc;

/// No debounce, near-zero cool-down: the retry loop runs instantly
fn fast_config() -> OrchestratorConfig {
    OrchestratorConfig {
        debounce_window_ms: 0,
        retry_cooldown_ms: 1,
        ..OrchestratorConfig::default()
    }
}

fn ready_session(camera: FakeCamera) -> CameraSession<FakeCamera> {
    let mut session = CameraSession::new(camera);
    let readiness = session.readiness(true, true, true);
    session.handle_event(SessionEvent::PermissionsChanged(readiness));
    assert!(session.is_camera_ready());
    session
}

#[tokio::test]
async fn test_refresh_reaches_ready_when_everything_granted() {
    let host = FakeHost::android(34);
    let camera = FakeCamera::with_both_devices();
    let mut coordinator = CaptureCoordinator::new(host.clone(), camera, &fast_config());

    coordinator.refresh().await;

    assert!(coordinator.session().is_camera_ready());
    assert_eq!(coordinator.session().camera_error(), None);
    assert_eq!(coordinator.session().retry_count(), 0);
    assert_eq!(host.camera_auth_calls(), 1, "one batch suffices when ready");
}

#[tokio::test]
async fn test_error_after_exactly_three_failed_evaluations() {
    let host = FakeHost::android(34);
    host.set_camera(CameraAuthorization::Denied);
    let camera = FakeCamera::with_both_devices();
    let mut coordinator = CaptureCoordinator::new(host.clone(), camera, &fast_config());

    coordinator.refresh().await;

    assert_eq!(coordinator.session().state(), SessionState::Error);
    assert_eq!(coordinator.session().retry_count(), 3);
    assert!(coordinator.session().camera_error().is_some());
    assert!(!coordinator.session().is_retrying());
    assert_eq!(
        host.camera_auth_calls(),
        3,
        "initial check plus one re-check per spent retry"
    );

    // Further passive evaluations stay in Error and issue no re-checks
    coordinator.on_devices_changed().await;
    assert_eq!(coordinator.session().state(), SessionState::Error);
    assert_eq!(host.camera_auth_calls(), 3);
}

#[tokio::test]
async fn test_missing_device_prevents_readiness() {
    let host = FakeHost::android(34);
    let camera = FakeCamera::with_devices(Vec::new());
    let mut coordinator = CaptureCoordinator::new(host.clone(), camera, &fast_config());

    coordinator.refresh().await;

    assert_eq!(coordinator.session().state(), SessionState::Error);
    assert!(
        coordinator.permissions().has_permissions(),
        "permissions alone are not readiness"
    );
}

#[tokio::test]
async fn test_retry_camera_recovers_after_exhaustion() {
    let host = FakeHost::android(34);
    host.set_camera(CameraAuthorization::Denied);
    let camera = FakeCamera::with_both_devices();
    let mut coordinator = CaptureCoordinator::new(host.clone(), camera, &fast_config());

    coordinator.refresh().await;
    assert_eq!(coordinator.session().state(), SessionState::Error);

    // User grants the camera in Settings, then taps retry
    host.set_camera(CameraAuthorization::Granted);
    coordinator.retry_camera().await;

    assert!(coordinator.session().is_camera_ready());
    assert_eq!(coordinator.session().camera_error(), None);
    assert_eq!(
        coordinator.session().retry_count(),
        0,
        "success resets the budget"
    );
}

#[tokio::test]
async fn test_retry_camera_returns_to_error_when_still_failing() {
    let host = FakeHost::android(34);
    host.set_camera(CameraAuthorization::Denied);
    let camera = FakeCamera::with_both_devices();
    let mut coordinator = CaptureCoordinator::new(host.clone(), camera, &fast_config());

    coordinator.refresh().await;
    coordinator.retry_camera().await;

    assert_eq!(
        coordinator.session().state(),
        SessionState::Error,
        "explicit retry does not reset the exhausted budget"
    );
}

#[tokio::test]
async fn test_take_photo_refused_when_not_ready() {
    let camera = FakeCamera::with_both_devices();
    let mut session = CameraSession::new(camera.clone());

    let photo = session.take_photo(None).await;

    assert!(photo.is_none());
    assert_eq!(camera.capture_calls(), 0, "no native call before readiness");
}

#[tokio::test]
async fn test_take_photo_merges_session_flash() {
    let camera = FakeCamera::with_both_devices();
    let mut session = ready_session(camera.clone());
    session.toggle_flash_mode();
    assert_eq!(session.flash_mode(), FlashMode::On);

    let photo = session.take_photo(None).await;

    assert!(photo.is_some());
    assert_eq!(camera.capture_calls(), 1);
    assert_eq!(
        camera.last_options().and_then(|options| options.flash),
        Some(FlashMode::On)
    );
    assert!(!session.is_capturing());
}

#[tokio::test]
async fn test_take_photo_honors_caller_flash_override() {
    let camera = FakeCamera::with_both_devices();
    let mut session = ready_session(camera.clone());

    session
        .take_photo(Some(PhotoOptions {
            flash: Some(FlashMode::Auto),
            ..PhotoOptions::default()
        }))
        .await;

    assert_eq!(
        camera.last_options().and_then(|options| options.flash),
        Some(FlashMode::Auto)
    );
}

#[tokio::test]
async fn test_camera_runtime_error_yields_none() {
    let camera = FakeCamera::with_both_devices();
    camera.set_result(Err(CaptureError::CameraRuntime(
        "session was torn down".to_string(),
    )));
    let mut session = ready_session(camera.clone());

    let photo = session.take_photo(None).await;

    assert!(photo.is_none(), "runtime errors are swallowed, not thrown");
    assert!(!session.is_capturing(), "capture flag clears on failure too");
}

#[tokio::test]
async fn test_flip_camera_alternates_strictly() {
    let camera = FakeCamera::with_both_devices();
    let mut session = CameraSession::new(camera);
    assert_eq!(session.camera_position(), CameraPosition::Back);

    for round in 0..5 {
        session.flip_camera();
        let expected = if round % 2 == 0 {
            CameraPosition::Front
        } else {
            CameraPosition::Back
        };
        assert_eq!(session.camera_position(), expected);
        assert_eq!(
            session.device().map(|device| device.position),
            Some(expected)
        );
    }
}

#[tokio::test]
async fn test_flip_to_absent_position_clears_device() {
    let camera = FakeCamera::with_devices(vec![back_device()]);
    let mut session = CameraSession::new(camera);
    assert!(session.device().is_some());

    assert!(!session.flip_camera(), "no front device to select");
    assert!(session.device().is_none());

    assert!(session.flip_camera());
    assert_eq!(
        session.device().map(|device| device.position),
        Some(CameraPosition::Back)
    );
}

#[tokio::test]
async fn test_scenario_c_foreground_transition_checks_once() {
    let host = FakeHost::new(Platform::Desktop, 0);
    let camera = FakeCamera::with_both_devices();
    let mut coordinator = CaptureCoordinator::new(host.clone(), camera, &fast_config());

    let (tx, rx) = mpsc::channel(8);
    tx.send(AppState::Active).await.unwrap();
    tx.send(AppState::Background).await.unwrap();
    tx.send(AppState::Active).await.unwrap();
    drop(tx);

    coordinator.run_lifecycle(rx).await;

    assert_eq!(
        host.camera_auth_calls(),
        1,
        "exactly one bundle check for the background->active transition"
    );
    assert!(coordinator.session().is_camera_ready());
}

#[tokio::test]
async fn test_blocked_camera_surfaces_for_settings_deep_link() {
    let host = FakeHost::android(34);
    host.set_camera(CameraAuthorization::Restricted);
    host.set_status(PermissionKey::FineLocation, PermissionStatus::Granted);
    let camera = FakeCamera::with_both_devices();
    let mut coordinator = CaptureCoordinator::new(host.clone(), camera, &fast_config());

    coordinator.refresh().await;

    assert!(
        coordinator
            .permissions()
            .blocked_permissions()
            .contains(&fieldcam::permissions::types::PermissionType::Camera)
    );
    assert_eq!(coordinator.session().state(), SessionState::Error);
}
