// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use fieldcam::camera::fsm::SessionState;
use fieldcam::config::OrchestratorConfig;
use fieldcam::coordinator::CaptureCoordinator;
use fieldcam::permissions::types::{PermissionKey, PermissionStatus};
use fieldcam::platform::PermissionHost;
use fieldcam::platform::desktop::{DesktopCamera, DesktopHost};

#[derive(Parser)]
#[command(name = "fieldcam")]
#[command(about = "Capability diagnostics for the Fieldcam capture core")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full readiness check against the simulated host and print
    /// the resulting snapshot
    Doctor {
        /// Simulate a denied camera permission
        #[arg(long)]
        deny_camera: bool,

        /// Simulate a permanently blocked photo library
        #[arg(long)]
        block_gallery: bool,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open the system settings surface this host can deep-link to
    Settings,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("failed to build tokio runtime");

    match cli.command {
        Commands::Doctor {
            deny_camera,
            block_gallery,
            json,
        } => runtime.block_on(doctor(deny_camera, block_gallery, json)),
        Commands::Settings => {
            DesktopHost::new().open_app_settings();
        }
    }
}

async fn doctor(deny_camera: bool, block_gallery: bool, json: bool) {
    let mut host = DesktopHost::new();
    if deny_camera {
        host = host.with_camera(fieldcam::platform::CameraAuthorization::Denied);
    }
    if block_gallery {
        host = host.with_status(PermissionKey::PhotoLibrary, PermissionStatus::Blocked);
    }

    // Keep the doctor snappy: no real cool-down between retries
    let config = OrchestratorConfig {
        retry_cooldown_ms: 10,
        ..OrchestratorConfig::default()
    };

    let mut coordinator = CaptureCoordinator::new(host, DesktopCamera::new(), &config);
    coordinator.refresh().await;

    let summary = coordinator.permissions().summary();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).expect("summary serializes")
        );
        return;
    }

    println!("has permissions : {}", summary.all_granted);
    println!(
        "missing         : {}",
        join(summary.missing.iter().map(|ty| ty.to_string()))
    );
    println!(
        "blocked         : {}",
        join(summary.blocked.iter().map(|ty| ty.to_string()))
    );
    println!("camera ready    : {}", coordinator.session().is_camera_ready());
    if coordinator.session().state() == SessionState::Error {
        if let Some(message) = coordinator.session().camera_error() {
            println!("camera error    : {message}");
        }
    }
    if let Some(device) = coordinator.session().device() {
        println!("device          : {} ({})", device.name, device.position);
    }
}

fn join(items: impl Iterator<Item = String>) -> String {
    let joined: Vec<String> = items.collect();
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined.join(", ")
    }
}
