// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for the camera session

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which side of the device the active sensor faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraPosition {
    /// Rear sensor, the default for field captures
    #[default]
    Back,
    /// Selfie sensor
    Front,
}

impl CameraPosition {
    /// The other of the two positions
    pub fn opposite(self) -> Self {
        match self {
            CameraPosition::Back => CameraPosition::Front,
            CameraPosition::Front => CameraPosition::Back,
        }
    }
}

impl std::fmt::Display for CameraPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraPosition::Back => write!(f, "back"),
            CameraPosition::Front => write!(f, "front"),
        }
    }
}

/// Flash operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlashMode {
    /// Flash never fires
    #[default]
    Off,
    /// Flash fires on every capture
    On,
    /// Hardware decides based on ambient light
    Auto,
}

impl FlashMode {
    /// Cycle to the next mode: Off -> On -> Auto -> Off
    pub fn next(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::On,
            FlashMode::On => FlashMode::Auto,
            FlashMode::Auto => FlashMode::Off,
        }
    }
}

impl std::fmt::Display for FlashMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlashMode::Off => write!(f, "off"),
            FlashMode::On => write!(f, "on"),
            FlashMode::Auto => write!(f, "auto"),
        }
    }
}

/// A camera device reported by the hardware layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    /// Stable hardware identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Which way the sensor faces
    pub position: CameraPosition,
}

/// Caller-supplied capture options
///
/// `flash` overrides the session's current flash mode for one capture;
/// everything left `None`/default falls back to session state.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoOptions {
    pub flash: Option<FlashMode>,
    /// Skip metadata post-processing for faster shutter response
    pub skip_metadata: bool,
}

/// A captured photo on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}
