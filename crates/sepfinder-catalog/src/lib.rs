// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Device and firmware catalog access.
//!
//! [`DeviceCatalog`] is the seam the wizard talks to; [`IpswClient`] is the
//! production implementation over the ipsw.me v4 API.

pub mod client;
pub mod types;

use async_trait::async_trait;
use sepfinder_core::{PluginAdapter, SepfinderError};

pub use client::{build_http_client, IpswClient};
pub use types::{is_device_board, BoardEntry, DeviceDetail, DeviceSummary, FirmwareEntry};

/// Read-only access to the device/firmware catalog.
///
/// Implementations hold no per-conversation state; every call goes upstream.
#[async_trait]
pub trait DeviceCatalog: PluginAdapter {
    /// Lists every known device.
    async fn list_devices(&self) -> Result<Vec<DeviceSummary>, SepfinderError>;

    /// Fetches boards and firmwares for one device identifier.
    async fn get_device_detail(&self, identifier: &str) -> Result<DeviceDetail, SepfinderError>;
}
