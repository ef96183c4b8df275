// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory device catalog.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use sepfinder_catalog::{DeviceCatalog, DeviceDetail, DeviceSummary};
use sepfinder_core::{AdapterType, HealthStatus, PluginAdapter, SepfinderError};

/// A device catalog backed by fixed data.
///
/// Outages are toggled at runtime with [`set_unavailable`](Self::set_unavailable),
/// so a test can let the first steps of a conversation succeed and fail a later one.
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    devices: Vec<DeviceSummary>,
    details: HashMap<String, DeviceDetail>,
    unavailable: Arc<AtomicBool>,
    list_calls: Arc<AtomicUsize>,
    detail_calls: Arc<AtomicUsize>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a device with its detail record. The summary is derived from the detail.
    pub fn with_device(mut self, detail: DeviceDetail) -> Self {
        self.devices.push(DeviceSummary {
            identifier: detail.identifier.clone(),
            name: detail.name.clone(),
        });
        self.details.insert(detail.identifier.clone(), detail);
        self
    }

    /// Adds a device that is listed but has no detail record.
    pub fn with_summary(mut self, identifier: &str, name: &str) -> Self {
        self.devices.push(DeviceSummary {
            identifier: identifier.to_string(),
            name: name.to_string(),
        });
        self
    }

    /// Makes every subsequent call fail with [`SepfinderError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), SepfinderError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SepfinderError::Unavailable {
                message: "mock catalog is offline".into(),
                source: None,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for MockCatalog {
    fn name(&self) -> &str {
        "mock-catalog"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Catalog
    }

    async fn health_check(&self) -> Result<HealthStatus, SepfinderError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Ok(HealthStatus::Unhealthy("offline".into()))
        } else {
            Ok(HealthStatus::Healthy)
        }
    }
}

#[async_trait]
impl DeviceCatalog for MockCatalog {
    async fn list_devices(&self) -> Result<Vec<DeviceSummary>, SepfinderError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.devices.clone())
    }

    async fn get_device_detail(&self, identifier: &str) -> Result<DeviceDetail, SepfinderError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.details
            .get(identifier)
            .cloned()
            .ok_or_else(|| SepfinderError::Unavailable {
                message: format!("catalog returned 404 for {identifier}"),
                source: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn serves_configured_devices() {
        let catalog = MockCatalog::new().with_device(fixtures::iphone_x());
        let devices = catalog.list_devices().await.unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].identifier, "iPhone10,3");

        let detail = catalog.get_device_detail("iPhone10,3").await.unwrap();
        assert_eq!(detail.name, "iPhone X (Global)");
        assert_eq!(catalog.list_calls(), 1);
        assert_eq!(catalog.detail_calls(), 1);
    }

    #[tokio::test]
    async fn outage_fails_every_call() {
        let catalog = MockCatalog::new().with_device(fixtures::iphone_x());
        catalog.set_unavailable(true);
        assert!(catalog.list_devices().await.is_err());
        assert!(catalog.get_device_detail("iPhone10,3").await.is_err());

        catalog.set_unavailable(false);
        assert!(catalog.list_devices().await.is_ok());
    }
}
