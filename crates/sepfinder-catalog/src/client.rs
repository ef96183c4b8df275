// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the ipsw.me v4 API.

use std::time::Duration;

use async_trait::async_trait;
use sepfinder_config::model::CatalogConfig;
use sepfinder_core::{AdapterType, HealthStatus, PluginAdapter, SepfinderError};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{DeviceDetail, DeviceSummary};
use crate::DeviceCatalog;

/// Builds the reqwest client shared by catalog and manifest requests.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, SepfinderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("sepfinder/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SepfinderError::Internal(format!("failed to build HTTP client: {e}")))
}

/// Catalog client backed by the public ipsw.me API.
///
/// Requests are single-shot: any failure surfaces as
/// [`SepfinderError::Unavailable`] without retry.
#[derive(Debug, Clone)]
pub struct IpswClient {
    client: reqwest::Client,
    base_url: String,
}

impl IpswClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, SepfinderError> {
        let client = build_http_client(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Reuses an existing reqwest client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SepfinderError> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = url.as_str(), "catalog request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SepfinderError::unavailable(format!("GET {url} failed"), e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = url.as_str(), status = status.as_u16(), "catalog returned error status");
            return Err(SepfinderError::Unavailable {
                message: format!("GET {url} returned {status}"),
                source: None,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SepfinderError::unavailable(format!("GET {url} returned invalid JSON"), e))
    }
}

#[async_trait]
impl PluginAdapter for IpswClient {
    fn name(&self) -> &str {
        "ipsw.me"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Catalog
    }

    async fn health_check(&self) -> Result<HealthStatus, SepfinderError> {
        match self.list_devices().await {
            Ok(devices) if devices.is_empty() => Ok(HealthStatus::Degraded(
                "catalog returned no devices".into(),
            )),
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("catalog unreachable: {e}"))),
        }
    }
}

#[async_trait]
impl DeviceCatalog for IpswClient {
    async fn list_devices(&self) -> Result<Vec<DeviceSummary>, SepfinderError> {
        self.get_json("/v4/devices").await
    }

    async fn get_device_detail(&self, identifier: &str) -> Result<DeviceDetail, SepfinderError> {
        self.get_json(&format!("/v4/device/{identifier}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> IpswClient {
        IpswClient::new(&CatalogConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = test_client("https://api.ipsw.me/");
        assert_eq!(client.base_url(), "https://api.ipsw.me");
    }

    #[tokio::test]
    async fn list_devices_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "iPhone X (Global)", "identifier": "iPhone10,3", "boardconfig": "D22AP"},
                {"name": "iPad Air", "identifier": "iPad4,1", "boardconfig": "J71AP"}
            ])))
            .mount(&server)
            .await;

        let devices = test_client(&server.uri()).list_devices().await.unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].identifier, "iPhone10,3");
        assert_eq!(devices[1].name, "iPad Air");
    }

    #[tokio::test]
    async fn list_devices_error_status_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/devices"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).list_devices().await.unwrap_err();
        assert!(matches!(err, SepfinderError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn invalid_json_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).list_devices().await.unwrap_err();
        assert!(matches!(err, SepfinderError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn device_detail_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/device/iPhone10,3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "iPhone X (Global)",
                "identifier": "iPhone10,3",
                "boards": [{"boardconfig": "D22AP"}],
                "firmwares": [{
                    "version": "16.7.10",
                    "buildid": "20H350",
                    "url": "https://updates.cdn-apple.com/x/iPhone10,3_16.7.10_20H350_Restore.ipsw",
                    "signed": true
                }]
            })))
            .mount(&server)
            .await;

        let detail = test_client(&server.uri())
            .get_device_detail("iPhone10,3")
            .await
            .unwrap();
        assert_eq!(detail.name, "iPhone X (Global)");
        assert_eq!(detail.eligible_boards(), vec!["D22AP"]);
        assert_eq!(detail.firmwares[0].build_id, "20H350");
    }

    #[tokio::test]
    async fn device_detail_not_found_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .get_device_detail("iPhone99,9")
            .await
            .unwrap_err();
        assert!(matches!(err, SepfinderError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn health_check_reports_unreachable_catalog() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let status = test_client(&server.uri()).health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Unhealthy(_)));
    }
}
