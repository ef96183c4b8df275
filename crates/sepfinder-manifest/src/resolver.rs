// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Build manifest resolution.
//!
//! Most firmware packages have a `BuildManifest.plist` published next to the
//! `.ipsw`, which is fetched directly. Packages on legacy download hosts (or
//! whose sibling fetch fails) fall back to extracting the manifest from the
//! package itself. Extraction happens at most once per resolution.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use sepfinder_catalog::FirmwareEntry;
use sepfinder_config::model::{ExtractionConfig, ManifestConfig};
use sepfinder_core::SepfinderError;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::extract::{ExtractionProgress, Extractor};
use crate::model::BuildManifest;

/// File name of the manifest, both beside the package and inside it.
pub const MANIFEST_FILENAME: &str = "BuildManifest.plist";

/// Where a manifest is going to come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// Fetch the sibling manifest URL, falling back to extraction.
    Direct(Url),
    /// Go straight to extraction.
    Extraction,
}

/// Obtains build manifests for firmware entries.
pub struct ManifestResolver {
    client: reqwest::Client,
    extractor: Arc<dyn Extractor>,
    legacy_hosts: Vec<String>,
    keepalive_interval: Duration,
}

impl ManifestResolver {
    pub fn new(
        client: reqwest::Client,
        extractor: Arc<dyn Extractor>,
        manifest: &ManifestConfig,
        extraction: &ExtractionConfig,
    ) -> Self {
        Self {
            client,
            extractor,
            legacy_hosts: manifest
                .legacy_hosts
                .iter()
                .map(|h| h.trim().to_ascii_lowercase())
                .collect(),
            keepalive_interval: Duration::from_millis(extraction.keepalive_interval_ms),
        }
    }

    /// Decides how the manifest for `firmware_url` will be obtained.
    pub fn plan(&self, firmware_url: &str) -> ManifestSource {
        let url = match Url::parse(firmware_url) {
            Ok(url) => url,
            Err(e) => {
                warn!(url = firmware_url, error = %e, "unparsable firmware URL, using extraction");
                return ManifestSource::Extraction;
            }
        };

        let legacy = url
            .host_str()
            .is_some_and(|host| self.legacy_hosts.iter().any(|l| l.eq_ignore_ascii_case(host)));
        if legacy {
            return ManifestSource::Extraction;
        }

        match sibling_manifest_url(&url) {
            Some(manifest_url) => ManifestSource::Direct(manifest_url),
            None => ManifestSource::Extraction,
        }
    }

    /// Resolves the build manifest of `firmware`.
    ///
    /// Parse failures are final on either path. `progress` is notified only
    /// when extraction runs.
    pub async fn resolve(
        &self,
        firmware: &FirmwareEntry,
        progress: &dyn ExtractionProgress,
    ) -> Result<BuildManifest, SepfinderError> {
        if let ManifestSource::Direct(manifest_url) = self.plan(&firmware.url) {
            match self.fetch_direct(&manifest_url).await {
                Some(bytes) => {
                    debug!(url = %manifest_url, size = bytes.len(), "fetched manifest directly");
                    return BuildManifest::from_bytes(&bytes);
                }
                None => {
                    info!(url = %manifest_url, "direct manifest unavailable, falling back to extraction");
                }
            }
        }

        self.extract(firmware, progress).await
    }

    /// Returns the body on a successful response, `None` on any failure.
    async fn fetch_direct(&self, manifest_url: &Url) -> Option<Vec<u8>> {
        let response = match self.client.get(manifest_url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %manifest_url, error = %e, "manifest request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!(url = %manifest_url, status = status.as_u16(), "manifest not served");
            return None;
        }

        match response.bytes().await {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(e) => {
                warn!(url = %manifest_url, error = %e, "failed to read manifest body");
                None
            }
        }
    }

    async fn extract(
        &self,
        firmware: &FirmwareEntry,
        progress: &dyn ExtractionProgress,
    ) -> Result<BuildManifest, SepfinderError> {
        progress.extraction_started().await;

        // Dropped on every return path, removing the directory and its contents.
        let workspace = tempfile::Builder::new()
            .prefix("sepfinder-")
            .tempdir()
            .map_err(|e| SepfinderError::Extraction {
                message: format!("failed to create extraction directory: {e}"),
                source: Some(Box::new(e)),
            })?;

        info!(url = firmware.url.as_str(), dir = %workspace.path().display(), "extracting manifest");
        self.run_with_keepalive(&firmware.url, workspace.path(), progress)
            .await?;

        let manifest_path = workspace.path().join(MANIFEST_FILENAME);
        let bytes = match tokio::fs::read(&manifest_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(url = firmware.url.as_str(), error = %e, "extraction produced no manifest");
                return Err(SepfinderError::ManifestUnavailable {
                    url: firmware.url.clone(),
                });
            }
        };

        BuildManifest::from_bytes(&bytes)
    }

    /// Runs the extractor, calling `progress.still_working()` every
    /// `keepalive_interval` until it finishes.
    async fn run_with_keepalive(
        &self,
        package_url: &str,
        dest: &Path,
        progress: &dyn ExtractionProgress,
    ) -> Result<(), SepfinderError> {
        let extraction = self.extractor.extract(package_url, MANIFEST_FILENAME, dest);
        tokio::pin!(extraction);

        let mut ticker = tokio::time::interval(self.keepalive_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                outcome = &mut extraction => return outcome,
                _ = ticker.tick() => progress.still_working().await,
            }
        }
    }
}

/// Replaces the last path segment of `firmware_url` with [`MANIFEST_FILENAME`].
///
/// Query and fragment are kept. Returns `None` for URLs that cannot have a
/// path (e.g. `mailto:`).
pub fn sibling_manifest_url(firmware_url: &Url) -> Option<Url> {
    let mut url = firmware_url.clone();
    {
        let mut segments = url.path_segments_mut().ok()?;
        segments.pop();
        segments.push(MANIFEST_FILENAME);
    }
    Some(url)
}
