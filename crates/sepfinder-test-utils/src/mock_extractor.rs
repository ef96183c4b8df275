// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction stand-in that writes a canned manifest.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sepfinder_core::{AdapterType, HealthStatus, PluginAdapter, SepfinderError};
use sepfinder_manifest::Extractor;

/// One recorded call to [`MockExtractor::extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionCall {
    pub package_url: String,
    pub member: String,
    pub dest: PathBuf,
}

/// An extractor that writes `payload` to `dest/member`, or nothing at all.
#[derive(Debug, Clone, Default)]
pub struct MockExtractor {
    payload: Option<Vec<u8>>,
    delay: Option<Duration>,
    fail: bool,
    calls: Arc<Mutex<Vec<ExtractionCall>>>,
}

impl MockExtractor {
    /// Extractor that succeeds but leaves no file behind.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Extractor that writes `payload` as the extracted member.
    pub fn with_payload(payload: Vec<u8>) -> Self {
        Self {
            payload: Some(payload),
            ..Self::default()
        }
    }

    /// Extractor that cannot be run at all.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Sleeps for `delay` before writing.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn calls(&self) -> Vec<ExtractionCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl PluginAdapter for MockExtractor {
    fn name(&self) -> &str {
        "mock-extractor"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Extractor
    }

    async fn health_check(&self) -> Result<HealthStatus, SepfinderError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(
        &self,
        package_url: &str,
        member: &str,
        dest: &Path,
    ) -> Result<(), SepfinderError> {
        self.calls.lock().await.push(ExtractionCall {
            package_url: package_url.to_string(),
            member: member.to_string(),
            dest: dest.to_path_buf(),
        });

        if self.fail {
            return Err(SepfinderError::Extraction {
                message: "mock extractor refused to run".into(),
                source: None,
            });
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(payload) = &self.payload {
            tokio::fs::write(dest.join(member), payload)
                .await
                .map_err(|e| SepfinderError::Extraction {
                    message: format!("mock extractor could not write {member}: {e}"),
                    source: Some(Box::new(e)),
                })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_payload_and_records_call() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = MockExtractor::with_payload(b"hello".to_vec());
        extractor
            .extract("https://example.com/fw.ipsw", "BuildManifest.plist", dir.path())
            .await
            .unwrap();

        assert_eq!(
            std::fs::read(dir.path().join("BuildManifest.plist")).unwrap(),
            b"hello"
        );
        let calls = extractor.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].package_url, "https://example.com/fw.ipsw");
        assert_eq!(calls[0].dest, dir.path());
    }

    #[tokio::test]
    async fn empty_extractor_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        MockExtractor::empty()
            .extract("https://example.com/fw.ipsw", "BuildManifest.plist", dir.path())
            .await
            .unwrap();
        assert!(!dir.path().join("BuildManifest.plist").exists());
    }
}
