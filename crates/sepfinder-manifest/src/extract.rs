// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction collaborator: pulls a single member out of a remote restore
//! package without downloading the whole archive.
//!
//! The production implementation shells out to `pzb` (partialZipBrowser).

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use sepfinder_config::model::ExtractionConfig;
use sepfinder_core::{AdapterType, HealthStatus, PluginAdapter, SepfinderError};
use tracing::{debug, warn};

/// Extracts one named member of a remote package into a directory.
///
/// The only output contract is the presence of `dest/member` once the call
/// returns. Callers check for the file themselves; `Err` is reserved for
/// failing to run the extraction at all.
#[async_trait]
pub trait Extractor: PluginAdapter {
    async fn extract(
        &self,
        package_url: &str,
        member: &str,
        dest: &Path,
    ) -> Result<(), SepfinderError>;
}

/// Progress hooks invoked by the resolver around an extraction.
#[async_trait]
pub trait ExtractionProgress: Send + Sync {
    /// Called once before extraction begins.
    async fn extraction_started(&self);

    /// Called at a fixed cadence while extraction is running.
    async fn still_working(&self);
}

/// Progress sink that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

#[async_trait]
impl ExtractionProgress for NoProgress {
    async fn extraction_started(&self) {}

    async fn still_working(&self) {}
}

/// Runs `pzb <url> -g <member>` inside the destination directory.
#[derive(Debug, Clone)]
pub struct PzbExtractor {
    program: String,
}

impl PzbExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            program: config.program.clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl PluginAdapter for PzbExtractor {
    fn name(&self) -> &str {
        "pzb"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Extractor
    }

    async fn health_check(&self) -> Result<HealthStatus, SepfinderError> {
        match find_program(&self.program) {
            Some(path) => {
                debug!(path = %path.display(), "extraction program found");
                Ok(HealthStatus::Healthy)
            }
            None => Ok(HealthStatus::Unhealthy(format!(
                "`{}` not found on PATH; firmwares without a direct manifest cannot be resolved",
                self.program
            ))),
        }
    }
}

#[async_trait]
impl Extractor for PzbExtractor {
    async fn extract(
        &self,
        package_url: &str,
        member: &str,
        dest: &Path,
    ) -> Result<(), SepfinderError> {
        debug!(program = self.program.as_str(), url = package_url, member, "starting extraction");

        let output = tokio::process::Command::new(&self.program)
            .arg(package_url)
            .arg("-g")
            .arg(member)
            .current_dir(dest)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| SepfinderError::Extraction {
                message: format!("failed to run `{}`: {e}", self.program),
                source: Some(Box::new(e)),
            })?;

        if !output.status.success() {
            warn!(
                program = self.program.as_str(),
                url = package_url,
                exit_code = output.status.code().unwrap_or(-1),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "extraction exited unsuccessfully"
            );
        }

        Ok(())
    }
}

/// Resolves `program` the way a shell would: paths containing a separator
/// are taken as-is, bare names are searched on `PATH` (with `PATHEXT` on
/// Windows).
pub fn find_program(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_program_on_path() {
        // `sh` is present on every unix test host.
        #[cfg(unix)]
        assert!(find_program("sh").is_some());
        assert!(find_program("definitely-not-a-real-program-4242").is_none());
    }

    #[test]
    fn find_program_with_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake-pzb");
        std::fs::write(&path, b"#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        assert!(find_program(path.to_str().unwrap()).is_some());
        assert!(find_program(dir.path().join("missing").to_str().unwrap()).is_none());
    }

    #[tokio::test]
    async fn missing_program_is_an_extraction_error() {
        let extractor = PzbExtractor::new(&ExtractionConfig {
            program: "definitely-not-a-real-program-4242".into(),
            keepalive_interval_ms: 1000,
        });
        let dir = tempfile::tempdir().unwrap();
        let err = extractor
            .extract("https://example.com/a.ipsw", "BuildManifest.plist", dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, SepfinderError::Extraction { .. }));
    }

    #[tokio::test]
    async fn health_check_flags_missing_program() {
        let extractor = PzbExtractor::new(&ExtractionConfig {
            program: "definitely-not-a-real-program-4242".into(),
            keepalive_interval_ms: 1000,
        });
        assert!(matches!(
            extractor.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runs_program_inside_destination() {
        use std::os::unix::fs::PermissionsExt;

        // Stand-in for pzb: writes the requested member into the cwd.
        let bin = tempfile::tempdir().unwrap();
        let script = bin.path().join("fake-pzb");
        std::fs::write(&script, "#!/bin/sh\necho \"$1\" > \"$3\"\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let extractor = PzbExtractor::new(&ExtractionConfig {
            program: script.to_str().unwrap().to_string(),
            keepalive_interval_ms: 1000,
        });
        let dest = tempfile::tempdir().unwrap();
        extractor
            .extract("https://example.com/a.ipsw", "BuildManifest.plist", dest.path())
            .await
            .unwrap();

        let written = std::fs::read_to_string(dest.path().join("BuildManifest.plist")).unwrap();
        assert_eq!(written.trim(), "https://example.com/a.ipsw");
    }
}
