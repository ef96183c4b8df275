// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Build manifest handling for sepfinder.
//!
//! - [`resolver`]: obtains a manifest by direct fetch or extraction fallback
//! - [`extract`]: the extraction collaborator and its progress hooks
//! - [`model`]: the `BuildManifest.plist` structure
//! - [`query`]: SEP / baseband lookup for one board config

pub mod extract;
pub mod model;
pub mod query;
pub mod resolver;

pub use extract::{find_program, ExtractionProgress, Extractor, NoProgress, PzbExtractor};
pub use model::BuildManifest;
pub use query::{find_components, ComponentPaths, ABSENT_COMPONENT};
pub use resolver::{sibling_manifest_url, ManifestResolver, ManifestSource, MANIFEST_FILENAME};
