// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for sepfinder.

use thiserror::Error;

/// The primary error type used across all sepfinder crates.
#[derive(Debug, Error)]
pub enum SepfinderError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Chat transport errors (send failure, malformed conversation id).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An upstream catalog or manifest request did not succeed.
    #[error("upstream unavailable: {message}")]
    Unavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No build manifest could be obtained for a firmware, not even by extraction.
    #[error("build manifest unavailable for {url}")]
    ManifestUnavailable { url: String },

    /// Build manifest bytes are not a valid property list.
    #[error("failed to parse build manifest: {source}")]
    ManifestParse {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No build identity in the manifest matches the requested board config.
    #[error("no build identity for board config {board_config}")]
    BoardNotFound { board_config: String },

    /// The manifest is missing a structurally required field.
    #[error("malformed build manifest: {0}")]
    ManifestMalformed(String),

    /// The extraction collaborator could not be run.
    #[error("extraction failed: {message}")]
    Extraction {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SepfinderError {
    /// Builds an [`Unavailable`](SepfinderError::Unavailable) error with a source.
    pub fn unavailable(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
