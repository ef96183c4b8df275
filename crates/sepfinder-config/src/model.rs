// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level sepfinder configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SepfinderConfig {
    /// Process-level settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Firmware catalog API settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Build manifest resolution settings.
    #[serde(default)]
    pub manifest: ManifestConfig,

    /// Extraction fallback settings.
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl BotConfig {
    /// `log_level` trimmed and lowercased, as validated and as handed to the
    /// log filter.
    pub fn normalized_log_level(&self) -> String {
        self.log_level.trim().to_ascii_lowercase()
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required by `sepfinder serve`.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Telegram user IDs or usernames allowed to use the bot.
    /// An empty list leaves the bot open to everyone.
    #[serde(default)]
    pub allowed_users: Vec<String>,
}

/// Firmware catalog (ipsw.me) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Base URL of the catalog API, without the `/v4` suffix.
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds for catalog and manifest fetches.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_catalog_base_url() -> String {
    "https://api.ipsw.me".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Build manifest resolution configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestConfig {
    /// Download hosts that never serve a sibling `BuildManifest.plist`.
    /// Firmwares hosted here always go through extraction.
    #[serde(default = "default_legacy_hosts")]
    pub legacy_hosts: Vec<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            legacy_hosts: default_legacy_hosts(),
        }
    }
}

fn default_legacy_hosts() -> Vec<String> {
    vec!["appldnld.apple.com".to_string()]
}

/// Extraction fallback configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionConfig {
    /// Program used to pull a single member out of a remote restore package.
    #[serde(default = "default_extraction_program")]
    pub program: String,

    /// Interval between typing indicators while extraction runs.
    #[serde(default = "default_keepalive_interval_ms")]
    pub keepalive_interval_ms: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            program: default_extraction_program(),
            keepalive_interval_ms: default_keepalive_interval_ms(),
        }
    }
}

fn default_extraction_program() -> String {
    "pzb".to_string()
}

fn default_keepalive_interval_ms() -> u64 {
    1000
}
