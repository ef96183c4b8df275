// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sepfinder.toml` > `~/.config/sepfinder/sepfinder.toml`
//! > `/etc/sepfinder/sepfinder.toml` with environment variable overrides via the
//! `SEPFINDER_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SepfinderConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/sepfinder/sepfinder.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "sepfinder.toml";

/// Returns the per-user config path (`$XDG_CONFIG_HOME/sepfinder/sepfinder.toml`).
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sepfinder").join("sepfinder.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sepfinder/sepfinder.toml`
/// 3. `~/.config/sepfinder/sepfinder.toml`
/// 4. `./sepfinder.toml`
/// 5. `SEPFINDER_*` environment variables
pub fn load_config() -> Result<SepfinderConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SepfinderConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SepfinderConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SepfinderConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SepfinderConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SepfinderConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Top-level config sections addressable from `SEPFINDER_*` variables.
const ENV_SECTIONS: &[&str] = &["bot", "telegram", "catalog", "manifest", "extraction"];

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `SEPFINDER_TELEGRAM_BOT_TOKEN` must map to `telegram.bot_token`,
/// not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("SEPFINDER_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a prefix-stripped env key onto its dotted config path.
///
/// Figment hands over the key in its original case, so it is lowercased
/// first. Only the leading section name is split off, so
/// `TELEGRAM_BOT_TOKEN` becomes `telegram.bot_token`.
pub fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_on_section_only() {
        assert_eq!(map_env_key("telegram_bot_token"), "telegram.bot_token");
        assert_eq!(map_env_key("bot_log_level"), "bot.log_level");
        assert_eq!(map_env_key("catalog_base_url"), "catalog.base_url");
        assert_eq!(
            map_env_key("extraction_keepalive_interval_ms"),
            "extraction.keepalive_interval_ms"
        );
    }

    #[test]
    fn uppercase_env_keys_are_lowercased() {
        assert_eq!(map_env_key("TELEGRAM_BOT_TOKEN"), "telegram.bot_token");
        assert_eq!(map_env_key("BOT_LOG_LEVEL"), "bot.log_level");
        assert_eq!(map_env_key("Catalog_Timeout_Secs"), "catalog.timeout_secs");
    }

    #[test]
    fn unknown_env_keys_pass_through() {
        assert_eq!(map_env_key("whatever"), "whatever");
        assert_eq!(map_env_key("botany"), "botany");
    }
}
