// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes.

use crate::diagnostic::ConfigError;
use crate::model::SepfinderConfig;

/// Log levels accepted by `bot.log_level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &SepfinderConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let level = config.bot.normalized_log_level();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(format!(
            "bot.log_level `{}` is not one of {}",
            config.bot.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    let base_url = config.catalog.base_url.trim();
    if base_url.is_empty() {
        fail("catalog.base_url must not be empty".to_string());
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        fail(format!(
            "catalog.base_url `{base_url}` must start with http:// or https://"
        ));
    }

    if config.catalog.timeout_secs == 0 {
        fail("catalog.timeout_secs must be greater than 0".to_string());
    }

    if config.extraction.program.trim().is_empty() {
        fail("extraction.program must not be empty".to_string());
    }

    if config.extraction.keepalive_interval_ms == 0 {
        fail("extraction.keepalive_interval_ms must be greater than 0".to_string());
    }

    if config
        .manifest
        .legacy_hosts
        .iter()
        .any(|host| host.trim().is_empty())
    {
        fail("manifest.legacy_hosts must not contain empty entries".to_string());
    }

    if let Some(token) = &config.telegram.bot_token
        && token.trim().is_empty()
    {
        fail("telegram.bot_token must not be empty when set".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&SepfinderConfig::default()).is_ok());
    }

    #[test]
    fn unknown_log_level_fails() {
        let mut config = SepfinderConfig::default();
        config.bot.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "bot.log_level"));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = SepfinderConfig::default();
        config.bot.log_level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn non_http_base_url_fails() {
        let mut config = SepfinderConfig::default();
        config.catalog.base_url = "ftp://api.ipsw.me".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "catalog.base_url"));
    }

    #[test]
    fn zero_intervals_fail_together() {
        let mut config = SepfinderConfig::default();
        config.catalog.timeout_secs = 0;
        config.extraction.keepalive_interval_ms = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(has_error(&errors, "timeout_secs"));
        assert!(has_error(&errors, "keepalive_interval_ms"));
    }

    #[test]
    fn empty_program_fails() {
        let mut config = SepfinderConfig::default();
        config.extraction.program = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "extraction.program"));
    }

    #[test]
    fn empty_bot_token_fails() {
        let mut config = SepfinderConfig::default();
        config.telegram.bot_token = Some(String::new());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "bot_token"));
    }
}
