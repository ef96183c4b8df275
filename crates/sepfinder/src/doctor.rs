// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sepfinder doctor` command implementation.
//!
//! Runs diagnostic checks against the sepfinder environment to identify
//! configuration issues, an unreachable catalog, and a missing extraction tool.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use sepfinder_catalog::IpswClient;
use sepfinder_config::SepfinderConfig;
use sepfinder_core::{HealthStatus, PluginAdapter, SepfinderError};
use sepfinder_manifest::PzbExtractor;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check.
    pub name: String,
    /// Check status.
    pub status: CheckStatus,
    /// Human-readable message.
    pub message: String,
    /// Duration the check took.
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `sepfinder doctor` command.
///
/// Colored output is used only when stdout is a terminal. Returns an error
/// when any check fails.
pub async fn run_doctor(
    config: &SepfinderConfig,
    config_path: Option<&Path>,
) -> Result<(), SepfinderError> {
    let use_color = std::io::stdout().is_terminal();

    let results = vec![
        check_config(config_path),
        check_bot_token(config),
        check_catalog(config).await,
        check_extraction_program(config).await,
    ];

    println!();
    println!("  sepfinder doctor");
    println!("  {}", "-".repeat(50));

    for result in &results {
        println!("{}", format_line(result, use_color));
    }

    println!();

    let fail_count = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    let warn_count = results
        .iter()
        .filter(|r| r.status == CheckStatus::Warn)
        .count();

    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }

    println!();

    if fail_count > 0 {
        return Err(SepfinderError::Config(format!(
            "{fail_count} doctor check(s) failed"
        )));
    }
    Ok(())
}

fn format_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();

    if use_color {
        use colored::Colorize;

        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!(
            "    {symbol} {:<20} {message} ({duration_ms}ms)",
            result.name
        )
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

/// Check configuration loads without errors.
fn check_config(config_path: Option<&Path>) -> CheckResult {
    let start = Instant::now();
    let loaded = match config_path {
        Some(path) => sepfinder_config::load_and_validate_path(path),
        None => sepfinder_config::load_and_validate(),
    };

    match loaded {
        Ok(_) => CheckResult::new("Configuration", CheckStatus::Pass, "valid", start),
        Err(errors) => CheckResult::new(
            "Configuration",
            CheckStatus::Fail,
            format!("{} error(s)", errors.len()),
            start,
        ),
    }
}

/// `serve` cannot start without a token.
fn check_bot_token(config: &SepfinderConfig) -> CheckResult {
    let start = Instant::now();
    match config.telegram.bot_token.as_deref() {
        Some(token) if !token.is_empty() => {
            CheckResult::new("Telegram token", CheckStatus::Pass, "configured", start)
        }
        _ => CheckResult::new(
            "Telegram token",
            CheckStatus::Fail,
            "telegram.bot_token is not set",
            start,
        ),
    }
}

/// Check the device catalog answers.
async fn check_catalog(config: &SepfinderConfig) -> CheckResult {
    let start = Instant::now();

    let client = match IpswClient::new(&config.catalog) {
        Ok(client) => client,
        Err(e) => {
            return CheckResult::new(
                "Catalog",
                CheckStatus::Fail,
                format!("HTTP client error: {e}"),
                start,
            );
        }
    };

    match client.health_check().await {
        Ok(status) => health_result("Catalog", status, "reachable", CheckStatus::Fail, start),
        Err(e) => CheckResult::new("Catalog", CheckStatus::Fail, e.to_string(), start),
    }
}

/// A missing extraction program only affects firmwares without a direct manifest.
async fn check_extraction_program(config: &SepfinderConfig) -> CheckResult {
    let start = Instant::now();
    let extractor = PzbExtractor::new(&config.extraction);
    let found = format!("`{}` found", extractor.program());

    match extractor.health_check().await {
        Ok(status) => health_result("Extraction", status, &found, CheckStatus::Warn, start),
        Err(e) => CheckResult::new("Extraction", CheckStatus::Warn, e.to_string(), start),
    }
}

fn health_result(
    name: &str,
    status: HealthStatus,
    healthy_message: &str,
    unhealthy: CheckStatus,
    start: Instant,
) -> CheckResult {
    match status {
        HealthStatus::Healthy => CheckResult::new(name, CheckStatus::Pass, healthy_message, start),
        HealthStatus::Degraded(reason) => CheckResult::new(name, CheckStatus::Warn, reason, start),
        HealthStatus::Unhealthy(reason) => CheckResult::new(name, unhealthy, reason, start),
    }
}
