// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sepfinder serve`: wires the adapters together and runs the bot.

use std::sync::Arc;
use std::time::Duration;

use sepfinder_catalog::{build_http_client, IpswClient};
use sepfinder_config::SepfinderConfig;
use sepfinder_core::{HealthStatus, PluginAdapter, SepfinderError};
use sepfinder_manifest::{ManifestResolver, PzbExtractor};
use sepfinder_telegram::{run_polling, TelegramShell};
use sepfinder_wizard::Wizard;
use tracing::{info, warn};

use crate::shutdown;

/// Runs the bot until SIGINT or SIGTERM.
pub async fn run_serve(config: SepfinderConfig, debug: bool) -> Result<(), SepfinderError> {
    init_tracing(&effective_log_level(&config, debug));

    info!(version = env!("CARGO_PKG_VERSION"), "starting sepfinder");

    let shell = TelegramShell::new(&config.telegram)?;

    let http = build_http_client(Duration::from_secs(config.catalog.timeout_secs))?;
    let catalog = IpswClient::with_client(http.clone(), &config.catalog.base_url);

    let extractor = PzbExtractor::new(&config.extraction);
    if let HealthStatus::Unhealthy(reason) = extractor.health_check().await? {
        warn!(program = extractor.program(), "{reason}");
    }
    let resolver = ManifestResolver::new(
        http,
        Arc::new(extractor),
        &config.manifest,
        &config.extraction,
    );

    let wizard = Arc::new(Wizard::new(
        Arc::new(catalog),
        resolver,
        Arc::new(shell.clone()),
    ));

    let cancel = shutdown::install_signal_handler();
    run_polling(
        shell.bot().clone(),
        wizard,
        config.telegram.allowed_users.clone(),
        cancel,
    )
    .await;

    info!("sepfinder stopped");
    Ok(())
}

/// `--debug` overrides the configured level.
fn effective_log_level(config: &SepfinderConfig, debug: bool) -> String {
    if debug {
        "debug".to_string()
    } else {
        config.bot.normalized_log_level()
    }
}

/// `RUST_LOG` wins; otherwise sepfinder crates log at `log_level` and
/// dependencies at warn.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sepfinder={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
