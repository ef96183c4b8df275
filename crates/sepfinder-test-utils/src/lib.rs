// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for sepfinder.
//!
//! Mock adapters and fixtures for fast, deterministic tests without
//! Telegram, ipsw.me, or `pzb`.
//!
//! # Components
//!
//! - [`MockShell`] - captures replies and typing indicators
//! - [`MockCatalog`] - in-memory device catalog with switchable outages
//! - [`MockExtractor`] - extraction stand-in that records its calls
//! - [`fixtures`] - catalog records and manifest plists

pub mod fixtures;
pub mod mock_catalog;
pub mod mock_extractor;
pub mod mock_shell;

pub use mock_catalog::MockCatalog;
pub use mock_extractor::{ExtractionCall, MockExtractor};
pub use mock_shell::{MockShell, ShellEvent};
