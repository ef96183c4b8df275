// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for sepfinder.
//!
//! This crate provides the error type, the shared conversation types and the
//! adapter traits that the chat shell and the wizard meet at.

pub mod error;
pub mod traits;
pub mod types;

pub use error::SepfinderError;
pub use types::{AdapterType, ConversationId, HealthStatus, Keyboard, ParseMode, Reply};

pub use traits::{ChatShell, PluginAdapter};
