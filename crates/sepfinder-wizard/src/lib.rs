// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The sepfinder conversation wizard.
//!
//! A [`Wizard`] keeps one [`WizardStep`] per conversation and advances it as
//! the user picks a device type, a model, a board config and finally a
//! firmware version, at which point the build manifest is resolved and the
//! SEP and baseband paths are reported back through the [`ChatShell`].
//!
//! [`ChatShell`]: sepfinder_core::ChatShell

pub mod prompts;
pub mod report;
pub mod session;
pub mod wizard;

pub use report::{escape_html, format_report};
pub use session::{DeviceType, WizardStep};
pub use wizard::Wizard;
