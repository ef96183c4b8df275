// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the wizard and the chat shells.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifies one conversation (a Telegram chat, a test user, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a [`PluginAdapter`](crate::PluginAdapter).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Catalog,
    Extractor,
}

/// How the shell should interpret the text of a [`Reply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    #[default]
    Plain,
    Html,
}

/// What happens to the reply keyboard when a [`Reply`] is delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Keyboard {
    /// Leave whatever keyboard the user currently sees.
    #[default]
    Keep,
    /// Present a fixed set of reply options, laid out in rows.
    Options(Vec<Vec<String>>),
    /// Remove the reply keyboard.
    Remove,
}

impl Keyboard {
    /// Lays the options out two per row.
    pub fn two_per_row<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rows: Vec<Vec<String>> = Vec::new();
        for (i, option) in options.into_iter().enumerate() {
            if i % 2 == 0 {
                rows.push(Vec::with_capacity(2));
            }
            if let Some(row) = rows.last_mut() {
                row.push(option.into());
            }
        }
        Self::Options(rows)
    }
}

/// A message from the wizard to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub parse_mode: ParseMode,
    pub keyboard: Keyboard,
}

impl Reply {
    /// Plain text that leaves the keyboard untouched.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::Plain,
            keyboard: Keyboard::Keep,
        }
    }

    /// HTML-formatted text. Callers are responsible for escaping interpolated values.
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::Html,
            keyboard: Keyboard::Keep,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = keyboard;
        self
    }

    pub fn remove_keyboard(self) -> Self {
        self.with_keyboard(Keyboard::Remove)
    }
}
