// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message routing and authorization filtering.
//!
//! Decides whether an incoming Telegram message should reach the wizard and
//! whether it is `/start` or ordinary text.

use sepfinder_core::ConversationId;
use sepfinder_wizard::Wizard;
use teloxide::prelude::*;
use tracing::{debug, error};

const START_COMMAND: &str = "/start";

/// What an incoming message means to the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound<'a> {
    Start,
    Text(&'a str),
}

/// Checks whether the message sender is authorized.
///
/// Authorization passes if the sender's user ID (as string) or username
/// matches any entry in the `allowed_users` list. An empty list admits
/// everyone.
///
/// With a non-empty list, messages without a sender (e.g., channel posts)
/// always return `false`.
pub fn is_authorized(msg: &Message, allowed_users: &[String]) -> bool {
    if allowed_users.is_empty() {
        return true;
    }

    let Some(user) = msg.from.as_ref() else {
        return false;
    };

    let user_id_str = user.id.0.to_string();

    allowed_users.iter().any(|allowed| {
        if *allowed == user_id_str {
            return true;
        }
        // Username match, with or without @ prefix
        user.username.as_deref().is_some_and(|username| {
            let allowed_clean = allowed.strip_prefix('@').unwrap_or(allowed);
            username.eq_ignore_ascii_case(allowed_clean)
        })
    })
}

/// Returns `true` for `/start`, `/start@SomeBot` and `/start <payload>`.
pub fn is_start_command(text: &str) -> bool {
    let command = text.split_whitespace().next().unwrap_or_default();
    let command = command.split('@').next().unwrap_or_default();
    command == START_COMMAND
}

/// Classifies a message. Non-text messages are ignored.
pub fn classify(msg: &Message) -> Option<Inbound<'_>> {
    let text = msg.text()?;
    if is_start_command(text) {
        Some(Inbound::Start)
    } else {
        Some(Inbound::Text(text))
    }
}

/// The wizard conversation a message belongs to.
pub fn conversation_id(msg: &Message) -> ConversationId {
    ConversationId::new(msg.chat.id.0.to_string())
}

/// Runs one message through the wizard, logging any failure.
pub async fn handle_message(wizard: &Wizard, msg: &Message, allowed_users: &[String]) {
    if !is_authorized(msg, allowed_users) {
        debug!(chat_id = msg.chat.id.0, "ignoring unauthorized user");
        return;
    }

    let Some(inbound) = classify(msg) else {
        debug!(msg_id = msg.id.0, "ignoring non-text message");
        return;
    };

    let conversation = conversation_id(msg);
    let result = match inbound {
        Inbound::Start => wizard.on_start(&conversation).await,
        Inbound::Text(text) => wizard.on_text(&conversation, text).await,
    };

    if let Err(e) = result {
        error!(conversation = %conversation, error = %e, "failed to handle message");
    }
}
