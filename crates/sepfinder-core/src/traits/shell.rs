// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat shell trait for messaging platform integrations.

use async_trait::async_trait;

use crate::error::SepfinderError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ConversationId, Reply};

/// The outbound half of a conversational front-end.
///
/// The wizard calls back into the shell to deliver prompts and reports.
/// Inbound delivery is the shell's own business: it calls
/// `Wizard::on_start` / `Wizard::on_text` one message at a time per conversation.
#[async_trait]
pub trait ChatShell: PluginAdapter {
    /// Sends a reply (text, parse mode, keyboard action) to a conversation.
    async fn send(&self, conversation: &ConversationId, reply: Reply) -> Result<(), SepfinderError>;

    /// Emits a typing indicator so the user knows work is in progress.
    async fn send_typing(&self, conversation: &ConversationId) -> Result<(), SepfinderError>;
}
