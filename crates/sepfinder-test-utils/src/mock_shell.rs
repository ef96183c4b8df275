// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat shell that captures everything the wizard sends.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sepfinder_core::{
    AdapterType, ChatShell, ConversationId, HealthStatus, PluginAdapter, Reply, SepfinderError,
};

/// One thing the wizard asked the shell to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    Reply(ConversationId, Reply),
    Typing(ConversationId),
}

/// A mock chat shell for testing.
///
/// Every `send()` and `send_typing()` is recorded in order and can be
/// inspected with [`events`](Self::events), [`replies`](Self::replies) and
/// friends.
#[derive(Debug, Clone, Default)]
pub struct MockShell {
    events: Arc<Mutex<Vec<ShellEvent>>>,
}

impl MockShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, oldest first.
    pub async fn events(&self) -> Vec<ShellEvent> {
        self.events.lock().await.clone()
    }

    /// Replies sent to any conversation, oldest first.
    pub async fn replies(&self) -> Vec<Reply> {
        self.events
            .lock()
            .await
            .iter()
            .filter_map(|e| match e {
                ShellEvent::Reply(_, reply) => Some(reply.clone()),
                ShellEvent::Typing(_) => None,
            })
            .collect()
    }

    /// The most recent reply, if any.
    pub async fn last_reply(&self) -> Option<Reply> {
        self.replies().await.pop()
    }

    /// Number of typing indicators sent.
    pub async fn typing_count(&self) -> usize {
        self.events
            .lock()
            .await
            .iter()
            .filter(|e| matches!(e, ShellEvent::Typing(_)))
            .count()
    }

    /// Forget everything recorded so far.
    pub async fn clear(&self) {
        self.events.lock().await.clear();
    }
}

#[async_trait]
impl PluginAdapter for MockShell {
    fn name(&self) -> &str {
        "mock-shell"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, SepfinderError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ChatShell for MockShell {
    async fn send(&self, conversation: &ConversationId, reply: Reply) -> Result<(), SepfinderError> {
        self.events
            .lock()
            .await
            .push(ShellEvent::Reply(conversation.clone(), reply));
        Ok(())
    }

    async fn send_typing(&self, conversation: &ConversationId) -> Result<(), SepfinderError> {
        self.events
            .lock()
            .await
            .push(ShellEvent::Typing(conversation.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_replies_and_typing_in_order() {
        let shell = MockShell::new();
        let chat = ConversationId::new("1");

        shell.send(&chat, Reply::text("first")).await.unwrap();
        shell.send_typing(&chat).await.unwrap();
        shell.send(&chat, Reply::text("second")).await.unwrap();

        let events = shell.events().await;
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], ShellEvent::Typing(chat.clone()));
        assert_eq!(shell.typing_count().await, 1);
        assert_eq!(shell.last_reply().await.unwrap().text, "second");
    }

    #[tokio::test]
    async fn clear_forgets_events() {
        let shell = MockShell::new();
        shell.send(&ConversationId::new("1"), Reply::text("x")).await.unwrap();
        shell.clear().await;
        assert!(shell.events().await.is_empty());
    }
}
