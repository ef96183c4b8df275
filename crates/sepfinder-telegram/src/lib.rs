// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram front-end for sepfinder.
//!
//! [`TelegramShell`] implements [`ChatShell`] over the Bot API via teloxide,
//! and [`run_polling`] feeds incoming messages to the [`Wizard`] until the
//! cancellation token fires.

pub mod handler;

use std::sync::Arc;

use async_trait::async_trait;
use sepfinder_config::model::TelegramConfig;
use sepfinder_core::{
    AdapterType, ChatShell, ConversationId, HealthStatus, Keyboard, ParseMode, PluginAdapter,
    Reply, SepfinderError,
};
use sepfinder_wizard::Wizard;
use teloxide::prelude::*;
use teloxide::types::{
    ChatAction, ChatId, KeyboardButton, KeyboardMarkup, KeyboardRemove,
    ParseMode as TelegramParseMode, ReplyMarkup,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Delivers wizard replies to Telegram chats.
#[derive(Clone)]
pub struct TelegramShell {
    bot: Bot,
}

impl TelegramShell {
    /// Creates a shell for the configured bot.
    ///
    /// Requires `config.bot_token` to be set.
    pub fn new(config: &TelegramConfig) -> Result<Self, SepfinderError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            SepfinderError::Config("telegram.bot_token is required to run the bot".into())
        })?;

        if token.is_empty() {
            return Err(SepfinderError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        Ok(Self {
            bot: Bot::new(token),
        })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

#[async_trait]
impl PluginAdapter for TelegramShell {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, SepfinderError> {
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }
}

#[async_trait]
impl ChatShell for TelegramShell {
    async fn send(&self, conversation: &ConversationId, reply: Reply) -> Result<(), SepfinderError> {
        let chat_id = parse_chat_id(conversation)?;

        let mut request = self.bot.send_message(chat_id, reply.text);
        if reply.parse_mode == ParseMode::Html {
            request = request.parse_mode(TelegramParseMode::Html);
        }
        if let Some(markup) = reply_markup(&reply.keyboard) {
            request = request.reply_markup(markup);
        }

        request.await.map_err(|e| SepfinderError::Channel {
            message: format!("failed to send message: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(())
    }

    async fn send_typing(&self, conversation: &ConversationId) -> Result<(), SepfinderError> {
        let chat_id = parse_chat_id(conversation)?;

        self.bot
            .send_chat_action(chat_id, ChatAction::Typing)
            .await
            .map_err(|e| SepfinderError::Channel {
                message: format!("failed to send typing indicator: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(())
    }
}

/// Maps a keyboard action to Telegram reply markup. `Keep` sends none.
pub fn reply_markup(keyboard: &Keyboard) -> Option<ReplyMarkup> {
    match keyboard {
        Keyboard::Keep => None,
        Keyboard::Remove => Some(ReplyMarkup::KeyboardRemove(KeyboardRemove::new())),
        Keyboard::Options(rows) => Some(ReplyMarkup::Keyboard(KeyboardMarkup::new(
            rows.iter()
                .map(|row| row.iter().map(|label| KeyboardButton::new(label.clone()))),
        ))),
    }
}

/// Conversations are keyed by the Telegram chat id.
pub fn parse_chat_id(conversation: &ConversationId) -> Result<ChatId, SepfinderError> {
    conversation
        .as_str()
        .parse::<i64>()
        .map(ChatId)
        .map_err(|e| SepfinderError::Channel {
            message: format!("invalid chat_id `{conversation}`: {e}"),
            source: None,
        })
}

/// Long-polls Telegram and routes messages to `wizard` until `cancel` fires.
///
/// Updates from one chat are handled in order; different chats run concurrently.
pub async fn run_polling(
    bot: Bot,
    wizard: Arc<Wizard>,
    allowed_users: Vec<String>,
    cancel: CancellationToken,
) {
    let allowed_users: Arc<Vec<String>> = Arc::new(allowed_users);
    if allowed_users.is_empty() {
        info!("telegram.allowed_users is empty, the bot answers everyone");
    }

    let handler = Update::filter_message().endpoint(move |msg: Message| {
        let wizard = wizard.clone();
        let allowed = allowed_users.clone();
        async move {
            handler::handle_message(&wizard, &msg, &allowed).await;
            respond(())
        }
    });

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .default_handler(|_| async {}) // Silently ignore non-message updates
        .build();

    let shutdown = dispatcher.shutdown_token();
    tokio::spawn(async move {
        cancel.cancelled().await;
        debug!("stopping Telegram dispatcher");
        if let Ok(stopped) = shutdown.shutdown() {
            stopped.await;
        }
    });

    info!("starting Telegram long polling");
    dispatcher.dispatch().await;
    info!("Telegram long polling stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requires_bot_token() {
        let config = TelegramConfig {
            bot_token: None,
            allowed_users: vec![],
        };
        assert!(TelegramShell::new(&config).is_err());
    }

    #[test]
    fn new_rejects_empty_token() {
        let config = TelegramConfig {
            bot_token: Some(String::new()),
            allowed_users: vec![],
        };
        assert!(TelegramShell::new(&config).is_err());
    }

    #[test]
    fn new_accepts_valid_token() {
        let config = TelegramConfig {
            bot_token: Some("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11".into()),
            allowed_users: vec![],
        };
        assert!(TelegramShell::new(&config).is_ok());
    }

    #[test]
    fn plugin_adapter_metadata() {
        let config = TelegramConfig {
            bot_token: Some("test:token".into()),
            allowed_users: vec![],
        };
        let shell = TelegramShell::new(&config).unwrap();
        assert_eq!(shell.name(), "telegram");
        assert_eq!(shell.version(), semver::Version::new(0, 1, 0));
        assert_eq!(shell.adapter_type(), AdapterType::Channel);
    }

    #[test]
    fn chat_id_parses_negative_group_ids() {
        assert_eq!(parse_chat_id(&ConversationId::new("12345")).unwrap().0, 12345);
        assert_eq!(
            parse_chat_id(&ConversationId::new("-100123")).unwrap().0,
            -100123
        );
        assert!(parse_chat_id(&ConversationId::new("telegram")).is_err());
    }

    #[test]
    fn keep_sends_no_markup() {
        assert!(reply_markup(&Keyboard::Keep).is_none());
    }

    #[test]
    fn remove_maps_to_keyboard_remove() {
        assert!(matches!(
            reply_markup(&Keyboard::Remove),
            Some(ReplyMarkup::KeyboardRemove(_))
        ));
    }

    #[test]
    fn options_keep_row_layout() {
        let keyboard = Keyboard::Options(vec![
            vec!["iPhone".into(), "iPad".into()],
            vec!["iPod touch".into()],
        ]);
        match reply_markup(&keyboard) {
            Some(ReplyMarkup::Keyboard(markup)) => {
                assert_eq!(markup.keyboard.len(), 2);
                assert_eq!(markup.keyboard[0][1].text, "iPad");
                assert_eq!(markup.keyboard[1][0].text, "iPod touch");
            }
            other => panic!("expected reply keyboard, got {other:?}"),
        }
    }
}
