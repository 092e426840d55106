// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`Notifier`] implementation over the Telegram Bot API.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode, Recipient, UserId};
use tracing::debug;

use leetboard_core::{LeetboardError, Notifier};

/// Sends announcements and resolves display names via teloxide.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), LeetboardError> {
        self.bot
            .send_message(Recipient::Id(ChatId(chat_id)), text)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| LeetboardError::Delivery {
                message: format!("failed to send message to chat {chat_id}: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(())
    }

    async fn resolve_display_name(&self, chat_id: i64, user_id: i64) -> String {
        let member = match self
            .bot
            .get_chat_member(ChatId(chat_id), UserId(user_id as u64))
            .await
        {
            Ok(member) => member,
            Err(e) => {
                debug!(chat_id, user_id, error = %e, "chat member lookup failed");
                return user_id.to_string();
            }
        };
        if let Some(username) = &member.user.username {
            return format!("@{username}");
        }
        let full_name = member.user.full_name();
        if full_name.is_empty() {
            user_id.to_string()
        } else {
            full_name
        }
    }
}
