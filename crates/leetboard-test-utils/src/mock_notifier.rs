// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock notifier capturing outbound chat messages for assertions.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use leetboard_core::{LeetboardError, Notifier};

/// One captured outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: i64,
    pub text: String,
}

/// A capturing notifier for testing.
///
/// Messages passed to `send_message` are recorded in order; chats can be
/// scripted to fail delivery so tests can show delivery faults never roll
/// back ledger state.
#[derive(Default)]
pub struct MockNotifier {
    sent: Mutex<Vec<SentMessage>>,
    display_names: Mutex<HashMap<(i64, i64), String>>,
    failing_chats: Mutex<HashSet<i64>>,
}

impl MockNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Script a display name for (chat, user).
    pub async fn set_display_name(&self, chat_id: i64, user_id: i64, name: &str) {
        self.display_names
            .lock()
            .await
            .insert((chat_id, user_id), name.to_string());
    }

    /// Make every send into `chat_id` fail with a delivery error.
    pub async fn fail_chat(&self, chat_id: i64) {
        self.failing_chats.lock().await.insert(chat_id);
    }

    /// All captured messages, in send order.
    pub async fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent.lock().await.clone()
    }

    /// Count of captured messages.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Clear captured messages.
    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), LeetboardError> {
        if self.failing_chats.lock().await.contains(&chat_id) {
            return Err(LeetboardError::Delivery {
                message: format!("scripted delivery failure for chat {chat_id}"),
                source: None,
            });
        }
        self.sent.lock().await.push(SentMessage {
            chat_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn resolve_display_name(&self, chat_id: i64, user_id: i64) -> String {
        self.display_names
            .lock()
            .await
            .get(&(chat_id, user_id))
            .cloned()
            .unwrap_or_else(|| user_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_messages_in_order() {
        let notifier = MockNotifier::new();
        notifier.send_message(1, "first").await.unwrap();
        notifier.send_message(2, "second").await.unwrap();

        let sent = notifier.sent_messages().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].chat_id, 1);
        assert_eq!(sent[0].text, "first");
        assert_eq!(sent[1].chat_id, 2);
    }

    #[tokio::test]
    async fn failing_chat_returns_delivery_error_and_captures_nothing() {
        let notifier = MockNotifier::new();
        notifier.fail_chat(9).await;

        let err = notifier.send_message(9, "lost").await.unwrap_err();
        assert!(matches!(err, LeetboardError::Delivery { .. }));
        assert_eq!(notifier.sent_count().await, 0);
    }

    #[tokio::test]
    async fn display_name_falls_back_to_numeric_id() {
        let notifier = MockNotifier::new();
        notifier.set_display_name(1, 42, "@alice").await;

        assert_eq!(notifier.resolve_display_name(1, 42).await, "@alice");
        assert_eq!(notifier.resolve_display_name(1, 77).await, "77");
    }
}
