// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messaging seam between the poll engine and the chat transport.

use async_trait::async_trait;

use crate::error::LeetboardError;

/// Outbound messaging as the engine and report jobs consume it.
///
/// Implementations deliver to a chat platform; tests substitute a
/// capturing mock. Delivery failures surface as
/// [`LeetboardError::Delivery`] and are best-effort for callers: the
/// completion ledger, not the chat, is the source of truth.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `text` into the given chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), LeetboardError>;

    /// Resolve a member's display name for the given chat.
    ///
    /// Infallible by contract: on any lookup failure implementations
    /// return the numeric id rendered as a string.
    async fn resolve_display_name(&self, chat_id: i64, user_id: i64) -> String;
}
