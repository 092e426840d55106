// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types returned by the query modules.
//!
//! Cross-crate domain types live in `leetboard-core::types`; this module
//! adds the storage-only shapes.

use leetboard_core::types::Difficulty;

/// A chat row with its per-chat settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRow {
    pub chat_id: i64,
    pub title: Option<String>,
    pub post_on_solve: bool,
    pub scoring: String,
}

/// A tracked user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub telegram_user_id: i64,
    pub tg_username: Option<String>,
    pub lc_username: String,
    pub created_at: i64,
}

/// One (user, difficulty, count) aggregation row from a weekly query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyCount {
    pub telegram_user_id: i64,
    pub difficulty: Difficulty,
    pub count: u32,
}

/// Outcome of a link attempt.
///
/// The `lc_username` uniqueness constraint means a link can lose to
/// another internal user who already claimed the external handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked,
    AlreadyClaimed,
}
