// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Leaderboard aggregation, shared by the weekly report job and the
//! on-demand chat command.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info, warn};

use leetboard_core::types::DifficultyCounts;
use leetboard_core::weekutil::week_window_cst;
use leetboard_core::{score_counts, LeetboardError, Notifier, ScoreWeights};
use leetboard_storage::models::ChatRow;
use leetboard_storage::queries::{completions, users};
use leetboard_storage::Database;

use crate::announce::{self, RankedEntry};

/// Entries shown per leaderboard.
const TOP_N: usize = 10;

/// One scored leaderboard row, best first after sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub telegram_user_id: i64,
    pub score: i64,
    pub counts: DifficultyCounts,
}

/// Compute the ranked weekly leaderboard for one chat.
///
/// Ordering: score descending, then Hard then Medium counts descending;
/// remaining ties keep ascending user-id order. `NotFound` when the chat
/// was never registered.
pub async fn chat_leaderboard(
    db: &Database,
    chat_id: i64,
    start: i64,
    end: i64,
) -> Result<(ScoreWeights, Vec<LeaderboardRow>), LeetboardError> {
    let chat = users::get_chat(db, chat_id)
        .await?
        .ok_or_else(|| LeetboardError::NotFound(format!("chat {chat_id} is not registered")))?;
    let weights = ScoreWeights::parse(&chat.scoring);
    let rows = ranked_rows(db, &chat, weights, start, end).await?;
    Ok((weights, rows))
}

async fn ranked_rows(
    db: &Database,
    chat: &ChatRow,
    weights: ScoreWeights,
    start: i64,
    end: i64,
) -> Result<Vec<LeaderboardRow>, LeetboardError> {
    let raw = completions::weekly_counts_by_chat(db, chat.chat_id, start, end).await?;

    // BTreeMap keys the aggregation by user id so residual ties are
    // deterministic under the stable sort below.
    let mut per_user: BTreeMap<i64, DifficultyCounts> = BTreeMap::new();
    for row in raw {
        per_user
            .entry(row.telegram_user_id)
            .or_default()
            .set(row.difficulty, row.count);
    }

    let mut rows: Vec<LeaderboardRow> = per_user
        .into_iter()
        .map(|(telegram_user_id, counts)| LeaderboardRow {
            telegram_user_id,
            score: score_counts(&counts, weights),
            counts,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(b.counts.hard.cmp(&a.counts.hard))
            .then(b.counts.medium.cmp(&a.counts.medium))
    });
    rows.truncate(TOP_N);
    Ok(rows)
}

/// Post the weekly leaderboard into every registered chat.
///
/// Chats with no solves this week are skipped. Per-chat failures are
/// logged and do not stop the remaining chats; only the initial chat
/// listing can fail the job.
pub async fn run_weekly_report(
    db: &Database,
    notifier: &dyn Notifier,
) -> Result<(), LeetboardError> {
    let (start, end) = week_window_cst(Utc::now());
    let chats = users::all_chats(db).await?;
    info!(chats = chats.len(), "weekly report starting");

    for chat in chats {
        let weights = ScoreWeights::parse(&chat.scoring);
        let rows = match ranked_rows(db, &chat, weights, start, end).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(chat = chat.chat_id, error = %e, "leaderboard aggregation failed");
                continue;
            }
        };
        if rows.is_empty() {
            debug!(chat = chat.chat_id, "no solves this week, skipping");
            continue;
        }

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let display_name = notifier
                .resolve_display_name(chat.chat_id, row.telegram_user_id)
                .await;
            entries.push(RankedEntry {
                display_name,
                score: row.score,
                counts: row.counts,
            });
        }

        let text = announce::format_leaderboard("Weekly leaderboard", weights, &entries, true);
        if let Err(e) = notifier.send_message(chat.chat_id, &text).await {
            warn!(chat = chat.chat_id, error = %e, "weekly leaderboard delivery failed");
        }
    }
    Ok(())
}
