// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat command handling.
//!
//! Each command resolves to a reply string; the dispatcher endpoint owns
//! the actual send. Storage failures degrade to a generic apology rather
//! than leaking internals into the chat.

use std::sync::Arc;

use chrono::Utc;
use teloxide::prelude::*;
use teloxide::types::ChatKind;
use teloxide::utils::command::BotCommands;
use tracing::warn;

use leetboard_core::weekutil::week_window_cst;
use leetboard_core::{FeedSource, LeetboardError, Notifier};
use leetboard_engine::announce::{self, RankedEntry};
use leetboard_engine::chat_leaderboard;
use leetboard_storage::models::LinkOutcome;
use leetboard_storage::queries::{completions, cursors, users};
use leetboard_storage::Database;

/// Shared collaborators for command handling, assembled once at startup.
pub struct BotContext {
    pub db: Arc<Database>,
    pub feed: Arc<dyn FeedSource>,
    pub notifier: Arc<dyn Notifier>,
    pub fetch_limit: u32,
}

/// Commands understood by the bot.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Leetboard commands:")]
pub enum Command {
    #[command(description = "show a short introduction")]
    Start,
    #[command(description = "link your LeetCode account: /link <username>")]
    Link(String),
    #[command(description = "unlink your account and forget your solves")]
    Unlink,
    #[command(description = "join this chat's leaderboard")]
    Join,
    #[command(description = "leave this chat's leaderboard")]
    Leave,
    #[command(description = "toggle solve announcements: /postonsolve on|off")]
    Postonsolve(String),
    #[command(description = "your lifetime and weekly solve counts")]
    Stats,
    #[command(description = "this week's leaderboard")]
    Leaderboard,
    #[command(description = "inspect the recent feed: /debugrecent <username>")]
    Debugrecent(String),
}

const GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";

/// Resolve a command to its reply text.
pub async fn execute_command(ctx: &BotContext, msg: &Message, cmd: Command) -> String {
    match cmd {
        Command::Start => {
            "Hi! Link your LeetCode account with /link <username>. \
             In groups, use /join to enter the leaderboard."
                .to_string()
        }
        Command::Link(username) => link(ctx, msg, username.trim()).await,
        Command::Unlink => unlink(ctx, msg).await,
        Command::Join => join(ctx, msg).await,
        Command::Leave => leave(ctx, msg).await,
        Command::Postonsolve(arg) => post_on_solve(ctx, msg, arg.trim()).await,
        Command::Stats => stats(ctx, msg).await,
        Command::Leaderboard => leaderboard(ctx, msg).await,
        Command::Debugrecent(arg) => debug_recent(ctx, msg, arg.trim()).await,
    }
}

fn sender(msg: &Message) -> Option<&teloxide::types::User> {
    msg.from.as_ref()
}

fn is_group(msg: &Message) -> bool {
    !matches!(msg.chat.kind, ChatKind::Private(_))
}

async fn link(ctx: &BotContext, msg: &Message, lc_username: &str) -> String {
    let Some(from) = sender(msg) else {
        return "Could not identify the sender.".to_string();
    };
    if lc_username.is_empty() {
        return "Usage: /link <leetcode_username>".to_string();
    }

    let outcome = users::link_user(
        &ctx.db,
        from.id.0 as i64,
        from.username.as_deref(),
        lc_username,
        Utc::now().timestamp(),
    )
    .await;
    match outcome {
        Ok(LinkOutcome::Linked) => format!(
            "Linked to LeetCode: {}. I'll track first-time accepted solves \
             and post to groups you join.",
            announce::escape_html(lc_username)
        ),
        Ok(LinkOutcome::AlreadyClaimed) => format!(
            "LeetCode account {} is already linked to someone else.",
            announce::escape_html(lc_username)
        ),
        Err(e) => {
            warn!(error = %e, "link failed");
            GENERIC_FAILURE.to_string()
        }
    }
}

async fn unlink(ctx: &BotContext, msg: &Message) -> String {
    let Some(from) = sender(msg) else {
        return "Could not identify the sender.".to_string();
    };
    match users::unlink_user(&ctx.db, from.id.0 as i64).await {
        Ok(()) => "Unlinked. Your solves and memberships are forgotten.".to_string(),
        Err(LeetboardError::NotFound(_)) => {
            "No linked account. Use /link <leetcode_username> first.".to_string()
        }
        Err(e) => {
            warn!(error = %e, "unlink failed");
            GENERIC_FAILURE.to_string()
        }
    }
}

async fn join(ctx: &BotContext, msg: &Message) -> String {
    let Some(from) = sender(msg) else {
        return "Could not identify the sender.".to_string();
    };
    if !is_group(msg) {
        return "Use /join inside a group.".to_string();
    }

    if let Err(e) = users::upsert_chat(&ctx.db, msg.chat.id.0, msg.chat.title()).await {
        warn!(error = %e, "chat registration failed");
        return GENERIC_FAILURE.to_string();
    }
    match users::join_chat(&ctx.db, msg.chat.id.0, from.id.0 as i64).await {
        Ok(()) => "You're in! First-time solves now count for this chat's weekly board."
            .to_string(),
        Err(LeetboardError::NotFound(_)) => {
            "Link your LeetCode account first with /link <username>.".to_string()
        }
        Err(e) => {
            warn!(error = %e, "join failed");
            GENERIC_FAILURE.to_string()
        }
    }
}

async fn leave(ctx: &BotContext, msg: &Message) -> String {
    let Some(from) = sender(msg) else {
        return "Could not identify the sender.".to_string();
    };
    if !is_group(msg) {
        return "Use /leave in the group you want to leave.".to_string();
    }
    match users::leave_chat(&ctx.db, msg.chat.id.0, from.id.0 as i64).await {
        Ok(()) => "Left this chat's leaderboard.".to_string(),
        Err(e) => {
            warn!(error = %e, "leave failed");
            GENERIC_FAILURE.to_string()
        }
    }
}

async fn post_on_solve(ctx: &BotContext, msg: &Message, arg: &str) -> String {
    if !is_group(msg) {
        return "Use /postonsolve inside a group.".to_string();
    }
    let enabled = match arg.to_ascii_lowercase().as_str() {
        "on" => true,
        "off" => false,
        _ => return "Usage: /postonsolve on|off".to_string(),
    };

    if let Err(e) = users::upsert_chat(&ctx.db, msg.chat.id.0, msg.chat.title()).await {
        warn!(error = %e, "chat registration failed");
        return GENERIC_FAILURE.to_string();
    }
    match users::set_post_on_solve(&ctx.db, msg.chat.id.0, enabled).await {
        Ok(()) => format!("Post-on-solve set to {arg}."),
        Err(e) => {
            warn!(error = %e, "post_on_solve update failed");
            GENERIC_FAILURE.to_string()
        }
    }
}

async fn stats(ctx: &BotContext, msg: &Message) -> String {
    let Some(from) = sender(msg) else {
        return "Could not identify the sender.".to_string();
    };
    let user_id = from.id.0 as i64;
    let (week_start, week_end) = week_window_cst(Utc::now());

    let lifetime = completions::lifetime_counts(&ctx.db, user_id).await;
    let week = completions::window_counts(&ctx.db, user_id, week_start, week_end).await;
    match (lifetime, week) {
        (Ok(lifetime), Ok(week)) => announce::format_stats(&lifetime, &week),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "stats lookup failed");
            GENERIC_FAILURE.to_string()
        }
    }
}

async fn leaderboard(ctx: &BotContext, msg: &Message) -> String {
    if !is_group(msg) {
        return "Use /leaderboard inside a group.".to_string();
    }
    if let Err(e) = users::upsert_chat(&ctx.db, msg.chat.id.0, msg.chat.title()).await {
        warn!(error = %e, "chat registration failed");
        return GENERIC_FAILURE.to_string();
    }

    let (week_start, week_end) = week_window_cst(Utc::now());
    let (weights, rows) =
        match chat_leaderboard(&ctx.db, msg.chat.id.0, week_start, week_end).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "leaderboard failed");
                return GENERIC_FAILURE.to_string();
            }
        };
    if rows.is_empty() {
        return "No solves yet this week.".to_string();
    }

    let mut entries = Vec::with_capacity(rows.len());
    for row in &rows {
        let display_name = ctx
            .notifier
            .resolve_display_name(msg.chat.id.0, row.telegram_user_id)
            .await;
        entries.push(RankedEntry {
            display_name,
            score: row.score,
            counts: row.counts,
        });
    }
    announce::format_leaderboard("This week's leaderboard", weights, &entries, false)
}

/// Diagnostic view of the raw feed against the cursor and ledger.
async fn debug_recent(ctx: &BotContext, msg: &Message, arg: &str) -> String {
    let lc_username = if arg.is_empty() {
        let Some(from) = sender(msg) else {
            return "Could not identify the sender.".to_string();
        };
        match users::get_user(&ctx.db, from.id.0 as i64).await {
            Ok(Some(user)) => user.lc_username,
            Ok(None) => {
                return "Link first with /link <leetcode_username>, or pass one: \
                        /debugrecent <username>"
                    .to_string();
            }
            Err(e) => {
                warn!(error = %e, "user lookup failed");
                return GENERIC_FAILURE.to_string();
            }
        }
    } else {
        arg.to_string()
    };

    let owner = match users::user_by_lc(&ctx.db, &lc_username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return format!(
                "No Telegram user linked to LeetCode '{}'.",
                announce::escape_html(&lc_username)
            );
        }
        Err(e) => {
            warn!(error = %e, "user lookup failed");
            return GENERIC_FAILURE.to_string();
        }
    };

    let cutoff = match cursors::get_cursor(&ctx.db, &lc_username).await {
        Ok(cutoff) => cutoff,
        Err(e) => {
            warn!(error = %e, "cursor lookup failed");
            return GENERIC_FAILURE.to_string();
        }
    };

    let mut feed = match ctx
        .feed
        .recent_ac_submissions(&lc_username, ctx.fetch_limit)
        .await
    {
        Ok(feed) => feed,
        Err(e) => return format!("Feed fetch failed: {e}"),
    };
    // Newest first for reading; the poll engine sorts the other way.
    feed.sort_by_key(|s| std::cmp::Reverse(s.timestamp));

    let mut lines = vec![format!("cutoff last_seen={cutoff}")];
    for submission in feed {
        let dup = completions::has_completion(&ctx.db, owner.telegram_user_id, &submission.slug)
            .await
            .unwrap_or(false);
        let age = if submission.timestamp > cutoff { "new" } else { "old" };
        let credit = if dup { "dup" } else { "first?" };
        lines.push(format!(
            "{}  {}  [{}]  -&gt; {age}/{credit}",
            submission.timestamp,
            announce::escape_html(&submission.title),
            announce::escape_html(&submission.slug),
        ));
    }
    format!("Recent ACs (newest first):\n{}", lines.join("\n"))
}
