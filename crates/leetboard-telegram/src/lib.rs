// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel for the Leetboard tracker.
//!
//! Long-polls the Bot API via teloxide, routes chat commands to the
//! stores, and implements the core [`Notifier`] seam used by the poll
//! engine and the weekly report.
//!
//! [`Notifier`]: leetboard_core::Notifier

pub mod commands;
pub mod notifier;

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{info, warn};

pub use commands::{BotContext, Command};
pub use notifier::TelegramNotifier;
// Re-exported so the binary can construct the bot without a direct
// teloxide dependency.
pub use teloxide::Bot;

async fn answer(
    bot: Bot,
    msg: Message,
    cmd: Command,
    ctx: Arc<BotContext>,
) -> ResponseResult<()> {
    let reply = commands::execute_command(&ctx, &msg, cmd).await;
    if let Err(e) = bot
        .send_message(msg.chat.id, reply)
        .parse_mode(ParseMode::Html)
        .await
    {
        warn!(chat = msg.chat.id.0, error = %e, "command reply failed");
    }
    Ok(())
}

/// Run the command dispatcher until the process shuts down.
///
/// Non-command updates are ignored; command replies are best-effort.
pub async fn run_bot(bot: Bot, ctx: Arc<BotContext>) {
    info!("starting Telegram long polling");
    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(answer);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![ctx])
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
