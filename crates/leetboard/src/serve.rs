// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `leetboard serve` command implementation.
//!
//! Assembles the process-wide context in dependency order: tracing,
//! storage (with migrations), feed client, Telegram bot, poll engine,
//! then the schedulers. Teardown runs in reverse: stop scheduling
//! further cycles, then checkpoint and close storage. Runs in flight are
//! never interrupted.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use leetboard_config::LeetboardConfig;
use leetboard_core::{FeedSource, LeetboardError, Notifier};
use leetboard_cron::{run_cron, run_interval, CronJob};
use leetboard_engine::{run_weekly_report, PollEngine};
use leetboard_leetcode::LeetCodeClient;
use leetboard_storage::Database;
use leetboard_telegram::{run_bot, Bot, BotContext, TelegramNotifier};

/// Runs the `leetboard serve` command.
pub async fn run_serve(config: LeetboardConfig) -> Result<(), LeetboardError> {
    init_tracing(&config.bot.log_level);
    info!(name = %config.bot.name, "starting leetboard serve");

    let token = config.telegram.bot_token.clone().ok_or_else(|| {
        LeetboardError::Config("telegram.bot_token is required for serve".into())
    })?;

    // Stores come up before anything that uses them.
    let db = Arc::new(
        Database::open_with(&config.storage.database_path, config.storage.wal_mode).await?,
    );

    let feed: Arc<dyn FeedSource> = Arc::new(LeetCodeClient::new(&config.leetcode)?);

    let bot = Bot::new(token);
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(bot.clone()));

    let engine = Arc::new(PollEngine::new(
        db.clone(),
        feed.clone(),
        notifier.clone(),
        config.leetcode.fetch_limit,
        Duration::from_millis(config.poller.pacing_ms),
    ));

    // Parse the weekly schedule before spawning anything so a bad
    // expression fails startup, not the first Monday.
    let weekly = CronJob::new(
        &config.report.weekly_cron,
        Duration::from_secs(config.report.misfire_grace_secs),
    )?;

    let shutdown = CancellationToken::new();

    let poll_engine = engine.clone();
    let poll_handle = tokio::spawn(run_interval(
        Duration::from_secs(config.poller.interval_secs),
        shutdown.clone(),
        move || {
            let engine = poll_engine.clone();
            async move {
                engine.run_cycle().await;
            }
        },
    ));

    let cron_db = db.clone();
    let cron_notifier = notifier.clone();
    let cron_handle = tokio::spawn(run_cron(weekly, shutdown.clone(), move || {
        let db = cron_db.clone();
        let notifier = cron_notifier.clone();
        async move {
            if let Err(e) = run_weekly_report(&db, notifier.as_ref()).await {
                warn!(error = %e, "weekly report failed");
            }
        }
    }));

    // Command dispatching blocks until ctrl-c stops long polling.
    let ctx = Arc::new(BotContext {
        db: db.clone(),
        feed,
        notifier,
        fetch_limit: config.leetcode.fetch_limit,
    });
    run_bot(bot, ctx).await;

    info!("dispatcher stopped, shutting down schedulers");
    shutdown.cancel();
    if let Err(e) = poll_handle.await {
        warn!(error = %e, "poll loop task panicked");
    }
    if let Err(e) = cron_handle.await {
        warn!(error = %e, "cron loop task panicked");
    }

    db.close().await?;
    info!("shutdown complete");
    Ok(())
}

fn init_tracing(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
