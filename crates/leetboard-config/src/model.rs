// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Leetboard tracker.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Leetboard configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LeetboardConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Upstream LeetCode feed settings.
    #[serde(default)]
    pub leetcode: LeetcodeConfig,

    /// Poll engine cadence settings.
    #[serde(default)]
    pub poller: PollerConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Weekly report schedule settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name of the bot.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_bot_name() -> String {
    "leetboard".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. `None` disables the Telegram channel.
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// Upstream LeetCode feed configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LeetcodeConfig {
    /// GraphQL endpoint URL.
    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,

    /// Maximum recent-submission events fetched per identity per cycle.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for LeetcodeConfig {
    fn default() -> Self {
        Self {
            graphql_url: default_graphql_url(),
            fetch_limit: default_fetch_limit(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_graphql_url() -> String {
    "https://leetcode.com/graphql".to_string()
}

fn default_fetch_limit() -> u32 {
    12
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Poll engine cadence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PollerConfig {
    /// Delay between full poll cycles, in seconds.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Pacing delay between identities within one cycle, in milliseconds.
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            pacing_ms: default_pacing_ms(),
        }
    }
}

fn default_interval_secs() -> u64 {
    30
}

fn default_pacing_ms() -> u64 {
    500
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("leetboard").join("leetboard.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("leetboard.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Weekly report schedule configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Cron expression for the weekly leaderboard, evaluated in
    /// America/Chicago standard time.
    #[serde(default = "default_weekly_cron")]
    pub weekly_cron: String,

    /// Grace window in seconds during which a missed firing still runs once.
    #[serde(default = "default_misfire_grace_secs")]
    pub misfire_grace_secs: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            weekly_cron: default_weekly_cron(),
            misfire_grace_secs: default_misfire_grace_secs(),
        }
    }
}

fn default_weekly_cron() -> String {
    // Monday 09:00.
    "0 9 * * MON".to_string()
}

fn default_misfire_grace_secs() -> u64 {
    300
}
