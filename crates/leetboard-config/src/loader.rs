// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./leetboard.toml` > `~/.config/leetboard/leetboard.toml`
//! > `/etc/leetboard/leetboard.toml` with environment variable overrides via
//! `LEETBOARD_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LeetboardConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/leetboard/leetboard.toml` (system-wide)
/// 3. `~/.config/leetboard/leetboard.toml` (user XDG config)
/// 4. `./leetboard.toml` (local directory)
/// 5. `LEETBOARD_*` environment variables
pub fn load_config() -> Result<LeetboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LeetboardConfig::default()))
        .merge(Toml::file("/etc/leetboard/leetboard.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("leetboard/leetboard.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("leetboard.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<LeetboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LeetboardConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LeetboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LeetboardConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `LEETBOARD_TELEGRAM_BOT_TOKEN` must
/// map to `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    const SECTIONS: [&str; 6] = ["telegram", "leetcode", "poller", "storage", "report", "bot"];
    Env::prefixed("LEETBOARD_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: LEETBOARD_TELEGRAM_BOT_TOKEN -> "telegram_bot_token"
        let key_str = key.as_str();
        for section in SECTIONS {
            if let Some(rest) = key_str.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.to_string().into()
    })
}
