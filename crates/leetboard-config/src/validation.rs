// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as positive intervals and sane fetch bounds.

use crate::diagnostic::ConfigError;
use crate::model::LeetboardConfig;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LeetboardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !VALID_LOG_LEVELS.contains(&config.bot.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "bot.log_level must be one of {VALID_LOG_LEVELS:?}, got `{}`",
                config.bot.log_level
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.leetcode.graphql_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "leetcode.graphql_url must not be empty".to_string(),
        });
    }

    if !(1..=20).contains(&config.leetcode.fetch_limit) {
        errors.push(ConfigError::Validation {
            message: format!(
                "leetcode.fetch_limit must be between 1 and 20, got {}",
                config.leetcode.fetch_limit
            ),
        });
    }

    if config.leetcode.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "leetcode.request_timeout_secs must be positive".to_string(),
        });
    }

    if config.poller.interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "poller.interval_secs must be positive".to_string(),
        });
    }

    if config.report.weekly_cron.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "report.weekly_cron must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
