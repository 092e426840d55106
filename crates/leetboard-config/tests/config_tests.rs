// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Leetboard configuration system.

use leetboard_config::model::LeetboardConfig;
use leetboard_config::{load_and_validate_str, load_config_from_str, ConfigError};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_leetboard_config() {
    let toml = r#"
[bot]
name = "test-bot"
log_level = "debug"

[telegram]
bot_token = "123:ABC"

[leetcode]
graphql_url = "http://localhost:9999/graphql"
fetch_limit = 8
request_timeout_secs = 10

[poller]
interval_secs = 60
pacing_ms = 250

[storage]
database_path = "/tmp/test.db"
wal_mode = false

[report]
weekly_cron = "0 8 * * SUN"
misfire_grace_secs = 120
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.bot.name, "test-bot");
    assert_eq!(config.bot.log_level, "debug");
    assert_eq!(config.telegram.bot_token.as_deref(), Some("123:ABC"));
    assert_eq!(config.leetcode.graphql_url, "http://localhost:9999/graphql");
    assert_eq!(config.leetcode.fetch_limit, 8);
    assert_eq!(config.leetcode.request_timeout_secs, 10);
    assert_eq!(config.poller.interval_secs, 60);
    assert_eq!(config.poller.pacing_ms, 250);
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.report.weekly_cron, "0 8 * * SUN");
    assert_eq!(config.report.misfire_grace_secs, 120);
}

/// Unknown field in a section is rejected by `deny_unknown_fields`.
#[test]
fn unknown_field_produces_error() {
    let toml = r#"
[poller]
intervall_secs = 60
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("intervall_secs"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.bot.name, "leetboard");
    assert_eq!(config.bot.log_level, "info");
    assert!(config.telegram.bot_token.is_none());
    assert_eq!(config.leetcode.graphql_url, "https://leetcode.com/graphql");
    assert_eq!(config.leetcode.fetch_limit, 12);
    assert_eq!(config.poller.interval_secs, 30);
    assert_eq!(config.poller.pacing_ms, 500);
    assert_eq!(config.report.weekly_cron, "0 9 * * MON");
}

/// Wrong value type surfaces as a parse error, not a panic.
#[test]
fn type_mismatch_produces_error() {
    let toml = r#"
[leetcode]
fetch_limit = "a dozen"
"#;
    assert!(load_config_from_str(toml).is_err());
}

/// Validation failures come back as `Validation` diagnostics.
#[test]
fn load_and_validate_str_reports_validation_errors() {
    let toml = r#"
[leetcode]
fetch_limit = 0
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("fetch_limit"))));
}

/// Plain serde round-trip through the toml crate.
#[test]
fn config_serializes_back_to_toml() {
    let config = LeetboardConfig::default();
    let rendered = toml::to_string(&config).expect("default config should serialize");
    let reparsed: LeetboardConfig = toml::from_str(&rendered).expect("round trip");
    assert_eq!(reparsed.poller.interval_secs, config.poller.interval_secs);
    assert_eq!(reparsed.storage.database_path, config.storage.database_path);
}
