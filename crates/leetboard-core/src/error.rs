// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Leetboard tracker.

use thiserror::Error;

/// The primary error type used across all Leetboard crates.
#[derive(Debug, Error)]
pub enum LeetboardError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Upstream feed errors (LeetCode unreachable, malformed response,
    /// rate limiting, request timeout). Recovered per identity; never
    /// fatal to the poll cycle as a whole.
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The completion ledger already holds this (user, problem) pair.
    /// Expected during normal polling; signals "already credited".
    #[error("completion already recorded for user {user_id} on {slug}")]
    Duplicate { user_id: i64, slug: String },

    /// A lookup referenced an identity or record that does not exist.
    /// Surfaced to the caller as a user-visible message, not retried.
    #[error("not found: {0}")]
    NotFound(String),

    /// Message delivery failures (chat send failed). Logged and
    /// swallowed; never rolls back a committed completion.
    #[error("delivery error: {message}")]
    Delivery {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LeetboardError {
    /// True if this error marks an already-credited completion rather
    /// than a real failure.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, LeetboardError::Duplicate { .. })
    }
}
