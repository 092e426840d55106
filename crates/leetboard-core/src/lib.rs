// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Leetboard tracker.
//!
//! Defines the shared error type, domain types, the pure scoring
//! function, the weekly-window helper, and the `Notifier` trait that
//! decouples the poll engine from the chat transport.

pub mod error;
pub mod feed;
pub mod notify;
pub mod scoring;
pub mod types;
pub mod weekutil;

// Re-export key items at crate root for ergonomic imports.
pub use error::LeetboardError;
pub use feed::FeedSource;
pub use notify::Notifier;
pub use scoring::{score_counts, ScoreWeights, DEFAULT_WEIGHTS};
pub use types::{
    ChatSettings, Difficulty, DifficultyCounts, ProblemMeta, SolveEvent, Submission, TrackedUser,
};
pub use weekutil::week_window_cst;
