// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Poll engine for the Leetboard tracker.
//!
//! [`PollEngine::run_cycle`] drives incremental polling with
//! exactly-once crediting; [`report`] builds weekly leaderboards for
//! the cron job and the on-demand command.

pub mod announce;
pub mod engine;
pub mod report;

pub use engine::{CycleReport, PollEngine};
pub use report::{chat_leaderboard, run_weekly_report, LeaderboardRow};
