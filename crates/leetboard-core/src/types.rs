// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types shared across the Leetboard workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Problem difficulty, a closed set matching the upstream classification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One accepted-submission event from the upstream feed.
///
/// The wire order of events is arbitrary; the poll engine sorts by
/// `timestamp` before processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub slug: String,
    pub title: String,
    /// Solve instant, UTC seconds.
    pub timestamp: i64,
}

/// Problem metadata as cached on first encounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemMeta {
    pub title: String,
    pub difficulty: Difficulty,
}

/// A tracked pairing of an internal Telegram user with their LeetCode handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedUser {
    pub telegram_user_id: i64,
    pub lc_username: String,
}

/// Per-chat settings as seen by the poll engine and report jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSettings {
    pub chat_id: i64,
    /// Announce first-time solves into this chat as they happen.
    pub post_on_solve: bool,
    /// Free-form "e,m,h" weights string; parse failures fall back to defaults.
    pub scoring: String,
}

/// Per-difficulty solve counts for one user over some window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifficultyCounts {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl DifficultyCounts {
    /// Record `count` solves at the given difficulty.
    pub fn set(&mut self, difficulty: Difficulty, count: u32) {
        match difficulty {
            Difficulty::Easy => self.easy = count,
            Difficulty::Medium => self.medium = count,
            Difficulty::Hard => self.hard = count,
        }
    }

    pub fn get(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// A durably recorded first-time solve, emitted toward notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveEvent {
    pub telegram_user_id: i64,
    pub lc_username: String,
    pub slug: String,
    pub title: String,
    pub difficulty: Difficulty,
    /// Solve instant, UTC seconds.
    pub solved_at_utc: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn difficulty_display_round_trips() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let s = d.to_string();
            assert_eq!(Difficulty::from_str(&s).unwrap(), d);
        }
    }

    #[test]
    fn difficulty_rejects_unknown_label() {
        assert!(Difficulty::from_str("Impossible").is_err());
    }

    #[test]
    fn difficulty_serde_uses_upstream_labels() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");
        let parsed: Difficulty = serde_json::from_str("\"Hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
    }

    #[test]
    fn counts_set_and_get() {
        let mut counts = DifficultyCounts::default();
        counts.set(Difficulty::Medium, 3);
        assert_eq!(counts.get(Difficulty::Medium), 3);
        assert_eq!(counts.get(Difficulty::Easy), 0);
        assert_eq!(counts.get(Difficulty::Hard), 0);
    }
}
