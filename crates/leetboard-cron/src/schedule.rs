// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar schedule evaluation.
//!
//! Cron expressions are evaluated against America/Chicago standard time
//! (fixed UTC-6), matching the weekly-window semantics used for counts.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use croner::Cron;
use leetboard_core::LeetboardError;

/// America/Chicago standard time as a fixed offset.
fn chicago() -> FixedOffset {
    FixedOffset::west_opt(6 * 3600).expect("static UTC-6 offset")
}

/// A parsed calendar schedule with a misfire grace window.
#[derive(Debug, Clone)]
pub struct CronJob {
    cron: Cron,
    grace: Duration,
}

impl CronJob {
    /// Parse a cron expression. Invalid expressions are configuration
    /// errors surfaced at startup, not at fire time.
    pub fn new(pattern: &str, grace: Duration) -> Result<Self, LeetboardError> {
        let cron = Cron::from_str(pattern).map_err(|e| {
            LeetboardError::Config(format!("invalid cron expression `{pattern}`: {e}"))
        })?;
        Ok(Self { cron, grace })
    }

    /// The misfire grace window.
    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Next due instant strictly after `after`, or `None` when the
    /// schedule has no future occurrence.
    pub fn next_due(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let local = after.with_timezone(&chicago());
        self.cron
            .find_next_occurrence(&local, false)
            .ok()
            .map(|due| due.with_timezone(&Utc))
    }

    /// Whether a due instant should still fire at `now`.
    ///
    /// Early is never fired here (the runner sleeps until due); late
    /// fires only inside the grace window, so a long outage coalesces to
    /// zero missed runs rather than a burst.
    pub fn should_fire(&self, due: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        if now < due {
            return false;
        }
        match (now - due).to_std() {
            Ok(lateness) => lateness <= self.grace,
            Err(_) => false,
        }
    }
}
