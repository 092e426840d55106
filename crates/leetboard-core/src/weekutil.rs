// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Current-week window computation for weekly counts and leaderboards.
//!
//! The week runs Monday 00:00 to the next Monday 00:00 in America/Chicago
//! standard time, applied as a fixed UTC-6 offset. Around DST transitions
//! the wall-clock boundary shifts by an hour relative to this window.

use chrono::{DateTime, Utc};

const DAY_SECS: i64 = 86_400;
const WEEK_SECS: i64 = 7 * DAY_SECS;

/// America/Chicago standard time as a fixed offset from UTC, in seconds.
const CHICAGO_OFFSET_SECS: i64 = -6 * 3600;

/// Half-open `[start, end)` UTC-second window of the week containing `now_utc`.
pub fn week_window_cst(now_utc: DateTime<Utc>) -> (i64, i64) {
    let local = now_utc.timestamp() + CHICAGO_OFFSET_SECS;
    let day = local.div_euclid(DAY_SECS);
    // 1970-01-01 was a Thursday, so Monday-based weekday = (day + 3) mod 7.
    let weekday = (day + 3).rem_euclid(7);
    let start = (day - weekday) * DAY_SECS - CHICAGO_OFFSET_SECS;
    (start, start + WEEK_SECS)
}
