// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message formatting for solve announcements and reports.
//!
//! Output is Telegram HTML. Problem titles come from the upstream
//! metadata and are escaped before interpolation.

use leetboard_core::types::{Difficulty, DifficultyCounts};
use leetboard_core::ScoreWeights;

/// Escape the three characters Telegram's HTML parse mode reserves.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Announcement for one first-time solve.
pub fn format_solve(
    display_name: &str,
    title: &str,
    difficulty: Difficulty,
    weekly_score: i64,
    weekly_counts: &DifficultyCounts,
) -> String {
    format!(
        "\u{1F389} {} solved <b>{}</b> (<i>{}</i>).\nWeekly score: <b>{}</b> (E:{} M:{} H:{})",
        escape_html(display_name),
        escape_html(title),
        difficulty,
        weekly_score,
        weekly_counts.easy,
        weekly_counts.medium,
        weekly_counts.hard,
    )
}

/// One ranked leaderboard entry, name already resolved.
pub struct RankedEntry {
    pub display_name: String,
    pub score: i64,
    pub counts: DifficultyCounts,
}

/// Leaderboard text shared by the weekly report and the on-demand
/// command. The top entry is called out as the week's champion in the
/// weekly variant.
pub fn format_leaderboard(
    heading: &str,
    weights: ScoreWeights,
    entries: &[RankedEntry],
    crown_champion: bool,
) -> String {
    let mut lines = vec![format!(
        "\u{1F3C6} <b>{}</b> (E={}, M={}, H={})",
        escape_html(heading),
        weights.easy,
        weights.medium,
        weights.hard,
    )];
    for (rank, entry) in entries.iter().enumerate() {
        lines.push(format!(
            "{}. {} <b>{}</b> (E:{} M:{} H:{})",
            rank + 1,
            escape_html(&entry.display_name),
            entry.score,
            entry.counts.easy,
            entry.counts.medium,
            entry.counts.hard,
        ));
    }
    if crown_champion && let Some(champion) = entries.first() {
        lines.push(format!(
            "\nChampion of the week: {} \u{1F451}",
            escape_html(&champion.display_name)
        ));
    }
    lines.join("\n")
}

/// Lifetime and current-week stats for one user.
pub fn format_stats(lifetime: &DifficultyCounts, week: &DifficultyCounts) -> String {
    format!(
        "Lifetime: E:{} M:{} H:{}\nThis week: E:{} M:{} H:{}",
        lifetime.easy, lifetime.medium, lifetime.hard, week.easy, week.medium, week.hard,
    )
}
