// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The poll engine: incremental feed polling with exactly-once crediting.
//!
//! One cycle walks a snapshot of tracked identities sequentially. Per
//! identity: read the cursor, fetch a bounded recent feed, stable-sort
//! ascending by timestamp, drop events at or below the cursor, then per
//! surviving event resolve metadata through the cache, attempt the
//! ledger insert, announce on success, and advance the cursor. The
//! ledger's uniqueness constraint is the dedup gate; the cursor filter
//! only saves redundant fetches and write attempts.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use leetboard_core::types::{ProblemMeta, Submission, TrackedUser};
use leetboard_core::weekutil::week_window_cst;
use leetboard_core::{score_counts, FeedSource, LeetboardError, Notifier, ScoreWeights};
use leetboard_storage::queries::{completions, cursors, problems, users};
use leetboard_storage::Database;

use crate::announce;

/// Outcome counters for one full poll cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Identities in the cycle snapshot.
    pub identities: usize,
    /// Events that survived the cutoff filter and were processed.
    pub events_seen: usize,
    /// Events that produced a new ledger entry.
    pub completions: usize,
    /// Identities aborted by an error this cycle.
    pub failures: usize,
}

#[derive(Debug, Default)]
struct IdentityStats {
    events_seen: usize,
    completions: usize,
}

/// Orchestrates polling across all tracked identities.
///
/// Holds no per-cycle state: cursors and the ledger are the only state
/// that survives between cycles, and both live in storage.
pub struct PollEngine {
    db: Arc<Database>,
    feed: Arc<dyn FeedSource>,
    notifier: Arc<dyn Notifier>,
    fetch_limit: u32,
    pacing: Duration,
}

impl PollEngine {
    pub fn new(
        db: Arc<Database>,
        feed: Arc<dyn FeedSource>,
        notifier: Arc<dyn Notifier>,
        fetch_limit: u32,
        pacing: Duration,
    ) -> Self {
        Self {
            db,
            feed,
            notifier,
            fetch_limit,
            pacing,
        }
    }

    /// Run one full cycle over a snapshot of tracked identities.
    ///
    /// Identities added mid-cycle are picked up next cycle. Errors abort
    /// only the failing identity's remaining events; the rest of the
    /// cycle continues.
    pub async fn run_cycle(&self) -> CycleReport {
        let snapshot = match users::tracked_users(&self.db).await {
            Ok(users) => users,
            Err(e) => {
                warn!(error = %e, "could not snapshot tracked users, skipping cycle");
                return CycleReport::default();
            }
        };

        let mut report = CycleReport {
            identities: snapshot.len(),
            ..CycleReport::default()
        };

        for (index, user) in snapshot.iter().enumerate() {
            match self.process_identity(user).await {
                Ok(stats) => {
                    report.events_seen += stats.events_seen;
                    report.completions += stats.completions;
                }
                Err(e) => {
                    report.failures += 1;
                    warn!(
                        user = %user.lc_username,
                        error = %e,
                        "identity aborted for this cycle; cursor holds at last advance"
                    );
                }
            }
            // Pace requests to the upstream feed between identities.
            if index + 1 < snapshot.len() && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }
        }

        info!(
            identities = report.identities,
            events = report.events_seen,
            completions = report.completions,
            failures = report.failures,
            "poll cycle complete"
        );
        report
    }

    async fn process_identity(&self, user: &TrackedUser) -> Result<IdentityStats, LeetboardError> {
        let cutoff = cursors::get_cursor(&self.db, &user.lc_username).await?;

        let mut batch = self
            .feed
            .recent_ac_submissions(&user.lc_username, self.fetch_limit)
            .await?;
        // Stable sort: same-timestamp events keep wire order.
        batch.sort_by_key(|s| s.timestamp);
        batch.retain(|s| s.timestamp > cutoff);

        debug!(
            user = %user.lc_username,
            cutoff,
            fresh = batch.len(),
            "feed delta computed"
        );

        let mut stats = IdentityStats::default();
        for submission in batch {
            let meta = self.resolve_metadata(&submission).await?;

            match completions::insert_completion(
                &self.db,
                user.telegram_user_id,
                &submission.slug,
                submission.timestamp,
            )
            .await
            {
                Ok(()) => {
                    stats.completions += 1;
                    self.announce_solve(user, &submission, &meta).await;
                }
                Err(e) if e.is_duplicate() => {
                    // The feed re-reported an already-credited solve
                    // inside the cutoff window; nothing to announce.
                    debug!(user = %user.lc_username, slug = %submission.slug, "already credited");
                }
                Err(e) => return Err(e),
            }

            // Advance regardless of insert or delivery outcome so a
            // downstream fault never replays a ledgered event.
            cursors::advance_cursor(&self.db, &user.lc_username, submission.timestamp).await?;
            stats.events_seen += 1;
        }
        Ok(stats)
    }

    /// Cache lookup with lazy population through the feed client.
    ///
    /// The insert is insert-if-absent, so losing a populate race across
    /// identities sharing a problem is a no-op; the first-resolved row
    /// wins and is read back as authoritative.
    async fn resolve_metadata(
        &self,
        submission: &Submission,
    ) -> Result<ProblemMeta, LeetboardError> {
        if let Some(meta) = problems::get_problem(&self.db, &submission.slug).await? {
            return Ok(meta);
        }
        let fetched = self.feed.problem_metadata(&submission.slug).await?;
        problems::insert_problem_if_absent(&self.db, &submission.slug, &fetched).await?;
        Ok(problems::get_problem(&self.db, &submission.slug)
            .await?
            .unwrap_or(fetched))
    }

    /// Emit one announcement per notify-enabled chat membership.
    ///
    /// Everything here is after the ledger commit and best-effort:
    /// failures are logged, never propagated, so they cannot block
    /// cursor advancement or re-process the event.
    async fn announce_solve(
        &self,
        user: &TrackedUser,
        submission: &Submission,
        meta: &ProblemMeta,
    ) {
        let chats = match users::get_user_chats(&self.db, user.telegram_user_id).await {
            Ok(chats) => chats,
            Err(e) => {
                warn!(user = %user.lc_username, error = %e, "membership lookup failed, skipping announcements");
                return;
            }
        };

        let (week_start, week_end) = week_window_cst(Utc::now());
        for chat in chats.iter().filter(|c| c.post_on_solve) {
            let counts = match completions::window_counts(
                &self.db,
                user.telegram_user_id,
                week_start,
                week_end,
            )
            .await
            {
                Ok(counts) => counts,
                Err(e) => {
                    warn!(chat = chat.chat_id, error = %e, "weekly count lookup failed");
                    continue;
                }
            };
            let weights = ScoreWeights::parse(&chat.scoring);
            let total = score_counts(&counts, weights);
            let name = self
                .notifier
                .resolve_display_name(chat.chat_id, user.telegram_user_id)
                .await;
            let text = announce::format_solve(&name, &meta.title, meta.difficulty, total, &counts);

            if let Err(e) = self.notifier.send_message(chat.chat_id, &text).await {
                warn!(
                    chat = chat.chat_id,
                    slug = %submission.slug,
                    error = %e,
                    "solve announcement failed; completion stands"
                );
            }
        }
    }
}
