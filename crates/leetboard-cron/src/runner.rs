// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schedule runners: the fixed-interval poll loop and the calendar job.
//!
//! Both run jobs inline on their own task, so one schedule can never
//! overlap itself; firings that come due while a run is still in flight
//! are suppressed, not queued. Shutdown stops scheduling further runs
//! and never interrupts a run mid-flight.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::schedule::CronJob;

/// Run `job` every `interval` until `shutdown` is cancelled.
///
/// The first run happens immediately. Missed ticks are delayed rather
/// than bursted.
pub async fn run_interval<F, Fut>(interval: Duration, shutdown: CancellationToken, mut job: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("interval loop stopping");
                return;
            }
            _ = ticker.tick() => job().await,
        }
    }
}

/// Run `job` on the calendar schedule until `shutdown` is cancelled.
///
/// Misfire handling: the search anchor starts one grace window in the
/// past, so a firing that came due just before startup (or during a
/// stall) still runs once; anything older is skipped. After each run the
/// anchor moves to "now", coalescing occurrences that became due while
/// the run was in flight.
pub async fn run_cron<F, Fut>(job_schedule: CronJob, shutdown: CancellationToken, mut job: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let grace =
        chrono::Duration::from_std(job_schedule.grace()).unwrap_or_else(|_| chrono::Duration::zero());
    let mut anchor = Utc::now() - grace;

    loop {
        let Some(due) = job_schedule.next_due(anchor) else {
            warn!("schedule has no future occurrence, stopping cron loop");
            return;
        };

        let now = Utc::now();
        if due > now {
            let wait = (due - now).to_std().unwrap_or(Duration::ZERO);
            debug!(due = %due, wait_secs = wait.as_secs(), "cron sleeping until next firing");
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("cron loop stopping");
                    return;
                }
                _ = tokio::time::sleep(wait) => {}
            }
        }

        let now = Utc::now();
        if job_schedule.should_fire(due, now) {
            job().await;
        } else if due <= now {
            debug!(due = %due, "missed firing outside grace window, skipping");
        }

        // Coalesce anything that became due while the job ran.
        anchor = Utc::now().max(due);
    }
}
