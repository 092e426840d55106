// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scheduling primitives for the Leetboard tracker.
//!
//! [`run_interval`] drives the poll engine on a fixed cadence;
//! [`run_cron`] fires the weekly report on a calendar schedule with
//! misfire grace and overlap suppression.

pub mod runner;
pub mod schedule;

pub use runner::{run_cron, run_interval};
pub use schedule::CronJob;
