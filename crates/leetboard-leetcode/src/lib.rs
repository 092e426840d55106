// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LeetCode feed client for the Leetboard tracker.
//!
//! Thin GraphQL client over reqwest: a bounded recent-activity feed per
//! username and per-slug problem metadata. Failure contract: any
//! non-success response, malformed body, or timeout is an
//! [`leetboard_core::LeetboardError::Upstream`] the poll engine absorbs
//! at per-identity granularity.

pub mod client;
mod types;

pub use client::LeetCodeClient;
