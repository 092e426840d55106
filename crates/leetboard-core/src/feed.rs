// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Upstream feed seam between the poll engine and the HTTP client.

use async_trait::async_trait;

use crate::error::LeetboardError;
use crate::types::{ProblemMeta, Submission};

/// Read access to the external submission feed.
///
/// The production implementation talks GraphQL to LeetCode; tests
/// substitute scripted snapshots. Errors are [`LeetboardError::Upstream`]
/// and abort only the current identity's cycle.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Up to `limit` recent accepted submissions for `username`, in
    /// arbitrary wire order.
    async fn recent_ac_submissions(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Submission>, LeetboardError>;

    /// Title and difficulty for one problem slug.
    async fn problem_metadata(&self, slug: &str) -> Result<ProblemMeta, LeetboardError>;
}
