// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock feed source for deterministic poll-engine testing.
//!
//! `MockFeed` implements `FeedSource` with scripted per-username
//! snapshots, per-slug metadata, and failure injection for both calls.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use leetboard_core::types::{ProblemMeta, Submission};
use leetboard_core::{FeedSource, LeetboardError};

/// A scripted feed for testing.
///
/// Snapshots are returned verbatim (truncated to `limit`), so tests
/// control wire order exactly. Metadata fetches are recorded so tests
/// can assert the cache actually absorbed repeat lookups.
#[derive(Default)]
pub struct MockFeed {
    feeds: Mutex<HashMap<String, Vec<Submission>>>,
    problems: Mutex<HashMap<String, ProblemMeta>>,
    failing_users: Mutex<HashSet<String>>,
    metadata_fetch_log: Mutex<Vec<String>>,
}

impl MockFeed {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Script the feed snapshot returned for `username`.
    pub async fn set_feed(&self, username: &str, submissions: Vec<Submission>) {
        self.feeds
            .lock()
            .await
            .insert(username.to_string(), submissions);
    }

    /// Script the metadata returned for `slug`.
    pub async fn set_problem(&self, slug: &str, meta: ProblemMeta) {
        self.problems.lock().await.insert(slug.to_string(), meta);
    }

    /// Make every feed fetch for `username` fail with an upstream error.
    pub async fn fail_user(&self, username: &str) {
        self.failing_users.lock().await.insert(username.to_string());
    }

    /// Slugs for which `problem_metadata` was called, in call order.
    pub async fn metadata_fetches(&self) -> Vec<String> {
        self.metadata_fetch_log.lock().await.clone()
    }
}

#[async_trait]
impl FeedSource for MockFeed {
    async fn recent_ac_submissions(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Submission>, LeetboardError> {
        if self.failing_users.lock().await.contains(username) {
            return Err(LeetboardError::Upstream {
                message: format!("scripted failure for {username}"),
                source: None,
            });
        }
        let mut feed = self
            .feeds
            .lock()
            .await
            .get(username)
            .cloned()
            .unwrap_or_default();
        feed.truncate(limit as usize);
        Ok(feed)
    }

    async fn problem_metadata(&self, slug: &str) -> Result<ProblemMeta, LeetboardError> {
        self.metadata_fetch_log.lock().await.push(slug.to_string());
        self.problems
            .lock()
            .await
            .get(slug)
            .cloned()
            .ok_or_else(|| LeetboardError::Upstream {
                message: format!("no scripted metadata for {slug}"),
                source: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leetboard_core::types::Difficulty;

    #[tokio::test]
    async fn returns_scripted_feed_truncated_to_limit() {
        let feed = MockFeed::new();
        feed.set_feed(
            "alice",
            vec![
                Submission {
                    slug: "a".into(),
                    title: "A".into(),
                    timestamp: 1,
                },
                Submission {
                    slug: "b".into(),
                    title: "B".into(),
                    timestamp: 2,
                },
            ],
        )
        .await;

        let subs = feed.recent_ac_submissions("alice", 1).await.unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].slug, "a");
    }

    #[tokio::test]
    async fn unknown_user_has_empty_feed() {
        let feed = MockFeed::new();
        assert!(feed
            .recent_ac_submissions("ghost", 12)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn scripted_failure_is_upstream_error() {
        let feed = MockFeed::new();
        feed.fail_user("alice").await;
        let err = feed.recent_ac_submissions("alice", 12).await.unwrap_err();
        assert!(matches!(err, LeetboardError::Upstream { .. }));
    }

    #[tokio::test]
    async fn metadata_fetches_are_logged() {
        let feed = MockFeed::new();
        feed.set_problem(
            "two-sum",
            ProblemMeta {
                title: "Two Sum".into(),
                difficulty: Difficulty::Easy,
            },
        )
        .await;

        feed.problem_metadata("two-sum").await.unwrap();
        assert!(feed.problem_metadata("missing").await.is_err());
        assert_eq!(feed.metadata_fetches().await, vec!["two-sum", "missing"]);
    }
}
