// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the LeetCode GraphQL API.
//!
//! Fetches the recent accepted-submission feed for one username and
//! metadata for one problem slug. No caching here; the poll engine owns
//! the metadata cache. All failures, including timeouts, surface as
//! [`LeetboardError::Upstream`] and are recovered per identity upstream.

use std::time::Duration;

use async_trait::async_trait;
use leetboard_config::model::LeetcodeConfig;
use leetboard_core::types::{ProblemMeta, Submission};
use leetboard_core::{FeedSource, LeetboardError};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use crate::types::{ProblemResponse, RecentResponse};

const RECENT_AC_QUERY: &str = "\
query recentAc($username: String!, $limit: Int!) {
  recentAcSubmissionList(username: $username, limit: $limit) {
    id
    title
    titleSlug
    timestamp
  }
}";

const PROBLEM_QUERY: &str = "\
query bySlug($slug: String!) {
  question(titleSlug: $slug) { title difficulty }
}";

/// HTTP client for LeetCode GraphQL communication.
#[derive(Debug, Clone)]
pub struct LeetCodeClient {
    client: reqwest::Client,
    graphql_url: String,
}

impl LeetCodeClient {
    /// Creates a new client with the configured endpoint and timeout.
    pub fn new(config: &LeetcodeConfig) -> Result<Self, LeetboardError> {
        let mut headers = HeaderMap::new();
        // LeetCode rejects requests without a browser-ish user agent.
        headers.insert("user-agent", HeaderValue::from_static("Mozilla/5.0"));
        headers.insert("referer", HeaderValue::from_static("https://leetcode.com"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| LeetboardError::Upstream {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            graphql_url: config.graphql_url.clone(),
        })
    }

    /// Overrides the endpoint URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_graphql_url(mut self, url: String) -> Self {
        self.graphql_url = url;
        self
    }

    async fn post_graphql<T: for<'de> Deserialize<'de>>(
        &self,
        body: &serde_json::Value,
    ) -> Result<T, LeetboardError> {
        let response = self
            .client
            .post(&self.graphql_url)
            .json(body)
            .send()
            .await
            .map_err(|e| LeetboardError::Upstream {
                message: format!("request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LeetboardError::Upstream {
                message: format!("LeetCode returned {status}: {body}"),
                source: None,
            });
        }

        response.json::<T>().await.map_err(|e| LeetboardError::Upstream {
            message: format!("malformed response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl FeedSource for LeetCodeClient {
    /// Fetch up to `limit` recent accepted submissions for `username`.
    ///
    /// The wire order is whatever the upstream returns, typically newest
    /// first; callers sort before processing.
    async fn recent_ac_submissions(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Submission>, LeetboardError> {
        let body = serde_json::json!({
            "query": RECENT_AC_QUERY,
            "variables": { "username": username, "limit": limit },
        });
        let response: RecentResponse = self.post_graphql(&body).await?;

        let raw = response
            .data
            .and_then(|d| d.recent_ac_submission_list)
            .unwrap_or_default();

        let mut submissions = Vec::with_capacity(raw.len());
        for entry in raw {
            submissions.push(entry.try_into()?);
        }
        debug!(username, count = submissions.len(), "recent feed fetched");
        Ok(submissions)
    }

    /// Fetch title and difficulty for one problem slug.
    async fn problem_metadata(&self, slug: &str) -> Result<ProblemMeta, LeetboardError> {
        let body = serde_json::json!({
            "query": PROBLEM_QUERY,
            "variables": { "slug": slug },
        });
        let response: ProblemResponse = self.post_graphql(&body).await?;

        let question = response
            .data
            .and_then(|d| d.question)
            .ok_or_else(|| LeetboardError::Upstream {
                message: format!("no question data for slug `{slug}`"),
                source: None,
            })?;

        let difficulty = question.difficulty.parse().map_err(|_| {
            LeetboardError::Upstream {
                message: format!(
                    "unknown difficulty `{}` for slug `{slug}`",
                    question.difficulty
                ),
                source: None,
            }
        })?;

        Ok(ProblemMeta {
            title: question.title,
            difficulty,
        })
    }
}
