// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for LeetCode GraphQL responses.

use leetboard_core::types::Submission;
use leetboard_core::LeetboardError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RecentResponse {
    pub data: Option<RecentData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecentData {
    #[serde(rename = "recentAcSubmissionList")]
    pub recent_ac_submission_list: Option<Vec<RawSubmission>>,
}

/// One feed entry as LeetCode serializes it. The timestamp arrives as a
/// JSON string on the live API but as a number from some mirrors.
#[derive(Debug, Deserialize)]
pub(crate) struct RawSubmission {
    pub title: String,
    #[serde(rename = "titleSlug")]
    pub title_slug: String,
    pub timestamp: RawTimestamp,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawTimestamp {
    Int(i64),
    Str(String),
}

impl TryFrom<RawSubmission> for Submission {
    type Error = LeetboardError;

    fn try_from(raw: RawSubmission) -> Result<Self, Self::Error> {
        let timestamp = match raw.timestamp {
            RawTimestamp::Int(ts) => ts,
            RawTimestamp::Str(s) => s.parse().map_err(|_| LeetboardError::Upstream {
                message: format!("non-numeric timestamp `{s}` for `{}`", raw.title_slug),
                source: None,
            })?,
        };
        Ok(Submission {
            slug: raw.title_slug,
            title: raw.title,
            timestamp,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProblemResponse {
    pub data: Option<ProblemData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProblemData {
    pub question: Option<RawQuestion>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawQuestion {
    pub title: String,
    pub difficulty: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_and_int_timestamps_both_convert() {
        let s = RawSubmission {
            title: "Two Sum".into(),
            title_slug: "two-sum".into(),
            timestamp: RawTimestamp::Str("1700000000".into()),
        };
        assert_eq!(Submission::try_from(s).unwrap().timestamp, 1_700_000_000);

        let n = RawSubmission {
            title: "Two Sum".into(),
            title_slug: "two-sum".into(),
            timestamp: RawTimestamp::Int(42),
        };
        assert_eq!(Submission::try_from(n).unwrap().timestamp, 42);
    }

    #[test]
    fn junk_timestamp_fails_conversion() {
        let raw = RawSubmission {
            title: "Two Sum".into(),
            title_slug: "two-sum".into(),
            timestamp: RawTimestamp::Str("yesterday".into()),
        };
        assert!(Submission::try_from(raw).is_err());
    }
}
