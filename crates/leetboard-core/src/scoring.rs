// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure scoring: per-difficulty counts times a 3-weight scheme.

use crate::types::DifficultyCounts;

/// Weights applied to Easy/Medium/Hard counts when computing a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub easy: i64,
    pub medium: i64,
    pub hard: i64,
}

/// Fallback weighting used whenever a stored weights string is malformed.
pub const DEFAULT_WEIGHTS: ScoreWeights = ScoreWeights {
    easy: 1,
    medium: 2,
    hard: 5,
};

impl Default for ScoreWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl ScoreWeights {
    /// Parse a free-form "e,m,h" string into three integer weights.
    ///
    /// Any parse failure (wrong field count, non-integer token) falls
    /// back to [`DEFAULT_WEIGHTS`]. Scoring never fails on malformed
    /// stored configuration.
    pub fn parse(weights_str: &str) -> Self {
        let fields: Vec<_> = weights_str.split(',').map(str::trim).collect();
        let [e, m, h] = fields.as_slice() else {
            return DEFAULT_WEIGHTS;
        };
        match (e.parse(), m.parse(), h.parse()) {
            (Ok(easy), Ok(medium), Ok(hard)) => Self { easy, medium, hard },
            _ => DEFAULT_WEIGHTS,
        }
    }
}

/// Total score for one user: `e*easy + m*medium + h*hard`.
pub fn score_counts(counts: &DifficultyCounts, weights: ScoreWeights) -> i64 {
    i64::from(counts.easy) * weights.easy
        + i64::from(counts.medium) * weights.medium
        + i64::from(counts.hard) * weights.hard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_weighted_counts() {
        let counts = DifficultyCounts {
            easy: 2,
            medium: 1,
            hard: 0,
        };
        let weights = ScoreWeights {
            easy: 1,
            medium: 2,
            hard: 5,
        };
        assert_eq!(score_counts(&counts, weights), 4);
    }

    #[test]
    fn missing_difficulties_count_as_zero() {
        let counts = DifficultyCounts::default();
        assert_eq!(score_counts(&counts, DEFAULT_WEIGHTS), 0);
    }

    #[test]
    fn parses_well_formed_weights() {
        assert_eq!(
            ScoreWeights::parse("3, 4, 7"),
            ScoreWeights {
                easy: 3,
                medium: 4,
                hard: 7
            }
        );
    }

    #[test]
    fn malformed_weights_fall_back_to_default() {
        assert_eq!(ScoreWeights::parse("x"), DEFAULT_WEIGHTS);
        assert_eq!(ScoreWeights::parse("1,2"), DEFAULT_WEIGHTS);
        assert_eq!(ScoreWeights::parse("1,2,3,4"), DEFAULT_WEIGHTS);
        assert_eq!(ScoreWeights::parse("1,two,3"), DEFAULT_WEIGHTS);
        assert_eq!(ScoreWeights::parse(""), DEFAULT_WEIGHTS);
    }

    #[test]
    fn negative_weights_are_accepted_as_written() {
        // The store may hold any integers; scoring applies them verbatim.
        let weights = ScoreWeights::parse("-1,0,10");
        let counts = DifficultyCounts {
            easy: 3,
            medium: 5,
            hard: 1,
        };
        assert_eq!(score_counts(&counts, weights), 7);
    }
}
