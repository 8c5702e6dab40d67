//! Review scheduling policy.
//!
//! Decides when a card is shown again from its previous timestamps and
//! whether the last answer was correct:
//! - First correct answer on a never-reviewed card: come back after a short initial interval
//! - Correct answer on a reviewed card: wait twice the time elapsed since the last review
//! - Wrong answer: come back after a short fixed interval, no backoff
//!
//! The function is total. Timestamps in the future (clock skew) give a
//! negative elapsed interval and flow through the arithmetic unchanged.

use super::{NextReview, ReviewTimes, Timestamp};
use serde::{Deserialize, Serialize};

pub const INITIAL_INTERVAL_SECS: i64 = 30;
pub const FAILURE_INTERVAL_SECS: i64 = 30;
pub const SUCCESS_MULTIPLIER: i64 = 2;

/// Constants of the scheduling policy, overridable from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReviewPolicy {
    pub initial_interval_secs: i64,
    pub failure_interval_secs: i64,
    pub success_multiplier: i64,
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            initial_interval_secs: INITIAL_INTERVAL_SECS,
            failure_interval_secs: FAILURE_INTERVAL_SECS,
            success_multiplier: SUCCESS_MULTIPLIER,
        }
    }
}

impl ReviewPolicy {
    /// Computes the timestamps to store after an answer given at `now`.
    pub fn schedule(
        &self,
        last_review_at: Option<Timestamp>,
        next_review: NextReview,
        was_correct: bool,
        now: Timestamp,
    ) -> ReviewTimes {
        let is_virgin = last_review_at.is_none() && next_review == NextReview::Unscheduled;

        let next_review_at = if !was_correct {
            now.saturating_add(self.failure_interval_secs)
        } else if is_virgin {
            now.saturating_add(self.initial_interval_secs)
        } else {
            // A scheduled card missing its last review counts as reviewed just now
            let elapsed = now.saturating_sub(last_review_at.unwrap_or(now));
            now.saturating_add(elapsed.saturating_mul(self.success_multiplier))
        };

        ReviewTimes {
            last_review_at: now,
            next_review_at,
        }
    }
}

/// Schedules with the default policy.
pub fn schedule(
    last_review_at: Option<Timestamp>,
    next_review: NextReview,
    was_correct: bool,
    now: Timestamp,
) -> ReviewTimes {
    ReviewPolicy::default().schedule(last_review_at, next_review, was_correct, now)
}
